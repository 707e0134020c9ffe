use super::constants::MAX_FOOD_PLACEMENT_ATTEMPTS;
use super::types::Cell;
use rand::Rng;
use std::collections::HashSet;

/// Picks a free cell uniformly at random, or `None` when the board is full.
///
/// Rejection sampling is cheap while the board is mostly empty; once free
/// cells drop below a quarter of the board (or the attempt budget runs out)
/// the draw switches to an exhaustive scan so placement always terminates.
pub fn place_food(occupied: &[Cell], grid_size: usize, rng: &mut impl Rng) -> Option<Cell> {
  let total = grid_size * grid_size;
  if occupied.len() >= total {
    return None;
  }

  let free = total - occupied.len();
  if free * 4 >= total {
    for _ in 0..MAX_FOOD_PLACEMENT_ATTEMPTS {
      let candidate = Cell {
        x: rng.gen_range(0..grid_size as i32),
        y: rng.gen_range(0..grid_size as i32),
      };
      if !occupied.contains(&candidate) {
        return Some(candidate);
      }
    }
  }

  let taken: HashSet<Cell> = occupied.iter().copied().collect();
  let free_cells: Vec<Cell> = (0..grid_size as i32)
    .flat_map(|y| (0..grid_size as i32).map(move |x| Cell { x, y }))
    .filter(|cell| !taken.contains(cell))
    .collect();
  if free_cells.is_empty() {
    return None;
  }
  Some(free_cells[rng.gen_range(0..free_cells.len())])
}
