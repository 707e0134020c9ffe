use super::food::place_food;
use super::types::{Cell, Direction, EdgePolicy, Phase, SimulationState};
use crate::config::SimConfig;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
  /// Tick arrived while the simulation was not running; state unchanged.
  Ignored,
  Moved,
  Ate,
  GameOver,
  Won,
}

/// Builds a fresh run: snake laid out horizontally at the board center with
/// the head rightmost, heading right, food on a free cell, phase `Idle`.
pub fn seeded(config: &SimConfig, best_score: u64, rng: &mut impl Rng) -> SimulationState {
  let center = (config.grid_size / 2) as i32;
  let snake: Vec<Cell> = (0..config.initial_snake_length)
    .map(|offset| Cell {
      x: center - offset as i32,
      y: center,
    })
    .collect();
  let food = place_food(&snake, config.grid_size, rng);
  SimulationState {
    snake,
    food,
    current_direction: Direction::Right,
    pending_direction: Direction::Right,
    score: 0,
    best_score,
    speed_level: 0,
    phase: Phase::Idle,
  }
}

/// Applies one discrete tick: commit the pending direction, move the head,
/// collide, eat, grow or drop the tail. Returns the next state and what
/// happened; the input state is never mutated.
pub fn advance(
  state: &SimulationState,
  config: &SimConfig,
  rng: &mut impl Rng,
) -> (SimulationState, TickOutcome) {
  if state.phase != Phase::Running {
    return (state.clone(), TickOutcome::Ignored);
  }

  let mut next = state.clone();
  let direction = next.pending_direction;
  next.current_direction = direction;

  let Some(new_head) = neighbor(next.head(), direction, config) else {
    return (finish(next, Phase::GameOver), TickOutcome::GameOver);
  };

  // The tail cell still counts: it is dropped only after this check.
  if next.occupies(new_head) {
    return (finish(next, Phase::GameOver), TickOutcome::GameOver);
  }

  next.snake.insert(0, new_head);

  if next.food == Some(new_head) {
    next.score += config.food_reward;
    next.speed_level = config.speed_level(next.score);
    match place_food(&next.snake, config.grid_size, rng) {
      Some(food) => {
        next.food = Some(food);
        (next, TickOutcome::Ate)
      }
      None => {
        next.food = None;
        (finish(next, Phase::Won), TickOutcome::Won)
      }
    }
  } else {
    next.snake.pop();
    (next, TickOutcome::Moved)
  }
}

fn finish(mut state: SimulationState, phase: Phase) -> SimulationState {
  state.phase = phase;
  state.best_score = state.best_score.max(state.score);
  state
}

fn neighbor(cell: Cell, direction: Direction, config: &SimConfig) -> Option<Cell> {
  let grid = config.grid_size as i32;
  let (dx, dy) = direction.delta();
  let x = cell.x + dx;
  let y = cell.y + dy;
  match config.edge_policy {
    EdgePolicy::Wrap => Some(Cell {
      x: x.rem_euclid(grid),
      y: y.rem_euclid(grid),
    }),
    EdgePolicy::Wall => {
      if x < 0 || x >= grid || y < 0 || y >= grid {
        None
      } else {
        Some(Cell { x, y })
      }
    }
  }
}
