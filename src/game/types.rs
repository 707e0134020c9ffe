use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
  pub x: i32,
  pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
  Up,
  Down,
  Left,
  Right,
}

impl Direction {
  pub fn delta(self) -> (i32, i32) {
    match self {
      Direction::Up => (0, -1),
      Direction::Down => (0, 1),
      Direction::Left => (-1, 0),
      Direction::Right => (1, 0),
    }
  }

  pub fn opposite(self) -> Direction {
    match self {
      Direction::Up => Direction::Down,
      Direction::Down => Direction::Up,
      Direction::Left => Direction::Right,
      Direction::Right => Direction::Left,
    }
  }

  pub fn is_opposite(self, other: Direction) -> bool {
    self.opposite() == other
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
  Idle,
  Running,
  Paused,
  GameOver,
  Won,
}

impl Phase {
  pub fn is_terminal(self) -> bool {
    matches!(self, Phase::GameOver | Phase::Won)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePolicy {
  Wrap,
  Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  Start,
  Pause,
  Resume,
  Toggle,
  Reset,
  Turn(Direction),
}

/// Whole simulation state for one run. Head is the first snake cell. `food`
/// is `None` only once the snake covers the entire board.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
  pub snake: Vec<Cell>,
  pub food: Option<Cell>,
  pub current_direction: Direction,
  pub pending_direction: Direction,
  pub score: u64,
  pub best_score: u64,
  pub speed_level: u32,
  pub phase: Phase,
}

impl SimulationState {
  pub fn head(&self) -> Cell {
    self.snake[0]
  }

  pub fn occupies(&self, cell: Cell) -> bool {
    self.snake.contains(&cell)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
  pub phase: Phase,
  pub snake: Vec<Cell>,
  pub food: Option<Cell>,
  pub direction: Direction,
  pub score: u64,
  pub best_score: u64,
  pub speed_level: u32,
  pub tick_ms: u64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn opposite_pairs_are_symmetric() {
    for direction in [
      Direction::Up,
      Direction::Down,
      Direction::Left,
      Direction::Right,
    ] {
      assert_eq!(direction.opposite().opposite(), direction);
      assert!(direction.is_opposite(direction.opposite()));
      assert!(!direction.is_opposite(direction));
    }
  }

  #[test]
  fn deltas_are_unit_steps() {
    for direction in [
      Direction::Up,
      Direction::Down,
      Direction::Left,
      Direction::Right,
    ] {
      let (dx, dy) = direction.delta();
      assert_eq!(dx.abs() + dy.abs(), 1);
    }
  }

  #[test]
  fn direction_serializes_uppercase() {
    let json = serde_json::to_string(&Direction::Up).expect("serialize");
    assert_eq!(json, "\"UP\"");
  }
}
