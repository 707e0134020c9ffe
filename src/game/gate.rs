use super::types::{Direction, Phase, SimulationState};

/// Buffers a direction request for the next tick. Requests are dropped while
/// the simulation is not running and when they would reverse straight into
/// the second segment. The slot holds one value; the last valid request
/// between two ticks wins.
pub fn set_pending_direction(state: &SimulationState, requested: Direction) -> SimulationState {
  if state.phase != Phase::Running {
    return state.clone();
  }
  if requested.is_opposite(state.current_direction) {
    return state.clone();
  }
  let mut next = state.clone();
  next.pending_direction = requested;
  next
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::game::types::Cell;

  fn make_state(phase: Phase, current: Direction) -> SimulationState {
    SimulationState {
      snake: vec![
        Cell { x: 10, y: 10 },
        Cell { x: 9, y: 10 },
        Cell { x: 8, y: 10 },
      ],
      food: Some(Cell { x: 0, y: 0 }),
      current_direction: current,
      pending_direction: current,
      score: 0,
      best_score: 0,
      speed_level: 0,
      phase,
    }
  }

  #[test]
  fn reversal_is_ignored_for_every_pair() {
    for current in [
      Direction::Up,
      Direction::Down,
      Direction::Left,
      Direction::Right,
    ] {
      let state = make_state(Phase::Running, current);
      let next = set_pending_direction(&state, current.opposite());
      assert_eq!(next, state);
    }
  }

  #[test]
  fn valid_request_updates_only_the_pending_slot() {
    let state = make_state(Phase::Running, Direction::Right);
    let next = set_pending_direction(&state, Direction::Up);
    assert_eq!(next.pending_direction, Direction::Up);
    assert_eq!(next.current_direction, Direction::Right);
    assert_eq!(next.snake, state.snake);
  }

  #[test]
  fn ignored_outside_running() {
    for phase in [Phase::Idle, Phase::Paused, Phase::GameOver, Phase::Won] {
      let state = make_state(phase, Direction::Right);
      let next = set_pending_direction(&state, Direction::Up);
      assert_eq!(next, state);
    }
  }

  #[test]
  fn last_valid_request_wins() {
    let state = make_state(Phase::Running, Direction::Right);
    // Down opposes the buffered Up but not the committed Right, so it still
    // replaces the pending request before the next tick.
    let first = set_pending_direction(&state, Direction::Up);
    let second = set_pending_direction(&first, Direction::Down);
    assert_eq!(second.pending_direction, Direction::Down);
  }
}
