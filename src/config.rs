use crate::game::constants::{
  FOOD_REWARD, GRID_SIZE, INITIAL_SNAKE_LENGTH, INITIAL_TICK_MS, MIN_TICK_MS, SPEED_STEP_POINTS,
  TICK_STEP_MS,
};
use crate::game::types::EdgePolicy;
use std::env;

#[derive(Debug, Clone)]
pub struct SimConfig {
  pub grid_size: usize,
  pub edge_policy: EdgePolicy,
  pub initial_snake_length: usize,
  pub food_reward: u64,
  pub initial_tick_ms: u64,
  pub min_tick_ms: u64,
  pub tick_step_ms: u64,
  pub speed_step_points: u64,
}

impl Default for SimConfig {
  fn default() -> Self {
    Self {
      grid_size: GRID_SIZE,
      edge_policy: EdgePolicy::Wrap,
      initial_snake_length: INITIAL_SNAKE_LENGTH,
      food_reward: FOOD_REWARD,
      initial_tick_ms: INITIAL_TICK_MS,
      min_tick_ms: MIN_TICK_MS,
      tick_step_ms: TICK_STEP_MS,
      speed_step_points: SPEED_STEP_POINTS,
    }
  }
}

impl SimConfig {
  pub fn from_env() -> anyhow::Result<Self> {
    let mut config = Self::default();
    if let Some(value) = env::var("GRID_SIZE").ok().and_then(|value| value.parse().ok()) {
      config.grid_size = value;
    }
    if let Some(value) = env::var("TICK_MS").ok().and_then(|value| value.parse().ok()) {
      config.initial_tick_ms = value;
    }
    if let Some(value) = env::var("MIN_TICK_MS").ok().and_then(|value| value.parse().ok()) {
      config.min_tick_ms = value;
    }
    if let Some(value) = env::var("TICK_STEP_MS").ok().and_then(|value| value.parse().ok()) {
      config.tick_step_ms = value;
    }
    if let Some(value) = env::var("FOOD_REWARD").ok().and_then(|value| value.parse().ok()) {
      config.food_reward = value;
    }
    if let Some(value) = env::var("SPEED_STEP_POINTS")
      .ok()
      .and_then(|value| value.parse().ok())
    {
      config.speed_step_points = value;
    }
    if let Ok(value) = env::var("EDGE_POLICY") {
      config.edge_policy = match value.trim().to_ascii_lowercase().as_str() {
        "wrap" => EdgePolicy::Wrap,
        "wall" => EdgePolicy::Wall,
        other => anyhow::bail!("unsupported EDGE_POLICY {other:?}, expected \"wrap\" or \"wall\""),
      };
    }
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> anyhow::Result<()> {
    if self.initial_snake_length == 0 {
      anyhow::bail!("initial snake length must be at least 1");
    }
    // The seed lays the snake out from the center toward the left edge and
    // one cell must stay free for food, so degenerate boards are rejected
    // here instead of hanging food placement later.
    if self.grid_size < self.initial_snake_length * 2 {
      anyhow::bail!(
        "grid size {} is too small for a snake of length {}",
        self.grid_size,
        self.initial_snake_length
      );
    }
    if self.food_reward == 0 {
      anyhow::bail!("food reward must be positive");
    }
    if self.speed_step_points == 0 {
      anyhow::bail!("speed step points must be positive");
    }
    if self.min_tick_ms == 0 || self.min_tick_ms > self.initial_tick_ms {
      anyhow::bail!(
        "tick bounds are inverted: min {} ms vs initial {} ms",
        self.min_tick_ms,
        self.initial_tick_ms
      );
    }
    Ok(())
  }

  /// Non-decreasing step function of the score.
  pub fn speed_level(&self, score: u64) -> u32 {
    (score / self.speed_step_points) as u32
  }

  /// Non-increasing in the speed level, clamped to the configured floor.
  pub fn tick_interval_ms(&self, speed_level: u32) -> u64 {
    self
      .initial_tick_ms
      .saturating_sub(speed_level as u64 * self.tick_step_ms)
      .max(self.min_tick_ms)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_are_valid() {
    SimConfig::default().validate().expect("defaults validate");
  }

  #[test]
  fn speed_level_is_a_step_function_of_score() {
    let config = SimConfig::default();
    assert_eq!(config.speed_level(0), 0);
    assert_eq!(config.speed_level(40), 0);
    assert_eq!(config.speed_level(50), 1);
    assert_eq!(config.speed_level(90), 1);
    assert_eq!(config.speed_level(100), 2);
  }

  #[test]
  fn tick_interval_never_goes_below_the_floor() {
    let config = SimConfig::default();
    assert_eq!(config.tick_interval_ms(0), 150);
    assert_eq!(config.tick_interval_ms(1), 145);
    let mut previous = u64::MAX;
    for level in 0..200 {
      let interval = config.tick_interval_ms(level);
      assert!(interval <= previous);
      assert!(interval >= config.min_tick_ms);
      previous = interval;
    }
    assert_eq!(config.tick_interval_ms(199), config.min_tick_ms);
  }

  #[test]
  fn degenerate_boards_are_rejected() {
    let config = SimConfig {
      grid_size: 1,
      ..SimConfig::default()
    };
    assert!(config.validate().is_err());

    let config = SimConfig {
      grid_size: 5,
      initial_snake_length: 3,
      ..SimConfig::default()
    };
    assert!(config.validate().is_err());
  }

  #[test]
  fn inverted_tick_bounds_are_rejected() {
    let config = SimConfig {
      initial_tick_ms: 40,
      min_tick_ms: 50,
      ..SimConfig::default()
    };
    assert!(config.validate().is_err());
  }
}
