pub const GRID_SIZE: usize = 20;
pub const INITIAL_SNAKE_LENGTH: usize = 3;
pub const FOOD_REWARD: u64 = 10;
pub const INITIAL_TICK_MS: u64 = 150;
pub const MIN_TICK_MS: u64 = 50;
pub const TICK_STEP_MS: u64 = 5;
pub const SPEED_STEP_POINTS: u64 = 50;
pub const MAX_FOOD_PLACEMENT_ATTEMPTS: usize = 64;
