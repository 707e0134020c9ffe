pub mod constants;
pub mod food;
pub mod gate;
pub mod input;
pub mod session;
pub mod step;
pub mod types;
