use super::types::{Command, Direction};

/// Maps one input token to a command. Accepts browser-style key names
/// (ArrowUp, WASD, space) alongside spelled-out control words. Unknown
/// tokens map to `None`.
pub fn parse_command(input: &str) -> Option<Command> {
  let token = input.trim().to_ascii_lowercase();
  match token.as_str() {
    "start" | "new" => Some(Command::Start),
    "pause" => Some(Command::Pause),
    "resume" => Some(Command::Resume),
    "reset" => Some(Command::Reset),
    "space" | "toggle" => Some(Command::Toggle),
    "up" | "w" | "arrowup" => Some(Command::Turn(Direction::Up)),
    "down" | "s" | "arrowdown" => Some(Command::Turn(Direction::Down)),
    "left" | "a" | "arrowleft" => Some(Command::Turn(Direction::Left)),
    "right" | "d" | "arrowright" => Some(Command::Turn(Direction::Right)),
    _ => None,
  }
}
