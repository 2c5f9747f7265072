//! Mapping from console lines to input events.

use crate::core::{ConsoleCommand, InputEvent};
use crate::types::Position;

/// Parse one console line.
///
/// Surrounding whitespace is ignored. A single character is a command
/// (`h`, `p`, `m`, `r`, `q`, any case); two characters are an algebraic square.
/// Anything else, including blank lines, is [`InputEvent::Unrecognized`].
pub fn parse_line(line: &str) -> InputEvent {
    let token = line.trim();
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(ch), None, None) => match ConsoleCommand::from_char(ch) {
            Some(cmd) => InputEvent::Command(cmd),
            None => InputEvent::Unrecognized(token.to_string()),
        },
        (Some(_), Some(_), None) => match Position::from_algebraic(token) {
            Some(pos) => InputEvent::Square(pos),
            None => InputEvent::Unrecognized(token.to_string()),
        },
        _ => InputEvent::Unrecognized(token.to_string()),
    }
}

/// Check if a line should quit the game.
pub fn should_quit(line: &str) -> bool {
    matches!(parse_line(line), InputEvent::Command(ConsoleCommand::Quit))
}
