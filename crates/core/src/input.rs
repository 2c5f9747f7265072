//! Input source seam.
//!
//! Both front ends (the sensor matrix and the text console) produce the same
//! stream of events; the game loop does not know which one it is driving.

use crate::error::Result;
use crate::occupancy::OccupancySnapshot;
use crate::sensor::SensorMatrix;
use crate::types::Position;
use crate::wait::{CancelToken, Wait};

/// Non-square console commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleCommand {
    Help,
    PrintBoard,
    PrintMoves,
    Reset,
    Quit,
}

impl ConsoleCommand {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'h' => Some(ConsoleCommand::Help),
            'p' => Some(ConsoleCommand::PrintBoard),
            'm' => Some(ConsoleCommand::PrintMoves),
            'r' => Some(ConsoleCommand::Reset),
            'q' => Some(ConsoleCommand::Quit),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            ConsoleCommand::Help => 'h',
            ConsoleCommand::PrintBoard => 'p',
            ConsoleCommand::PrintMoves => 'm',
            ConsoleCommand::Reset => 'r',
            ConsoleCommand::Quit => 'q',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A square was picked up from or put down on (sensor) or typed (console).
    Square(Position),
    Command(ConsoleCommand),
    /// A console line that is neither a command nor a square.
    Unrecognized(String),
}

/// Blocking producer of input events.
pub trait InputSource {
    /// Wait for the next event. Returns [`Wait::TimedOut`] or
    /// [`Wait::Cancelled`] instead of blocking forever.
    fn next_event(&mut self, cancel: &CancelToken) -> Result<Wait<InputEvent>>;

    /// Occupancy sensor behind this source, used to gate play on the board
    /// setup. `None` for sources that are not sensor driven.
    fn sensor(&mut self) -> Option<&mut dyn SensorMatrix> {
        None
    }

    /// Take `snapshot` as the reading against which the next change is
    /// detected. Called with the reading that passed setup verification.
    fn prime(&mut self, _snapshot: OccupancySnapshot) {}
}

impl<I: InputSource + ?Sized> InputSource for &mut I {
    fn next_event(&mut self, cancel: &CancelToken) -> Result<Wait<InputEvent>> {
        (**self).next_event(cancel)
    }

    fn sensor(&mut self) -> Option<&mut dyn SensorMatrix> {
        (**self).sensor()
    }

    fn prime(&mut self, snapshot: OccupancySnapshot) {
        (**self).prime(snapshot)
    }
}

impl<I: InputSource + ?Sized> InputSource for Box<I> {
    fn next_event(&mut self, cancel: &CancelToken) -> Result<Wait<InputEvent>> {
        (**self).next_event(cancel)
    }

    fn sensor(&mut self) -> Option<&mut dyn SensorMatrix> {
        (**self).sensor()
    }

    fn prime(&mut self, snapshot: OccupancySnapshot) {
        (**self).prime(snapshot)
    }
}

/// Replays a fixed list of events, then reports `Quit`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: std::collections::VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Script of squares given in algebraic notation; invalid tokens become `Unrecognized`.
    pub fn squares(tokens: &[&str]) -> Self {
        Self::new(tokens.iter().map(|t| match Position::from_algebraic(t) {
            Some(pos) => InputEvent::Square(pos),
            None => InputEvent::Unrecognized(t.to_string()),
        }))
    }
}

impl InputSource for ScriptedInput {
    fn next_event(&mut self, cancel: &CancelToken) -> Result<Wait<InputEvent>> {
        if cancel.is_cancelled() {
            return Ok(Wait::Cancelled);
        }
        Ok(Wait::Ready(
            self.events
                .pop_front()
                .unwrap_or(InputEvent::Command(ConsoleCommand::Quit)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_chars_roundtrip() {
        for ch in ['h', 'p', 'm', 'r', 'q'] {
            let cmd = ConsoleCommand::from_char(ch).unwrap();
            assert_eq!(cmd.as_char(), ch);
            assert_eq!(ConsoleCommand::from_char(ch.to_ascii_uppercase()), Some(cmd));
        }
        assert_eq!(ConsoleCommand::from_char('x'), None);
    }

    #[test]
    fn scripted_input_ends_with_quit() {
        let mut input = ScriptedInput::squares(&["e2", "zz"]);
        let cancel = CancelToken::new();
        assert!(matches!(
            input.next_event(&cancel).unwrap(),
            Wait::Ready(InputEvent::Square(_))
        ));
        assert_eq!(
            input.next_event(&cancel).unwrap(),
            Wait::Ready(InputEvent::Unrecognized("zz".to_string()))
        );
        assert_eq!(
            input.next_event(&cancel).unwrap(),
            Wait::Ready(InputEvent::Command(ConsoleCommand::Quit))
        );
    }

    #[test]
    fn scripted_input_has_no_sensor() {
        let mut input = ScriptedInput::squares(&["e2"]);
        assert!(input.sensor().is_none());
    }
}
