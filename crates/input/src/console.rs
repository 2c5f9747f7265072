//! Line-based console input.
//!
//! Lines are read on a background thread and handed over through a channel, so
//! waiting for the next line goes through a [`Waiter`] and can time out or be
//! cancelled like any other wait in the game loop.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::core::{CancelToken, ConsoleCommand, InputEvent, InputSource, Result, Wait, Waiter};
use crate::map::parse_line;

/// Poll interval for the line channel.
const LINE_POLL_MS: u64 = 10;

/// Non-blocking view of a line stream.
#[derive(Debug)]
pub enum Line {
    Text(String),
    Pending,
    Closed,
}

/// Lines from a reader, delivered through a channel.
pub struct LineFeed {
    rx: Receiver<String>,
}

impl LineFeed {
    /// Spawn a reader thread over `reader` (typically locked stdin).
    pub fn spawn<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<String>();
        thread::spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(%err, "console read failed");
                        break;
                    }
                }
            }
        });
        Self { rx }
    }

    pub fn try_next(&self) -> Line {
        match self.rx.try_recv() {
            Ok(line) => Line::Text(line),
            Err(TryRecvError::Empty) => Line::Pending,
            Err(TryRecvError::Disconnected) => Line::Closed,
        }
    }
}

/// Console front end: commands and typed squares.
///
/// Blank lines are skipped. End of input is reported as `Quit`.
pub struct ConsoleInput {
    feed: LineFeed,
    waiter: Waiter,
}

impl ConsoleInput {
    pub fn new(feed: LineFeed) -> Self {
        Self {
            feed,
            waiter: Waiter::new(Duration::from_millis(LINE_POLL_MS)),
        }
    }

    pub fn from_reader<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        Self::new(LineFeed::spawn(reader))
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.waiter = self.waiter.with_timeout(timeout);
        self
    }
}

impl InputSource for ConsoleInput {
    fn next_event(&mut self, cancel: &CancelToken) -> Result<Wait<InputEvent>> {
        let feed = &self.feed;
        self.waiter.poll_until(cancel, || {
            Ok(match feed.try_next() {
                Line::Text(line) if line.trim().is_empty() => None,
                Line::Text(line) => Some(parse_line(&line)),
                Line::Pending => None,
                Line::Closed => Some(InputEvent::Command(ConsoleCommand::Quit)),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;
    use std::io::Cursor;

    #[test]
    fn reads_events_then_quits_at_eof() {
        let mut input = ConsoleInput::from_reader(Cursor::new("e2\n\n  e4 \np\n"));
        let cancel = CancelToken::new();
        let mut events = Vec::new();
        loop {
            match input.next_event(&cancel).unwrap() {
                Wait::Ready(InputEvent::Command(ConsoleCommand::Quit)) => break,
                Wait::Ready(ev) => events.push(ev),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(
            events,
            vec![
                InputEvent::Square(Position::from_algebraic("e2").unwrap()),
                InputEvent::Square(Position::from_algebraic("e4").unwrap()),
                InputEvent::Command(ConsoleCommand::PrintBoard),
            ]
        );
    }

    #[test]
    fn cancelled_wait_returns_immediately() {
        let mut input = ConsoleInput::from_reader(Cursor::new(""));
        let cancel = CancelToken::new();
        cancel.cancel();
        assert_eq!(input.next_event(&cancel).unwrap(), Wait::Cancelled);
    }

    #[test]
    fn times_out_while_no_line_arrives() {
        // A reader that never finishes: the sending half stays open.
        let (_tx, rx) = mpsc::channel::<String>();
        let mut input = ConsoleInput::new(LineFeed { rx }).with_timeout(Some(Duration::from_millis(20)));
        assert_eq!(input.next_event(&CancelToken::new()).unwrap(), Wait::TimedOut);
    }
}
