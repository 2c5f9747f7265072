//! Simulated sensor board driven by console lines.
//!
//! A square token lifts a piece from, or places one onto, that square of a
//! [`MockSensor`]. The change is then picked up by a [`MovementDetector`] the
//! same way a real hall-sensor scan would be, so the simulator exercises the
//! full detection path. Commands pass straight through.
//!
//! While the board setup is being verified the simulator is its own sensor:
//! after a failed check each further scan applies one pending square token,
//! so the setup can be corrected by typing the squares to fix.

use std::io;
use std::time::Duration;

use crate::console::{Line, LineFeed};
use crate::core::{
    CancelToken, ChessyError, ConsoleCommand, InputEvent, InputSource, MockSensor,
    MovementDetector, OccupancySnapshot, Result, SensorMatrix, Wait, Waiter,
};
use crate::map::parse_line;

const LINE_POLL_MS: u64 = 10;

pub struct SimulatedBoard {
    feed: LineFeed,
    sensor: MockSensor,
    detector: MovementDetector,
    primed: bool,
    fixing_setup: bool,
    waiter: Waiter,
}

impl SimulatedBoard {
    /// `sensor` is shared: clones of it see every toggle.
    pub fn new(feed: LineFeed, sensor: MockSensor) -> Self {
        Self {
            feed,
            sensor,
            detector: MovementDetector::new(),
            primed: false,
            fixing_setup: false,
            waiter: Waiter::new(Duration::from_millis(LINE_POLL_MS)),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.waiter = self.waiter.with_timeout(timeout);
        self
    }
}

impl SensorMatrix for SimulatedBoard {
    fn scan(&mut self) -> Result<OccupancySnapshot> {
        if self.fixing_setup {
            match self.feed.try_next() {
                Line::Text(line) => match parse_line(&line) {
                    InputEvent::Square(pos) => {
                        tracing::debug!(square = %pos, "setup toggle");
                        self.sensor.toggle(pos);
                    }
                    _ => tracing::debug!(line = line.trim(), "ignored during setup"),
                },
                Line::Pending => {}
                Line::Closed => {
                    return Err(ChessyError::Input(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "input closed during board setup",
                    )));
                }
            }
        }
        // Only readings after a failed check consume lines.
        self.fixing_setup = true;
        self.sensor.scan()
    }
}

impl InputSource for SimulatedBoard {
    fn next_event(&mut self, cancel: &CancelToken) -> Result<Wait<InputEvent>> {
        let Self {
            feed,
            sensor,
            detector,
            primed,
            waiter,
            ..
        } = self;

        // Baseline is whatever stands on the board when play begins.
        if !*primed {
            detector.prime(sensor.current());
            *primed = true;
        }

        waiter.poll_until(cancel, || {
            let line = match feed.try_next() {
                Line::Text(line) => line,
                Line::Pending => return Ok(None),
                Line::Closed => return Ok(Some(InputEvent::Command(ConsoleCommand::Quit))),
            };
            if line.trim().is_empty() {
                return Ok(None);
            }
            match parse_line(&line) {
                InputEvent::Square(pos) => {
                    sensor.toggle(pos);
                    let changed = detector.poll(&mut *sensor)?;
                    tracing::debug!(square = %pos, ?changed, "simulated toggle");
                    Ok(changed.map(InputEvent::Square))
                }
                other => Ok(Some(other)),
            }
        })
    }

    fn sensor(&mut self) -> Option<&mut dyn SensorMatrix> {
        Some(self)
    }

    fn prime(&mut self, snapshot: OccupancySnapshot) {
        self.detector.prime(snapshot);
        self.primed = true;
        self.fixing_setup = false;
    }
}
