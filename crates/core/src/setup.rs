//! Setup verification before the first turn.
//!
//! The physical board must match the logical board exactly: every square that
//! holds a piece must read occupied, every empty square must read empty. Until
//! it does, each offending square is reported and lit in the error colour and
//! the check is retried.

use std::time::Duration;

use crate::board::Board;
use crate::display::{self, DisplaySink, Notice};
use crate::error::Result;
use crate::occupancy::OccupancySnapshot;
use crate::sensor::SensorMatrix;
use crate::types::{Position, SETUP_RETRY_MS};
use crate::wait::{CancelToken, Wait, Waiter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MismatchKind {
    /// Board expects a piece, sensor reads empty.
    Missing,
    /// Board expects empty, sensor reads a piece.
    Extra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mismatch {
    pub pos: Position,
    pub kind: MismatchKind,
}

/// Every square where `snapshot` disagrees with `board`, row-major.
pub fn check(board: &Board, snapshot: &OccupancySnapshot) -> Vec<Mismatch> {
    snapshot
        .differences(&board.occupancy())
        .map(|pos| Mismatch {
            pos,
            kind: if snapshot.get(pos) {
                MismatchKind::Extra
            } else {
                MismatchKind::Missing
            },
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupVerifier {
    waiter: Waiter,
}

impl Default for SetupVerifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(SETUP_RETRY_MS))
    }
}

impl SetupVerifier {
    pub fn new(retry: Duration) -> Self {
        Self {
            waiter: Waiter::new(retry),
        }
    }

    /// Give up with [`Wait::TimedOut`] after `timeout`. Without one the
    /// verifier retries until cancelled.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.waiter = self.waiter.with_timeout(timeout);
        self
    }

    /// Scan until the sensor matches `board`, reporting mismatches on `sink`.
    ///
    /// On success all highlights are cleared and the matching reading is
    /// returned so a movement detector can be primed with it.
    pub fn verify_until_ready<S, D>(
        &self,
        board: &Board,
        sensor: &mut S,
        sink: &mut D,
        cancel: &CancelToken,
    ) -> Result<Wait<OccupancySnapshot>>
    where
        S: SensorMatrix + ?Sized,
        D: DisplaySink + ?Sized,
    {
        sink.notice(&Notice::SetupPrompt)?;
        let mut attempt = 0u32;
        let outcome = self.waiter.poll_until(cancel, || {
            attempt += 1;
            let snapshot = sensor.scan()?;
            let mismatches = check(board, &snapshot);
            if mismatches.is_empty() {
                return Ok(Some(snapshot));
            }

            tracing::warn!(attempt, mismatches = mismatches.len(), "board setup does not match");
            for m in &mismatches {
                sink.notice(&Notice::SetupMismatch(*m))?;
            }
            display::paint_mismatches(sink, &mismatches)?;
            sink.notice(&Notice::SetupIncorrect)?;
            Ok(None)
        })?;

        if let Wait::Ready(_) = outcome {
            tracing::info!(attempts = attempt, "board setup verified");
            sink.notice(&Notice::SetupVerified)?;
            display::blank(sink)?;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::RecordingDisplay;
    use crate::sensor::ScriptedSensor;
    use crate::types::palette;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn exact_match_has_no_mismatches() {
        let board = Board::new();
        assert!(check(&board, &board.occupancy()).is_empty());
    }

    #[test]
    fn reports_missing_and_extra_in_row_major_order() {
        let board = Board::new();
        let mut snap = board.occupancy();
        snap.set(pos("e2"), false);
        snap.set(pos("e4"), true);
        snap.set(pos("a8"), false);
        let m = check(&board, &snap);
        assert_eq!(
            m,
            vec![
                Mismatch {
                    pos: pos("a8"),
                    kind: MismatchKind::Missing
                },
                Mismatch {
                    pos: pos("e4"),
                    kind: MismatchKind::Extra
                },
                Mismatch {
                    pos: pos("e2"),
                    kind: MismatchKind::Missing
                },
            ]
        );
    }

    #[test]
    fn any_single_difference_is_rejected() {
        let board = Board::new();
        for p in Position::all() {
            let mut snap = board.occupancy();
            snap.toggle(p);
            assert_eq!(check(&board, &snap).len(), 1, "square {}", p);
        }
    }

    #[test]
    fn retries_until_board_matches() {
        let board = Board::new();
        let mut wrong = board.occupancy();
        wrong.set(pos("d7"), false);
        let mut sensor = ScriptedSensor::new(vec![wrong, wrong, board.occupancy()]);
        let mut sink = RecordingDisplay::new();

        let verifier = SetupVerifier::new(Duration::from_millis(1));
        let out = verifier
            .verify_until_ready(&board, &mut sensor, &mut sink, &CancelToken::new())
            .unwrap();

        assert_eq!(out, Wait::Ready(board.occupancy()));
        assert_eq!(sensor.scans(), 3);
        assert_eq!(
            sink.lines.iter().filter(|l| l.contains("Missing piece at d7")).count(),
            2
        );
        assert!(sink.said("Board setup verified!"));
        // Highlights cleared after success.
        assert!(sink.presented.iter().all(|c| *c == palette::EMPTY));
    }

    #[test]
    fn mismatches_are_lit_in_error_colour() {
        let board = Board::new();
        let mut wrong = board.occupancy();
        wrong.set(pos("c5"), true);
        let mut sensor = ScriptedSensor::new(vec![wrong]);
        let mut sink = RecordingDisplay::new();

        let verifier =
            SetupVerifier::new(Duration::from_millis(1)).with_timeout(Some(Duration::from_millis(5)));
        let out = verifier
            .verify_until_ready(&board, &mut sensor, &mut sink, &CancelToken::new())
            .unwrap();

        assert_eq!(out, Wait::TimedOut);
        assert_eq!(sink.presented_at(pos("c5")), palette::ERROR);
        assert!(sink.said("Error: Extra piece at c5"));
        assert!(!sink.said("verified"));
    }

    #[test]
    fn cancelled_before_start() {
        let board = Board::new();
        let mut sensor = ScriptedSensor::new(vec![board.occupancy()]);
        let mut sink = RecordingDisplay::new();
        let cancel = CancelToken::new();
        cancel.cancel();
        let out = SetupVerifier::default()
            .verify_until_ready(&board, &mut sensor, &mut sink, &cancel)
            .unwrap();
        assert_eq!(out, Wait::Cancelled);
        assert_eq!(sensor.scans(), 0);
    }
}
