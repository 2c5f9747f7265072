//! Turn runner: ties a [`Game`] to an input source and a display.
//!
//! One loop serves every front end. Squares go to [`Game::select`]; the
//! resulting [`TurnEvent`] is rendered as square highlights plus a notice,
//! and committed moves are printed and journaled.
//!
//! A gated run holds play until the pieces on the input's sensor match the
//! board, both at start and after every reset.

use std::time::Duration;

use crate::config::Config;
use crate::core::display::{blank, paint_result, paint_selection};
use crate::core::{
    pause, CancelToken, ConsoleCommand, DisplaySink, Game, InputEvent, InputSource, Notice,
    Result, SetupVerifier, TurnEvent, Wait,
};
use crate::journal::{Journal, MoveRecord};
use crate::types::{Move, Position, FEEDBACK_MS};

/// Why [`Runner::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `q` typed, or the input reached its end.
    Quit,
    Cancelled,
    /// No input arrived within the turn timeout.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub moves: usize,
    pub exit: ExitReason,
}

enum Flow {
    Continue,
    Stop(ExitReason),
}

pub struct Runner<I, D> {
    game: Game,
    input: I,
    display: D,
    feedback: Duration,
    verifier: SetupVerifier,
    journal: Option<Journal>,
    cancel: CancelToken,
    gated: bool,
}

impl<I: InputSource, D: DisplaySink> Runner<I, D> {
    pub fn new(input: I, display: D) -> Self {
        Self {
            game: Game::new(),
            input,
            display,
            feedback: Duration::from_millis(FEEDBACK_MS),
            verifier: SetupVerifier::default(),
            journal: None,
            cancel: CancelToken::new(),
            gated: false,
        }
    }

    /// Take feedback and setup timings from `config`.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.feedback = config.feedback;
        self.verifier = SetupVerifier::new(config.setup_retry);
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Handle that stops the loop (and any wait in progress) from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Like [`run`](Self::run), but first block until the pieces on the
    /// input's sensor match the board. A reset re-enters the same check.
    pub fn run_with_setup(&mut self) -> Result<RunSummary> {
        self.gated = true;
        self.run()
    }

    /// Play until quit, cancellation or turn timeout.
    pub fn run(&mut self) -> Result<RunSummary> {
        if let Some(exit) = self.setup_gate()? {
            return Ok(self.summary(exit));
        }
        self.display.show_board(self.game.board())?;
        self.display.notice(&Notice::Turn(self.game.side_to_move()))?;

        loop {
            let event = match self.input.next_event(&self.cancel)? {
                Wait::Ready(event) => event,
                Wait::TimedOut => {
                    tracing::warn!("no input before the turn timeout");
                    return Ok(self.summary(ExitReason::TimedOut));
                }
                Wait::Cancelled => return Ok(self.summary(ExitReason::Cancelled)),
            };

            match self.handle(event)? {
                Flow::Continue => {}
                Flow::Stop(exit) => return Ok(self.summary(exit)),
            }
        }
    }

    /// Verify the setup and prime the input with the matching reading.
    /// `Some` if play must not continue.
    fn setup_gate(&mut self) -> Result<Option<ExitReason>> {
        if !self.gated {
            return Ok(None);
        }
        self.display.show_board(self.game.board())?;
        let Some(sensor) = self.input.sensor() else {
            tracing::warn!("input has no sensor; skipping setup check");
            return Ok(None);
        };
        let outcome = self.verifier.verify_until_ready(
            self.game.board(),
            sensor,
            &mut self.display,
            &self.cancel,
        )?;
        match outcome {
            Wait::Ready(snapshot) => {
                self.input.prime(snapshot);
                Ok(None)
            }
            Wait::TimedOut => Ok(Some(ExitReason::TimedOut)),
            Wait::Cancelled => Ok(Some(ExitReason::Cancelled)),
        }
    }

    fn summary(&self, exit: ExitReason) -> RunSummary {
        let summary = RunSummary {
            moves: self.game.log().len(),
            exit,
        };
        tracing::info!(moves = summary.moves, exit = ?summary.exit, "game loop finished");
        summary
    }

    fn handle(&mut self, event: InputEvent) -> Result<Flow> {
        match event {
            InputEvent::Square(pos) => self.on_square(pos),
            InputEvent::Command(cmd) => self.on_command(cmd),
            InputEvent::Unrecognized(line) => {
                self.display.notice(&Notice::Unrecognized(line))?;
                Ok(Flow::Continue)
            }
        }
    }

    fn on_command(&mut self, cmd: ConsoleCommand) -> Result<Flow> {
        tracing::debug!(command = %cmd.as_char(), "console command");
        match cmd {
            ConsoleCommand::Help => self.display.notice(&Notice::Help)?,
            ConsoleCommand::PrintBoard => self.display.show_board(self.game.board())?,
            ConsoleCommand::PrintMoves => self.display.show_moves(self.game.log())?,
            ConsoleCommand::Reset => {
                self.game.reset();
                blank(&mut self.display)?;
                self.display.notice(&Notice::BoardReset)?;
                tracing::info!("game reset");
                if self.gated {
                    if let Some(exit) = self.setup_gate()? {
                        return Ok(Flow::Stop(exit));
                    }
                } else {
                    self.display.show_board(self.game.board())?;
                }
            }
            ConsoleCommand::Quit => return Ok(Flow::Stop(ExitReason::Quit)),
        }
        Ok(Flow::Continue)
    }

    fn on_square(&mut self, pos: Position) -> Result<Flow> {
        match self.game.select(pos) {
            TurnEvent::EmptyOrigin(origin) => {
                tracing::debug!(square = %origin, "no piece to pick up");
                self.display.notice(&Notice::NoPieceAt(origin))?;
            }
            TurnEvent::Selected {
                origin,
                piece,
                candidates,
            } => {
                tracing::info!(square = %origin, piece = %piece.symbol(), candidates = candidates.len(), "piece selected");
                paint_selection(&mut self.display, self.game.board(), origin, &candidates)?;
                self.display.notice(&Notice::Selected {
                    origin,
                    piece,
                    candidates: candidates.len(),
                })?;
            }
            TurnEvent::Committed {
                number,
                piece,
                mv,
                replaced,
            } => {
                tracing::info!(n = number, piece = %piece.symbol(), %mv, captured = ?replaced.map(|p| p.symbol()), "move committed");
                self.display.notice(&Notice::Moved { piece, mv })?;
                self.display.show_board(self.game.board())?;
                if let Some(journal) = self.journal.as_mut() {
                    journal.record(&MoveRecord::new(number, piece, mv))?;
                }
                if !self.hold_feedback(mv.end, true)? {
                    return Ok(Flow::Stop(ExitReason::Cancelled));
                }
                self.display.notice(&Notice::Turn(self.game.side_to_move()))?;
            }
            TurnEvent::Rejected {
                piece,
                origin,
                destination,
            } => {
                tracing::info!(piece = %piece.symbol(), from = %origin, to = %destination, "move rejected");
                self.display.notice(&Notice::InvalidMove(Move::new(origin, destination)))?;
                if !self.hold_feedback(destination, false)? {
                    return Ok(Flow::Stop(ExitReason::Cancelled));
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Light the destination, hold it for the feedback delay, then blank.
    /// Returns `false` if cancelled during the hold.
    fn hold_feedback(&mut self, destination: Position, accepted: bool) -> Result<bool> {
        paint_result(&mut self.display, destination, accepted)?;
        let held = pause(&self.cancel, self.feedback);
        blank(&mut self.display)?;
        Ok(matches!(held, Wait::Ready(())))
    }
}
