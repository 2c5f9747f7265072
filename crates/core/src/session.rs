//! Selection session - the per-turn state machine
//!
//! ```text
//! AwaitingPickup --(square with a piece)--> AwaitingPlacement
//! AwaitingPickup --(empty square)---------> AwaitingPickup      (EmptyOrigin)
//! AwaitingPlacement --(candidate)---------> AwaitingPickup      (Accepted, caller commits)
//! AwaitingPlacement --(anything else)-----> AwaitingPickup      (Rejected)
//! ```
//!
//! The session is pure: it never mutates the board. [`crate::game::Game`]
//! owns the board and commits accepted moves.

use crate::board::Board;
use crate::rules::{self, Candidates};
use crate::types::{Move, Piece, Position};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    AwaitingPickup,
    AwaitingPlacement {
        origin: Position,
        piece: Piece,
        candidates: Candidates,
    },
}

/// Result of feeding one square to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The picked-up square holds no piece; the event is discarded.
    EmptyOrigin(Position),
    /// A piece was picked up.
    Selected {
        origin: Position,
        piece: Piece,
        candidates: Candidates,
    },
    /// The destination is legal. The move has not been applied yet.
    Accepted { piece: Piece, mv: Move },
    /// The destination is not among the candidates; the selection is dropped.
    Rejected {
        piece: Piece,
        origin: Position,
        destination: Position,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSession {
    state: SessionState,
}

impl SelectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_awaiting_pickup(&self) -> bool {
        matches!(self.state, SessionState::AwaitingPickup)
    }

    /// Selected origin, if a piece is currently picked up.
    pub fn origin(&self) -> Option<Position> {
        match &self.state {
            SessionState::AwaitingPlacement { origin, .. } => Some(*origin),
            SessionState::AwaitingPickup => None,
        }
    }

    /// Candidates of the current selection (empty when awaiting pickup).
    pub fn candidates(&self) -> &[Position] {
        match &self.state {
            SessionState::AwaitingPlacement { candidates, .. } => candidates.as_slice(),
            SessionState::AwaitingPickup => &[],
        }
    }

    /// Drop any selection and wait for a new pickup.
    pub fn cancel(&mut self) {
        self.state = SessionState::AwaitingPickup;
    }

    /// Feed one detected square.
    pub fn advance(&mut self, board: &Board, square: Position) -> Transition {
        match std::mem::take(&mut self.state) {
            SessionState::AwaitingPickup => match board.piece_at(square) {
                None => Transition::EmptyOrigin(square),
                Some(piece) => {
                    let candidates = rules::candidates(board, square);
                    self.state = SessionState::AwaitingPlacement {
                        origin: square,
                        piece,
                        candidates: candidates.clone(),
                    };
                    Transition::Selected {
                        origin: square,
                        piece,
                        candidates,
                    }
                }
            },
            SessionState::AwaitingPlacement {
                origin,
                piece,
                candidates,
            } => {
                if candidates.contains(&square) {
                    Transition::Accepted {
                        piece,
                        mv: Move::new(origin, square),
                    }
                } else {
                    Transition::Rejected {
                        piece,
                        origin,
                        destination: square,
                    }
                }
            }
        }
    }
}
