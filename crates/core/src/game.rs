//! Game - owns the board, the move log and the selection session.
//!
//! Input adapters feed squares to [`Game::select`]; every accepted placement is
//! applied to the board and appended to the log in the same call.

use crate::board::Board;
use crate::move_log::MoveLog;
use crate::rules::Candidates;
use crate::session::{SelectionSession, Transition};
use crate::types::{Move, Piece, Position, Side};

/// What happened when a square was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    EmptyOrigin(Position),
    Selected {
        origin: Position,
        piece: Piece,
        candidates: Candidates,
    },
    Committed {
        number: usize,
        piece: Piece,
        mv: Move,
        /// Piece that stood on the destination before the move.
        replaced: Option<Piece>,
    },
    Rejected {
        piece: Piece,
        origin: Position,
        destination: Position,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Game {
    board: Board,
    log: MoveLog,
    session: SelectionSession,
}

impl Game {
    /// New game in the standard layout.
    pub fn new() -> Self {
        Self::with_board(Board::new())
    }

    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            log: MoveLog::new(),
            session: SelectionSession::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    pub fn session(&self) -> &SelectionSession {
        &self.session
    }

    /// Side expected to move, by move-count parity. Informational only:
    /// either side may move at any time.
    pub fn side_to_move(&self) -> Side {
        if self.log.len() % 2 == 0 {
            Side::Upper
        } else {
            Side::Lower
        }
    }

    /// Feed one square (a pick-up or a put-down) to the session.
    pub fn select(&mut self, square: Position) -> TurnEvent {
        match self.session.advance(&self.board, square) {
            Transition::EmptyOrigin(pos) => TurnEvent::EmptyOrigin(pos),
            Transition::Selected {
                origin,
                piece,
                candidates,
            } => TurnEvent::Selected {
                origin,
                piece,
                candidates,
            },
            Transition::Accepted { piece, mv } => {
                let replaced = self.board.piece_at(mv.end);
                self.board.apply_move(mv);
                self.log.append(mv);
                TurnEvent::Committed {
                    number: self.log.len(),
                    piece,
                    mv,
                    replaced,
                }
            }
            Transition::Rejected {
                piece,
                origin,
                destination,
            } => TurnEvent::Rejected {
                piece,
                origin,
                destination,
            },
        }
    }

    /// Standard layout, empty log, no selection.
    pub fn reset(&mut self) {
        self.board.reset();
        self.log.clear();
        self.session.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn commit_updates_board_and_log() {
        let mut game = Game::new();
        assert!(matches!(game.select(sq("e2")), TurnEvent::Selected { .. }));
        match game.select(sq("e4")) {
            TurnEvent::Committed {
                number,
                piece,
                mv,
                replaced,
            } => {
                assert_eq!(number, 1);
                assert_eq!(piece.symbol(), 'p');
                assert_eq!(mv.to_string(), "e2->e4");
                assert_eq!(replaced, None);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(game.board().is_empty(sq("e2")));
        assert_eq!(game.board().piece_at(sq("e4")).map(|p| p.symbol()), Some('p'));
        assert_eq!(game.log().to_string(), "1. e2->e4\n");
    }

    #[test]
    fn capture_reports_replaced_piece() {
        let mut game = Game::with_board(Board::from_rows([
            "        ",
            "        ",
            "        ",
            "   P    ",
            "    p   ",
            "        ",
            "        ",
            "        ",
        ]));
        game.select(Position::new(3, 3).unwrap());
        let ev = game.select(Position::new(4, 4).unwrap());
        assert!(matches!(
            ev,
            TurnEvent::Committed { replaced: Some(p), .. } if p.symbol() == 'p'
        ));
        assert_eq!(game.board().cells().iter().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn rejection_leaves_board_untouched() {
        let mut game = Game::new();
        game.select(sq("b1"));
        assert!(matches!(game.select(sq("b4")), TurnEvent::Rejected { .. }));
        assert_eq!(game.board(), &Board::new());
        assert!(game.log().is_empty());
    }

    #[test]
    fn side_to_move_follows_parity_without_enforcement() {
        let mut game = Game::new();
        assert_eq!(game.side_to_move(), Side::Upper);
        // Lowercase moves first anyway.
        game.select(sq("g1"));
        game.select(sq("f3"));
        assert_eq!(game.side_to_move(), Side::Lower);
        game.select(sq("g7"));
        game.select(sq("g5"));
        assert_eq!(game.side_to_move(), Side::Upper);
        assert_eq!(game.log().len(), 2);
    }

    #[test]
    fn reset_restores_everything() {
        let mut game = Game::new();
        game.select(sq("a2"));
        game.select(sq("a3"));
        game.select(sq("h7"));
        game.reset();
        assert_eq!(game.board(), &Board::new());
        assert!(game.log().is_empty());
        assert!(game.session().is_awaiting_pickup());
    }
}
