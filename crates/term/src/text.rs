//! Plain text board printer (box-drawing border, no colour).
//!
//! ```text
//!   a b c d e f g h
//!  ┌────────────────┐
//! 8│R N B Q K B N R │8
//! 7│P P P P P P P P │7
//! ...
//!  └────────────────┘
//!   a b c d e f g h
//! ```
//!
//! The hall sensor grid is mirrored along the column axis relative to this
//! print layout, so the physical-board front end prints with
//! [`ColumnOrder::Mirrored`].

use crate::core::{Board, MoveLog};
use crate::types::{square_symbol, Position, BOARD_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnOrder {
    /// Column 0 (file `a`) on the left.
    #[default]
    Normal,
    /// Column 7 (file `h`) on the left.
    Mirrored,
}

impl ColumnOrder {
    /// Board columns in display order, left to right.
    pub fn columns(self) -> [u8; BOARD_SIZE as usize] {
        let mut cols = [0u8; BOARD_SIZE as usize];
        for (i, c) in cols.iter_mut().enumerate() {
            *c = match self {
                ColumnOrder::Normal => i as u8,
                ColumnOrder::Mirrored => BOARD_SIZE - 1 - i as u8,
            };
        }
        cols
    }
}

fn file_header(order: ColumnOrder) -> String {
    let mut line = String::from(" ");
    for col in order.columns() {
        line.push(' ');
        line.push((b'a' + col) as char);
    }
    line
}

/// Render `board` as bordered text, one line per rank.
pub fn format_board(board: &Board, order: ColumnOrder) -> String {
    let header = file_header(order);
    let rule: String = "─".repeat(2 * BOARD_SIZE as usize);

    let mut out = format!("{}\n ┌{}┐\n", header, rule);
    for row in 0..BOARD_SIZE {
        let rank = BOARD_SIZE - row;
        out.push_str(&format!("{}│", rank));
        for col in order.columns() {
            let square = Position::new(row, col).and_then(|p| board.piece_at(p));
            out.push(square_symbol(square));
            out.push(' ');
        }
        out.push_str(&format!("│{}\n", rank));
    }
    out.push_str(&format!(" └{}┘\n{}\n", rule, header));
    out
}

/// Numbered move list, one move per line.
pub fn format_moves(log: &MoveLog) -> String {
    if log.is_empty() {
        return "No moves yet\n".to_string();
    }
    log.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Move;

    #[test]
    fn standard_board_layout() {
        let text = format_board(&Board::new(), ColumnOrder::Normal);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "  a b c d e f g h");
        assert_eq!(lines[1], " ┌────────────────┐");
        assert_eq!(lines[2], "8│R N B Q K B N R │8");
        assert_eq!(lines[3], "7│P P P P P P P P │7");
        assert_eq!(lines[4], "6│                │6");
        assert_eq!(lines[8], "2│p p p p p p p p │2");
        assert_eq!(lines[9], "1│r n b q k b n r │1");
        assert_eq!(lines[10], " └────────────────┘");
        assert_eq!(lines[11], "  a b c d e f g h");
    }

    #[test]
    fn mirrored_board_reverses_columns() {
        let text = format_board(&Board::new(), ColumnOrder::Mirrored);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  h g f e d c b a");
        assert_eq!(lines[2], "8│R N B K Q B N R │8");
        assert_eq!(lines[9], "1│r n b k q b n r │1");
    }

    #[test]
    fn move_list_text() {
        let mut log = MoveLog::new();
        assert_eq!(format_moves(&log), "No moves yet\n");
        log.append(Move::new(
            Position::from_algebraic("g1").unwrap(),
            Position::from_algebraic("f3").unwrap(),
        ));
        assert_eq!(format_moves(&log), "1. g1->f3\n");
    }
}
