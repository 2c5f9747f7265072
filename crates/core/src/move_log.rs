//! Append-only record of committed moves.

use std::fmt;

use crate::types::Move;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLog {
    moves: Vec<Move>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Entries paired with their 1-based number.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Move)> {
        self.moves.iter().enumerate().map(|(i, mv)| (i + 1, mv))
    }

    /// Drop all entries (game reset).
    pub fn clear(&mut self) {
        self.moves.clear();
    }
}

impl fmt::Display for MoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, mv) in self.numbered() {
            writeln!(f, "{}. {}", n, mv)?;
        }
        Ok(())
    }
}
