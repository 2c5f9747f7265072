//! Append-only JSONL record of committed moves.
//!
//! One object per line: `{"n":1,"piece":"P","from":"e2","to":"e4"}`. The file
//! is never read back by the game.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{ChessyError, Result};
use crate::types::{Move, Piece};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub n: usize,
    pub piece: String,
    pub from: String,
    pub to: String,
}

impl MoveRecord {
    pub fn new(n: usize, piece: Piece, mv: Move) -> Self {
        Self {
            n,
            piece: piece.symbol().to_string(),
            from: mv.start.to_algebraic(),
            to: mv.end.to_algebraic(),
        }
    }
}

pub struct Journal {
    out: Box<dyn Write + Send>,
}

impl Journal {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ChessyError::Journal(format!("open {}: {}", path.display(), e)))?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }

    pub fn from_writer(out: impl Write + Send + 'static) -> Self {
        Self { out: Box::new(out) }
    }

    pub fn record(&mut self, record: &MoveRecord) -> Result<()> {
        let line =
            serde_json::to_string(record).map_err(|e| ChessyError::Journal(e.to_string()))?;
        self.out
            .write_all(line.as_bytes())
            .and_then(|_| self.out.write_all(b"\n"))
            .and_then(|_| self.out.flush())
            .map_err(|e| ChessyError::Journal(e.to_string()))
    }
}
