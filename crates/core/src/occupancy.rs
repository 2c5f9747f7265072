//! Occupancy snapshots and the movement detector.
//!
//! An [`OccupancySnapshot`] is one full-board reading from the sensor matrix,
//! stored as a 64-bit mask (bit `row * 8 + col` set = piece detected).
//! The [`MovementDetector`] keeps the previous reading and reports the
//! row-major-first cell that changed since then.
//!
//! Only one changed cell is reported per poll. When two cells flip between
//! polls (a capture lifted together with the capturing piece, say) the second
//! change is absorbed into the retained snapshot and never reported.

use std::fmt;

use crate::error::Result;
use crate::sensor::SensorMatrix;
use crate::types::{Position, BOARD_SIZE, NUM_SQUARES};

/// One 8x8 boolean reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OccupancySnapshot {
    bits: u64,
}

impl OccupancySnapshot {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    pub const fn bits(&self) -> u64 {
        self.bits
    }

    /// Build from a row-major `[row][col]` grid.
    pub fn from_grid(grid: &[[bool; BOARD_SIZE as usize]; BOARD_SIZE as usize]) -> Self {
        let mut snap = Self::empty();
        for pos in Position::all() {
            snap.set(pos, grid[pos.row() as usize][pos.col() as usize]);
        }
        snap
    }

    #[inline]
    pub fn get(&self, pos: Position) -> bool {
        self.bits & (1u64 << pos.index()) != 0
    }

    #[inline]
    pub fn set(&mut self, pos: Position, occupied: bool) {
        let mask = 1u64 << pos.index();
        if occupied {
            self.bits |= mask;
        } else {
            self.bits &= !mask;
        }
    }

    pub fn toggle(&mut self, pos: Position) {
        self.bits ^= 1u64 << pos.index();
    }

    pub fn count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Row-major-first cell whose occupancy differs from `other`.
    pub fn first_difference(&self, other: &OccupancySnapshot) -> Option<Position> {
        let diff = self.bits ^ other.bits;
        if diff == 0 {
            return None;
        }
        Position::from_index(diff.trailing_zeros() as usize)
    }

    /// All differing cells, row-major.
    pub fn differences(&self, other: &OccupancySnapshot) -> impl Iterator<Item = Position> {
        let diff = self.bits ^ other.bits;
        (0..NUM_SQUARES)
            .filter(move |i| diff & (1u64 << i) != 0)
            .filter_map(Position::from_index)
    }
}

impl fmt::Display for OccupancySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let occupied = Position::new(row, col).map(|p| self.get(p)).unwrap_or(false);
                f.write_str(if occupied { "X" } else { "." })?;
            }
            if row + 1 < BOARD_SIZE {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

/// Diffs consecutive sensor readings.
#[derive(Debug, Clone, Default)]
pub struct MovementDetector {
    previous: OccupancySnapshot,
}

impl MovementDetector {
    /// Detector whose retained snapshot starts all-empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the retained snapshot without reporting anything.
    pub fn prime(&mut self, snapshot: OccupancySnapshot) {
        self.previous = snapshot;
    }

    pub fn previous(&self) -> OccupancySnapshot {
        self.previous
    }

    /// Compare `current` against the retained snapshot, then retain `current`.
    pub fn observe(&mut self, current: OccupancySnapshot) -> Option<Position> {
        let changed = current.first_difference(&self.previous);
        self.previous = current;
        changed
    }

    /// Scan the sensor once and report the first changed cell, if any.
    pub fn poll<S: SensorMatrix + ?Sized>(&mut self, sensor: &mut S) -> Result<Option<Position>> {
        let current = sensor.scan()?;
        Ok(self.observe(current))
    }
}
