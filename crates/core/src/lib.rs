//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board model, the move rules, and the state machines
//! that turn physical piece displacement into committed moves. Hardware and
//! terminals are reached only through small traits:
//!
//! - [`SensorMatrix`](sensor::SensorMatrix): one occupancy reading on demand
//! - [`DisplaySink`](display::DisplaySink): square highlights and text
//! - [`InputSource`](input::InputSource): squares and console commands
//!
//! # Module Structure
//!
//! - [`board`]: 8x8 board model, standard layout, move application
//! - [`rules`]: per-piece destination generation
//! - [`occupancy`]: occupancy snapshots and the movement detector
//! - [`setup`]: physical-vs-logical setup verification
//! - [`session`]: pick-up / put-down state machine
//! - [`game`]: owns board, log and session; commits moves
//! - [`move_log`]: append-only move record
//! - [`wait`]: cancellable, deadline-aware polling
//! - [`display`], [`strip`]: output sink and LED strip mapping
//! - [`sensor`], [`input`]: input seams and in-memory implementations
//!
//! # Scope
//!
//! The rules answer "can this piece reach that square given blocking" and
//! nothing more: no check, checkmate, castling, en passant or promotion, and
//! turn order is never enforced.
//!
//! # Example
//!
//! ```
//! use chessy_core::{Game, TurnEvent};
//! use chessy_core::types::Position;
//!
//! let mut game = Game::new();
//! let e2 = Position::from_algebraic("e2").unwrap();
//! let e4 = Position::from_algebraic("e4").unwrap();
//!
//! assert!(matches!(game.select(e2), TurnEvent::Selected { .. }));
//! assert!(matches!(game.select(e4), TurnEvent::Committed { number: 1, .. }));
//! assert_eq!(game.log().to_string(), "1. e2->e4\n");
//! ```

pub mod board;
pub mod display;
pub mod error;
pub mod game;
pub mod input;
pub mod move_log;
pub mod occupancy;
pub mod rules;
pub mod sensor;
pub mod session;
pub mod setup;
pub mod strip;
pub mod wait;

pub use chessy_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use display::{DisplaySink, Notice, RecordingDisplay};
pub use error::{ChessyError, Result};
pub use game::{Game, TurnEvent};
pub use input::{ConsoleCommand, InputEvent, InputSource, ScriptedInput};
pub use move_log::MoveLog;
pub use occupancy::{MovementDetector, OccupancySnapshot};
pub use rules::{candidates, is_legal, Candidates};
pub use sensor::{MockSensor, ScriptedSensor, SensorMatrix};
pub use session::{SelectionSession, SessionState, Transition};
pub use setup::{Mismatch, MismatchKind, SetupVerifier};
pub use strip::{strip_index, PixelStrip, StripDisplay};
pub use wait::{pause, CancelToken, Wait, Waiter};
