//! Console input module.
//!
//! Maps text lines to [`crate::core::InputEvent`]s and provides two line-based
//! [`InputSource`](crate::core::InputSource)s that read on a background thread:
//! [`ConsoleInput`] (squares typed directly) and [`SimulatedBoard`] (squares
//! toggle a mock sensor matrix).

pub mod console;
pub mod map;
pub mod sim;

pub use chessy_core as core;
pub use chessy_types as types;

pub use console::{ConsoleInput, Line, LineFeed};
pub use map::{parse_line, should_quit};
pub use sim::SimulatedBoard;
