//! Composition layer: configuration, the sensor-driven input source, the
//! turn runner and the move journal.

pub mod config;
pub mod journal;
pub mod runner;
pub mod sensor_input;

pub use chessy_core as core;
pub use chessy_types as types;

pub use config::{parse_run_args, Config, Mode};
pub use journal::{Journal, MoveRecord};
pub use runner::{ExitReason, RunSummary, Runner};
pub use sensor_input::SensorInput;
