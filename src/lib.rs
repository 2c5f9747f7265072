//! Chessy (workspace facade crate).
//!
//! Re-exports the member crates under short names so binaries, integration
//! tests and benches can write `chessy::core::Game` and so on.

pub use chessy_core as core;
pub use chessy_engine as engine;
pub use chessy_input as input;
pub use chessy_term as term;
pub use chessy_types as types;
