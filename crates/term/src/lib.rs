//! Terminal front end for the chessboard.
//!
//! Renders into a small styled framebuffer that is flushed inline to the
//! terminal, next to a plain text printer for the board and the move list.
//! Nothing here enters raw mode, so console input stays line-based.

pub mod board_view;
pub mod display;
pub mod fb;
pub mod renderer;
pub mod text;

pub use chessy_core as core;
pub use chessy_types as types;

pub use board_view::{BoardView, Highlights};
pub use display::TermDisplay;
pub use fb::{Cell, CellStyle, FrameBuffer};
pub use renderer::{encode_frame_into, InlineRenderer};
pub use text::{format_board, format_moves, ColumnOrder};
