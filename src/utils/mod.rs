//! Shared helpers.

pub mod text;

pub use text::{fill, fill_lines, WRAP_WIDTH};
