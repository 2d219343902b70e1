//! Fixed-width wrapping of user-facing messages.
//!
//! Every message Toolhub prints on its own behalf (usage text, warnings,
//! error messages) is filled to [`WRAP_WIDTH`] columns with a greedy
//! first-fit algorithm, so the same text always wraps at the same places.

use textwrap::{Options, WrapAlgorithm};

/// Column limit for wrapped output.
pub const WRAP_WIDTH: usize = 78;

fn options() -> Options<'static> {
    Options::new(WRAP_WIDTH).wrap_algorithm(WrapAlgorithm::FirstFit)
}

/// Fill `text` into lines of at most [`WRAP_WIDTH`] columns.
///
/// Existing line breaks are kept; each original line is wrapped separately.
pub fn fill(text: &str) -> String {
    textwrap::fill(text, options())
}

/// Wrap every line of `text` on its own, joining the results with newlines.
///
/// Used for multi-paragraph text such as a tool's about information, where
/// blank lines between paragraphs must survive.
pub fn fill_lines(text: &str) -> String {
    text.lines().map(fill).collect::<Vec<_>>().join("\n")
}
