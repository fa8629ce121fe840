// Stack text parsing
// Turns captured stack text into the list of frame lines

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::panic::Location;

use crate::SystemError;

/// Prefix of a frame line once surrounding whitespace is trimmed.
pub const FRAME_MARKER: &str = "at ";

/// Returns the trimmed lines of `stack` that are call frames.
///
/// An absent stack yields an empty list.
pub fn get_stack_trace(stack: Option<&str>) -> Vec<String> {
    match stack {
        Some(stack) => stack
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with(FRAME_MARKER))
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// Frames of any error. Only [`SystemError`]s carry stack text, so every
/// other error yields an empty list.
pub fn stack_trace_of(e: &(dyn StdError + 'static)) -> Vec<String> {
    e.downcast_ref::<SystemError>()
        .map(|error| error.stack_trace().to_vec())
        .unwrap_or_default()
}

/// Builds the stack text recorded when an error is created: the header,
/// the construction site, then the captured backtrace when
/// `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE` enable it.
pub(crate) fn capture(header: &str, location: &Location<'_>) -> String {
    let mut stack = format!("{header}\n    {FRAME_MARKER}{location}");
    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        stack.push('\n');
        stack.push_str(&backtrace.to_string());
    }
    stack
}
