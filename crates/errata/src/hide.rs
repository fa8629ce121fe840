// Stack hiding
// Removes a wrapper's own frame from the stack text of the errors it returns

use crate::error::SystemError;
use crate::stack::FRAME_MARKER;

/// Removes the first frame line of `stack` containing `ident` together
/// with the line after it.
///
/// In a captured backtrace a frame is a symbol line followed by its
/// `at file:line` line, so this drops exactly one frame. Lines before the
/// first frame (the `name: message` header) are never matched. Returns
/// `None` when no frame line matches.
pub fn strip_frame(stack: &str, ident: &str) -> Option<String> {
    let first_frame = stack.lines().position(is_frame_line)?;
    strip_frame_after(stack, ident, first_frame)
}

/// Strips the frame for `ident` from `error`'s stack text, skipping its
/// header. Returns whether a frame was removed; errors without stack text
/// are left alone.
pub fn hide_frame(error: &mut SystemError, ident: &str) -> bool {
    let header = error.header();
    let stripped = error.stack().and_then(|stack| {
        if stack.starts_with(&header) {
            strip_frame_after(stack, ident, header.lines().count())
        } else {
            strip_frame(stack, ident)
        }
    });
    let Some(stripped) = stripped else {
        tracing::trace!(ident, "no frame to hide");
        return false;
    };
    error.set_stack(Some(stripped));
    tracing::trace!(ident, "hid frame from stack trace");
    true
}

fn strip_frame_after(stack: &str, ident: &str, skip: usize) -> Option<String> {
    let mut lines: Vec<&str> = stack.split('\n').collect();
    let start = skip + lines.iter().skip(skip).position(|line| line.contains(ident))?;
    let end = (start + 2).min(lines.len());
    lines.drain(start..end);
    Some(lines.join("\n"))
}

// `at file:line` lines and numbered backtrace symbol lines such as `  3: demo::run`.
fn is_frame_line(line: &str) -> bool {
    let line = line.trim();
    if line.starts_with(FRAME_MARKER) {
        return true;
    }
    line.split_once(": ")
        .is_some_and(|(index, _)| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
}

/// Wraps `f` so that errors it returns no longer show the frame of `ident`,
/// usually the name of the function being wrapped.
///
/// Purely cosmetic: the error is otherwise returned unchanged.
pub fn hide_from_stack_trace<A, R, F>(
    ident: impl Into<String>,
    f: F,
) -> impl Fn(A) -> Result<R, SystemError>
where
    F: Fn(A) -> Result<R, SystemError>,
{
    let ident = ident.into();
    move |arg| {
        f(arg).map_err(|mut error| {
            hide_frame(&mut error, &ident);
            error
        })
    }
}
