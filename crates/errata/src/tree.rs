// Error tree traversal
// Visits an error after its aggregate children, inner error and cause

use std::error::Error as StdError;

use serde_json::Value;

use crate::aggregate::AggregateError;
use crate::error::{Cause, SystemError};
use crate::report::ErrorReport;

/// A formatter for [`print_error_with`].
pub type Formatter<'f> = &'f dyn Fn(&(dyn StdError + 'static)) -> String;

/// Something reached during traversal.
enum Node<'a> {
    Error(&'a (dyn StdError + 'static)),
    /// A non-error cause: printed, never descended into.
    Value(&'a Value),
}

/// Depth-first traversal: aggregate children, then the inner error, then
/// the cause, then `e` itself.
///
/// There is no cycle guard. A chain that refers back to itself recurses
/// until the stack overflows.
fn traverse<'a>(e: &'a (dyn StdError + 'static), visit: &mut dyn FnMut(Node<'a>)) {
    if let Some(aggregate) = e.downcast_ref::<AggregateError>() {
        for child in aggregate.errors().iter().filter_map(Cause::as_error) {
            traverse(child, visit);
        }
    }

    if let Some(error) = e.downcast_ref::<SystemError>() {
        if let Some(inner) = error.inner_error() {
            traverse(&**inner, visit);
        }
        match error.cause() {
            Some(Cause::Error(cause)) => traverse(&**cause, visit),
            Some(Cause::Value(value)) => visit(Node::Value(value)),
            None => {}
        }
    } else if e.downcast_ref::<AggregateError>().is_none() {
        if let Some(source) = e.source() {
            traverse(source, visit);
        }
    }

    visit(Node::Error(e));
}

/// Invokes `callback` for every error in the tree rooted at `e`, leaves
/// first.
pub fn walk_error<'a, F>(e: &'a (dyn StdError + 'static), mut callback: F)
where
    F: FnMut(&'a (dyn StdError + 'static)),
{
    traverse(e, &mut |node| {
        if let Node::Error(error) = node {
            callback(error);
        }
    });
}

/// Flattens the tree rooted at `e` in [`walk_error`] order.
pub fn collect_error<'a>(e: &'a (dyn StdError + 'static)) -> Vec<&'a (dyn StdError + 'static)> {
    let mut errors = Vec::new();
    walk_error(e, |error| errors.push(error));
    errors
}

/// Writes every error in the tree to stderr using [`describe`].
pub fn print_error(e: &(dyn StdError + 'static)) {
    print_error_with(e, None, &mut |line| eprintln!("{line}"));
}

/// Writes every error in the tree, plus every non-error cause, to `write`
/// in traversal order. Errors go through `format` when given, else
/// [`describe`].
pub fn print_error_with(
    e: &(dyn StdError + 'static),
    format: Option<Formatter<'_>>,
    write: &mut dyn FnMut(&str),
) {
    traverse(e, &mut |node| match node {
        Node::Error(error) => match format {
            Some(format) => write(&format(error)),
            None => write(&describe(error)),
        },
        Node::Value(Value::String(s)) => write(s),
        Node::Value(value) => write(&value.to_string()),
    });
}

/// Default rendering: the stack text of a [`SystemError`], or
/// `"{name}: {message}"` when it has none. Other errors render as their
/// `Display`.
pub fn describe(e: &(dyn StdError + 'static)) -> String {
    if let Some(error) = e.downcast_ref::<SystemError>() {
        return match error.stack() {
            Some(stack) if stack.starts_with(&error.header()) => stack.to_string(),
            Some(stack) => format!("{}\n{stack}", error.header()),
            None => error.header(),
        };
    }
    if let Some(aggregate) = e.downcast_ref::<AggregateError>() {
        return format!("AggregateError: {aggregate}");
    }
    e.to_string()
}

/// One JSON object per error, for log pipelines.
pub fn json_format(e: &(dyn StdError + 'static)) -> String {
    serde_json::to_string(&ErrorReport::from_error(e)).unwrap_or_else(|_| e.to_string())
}
