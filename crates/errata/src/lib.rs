// Errata error handling library
// System error types, guard helpers and error tree utilities

//! Structured error types with guard helpers and error tree utilities.
//!
//! Every error is a [`SystemError`] whose [`ErrorKind`] names its subtype
//! (`ArgumentNullError`, `TimeoutError`, ...). Besides a message it carries
//! an inner error, a cause, free-form `data`, a documentation link and the
//! frames of the stack where it was created.
//!
//! Subtypes expose guard helpers that return `Err` when a precondition
//! fails:
//!
//! ```ignore
//! use errata::{ArgumentNullError, Result};
//!
//! fn greet(name: Option<&str>) -> Result<String> {
//!     let name = ArgumentNullError::throw(name, "name", None, None)?;
//!     Ok(format!("hello {name}"))
//! }
//! ```
//!
//! A caught error can be flattened with [`collect_error`], visited with
//! [`walk_error`] or logged with [`print_error`].

// Re-export common error handling tools for convenience
pub use anyhow;

// Module structure
mod aggregate;
mod conversion;
mod error;
mod errors;
mod hide;
mod kind;
mod macros;
mod report;
mod stack;
mod traits;

pub mod logging;
pub mod platform;
pub mod tree;

// Public exports
pub use aggregate::AggregateError;
pub use conversion::{from_os_code, map_error, IntoSystemError};
pub use error::{Cause, ErrorOptions, ErrorProps, PropsError, SharedError, SystemError};
pub use errors::{
    ArgumentEmptyError, ArgumentError, ArgumentNullError, ArgumentRangeError, AssertionError,
    FormatError, InvalidCastError, InvalidOperationError, NotImplementedError, NotSupportedError,
    NullReferenceError, ObjectDisposedError, PlatformNotSupportedError, TimeoutError, Win32Error,
};
pub use hide::{hide_frame, hide_from_stack_trace, strip_frame};
pub use kind::{ErrorKind, ParseKindError, WIN32_DOCS};
pub use report::ErrorReport;
pub use stack::{get_stack_trace, stack_trace_of, FRAME_MARKER};
pub use traits::HasLength;
pub use tree::{collect_error, print_error, print_error_with, walk_error};

/// Standard Result type using SystemError
pub type Result<T, E = SystemError> = std::result::Result<T, E>;
