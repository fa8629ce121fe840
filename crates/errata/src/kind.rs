// Error kinds
// The closed set of error names and the "is a" relation used to filter them

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed documentation page for Win32 system error codes.
pub const WIN32_DOCS: &str =
    "https://github.com/MicrosoftDocs/win32/blob/docs/desktop-src/Debug/system-error-codes.md";

/// The kind of a [`SystemError`](crate::SystemError).
///
/// A kind is fixed when the error is constructed and determines its name,
/// its default message and which subtype fields it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    System,
    Argument,
    ArgumentNull,
    ArgumentEmpty,
    ArgumentRange,
    Assertion,
    Timeout,
    NotSupported,
    ObjectDisposed,
    NotImplemented,
    PlatformNotSupported,
    InvalidOperation,
    InvalidCast,
    NullReference,
    Format,
    Win32,
}

/// Returned when a name does not match any [`ErrorKind`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown error kind: {0}")]
pub struct ParseKindError(pub String);

impl ErrorKind {
    /// Every kind, base first.
    pub const ALL: [ErrorKind; 16] = [
        ErrorKind::System,
        ErrorKind::Argument,
        ErrorKind::ArgumentNull,
        ErrorKind::ArgumentEmpty,
        ErrorKind::ArgumentRange,
        ErrorKind::Assertion,
        ErrorKind::Timeout,
        ErrorKind::NotSupported,
        ErrorKind::ObjectDisposed,
        ErrorKind::NotImplemented,
        ErrorKind::PlatformNotSupported,
        ErrorKind::InvalidOperation,
        ErrorKind::InvalidCast,
        ErrorKind::NullReference,
        ErrorKind::Format,
        ErrorKind::Win32,
    ];

    /// The error name, e.g. `"ArgumentNullError"`.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::System => "SystemError",
            ErrorKind::Argument => "ArgumentError",
            ErrorKind::ArgumentNull => "ArgumentNullError",
            ErrorKind::ArgumentEmpty => "ArgumentEmptyError",
            ErrorKind::ArgumentRange => "ArgumentRangeError",
            ErrorKind::Assertion => "AssertionError",
            ErrorKind::Timeout => "TimeoutError",
            ErrorKind::NotSupported => "NotSupportedError",
            ErrorKind::ObjectDisposed => "ObjectDisposedError",
            ErrorKind::NotImplemented => "NotImplementedError",
            ErrorKind::PlatformNotSupported => "PlatformNotSupportedError",
            ErrorKind::InvalidOperation => "InvalidOperationError",
            ErrorKind::InvalidCast => "InvalidCastError",
            ErrorKind::NullReference => "NullReferenceError",
            ErrorKind::Format => "FormatError",
            ErrorKind::Win32 => "Win32Error",
        }
    }

    /// The kind this one specializes. `None` only for [`ErrorKind::System`].
    pub fn parent(self) -> Option<ErrorKind> {
        match self {
            ErrorKind::System => None,
            ErrorKind::ArgumentNull | ErrorKind::ArgumentEmpty | ErrorKind::ArgumentRange => {
                Some(ErrorKind::Argument)
            }
            _ => Some(ErrorKind::System),
        }
    }

    /// Whether an error of this kind should be caught by a handler for `ancestor`.
    ///
    /// Every kind is a `System` error, and the null/empty/range kinds are
    /// also `Argument` errors.
    pub fn is_a(self, ancestor: ErrorKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// Kinds that carry a parameter name.
    pub fn has_parameter_name(self) -> bool {
        self.is_a(ErrorKind::Argument)
    }

    /// The message used when the caller does not supply one.
    pub fn default_message(self, parameter_name: Option<&str>, code: Option<i32>) -> String {
        let p = parameter_name.unwrap_or("null");
        match self {
            ErrorKind::System => "System error.".to_string(),
            ErrorKind::Argument => format!("Argument {p} is invalid."),
            ErrorKind::ArgumentNull => format!("Argument {p} must not be null or undefined."),
            ErrorKind::ArgumentEmpty => {
                format!("Argument {p} must not be null, undefined, or empty.")
            }
            ErrorKind::ArgumentRange => format!("Argument {p} is out of range."),
            ErrorKind::Assertion => "Assertion failed.".to_string(),
            ErrorKind::Timeout => "Operation timed out.".to_string(),
            ErrorKind::NotSupported => "Operation is not supported.".to_string(),
            ErrorKind::ObjectDisposed => "Object is disposed.".to_string(),
            ErrorKind::NotImplemented => "Not implemented.".to_string(),
            ErrorKind::PlatformNotSupported => "Platform is not supported.".to_string(),
            ErrorKind::InvalidOperation => "Invalid operation.".to_string(),
            ErrorKind::InvalidCast => "Invalid cast.".to_string(),
            ErrorKind::NullReference => "Null or undefined reference.".to_string(),
            ErrorKind::Format => "Format error.".to_string(),
            ErrorKind::Win32 => {
                let code = code.map_or_else(|| "unknown".to_string(), |c| c.to_string());
                format!("Win32 error {code}. See {code} for more information using {WIN32_DOCS}.")
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ErrorKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_family_is_argument() {
        for kind in [ErrorKind::ArgumentNull, ErrorKind::ArgumentEmpty, ErrorKind::ArgumentRange] {
            assert!(kind.is_a(ErrorKind::Argument));
            assert!(kind.is_a(ErrorKind::System));
            assert!(kind.has_parameter_name());
        }
        assert!(!ErrorKind::Timeout.is_a(ErrorKind::Argument));
        assert!(!ErrorKind::Argument.is_a(ErrorKind::ArgumentNull));
    }

    #[test]
    fn test_every_kind_is_system() {
        for kind in ErrorKind::ALL {
            assert!(kind.is_a(ErrorKind::System), "{kind} should be a SystemError");
        }
    }

    #[test]
    fn test_name_round_trips_through_from_str() {
        for kind in ErrorKind::ALL {
            assert_eq!(kind.name().parse::<ErrorKind>(), Ok(kind));
        }
        assert_eq!(
            "Nope".parse::<ErrorKind>(),
            Err(ParseKindError("Nope".to_string()))
        );
    }

    #[test]
    fn test_parameterized_default_messages() {
        assert_eq!(
            ErrorKind::Argument.default_message(Some("myParam"), None),
            "Argument myParam is invalid."
        );
        assert_eq!(
            ErrorKind::ArgumentRange.default_message(None, None),
            "Argument null is out of range."
        );
        let win32 = ErrorKind::Win32.default_message(None, Some(5));
        assert!(win32.starts_with("Win32 error 5. See 5"));
        assert!(win32.ends_with(&format!("{WIN32_DOCS}.")));
    }
}
