// Error conversion utilities
// Maps standard library and serde errors onto SystemError kinds

use std::io;

use crate::error::{ErrorOptions, SystemError};
use crate::errors::Win32Error;
use crate::kind::ErrorKind;

/// Trait for converting any error type to a SystemError
pub trait IntoSystemError {
    fn into_system_error(self) -> SystemError;
}

impl<E: Into<SystemError>> IntoSystemError for E {
    #[track_caller]
    fn into_system_error(self) -> SystemError {
        self.into()
    }
}

/// Convert a Result with any convertible error type to a Result with SystemError
#[track_caller]
pub fn map_error<T, E: IntoSystemError>(result: Result<T, E>) -> crate::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => Err(err.into_system_error()),
    }
}

// Parse and encoding failures become FormatErrors with the source error attached as inner error.
macro_rules! format_error_from {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for SystemError {
                #[track_caller]
                fn from(err: $source) -> Self {
                    let message = err.to_string();
                    SystemError::with_options(
                        ErrorKind::Format,
                        Some(message.as_str()),
                        ErrorOptions::new().inner_error(err),
                    )
                }
            }
        )+
    };
}

format_error_from!(
    serde_json::Error,
    std::num::ParseIntError,
    std::num::ParseFloatError,
    std::str::ParseBoolError,
    std::str::Utf8Error,
    std::string::FromUtf8Error,
    std::fmt::Error,
);

impl From<io::Error> for SystemError {
    #[track_caller]
    fn from(err: io::Error) -> Self {
        #[cfg(windows)]
        if let Some(code) = err.raw_os_error() {
            let message = err.to_string();
            return Win32Error::new(code, Some(message.as_str()), Some(ErrorOptions::new().inner_error(err)));
        }

        let kind = match err.kind() {
            io::ErrorKind::TimedOut => ErrorKind::Timeout,
            io::ErrorKind::Unsupported => ErrorKind::NotSupported,
            io::ErrorKind::InvalidInput => ErrorKind::Argument,
            io::ErrorKind::InvalidData => ErrorKind::Format,
            _ => ErrorKind::System,
        };
        let message = err.to_string();
        SystemError::with_options(kind, Some(message.as_str()), ErrorOptions::new().inner_error(err))
    }
}

impl From<String> for SystemError {
    #[track_caller]
    fn from(message: String) -> Self {
        SystemError::new(ErrorKind::System, Some(message.as_str()))
    }
}

impl From<&str> for SystemError {
    #[track_caller]
    fn from(message: &str) -> Self {
        SystemError::new(ErrorKind::System, Some(message))
    }
}

/// Builds a [`Win32Error`] from a raw OS error code, e.g. one returned by
/// `GetLastError` over FFI.
#[track_caller]
pub fn from_os_code(code: i32) -> SystemError {
    let os_error = io::Error::from_raw_os_error(code);
    Win32Error::new(code, None, Some(ErrorOptions::new().inner_error(os_error)))
}
