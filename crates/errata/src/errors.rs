// Error subtypes and their guard helpers
//
// Each subtype is a namespace over `SystemError` with a fixed `ErrorKind`.
// "Throwing" returns `Err` so the caller propagates it with `?`.

use serde_json::Value;

use crate::error::{ErrorOptions, ErrorProps, SystemError};
use crate::kind::ErrorKind;
use crate::platform;
use crate::traits::HasLength;
use crate::Result;

/// Generates a subtype whose only data is its message.
macro_rules! message_error {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl $name {
            pub const KIND: ErrorKind = ErrorKind::$kind;

            #[track_caller]
            pub fn new(message: Option<&str>, options: Option<ErrorOptions>) -> SystemError {
                SystemError::compose(Self::KIND, message, ErrorProps::default(), options)
            }

            /// Always returns the error.
            #[track_caller]
            pub fn throw<T>(message: Option<&str>, options: Option<ErrorOptions>) -> Result<T> {
                Err(Self::new(message, options).raised())
            }

            /// Returns the error when `condition` holds.
            #[track_caller]
            pub fn throw_if(
                condition: bool,
                message: Option<&str>,
                options: Option<ErrorOptions>,
            ) -> Result<()> {
                if condition {
                    return Self::throw(message, options);
                }
                Ok(())
            }
        }
    };
}

message_error! {
    /// A failed assertion. Default message: "Assertion failed."
    AssertionError => Assertion
}

message_error! {
    /// An operation ran out of time. Default message: "Operation timed out."
    TimeoutError => Timeout
}

message_error! {
    /// A function, method or case that is not supported.
    /// Default message: "Operation is not supported."
    NotSupportedError => NotSupported
}

message_error! {
    /// Use of an object whose resources were released.
    /// Default message: "Object is disposed."
    ObjectDisposedError => ObjectDisposed
}

message_error! {
    /// Default message: "Not implemented."
    NotImplementedError => NotImplemented
}

message_error! {
    /// The current platform cannot run the operation.
    /// Default message: "Platform is not supported."
    PlatformNotSupportedError => PlatformNotSupported
}

message_error! {
    /// An operation that is invalid for the current state.
    /// Default message: "Invalid operation."
    InvalidOperationError => InvalidOperation
}

message_error! {
    /// Default message: "Invalid cast."
    InvalidCastError => InvalidCast
}

message_error! {
    /// Malformed input. Default message: "Format error."
    FormatError => Format
}

impl AssertionError {
    /// Returns the error when `expression` is false.
    #[track_caller]
    pub fn assert(expression: bool, message: Option<&str>, options: Option<ErrorOptions>) -> Result<()> {
        Self::throw_if(!expression, message, options)
    }
}

impl PlatformNotSupportedError {
    /// The current platform identifier.
    pub fn platform() -> String {
        platform::platform()
    }

    /// Returns the error when the current platform is `os`.
    #[track_caller]
    pub fn throw_when_os_not_supported(
        os: &str,
        message: Option<&str>,
        options: Option<ErrorOptions>,
    ) -> Result<()> {
        if platform::platform() == os {
            let message = message.map_or_else(
                || format!("The {os} platform is not supported."),
                str::to_string,
            );
            return Self::throw(Some(message.as_str()), options);
        }
        Ok(())
    }

    /// Returns the error when the current platform is anything but `os`.
    #[track_caller]
    pub fn throw_when_os_supported(
        os: &str,
        message: Option<&str>,
        options: Option<ErrorOptions>,
    ) -> Result<()> {
        if platform::platform() != os {
            let message = message.map_or_else(
                || format!("Only the {os} platform is supported."),
                str::to_string,
            );
            return Self::throw(Some(message.as_str()), options);
        }
        Ok(())
    }
}

/// An invalid argument. Default message: "Argument {p} is invalid."
#[derive(Debug, Clone, Copy)]
pub struct ArgumentError;

impl ArgumentError {
    pub const KIND: ErrorKind = ErrorKind::Argument;

    #[track_caller]
    pub fn new(
        parameter_name: Option<&str>,
        message: Option<&str>,
        options: Option<ErrorOptions>,
    ) -> SystemError {
        argument(Self::KIND, parameter_name, message, options)
    }

    #[track_caller]
    pub fn throw<T>(parameter_name: &str, message: Option<&str>, options: Option<ErrorOptions>) -> Result<T> {
        Err(Self::new(Some(parameter_name), message, options).raised())
    }

    #[track_caller]
    pub fn throw_if(
        condition: bool,
        parameter_name: &str,
        message: Option<&str>,
        options: Option<ErrorOptions>,
    ) -> Result<()> {
        if condition {
            return Self::throw(parameter_name, message, options);
        }
        Ok(())
    }
}

/// A required argument was absent.
/// Default message: "Argument {p} must not be null or undefined."
#[derive(Debug, Clone, Copy)]
pub struct ArgumentNullError;

impl ArgumentNullError {
    pub const KIND: ErrorKind = ErrorKind::ArgumentNull;

    #[track_caller]
    pub fn new(
        parameter_name: Option<&str>,
        message: Option<&str>,
        options: Option<ErrorOptions>,
    ) -> SystemError {
        argument(Self::KIND, parameter_name, message, options)
    }

    /// Returns the error when `value` is `None`, the value otherwise.
    #[track_caller]
    pub fn throw<T>(
        value: Option<T>,
        parameter_name: &str,
        message: Option<&str>,
        options: Option<ErrorOptions>,
    ) -> Result<T> {
        match value {
            Some(value) => Ok(value),
            None => Err(Self::new(Some(parameter_name), message, options).raised()),
        }
    }

    #[track_caller]
    pub fn throw_if(
        condition: bool,
        parameter_name: &str,
        message: Option<&str>,
        options: Option<ErrorOptions>,
    ) -> Result<()> {
        if condition {
            return Err(Self::new(Some(parameter_name), message, options).raised());
        }
        Ok(())
    }
}

/// A required argument was absent or empty.
/// Default message: "Argument {p} must not be null, undefined, or empty."
#[derive(Debug, Clone, Copy)]
pub struct ArgumentEmptyError;

impl ArgumentEmptyError {
    pub const KIND: ErrorKind = ErrorKind::ArgumentEmpty;

    #[track_caller]
    pub fn new(
        parameter_name: Option<&str>,
        message: Option<&str>,
        options: Option<ErrorOptions>,
    ) -> SystemError {
        argument(Self::KIND, parameter_name, message, options)
    }

    /// Returns the error when `value` is `None` or empty, the value
    /// otherwise.
    #[track_caller]
    pub fn throw<V: HasLength>(
        value: Option<V>,
        parameter_name: &str,
        message: Option<&str>,
        options: Option<ErrorOptions>,
    ) -> Result<V> {
        match value {
            Some(value) if !value.is_empty_value() => Ok(value),
            _ => Err(Self::new(Some(parameter_name), message, options).raised()),
        }
    }

    #[track_caller]
    pub fn throw_if(
        condition: bool,
        parameter_name: &str,
        message: Option<&str>,
        options: Option<ErrorOptions>,
    ) -> Result<()> {
        if condition {
            return Err(Self::new(Some(parameter_name), message, options).raised());
        }
        Ok(())
    }
}

/// An argument outside its allowed range.
/// Default message: "Argument {p} is out of range."
#[derive(Debug, Clone, Copy)]
pub struct ArgumentRangeError;

impl ArgumentRangeError {
    pub const KIND: ErrorKind = ErrorKind::ArgumentRange;

    #[track_caller]
    pub fn new(
        value: Option<Value>,
        parameter_name: Option<&str>,
        message: Option<&str>,
        options: Option<ErrorOptions>,
    ) -> SystemError {
        let fields = ErrorProps {
            parameter_name: parameter_name.map(str::to_string),
            value,
            ..ErrorProps::default()
        };
        SystemError::compose(Self::KIND, message, fields, options)
    }

    /// Always returns the error, recording `value`.
    #[track_caller]
    pub fn throw<T>(
        value: impl Into<Value>,
        parameter_name: &str,
        message: Option<&str>,
        options: Option<ErrorOptions>,
    ) -> Result<T> {
        Err(Self::new(Some(value.into()), Some(parameter_name), message, options).raised())
    }

    /// Returns the error when `condition` holds. The offending value is not
    /// known here, so it is left unset.
    #[track_caller]
    pub fn throw_if(
        condition: bool,
        parameter_name: &str,
        message: Option<&str>,
        options: Option<ErrorOptions>,
    ) -> Result<()> {
        if condition {
            return Err(Self::new(None, Some(parameter_name), message, options).raised());
        }
        Ok(())
    }
}

/// A value that must be present was not.
/// Default message: "Null or undefined reference."
#[derive(Debug, Clone, Copy)]
pub struct NullReferenceError;

impl NullReferenceError {
    pub const KIND: ErrorKind = ErrorKind::NullReference;

    #[track_caller]
    pub fn new(message: Option<&str>, options: Option<ErrorOptions>) -> SystemError {
        SystemError::compose(Self::KIND, message, ErrorProps::default(), options)
    }

    /// Returns the error when `value` is `None`, the value otherwise.
    #[track_caller]
    pub fn throw<T>(value: Option<T>, message: Option<&str>, options: Option<ErrorOptions>) -> Result<T> {
        match value {
            Some(value) => Ok(value),
            None => Err(Self::new(message, options).raised()),
        }
    }
}

/// A Win32 system error code, typically returned by an FFI call.
///
/// The link always points at the system error code documentation, whatever
/// the options say.
#[derive(Debug, Clone, Copy)]
pub struct Win32Error;

impl Win32Error {
    pub const KIND: ErrorKind = ErrorKind::Win32;

    #[track_caller]
    pub fn new(code: i32, message: Option<&str>, options: Option<ErrorOptions>) -> SystemError {
        let fields = ErrorProps::new().code(code);
        SystemError::compose(Self::KIND, message, fields, options)
    }

    #[track_caller]
    pub fn throw<T>(code: i32, message: Option<&str>, options: Option<ErrorOptions>) -> Result<T> {
        Err(Self::new(code, message, options).raised())
    }

    /// Builds an error from the calling thread's last OS error code.
    #[track_caller]
    pub fn last_error() -> SystemError {
        let os_error = std::io::Error::last_os_error();
        let code = os_error.raw_os_error().unwrap_or_default();
        Self::new(code, None, Some(ErrorOptions::new().inner_error(os_error)))
    }
}

#[track_caller]
fn argument(
    kind: ErrorKind,
    parameter_name: Option<&str>,
    message: Option<&str>,
    options: Option<ErrorOptions>,
) -> SystemError {
    let fields = ErrorProps {
        parameter_name: parameter_name.map(str::to_string),
        ..ErrorProps::default()
    };
    SystemError::compose(kind, message, fields, options)
}
