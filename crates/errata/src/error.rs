// The base error type
// SystemError, its construction options and the bulk property setter

use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::{Arc, OnceLock};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::kind::{ErrorKind, WIN32_DOCS};
use crate::stack;

/// An error shared between the error that wraps it and whoever caught it.
pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

/// The cause slot of an error: either another error, which the tree
/// utilities walk into, or an arbitrary value, which they only print.
#[derive(Debug, Clone)]
pub enum Cause {
    Error(SharedError),
    Value(Value),
}

impl Cause {
    /// Wraps an error as a cause.
    pub fn error<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Cause::Error(Arc::new(error))
    }

    /// The cause as an error, if it is one.
    pub fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Cause::Error(error) => Some(&**error),
            Cause::Value(_) => None,
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Error(error) => write!(f, "{error}"),
            Cause::Value(Value::String(s)) => f.write_str(s),
            Cause::Value(value) => write!(f, "{value}"),
        }
    }
}

impl From<Value> for Cause {
    fn from(value: Value) -> Self {
        Cause::Value(value)
    }
}

impl From<SharedError> for Cause {
    fn from(error: SharedError) -> Self {
        Cause::Error(error)
    }
}

/// Options accepted by every constructor.
#[derive(Debug, Clone, Default)]
pub struct ErrorOptions {
    pub inner_error: Option<SharedError>,
    pub cause: Option<Cause>,
    pub data: Option<Map<String, Value>>,
    pub link: Option<String>,
}

impl ErrorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner_error<E>(mut self, error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.inner_error = Some(Arc::new(error));
        self
    }

    /// Attaches an inner error that the caller keeps a handle to.
    pub fn shared_inner_error(mut self, error: SharedError) -> Self {
        self.inner_error = Some(error);
        self
    }

    pub fn cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Properties for [`SystemError::set`].
///
/// Unset fields leave the target alone. Subtype fields are only applied
/// when the target's kind carries them. There is no way to express a
/// name or raw stack here.
#[derive(Debug, Clone, Default)]
pub struct ErrorProps {
    pub message: Option<String>,
    pub inner_error: Option<SharedError>,
    pub cause: Option<Cause>,
    pub data: Option<Map<String, Value>>,
    pub link: Option<String>,
    pub parameter_name: Option<String>,
    pub value: Option<Value>,
    pub code: Option<i32>,
}

/// Returned by [`ErrorProps::try_from_json`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropsError {
    #[error("Error properties must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl ErrorProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn inner_error(mut self, error: SharedError) -> Self {
        self.inner_error = Some(error);
        self
    }

    pub fn cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn parameter_name(mut self, name: impl Into<String>) -> Self {
        self.parameter_name = Some(name.into());
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn code(mut self, code: i32) -> Self {
        self.code = Some(code);
        self
    }

    /// Reads properties from a JSON object, the way a dynamic caller would
    /// pass them.
    ///
    /// `name` and `stack` are always skipped. Unknown keys and values of the
    /// wrong type are ignored. Anything that is not an object yields empty
    /// properties.
    pub fn from_json(props: &Value) -> Self {
        Self::try_from_json(props).unwrap_or_default()
    }

    /// Like [`ErrorProps::from_json`] but rejects non-object input.
    pub fn try_from_json(props: &Value) -> Result<Self, PropsError> {
        let object = props
            .as_object()
            .ok_or_else(|| PropsError::NotAnObject(json_type_name(props)))?;

        let mut out = Self::default();
        for (key, value) in object {
            match key.as_str() {
                "message" => out.message = value.as_str().map(str::to_string),
                "data" => out.data = value.as_object().cloned(),
                "link" => out.link = value.as_str().map(str::to_string),
                "cause" => out.cause = Some(Cause::Value(value.clone())),
                "parameterName" => out.parameter_name = value.as_str().map(str::to_string),
                "value" => out.value = Some(value.clone()),
                "code" => out.code = value.as_i64().and_then(|c| i32::try_from(c).ok()),
                _ => {}
            }
        }
        Ok(out)
    }
}

impl From<ErrorOptions> for ErrorProps {
    fn from(options: ErrorOptions) -> Self {
        ErrorProps {
            inner_error: options.inner_error,
            cause: options.cause,
            data: options.data,
            link: options.link,
            ..ErrorProps::default()
        }
    }
}

/// The base error type.
///
/// Every error produced by this crate is a `SystemError`; its [`ErrorKind`]
/// says which subtype it is. The kind never changes after construction.
#[derive(Debug, Clone)]
pub struct SystemError {
    kind: ErrorKind,
    message: String,
    stack: Option<String>,
    frames: OnceLock<Vec<String>>,
    inner_error: Option<SharedError>,
    cause: Option<Cause>,
    data: Map<String, Value>,
    link: Option<String>,
    parameter_name: Option<String>,
    value: Option<Value>,
    code: Option<i32>,
}

impl SystemError {
    /// Creates an error of `kind`. An absent or empty message falls back
    /// to the kind's default.
    #[track_caller]
    pub fn new(kind: ErrorKind, message: Option<&str>) -> Self {
        Self::compose(kind, message, ErrorProps::default(), None)
    }

    /// Creates an error of `kind` and applies `options`.
    #[track_caller]
    pub fn with_options(kind: ErrorKind, message: Option<&str>, options: ErrorOptions) -> Self {
        Self::compose(kind, message, ErrorProps::default(), Some(options))
    }

    /// Shared constructor: subtype `fields` are applied before the default
    /// message is rendered, `options` after it.
    #[track_caller]
    pub(crate) fn compose(
        kind: ErrorKind,
        message: Option<&str>,
        fields: ErrorProps,
        options: Option<ErrorOptions>,
    ) -> Self {
        let location = Location::caller();
        let mut error = SystemError {
            kind,
            message: String::new(),
            stack: None,
            frames: OnceLock::new(),
            inner_error: None,
            cause: None,
            data: Map::new(),
            link: None,
            parameter_name: None,
            value: None,
            code: None,
        };
        error.set(fields);
        error.message = match message.filter(|m| !m.is_empty()) {
            Some(message) => message.to_string(),
            None => kind.default_message(error.parameter_name.as_deref(), error.code),
        };
        if let Some(options) = options {
            error.set(options.into());
        }
        if kind == ErrorKind::Win32 {
            error.link = Some(WIN32_DOCS.to_string());
        }
        error.stack = Some(stack::capture(&error.header(), location));
        error
    }

    /// Records the error on the tracing stream and hands it back, ready to
    /// be returned as `Err`.
    pub fn raised(self) -> Self {
        tracing::debug!(name = self.name(), "raising error: {}", self.message);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Whether this error should be handled by a handler for `kind`.
    pub fn is_a(&self, kind: ErrorKind) -> bool {
        self.kind.is_a(kind)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// `"{name}: {message}"`, the first line of the stack text.
    pub fn header(&self) -> String {
        format!("{}: {}", self.name(), self.message)
    }

    /// Raw stack text.
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// Replaces the raw stack text and drops the cached frames.
    pub fn set_stack(&mut self, stack: Option<String>) {
        self.frames = OnceLock::new();
        self.stack = stack;
    }

    /// The frame lines of the stack text, parsed on first access and
    /// cached until the stack is reassigned.
    pub fn stack_trace(&self) -> &[String] {
        self.frames
            .get_or_init(|| stack::get_stack_trace(self.stack.as_deref()))
    }

    /// Makes `frames` the source of truth and regenerates the stack text
    /// from them.
    pub fn set_stack_trace(&mut self, frames: Vec<String>) {
        self.stack = Some(frames.join("\n"));
        self.frames = OnceLock::from(frames);
    }

    pub fn inner_error(&self) -> Option<&SharedError> {
        self.inner_error.as_ref()
    }

    pub fn set_inner_error(&mut self, error: Option<SharedError>) {
        self.inner_error = error;
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    pub fn set_cause(&mut self, cause: Option<Cause>) {
        self.cause = cause;
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.data
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn set_link(&mut self, link: Option<String>) {
        self.link = link;
    }

    /// Name of the offending parameter, for the argument kinds.
    pub fn parameter_name(&self) -> Option<&str> {
        self.parameter_name.as_deref()
    }

    /// The out-of-range value, for [`ErrorKind::ArgumentRange`].
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The system error code, for [`ErrorKind::Win32`].
    pub fn code(&self) -> Option<i32> {
        self.code
    }

    /// Merges `props` into this error.
    ///
    /// Subtype fields the kind does not carry are ignored, as is anything
    /// left unset.
    pub fn set(&mut self, props: ErrorProps) -> &mut Self {
        let ErrorProps {
            message,
            inner_error,
            cause,
            data,
            link,
            parameter_name,
            value,
            code,
        } = props;

        if let Some(message) = message {
            self.message = message;
        }
        if inner_error.is_some() {
            self.inner_error = inner_error;
        }
        if cause.is_some() {
            self.cause = cause;
        }
        if let Some(data) = data {
            self.data = data;
        }
        if link.is_some() {
            self.link = link;
        }
        if parameter_name.is_some() && self.kind.has_parameter_name() {
            self.parameter_name = parameter_name;
        }
        if value.is_some() && self.kind == ErrorKind::ArgumentRange {
            self.value = value;
        }
        if code.is_some() && self.kind == ErrorKind::Win32 {
            self.code = code;
        }
        self
    }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for SystemError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.inner_error {
            Some(inner) => Some(&**inner),
            None => self.cause.as_ref().and_then(Cause::as_error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_system_error_has_name_and_message() {
        let error = SystemError::new(ErrorKind::System, Some("test error"));
        assert_eq!(error.name(), "SystemError");
        assert_eq!(error.message(), "test error");
        assert_eq!(error.to_string(), "test error");
        assert!(error.data().is_empty());
    }

    #[test]
    fn test_empty_message_uses_default() {
        let error = SystemError::new(ErrorKind::Timeout, Some(""));
        assert_eq!(error.message(), "Operation timed out.");
    }

    #[test]
    fn test_options_are_applied() {
        let inner: SharedError = Arc::new(SystemError::new(ErrorKind::System, Some("inner error")));
        let mut data = Map::new();
        data.insert("foo".into(), json!("bar"));

        let error = SystemError::with_options(
            ErrorKind::System,
            Some("test error"),
            ErrorOptions::new()
                .shared_inner_error(inner.clone())
                .data(data.clone())
                .link("https://example.com"),
        );

        assert!(Arc::ptr_eq(error.inner_error().unwrap(), &inner));
        assert_eq!(error.data(), &data);
        assert_eq!(error.link(), Some("https://example.com"));
        assert_eq!(error.source().unwrap().to_string(), "inner error");
    }

    #[test]
    fn test_stack_trace_starts_at_construction_site() {
        let error = SystemError::new(ErrorKind::System, Some("test error"));
        let frames = error.stack_trace();
        assert!(!frames.is_empty());
        assert!(frames[0].contains(file!()), "unexpected frame {}", frames[0]);
        assert!(error.stack().unwrap().starts_with("SystemError: test error\n"));
    }

    #[test]
    fn test_set_stack_invalidates_cache() {
        let mut error = SystemError::new(ErrorKind::System, Some("test error"));
        assert!(!error.stack_trace().is_empty());

        error.set_stack(Some("SystemError: x\n    at one.rs:1:1\n    at two.rs:2:2".into()));
        assert_eq!(error.stack_trace(), ["at one.rs:1:1", "at two.rs:2:2"]);

        error.set_stack(None);
        assert!(error.stack_trace().is_empty());
    }

    #[test]
    fn test_set_stack_trace_regenerates_stack() {
        let mut error = SystemError::new(ErrorKind::System, Some("test error"));
        error.set_stack_trace(vec!["at a.rs:1:1".into(), "at b.rs:2:2".into()]);
        assert_eq!(error.stack(), Some("at a.rs:1:1\nat b.rs:2:2"));
        assert_eq!(error.stack_trace(), ["at a.rs:1:1", "at b.rs:2:2"]);
    }

    #[test]
    fn test_set_from_json_never_changes_name() {
        let mut error = SystemError::new(ErrorKind::Argument, None);
        error.set(ErrorProps::from_json(&json!({
            "name": "X",
            "stack": "at nowhere",
            "message": "Y",
            "data": { "a": 1 },
            "unknown": true,
        })));

        assert_eq!(error.name(), "ArgumentError");
        assert_eq!(error.message(), "Y");
        assert_eq!(error.data().get("a"), Some(&json!(1)));
        assert_ne!(error.stack(), Some("at nowhere"));
    }

    #[test]
    fn test_set_skips_fields_the_kind_does_not_carry() {
        let mut error = SystemError::new(ErrorKind::Timeout, None);
        error.set(ErrorProps::new().parameter_name("p").value(3).code(5));
        assert_eq!(error.parameter_name(), None);
        assert_eq!(error.value(), None);
        assert_eq!(error.code(), None);

        let mut range = SystemError::new(ErrorKind::ArgumentRange, None);
        range.set(ErrorProps::new().parameter_name("p").value(3));
        assert_eq!(range.parameter_name(), Some("p"));
        assert_eq!(range.value(), Some(&json!(3)));
    }

    #[test]
    fn test_win32_kind_always_links_to_docs() {
        let plain = SystemError::new(ErrorKind::Win32, None);
        assert_eq!(plain.link(), Some(WIN32_DOCS));

        let overridden = SystemError::with_options(
            ErrorKind::Win32,
            Some("access denied"),
            ErrorOptions::new().link("https://example.com/help"),
        );
        assert_eq!(overridden.link(), Some(WIN32_DOCS));
        assert_eq!(overridden.message(), "access denied");

        let timeout = SystemError::with_options(
            ErrorKind::Timeout,
            None,
            ErrorOptions::new().link("https://example.com/help"),
        );
        assert_eq!(timeout.link(), Some("https://example.com/help"));
    }

    #[test]
    fn test_try_from_json_rejects_non_objects() {
        assert_eq!(
            ErrorProps::try_from_json(&json!([1, 2])).unwrap_err(),
            PropsError::NotAnObject("array")
        );
        assert!(ErrorProps::from_json(&json!("text")).message.is_none());
    }

    #[test]
    fn test_cause_value_is_not_a_source() {
        let error = SystemError::with_options(
            ErrorKind::System,
            Some("test error"),
            ErrorOptions::new().cause(json!("disk full")),
        );
        assert!(error.source().is_none());
        assert_eq!(error.cause().unwrap().to_string(), "disk full");
    }
}
