// Serializable error snapshots

use std::error::Error as StdError;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::aggregate::AggregateError;
use crate::error::{Cause, SystemError};

/// A serializable snapshot of an error and the errors behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stack_trace: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_error: Option<Box<ErrorReport>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorReport>,
}

impl ErrorReport {
    fn bare(name: &str, message: String) -> Self {
        ErrorReport {
            name: name.to_string(),
            message,
            link: None,
            data: Map::new(),
            parameter_name: None,
            value: None,
            code: None,
            stack_trace: Vec::new(),
            inner_error: None,
            cause: None,
            errors: Vec::new(),
        }
    }

    /// Snapshots `e`. Errors this crate does not know are reported under
    /// the name `"Error"` with their `source()` chain as inner errors.
    pub fn from_error(e: &(dyn StdError + 'static)) -> Self {
        if let Some(error) = e.downcast_ref::<SystemError>() {
            return Self::from_system_error(error);
        }
        if let Some(aggregate) = e.downcast_ref::<AggregateError>() {
            let mut report = Self::bare("AggregateError", aggregate.message().to_string());
            report.errors = aggregate
                .errors()
                .iter()
                .filter_map(Cause::as_error)
                .map(Self::from_error)
                .collect();
            return report;
        }

        let mut report = Self::bare("Error", e.to_string());
        report.inner_error = e.source().map(|source| Box::new(Self::from_error(source)));
        report
    }

    fn from_system_error(error: &SystemError) -> Self {
        let mut report = Self::bare(error.name(), error.message().to_string());
        report.link = error.link().map(str::to_string);
        report.data = error.data().clone();
        report.parameter_name = error.parameter_name().map(str::to_string);
        report.value = error.value().cloned();
        report.code = error.code();
        report.stack_trace = error.stack_trace().to_vec();
        report.inner_error = error
            .inner_error()
            .map(|inner| Box::new(Self::from_error(&**inner)));
        report.cause = error.cause().map(|cause| match cause {
            Cause::Value(value) => value.clone(),
            Cause::Error(cause) => serde_json::to_value(Self::from_error(&**cause))
                .unwrap_or_else(|_| Value::String(cause.to_string())),
        });
        report
    }
}
