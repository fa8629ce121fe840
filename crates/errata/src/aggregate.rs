// Aggregate errors
// An error that bundles several children, the fan-out point of an error tree

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Cause;

const DEFAULT_MESSAGE: &str = "One or more errors occurred.";

/// An error holding an ordered list of children.
///
/// Children are usually errors, but plain values are allowed; the tree
/// utilities only descend into the error children.
#[derive(Debug, Clone)]
pub struct AggregateError {
    message: String,
    errors: Vec<Cause>,
}

impl AggregateError {
    pub fn new(errors: impl IntoIterator<Item = Cause>, message: Option<&str>) -> Self {
        Self {
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_MESSAGE)
                .to_string(),
            errors: errors.into_iter().collect(),
        }
    }

    /// Bundles errors of a single type.
    pub fn from_errors<E, I>(errors: I, message: Option<&str>) -> Self
    where
        E: StdError + Send + Sync + 'static,
        I: IntoIterator<Item = E>,
    {
        Self::new(errors.into_iter().map(Cause::error), message)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &[Cause] {
        &self.errors
    }

    pub fn push<E>(&mut self, error: E)
    where
        E: StdError + Send + Sync + 'static,
    {
        self.errors.push(Cause::Error(Arc::new(error)));
    }

    pub fn push_value(&mut self, value: Value) {
        self.errors.push(Cause::Value(value));
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for AggregateError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, SystemError};
    use serde_json::json;

    #[test]
    fn test_default_message() {
        let aggregate = AggregateError::new(Vec::new(), None);
        assert_eq!(aggregate.to_string(), DEFAULT_MESSAGE);
        assert!(aggregate.is_empty());
    }

    #[test]
    fn test_push_keeps_order() {
        let mut aggregate = AggregateError::from_errors(
            [SystemError::new(ErrorKind::System, Some("c1"))],
            Some("batch failed"),
        );
        aggregate.push_value(json!(42));
        aggregate.push(SystemError::new(ErrorKind::System, Some("c2")));

        let rendered: Vec<String> = aggregate.errors().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["c1", "42", "c2"]);
        assert_eq!(aggregate.len(), 3);
    }
}
