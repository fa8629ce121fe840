// Traits used by the guard helpers

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use serde_json::Value;

/// Values that have a length, so an empty one can be rejected the same
/// way for strings and sequences.
pub trait HasLength {
    fn length(&self) -> usize;

    /// Whether the guards should reject the value as empty.
    fn is_empty_value(&self) -> bool {
        self.length() == 0
    }
}

impl HasLength for str {
    fn length(&self) -> usize {
        self.len()
    }
}

impl HasLength for String {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> HasLength for [T] {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> HasLength for [T; N] {
    fn length(&self) -> usize {
        N
    }
}

impl<T> HasLength for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> HasLength for VecDeque<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> HasLength for HashMap<K, V, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V> HasLength for BTreeMap<K, V> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T, S> HasLength for HashSet<T, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> HasLength for BTreeSet<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

// Scalars have no length. Only `null` and empty strings, arrays and objects
// are empty.
impl HasLength for Value {
    fn length(&self) -> usize {
        match self {
            Value::String(s) => s.len(),
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            Value::Null | Value::Bool(_) | Value::Number(_) => 0,
        }
    }

    fn is_empty_value(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(_) | Value::Number(_) => false,
            _ => self.length() == 0,
        }
    }
}

impl<T: HasLength + ?Sized> HasLength for &T {
    fn length(&self) -> usize {
        (**self).length()
    }

    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: HasLength + ?Sized> HasLength for Box<T> {
    fn length(&self) -> usize {
        (**self).length()
    }

    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lengths() {
        assert_eq!("".length(), 0);
        assert_eq!("abc".to_string().length(), 3);
        assert_eq!(Vec::<u8>::new().length(), 0);
        assert_eq!([1, 2].length(), 2);
        assert_eq!((&[1, 2, 3][..]).length(), 3);
        assert_eq!(json!(null).length(), 0);
        assert_eq!(json!([1]).length(), 1);
    }

    #[test]
    fn test_json_scalars_are_not_empty() {
        assert!(json!(null).is_empty_value());
        assert!(json!("").is_empty_value());
        assert!(json!({}).is_empty_value());
        assert!(!json!(0).is_empty_value());
        assert!(!json!(false).is_empty_value());
        assert!(!(&json!(5)).is_empty_value());
        assert!("".is_empty_value());
    }
}
