//! Field-level validation accumulator.
//!
//! A [`Validator`] collects `field -> message` pairs without short-circuiting,
//! so every problem with an input can be reported in one response. Only the
//! first message recorded for a field is kept.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Collected validation failures keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, msg)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {msg}")?;
        }
        Ok(())
    }
}

/// Accumulates field violations for a single input.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no violation has been recorded.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` for `field` unless the field already has one.
    pub fn add_error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.0.entry(field).or_insert_with(|| message.into());
    }

    /// Record `message` for `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &'static str, message: impl Into<String>) {
        if !ok {
            self.add_error(field, message);
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Convert the collected state into a `Result`.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.valid() {
            Ok(())
        } else {
            Err(CoreError::Validation(self.errors))
        }
    }
}

/// Whether `value` is one of `permitted`.
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

/// Whether every element of `values` is distinct.
pub fn unique<T: Eq + std::hash::Hash>(values: &[T]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(values.len());
    values.iter().all(|v| seen.insert(v))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validator_is_valid() {
        let v = Validator::new();
        assert!(v.valid());
        assert!(v.into_result().is_ok());
    }

    #[test]
    fn check_records_only_failures() {
        let mut v = Validator::new();
        v.check(true, "title", "must be provided");
        v.check(false, "genres", "must be provided");
        assert!(!v.valid());
        assert!(!v.errors().contains("title"));
        assert_eq!(v.errors().get("genres"), Some("must be provided"));
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut v = Validator::new();
        v.add_error("page", "must be greater than zero");
        v.add_error("page", "must be a maximum of 10 million");
        assert_eq!(v.errors().len(), 1);
        assert_eq!(v.errors().get("page"), Some("must be greater than zero"));
    }

    #[test]
    fn into_result_carries_all_fields() {
        let mut v = Validator::new();
        v.add_error("sort", "invalid sort value");
        v.add_error("page_size", "must be greater than zero");
        match v.into_result() {
            Err(CoreError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(
                    errors.to_string(),
                    "page_size: must be greater than zero; sort: invalid sort value"
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn field_errors_serialize_as_object() {
        let mut v = Validator::new();
        v.add_error("title", "must be provided");
        let json = serde_json::to_value(v.errors()).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "must be provided" }));
    }

    #[test]
    fn permitted_value_matches_members_only() {
        assert!(permitted_value(&"id", &["id", "-id"]));
        assert!(!permitted_value(&"name", &["id", "-id"]));
    }

    #[test]
    fn unique_detects_duplicates() {
        assert!(unique(&["Action", "Drama"]));
        assert!(!unique(&["Action", "Drama", "Action"]));
        assert!(unique::<&str>(&[]));
    }
}
