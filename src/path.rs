//! Dotted field paths - validated and parsed once, resolved many times.
//!
//! A path expression like `"a.b.c"` names a chain of field accesses off a
//! target object. Expressions are parsed into a [`FieldPath`] at watcher
//! construction; resolution walks the live object graph, registering the
//! evaluating watchers for every segment it actually traverses and giving
//! up silently at the first break.

use thiserror::Error;

use crate::observer::{make_reactive, ReactiveObject};
use crate::value::Value;

/// Rejection from [`FieldPath::parse`].
///
/// The character allowlist guards against path expressions being used as
/// injection vectors; anything outside word characters, `.`, and `$` is
/// refused outright.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("invalid character {1:?} in path expression {0:?}")]
    InvalidCharacter(String, char),
    #[error("empty segment in path expression {0:?}")]
    EmptySegment(String),
}

/// A parsed, validated sequence of field-access segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted expression. Allowed characters are ASCII word
    /// characters, `$`, and the `.` separator; segments must be non-empty.
    pub fn parse(expression: &str) -> Result<Self, PathError> {
        for c in expression.chars() {
            let allowed = c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.';
            if !allowed {
                return Err(PathError::InvalidCharacter(expression.to_string(), c));
            }
        }
        let segments: Vec<String> = expression.split('.').map(str::to_string).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(PathError::EmptySegment(expression.to_string()));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolve against `root`, reading one segment at a time.
    ///
    /// Each read through a reactive object registers the evaluating
    /// watchers for that field. The walk short-circuits to `None` as soon
    /// as a segment is missing or the current value is not an object -
    /// fields past the break are never read, so nothing deeper registers.
    ///
    /// As a side effect, a resolved object value is converted reactive in
    /// place (lazy conversion on first observation).
    pub fn resolve(&self, root: &ReactiveObject) -> Option<Value> {
        let mut current = Value::Object(root.clone());
        for segment in &self.segments {
            let object = current.as_object()?.clone();
            current = object.get(segment)?;
        }
        if let Value::Object(_) = &current {
            make_reactive(&current);
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_and_nested() {
        assert_eq!(FieldPath::parse("price").unwrap().segments(), ["price"]);
        assert_eq!(
            FieldPath::parse("a.b.c").unwrap().segments(),
            ["a", "b", "c"]
        );
        assert_eq!(
            FieldPath::parse("$data.item_2").unwrap().segments(),
            ["$data", "item_2"]
        );
    }

    #[test]
    fn test_parse_rejects_disallowed_characters() {
        assert_eq!(
            FieldPath::parse("a-b"),
            Err(PathError::InvalidCharacter("a-b".to_string(), '-'))
        );
        assert!(FieldPath::parse("a[0]").is_err());
        assert!(FieldPath::parse("a b").is_err());
        assert!(FieldPath::parse("a.b;drop").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert_eq!(
            FieldPath::parse(""),
            Err(PathError::EmptySegment(String::new()))
        );
        assert!(FieldPath::parse("a..b").is_err());
        assert!(FieldPath::parse(".a").is_err());
        assert!(FieldPath::parse("a.").is_err());
    }

    #[test]
    fn test_resolve_nested_value() {
        let inner = ReactiveObject::from_entries([("c", 2i64)]);
        let middle = ReactiveObject::from_entries([("b", inner)]);
        let root = ReactiveObject::from_entries([("a", middle)]);

        let path = FieldPath::parse("a.b.c").unwrap();
        let value = path.resolve(&root).unwrap();
        assert_eq!(value.as_number(), Some(2.0));
    }

    #[test]
    fn test_resolve_short_circuits_on_null() {
        let root = ReactiveObject::from_entries([("a", Value::Null)]);
        let path = FieldPath::parse("a.b.c").unwrap();
        assert!(path.resolve(&root).is_none());
    }

    #[test]
    fn test_resolve_short_circuits_on_missing_key() {
        let root = ReactiveObject::from_entries([("a", 1i64)]);
        assert!(FieldPath::parse("missing").unwrap().resolve(&root).is_none());
        assert!(FieldPath::parse("a.b").unwrap().resolve(&root).is_none());
    }

    #[test]
    fn test_resolve_final_null_is_a_value() {
        let root = ReactiveObject::from_entries([("a", Value::Null)]);
        let value = FieldPath::parse("a").unwrap().resolve(&root);
        assert!(matches!(value, Some(Value::Null)));
    }

    #[test]
    fn test_resolve_converts_resolved_object() {
        let child = ReactiveObject::from_entries([("x", 1i64)]);
        let root = ReactiveObject::from_entries([("a", child.clone())]);
        assert!(!child.is_reactive());

        FieldPath::parse("a").unwrap().resolve(&root);
        assert!(child.is_reactive());
    }
}
