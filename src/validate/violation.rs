//! The violation type reported by the validator.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One step in a path from the document root to a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key.
    Key(String),
    /// An array index.
    Index(usize),
}

/// Location of a value inside a manifest document.
///
/// Displays in a dotted form (`peerDependenciesMeta.react.optional`), with
/// keys that are not plain identifiers bracketed and quoted
/// (`exports["./feature"].import`) and indices bracketed (`contributors[1]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with an object key appended.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// Returns a new path with an array index appended.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The top-level key this path starts with, if any.
    pub fn top_level_key(&self) -> Option<&str> {
        match self.segments.first() {
            Some(PathSegment::Key(key)) => Some(key),
            _ => None,
        }
    }

    /// Renders the path as an RFC 6901 JSON Pointer.
    pub fn to_pointer(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Key(key) => format!("/{}", key.replace('~', "~0").replace('/', "~1")),
                PathSegment::Index(index) => format!("/{index}"),
            })
            .collect()
    }
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if is_plain_key(key) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{key}")?;
                }
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Why a value failed to conform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReason {
    /// A required field is absent.
    Missing,
    /// The value does not match the declared shape.
    Mismatch,
    /// The key is not recognized by a closed record.
    Unrecognized,
}

impl ViolationReason {
    pub fn label(&self) -> &'static str {
        match self {
            ViolationReason::Missing => "missing",
            ViolationReason::Mismatch => "mismatch",
            ViolationReason::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A field that does not conform to its declared shape.
///
/// `actual` is `None` when the field is missing altogether.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{path}: expected {expected}, found {}", describe_actual(.actual))]
pub struct ShapeViolation {
    pub path: FieldPath,
    pub expected: String,
    pub actual: Option<Value>,
    pub reason: ViolationReason,
}

impl ShapeViolation {
    pub fn missing(path: FieldPath, expected: impl Into<String>) -> Self {
        Self {
            path,
            expected: expected.into(),
            actual: None,
            reason: ViolationReason::Missing,
        }
    }

    pub fn mismatch(path: FieldPath, expected: impl Into<String>, actual: &Value) -> Self {
        Self {
            path,
            expected: expected.into(),
            actual: Some(actual.clone()),
            reason: ViolationReason::Mismatch,
        }
    }

    pub fn unrecognized(path: FieldPath, actual: &Value) -> Self {
        Self {
            path,
            expected: "no such field".to_string(),
            actual: Some(actual.clone()),
            reason: ViolationReason::Unrecognized,
        }
    }
}

/// Short rendering of a found value for messages.
///
/// Strings and scalars are printed in JSON form, containers by kind and
/// size so a large object does not flood the message.
pub fn describe_actual(actual: &Option<Value>) -> String {
    match actual {
        None => "nothing".to_string(),
        Some(Value::Array(items)) => format!("sequence of {} item(s)", items.len()),
        Some(Value::Object(map)) => format!("record with {} key(s)", map.len()),
        Some(Value::String(s)) if s.chars().count() > 60 => {
            let head: String = s.chars().take(57).collect();
            format!("\"{head}...\"")
        }
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_display() {
        let path = FieldPath::root().key("peerDependenciesMeta").key("react").key("optional");
        assert_eq!(path.to_string(), "peerDependenciesMeta.react.optional");

        let path = FieldPath::root().key("exports").key("./feature").key("import");
        assert_eq!(path.to_string(), "exports[\"./feature\"].import");

        let path = FieldPath::root().key("contributors").index(1).key("name");
        assert_eq!(path.to_string(), "contributors[1].name");

        let path = FieldPath::root().key("dependencies").key("@scope/pkg");
        assert_eq!(path.to_string(), "dependencies[\"@scope/pkg\"]");

        assert_eq!(FieldPath::root().to_string(), "(root)");
    }

    #[test]
    fn test_path_pointer() {
        let path = FieldPath::root().key("exports").key("./a~b").index(0);
        assert_eq!(path.to_pointer(), "/exports/.~1a~0b/0");
        assert_eq!(FieldPath::root().to_pointer(), "");
    }

    #[test]
    fn test_top_level_key() {
        let path = FieldPath::root().key("engines").key("node");
        assert_eq!(path.top_level_key(), Some("engines"));
        assert!(FieldPath::root().top_level_key().is_none());
    }

    #[test]
    fn test_violation_display() {
        let missing = ShapeViolation::missing(FieldPath::root().key("name"), "string");
        assert_eq!(missing.to_string(), "name: expected string, found nothing");

        let mismatch =
            ShapeViolation::mismatch(FieldPath::root().key("private"), "boolean | string", &json!(1));
        assert_eq!(mismatch.to_string(), "private: expected boolean | string, found 1");
        assert_eq!(mismatch.reason, ViolationReason::Mismatch);
    }

    #[test]
    fn test_describe_actual_containers() {
        assert_eq!(describe_actual(&Some(json!([1, 2]))), "sequence of 2 item(s)");
        assert_eq!(describe_actual(&Some(json!({"a": 1}))), "record with 1 key(s)");
        assert_eq!(describe_actual(&Some(json!("x"))), "\"x\"");
        let long = "a".repeat(100);
        assert!(describe_actual(&Some(json!(long))).ends_with("...\""));
    }

    #[test]
    fn test_violation_serializes_path_as_string() {
        let v = ShapeViolation::unrecognized(FieldPath::root().key("dist").key("extra"), &json!(true));
        let out = serde_json::to_value(&v).unwrap();
        assert_eq!(out["path"], json!("dist.extra"));
        assert_eq!(out["reason"], json!("unrecognized"));
        assert_eq!(out["actual"], json!(true));
    }
}
