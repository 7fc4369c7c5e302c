//! Validation of raw package.json documents.
//!
//! The validator walks a `serde_json::Value` alongside the descriptor in
//! [`crate::schema`] and collects a [`ShapeViolation`] for every field that
//! does not conform. Nothing is thrown: the caller decides whether a
//! violation is a warning or a hard error.
//!
//! # Example
//!
//! ```
//! use pkgshape::validate::{validate, validate_str};
//! use serde_json::json;
//!
//! let violations = validate(&json!({"name": "x", "version": "1.0.0"}));
//! assert!(violations.is_empty());
//!
//! let violations = validate_str(r#"{"name": "x", "engines": {}}"#).unwrap();
//! let paths: Vec<_> = violations.iter().map(|v| v.path.to_string()).collect();
//! assert_eq!(paths, vec!["version", "engines.node"]);
//! ```

pub mod options;
pub mod validator;
pub mod violation;

pub use options::ValidationOptions;
pub use validator::Validator;
pub use violation::{describe_actual, FieldPath, PathSegment, ShapeViolation, ViolationReason};

use serde_json::Value;

/// Validates a document with default options.
pub fn validate(document: &Value) -> Vec<ShapeViolation> {
    Validator::default().validate(document)
}

/// Parses `content` as JSON and validates it with default options.
pub fn validate_str(content: &str) -> Result<Vec<ShapeViolation>, serde_json::Error> {
    let document: Value = serde_json::from_str(content)?;
    Ok(validate(&document))
}
