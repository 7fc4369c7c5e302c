//! Structural matching of a JSON document against the descriptor.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::options::ValidationOptions;
use super::violation::{FieldPath, ShapeViolation};
use crate::schema::{Additional, RecordShape, Schema, Shape};

/// Checks documents against a [`Schema`].
///
/// A validator holds no mutable state, so one instance can be shared across
/// threads and reused for any number of documents.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'s> {
    schema: &'s Schema,
    options: ValidationOptions,
}

impl Validator<'static> {
    /// A validator for the package.json descriptor.
    pub fn new(options: ValidationOptions) -> Self {
        Self::with_schema(Schema::manifest(), options)
    }
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self::new(ValidationOptions::default())
    }
}

impl<'s> Validator<'s> {
    /// A validator for an arbitrary descriptor.
    pub fn with_schema(schema: &'s Schema, options: ValidationOptions) -> Self {
        Self { schema, options }
    }

    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    /// Collects every violation in `document`. An empty list means the
    /// document conforms.
    pub fn validate(&self, document: &Value) -> Vec<ShapeViolation> {
        let mut violations = Vec::new();
        let root = FieldPath::root();

        match document.as_object() {
            Some(map) => {
                self.check_record(self.schema.root(), map, &root, true, &mut violations);
                if self.options.check_semver {
                    self.check_semver(map, &mut violations);
                }
            }
            None => violations.push(ShapeViolation::mismatch(root, "record", document)),
        }

        debug!(violations = violations.len(), "validated manifest document");
        violations
    }

    /// Returns true if `value` matches `shape` without collecting details.
    pub fn conforms(&self, shape: &Shape, value: &Value) -> bool {
        match self.schema.resolve(shape) {
            Shape::Any => true,
            Shape::String => value.is_string(),
            Shape::Boolean => value.is_boolean(),
            Shape::Number => value.is_number(),
            Shape::Null => value.is_null(),
            Shape::Array(item) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|v| self.conforms(item, v))),
            Shape::Record(record) => value
                .as_object()
                .is_some_and(|map| self.record_conforms(record, map)),
            Shape::Union(members) => members.iter().any(|m| self.conforms(m, value)),
            Shape::Ref(_) => true,
        }
    }

    fn record_conforms(&self, record: &RecordShape, map: &Map<String, Value>) -> bool {
        if record.required_fields().any(|f| !map.contains_key(f.name)) {
            return false;
        }
        map.iter().all(|(key, value)| match record.field(key) {
            Some(field) => self.conforms(&field.shape, value),
            None => match &record.additional {
                Additional::Deny => false,
                Additional::Allow(extra) => self.conforms(extra, value),
            },
        })
    }

    fn check(&self, shape: &Shape, value: &Value, path: &FieldPath, out: &mut Vec<ShapeViolation>) {
        let shape = self.schema.resolve(shape);
        match shape {
            Shape::Any | Shape::Ref(_) => {}
            Shape::String | Shape::Boolean | Shape::Number | Shape::Null => {
                if !shape.admits_kind(value) {
                    out.push(ShapeViolation::mismatch(path.clone(), shape.describe(), value));
                }
            }
            Shape::Array(item) => match value.as_array() {
                Some(items) => {
                    for (i, entry) in items.iter().enumerate() {
                        self.check(item, entry, &path.index(i), out);
                    }
                }
                None => out.push(ShapeViolation::mismatch(path.clone(), shape.describe(), value)),
            },
            Shape::Record(record) => match value.as_object() {
                Some(map) => self.check_record(record, map, path, false, out),
                None => out.push(ShapeViolation::mismatch(path.clone(), shape.describe(), value)),
            },
            Shape::Union(members) => self.check_union(shape, members, value, path, out),
        }
    }

    /// A union passes if any member matches. Otherwise, when exactly one
    /// member accepts the value's JSON kind, the value is checked against that
    /// member so nested problems surface at their own paths.
    fn check_union(
        &self,
        union: &Shape,
        members: &[Shape],
        value: &Value,
        path: &FieldPath,
        out: &mut Vec<ShapeViolation>,
    ) {
        if members.iter().any(|m| self.conforms(m, value)) {
            return;
        }

        let candidates: Vec<&Shape> = members
            .iter()
            .filter(|m| self.schema.resolve(m).admits_kind(value))
            .collect();

        trace!(%path, candidates = candidates.len(), "union did not match");
        match candidates.as_slice() {
            [only] => self.check(only, value, path, out),
            _ => out.push(ShapeViolation::mismatch(path.clone(), union.describe(), value)),
        }
    }

    fn check_record(
        &self,
        record: &RecordShape,
        map: &Map<String, Value>,
        path: &FieldPath,
        top_level: bool,
        out: &mut Vec<ShapeViolation>,
    ) {
        for field in record.required_fields() {
            if !map.contains_key(field.name) {
                out.push(ShapeViolation::missing(path.key(field.name), field.shape.describe()));
            }
        }

        for (key, value) in map {
            let child = path.key(key.as_str());
            if let Some(field) = record.field(key) {
                self.check(&field.shape, value, &child, out);
                continue;
            }
            match &record.additional {
                Additional::Deny => out.push(ShapeViolation::unrecognized(child, value)),
                Additional::Allow(_) if top_level && self.options.strict_top_level => {
                    out.push(ShapeViolation::unrecognized(child, value));
                }
                Additional::Allow(extra) => self.check(extra, value, &child, out),
            }
        }
    }

    fn check_semver(&self, map: &Map<String, Value>, out: &mut Vec<ShapeViolation>) {
        let Some(value) = map.get("version") else {
            return;
        };
        let Some(version) = value.as_str() else {
            return;
        };
        if let Err(err) = semver::Version::parse(version) {
            debug!(%version, error = %err, "version is not a semantic version");
            out.push(ShapeViolation::mismatch(
                FieldPath::root().key("version"),
                "semantic version",
                value,
            ));
        }
    }
}
