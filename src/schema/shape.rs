//! Building blocks of the manifest descriptor.
//!
//! A [`Shape`] is a static description of what a JSON value may look like.
//! Shapes nest: records hold fields whose shapes are themselves shapes, and
//! unions list alternatives. Recursive structures (the `exports` field) are
//! expressed through [`Shape::Ref`], which names an entry in the schema's
//! definition table.

use serde_json::Value;
use std::fmt;

/// A structural description of a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Any JSON value, including `null`.
    Any,
    /// A JSON string.
    String,
    /// A JSON boolean.
    Boolean,
    /// A JSON number.
    Number,
    /// The JSON `null` literal.
    Null,
    /// A JSON array whose items all match the inner shape.
    Array(Box<Shape>),
    /// A JSON object with known fields and a policy for the rest.
    Record(RecordShape),
    /// A value matching at least one of the alternatives.
    Union(Vec<Shape>),
    /// A named definition, looked up in the owning schema.
    Ref(&'static str),
}

impl Shape {
    /// Shorthand for `Shape::Array(Box::new(item))`.
    pub fn array(item: Shape) -> Self {
        Shape::Array(Box::new(item))
    }

    /// Shorthand for a sequence of strings, the most common array shape.
    pub fn strings() -> Self {
        Shape::array(Shape::String)
    }

    /// An object whose contents are not inspected.
    pub fn opaque_record() -> Self {
        Shape::Record(RecordShape::open(Vec::new(), Shape::Any))
    }

    /// An object mapping arbitrary keys to values of one shape.
    pub fn map_of(value: Shape) -> Self {
        Shape::Record(RecordShape::open(Vec::new(), value))
    }

    /// Returns true if the JSON kind of `value` could possibly match this shape.
    ///
    /// This is a shallow check used to narrow unions: it looks at the value's
    /// type only, never at its contents. `Ref` always answers true because the
    /// definition is not reachable from here.
    pub fn admits_kind(&self, value: &Value) -> bool {
        match self {
            Shape::Any | Shape::Ref(_) => true,
            Shape::String => value.is_string(),
            Shape::Boolean => value.is_boolean(),
            Shape::Number => value.is_number(),
            Shape::Null => value.is_null(),
            Shape::Array(_) => value.is_array(),
            Shape::Record(_) => value.is_object(),
            Shape::Union(members) => members.iter().any(|m| m.admits_kind(value)),
        }
    }

    /// Human-readable description of the expected shape.
    pub fn describe(&self) -> String {
        match self {
            Shape::Any => "any value".to_string(),
            Shape::String => "string".to_string(),
            Shape::Boolean => "boolean".to_string(),
            Shape::Number => "number".to_string(),
            Shape::Null => "null".to_string(),
            Shape::Array(item) => format!("sequence of {}", item.describe_nested()),
            Shape::Record(record) => record.describe(),
            Shape::Union(members) => members
                .iter()
                .map(Shape::describe_nested)
                .collect::<Vec<_>>()
                .join(" | "),
            Shape::Ref(name) => (*name).to_string(),
        }
    }

    fn describe_nested(&self) -> String {
        match self {
            Shape::Union(_) => format!("({})", self.describe()),
            _ => self.describe(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// What a record does with keys it does not list.
#[derive(Debug, Clone, PartialEq)]
pub enum Additional {
    /// Unlisted keys are violations.
    Deny,
    /// Unlisted keys are permitted; their values must match the shape.
    Allow(Box<Shape>),
}

/// A single named entry of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The JSON key.
    pub name: &'static str,
    /// Shape of the value stored under the key.
    pub shape: Shape,
    /// Whether the key must be present.
    pub required: bool,
    /// One-line description, surfaced in the JSON Schema rendering.
    pub summary: &'static str,
}

impl Field {
    /// An optional field.
    pub fn optional(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            required: false,
            summary: "",
        }
    }

    /// A required field.
    pub fn required(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            required: true,
            summary: "",
        }
    }

    /// Attaches a description to the field.
    pub fn with_summary(mut self, summary: &'static str) -> Self {
        self.summary = summary;
        self
    }
}

/// The shape of a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
    /// Recognized keys, in declaration order.
    pub fields: Vec<Field>,
    /// Policy for keys not listed in `fields`.
    pub additional: Additional,
}

impl RecordShape {
    /// A record that rejects unlisted keys.
    pub fn closed(fields: Vec<Field>) -> Self {
        Self {
            fields,
            additional: Additional::Deny,
        }
    }

    /// A record that accepts unlisted keys whose values match `extra`.
    pub fn open(fields: Vec<Field>, extra: Shape) -> Self {
        Self {
            fields,
            additional: Additional::Allow(Box::new(extra)),
        }
    }

    /// Looks up a recognized field by key.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterates over the required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Returns true if unlisted keys are permitted.
    pub fn is_open(&self) -> bool {
        matches!(self.additional, Additional::Allow(_))
    }

    fn describe(&self) -> String {
        if self.fields.is_empty() {
            return match &self.additional {
                Additional::Allow(extra) if **extra == Shape::Any => "record".to_string(),
                Additional::Allow(extra) => format!("record of {}", extra.describe_nested()),
                Additional::Deny => "empty record".to_string(),
            };
        }

        let mut keys: Vec<String> = self
            .fields
            .iter()
            .map(|f| {
                if f.required {
                    f.name.to_string()
                } else {
                    format!("{}?", f.name)
                }
            })
            .collect();
        if self.is_open() {
            keys.push("...".to_string());
        }
        format!("record{{{}}}", keys.join(", "))
    }
}
