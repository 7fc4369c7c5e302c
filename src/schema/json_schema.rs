//! JSON Schema rendering of the descriptor.
//!
//! Editors and generic validators understand JSON Schema, so the descriptor
//! can be exported as a draft-07 document. Named definitions become entries
//! under `definitions` and [`Shape::Ref`] becomes a `$ref`.

use serde_json::{json, Map, Value};

use super::manifest::Schema;
use super::shape::{Additional, RecordShape, Shape};

const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

impl Schema {
    /// Renders the descriptor as a JSON Schema (draft-07) document.
    ///
    /// # Example
    ///
    /// ```
    /// use pkgshape::schema::Schema;
    ///
    /// let doc = Schema::manifest().to_json_schema();
    /// assert_eq!(doc["required"], serde_json::json!(["name", "version"]));
    /// ```
    pub fn to_json_schema(&self) -> Value {
        let mut doc = match record_to_json(self.root()) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let definitions: Map<String, Value> = self
            .definitions()
            .iter()
            .map(|(name, shape)| ((*name).to_string(), shape_to_json(shape)))
            .collect();

        let mut header = Map::new();
        header.insert("$schema".to_string(), json!(DRAFT_07));
        header.insert("title".to_string(), json!("package.json"));
        header.append(&mut doc);
        header.insert("definitions".to_string(), Value::Object(definitions));
        Value::Object(header)
    }
}

/// Renders a single shape as a JSON Schema fragment.
pub fn shape_to_json(shape: &Shape) -> Value {
    match shape {
        Shape::Any => json!({}),
        Shape::String => json!({ "type": "string" }),
        Shape::Boolean => json!({ "type": "boolean" }),
        Shape::Number => json!({ "type": "number" }),
        Shape::Null => json!({ "type": "null" }),
        Shape::Array(item) => json!({ "type": "array", "items": shape_to_json(item) }),
        Shape::Record(record) => record_to_json(record),
        Shape::Union(members) => {
            json!({ "anyOf": members.iter().map(shape_to_json).collect::<Vec<_>>() })
        }
        Shape::Ref(name) => json!({ "$ref": format!("#/definitions/{name}") }),
    }
}

fn record_to_json(record: &RecordShape) -> Value {
    let mut out = Map::new();
    out.insert("type".to_string(), json!("object"));

    if !record.fields.is_empty() {
        let properties: Map<String, Value> = record
            .fields
            .iter()
            .map(|field| {
                let mut fragment = shape_to_json(&field.shape);
                if !field.summary.is_empty() {
                    if let Value::Object(ref mut map) = fragment {
                        map.insert("description".to_string(), json!(field.summary));
                    }
                }
                (field.name.to_string(), fragment)
            })
            .collect();
        out.insert("properties".to_string(), Value::Object(properties));
    }

    let required: Vec<&str> = record.required_fields().map(|f| f.name).collect();
    if !required.is_empty() {
        out.insert("required".to_string(), json!(required));
    }

    match &record.additional {
        Additional::Deny => {
            out.insert("additionalProperties".to_string(), json!(false));
        }
        Additional::Allow(extra) if **extra == Shape::Any => {}
        Additional::Allow(extra) => {
            out.insert("additionalProperties".to_string(), shape_to_json(extra));
        }
    }

    Value::Object(out)
}
