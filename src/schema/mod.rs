//! Schema module for pkgshape.
//!
//! This module holds the static description of a package.json document:
//! which top-level keys are recognized, which are required, and what shape
//! each value must have.
//!
//! # Shapes
//!
//! - **Scalars** - string, boolean, number, null
//! - **Sequences** - arrays of a single item shape
//! - **Records** - objects with known fields, either closed (unknown keys are
//!   violations) or open (unknown keys are checked against an extra shape)
//! - **Unions** - alternatives, e.g. a person is a string or a record
//! - **Refs** - named definitions, used for the recursive `exports` union
//!
//! # Example
//!
//! ```
//! use pkgshape::schema::Schema;
//!
//! let schema = Schema::manifest();
//! assert!(schema.is_recognized("peerDependenciesMeta"));
//!
//! let engines = schema.field("engines").unwrap();
//! println!("engines: {}", engines.shape);
//! ```

pub mod json_schema;
pub mod manifest;
pub mod shape;

pub use json_schema::shape_to_json;
pub use manifest::{Schema, EXPORTS, KNOWN_CONDITIONS, LIFECYCLE_SCRIPTS, PERSON, TOOL_BLOCKS};
pub use shape::{Additional, Field, RecordShape, Shape};
