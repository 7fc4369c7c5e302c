//! pkgshape - package.json manifest schema and validator
//!
//! This crate describes the shape of a package.json manifest as data,
//! checks arbitrary JSON documents against it, and loads conforming
//! documents into a typed model.

pub mod exports;
pub mod manifest;
pub mod report;
pub mod schema;
pub mod validate;
