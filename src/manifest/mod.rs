//! Typed package.json model.
//!
//! This module mirrors the descriptor's field table as Rust types so that
//! conforming documents can be read and built with compile-time checked
//! field names, and provides helpers for loading manifests and flattening
//! their dependency maps.
//!
//! # Example
//!
//! ```
//! use pkgshape::manifest::{extract_dependencies, parse_str, DependencyType};
//!
//! let pkg = parse_str(r#"{
//!     "name": "my-app",
//!     "version": "1.0.0",
//!     "dependencies": {"react": "^18.0.0", "local-lib": "file:../lib"}
//! }"#).unwrap();
//!
//! let deps = extract_dependencies(&pkg);
//! let prod: Vec<_> = deps.iter()
//!     .filter(|d| d.dep_type == DependencyType::Production)
//!     .map(|d| (d.name.as_str(), d.spec().kind()))
//!     .collect();
//!
//! assert_eq!(prod, vec![("react", "range"), ("local-lib", "local")]);
//! ```

pub mod package_json;
mod person;
pub mod range;
pub mod types;

// Re-export commonly used types for convenience
pub use package_json::{
    extract_dependencies, extract_production_dependencies, group_by_type, parse_file, parse_str,
    parse_value, read_document, ParseError, ParseResult,
};
pub use range::RangeSpec;
pub use types::{
    Bin, Bugs, BundledDependencies, Dependency, DependencyType, Directories, Dist, Engines,
    Esnext, EsnextEntries, Funding, FundingRecord, PackageJson, PeerDependencyMeta, Person,
    PersonRecord, Private, PublishConfig, Repository, RepositoryRecord, Workspaces,
    WorkspacesConfig,
};
