//! Loading package.json files into the typed model.
//!
//! Documents are validated against the descriptor before typed
//! deserialization, so a malformed manifest is reported with every violation
//! at once instead of the first serde error.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::types::{Dependency, DependencyType, PackageJson};
use crate::validate::{ShapeViolation, ValidationOptions, Validator};

/// Errors that can occur while loading a package.json.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The content is not JSON, or did not fit the typed model.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The document does not conform to the manifest descriptor.
    #[error("Invalid package.json: {} violation(s), first: {}", .0.len(), first_violation(.0))]
    InvalidPackage(Vec<ShapeViolation>),
}

fn first_violation(violations: &[ShapeViolation]) -> String {
    violations
        .first()
        .map_or_else(|| "none".to_string(), ToString::to_string)
}

impl ParseError {
    /// The violations behind an `InvalidPackage` error.
    pub fn violations(&self) -> &[ShapeViolation] {
        match self {
            ParseError::InvalidPackage(violations) => violations.as_slice(),
            _ => &[],
        }
    }
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Reads a file as a raw JSON document without validating it.
pub fn read_document(path: &Path) -> ParseResult<Value> {
    let content = fs::read_to_string(path)?;
    let document = serde_json::from_str(&content)?;
    debug!(path = %path.display(), "read manifest document");
    Ok(document)
}

/// Validates a raw document and converts it into the typed model.
pub fn parse_value(document: Value, options: ValidationOptions) -> ParseResult<PackageJson> {
    let violations = Validator::new(options).validate(&document);
    if !violations.is_empty() {
        return Err(ParseError::InvalidPackage(violations));
    }
    Ok(serde_json::from_value(document)?)
}

/// Parses a package.json file from a file path.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use pkgshape::manifest::parse_file;
///
/// let pkg = parse_file(Path::new("package.json")).unwrap();
/// println!("Package: {}", pkg.name);
/// ```
pub fn parse_file(path: &Path) -> ParseResult<PackageJson> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a package.json from a string.
///
/// # Example
///
/// ```
/// use pkgshape::manifest::parse_str;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg = parse_str(json).unwrap();
/// assert_eq!(pkg.name, "my-app");
///
/// let err = parse_str(r#"{"name": "my-app"}"#).unwrap_err();
/// assert_eq!(err.violations().len(), 1);
/// ```
pub fn parse_str(content: &str) -> ParseResult<PackageJson> {
    let document: Value = serde_json::from_str(content)?;
    parse_value(document, ValidationOptions::default())
}

/// Extracts all dependencies from a PackageJson into a normalized list.
///
/// Dependencies come out grouped by type in manifest field order, each group
/// in document order.
///
/// # Example
///
/// ```
/// use pkgshape::manifest::{parse_str, extract_dependencies, DependencyType};
///
/// let json = r#"{
///     "name": "my-app",
///     "version": "1.0.0",
///     "dependencies": {"react": "^18.0.0"},
///     "devDependencies": {"typescript": "^5.0.0"}
/// }"#;
///
/// let pkg = parse_str(json).unwrap();
/// let deps = extract_dependencies(&pkg);
///
/// assert_eq!(deps.len(), 2);
/// assert!(deps.iter().any(|d| d.name == "react" && d.dep_type == DependencyType::Production));
/// assert!(deps.iter().any(|d| d.name == "typescript" && d.dep_type == DependencyType::Development));
/// ```
pub fn extract_dependencies(pkg: &PackageJson) -> Vec<Dependency> {
    DependencyType::ALL
        .iter()
        .filter_map(|dep_type| pkg.dependency_map(*dep_type).map(|map| (dep_type, map)))
        .flat_map(|(dep_type, map)| {
            map.iter()
                .map(move |(name, version)| Dependency::new(name, version, *dep_type))
        })
        .collect()
}

/// Extracts only production dependencies from a PackageJson.
pub fn extract_production_dependencies(pkg: &PackageJson) -> Vec<Dependency> {
    extract_dependencies(pkg)
        .into_iter()
        .filter(|d| d.dep_type == DependencyType::Production)
        .collect()
}

/// Groups dependencies by their type.
///
/// # Returns
///
/// A tuple of four vectors: (production, development, peer, optional)
pub fn group_by_type(
    deps: &[Dependency],
) -> (
    Vec<&Dependency>,
    Vec<&Dependency>,
    Vec<&Dependency>,
    Vec<&Dependency>,
) {
    let mut prod = Vec::new();
    let mut dev = Vec::new();
    let mut peer = Vec::new();
    let mut optional = Vec::new();

    for dep in deps {
        match dep.dep_type {
            DependencyType::Production => prod.push(dep),
            DependencyType::Development => dev.push(dep),
            DependencyType::Peer => peer.push(dep),
            DependencyType::Optional => optional.push(dep),
        }
    }

    (prod, dev, peer, optional)
}
