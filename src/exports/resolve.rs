//! Consumer-side resolution of the `exports` field.
//!
//! Implements Node.js-style lookup:
//! - Root sugar: a path, fallback list, or condition map stands for `"."`
//! - Exact sub-path keys, then `*` pattern keys (most specific wins)
//! - Condition maps walked in document order; `default` always matches
//! - Fallback lists walked left to right; the first valid path or explicit
//!   `null` wins, invalid targets are skipped

use thiserror::Error;
use tracing::{debug, trace};

use super::entry::{Exports, MapKind};

/// Errors that make an exports lookup meaningless.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportsError {
    #[error("subpath must be \".\" or start with \"./\": {0}")]
    InvalidSubpath(String),

    #[error("exports object mixes sub-path keys and condition names")]
    MixedKeys,

    #[error("export target must start with \"./\": {0}")]
    InvalidTarget(String),
}

/// Result type for exports lookups.
pub type ExportsResult<T> = Result<T, ExportsError>;

/// Outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The entry resolved to a target path.
    Path(String),
    /// An explicit `null` matched: importing this entry is disallowed.
    Excluded,
    /// Nothing matched the subpath and condition set.
    Unmatched,
}

impl Resolution {
    pub fn path(&self) -> Option<&str> {
        match self {
            Resolution::Path(p) => Some(p),
            _ => None,
        }
    }
}

/// The set of active condition names.
///
/// `default` is always active and never needs to be listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    names: Vec<String>,
}

impl Conditions {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Conditions for an ES module import under Node.
    pub fn import() -> Self {
        Self::new(["node", "import"])
    }

    /// Conditions for a CommonJS require under Node.
    pub fn require() -> Self {
        Self::new(["node", "require"])
    }

    /// Adds a condition.
    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn is_active(&self, name: &str) -> bool {
        name == "default" || self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Intermediate outcome while walking targets.
#[derive(Debug)]
enum Outcome {
    Path(String),
    Excluded,
    Unmatched,
    Invalid(String),
}

/// Resolves `subpath` (`"."` or `"./..."`) against an exports value.
///
/// # Example
///
/// ```
/// use pkgshape::exports::{resolve, Conditions, Exports, Resolution};
///
/// let exports: Exports = serde_json::from_str(r#"{
///     ".": {"import": "./index.mjs", "require": "./index.cjs"},
///     "./utils/*": "./dist/utils/*.js"
/// }"#).unwrap();
///
/// assert_eq!(
///     resolve(&exports, ".", &Conditions::import()).unwrap(),
///     Resolution::Path("./index.mjs".into())
/// );
/// assert_eq!(
///     resolve(&exports, "./utils/fmt", &Conditions::require()).unwrap(),
///     Resolution::Path("./dist/utils/fmt.js".into())
/// );
/// ```
pub fn resolve(exports: &Exports, subpath: &str, conditions: &Conditions) -> ExportsResult<Resolution> {
    if subpath != "." && !subpath.starts_with("./") {
        return Err(ExportsError::InvalidSubpath(subpath.to_string()));
    }

    let kind = exports.map_kind();
    if kind == Some(MapKind::Mixed) {
        return Err(ExportsError::MixedKeys);
    }

    let outcome = match exports {
        Exports::Map(entries) if kind == Some(MapKind::Subpaths) => {
            resolve_subpath(entries, subpath, conditions)
        }
        // Anything else is sugar for {".": exports}.
        _ if subpath == "." => resolve_target(exports, None, conditions),
        _ => Outcome::Unmatched,
    };

    debug!(subpath, ?outcome, "resolved exports entry");
    match outcome {
        Outcome::Path(p) => Ok(Resolution::Path(p)),
        Outcome::Excluded => Ok(Resolution::Excluded),
        Outcome::Unmatched => Ok(Resolution::Unmatched),
        Outcome::Invalid(target) => Err(ExportsError::InvalidTarget(target)),
    }
}

fn resolve_subpath(
    entries: &indexmap::IndexMap<String, Exports>,
    subpath: &str,
    conditions: &Conditions,
) -> Outcome {
    if let Some(target) = entries.get(subpath) {
        if !subpath.contains('*') {
            return resolve_target(target, None, conditions);
        }
    }

    let mut best: Option<(&str, &Exports, &str)> = None;
    for (key, target) in entries {
        let Some(star) = match_pattern(key, subpath) else {
            continue;
        };
        let better = match best {
            None => true,
            Some((current, _, _)) => pattern_is_more_specific(key, current),
        };
        if better {
            best = Some((key, target, star));
        }
    }

    match best {
        Some((key, target, star)) => {
            trace!(pattern = key, star, "matched exports pattern");
            resolve_target(target, Some(star), conditions)
        }
        None => Outcome::Unmatched,
    }
}

/// Matches a single-`*` pattern key against a subpath, returning the text
/// captured by the star. The capture must not be empty.
fn match_pattern<'s>(pattern: &str, subpath: &'s str) -> Option<&'s str> {
    let star = pattern.find('*')?;
    if pattern[star + 1..].contains('*') {
        return None;
    }
    let (prefix, suffix) = (&pattern[..star], &pattern[star + 1..]);
    if subpath.len() < prefix.len() + suffix.len() + 1 {
        return None;
    }
    if !subpath.starts_with(prefix) || !subpath.ends_with(suffix) {
        return None;
    }
    Some(&subpath[prefix.len()..subpath.len() - suffix.len()])
}

/// Longer text before the star wins; ties go to the longer key.
fn pattern_is_more_specific(candidate: &str, current: &str) -> bool {
    let base = |k: &str| k.find('*').unwrap_or(k.len());
    match base(candidate).cmp(&base(current)) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => candidate.len() > current.len(),
    }
}

fn resolve_target(target: &Exports, star: Option<&str>, conditions: &Conditions) -> Outcome {
    match target {
        Exports::Disallowed => Outcome::Excluded,
        Exports::Path(path) => resolve_path(path, star),
        Exports::Map(entries) => {
            for (condition, value) in entries {
                if !conditions.is_active(condition) {
                    continue;
                }
                match resolve_target(value, star, conditions) {
                    Outcome::Unmatched => continue,
                    other => return other,
                }
            }
            Outcome::Unmatched
        }
        Exports::Fallback(items) => {
            let mut last_invalid = None;
            for item in items {
                match resolve_target(item, star, conditions) {
                    found @ (Outcome::Path(_) | Outcome::Excluded) => return found,
                    Outcome::Invalid(target) => last_invalid = Some(target),
                    Outcome::Unmatched => {}
                }
            }
            last_invalid.map_or(Outcome::Unmatched, Outcome::Invalid)
        }
    }
}

fn resolve_path(path: &str, star: Option<&str>) -> Outcome {
    if !path.starts_with("./") {
        return Outcome::Invalid(path.to_string());
    }
    let resolved = match star {
        Some(value) => path.replace('*', value),
        None => path.to_string(),
    };
    let escapes = resolved
        .split('/')
        .skip(1)
        .any(|segment| segment == ".." || segment == "." || segment == "node_modules");
    if escapes {
        return Outcome::Invalid(resolved);
    }
    Outcome::Path(resolved)
}
