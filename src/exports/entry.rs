//! The typed `exports` union.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value of the `exports` field, or of any entry nested inside it.
///
/// Four shapes, recursively:
///
/// ```text
/// null                         -> Disallowed
/// "./dist/index.js"            -> Path
/// ["./a.js", {"node": ...}]    -> Fallback
/// {".": ..., "./sub": ...}     -> Map (sub-paths)
/// {"import": ..., "default": } -> Map (conditions)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Exports {
    /// Explicit `null`: the entry may not be imported.
    Disallowed,
    /// A target path, normally starting with `./`.
    Path(String),
    /// Alternatives tried left to right.
    Fallback(Vec<Exports>),
    /// Sub-path keys (starting with `.`) or condition names, in document order.
    Map(IndexMap<String, Exports>),
}

/// What kind of keys an exports object uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKind {
    /// Every key starts with `.`.
    Subpaths,
    /// No key starts with `.`.
    Conditions,
    /// Both kinds appear; resolvers reject this.
    Mixed,
}

impl Exports {
    /// Shorthand for a path target.
    pub fn path(target: impl Into<String>) -> Self {
        Exports::Path(target.into())
    }

    /// Builds a map from `(key, value)` pairs, keeping their order.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Exports)>) -> Self {
        Exports::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_disallowed(&self) -> bool {
        matches!(self, Exports::Disallowed)
    }

    pub fn as_path(&self) -> Option<&str> {
        match self {
            Exports::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Classifies the keys of a map. Returns `None` for non-map values.
    ///
    /// An empty map counts as a condition map with no conditions.
    pub fn map_kind(&self) -> Option<MapKind> {
        let Exports::Map(entries) = self else {
            return None;
        };
        let dotted = entries.keys().filter(|k| k.starts_with('.')).count();
        Some(match dotted {
            0 => MapKind::Conditions,
            n if n == entries.len() => MapKind::Subpaths,
            _ => MapKind::Mixed,
        })
    }

    /// Every target path reachable from this entry, in document order.
    pub fn targets(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_targets(&mut out);
        out
    }

    fn collect_targets<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Exports::Disallowed => {}
            Exports::Path(p) => out.push(p),
            Exports::Fallback(items) => items.iter().for_each(|e| e.collect_targets(out)),
            Exports::Map(entries) => entries.values().for_each(|e| e.collect_targets(out)),
        }
    }
}

impl From<&str> for Exports {
    fn from(target: &str) -> Self {
        Exports::path(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_all_variants() {
        let exports: Exports = serde_json::from_value(json!({
            ".": [{"import": "./esm/index.js", "require": "./cjs/index.js"}, "./index.js"],
            "./internal/*": null,
            "./package.json": "./package.json"
        }))
        .unwrap();

        let Exports::Map(entries) = &exports else {
            panic!("expected a map");
        };
        assert_eq!(
            entries.keys().collect::<Vec<_>>(),
            vec![".", "./internal/*", "./package.json"]
        );
        assert!(matches!(entries["."], Exports::Fallback(ref items) if items.len() == 2));
        assert!(entries["./internal/*"].is_disallowed());
        assert_eq!(entries["./package.json"].as_path(), Some("./package.json"));
    }

    #[test]
    fn test_serialize_disallowed_as_null() {
        let exports = Exports::map([("./private", Exports::Disallowed)]);
        assert_eq!(
            serde_json::to_value(&exports).unwrap(),
            json!({"./private": null})
        );
    }

    #[test]
    fn test_map_kind() {
        let subpaths = Exports::map([(".", Exports::from("./a.js")), ("./b", "./b.js".into())]);
        assert_eq!(subpaths.map_kind(), Some(MapKind::Subpaths));

        let conditions = Exports::map([("import", Exports::from("./a.mjs"))]);
        assert_eq!(conditions.map_kind(), Some(MapKind::Conditions));

        let mixed = Exports::map([(".", Exports::from("./a.js")), ("import", "./a.mjs".into())]);
        assert_eq!(mixed.map_kind(), Some(MapKind::Mixed));

        assert_eq!(Exports::from("./a.js").map_kind(), None);
    }

    #[test]
    fn test_targets() {
        let exports = Exports::map([
            (".", Exports::Fallback(vec!["./a.js".into(), Exports::Disallowed])),
            ("./b", Exports::map([("node", Exports::from("./b.js"))])),
        ]);
        assert_eq!(exports.targets(), vec!["./a.js", "./b.js"]);
    }
}
