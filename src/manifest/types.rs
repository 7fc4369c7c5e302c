//! Typed model of a package.json document.
//!
//! These types mirror the field table of the descriptor so that conforming
//! documents can be read and built with compile-time field names. Open
//! records keep their unrecognized keys in a flattened `extra` map; maps use
//! `IndexMap` so document order survives a round trip.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::range::RangeSpec;
use crate::exports::Exports;

/// Represents the structure of a package.json file.
///
/// # Example
///
/// ```
/// use pkgshape::manifest::PackageJson;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0", "private": true}"#;
/// let pkg: PackageJson = serde_json::from_str(json).unwrap();
/// assert_eq!(pkg.name, "my-app");
/// assert!(pkg.is_private());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    /// The name of the package.
    pub name: String,

    /// The version of the package (semver format).
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bugs: Option<Bugs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Vec<Person>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<Vec<Person>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin: Option<Bin>,

    /// `Some(Exports::Disallowed)` when the document says `"exports": null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub exports: Option<Exports>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directories: Option<Directories>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding: Option<Funding>,

    /// Lifecycle event name to shell command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<IndexMap<String, String>>,

    /// Production dependencies required at runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<IndexMap<String, String>>,

    /// Development-only dependencies (testing, building, etc.).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<IndexMap<String, String>>,

    /// Optional dependencies that enhance functionality if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_dependencies: Option<IndexMap<String, String>>,

    /// Peer dependencies that the host package must provide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_dependencies: Option<IndexMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_dependencies_meta: Option<IndexMap<String, PeerDependencyMeta>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundled_dependencies: Option<BundledDependencies>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolutions: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engines: Option<Engines>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_strict: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<Private>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_config: Option<PublishConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dist: Option<Dist>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<Workspaces>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eslint_config: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prettier: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylelint: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ava: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jscpd: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esnext: Option<Esnext>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub jspm: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types_versions: Option<IndexMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,

    /// Top-level keys the descriptor does not recognize.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Deserializes a present field as `Some`, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl PackageJson {
    /// Creates a manifest with only the required fields set.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    pub fn with_author(mut self, author: Person) -> Self {
        self.author = Some(author);
        self
    }

    pub fn with_main(mut self, main: impl Into<String>) -> Self {
        self.main = Some(main.into());
        self
    }

    pub fn with_exports(mut self, exports: Exports) -> Self {
        self.exports = Some(exports);
        self
    }

    pub fn with_script(mut self, event: impl Into<String>, command: impl Into<String>) -> Self {
        self.scripts
            .get_or_insert_with(IndexMap::new)
            .insert(event.into(), command.into());
        self
    }

    /// Adds a dependency to the map selected by `dep_type`.
    pub fn with_dependency(
        mut self,
        dep_type: DependencyType,
        name: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        self.dependency_map_mut(dep_type)
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), range.into());
        self
    }

    pub fn with_engine(mut self, engine: impl Into<String>, range: impl Into<String>) -> Self {
        let engine = engine.into();
        // `node` is required; default it to any version.
        let engines = self.engines.get_or_insert_with(|| Engines::node("*"));
        if engine == "node" {
            engines.node = range.into();
        } else {
            engines.extra.insert(engine, range.into());
        }
        self
    }

    /// Returns the dependency map for a dependency type.
    pub fn dependency_map(&self, dep_type: DependencyType) -> Option<&IndexMap<String, String>> {
        match dep_type {
            DependencyType::Production => self.dependencies.as_ref(),
            DependencyType::Development => self.dev_dependencies.as_ref(),
            DependencyType::Peer => self.peer_dependencies.as_ref(),
            DependencyType::Optional => self.optional_dependencies.as_ref(),
        }
    }

    fn dependency_map_mut(
        &mut self,
        dep_type: DependencyType,
    ) -> &mut Option<IndexMap<String, String>> {
        match dep_type {
            DependencyType::Production => &mut self.dependencies,
            DependencyType::Development => &mut self.dev_dependencies,
            DependencyType::Peer => &mut self.peer_dependencies,
            DependencyType::Optional => &mut self.optional_dependencies,
        }
    }

    /// Returns true if the package has any dependencies defined.
    pub fn has_dependencies(&self) -> bool {
        DependencyType::ALL
            .iter()
            .any(|t| self.dependency_map(*t).is_some_and(|d| !d.is_empty()))
    }

    /// Returns the total count of all dependencies.
    pub fn dependency_count(&self) -> usize {
        DependencyType::ALL
            .iter()
            .map(|t| self.dependency_map(*t).map_or(0, IndexMap::len))
            .sum()
    }

    /// Returns true if a peer dependency is marked optional in
    /// `peerDependenciesMeta`.
    pub fn is_optional_peer(&self, name: &str) -> bool {
        self.peer_dependencies_meta
            .as_ref()
            .and_then(|meta| meta.get(name))
            .is_some_and(|m| m.optional)
    }

    /// `private: true` or any non-empty `private` string.
    pub fn is_private(&self) -> bool {
        match &self.private {
            Some(Private::Flag(flag)) => *flag,
            Some(Private::Reason(reason)) => !reason.is_empty(),
            None => false,
        }
    }

    /// Author, contributors, and maintainers, in that order.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.author
            .iter()
            .chain(self.contributors.iter().flatten())
            .chain(self.maintainers.iter().flatten())
    }

    /// Command name to script path.
    ///
    /// A string `bin` installs one command named after the package, with any
    /// `@scope/` prefix removed.
    pub fn bin_commands(&self) -> Vec<(String, String)> {
        match &self.bin {
            None => Vec::new(),
            Some(Bin::Path(path)) => {
                let command = self.name.rsplit('/').next().unwrap_or(&self.name);
                vec![(command.to_string(), path.clone())]
            }
            Some(Bin::Commands(commands)) => commands
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Workspace glob patterns, whichever form `workspaces` uses.
    pub fn workspace_patterns(&self) -> &[String] {
        match &self.workspaces {
            Some(Workspaces::Packages(patterns)) => patterns.as_slice(),
            Some(Workspaces::Config(config)) => config.packages.as_deref().unwrap_or(&[]),
            None => &[],
        }
    }

    /// Converts the manifest back into a JSON value.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Pretty-printed JSON with two-space indentation, as npm writes it.
    pub fn to_json_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A person: either `"Name <email> (url)"` or a structured record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Person {
    Name(String),
    Record(PersonRecord),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// `bugs`: an issue tracker URL or a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bugs {
    Url(String),
    Record {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },
}

/// `bin`: a single script or command name to script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bin {
    Path(String),
    Commands(IndexMap<String, String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directories {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lib: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub man: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
}

/// `repository`: a URL or shorthand string, or a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Repository {
    Url(String),
    Record(RepositoryRecord),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Location of the package inside a monorepo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

impl Repository {
    pub fn url(&self) -> Option<&str> {
        match self {
            Repository::Url(url) => Some(url),
            Repository::Record(record) => record.url.as_deref(),
        }
    }
}

/// `funding`: one or more URLs or records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Funding {
    Url(String),
    Urls(Vec<String>),
    Record(FundingRecord),
    Records(Vec<FundingRecord>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingRecord {
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Funding {
    /// All funding URLs, whichever form was used.
    pub fn urls(&self) -> Vec<&str> {
        match self {
            Funding::Url(url) => vec![url.as_str()],
            Funding::Urls(urls) => urls.iter().map(String::as_str).collect(),
            Funding::Record(record) => vec![record.url.as_str()],
            Funding::Records(records) => records.iter().map(|r| r.url.as_str()).collect(),
        }
    }
}

/// One entry of `peerDependenciesMeta`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerDependencyMeta {
    pub optional: bool,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// `bundledDependencies`: all of them, or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BundledDependencies {
    All(bool),
    Names(Vec<String>),
}

/// `engines`: `node` is required, other engines are free-form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engines {
    pub node: String,
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

impl Engines {
    pub fn node(range: impl Into<String>) -> Self {
        Self {
            node: range.into(),
            extra: IndexMap::new(),
        }
    }

    /// The range for an engine, `node` included.
    pub fn get(&self, engine: &str) -> Option<&str> {
        if engine == "node" {
            return Some(&self.node);
        }
        self.extra.get(engine).map(String::as_str)
    }
}

/// `private`: a flag, or a string some tools use to explain why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Private {
    Flag(bool),
    Reason(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shasum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tarball: Option<String>,
}

/// `workspaces`: a list of globs, or a record with `packages`/`nohoist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Workspaces {
    Packages(Vec<String>),
    Config(WorkspacesConfig),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspacesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nohoist: Option<Vec<String>>,
}

/// `esnext`: an entry path or a record of entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Esnext {
    Path(String),
    Entries(EsnextEntries),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsnextEntries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

/// Categorizes the type of dependency relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyType {
    /// `dependencies` - required at runtime.
    Production,

    /// `devDependencies` - only needed during development.
    Development,

    /// `peerDependencies` - expected to be provided by the consumer.
    Peer,

    /// `optionalDependencies` - installation continues if they fail.
    Optional,
}

impl DependencyType {
    /// Every dependency type, in manifest field order.
    pub const ALL: [DependencyType; 4] = [
        DependencyType::Production,
        DependencyType::Development,
        DependencyType::Optional,
        DependencyType::Peer,
    ];

    /// Returns a short label for the dependency type.
    pub fn label(&self) -> &'static str {
        match self {
            DependencyType::Production => "prod",
            DependencyType::Development => "dev",
            DependencyType::Peer => "peer",
            DependencyType::Optional => "optional",
        }
    }

    /// The manifest key holding this dependency type.
    pub fn field_name(&self) -> &'static str {
        match self {
            DependencyType::Production => "dependencies",
            DependencyType::Development => "devDependencies",
            DependencyType::Peer => "peerDependencies",
            DependencyType::Optional => "optionalDependencies",
        }
    }

    /// Returns true if this dependency type is installed for consumers of the package.
    pub fn is_installed_for_consumers(&self) -> bool {
        matches!(self, DependencyType::Production | DependencyType::Optional)
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DependencyType::Production => "production",
            DependencyType::Development => "development",
            DependencyType::Peer => "peer",
            DependencyType::Optional => "optional",
        };
        write!(f, "{}", s)
    }
}

/// A single dependency entry, flattened out of its map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// The package name (e.g., "react", "@types/node").
    pub name: String,

    /// The range string as written (e.g., "^18.0.0", "github:user/repo").
    pub version: String,

    /// The category of this dependency.
    pub dep_type: DependencyType,
}

impl Dependency {
    /// Creates a new Dependency instance.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        dep_type: DependencyType,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            dep_type,
        }
    }

    /// Classifies the range string.
    pub fn spec(&self) -> RangeSpec {
        RangeSpec::parse(&self.version)
    }

    /// Returns true if this is a production dependency.
    pub fn is_production(&self) -> bool {
        self.dep_type == DependencyType::Production
    }

    /// Returns true if this is a development dependency.
    pub fn is_development(&self) -> bool {
        self.dep_type == DependencyType::Development
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.dep_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dependency_type_label() {
        assert_eq!(DependencyType::Production.label(), "prod");
        assert_eq!(DependencyType::Development.label(), "dev");
        assert_eq!(DependencyType::Peer.label(), "peer");
        assert_eq!(DependencyType::Optional.label(), "optional");
    }

    #[test]
    fn test_dependency_type_field_name() {
        assert_eq!(DependencyType::Development.field_name(), "devDependencies");
        assert!(DependencyType::Optional.is_installed_for_consumers());
        assert!(!DependencyType::Peer.is_installed_for_consumers());
    }

    #[test]
    fn test_dependency_display() {
        let dep = Dependency::new("lodash", "~4.17.21", DependencyType::Development);
        assert_eq!(format!("{}", dep), "lodash@~4.17.21 (development)");
    }

    #[test]
    fn test_new_sets_required_fields_only() {
        let pkg = PackageJson::new("x", "1.0.0");
        assert_eq!(
            pkg.to_value().unwrap(),
            json!({"name": "x", "version": "1.0.0"})
        );
        assert!(!pkg.has_dependencies());
        assert_eq!(pkg.dependency_count(), 0);
    }

    #[test]
    fn test_builder() {
        let pkg = PackageJson::new("@scope/tool", "2.0.0")
            .with_description("a tool")
            .with_script("test", "cargo test")
            .with_dependency(DependencyType::Production, "react", "^18.0.0")
            .with_dependency(DependencyType::Development, "typescript", "^5.0.0")
            .with_engine("npm", ">=9")
            .with_engine("node", ">=18");

        assert_eq!(pkg.dependency_count(), 2);
        let engines = pkg.engines.as_ref().unwrap();
        assert_eq!(engines.get("node"), Some(">=18"));
        assert_eq!(engines.get("npm"), Some(">=9"));
        assert_eq!(
            pkg.scripts.as_ref().unwrap().get("test").map(String::as_str),
            Some("cargo test")
        );
    }

    #[test]
    fn test_camel_case_keys() {
        let pkg = PackageJson::new("x", "1.0.0")
            .with_dependency(DependencyType::Peer, "react", ">=16");
        let value = pkg.to_value().unwrap();
        assert!(value.get("peerDependencies").is_some());
        assert!(value.get("peer_dependencies").is_none());
    }

    #[test]
    fn test_exports_null_is_kept() {
        let pkg: PackageJson =
            serde_json::from_value(json!({"name": "x", "version": "1", "exports": null})).unwrap();
        assert_eq!(pkg.exports, Some(Exports::Disallowed));
        assert_eq!(pkg.to_value().unwrap()["exports"], json!(null));
    }

    #[test]
    fn test_extra_keys_are_kept() {
        let pkg: PackageJson = serde_json::from_value(json!({
            "name": "x",
            "version": "1",
            "sideEffects": false,
            "type": "module"
        }))
        .unwrap();
        assert_eq!(pkg.extra.get("sideEffects"), Some(&json!(false)));
        assert_eq!(pkg.extra.get("type"), Some(&json!("module")));
    }

    #[test]
    fn test_people_and_bin() {
        let pkg: PackageJson = serde_json::from_value(json!({
            "name": "@scope/cli",
            "version": "1.0.0",
            "author": "Ada <ada@example.com>",
            "contributors": [{"name": "Grace"}],
            "bin": "./bin/cli.js"
        }))
        .unwrap();
        assert_eq!(pkg.people().count(), 2);
        assert_eq!(
            pkg.bin_commands(),
            vec![("cli".to_string(), "./bin/cli.js".to_string())]
        );
    }

    #[test]
    fn test_peer_meta_and_private() {
        let pkg: PackageJson = serde_json::from_value(json!({
            "name": "x",
            "version": "1.0.0",
            "private": "internal only",
            "peerDependenciesMeta": {"react": {"optional": true, "foo": "bar"}}
        }))
        .unwrap();
        assert!(pkg.is_private());
        assert!(pkg.is_optional_peer("react"));
        assert!(!pkg.is_optional_peer("vue"));
        let meta = &pkg.peer_dependencies_meta.as_ref().unwrap()["react"];
        assert_eq!(meta.extra.get("foo"), Some(&json!("bar")));
    }

    #[test]
    fn test_funding_forms() {
        let single: Funding = serde_json::from_value(json!("https://a")).unwrap();
        assert_eq!(single.urls(), vec!["https://a"]);

        let many: Funding =
            serde_json::from_value(json!([{"url": "https://a", "type": "github"}, {"url": "https://b"}]))
                .unwrap();
        assert!(matches!(many, Funding::Records(_)));
        assert_eq!(many.urls(), vec!["https://a", "https://b"]);
    }

    #[test]
    fn test_workspace_patterns() {
        let pkg: PackageJson = serde_json::from_value(json!({
            "name": "root",
            "version": "0.0.0",
            "workspaces": {"packages": ["packages/*"], "nohoist": ["**/react-native"]}
        }))
        .unwrap();
        assert_eq!(pkg.workspace_patterns(), ["packages/*".to_string()]);
    }
}
