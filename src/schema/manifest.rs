//! The package.json descriptor.
//!
//! Every recognized top-level key is declared here with its shape. The
//! descriptor is data only; [`crate::validate`] walks it and
//! [`super::json_schema`] renders it.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::shape::{Field, RecordShape, Shape};

/// Name of the recursive `exports` definition.
pub const EXPORTS: &str = "Exports";

/// Name of the person definition (`author`, `contributors`, `maintainers`).
pub const PERSON: &str = "Person";

/// Conditions that are spelled out in the descriptor for condition records.
///
/// Other condition names are still accepted; these only get documentation.
pub const KNOWN_CONDITIONS: &[&str] = &["require", "import", "node", "default", "types"];

/// Lifecycle events that get their own entry under `scripts`.
pub const LIFECYCLE_SCRIPTS: &[&str] = &[
    "preinstall",
    "install",
    "postinstall",
    "prepublish",
    "publish",
    "postpublish",
    "prepublishOnly",
    "prepare",
    "prepack",
    "pack",
    "postpack",
    "pretest",
    "test",
    "posttest",
    "prestart",
    "start",
    "poststart",
    "prestop",
    "stop",
    "poststop",
    "prerestart",
    "restart",
    "postrestart",
    "preversion",
    "version",
    "postversion",
    "lint",
    "serve",
];

/// Keys whose value is an opaque tool configuration object.
pub const TOOL_BLOCKS: &[&str] = &["eslintConfig", "prettier", "stylelint", "ava", "release", "jscpd"];

/// A complete descriptor: the root record plus named definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    root: RecordShape,
    definitions: BTreeMap<&'static str, Shape>,
}

impl Schema {
    /// Creates a schema from its parts.
    pub fn new(root: RecordShape, definitions: BTreeMap<&'static str, Shape>) -> Self {
        Self { root, definitions }
    }

    /// The package.json descriptor, built on first use.
    pub fn manifest() -> &'static Schema {
        static MANIFEST: OnceLock<Schema> = OnceLock::new();
        MANIFEST.get_or_init(build_manifest_schema)
    }

    /// The top-level record.
    pub fn root(&self) -> &RecordShape {
        &self.root
    }

    /// Looks up a recognized top-level field.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.root.field(name)
    }

    /// Returns true if `name` is a recognized top-level key.
    pub fn is_recognized(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Named definitions, keyed by name.
    pub fn definitions(&self) -> &BTreeMap<&'static str, Shape> {
        &self.definitions
    }

    /// Looks up a named definition.
    pub fn definition(&self, name: &str) -> Option<&Shape> {
        self.definitions.get(name)
    }

    /// Follows `Ref` links until a concrete shape is reached.
    ///
    /// An unknown reference resolves to [`Shape::Any`] so a broken descriptor
    /// degrades to accepting rather than panicking.
    pub fn resolve<'a>(&'a self, shape: &'a Shape) -> &'a Shape {
        let mut current = shape;
        // Bounded by the definition count; a cycle of pure refs would be a descriptor bug.
        for _ in 0..=self.definitions.len() {
            match current {
                Shape::Ref(name) => match self.definitions.get(name) {
                    Some(target) => current = target,
                    None => return &ANY,
                },
                other => return other,
            }
        }
        &ANY
    }
}

static ANY: Shape = Shape::Any;

fn person_shape() -> Shape {
    Shape::Union(vec![
        Shape::String,
        Shape::Record(RecordShape::closed(vec![
            Field::required("name", Shape::String),
            Field::optional("url", Shape::String),
            Field::optional("email", Shape::String),
        ])),
    ])
}

fn exports_shape() -> Shape {
    let conditions = KNOWN_CONDITIONS
        .iter()
        .map(|name| Field::optional(name, Shape::Ref(EXPORTS)))
        .collect();

    Shape::Union(vec![
        Shape::String,
        Shape::Null,
        Shape::Record(RecordShape::open(conditions, Shape::Ref(EXPORTS))),
        Shape::array(Shape::Ref(EXPORTS)),
    ])
}

fn dependency_map() -> Shape {
    Shape::map_of(Shape::String)
}

fn build_manifest_schema() -> Schema {
    let mut definitions = BTreeMap::new();
    definitions.insert(PERSON, person_shape());
    definitions.insert(EXPORTS, exports_shape());

    let bugs = Shape::Union(vec![
        Shape::String,
        Shape::Record(RecordShape::closed(vec![
            Field::optional("url", Shape::String),
            Field::optional("email", Shape::String),
        ])),
    ]);

    let directories = Shape::Record(RecordShape::closed(
        ["bin", "doc", "example", "lib", "man", "test"]
            .into_iter()
            .map(|name| Field::optional(name, Shape::String))
            .collect(),
    ));

    let repository = Shape::Union(vec![
        Shape::String,
        Shape::Record(RecordShape::closed(vec![
            Field::optional("type", Shape::String),
            Field::optional("url", Shape::String),
            Field::optional("directory", Shape::String),
        ])),
    ]);

    let funding_record = Shape::Record(RecordShape::closed(vec![
        Field::required("url", Shape::String),
        Field::optional("type", Shape::String),
    ]));
    let funding = Shape::Union(vec![
        Shape::String,
        Shape::strings(),
        funding_record.clone(),
        Shape::array(funding_record),
    ]);

    let scripts = Shape::Record(RecordShape::open(
        LIFECYCLE_SCRIPTS
            .iter()
            .map(|name| Field::optional(name, Shape::String))
            .collect(),
        Shape::String,
    ));

    let peer_meta_entry = Shape::Record(RecordShape::open(
        vec![Field::required("optional", Shape::Boolean)],
        Shape::Any,
    ));

    let engines = Shape::Record(RecordShape::open(
        vec![Field::required("node", Shape::String)],
        Shape::String,
    ));

    let publish_config = Shape::Record(RecordShape::open(
        vec![
            Field::optional("access", Shape::String),
            Field::optional("tag", Shape::String),
            Field::optional("registry", Shape::String),
        ],
        Shape::String,
    ));

    let dist = Shape::Record(RecordShape::closed(vec![
        Field::optional("shasum", Shape::String),
        Field::optional("tarball", Shape::String),
    ]));

    let workspaces = Shape::Union(vec![
        Shape::strings(),
        Shape::Record(RecordShape::closed(vec![
            Field::optional("packages", Shape::strings()),
            Field::optional("nohoist", Shape::strings()),
        ])),
    ]);

    let esnext = Shape::Union(vec![
        Shape::String,
        Shape::Record(RecordShape::open(
            vec![
                Field::optional("main", Shape::String),
                Field::optional("browser", Shape::String),
            ],
            Shape::String,
        )),
    ]);

    let mut fields = vec![
        Field::required("name", Shape::String).with_summary("The name of the package."),
        Field::required("version", Shape::String)
            .with_summary("Package version, parseable as a semantic version."),
        Field::optional("description", Shape::String)
            .with_summary("Shown in registry search results."),
        Field::optional("keywords", Shape::strings()),
        Field::optional("homepage", Shape::String),
        Field::optional("bugs", bugs).with_summary("Where issues should be reported."),
        Field::optional("license", Shape::String),
        Field::optional("author", Shape::Ref(PERSON)),
        Field::optional("contributors", Shape::array(Shape::Ref(PERSON))),
        Field::optional("maintainers", Shape::array(Shape::Ref(PERSON))),
        Field::optional("files", Shape::strings())
            .with_summary("File patterns included when the package is packed."),
        Field::optional("main", Shape::String).with_summary("CommonJS entry point."),
        Field::optional("module", Shape::String).with_summary("ES module entry point."),
        Field::optional("types", Shape::String),
        Field::optional("typings", Shape::String),
        Field::optional(
            "bin",
            Shape::Union(vec![Shape::String, Shape::map_of(Shape::String)]),
        ),
        Field::optional("exports", Shape::Ref(EXPORTS))
            .with_summary("Sub-path and conditional entry points; null disallows import."),
        Field::optional("directories", directories),
        Field::optional("repository", repository),
        Field::optional("funding", funding),
        Field::optional("scripts", scripts)
            .with_summary("Lifecycle event name to shell command."),
        Field::optional("dependencies", dependency_map()),
        Field::optional("devDependencies", dependency_map()),
        Field::optional("optionalDependencies", dependency_map()),
        Field::optional("peerDependencies", dependency_map()),
        Field::optional("peerDependenciesMeta", Shape::map_of(peer_meta_entry)),
        Field::optional(
            "bundledDependencies",
            Shape::Union(vec![Shape::Boolean, Shape::strings()]),
        ),
        Field::optional("resolutions", Shape::map_of(Shape::String)),
        Field::optional("overrides", Shape::opaque_record()),
        Field::optional("engines", engines).with_summary("Runtime version constraints."),
        Field::optional("engineStrict", Shape::Boolean),
        Field::optional("os", Shape::strings()),
        Field::optional("cpu", Shape::strings()),
        Field::optional("private", Shape::Union(vec![Shape::Boolean, Shape::String]))
            .with_summary("Refuse to publish when set."),
        Field::optional("publishConfig", publish_config),
        Field::optional("dist", dist),
        Field::optional("workspaces", workspaces),
        Field::optional("readme", Shape::String),
        Field::optional("esnext", esnext),
        Field::optional("jspm", Shape::Any),
        Field::optional("typesVersions", Shape::map_of(Shape::strings())),
        Field::optional("packageManager", Shape::String),
        Field::optional("config", Shape::opaque_record()),
    ];

    fields.extend(
        TOOL_BLOCKS
            .iter()
            .map(|name| Field::optional(name, Shape::opaque_record())),
    );

    Schema::new(RecordShape::open(fields, Shape::Any), definitions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_version_are_the_only_required_fields() {
        let required: Vec<_> = Schema::manifest()
            .root()
            .required_fields()
            .map(|f| f.name)
            .collect();
        assert_eq!(required, vec!["name", "version"]);
    }

    #[test]
    fn test_recognized_keys() {
        let schema = Schema::manifest();
        for key in [
            "exports",
            "peerDependenciesMeta",
            "typesVersions",
            "packageManager",
            "jscpd",
            "eslintConfig",
        ] {
            assert!(schema.is_recognized(key), "{key} should be recognized");
        }
        assert!(!schema.is_recognized("sideEffectsx"));
    }

    #[test]
    fn test_no_duplicate_fields() {
        let mut names: Vec<_> = Schema::manifest().root().fields.iter().map(|f| f.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_resolve_follows_refs() {
        let schema = Schema::manifest();
        let exports = schema.field("exports").unwrap();
        assert!(matches!(schema.resolve(&exports.shape), Shape::Union(_)));
        assert_eq!(schema.resolve(&Shape::Ref("Nope")), &Shape::Any);
        assert_eq!(schema.resolve(&Shape::String), &Shape::String);
    }

    #[test]
    fn test_root_is_open() {
        assert!(Schema::manifest().root().is_open());
    }
}
