//! End-to-end checks of the descriptor, the validator, the typed model and
//! exports resolution working together.

use pkgshape::exports::{resolve, Conditions, Exports, Resolution};
use pkgshape::manifest::{parse_str, parse_value, PackageJson};
use pkgshape::schema::Schema;
use pkgshape::validate::{validate, ValidationOptions, ViolationReason};
use serde_json::{json, Value};

fn paths(document: &Value) -> Vec<String> {
    validate(document)
        .iter()
        .map(|v| v.path.to_string())
        .collect()
}

#[test]
fn minimal_manifest_conforms() {
    assert!(validate(&json!({"name": "x", "version": "1.0.0"})).is_empty());
}

#[test]
fn each_missing_identity_field_is_one_violation() {
    let violations = validate(&json!({"version": "1.0.0"}));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path.to_string(), "name");
    assert_eq!(violations[0].reason, ViolationReason::Missing);
    assert!(violations[0].actual.is_none());

    let violations = validate(&json!({"name": "x"}));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path.to_string(), "version");

    assert_eq!(paths(&json!({})), vec!["name", "version"]);
}

#[test]
fn dependency_maps_accept_any_package_name() {
    let names = json!({
        "react": "^18.0.0",
        "@scope/pkg": "workspace:*",
        "left-pad": "github:user/left-pad",
        "local": "file:../local",
        "odd name with spaces": "latest"
    });
    for field in [
        "dependencies",
        "devDependencies",
        "optionalDependencies",
        "peerDependencies",
    ] {
        let doc = json!({"name": "x", "version": "1.0.0", field: names.clone()});
        assert!(validate(&doc).is_empty(), "{} rejected package names", field);
    }
}

#[test]
fn dependency_values_must_be_strings() {
    let doc = json!({
        "name": "x",
        "version": "1.0.0",
        "dependencies": {"a": "1", "b": 2, "c": {"version": "1"}}
    });
    assert_eq!(paths(&doc), vec!["dependencies.b", "dependencies.c"]);
}

#[test]
fn exports_accepts_every_recursive_form() {
    let forms = [
        json!("./index.js"),
        json!(null),
        json!(["./index.mjs", "./index.cjs"]),
        json!({
            ".": {
                "types": "./dist/index.d.ts",
                "node": {"import": "./dist/node.mjs", "require": "./dist/node.cjs"},
                "import": ["./dist/index.mjs", null],
                "require": "./dist/index.cjs",
                "default": "./dist/index.js"
            },
            "./feature": {"import": null, "default": "./feature.js"},
            "./internal/*": null
        }),
    ];
    for exports in forms {
        let doc = json!({"name": "x", "version": "1.0.0", "exports": exports.clone()});
        assert!(validate(&doc).is_empty(), "rejected exports {}", exports);
    }
}

/// Wraps `leaf` in `depth` alternating fallback arrays and condition maps.
fn nested_exports(leaf: Value, depth: usize) -> Value {
    (0..depth).fold(leaf, |inner, level| {
        if level % 2 == 0 {
            json!([inner])
        } else {
            json!({"import": inner})
        }
    })
}

#[test]
fn exports_accepts_deep_nesting() {
    let exports = nested_exports(json!("./leaf.js"), 50);
    let doc = json!({"name": "x", "version": "1.0.0", "exports": exports.clone()});
    assert!(validate(&doc).is_empty());

    let typed: Exports = serde_json::from_value(exports).unwrap();
    assert_eq!(
        resolve(&typed, ".", &Conditions::import()).unwrap(),
        Resolution::Path("./leaf.js".into())
    );
}

#[test]
fn exports_deep_nesting_reports_only_the_bad_leaf() {
    let doc = json!({
        "name": "x",
        "version": "1.0.0",
        "exports": nested_exports(json!(42), 50)
    });
    let violations = validate(&doc);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].reason, ViolationReason::Mismatch);
    assert_eq!(violations[0].actual, Some(json!(42)));
    assert!(violations[0].path.to_string().ends_with("[0]"));
}

#[test]
fn exports_nested_problem_is_reported_at_its_path() {
    let doc = json!({
        "name": "x",
        "version": "1.0.0",
        "exports": {"./feature": {"import": 42}}
    });
    let violations = validate(&doc);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path.to_string(), "exports[\"./feature\"].import");
    assert_eq!(violations[0].actual, Some(json!(42)));
}

#[test]
fn peer_dependency_meta_requires_optional() {
    let missing = json!({
        "name": "x",
        "version": "1.0.0",
        "peerDependenciesMeta": {"react": {}}
    });
    let violations = validate(&missing);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path.to_string(), "peerDependenciesMeta.react.optional");
    assert_eq!(violations[0].reason, ViolationReason::Missing);

    let with_extras = json!({
        "name": "x",
        "version": "1.0.0",
        "peerDependenciesMeta": {"react": {"optional": true, "foo": "bar"}}
    });
    assert!(validate(&with_extras).is_empty());
}

#[test]
fn engines_requires_node() {
    let without = json!({"name": "x", "version": "1.0.0", "engines": {"npm": ">=9"}});
    assert_eq!(paths(&without), vec!["engines.node"]);

    let with = json!({"name": "x", "version": "1.0.0", "engines": {"node": ">=18"}});
    assert!(validate(&with).is_empty());
}

#[test]
fn closed_records_reject_unknown_keys() {
    let doc = json!({
        "name": "x",
        "version": "1.0.0",
        "author": {"name": "A", "twitter": "@a"},
        "repository": {"type": "git", "url": "https://example.com", "branch": "main"}
    });
    let violations = validate(&doc);
    assert_eq!(paths(&doc), vec!["author.twitter", "repository.branch"]);
    assert!(violations
        .iter()
        .all(|v| v.reason == ViolationReason::Unrecognized));
}

#[test]
fn unknown_top_level_keys_depend_on_strictness() {
    let doc = json!({"name": "x", "version": "1.0.0", "sideEffects": false});
    assert!(validate(&doc).is_empty());

    let strict = ValidationOptions::new().with_strict_top_level(true);
    let err = parse_value(doc, strict).unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].path.to_string(), "sideEffects");
}

#[test]
fn violations_are_collected_in_one_pass() {
    let doc = json!({
        "version": 1,
        "keywords": ["a", 2, "c"],
        "bin": 7,
        "engines": {}
    });
    assert_eq!(paths(&doc), vec!["name", "version", "keywords[1]", "bin", "engines.node"]);
}

#[test]
fn typed_parse_round_trips_to_equivalent_json() {
    let document = json!({
        "name": "@scope/pkg",
        "version": "2.1.0",
        "description": "round trip",
        "keywords": ["a", "b"],
        "license": "MIT",
        "author": "Jane Doe <jane@example.com> (https://example.com)",
        "contributors": [{"name": "Sam", "email": "sam@example.com"}],
        "bugs": {"url": "https://example.com/issues"},
        "repository": {"type": "git", "url": "https://example.com/repo.git", "directory": "packages/pkg"},
        "funding": [{"type": "github", "url": "https://github.com/sponsors/jane"}],
        "bin": {"pkg": "./bin/pkg.js"},
        "exports": {
            ".": {"import": "./index.mjs", "require": "./index.cjs"},
            "./internal/*": null
        },
        "scripts": {"build": "tsc", "test": "jest"},
        "dependencies": {"react": "^18.2.0"},
        "peerDependencies": {"react-dom": ">=18"},
        "peerDependenciesMeta": {"react-dom": {"optional": true, "note": "ssr only"}},
        "engines": {"node": ">=18", "npm": ">=9"},
        "private": true,
        "workspaces": ["packages/*"],
        "sideEffects": false
    });

    let pkg = parse_value(document.clone(), ValidationOptions::default()).unwrap();
    assert_eq!(pkg.to_value().unwrap(), document);

    let reparsed: PackageJson = serde_json::from_str(&pkg.to_json_string_pretty().unwrap()).unwrap();
    assert_eq!(reparsed, pkg);
}

#[test]
fn typed_parse_rejects_what_the_validator_rejects() {
    let err = parse_str(r#"{"name": "x", "version": "1.0.0", "private": 1}"#).unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].reason, ViolationReason::Mismatch);
}

#[test]
fn exports_resolution_honors_condition_order() {
    let exports: Exports = serde_json::from_value(json!({
        "types": "./index.d.ts",
        "import": "./index.mjs",
        "node": "./node.cjs",
        "default": "./index.js"
    }))
    .unwrap();

    // Document order decides, not the order the caller lists conditions in.
    let node_import = Conditions::new(["node", "import"]);
    assert_eq!(
        resolve(&exports, ".", &node_import).unwrap(),
        Resolution::Path("./index.mjs".into())
    );
    assert_eq!(
        resolve(&exports, ".", &Conditions::require()).unwrap(),
        Resolution::Path("./node.cjs".into())
    );
    assert_eq!(
        resolve(&exports, ".", &Conditions::new(["types"])).unwrap(),
        Resolution::Path("./index.d.ts".into())
    );
    assert_eq!(
        resolve(&exports, ".", &Conditions::default()).unwrap(),
        Resolution::Path("./index.js".into())
    );
}

#[test]
fn exports_resolution_honors_fallbacks_and_exclusions() {
    let exports: Exports = serde_json::from_value(json!({
        ".": ["./first.js", "./second.js"],
        "./lib/*": "./dist/lib/*.js",
        "./lib/private/*": null,
        "./legacy": [{"worker": "./worker.js"}, "./legacy.js"]
    }))
    .unwrap();
    let conditions = Conditions::import();

    assert_eq!(
        resolve(&exports, ".", &conditions).unwrap(),
        Resolution::Path("./first.js".into())
    );
    assert_eq!(
        resolve(&exports, "./lib/format", &conditions).unwrap(),
        Resolution::Path("./dist/lib/format.js".into())
    );
    assert_eq!(
        resolve(&exports, "./lib/private/secret", &conditions).unwrap(),
        Resolution::Excluded
    );
    assert_eq!(
        resolve(&exports, "./legacy", &conditions).unwrap(),
        Resolution::Path("./legacy.js".into())
    );
    assert_eq!(
        resolve(&exports, "./missing", &conditions).unwrap(),
        Resolution::Unmatched
    );
}

#[test]
fn json_schema_rendering_covers_every_field() {
    let schema = Schema::manifest();
    let rendered = schema.to_json_schema();
    let properties = rendered["properties"].as_object().unwrap();

    for field in schema.root().fields.iter() {
        assert!(properties.contains_key(field.name), "{} missing", field.name);
    }
    assert_eq!(rendered["required"], json!(["name", "version"]));
}
