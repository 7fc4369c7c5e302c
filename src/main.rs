use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, info, info_span, warn};
use walkdir::{DirEntry, WalkDir};

use pkgshape::exports::{resolve, Conditions, Resolution};
use pkgshape::manifest::{extract_dependencies, parse_file, read_document, DependencyType};
use pkgshape::report::{render_all, ReportData, ReportFormat};
use pkgshape::schema::Schema;
use pkgshape::validate::{ValidationOptions, Validator};

mod logging;

const MANIFEST_FILE: &str = "package.json";

#[derive(Parser)]
#[command(name = "pkgshape")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Validate package.json manifests against a typed schema", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more manifests
    Check {
        /// Manifest files, or directories containing a package.json
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Search directories for every package.json below them
        #[arg(short, long)]
        recursive: bool,

        /// Output format: text, json, markdown
        #[arg(short, long, default_value = "text", env = "PKGSHAPE_FORMAT")]
        format: ReportFormat,

        /// Report top-level keys the schema does not know
        #[arg(long, env = "PKGSHAPE_STRICT")]
        strict: bool,

        /// Require `version` to be a valid semantic version
        #[arg(long)]
        semver: bool,
    },
    /// Print the manifest schema as JSON Schema
    Schema {
        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },
    /// List the dependencies declared by a manifest
    Deps {
        /// Manifest file or the directory containing it
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Only list production dependencies
        #[arg(long)]
        prod_only: bool,
    },
    /// Resolve a subpath through the manifest's exports field
    Resolve {
        /// Manifest file or the directory containing it
        path: PathBuf,

        /// Subpath to resolve, e.g. "." or "./feature"
        #[arg(default_value = ".")]
        subpath: String,

        /// Active conditions, in addition to "default" (defaults to node + import)
        #[arg(short, long = "condition")]
        conditions: Vec<String>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Check {
            paths,
            recursive,
            format,
            strict,
            semver,
        } => {
            let options = ValidationOptions::new()
                .with_strict_top_level(strict)
                .with_semver_check(semver);
            check(&paths, recursive, format, options)
        }
        Commands::Schema { compact } => {
            let schema = Schema::manifest().to_json_schema();
            let rendered = if compact {
                serde_json::to_string(&schema)?
            } else {
                serde_json::to_string_pretty(&schema)?
            };
            println!("{}", rendered);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Deps { path, prod_only } => deps(&path, prod_only),
        Commands::Resolve {
            path,
            subpath,
            conditions,
        } => resolve_export(&path, &subpath, conditions),
    }
}

fn check(
    paths: &[PathBuf],
    recursive: bool,
    format: ReportFormat,
    options: ValidationOptions,
) -> Result<ExitCode> {
    let _span = info_span!("check", %format).entered();
    let manifests = collect_manifests(paths, recursive)?;
    if manifests.is_empty() {
        bail!("no {} found under the given paths", MANIFEST_FILE);
    }

    let reports = check_manifests(&manifests, &Validator::new(options));
    let failing = reports.iter().filter(|r| !r.conforms()).count();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_all(format, &reports, &mut out)?;
    out.flush()?;

    info!(checked = manifests.len(), failing, "check finished");
    Ok(if failing == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Validates each manifest. A file that cannot be loaded is reported as a
/// failure and the rest are still checked.
fn check_manifests(manifests: &[PathBuf], validator: &Validator) -> Vec<ReportData> {
    manifests
        .iter()
        .map(|manifest| {
            let source = manifest.display().to_string();
            match read_document(manifest) {
                Ok(document) => {
                    let violations = validator.validate(&document);
                    debug!(path = %source, violations = violations.len(), "checked manifest");
                    ReportData::new(source, &document, violations)
                }
                Err(err) => {
                    warn!(path = %source, error = %err, "could not load manifest");
                    ReportData::failed(source, err.to_string())
                }
            }
        })
        .collect()
}

/// Expands the command-line paths into manifest files.
fn collect_manifests(paths: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut manifests = Vec::new();
    for path in paths {
        if !path.is_dir() {
            manifests.push(path.clone());
        } else if recursive {
            for entry in WalkDir::new(path).into_iter().filter_entry(is_searchable) {
                let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
                if entry.file_type().is_file() && entry.file_name() == MANIFEST_FILE {
                    manifests.push(entry.into_path());
                }
            }
        } else {
            manifests.push(path.join(MANIFEST_FILE));
        }
    }
    Ok(manifests)
}

/// Skips installed packages and hidden directories below the walk root.
fn is_searchable(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    name != "node_modules" && !name.starts_with('.')
}

fn manifest_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(MANIFEST_FILE)
    } else {
        path.to_path_buf()
    }
}

fn deps(path: &Path, prod_only: bool) -> Result<ExitCode> {
    let manifest = manifest_path(path);
    let pkg = parse_file(&manifest)
        .with_context(|| format!("failed to load {}", manifest.display()))?;

    println!("{}@{}", pkg.name, pkg.version);
    for dep in extract_dependencies(&pkg) {
        if prod_only && !dep.is_production() {
            continue;
        }
        let optional = dep.dep_type == DependencyType::Peer && pkg.is_optional_peer(&dep.name);
        println!(
            "  {:<9} {} {} ({}{})",
            dep.dep_type.label(),
            dep.name,
            dep.version,
            dep.spec().kind(),
            if optional { ", optional" } else { "" }
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn resolve_export(path: &Path, subpath: &str, conditions: Vec<String>) -> Result<ExitCode> {
    let manifest = manifest_path(path);
    let pkg = parse_file(&manifest)
        .with_context(|| format!("failed to load {}", manifest.display()))?;
    let Some(exports) = pkg.exports.as_ref() else {
        bail!("{} has no exports field", manifest.display());
    };

    let conditions = if conditions.is_empty() {
        Conditions::import()
    } else {
        Conditions::new(conditions)
    };
    debug!(subpath, conditions = ?conditions.names(), "resolving export");

    match resolve(exports, subpath, &conditions)
        .with_context(|| format!("cannot resolve {} in {}", subpath, manifest.display()))?
    {
        Resolution::Path(target) => {
            println!("{}", target);
            Ok(ExitCode::SUCCESS)
        }
        Resolution::Excluded => {
            eprintln!("{} is explicitly not exported by {}", subpath, pkg.name);
            Ok(ExitCode::from(1))
        }
        Resolution::Unmatched => {
            eprintln!("{} is not exported by {} under these conditions", subpath, pkg.name);
            Ok(ExitCode::from(1))
        }
    }
}
