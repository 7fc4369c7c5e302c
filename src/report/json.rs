//! JSON report implementation.
//!
//! Renders validation results in JSON format for machine-readable output.

use super::{ReportData, Reporter};
use crate::validate::{ShapeViolation, ViolationReason};
use serde::Serialize;
use std::io::{self, Write};

/// JSON reporter implementation.
pub struct JsonReporter;

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    conforms: bool,
    violations: usize,
    missing: usize,
    mismatched: usize,
    unrecognized: usize,
}

/// Serializable violation with a JSON Pointer alongside the display path.
#[derive(Serialize)]
struct JsonViolation<'a> {
    pointer: String,
    #[serde(flatten)]
    violation: &'a ShapeViolation,
}

/// Root JSON report structure.
#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    summary: JsonSummary,
    violations: Vec<JsonViolation<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unrecognized_keys: Vec<String>,
}

impl JsonReporter {
    fn report<'a>(&self, data: &'a ReportData) -> JsonReport<'a> {
        JsonReport {
            source: &data.source,
            name: data.name.as_deref(),
            version: data.version.as_deref(),
            error: data.error.as_deref(),
            summary: JsonSummary {
                conforms: data.conforms(),
                violations: data.violations.len(),
                missing: data.count(ViolationReason::Missing),
                mismatched: data.count(ViolationReason::Mismatch),
                unrecognized: data.count(ViolationReason::Unrecognized),
            },
            violations: data
                .violations
                .iter()
                .map(|v| JsonViolation {
                    pointer: v.path.to_pointer(),
                    violation: v,
                })
                .collect(),
            unrecognized_keys: data.unrecognized.clone(),
        }
    }

    /// Renders several documents as a single JSON array.
    pub fn render_many<W: Write>(&self, data: &[ReportData], writer: &mut W) -> io::Result<()> {
        let reports: Vec<JsonReport> = data.iter().map(|entry| self.report(entry)).collect();
        write_pretty(&reports, writer)
    }
}

fn write_pretty<T: Serialize, W: Write>(value: &T, writer: &mut W) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    writeln!(writer, "{}", json)
}

impl Reporter for JsonReporter {
    fn render<W: Write>(&self, data: &ReportData, writer: &mut W) -> io::Result<()> {
        write_pretty(&self.report(data), writer)
    }
}
