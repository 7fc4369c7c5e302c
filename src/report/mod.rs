//! Rendering of validation results.
//!
//! This module provides reporters for validation outcomes in various
//! formats: plain text, JSON, and Markdown.

pub mod json;
pub mod markdown;
pub mod text;

use crate::schema::Schema;
use crate::validate::{ShapeViolation, ViolationReason};
use serde_json::Value;
use std::io::{self, Write};

/// Report format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Text format - one line per violation, for terminals
    #[default]
    Text,
    /// JSON format - machine-readable, full data
    Json,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(format!(
                "Unknown report format: '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Data container for one validated document.
#[derive(Debug, Clone)]
pub struct ReportData {
    /// Where the document came from (usually a file path)
    pub source: String,
    /// `name`, when present as a string
    pub name: Option<String>,
    /// `version`, when present as a string
    pub version: Option<String>,
    /// Every violation found
    pub violations: Vec<ShapeViolation>,
    /// Top-level keys the descriptor does not recognize
    pub unrecognized: Vec<String>,
    /// Why the document could not be loaded, if it could not
    pub error: Option<String>,
}

impl ReportData {
    /// Collects report data for a validated document.
    pub fn new(source: impl Into<String>, document: &Value, violations: Vec<ShapeViolation>) -> Self {
        let text = |key: &str| document.get(key).and_then(Value::as_str).map(str::to_string);
        let schema = Schema::manifest();
        let unrecognized = document
            .as_object()
            .map(|map| {
                map.keys()
                    .filter(|k| !schema.is_recognized(k))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Self {
            source: source.into(),
            name: text("name"),
            version: text("version"),
            violations,
            unrecognized,
            error: None,
        }
    }

    /// Report data for a document that could not be read or parsed.
    pub fn failed(source: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: None,
            version: None,
            violations: Vec::new(),
            unrecognized: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Returns true when the document loaded and has no violations.
    pub fn conforms(&self) -> bool {
        self.error.is_none() && self.violations.is_empty()
    }

    /// `name@version`, or the source when identity fields are missing.
    pub fn title(&self) -> String {
        match (&self.name, &self.version) {
            (Some(name), Some(version)) => format!("{}@{}", name, version),
            (Some(name), None) => name.clone(),
            _ => self.source.clone(),
        }
    }

    /// Get count of violations with the given reason
    pub fn count(&self, reason: ViolationReason) -> usize {
        self.violations.iter().filter(|v| v.reason == reason).count()
    }
}

/// Trait for reporters.
pub trait Reporter {
    /// Render the data to the given writer.
    fn render<W: Write>(&self, data: &ReportData, writer: &mut W) -> io::Result<()>;
}

/// Render data in the specified format.
pub fn render<W: Write>(format: ReportFormat, data: &ReportData, writer: &mut W) -> io::Result<()> {
    match format {
        ReportFormat::Text => text::TextReporter.render(data, writer),
        ReportFormat::Json => json::JsonReporter.render(data, writer),
        ReportFormat::Markdown => markdown::MarkdownReporter.render(data, writer),
    }
}

/// Render several documents as one output.
///
/// JSON output is a single array so the result stays one valid document;
/// the other formats simply follow one another.
pub fn render_all<W: Write>(format: ReportFormat, data: &[ReportData], writer: &mut W) -> io::Result<()> {
    match format {
        ReportFormat::Json => json::JsonReporter.render_many(data, writer),
        _ => data.iter().try_for_each(|entry| render(format, entry, writer)),
    }
}

/// Render data to a string.
pub fn render_to_string(format: ReportFormat, data: &ReportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    render(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
pub(crate) fn sample_data() -> ReportData {
    use crate::validate::validate;
    use serde_json::json;

    let document = json!({
        "name": "demo",
        "version": "1.0.0",
        "private": 1,
        "engines": {"npm": ">=9"},
        "dist": {"size": 10},
        "sideEffects": false
    });
    let violations = validate(&document);
    ReportData::new("demo/package.json", &document, violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_format_from_str() {
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!(
            "markdown".parse::<ReportFormat>().unwrap(),
            ReportFormat::Markdown
        );
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert!("invalid".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_report_format_display() {
        assert_eq!(format!("{}", ReportFormat::Json), "json");
        assert_eq!(format!("{}", ReportFormat::Text), "text");
        assert_eq!(format!("{}", ReportFormat::Markdown), "markdown");
    }

    #[test]
    fn test_report_data_counts() {
        let data = sample_data();
        assert!(!data.conforms());
        assert_eq!(data.title(), "demo@1.0.0");
        assert_eq!(data.violations.len(), 3);
        assert_eq!(data.count(ViolationReason::Missing), 1);
        assert_eq!(data.count(ViolationReason::Mismatch), 1);
        assert_eq!(data.count(ViolationReason::Unrecognized), 1);
        assert_eq!(data.unrecognized, vec!["sideEffects"]);
    }

    #[test]
    fn test_failed_document_never_conforms() {
        let data = ReportData::failed("a/package.json", "EOF while parsing an object");
        assert!(!data.conforms());
        assert!(data.violations.is_empty());
        assert_eq!(data.title(), "a/package.json");
    }

    #[test]
    fn test_render_all_json_is_one_document() {
        let valid = json!({"name": "c", "version": "1.0.0"});
        let data = vec![
            sample_data(),
            ReportData::new("c/package.json", &valid, Vec::new()),
        ];
        let mut out = Vec::new();
        render_all(ReportFormat::Json, &data, &mut out).unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        let reports = parsed.as_array().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["source"], "demo/package.json");
        assert_eq!(reports[1]["summary"]["conforms"], true);
    }

    #[test]
    fn test_render_all_text_follows_input_order() {
        let valid = json!({"name": "c", "version": "1.0.0"});
        let data = vec![
            ReportData::failed("a/package.json", "EOF while parsing an object"),
            ReportData::new("c/package.json", &valid, Vec::new()),
        ];
        let mut out = Vec::new();
        render_all(ReportFormat::Text, &data, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "FAIL  a/package.json: EOF while parsing an object",
                "ok    c/package.json (c@1.0.0)",
            ]
        );
    }

    #[test]
    fn test_title_falls_back_to_source() {
        let data = ReportData::new("pkg/package.json", &json!({}), Vec::new());
        assert_eq!(data.title(), "pkg/package.json");
    }
}
