//! Markdown report implementation.
//!
//! Renders validation results in Markdown format for pull request comments
//! and documentation.

use super::{ReportData, Reporter};
use crate::validate::{describe_actual, ViolationReason};
use std::io::{self, Write};

/// Markdown reporter implementation.
pub struct MarkdownReporter;

/// Escapes characters that would break a table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl Reporter for MarkdownReporter {
    fn render<W: Write>(&self, data: &ReportData, writer: &mut W) -> io::Result<()> {
        // Title
        writeln!(writer, "# Manifest Check: {}", data.title())?;
        writeln!(writer)?;
        writeln!(writer, "**Source:** `{}`", data.source)?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Violations | {} |", data.violations.len())?;
        writeln!(
            writer,
            "| Missing | {} |",
            data.count(ViolationReason::Missing)
        )?;
        writeln!(
            writer,
            "| Mismatched | {} |",
            data.count(ViolationReason::Mismatch)
        )?;
        writeln!(
            writer,
            "| Unrecognized | {} |",
            data.count(ViolationReason::Unrecognized)
        )?;
        writeln!(writer)?;

        if let Some(error) = &data.error {
            writeln!(writer, "## Load Error")?;
            writeln!(writer)?;
            writeln!(writer, "```text")?;
            writeln!(writer, "{}", error)?;
            writeln!(writer, "```")?;
            writeln!(writer)?;
        } else if data.conforms() {
            writeln!(writer, "The document conforms to the manifest schema.")?;
            writeln!(writer)?;
        } else {
            writeln!(writer, "## Violations")?;
            writeln!(writer)?;
            writeln!(writer, "| Path | Reason | Expected | Found |")?;
            writeln!(writer, "|------|--------|----------|-------|")?;
            for violation in &data.violations {
                writeln!(
                    writer,
                    "| `{}` | {} | {} | {} |",
                    cell(&violation.path.to_string()),
                    violation.reason,
                    cell(&violation.expected),
                    cell(&describe_actual(&violation.actual))
                )?;
            }
            writeln!(writer)?;
        }

        if !data.unrecognized.is_empty() {
            writeln!(writer, "## Unrecognized Top-Level Keys")?;
            writeln!(writer)?;
            for key in &data.unrecognized {
                writeln!(writer, "- `{}`", key)?;
            }
            writeln!(writer)?;
        }

        // Footer
        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by pkgshape*")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{render_to_string, sample_data, ReportFormat};
    use serde_json::json;

    #[test]
    fn test_markdown_sections() {
        let out = render_to_string(ReportFormat::Markdown, &sample_data()).unwrap();

        assert!(out.starts_with("# Manifest Check: demo@1.0.0"));
        assert!(out.contains("| Violations | 3 |"));
        assert!(out.contains("## Violations"));
        assert!(out.contains("## Unrecognized Top-Level Keys"));
        assert!(out.contains("- `sideEffects`"));
        assert!(out.ends_with("*Generated by pkgshape*\n"));
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let out = render_to_string(ReportFormat::Markdown, &sample_data()).unwrap();
        assert!(out.contains("boolean \\| string"));
    }

    #[test]
    fn test_markdown_conforming_document() {
        let doc = json!({"name": "x", "version": "1.0.0"});
        let data = ReportData::new("package.json", &doc, Vec::new());
        let out = render_to_string(ReportFormat::Markdown, &data).unwrap();

        assert!(out.contains("The document conforms to the manifest schema."));
        assert!(!out.contains("## Violations"));
    }

    #[test]
    fn test_markdown_load_failure() {
        let data = ReportData::failed("a/package.json", "EOF while parsing an object");
        let out = render_to_string(ReportFormat::Markdown, &data).unwrap();

        assert!(out.contains("## Load Error"));
        assert!(out.contains("EOF while parsing an object"));
        assert!(!out.contains("conforms to the manifest schema"));
        assert!(!out.contains("## Violations"));
    }
}
