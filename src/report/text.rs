//! Plain text report implementation.

use super::{ReportData, Reporter};
use crate::validate::describe_actual;
use std::io::{self, Write};

/// Text reporter implementation.
pub struct TextReporter;

impl Reporter for TextReporter {
    fn render<W: Write>(&self, data: &ReportData, writer: &mut W) -> io::Result<()> {
        if let Some(error) = &data.error {
            return writeln!(writer, "FAIL  {}: {}", data.source, error);
        }
        if data.conforms() {
            writeln!(writer, "ok    {} ({})", data.source, data.title())?;
            return Ok(());
        }

        writeln!(
            writer,
            "FAIL  {} ({}): {} violation(s)",
            data.source,
            data.title(),
            data.violations.len()
        )?;
        for violation in &data.violations {
            writeln!(
                writer,
                "  {:<12} {}: expected {}, found {}",
                violation.reason.label(),
                violation.path,
                violation.expected,
                describe_actual(&violation.actual)
            )?;
        }
        Ok(())
    }
}
