//! Plain-text rendering of courses and GPA summaries.
//!
//! Shared by the interactive menu and the one-shot `list` / `summary`
//! commands.

use std::io::{self, Write};

use crate::gradebook::Gradebook;
use crate::summary::GpaSummary;

/// Write every course as a fixed-width table.
///
/// An empty gradebook prints a short notice instead of an empty table.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_course_table<W: Write>(out: &mut W, gradebook: &Gradebook) -> io::Result<()> {
    if gradebook.is_empty() {
        return writeln!(out, "No courses yet.");
    }

    writeln!(out, "\n=== GRADEBOOK ===")?;
    writeln!(
        out,
        "{:<10} {:<25} {:<5} {:<10} {:<5}",
        "Code", "Name", "Cr", "Semester", "Score"
    )?;
    writeln!(out, "{}", "-".repeat(60))?;

    for (code, course) in gradebook.list() {
        writeln!(
            out,
            "{:<10} {:<25} {:<5} {:<10} {:<5}",
            code,
            course.name,
            course.credit,
            course.semester,
            format_score(course.score)
        )?;
    }
    Ok(())
}

/// Write the overall GPA followed by one line per semester.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &GpaSummary,
    decimals: usize,
) -> io::Result<()> {
    writeln!(out, "\n=== GPA SUMMARY ===")?;
    writeln!(out, "Overall GPA: {:.*}", decimals, summary.overall)?;

    writeln!(out, "\nBy Semester:")?;
    for semester in &summary.semesters {
        writeln!(out, "  {}: {:.*}", semester.semester, decimals, semester.gpa)?;
    }
    Ok(())
}

/// Write a GPA summary as pretty JSON.
///
/// An empty gradebook has no summary and is written as `null`, so the
/// output always parses as JSON.
///
/// # Errors
///
/// Returns any error from serialization or the underlying writer.
pub fn write_summary_json<W: Write>(
    out: &mut W,
    summary: Option<&GpaSummary>,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &summary)?;
    writeln!(out)
}

/// Scores keep at least one decimal ("8.0", "9.25").
fn format_score(score: f64) -> String {
    format!("{score:?}")
}
