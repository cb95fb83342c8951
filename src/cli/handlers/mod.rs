//! Command handlers for the CLI.
//!
//! Handlers are generic over the backing store and the editor so tests can
//! drive them against an in-memory store and a scripted editor. Output goes
//! to the writer they are given.

mod delete;
mod import;
mod new;
mod search;
mod show;
mod tags;


use anyhow::{Result, bail};
use std::io::Write;

use crate::cli::output::{Output, OutputFormat, SavedListing};
use crate::engine::SaveReport;

// Re-export public items
pub use delete::handle_delete;
pub use import::handle_import;
pub use new::{handle_new, note_template};
pub use search::handle_search;
pub use show::{handle_show, render_note};
pub use tags::handle_tags;

// ===========================================
// Shared Utilities
// ===========================================

/// Prints what a batch save wrote, then fails if any note was rejected.
///
/// Rejected notes are listed by their position in the batch; everything
/// else in the batch has already been saved.
pub(crate) fn report_saves(
    report: &SaveReport,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if report.saved.is_empty() && report.rejected.is_empty() {
                writeln!(out, "Nothing to save.")?;
            }
            for saved in &report.saved {
                writeln!(out, "Saved: {saved}")?;
            }
        }
        OutputFormat::Json => {
            let listings: Vec<SavedListing> = report
                .saved
                .iter()
                .map(|n| SavedListing {
                    id: n.id().get(),
                    title: n.title().to_string(),
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&Output::new(listings))?)?;
        }
    }

    if !report.rejected.is_empty() {
        let details: Vec<String> = report
            .rejected
            .iter()
            .map(|(position, err)| format!("note #{}: {err}", position + 1))
            .collect();
        bail!(
            "{} note(s) rejected: {}",
            report.rejected.len(),
            details.join("; ")
        );
    }
    Ok(())
}
