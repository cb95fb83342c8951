//! Search command handler.

use anyhow::{Context, Result};
use std::io::Write;

use super::report_saves;
use crate::backend::KeyStore;
use crate::cli::SearchArgs;
use crate::cli::output::OutputFormat;
use crate::domain::{Note, NoteId, SavedNote};
use crate::engine::{NoteStore, QueryStrategy};
use crate::infra::{EditorLauncher, edit_notes, encode_document, encode_wire};

/// Resolves the query and loads every matching note that still exists.
///
/// Index entries pointing at deleted notes are reported and skipped.
fn find_notes<S: KeyStore>(
    store: &mut NoteStore<S>,
    tags: &[String],
    strategy: QueryStrategy,
) -> Result<Vec<SavedNote>> {
    let ids = store
        .resolve(tags, strategy)
        .with_context(|| format!("failed to search for '{}'", tags.join(",")))?;

    let mut live: Vec<NoteId> = Vec::with_capacity(ids.len());
    for id in ids {
        if store.contains(id)? {
            live.push(id);
        } else {
            log::warn!("tag index points at missing note {id}; skipping");
        }
    }
    Ok(store.load(&live)?)
}

pub fn handle_search<S: KeyStore, E: EditorLauncher + ?Sized>(
    args: &SearchArgs,
    strategy: QueryStrategy,
    store: &mut NoteStore<S>,
    editor: &E,
    out: &mut dyn Write,
) -> Result<()> {
    let found = find_notes(store, &args.tags, strategy)?;
    let notes: Vec<Note> = found.into_iter().map(SavedNote::into_note).collect();

    if args.print {
        match args.format {
            OutputFormat::Human => write!(out, "{}", encode_document(&notes)?)?,
            OutputFormat::Json => {
                out.write_all(&encode_wire(&notes)?)?;
                writeln!(out)?;
            }
        }
        return Ok(());
    }

    if notes.is_empty() {
        writeln!(out, "No notes found.")?;
        return Ok(());
    }

    let mut edited = edit_notes(&notes, editor).with_context(|| "editing notes failed")?;
    let report = store
        .save_all(&mut edited)
        .with_context(|| "failed to save notes")?;
    report_saves(&report, OutputFormat::Human, out)
}
