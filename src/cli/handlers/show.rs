//! Show command handler.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::io::Write;

use crate::backend::KeyStore;
use crate::cli::ShowArgs;
use crate::cli::output::OutputFormat;
use crate::domain::SavedNote;
use crate::engine::NoteStore;
use crate::infra::encode_wire;

fn format_time(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Renders one note for reading in a terminal.
pub fn render_note(saved: &SavedNote) -> String {
    let note = saved.note();
    let mut text = format!("# {saved}\n");
    text.push_str(&format!("created: {}\n", format_time(saved.created())));
    text.push_str(&format!("updated: {}\n", format_time(saved.updated())));
    if !note.tags().is_empty() {
        let tags: Vec<&str> = note.tags().iter().map(|t| t.as_str()).collect();
        text.push_str(&format!("tags: {}\n", tags.join(", ")));
    }
    if !note.open().is_empty() || !note.closed().is_empty() {
        text.push('\n');
        for task in note.open() {
            text.push_str(&format!("[ ] {task}\n"));
        }
        for task in note.closed() {
            text.push_str(&format!("[x] {task}\n"));
        }
    }
    if !note.body().trim().is_empty() {
        text.push('\n');
        text.push_str(note.body().trim_end());
        text.push('\n');
    }
    text
}

pub fn handle_show<S: KeyStore>(
    args: &ShowArgs,
    store: &mut NoteStore<S>,
    out: &mut dyn Write,
) -> Result<()> {
    let notes = store.load(&args.ids).with_context(|| "failed to load notes")?;

    match args.format {
        OutputFormat::Human => {
            for (i, saved) in notes.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write!(out, "{}", render_note(saved))?;
            }
        }
        OutputFormat::Json => {
            let plain: Vec<_> = notes.into_iter().map(SavedNote::into_note).collect();
            out.write_all(&encode_wire(&plain)?)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
