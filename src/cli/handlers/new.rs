//! New command handler.

use anyhow::{Context, Result};
use std::io::Write;

use super::report_saves;
use crate::backend::KeyStore;
use crate::cli::NewArgs;
use crate::cli::output::OutputFormat;
use crate::domain::{Note, Tag};
use crate::engine::NoteStore;
use crate::infra::{EditorLauncher, edit_notes};

/// Builds the prefilled note handed to the editor.
pub fn note_template(args: &NewArgs) -> Result<Note> {
    let tags = args
        .tags
        .iter()
        .map(|t| Tag::new(t).with_context(|| format!("invalid tag '{t}'")))
        .collect::<Result<Vec<_>>>()?;

    Ok(Note::builder()
        .title(args.title.as_deref().unwrap_or_default().trim())
        .tags(tags)
        .build())
}

pub fn handle_new<S: KeyStore, E: EditorLauncher + ?Sized>(
    args: &NewArgs,
    store: &mut NoteStore<S>,
    editor: &E,
    out: &mut dyn Write,
) -> Result<()> {
    let template = note_template(args)?;

    let mut notes = if args.no_edit {
        vec![template]
    } else {
        edit_notes(&[template], editor).with_context(|| "editing new note failed")?
    };

    let report = store
        .save_all(&mut notes)
        .with_context(|| "failed to save notes")?;
    report_saves(&report, OutputFormat::Human, out)
}
