//! Delete command handler.

use anyhow::{Context, Result};
use std::io::Write;

use crate::backend::KeyStore;
use crate::cli::DeleteArgs;
use crate::engine::NoteStore;

pub fn handle_delete<S: KeyStore>(
    args: &DeleteArgs,
    store: &mut NoteStore<S>,
    out: &mut dyn Write,
) -> Result<()> {
    let deleted = store
        .delete(&args.ids)
        .with_context(|| "failed to delete notes")?;

    let missing = args.ids.len().saturating_sub(deleted);
    if missing > 0 {
        log::warn!("{missing} of the given ids had no note");
    }
    writeln!(out, "Deleted {deleted} note(s).")?;
    Ok(())
}
