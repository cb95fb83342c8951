//! Import command handler: the JSON save path.

use anyhow::{Context, Result};
use std::io::{Read, Write};

use super::report_saves;
use crate::backend::KeyStore;
use crate::cli::ImportArgs;
use crate::engine::NoteStore;
use crate::infra::decode_wire;

pub fn handle_import<S: KeyStore>(
    args: &ImportArgs,
    store: &mut NoteStore<S>,
    stdin: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<()> {
    let payload = match &args.file {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            stdin
                .read_to_end(&mut buf)
                .with_context(|| "failed to read stdin")?;
            buf
        }
    };

    let mut notes = decode_wire(&payload).with_context(|| "failed to decode notes")?;
    log::debug!("importing {} notes", notes.len());

    let report = store
        .save_all(&mut notes)
        .with_context(|| "failed to save notes")?;
    report_saves(&report, args.format, out)
}
