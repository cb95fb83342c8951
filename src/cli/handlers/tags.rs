//! Tags command handler.

use anyhow::{Context, Result};
use std::io::Write;

use crate::backend::KeyStore;
use crate::cli::TagsArgs;
use crate::cli::output::{Output, OutputFormat, TagListing};
use crate::engine::NoteStore;

pub fn handle_tags<S: KeyStore>(
    args: &TagsArgs,
    store: &mut NoteStore<S>,
    out: &mut dyn Write,
) -> Result<()> {
    let listings: Vec<TagListing> = if args.counts {
        store
            .tag_counts()
            .with_context(|| "failed to count tags")?
            .into_iter()
            .map(|(tag, count)| TagListing {
                name: tag.to_string(),
                count: Some(count),
            })
            .collect()
    } else {
        store
            .list_tags()
            .with_context(|| "failed to list tags")?
            .into_iter()
            .map(|tag| TagListing {
                name: tag.to_string(),
                count: None,
            })
            .collect()
    };

    match args.format {
        OutputFormat::Human => {
            if listings.is_empty() {
                writeln!(out, "No tags found.")?;
            }
            for t in &listings {
                match t.count {
                    Some(count) => writeln!(out, "{} ({})", t.name, count)?,
                    None => writeln!(out, "{}", t.name)?,
                }
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&Output::new(listings))?)?;
        }
    }
    Ok(())
}
