//! Output formats shared by the commands.

use clap::ValueEnum;
use serde::Serialize;

/// How a command prints its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for a terminal
    #[default]
    Human,
    /// JSON for scripts
    Json,
}

/// Envelope for JSON results: `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// One note written by `new`, `search` or `import`.
#[derive(Debug, Serialize)]
pub struct SavedListing {
    pub id: u64,
    pub title: String,
}

/// A tag, with its note count when `--counts` is given.
#[derive(Debug, Serialize)]
pub struct TagListing {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}
