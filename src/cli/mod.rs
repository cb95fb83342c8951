//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::NoteId;
use crate::engine::QueryStrategy;
use output::OutputFormat;

/// keep - tagged notes and task lists in a key-value store
#[derive(Parser, Debug)]
#[command(name = "keep", version, about, long_about = None)]
pub struct Cli {
    /// Store location: a SQLite file path or a redis:// URL
    #[arg(short, long, global = true, env = "KEEP_STORE")]
    pub store: Option<String>,

    /// Key namespace inside the store
    #[arg(long, global = true)]
    pub namespace: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a new note in your editor
    New(NewArgs),

    /// List all tags
    Tags(TagsArgs),

    /// Find notes by tag, then edit or print them
    Search(SearchArgs),

    /// Print notes by id
    Show(ShowArgs),

    /// Delete notes by id
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Save notes from a JSON payload (file or stdin)
    Import(ImportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug, Default)]
pub struct NewArgs {
    /// Title to prefill
    #[arg(long)]
    pub title: Option<String>,

    /// Tag to prefill (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Save the prefilled note without opening the editor
    #[arg(long)]
    pub no_edit: bool,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug, Default)]
pub struct TagsArgs {
    /// Show how many notes carry each tag
    #[arg(long)]
    pub counts: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug, Default)]
pub struct SearchArgs {
    /// Tags to match, comma separated
    #[arg(required = true, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// How to combine several tags [default: intersection]
    #[arg(long)]
    pub strategy: Option<QueryStrategy>,

    /// Print the matching notes instead of editing them
    #[arg(short, long)]
    pub print: bool,

    /// Output format for --print
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Default)]
pub struct ShowArgs {
    /// Note ids
    #[arg(required = true)]
    pub ids: Vec<NoteId>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `delete` command
#[derive(Parser, Debug, Default)]
pub struct DeleteArgs {
    /// Note ids
    #[arg(required = true)]
    pub ids: Vec<NoteId>,
}

/// Arguments for the `import` command
#[derive(Parser, Debug, Default)]
pub struct ImportArgs {
    /// JSON file holding an array of notes; reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
