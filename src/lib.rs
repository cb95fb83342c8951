//! notekeep - tagged notes and task lists in a key-value store

pub mod backend;
pub mod cli;
pub mod domain;
pub mod engine;
pub mod infra;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::LevelFilter;
use std::io;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_delete, handle_import, handle_new, handle_search, handle_show, handle_tags,
    },
};
use engine::NoteStore;
use infra::CommandEditor;

/// Environment variable holding an `env_logger` filter, e.g. `keep=debug`.
pub const LOG_ENV: &str = "KEEP_LOG";

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // KEEP_LOG, when set, overrides the -v level
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_env(LOG_ENV)
        .format_timestamp(None)
        .try_init();
}

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(args.shell, &mut command, name, &mut io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let location = config.store_location(cli.store.as_deref());
    let namespace = config.namespace(cli.namespace.as_deref());

    let backend = backend::open_backend(&location)
        .with_context(|| format!("failed to open store at {location}"))?;
    let mut store = NoteStore::open(backend, &namespace)
        .with_context(|| format!("failed to initialize store at {location}"))?;
    let editor = CommandEditor::new(config.editor());
    let mut out = io::stdout().lock();

    match &cli.command {
        Command::New(args) => handle_new(args, &mut store, &editor, &mut out),
        Command::Tags(args) => handle_tags(args, &mut store, &mut out),
        Command::Search(args) => {
            let strategy = config.strategy(args.strategy);
            handle_search(args, strategy, &mut store, &editor, &mut out)
        }
        Command::Show(args) => handle_show(args, &mut store, &mut out),
        Command::Delete(args) => handle_delete(args, &mut store, &mut out),
        Command::Import(args) => handle_import(args, &mut store, &mut io::stdin().lock(), &mut out),
        Command::Completions(_) => Ok(()),
    }
}
