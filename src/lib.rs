// src/lib.rs
pub mod application;
pub mod cli;
pub mod client;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::io::{Read, Write};
use std::sync::Arc;
use anyhow::{Context, Result};
use application::{NoteDeleter, NoteLister, NoteViewer, NoteWriter};
use client::{ClientState, FilePrefsStore};
use infrastructure::{Config, FsNoteRepository};
use ports::TreePresenter;
use tracing::{debug, info};
use crate::cli::args::{Args, Command, PrefsAction};

pub fn run(args: Args) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_io(args, &mut std::io::stdin(), &mut out)
}

/// Execute a parsed command, reading note content from `input` and printing
/// results to `out`
pub fn run_with_io(args: Args, input: &mut dyn Read, out: &mut dyn Write) -> Result<()> {
    debug!(?args, "Starting notedir with arguments");

    let config = resolve_config(&args)?;
    debug!(?config, "Resolved configuration");

    match args.command {
        Command::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config)
        }
        Command::List { json, ids } => {
            let lister = NoteLister::new(open_repository(&config, false)?);
            if ids {
                for id in lister.list_note_ids()? {
                    writeln!(out, "{}", id)?;
                }
                return Ok(());
            }
            let tree = lister.list_tree()?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&tree)?)?;
            } else {
                write!(out, "{}", TreePresenter::new().render(&tree))?;
            }
            Ok(())
        }
        Command::Read { note } => {
            let viewer = NoteViewer::new(open_repository(&config, false)?);
            let note = viewer.view_note(&note)?;
            write!(out, "{}", note.content)?;
            Ok(())
        }
        Command::Write { note, content } => {
            let content = match content {
                Some(content) => content,
                None => {
                    let mut buf = String::new();
                    input
                        .read_to_string(&mut buf)
                        .context("Failed to read note content from stdin")?;
                    buf
                }
            };
            let writer = NoteWriter::new(open_repository(&config, config.notes.create_root)?);
            let id = writer.write_note(&note, &content)?;
            info!(%id, "Note written");
            writeln!(out, "Wrote {}", id)?;
            Ok(())
        }
        Command::Delete { note } => {
            let deleter = NoteDeleter::new(open_repository(&config, false)?);
            let id = deleter.delete_note(&note)?;
            writeln!(out, "Deleted {}", id)?;
            Ok(())
        }
        Command::Prefs { file, action } => {
            let store = match file {
                Some(path) => FilePrefsStore::new(path),
                None => FilePrefsStore::default_location()?,
            };
            debug!(path = %store.path().display(), "Using preferences file");
            run_prefs(ClientState::init(store)?, action, out)
        }
    }
}

/// Config file (or defaults) with the global `--root` override applied
pub fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(root) = &args.root {
        debug!(?root, "Using notes root from command line");
        config.notes.root = root.clone();
    }
    Ok(config)
}

fn open_repository(config: &Config, create: bool) -> Result<FsNoteRepository> {
    if create {
        FsNoteRepository::create(&config.notes.root)
    } else {
        FsNoteRepository::new(&config.notes.root)
    }
}

fn serve(config: Config) -> Result<()> {
    let repository = Arc::new(open_repository(&config, config.notes.create_root)?);
    info!(root = %repository.root().display(), "Serving notes");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(ports::serve(repository, &config))
}

fn run_prefs(
    mut state: ClientState<FilePrefsStore>,
    action: PrefsAction,
    out: &mut dyn Write,
) -> Result<()> {
    match action {
        PrefsAction::Show => {
            writeln!(out, "theme: {}", state.theme())?;
            writeln!(out, "backend_url: {}", state.backend_url())?;
        }
        PrefsAction::ToggleTheme => {
            let theme = state.toggle_theme()?;
            writeln!(out, "theme: {}", theme)?;
        }
        PrefsAction::SetBackend { url } => {
            state.set_backend_url(&url)?;
            writeln!(out, "backend_url: {}", state.backend_url())?;
        }
    }
    Ok(())
}
