// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Notes root directory, overrides the config file
    #[arg(short, long, value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the notes HTTP API
    Serve {
        /// Address to bind, overrides the config file
        #[arg(long, value_name = "HOST")]
        host: Option<String>,

        /// Port to bind, overrides the config file
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,
    },

    /// List all notes and folders
    List {
        /// Output the tree as JSON instead of indented text
        #[arg(long, conflicts_with = "ids")]
        json: bool,

        /// Print only note ids, one per line
        #[arg(long)]
        ids: bool,
    },

    /// Print the content of a note
    Read {
        /// Note path relative to the notes root
        #[arg(value_name = "NOTE")]
        note: String,
    },

    /// Create or overwrite a note
    Write {
        /// Note path relative to the notes root
        #[arg(value_name = "NOTE")]
        note: String,

        /// Content to write; read from stdin when omitted
        #[arg(long, value_name = "TEXT")]
        content: Option<String>,
    },

    /// Delete a note
    Delete {
        /// Note path relative to the notes root
        #[arg(value_name = "NOTE")]
        note: String,
    },

    /// Show or change client preferences
    Prefs {
        /// Preferences file, defaults to the user config directory
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,

        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PrefsAction {
    /// Print the saved preferences
    Show,

    /// Switch between light and dark theme
    ToggleTheme,

    /// Set the backend base URL
    SetBackend {
        #[arg(value_name = "URL")]
        url: String,
    },
}
