//! Command-line arguments and subcommands for the `inp` tool.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "inp",
    version,
    about = "Parse, validate and re-serialize MCNP input decks."
)]
pub struct InpArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse every card of a deck, or of every deck below a directory.
    Check {
        /// A deck file, or a directory searched for `*.inp` and `*.i` files.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Re-serialize every card of a deck.
    Format {
        #[arg(required = true)]
        file: PathBuf,
        /// Print a diff and fail if formatting would change the file.
        #[arg(long)]
        check: bool,
        /// Formatting options (YAML, or JSON by `.json` extension).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the typed card tree as JSON.
    Ast {
        #[arg(required = true)]
        file: PathBuf,
    },
    /// List the registered producers of one family, or of all of them.
    Grammar {
        /// Family name, e.g. `surface` or `cell_option`.
        family: Option<String>,
    },
}
