//! # Command-Line Interface Module
//!
//! Clap definitions for the `dancerator` binary.
//!
//! ## Commands
//!
//! - `import`: Load a JSON playlist export into the library
//! - `playlists`: List the playlists of an account
//! - `show`: Print a playlist with its audio features
//! - `order`: Reorder a playlist into dance waves and save the result
//! - `completion`: Print a shell completion script
//!
//! ## Examples
//!
//! ```bash
//! dancerator import ~/exports/bob.json
//! dancerator order "Friday Night" --period 8
//! dancerator order "Friday Night" --export friday.json --dry-run
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "dancerator")]
#[command(about = "Dancerator: Reorder playlists into tempo waves for continuous dancing")]
#[command(version)]
pub struct Args {
    /// Library database file
    ///
    /// Defaults to `library.db` in the platform data directory.
    #[arg(long, global = true, env = "DANCERATOR_DB", value_hint = clap::ValueHint::FilePath)]
    pub db: Option<PathBuf>,

    /// Configuration file
    ///
    /// Defaults to `dancerator/config.json` in the platform config directory.
    #[arg(long, global = true, env = "DANCERATOR_CONFIG", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import playlists from a JSON export into the library
    ///
    /// The export names its owner account and holds every playlist with the
    /// audio features of its tracks. Features a provider could not deliver
    /// may be left out per track.
    Import {
        /// JSON export file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List the playlists of an account
    Playlists {
        /// Account owning the playlists
        #[arg(long, env = "DANCERATOR_OWNER")]
        owner: Option<String>,
    },

    /// Show a playlist with its audio features and a summary
    Show {
        /// Playlist name
        playlist: String,

        /// Account owning the playlist
        #[arg(long, env = "DANCERATOR_OWNER")]
        owner: Option<String>,
    },

    /// Reorder a playlist for continuous dancing
    ///
    /// Tempo rises and falls in waves of roughly `period` tracks while more
    /// danceable tracks move towards the start. The source playlist is left
    /// untouched; the result is saved as a new playlist.
    Order {
        /// Playlist name. Prompts for one when omitted.
        playlist: Option<String>,

        /// Account owning the playlist
        #[arg(long, env = "DANCERATOR_OWNER")]
        owner: Option<String>,

        /// Tracks per tempo wave
        #[arg(short, long, env = "DANCERATOR_PERIOD", allow_negative_numbers = true)]
        period: Option<i64>,

        /// Tracks per tempo group, the tie-break granularity of the final order
        #[arg(long, env = "DANCERATOR_GROUP_WIDTH")]
        group_width: Option<usize>,

        /// Name of the new playlist
        ///
        /// Defaults to the source name followed by "(Dance Order)".
        #[arg(short, long)]
        name: Option<String>,

        /// Write the new playlist to this JSON file instead of the library
        #[arg(long, value_hint = clap::ValueHint::FilePath)]
        export: Option<PathBuf>,

        /// Print the new order without saving it
        #[arg(long)]
        dry_run: bool,

        /// Print every track with its tempo and danceability groups
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate shell completions
    ///
    /// Usage: dancerator completion bash > ~/.local/share/bash-completion/completions/dancerator
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
