//! Reorders playlists into tempo waves for continuous dancing.
//!
//! Core modules:
//! - [`wave`] - Tempo wave partitioning
//! - [`refine`] - Danceability refinement
//! - [`pipeline`] - Validated entry points running both stages
//!
//! ### Supporting Modules
//!
//! - [`track`] - Track records and missing-feature ordering
//! - [`collab`] - Track Source / Playlist Sink traits
//! - [`library`] - SQLite playlist library
//! - [`json_file`] - JSON playlist exports
//! - [`summary`] - Playlist statistics
//! - [`config`] - Data directory and configuration file handling
//! - [`cli`] - Command-line interface definitions
//! - [`completion`] - Shell completion generation
//! - [`prompt`] - Interactive playlist selection
//!
//! ## Quick Start Example
//!
//! ```
//! use dancerator::collab::{Account, PlaylistSink, TrackSource};
//! use dancerator::library::Library;
//! use dancerator::{pipeline, Track};
//!
//! let mut library = Library::open_in_memory()?;
//! let bob = Account::new("bob");
//! library.import_playlist(&bob, "Party", &[
//!     Track::new("Slow", "uri:slow").with_tempo(80.0).with_danceability(0.4),
//!     Track::new("Fast", "uri:fast").with_tempo(160.0).with_danceability(0.9),
//! ])?;
//!
//! let party = dancerator::collab::find_playlist(&library, &bob, "Party")?;
//! let ordered = pipeline::reorder(library.tracks(&party)?, 10)?;
//! let uris: Vec<String> = ordered.into_iter().map(|t| t.uri).collect();
//! let location = library.create_playlist(&bob, "Party (Dance Order)", &uris)?;
//! println!("Saved as {location}");
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Ordering
//!
//! 1. Tracks are sorted by tempo and dealt into `N / period + 1` sections by
//!    stride. Each section is folded into a rise-then-fall wave.
//! 2. Positions `period` apart form a slot; every slot is ranked by
//!    danceability. The final order sorts by `(rank, tempo group)`.
//!
//! Tracks without tempo sort after every track with one; tracks without
//! danceability rank behind every track of their slot with one. Neither is
//! ever dropped.

pub mod cli;
pub mod collab;
pub mod completion;
pub mod config;
pub mod error;
pub mod json_file;
pub mod library;
pub mod pipeline;
pub mod prompt;
pub mod refine;
pub mod summary;
pub mod track;
pub mod wave;

pub use error::OrderError;
pub use pipeline::{reorder, reorder_with, OrderConfig};
pub use track::{AnnotatedTrack, Track};
