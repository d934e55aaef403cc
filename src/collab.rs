//! Collaborators around the ordering core.
//!
//! A [`TrackSource`] supplies fully materialized track records for a
//! playlist; a [`PlaylistSink`] materializes an ordered list of uris as a
//! new playlist. The core never talks to either directly: the binary reads,
//! orders, then writes.

use crate::track::Track;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the account that owns playlists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account(pub String);

impl Account {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A playlist as listed by a [`TrackSource`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistInfo {
    /// Source-specific identifier
    pub id: String,
    pub name: String,
    pub track_count: usize,
}

/// Where a [`PlaylistSink`] put the playlist it created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistLocation(pub String);

impl fmt::Display for PlaylistLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait TrackSource {
    /// Lists the playlists of `account`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn playlists(&self, account: &Account) -> Result<Vec<PlaylistInfo>>;

    /// Returns every track of `playlist` in playlist order. Tracks the
    /// feature provider knows nothing about come back with `None` fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the playlist is gone or cannot be read.
    fn tracks(&self, playlist: &PlaylistInfo) -> Result<Vec<Track>>;
}

pub trait PlaylistSink {
    /// Creates playlist `name` for `account` holding `uris` in exactly this
    /// order. Nothing is committed if this fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the playlist cannot be written.
    fn create_playlist(
        &mut self,
        account: &Account,
        name: &str,
        uris: &[String],
    ) -> Result<PlaylistLocation>;
}

/// Looks up a playlist of `account` by its exact name.
///
/// # Errors
///
/// Returns an error naming the available playlists if none matches.
pub fn find_playlist<S: TrackSource + ?Sized>(
    source: &S,
    account: &Account,
    name: &str,
) -> Result<PlaylistInfo> {
    let playlists = source.playlists(account)?;
    if let Some(found) = playlists.iter().find(|p| p.name == name) {
        return Ok(found.clone());
    }

    let available: Vec<&str> = playlists.iter().map(|p| p.name.as_str()).collect();
    Err(anyhow!(
        "Playlist not found: '{name}'. Playlists of {account}: {}",
        if available.is_empty() {
            "(none)".to_string()
        } else {
            available.join(", ")
        }
    ))
}
