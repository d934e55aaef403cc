//! JSON playlist files.
//!
//! [`JsonPlaylistFile`] reads a playlist export holding one account's
//! playlists with their track features. [`JsonExport`] writes an ordered
//! playlist as a list of uris.

use crate::collab::{Account, PlaylistInfo, PlaylistLocation, PlaylistSink, TrackSource};
use crate::track::Track;
use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// One playlist of an export file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedPlaylist {
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Contents of a playlist export file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistExport {
    pub owner: Account,
    #[serde(default)]
    pub playlists: Vec<ExportedPlaylist>,
}

/// Read-only Track Source over a playlist export.
///
/// Playlist ids are positions within the file.
#[derive(Debug, Clone)]
pub struct JsonPlaylistFile {
    export: PlaylistExport,
}

impl JsonPlaylistFile {
    /// Parses the export at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid export.
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read playlist export {}", path.display()))?;
        let export: PlaylistExport = serde_json::from_str(&content)
            .with_context(|| format!("Invalid playlist export {}", path.display()))?;
        debug!(
            "Loaded {} playlists of {} from {}",
            export.playlists.len(),
            export.owner,
            path.display()
        );
        Ok(Self { export })
    }

    #[must_use]
    pub fn owner(&self) -> &Account {
        &self.export.owner
    }
}

impl TrackSource for JsonPlaylistFile {
    fn playlists(&self, account: &Account) -> Result<Vec<PlaylistInfo>> {
        if *account != self.export.owner {
            return Ok(Vec::new());
        }
        Ok(self
            .export
            .playlists
            .iter()
            .enumerate()
            .map(|(index, p)| PlaylistInfo {
                id: index.to_string(),
                name: p.name.clone(),
                track_count: p.tracks.len(),
            })
            .collect())
    }

    fn tracks(&self, playlist: &PlaylistInfo) -> Result<Vec<Track>> {
        playlist
            .id
            .parse::<usize>()
            .ok()
            .and_then(|index| self.export.playlists.get(index))
            .map(|p| p.tracks.clone())
            .ok_or_else(|| anyhow!("Playlist '{}' is not part of this export", playlist.name))
    }
}

/// An ordered playlist as written by [`JsonExport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedPlaylist {
    pub owner: Account,
    pub name: String,
    pub uris: Vec<String>,
}

/// Playlist Sink writing a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonExport {
    path: PathBuf,
}

impl JsonExport {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PlaylistSink for JsonExport {
    /// Writes to a temporary file next to the target and renames it into
    /// place, so a failed write leaves no partial playlist behind.
    fn create_playlist(
        &mut self,
        account: &Account,
        name: &str,
        uris: &[String],
    ) -> Result<PlaylistLocation> {
        let target = self
            .path
            .absolutize()
            .with_context(|| format!("Invalid export path {}", self.path.display()))?
            .into_owned();
        let dir = target
            .parent()
            .ok_or_else(|| anyhow!("Export path {} has no parent directory", target.display()))?;

        let playlist = OrderedPlaylist {
            owner: account.clone(),
            name: name.to_string(),
            uris: uris.to_vec(),
        };

        let mut file = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        {
            let mut writer = BufWriter::new(file.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, &playlist)
                .context("Failed to serialize ordered playlist")?;
            writer.flush()?;
        }
        file.persist(&target)
            .with_context(|| format!("Failed to write {}", target.display()))?;

        info!("Wrote playlist '{name}' with {} tracks to {}", uris.len(), target.display());
        Ok(PlaylistLocation(target.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const EXPORT: &str = r#"{
        "owner": "bob",
        "playlists": [
            { "name": "Warmup", "tracks": [] },
            { "name": "Party", "tracks": [
                { "name": "A", "uri": "spotify:track:a", "tempo": 120.0, "danceability": 0.8,
                  "duration_ms": 200000, "loudness_db": -5.2 },
                { "name": "B", "uri": "spotify:track:b", "danceability": 0.4 },
                { "name": "C", "uri": "spotify:track:c", "tempo": 95.5 }
            ] }
        ]
    }"#;

    #[test]
    fn test_read_export() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("export.json");
        fs::write(&path, EXPORT)?;

        let source = JsonPlaylistFile::open(&path)?;
        let bob = Account::new("bob");
        let playlists = source.playlists(&bob)?;
        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[1].name, "Party");
        assert_eq!(playlists[1].track_count, 3);

        let tracks = source.tracks(&playlists[1])?;
        assert_eq!(tracks[1].tempo, None);
        assert_eq!(tracks[2].danceability, None);
        assert_eq!(tracks[0].loudness_db, Some(-5.2));

        assert!(source.playlists(&Account::new("alice"))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_export_is_an_error() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ \"playlists\": [] }")?;

        assert!(JsonPlaylistFile::open(&path).is_err());
        assert!(JsonPlaylistFile::open(&dir.path().join("missing.json")).is_err());
        Ok(())
    }

    #[test]
    fn test_export_writes_exact_order() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("ordered.json");
        let uris = vec!["uri:c".to_string(), "uri:a".to_string(), "uri:c".to_string()];

        let location =
            JsonExport::new(&path).create_playlist(&Account::new("bob"), "Dance", &uris)?;
        assert_eq!(location.to_string(), path.display().to_string());

        let written: OrderedPlaylist = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(written.uris, uris);
        assert_eq!(written.name, "Dance");
        assert_eq!(written.owner, Account::new("bob"));
        Ok(())
    }
}
