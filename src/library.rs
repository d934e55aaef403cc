//! Local playlist library stored in SQLite.
//!
//! Acts as both Track Source and Playlist Sink. Track features live in one
//! table keyed by uri, so importing a track a second time refreshes its
//! features for every playlist that contains it.
//!
//! ## Schema
//!
//! ```text
//! tracks          (uri PK, name, tempo, danceability, duration_ms, loudness_db)
//! playlists       (id PK, owner, name)
//! playlist_tracks (playlist_id, position, uri)   PK (playlist_id, position)
//! ```

use crate::collab::{Account, PlaylistInfo, PlaylistLocation, PlaylistSink, TrackSource};
use crate::track::Track;
use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS tracks (
        uri          TEXT PRIMARY KEY,
        name         TEXT NOT NULL,
        tempo        REAL,
        danceability REAL,
        duration_ms  INTEGER,
        loudness_db  REAL
    );
    CREATE TABLE IF NOT EXISTS playlists (
        id    INTEGER PRIMARY KEY,
        owner TEXT NOT NULL,
        name  TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS playlist_tracks (
        playlist_id INTEGER NOT NULL REFERENCES playlists(id) ON DELETE CASCADE,
        position    INTEGER NOT NULL,
        uri         TEXT NOT NULL REFERENCES tracks(uri),
        PRIMARY KEY (playlist_id, position)
    );
    CREATE INDEX IF NOT EXISTS idx_playlists_owner ON playlists(owner);
";

/// Owns the database connection for one run.
pub struct Library {
    conn: Connection,
}

impl Library {
    /// Opens (or creates) the library database at `path`.
    ///
    /// Foreign keys are switched on for the connection and the schema is
    /// created when the file is new. The returned value owns the connection
    /// until it is dropped.
    ///
    /// # Returns
    ///
    /// * `Ok(Library)` - Ready to read and write playlists
    /// * `Err(anyhow::Error)` - If the database cannot be opened or set up
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The file cannot be opened or created, e.g. its directory is missing
    /// - The file is not an SQLite database
    /// - The schema cannot be created
    ///
    /// # Examples
    ///
    /// ```
    /// use dancerator::collab::{Account, TrackSource};
    /// use dancerator::library::Library;
    /// use dancerator::Track;
    ///
    /// let dir = tempfile::TempDir::new()?;
    /// let mut library = Library::open(&dir.path().join("library.db"))?;
    ///
    /// let bob = Account::new("bob");
    /// library.import_playlist(&bob, "Party", &[Track::new("One", "spotify:track:1")])?;
    /// assert_eq!(library.playlists(&bob)?[0].name, "Party");
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open library database at {}", path.display()))?;
        debug!("Opened library database at {}", path.display());
        Self::init(conn)
    }

    /// Opens a throwaway library, mostly for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite cannot create the schema.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .context("Failed to enable foreign keys")?;
        conn.execute_batch(SCHEMA)
            .context("Failed to create library schema")?;
        Ok(Self { conn })
    }

    /// Stores `tracks` as playlist `name` of `account` and returns the new
    /// playlist id. Features of already known uris are replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails; nothing is stored then.
    pub fn import_playlist(
        &mut self,
        account: &Account,
        name: &str,
        tracks: &[Track],
    ) -> Result<i64> {
        let ids = self.import_playlists(account, [(name, tracks)])?;
        Ok(ids[0])
    }

    /// Stores several playlists of `account` in one transaction and returns
    /// their ids in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if any playlist fails to store; none of them is
    /// stored then.
    pub fn import_playlists<'a>(
        &mut self,
        account: &Account,
        playlists: impl IntoIterator<Item = (&'a str, &'a [Track])>,
    ) -> Result<Vec<i64>> {
        let tx = self.conn.transaction()?;

        let mut ids = Vec::new();
        for (name, tracks) in playlists {
            let id = store_playlist(&tx, account, name, tracks)
                .with_context(|| format!("Failed to import playlist '{name}'"))?;
            info!("Imported playlist '{name}' with {} tracks as #{id}", tracks.len());
            ids.push(id);
        }
        tx.commit().context("Committing playlist import failed")?;

        Ok(ids)
    }

    /// Looks up the playlist with row id `id`.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub fn playlist(&self, id: i64) -> Result<Option<PlaylistInfo>> {
        self.conn
            .query_row(
                "SELECT p.id, p.name, COUNT(pt.position)
                 FROM playlists p LEFT JOIN playlist_tracks pt ON pt.playlist_id = p.id
                 WHERE p.id = ?1
                 GROUP BY p.id",
                [id],
                playlist_from_row,
            )
            .optional()
            .context("Failed to look up playlist")
    }
}

fn playlist_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PlaylistInfo> {
    let id: i64 = row.get(0)?;
    let count: i64 = row.get(2)?;
    Ok(PlaylistInfo {
        id: id.to_string(),
        name: row.get(1)?,
        track_count: usize::try_from(count).unwrap_or_default(),
    })
}

/// Upserts the features of `tracks` and adds them as a new playlist.
fn store_playlist(
    conn: &Connection,
    account: &Account,
    name: &str,
    tracks: &[Track],
) -> Result<i64> {
    let mut upsert = conn.prepare(
        "INSERT INTO tracks (uri, name, tempo, danceability, duration_ms, loudness_db)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(uri) DO UPDATE SET
            name = excluded.name,
            tempo = excluded.tempo,
            danceability = excluded.danceability,
            duration_ms = excluded.duration_ms,
            loudness_db = excluded.loudness_db",
    )?;
    for track in tracks {
        let duration_ms = track
            .duration_ms
            .map(i64::try_from)
            .transpose()
            .with_context(|| format!("Duration of {} out of range", track.uri))?;
        upsert
            .execute(params![
                track.uri,
                track.name,
                track.tempo,
                track.danceability,
                duration_ms,
                track.loudness_db,
            ])
            .with_context(|| format!("Failed to store track {}", track.uri))?;
    }

    let uris: Vec<String> = tracks.iter().map(|t| t.uri.clone()).collect();
    insert_playlist(conn, account, name, &uris)
}

fn insert_playlist(
    conn: &Connection,
    account: &Account,
    name: &str,
    uris: &[String],
) -> Result<i64> {
    conn.execute(
        "INSERT INTO playlists (owner, name) VALUES (?1, ?2)",
        params![account.id(), name],
    )
    .with_context(|| format!("Failed to create playlist '{name}'"))?;
    let id = conn.last_insert_rowid();

    let mut stmt = conn.prepare(
        "INSERT INTO playlist_tracks (playlist_id, position, uri) VALUES (?1, ?2, ?3)",
    )?;
    for (position, uri) in uris.iter().enumerate() {
        let position = i64::try_from(position)?;
        stmt.execute(params![id, position, uri])
            .with_context(|| format!("Failed to add {uri} to playlist '{name}'"))?;
    }
    Ok(id)
}

impl TrackSource for Library {
    fn playlists(&self, account: &Account) -> Result<Vec<PlaylistInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.name, COUNT(pt.position)
             FROM playlists p LEFT JOIN playlist_tracks pt ON pt.playlist_id = p.id
             WHERE p.owner = ?1
             GROUP BY p.id
             ORDER BY p.name, p.id",
        )?;
        let playlists = stmt
            .query_map([account.id()], playlist_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list playlists")?;
        Ok(playlists)
    }

    fn tracks(&self, playlist: &PlaylistInfo) -> Result<Vec<Track>> {
        let id: i64 = playlist
            .id
            .parse()
            .with_context(|| format!("Not a library playlist id: {}", playlist.id))?;

        let mut stmt = self.conn.prepare(
            "SELECT t.name, t.uri, t.tempo, t.danceability, t.duration_ms, t.loudness_db
             FROM playlist_tracks pt JOIN tracks t ON t.uri = pt.uri
             WHERE pt.playlist_id = ?1
             ORDER BY pt.position",
        )?;
        let tracks = stmt
            .query_map([id], |row| {
                let duration_ms: Option<i64> = row.get(4)?;
                Ok(Track {
                    name: row.get(0)?,
                    uri: row.get(1)?,
                    tempo: row.get(2)?,
                    danceability: row.get(3)?,
                    duration_ms: duration_ms.and_then(|d| u64::try_from(d).ok()),
                    loudness_db: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("Failed to read tracks of playlist '{}'", playlist.name))?;

        debug!("Read {} tracks from playlist #{id}", tracks.len());
        Ok(tracks)
    }
}

impl PlaylistSink for Library {
    fn create_playlist(
        &mut self,
        account: &Account,
        name: &str,
        uris: &[String],
    ) -> Result<PlaylistLocation> {
        let tx = self.conn.transaction()?;
        let id = insert_playlist(&tx, account, name, uris)?;
        tx.commit().context("Committing new playlist failed")?;

        info!("Created playlist '{name}' with {} tracks as #{id}", uris.len());
        Ok(PlaylistLocation(format!("library:playlist:{id}")))
    }
}
