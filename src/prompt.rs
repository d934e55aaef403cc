//! Interactive playlist selection for `dancerator order` without a name.

use crate::collab::PlaylistInfo;
use anyhow::Result;
use std::io::{BufRead, Write};

/// Lists `playlists` on `output` and asks for a name until one matches.
///
/// Returns `None` when the answer is empty, the input ends, or there is
/// nothing to choose from.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn select_playlist<R: BufRead, W: Write>(
    playlists: &[PlaylistInfo],
    input: &mut R,
    output: &mut W,
) -> Result<Option<PlaylistInfo>> {
    if playlists.is_empty() {
        writeln!(output, "No playlists found.")?;
        return Ok(None);
    }

    writeln!(output, "Your playlists are:")?;
    writeln!(output)?;
    for playlist in playlists {
        writeln!(output, "  {} ({} tracks)", playlist.name, playlist.track_count)?;
    }

    loop {
        writeln!(output)?;
        write!(output, "Which playlist would you like to order? ")?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        if let Some(found) = playlists.iter().find(|p| p.name == answer) {
            return Ok(Some(found.clone()));
        }
        writeln!(output, "Error: Playlist not found.")?;
    }
}
