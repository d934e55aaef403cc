//! Playlist statistics shown alongside ordering results.

use crate::track::Track;
use serde::Serialize;
use std::fmt;

/// Aggregate audio features of a playlist.
///
/// Averages only cover tracks that have the feature; they are `None` when
/// no track has it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistSummary {
    pub track_count: usize,
    pub total_duration_ms: u64,
    pub average_tempo: Option<f64>,
    pub average_danceability: Option<f64>,
    pub average_loudness_db: Option<f64>,
    pub missing_tempo: usize,
    pub missing_danceability: usize,
}

impl PlaylistSummary {
    #[must_use]
    pub fn from_tracks<T: AsRef<Track>>(tracks: &[T]) -> Self {
        let tracks: Vec<&Track> = tracks.iter().map(AsRef::as_ref).collect();

        Self {
            track_count: tracks.len(),
            total_duration_ms: tracks
                .iter()
                .filter_map(|t| t.duration_ms)
                .fold(0, u64::saturating_add),
            average_tempo: mean(tracks.iter().filter_map(|t| t.known_tempo())),
            average_danceability: mean(tracks.iter().filter_map(|t| t.known_danceability())),
            average_loudness_db: mean(
                tracks
                    .iter()
                    .filter_map(|t| t.loudness_db)
                    .filter(|l| !l.is_nan()),
            ),
            missing_tempo: tracks.iter().filter(|t| t.known_tempo().is_none()).count(),
            missing_danceability: tracks
                .iter()
                .filter(|t| t.known_danceability().is_none())
                .count(),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

/// `h:mm:ss` for long playlists, `m:ss` otherwise
fn format_duration(ms: u64) -> String {
    let secs = ms / 1000;
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

fn format_optional(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}{unit}"))
}

impl fmt::Display for PlaylistSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tracks:               {}", self.track_count)?;
        writeln!(f, "Total duration:       {}", format_duration(self.total_duration_ms))?;
        writeln!(f, "Average tempo:        {}", format_optional(self.average_tempo, " BPM"))?;
        writeln!(f, "Average danceability: {}", format_optional(self.average_danceability, ""))?;
        writeln!(f, "Average loudness:     {}", format_optional(self.average_loudness_db, " dB"))?;
        if self.missing_tempo > 0 || self.missing_danceability > 0 {
            writeln!(
                f,
                "Missing features:     {} without tempo, {} without danceability",
                self.missing_tempo, self.missing_danceability
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_partial_features() {
        let tracks = vec![
            Track::new("A", "uri:a")
                .with_tempo(100.0)
                .with_danceability(0.5)
                .with_duration_ms(180_000)
                .with_loudness_db(-6.0),
            Track::new("B", "uri:b").with_tempo(140.0).with_duration_ms(240_000),
            Track::new("C", "uri:c").with_danceability(0.9).with_loudness_db(-8.0),
        ];
        let summary = PlaylistSummary::from_tracks(&tracks);

        assert_eq!(summary.track_count, 3);
        assert_eq!(summary.total_duration_ms, 420_000);
        assert_eq!(summary.average_tempo, Some(120.0));
        let danceability = summary.average_danceability.expect("two tracks have danceability");
        assert!((danceability - 0.7).abs() < 1e-9);
        assert_eq!(summary.average_loudness_db, Some(-7.0));
        assert_eq!(summary.missing_tempo, 1);
        assert_eq!(summary.missing_danceability, 1);
    }

    #[test]
    fn test_summary_of_empty_playlist() {
        let summary = PlaylistSummary::from_tracks::<Track>(&[]);
        assert_eq!(summary.track_count, 0);
        assert_eq!(summary.average_tempo, None);
        assert!(summary.to_string().contains("n/a"));
    }

    #[test]
    fn test_huge_durations_saturate() {
        let longest = i64::MAX as u64;
        let tracks: Vec<Track> = (0..3)
            .map(|i| Track::new(format!("Long {i}"), format!("uri:{i}")).with_duration_ms(longest))
            .collect();
        let summary = PlaylistSummary::from_tracks(&tracks);

        assert_eq!(summary.total_duration_ms, u64::MAX);
        assert!(!summary.to_string().is_empty());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(185_000), "3:05");
        assert_eq!(format_duration(3_725_000), "1:02:05");
    }
}
