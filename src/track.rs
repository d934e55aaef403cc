//! Track records and the ordering policy for missing audio features.
//!
//! A [`Track`] is what a Track Source hands us: identity, display name and
//! whatever audio features the upstream provider had. Any feature may be
//! missing. The pipeline never drops such a track; it orders it with one of
//! the explicit policies below.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single track and its audio features.
///
/// `uri` is the identity key. Two entries with the same `uri` are the same
/// track appearing twice in a playlist, and both are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub uri: String,
    /// Beats per minute
    #[serde(default)]
    pub tempo: Option<f64>,
    /// 0.0 (least) to 1.0 (most danceable)
    #[serde(default)]
    pub danceability: Option<f64>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    /// Average loudness, typically between -60 and 0 dB
    #[serde(default)]
    pub loudness_db: Option<f64>,
}

impl Track {
    /// Creates a track with no audio features.
    #[must_use]
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            tempo: None,
            danceability: None,
            duration_ms: None,
            loudness_db: None,
        }
    }

    #[must_use]
    pub fn with_tempo(mut self, tempo: f64) -> Self {
        self.tempo = Some(tempo);
        self
    }

    #[must_use]
    pub fn with_danceability(mut self, danceability: f64) -> Self {
        self.danceability = Some(danceability);
        self
    }

    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn with_loudness_db(mut self, loudness_db: f64) -> Self {
        self.loudness_db = Some(loudness_db);
        self
    }

    /// Tempo usable as a sort key. `NaN` counts as missing.
    #[must_use]
    pub fn known_tempo(&self) -> Option<f64> {
        self.tempo.filter(|t| !t.is_nan())
    }

    /// Danceability usable as a sort key. `NaN` counts as missing.
    #[must_use]
    pub fn known_danceability(&self) -> Option<f64> {
        self.danceability.filter(|d| !d.is_nan())
    }
}

/// A track carrying the group labels assigned by the pipeline stages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedTrack {
    pub track: Track,
    /// Coarse positional group over the wave-ordered sequence.
    pub tempo_group: usize,
    /// Rank within the track's position-modulo-period slot. Unset until
    /// the danceability refinement has run.
    pub danceability_group: Option<usize>,
}

impl AnnotatedTrack {
    #[must_use]
    pub fn new(track: Track, tempo_group: usize) -> Self {
        Self {
            track,
            tempo_group,
            danceability_group: None,
        }
    }

    #[must_use]
    pub fn into_track(self) -> Track {
        self.track
    }
}

impl AsRef<Track> for Track {
    fn as_ref(&self) -> &Track {
        self
    }
}

impl AsRef<Track> for AnnotatedTrack {
    fn as_ref(&self) -> &Track {
        &self.track
    }
}

/// Ascending order with missing values after every present value.
///
/// Used for tempo. Tracks without tempo data end up behind the fastest
/// known track.
#[must_use]
pub fn ascending_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Descending order with missing values after every present value.
///
/// Used for danceability: a missing value must never front-load a track.
#[must_use]
pub fn descending_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
