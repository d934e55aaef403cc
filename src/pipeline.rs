//! Ordering pipeline: WavePartitioner followed by DanceabilityRefiner.
//!
//! ```
//! use dancerator::{pipeline, Track};
//!
//! let tracks = vec![
//!     Track::new("Slow", "uri:slow").with_tempo(80.0).with_danceability(0.4),
//!     Track::new("Fast", "uri:fast").with_tempo(160.0).with_danceability(0.9),
//!     Track::new("Mid", "uri:mid").with_tempo(120.0).with_danceability(0.7),
//! ];
//!
//! let ordered = pipeline::reorder(tracks, 10)?;
//! assert_eq!(ordered.len(), 3);
//! # Ok::<(), dancerator::OrderError>(())
//! ```

use crate::error::{OrderError, Result};
use crate::refine::DanceabilityRefiner;
use crate::track::{AnnotatedTrack, Track};
use crate::wave::WavePartitioner;
use log::info;
use std::fmt;
use std::num::NonZeroUsize;

/// Default number of tracks per wave cycle
pub const DEFAULT_PERIOD: usize = 10;

/// Default width of a tempo group, in tracks
pub const DEFAULT_TEMPO_GROUP_WIDTH: usize = 10;

/// Wave period in tracks. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period(NonZeroUsize);

impl Period {
    /// Validates a caller-supplied period.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidPeriod`] for zero or negative values.
    pub fn new(value: i64) -> Result<Self> {
        if value <= 0 {
            return Err(OrderError::InvalidPeriod(value));
        }
        // Beyond usize::MAX every playlist fits into one wave anyway.
        let value = usize::try_from(value).unwrap_or(usize::MAX);
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or(OrderError::InvalidPeriod(0))
    }

    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for Period {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_PERIOD).unwrap_or(NonZeroUsize::MIN))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Width of a tempo group. Independent of the [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupWidth(NonZeroUsize);

impl GroupWidth {
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidGroupWidth`] for zero.
    pub fn new(value: usize) -> Result<Self> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or(OrderError::InvalidGroupWidth(value))
    }

    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for GroupWidth {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_TEMPO_GROUP_WIDTH).unwrap_or(NonZeroUsize::MIN))
    }
}

/// Validated parameters of one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderConfig {
    pub period: Period,
    pub tempo_group_width: GroupWidth,
}

impl OrderConfig {
    /// # Errors
    ///
    /// Fails if either value is not positive.
    pub fn new(period: i64, tempo_group_width: usize) -> Result<Self> {
        Ok(Self {
            period: Period::new(period)?,
            tempo_group_width: GroupWidth::new(tempo_group_width)?,
        })
    }
}

/// Reorders `tracks` with the default tempo group width.
///
/// # Errors
///
/// Returns [`OrderError::InvalidPeriod`] before touching the tracks if
/// `period` is not positive.
pub fn reorder(tracks: Vec<Track>, period: i64) -> Result<Vec<Track>> {
    let config = OrderConfig {
        period: Period::new(period)?,
        ..OrderConfig::default()
    };
    Ok(reorder_with(tracks, &config)
        .into_iter()
        .map(AnnotatedTrack::into_track)
        .collect())
}

/// Runs both stages and keeps the group labels.
#[must_use]
pub fn reorder_with(tracks: Vec<Track>, config: &OrderConfig) -> Vec<AnnotatedTrack> {
    info!(
        "Ordering {} tracks (period {}, tempo group width {})",
        tracks.len(),
        config.period,
        config.tempo_group_width.get()
    );

    let wave = WavePartitioner::new(config.period)
        .with_tempo_group_width(config.tempo_group_width)
        .partition(tracks);
    DanceabilityRefiner::new(config.period).refine(wave)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(len: usize) -> Vec<Track> {
        (0..len)
            .map(|i| {
                Track::new(format!("Track {i}"), format!("uri:{i}"))
                    .with_tempo(60.0 + (i * 37 % 120) as f64)
                    .with_danceability((i * 13 % 100) as f64 / 100.0)
            })
            .collect()
    }

    #[test]
    fn test_period_validation() {
        assert_eq!(Period::new(0), Err(OrderError::InvalidPeriod(0)));
        assert_eq!(Period::new(-1), Err(OrderError::InvalidPeriod(-1)));
        assert_eq!(Period::new(4).map(Period::get), Ok(4));
        assert_eq!(Period::default().get(), DEFAULT_PERIOD);
    }

    #[test]
    fn test_group_width_validation() {
        assert_eq!(GroupWidth::new(0), Err(OrderError::InvalidGroupWidth(0)));
        assert_eq!(GroupWidth::default().get(), DEFAULT_TEMPO_GROUP_WIDTH);
        assert!(OrderConfig::new(4, 0).is_err());
        assert!(OrderConfig::new(-4, 10).is_err());
    }

    #[test]
    fn test_reorder_rejects_invalid_period() {
        assert_eq!(reorder(sample(5), 0), Err(OrderError::InvalidPeriod(0)));
        assert_eq!(reorder(sample(5), -1), Err(OrderError::InvalidPeriod(-1)));
    }

    #[test]
    fn test_reorder_empty() {
        assert_eq!(reorder(Vec::new(), 10), Ok(Vec::new()));
    }

    #[test]
    fn test_reorder_with_labels_every_track() {
        let config = OrderConfig::new(4, 10).expect("valid config");
        let ordered = reorder_with(sample(23), &config);

        assert_eq!(ordered.len(), 23);
        assert!(ordered.iter().all(|t| t.danceability_group.is_some()));
        let keys: Vec<_> = ordered
            .iter()
            .map(|t| (t.danceability_group, t.tempo_group))
            .collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }
}
