//! Tempo wave partitioning.
//!
//! Sorts a playlist by tempo and folds it into sections, each of which
//! rises to a tempo peak and falls back down again.
//!
//! ## Construction
//!
//! ```text
//! sorted by tempo:   60  75  90 105 120 135 150 180     (N = 8, period = 4)
//! sections = 8 / 4 + 1 = 3, taken by stride:
//!   section 0:  60 105 150
//!   section 1:  75 120 180
//!   section 2:  90 135
//! per section, even positions then odd positions reversed:
//!   section 0:  60 150 105
//!   section 1:  75 180 120
//!   section 2:  90 135
//! ```
//!
//! Striding instead of slicing gives every section a spread across the
//! whole tempo range, so the output holds one wave per section rather than
//! one wave overall.

use crate::pipeline::{GroupWidth, Period};
use crate::track::{ascending_missing_last, AnnotatedTrack, Track};
use log::debug;

/// First pipeline stage: orders tracks into tempo waves and assigns
/// `tempo_group` labels.
#[derive(Debug, Clone, Copy)]
pub struct WavePartitioner {
    period: Period,
    tempo_group_width: GroupWidth,
}

impl WavePartitioner {
    #[must_use]
    pub fn new(period: Period) -> Self {
        Self {
            period,
            tempo_group_width: GroupWidth::default(),
        }
    }

    #[must_use]
    pub fn with_tempo_group_width(mut self, width: GroupWidth) -> Self {
        self.tempo_group_width = width;
        self
    }

    /// Number of waves produced for `len` tracks.
    ///
    /// Always at least one, even for an empty playlist.
    #[must_use]
    pub fn sections(&self, len: usize) -> usize {
        len / self.period.get() + 1
    }

    /// Length of every section, in output order. Lengths sum to `len`;
    /// trailing sections may be empty when the playlist is short.
    #[must_use]
    pub fn section_lengths(&self, len: usize) -> Vec<usize> {
        let sections = self.sections(len);
        (0..sections)
            .map(|s| if s < len { (len - s).div_ceil(sections) } else { 0 })
            .collect()
    }

    /// Runs the stage.
    ///
    /// Tracks are stably sorted by tempo, split into
    /// [`sections`](Self::sections) by stride and folded into waves. Every
    /// output track carries `tempo_group = position / tempo_group_width`;
    /// its `danceability_group` is still unset.
    ///
    /// Tracks without a tempo sort after all others before striding, and
    /// their relative order is kept.
    ///
    /// # Returns
    ///
    /// The same tracks in wave order. An empty playlist gives an empty
    /// result.
    ///
    /// # Examples
    ///
    /// ```
    /// use dancerator::pipeline::Period;
    /// use dancerator::wave::WavePartitioner;
    /// use dancerator::Track;
    ///
    /// let tempos = [60.0, 90.0, 120.0, 150.0, 180.0, 75.0, 105.0, 135.0];
    /// let tracks: Vec<Track> = tempos
    ///     .iter()
    ///     .enumerate()
    ///     .map(|(i, &t)| Track::new(format!("Track {i}"), format!("uri:{i}")).with_tempo(t))
    ///     .collect();
    ///
    /// let wave = WavePartitioner::new(Period::new(4)?).partition(tracks);
    /// let tempos: Vec<f64> = wave.iter().filter_map(|t| t.track.tempo).collect();
    /// assert_eq!(tempos, [60.0, 150.0, 105.0, 75.0, 180.0, 120.0, 90.0, 135.0]);
    /// assert!(wave.iter().all(|t| t.tempo_group == 0));
    /// # Ok::<(), dancerator::OrderError>(())
    /// ```
    #[must_use]
    pub fn partition(&self, tracks: Vec<Track>) -> Vec<AnnotatedTrack> {
        let len = tracks.len();
        let sections = self.sections(len);
        debug!(
            "Partitioning {len} tracks into {sections} sections (period {})",
            self.period
        );

        let mut sorted = tracks;
        sorted.sort_by(|a, b| ascending_missing_last(a.known_tempo(), b.known_tempo()));

        // Slots are taken exactly once each while folding.
        let mut slots: Vec<Option<Track>> = sorted.into_iter().map(Some).collect();
        let mut ordered = Vec::with_capacity(len);

        for section in 0..sections {
            let positions: Vec<usize> = (section..len).step_by(sections).collect();
            let rising = positions.iter().step_by(2);
            let falling = positions.iter().skip(1).step_by(2).rev();

            ordered.extend(rising.chain(falling).filter_map(|&pos| slots[pos].take()));
        }

        let width = self.tempo_group_width.get();
        ordered
            .into_iter()
            .enumerate()
            .map(|(position, track)| AnnotatedTrack::new(track, position / width))
            .collect()
    }
}
