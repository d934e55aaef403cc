//! Danceability refinement of a wave-ordered playlist.
//!
//! Positions that are `period` apart sit at the same point of consecutive
//! waves (all peaks, all troughs, ...). Each such slot is ranked by
//! danceability, and the final order sorts by `(rank, tempo_group)`. The
//! most danceable track of every slot comes first while equally ranked
//! tracks keep their wave order.

use crate::pipeline::Period;
use crate::track::{descending_missing_last, AnnotatedTrack};
use log::debug;

/// Second pipeline stage: assigns `danceability_group` and applies the
/// final order.
#[derive(Debug, Clone, Copy)]
pub struct DanceabilityRefiner {
    period: Period,
}

impl DanceabilityRefiner {
    #[must_use]
    pub fn new(period: Period) -> Self {
        Self { period }
    }

    /// Runs the stage on the output of
    /// [`WavePartitioner::partition`](crate::wave::WavePartitioner::partition).
    ///
    /// Tracks without danceability rank behind every track of their slot
    /// that has one.
    ///
    /// # Examples
    ///
    /// ```
    /// use dancerator::pipeline::Period;
    /// use dancerator::refine::DanceabilityRefiner;
    /// use dancerator::wave::WavePartitioner;
    /// use dancerator::Track;
    ///
    /// let period = Period::new(2)?;
    /// let tracks = vec![
    ///     Track::new("A", "uri:a").with_tempo(100.0).with_danceability(0.2),
    ///     Track::new("B", "uri:b").with_tempo(120.0).with_danceability(0.9),
    ///     Track::new("C", "uri:c").with_tempo(140.0).with_danceability(0.5),
    /// ];
    ///
    /// // Wave order A C B; slots {A, B} and {C}
    /// let wave = WavePartitioner::new(period).partition(tracks);
    /// let refined = DanceabilityRefiner::new(period).refine(wave);
    ///
    /// let names: Vec<&str> = refined.iter().map(|t| t.track.name.as_str()).collect();
    /// assert_eq!(names, ["B", "C", "A"]);
    /// assert_eq!(refined[2].danceability_group, Some(1));
    /// # Ok::<(), dancerator::OrderError>(())
    /// ```
    #[must_use]
    pub fn refine(&self, tracks: Vec<AnnotatedTrack>) -> Vec<AnnotatedTrack> {
        let period = self.period.get();
        // Positions are below len, so at most len slots can be occupied.
        let slot_count = period.min(tracks.len());
        debug!(
            "Refining {} tracks over {slot_count} slots (period {period})",
            tracks.len()
        );

        let mut slots: Vec<Vec<AnnotatedTrack>> = vec![Vec::new(); slot_count];
        for (position, track) in tracks.into_iter().enumerate() {
            slots[position % period].push(track);
        }

        let mut refined: Vec<AnnotatedTrack> = slots
            .into_iter()
            .flat_map(|mut slot| {
                slot.sort_by(|a, b| {
                    descending_missing_last(
                        a.track.known_danceability(),
                        b.track.known_danceability(),
                    )
                });
                slot.into_iter().enumerate().map(|(rank, mut track)| {
                    track.danceability_group = Some(rank);
                    track
                })
            })
            .collect();

        refined.sort_by_key(|t| (t.danceability_group, t.tempo_group));
        refined
    }
}
