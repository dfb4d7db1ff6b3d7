//! Time-of-day bands with their own travel-time matrices.
//!
//! Traffic is modelled by splitting the day into bands. A leg's travel time
//! is read from the matrix of the band active at the moment the truck leaves
//! the previous node.

use serde::{Deserialize, Serialize};

use super::TravelMatrix;

/// A half-open interval `[start, end)` of the day with a numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeBand {
    id: usize,
    start: f64,
    end: f64,
}

impl TimeBand {
    /// Creates a band.
    pub fn new(id: usize, start: f64, end: f64) -> Self {
        Self { id, start, end }
    }

    /// Band ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Inclusive start hour.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Exclusive end hour.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns `true` if `time` lies in `[start, end)`.
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time < self.end
    }
}

/// Band-indexed travel-time matrices.
///
/// Bands are kept sorted by id. When no band contains a given time the band
/// with the largest id is used.
///
/// # Examples
///
/// ```
/// use u_dock_routing::travel::{TimeBand, TravelMatrix, TravelTimes};
///
/// let times = TravelTimes::new(vec![
///     (TimeBand::new(1, 0.0, 12.0), TravelMatrix::uniform(2, 1.0)),
///     (TimeBand::new(2, 12.0, 24.0), TravelMatrix::uniform(2, 2.0)),
/// ]);
/// assert_eq!(times.travel_time(0, 1, 8.0), 1.0);
/// assert_eq!(times.travel_time(0, 1, 13.0), 2.0);
/// // Outside every band: falls back to the last band.
/// assert_eq!(times.travel_time(0, 1, 30.0), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelTimes {
    bands: Vec<(TimeBand, TravelMatrix)>,
}

impl TravelTimes {
    /// Creates band data, sorting bands by id.
    pub fn new(mut bands: Vec<(TimeBand, TravelMatrix)>) -> Self {
        bands.sort_by_key(|(band, _)| band.id());
        Self { bands }
    }

    /// A single band covering the whole day.
    pub fn single(matrix: TravelMatrix) -> Self {
        Self::new(vec![(TimeBand::new(1, 0.0, 24.0), matrix)])
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Returns `true` if there are no bands.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// All bands with their matrices, sorted by id.
    pub fn bands(&self) -> &[(TimeBand, TravelMatrix)] {
        &self.bands
    }

    /// Index of the band active at `time`.
    fn active_index(&self, time: f64) -> usize {
        self.bands
            .iter()
            .position(|(band, _)| band.contains(time))
            .unwrap_or(self.bands.len().saturating_sub(1))
    }

    /// The band active at `time`, or the default band.
    ///
    /// # Panics
    ///
    /// Panics if there are no bands. [`Instance::new`](crate::models::Instance::new)
    /// rejects such data.
    pub fn band_at(&self, time: f64) -> &TimeBand {
        &self.bands[self.active_index(time)].0
    }

    /// The matrix of the band active at `time`.
    pub fn matrix_at(&self, time: f64) -> &TravelMatrix {
        &self.bands[self.active_index(time)].1
    }

    /// Travel time `from → to` when leaving at `time`.
    pub fn travel_time(&self, from: usize, to: usize, time: f64) -> f64 {
        self.matrix_at(time).get(from, to)
    }

    /// Fastest and slowest travel time for a leg across all bands.
    pub fn leg_range(&self, from: usize, to: usize) -> (f64, f64) {
        self.bands
            .iter()
            .map(|(_, m)| m.get(from, to))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
                (lo.min(t), hi.max(t))
            })
    }
}
