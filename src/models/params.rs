//! Global scalar parameters of an instance.

use serde::{Deserialize, Serialize};

/// Penalty rates applied by the objective, per hour of violation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyRates {
    /// Arriving before the window of a critical client.
    pub critical_early: f64,
    /// Arriving after the window of a critical client.
    pub critical_late: f64,
    /// Arriving before the window of a regular client.
    pub noncritical_early: f64,
    /// Arriving after the window of a regular client.
    pub noncritical_late: f64,
    /// Each hour spent waiting for a window to open.
    pub wait: f64,
    /// Each hour a truck returns after the return limit.
    pub late_return: f64,
    /// Each hour a route exceeds [`Parameters::max_route_hours`].
    pub route_overtime: f64,
}

impl PenaltyRates {
    /// All rates set to zero.
    pub fn zero() -> Self {
        Self {
            critical_early: 0.0,
            critical_late: 0.0,
            noncritical_early: 0.0,
            noncritical_late: 0.0,
            wait: 0.0,
            late_return: 0.0,
            route_overtime: 0.0,
        }
    }

    /// Early-arrival rate for a client.
    pub fn early(&self, critical: bool) -> f64 {
        if critical {
            self.critical_early
        } else {
            self.noncritical_early
        }
    }

    /// Late-arrival rate for a client.
    pub fn late(&self, critical: bool) -> f64 {
        if critical {
            self.critical_late
        } else {
            self.noncritical_late
        }
    }
}

impl Default for PenaltyRates {
    fn default() -> Self {
        Self {
            critical_early: 100.0,
            critical_late: 500.0,
            noncritical_early: 50.0,
            noncritical_late: 200.0,
            wait: 50.0,
            late_return: 1000.0,
            route_overtime: 0.0,
        }
    }
}

/// Dock, timing, and penalty knobs.
///
/// # Examples
///
/// ```
/// use u_dock_routing::models::Parameters;
///
/// let p = Parameters::default().with_docks(2).with_return_limit(17.0);
/// assert_eq!(p.docks, 2);
/// assert_eq!(p.loading_duration(), p.slots_per_load as f64 * p.load_unit);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Number of loading docks usable at the same time.
    pub docks: usize,
    /// Duration of one loading slot in hours; also the departure-time grid.
    pub load_unit: f64,
    /// Slots a single loading occupies.
    pub slots_per_load: usize,
    /// Penalty rates.
    pub penalties: PenaltyRates,
    /// Hour of day by which trucks should be back at the depot.
    pub return_limit: f64,
    /// Earliest departure hour.
    pub min_departure: f64,
    /// Maximum route time (TT) before the overtime penalty applies.
    pub max_route_hours: Option<f64>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            docks: 1,
            load_unit: 0.166,
            slots_per_load: 3,
            penalties: PenaltyRates::default(),
            return_limit: 18.0,
            min_departure: 0.0,
            max_route_hours: None,
        }
    }
}

impl Parameters {
    /// Sets the dock count.
    pub fn with_docks(mut self, docks: usize) -> Self {
        self.docks = docks;
        self
    }

    /// Sets the slot duration and slots per loading.
    pub fn with_loading(mut self, load_unit: f64, slots_per_load: usize) -> Self {
        self.load_unit = load_unit;
        self.slots_per_load = slots_per_load;
        self
    }

    /// Sets the penalty rates.
    pub fn with_penalties(mut self, penalties: PenaltyRates) -> Self {
        self.penalties = penalties;
        self
    }

    /// Sets the return-time limit.
    pub fn with_return_limit(mut self, hour: f64) -> Self {
        self.return_limit = hour;
        self
    }

    /// Sets the minimum departure time.
    pub fn with_min_departure(mut self, hour: f64) -> Self {
        self.min_departure = hour;
        self
    }

    /// Sets the maximum route time and its overtime rate.
    pub fn with_max_route_hours(mut self, hours: f64, overtime_rate: f64) -> Self {
        self.max_route_hours = Some(hours);
        self.penalties.route_overtime = overtime_rate;
        self
    }

    /// Time a single loading keeps a dock busy.
    pub fn loading_duration(&self) -> f64 {
        self.slots_per_load as f64 * self.load_unit
    }
}
