//! Client and time window types.

use serde::{Deserialize, Serialize};

/// A service time window `[earliest, latest]`, in hours of the day.
///
/// Arriving before `earliest` forces the truck to wait; arriving after
/// `latest` is a soft violation penalized by the objective.
///
/// # Examples
///
/// ```
/// use u_dock_routing::models::TimeWindow;
///
/// let tw = TimeWindow::new(8.0, 12.0).unwrap();
/// assert!(tw.contains(9.5));
/// assert_eq!(tw.early_by(6.0), 2.0);
/// assert_eq!(tw.late_by(13.0), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    earliest: f64,
    latest: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `earliest > latest` or either value is non-finite.
    pub fn new(earliest: f64, latest: f64) -> Option<Self> {
        if !earliest.is_finite() || !latest.is_finite() || earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    /// The whole day, `[0, 24]`.
    pub fn full_day() -> Self {
        Self {
            earliest: 0.0,
            latest: 24.0,
        }
    }

    /// Earliest allowable service start.
    pub fn earliest(&self) -> f64 {
        self.earliest
    }

    /// Latest allowable arrival.
    pub fn latest(&self) -> f64 {
        self.latest
    }

    /// Width of the window in hours.
    pub fn span(&self) -> f64 {
        self.latest - self.earliest
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.earliest && time <= self.latest
    }

    /// Hours by which `arrival` precedes the window (zero if not early).
    pub fn early_by(&self, arrival: f64) -> f64 {
        (self.earliest - arrival).max(0.0)
    }

    /// Hours by which `arrival` exceeds the window (zero if not late).
    pub fn late_by(&self, arrival: f64) -> f64 {
        (arrival - self.latest).max(0.0)
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::full_day()
    }
}

/// A node of the instance: either the depot or a client to be served.
///
/// Node ids double as matrix indices, and id 0 is the depot.
///
/// # Examples
///
/// ```
/// use u_dock_routing::models::{Client, TimeWindow};
///
/// let depot = Client::depot(0);
/// assert!(depot.is_depot());
///
/// let c = Client::new(1)
///     .critical()
///     .with_demand(4.0, 1.0)
///     .with_service_time(0.25)
///     .with_window(TimeWindow::new(8.0, 10.0).unwrap());
/// assert!(c.is_client());
/// assert!(c.is_critical());
/// assert_eq!(c.delivery(), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    id: usize,
    is_client: bool,
    is_depot: bool,
    is_critical: bool,
    delivery: f64,
    pickup: f64,
    service_time: f64,
    window: TimeWindow,
}

impl Client {
    /// Creates a non-critical client with zero demand, zero service time and
    /// a full-day window.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            is_client: true,
            is_depot: false,
            is_critical: false,
            delivery: 0.0,
            pickup: 0.0,
            service_time: 0.0,
            window: TimeWindow::full_day(),
        }
    }

    /// Creates a depot node.
    pub fn depot(id: usize) -> Self {
        Self {
            is_client: false,
            is_depot: true,
            ..Self::new(id)
        }
    }

    /// Marks this client as critical.
    pub fn critical(mut self) -> Self {
        self.is_critical = true;
        self
    }

    /// Sets delivery and pickup quantities.
    pub fn with_demand(mut self, delivery: f64, pickup: f64) -> Self {
        self.delivery = delivery;
        self.pickup = pickup;
        self
    }

    /// Sets the service duration in hours.
    pub fn with_service_time(mut self, hours: f64) -> Self {
        self.service_time = hours;
        self
    }

    /// Sets the time window.
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    /// Node ID (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Whether this node must be served.
    pub fn is_client(&self) -> bool {
        self.is_client
    }

    /// Whether this node is the depot.
    pub fn is_depot(&self) -> bool {
        self.is_depot
    }

    /// Whether window violations are penalized at the critical rates.
    pub fn is_critical(&self) -> bool {
        self.is_critical
    }

    /// Quantity delivered here.
    pub fn delivery(&self) -> f64 {
        self.delivery
    }

    /// Quantity picked up here.
    pub fn pickup(&self) -> f64 {
        self.pickup
    }

    /// Service duration in hours.
    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    /// Service time window.
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }
}
