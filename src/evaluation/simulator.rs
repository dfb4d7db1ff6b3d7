//! Discrete-event simulation of a single route.
//!
//! The simulator walks a route from its departure time, looking up each
//! leg's travel time in the band active when the truck leaves the previous
//! node. It waits for windows that have not opened, records lateness, and
//! tracks load against the truck's capacity.

use serde::{Deserialize, Serialize};

use crate::ga::DEPOT;
use crate::models::{Instance, Truck};

/// Timing and load at one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    /// Node id.
    pub client: usize,
    /// Hour the truck reaches the client.
    pub arrival: f64,
    /// Hour service begins (after any wait).
    pub service_start: f64,
    /// Hours spent waiting for the window to open.
    pub wait: f64,
    /// Hours of arrival before the window (equal to `wait`).
    pub early: f64,
    /// Hours of arrival after the window.
    pub late: f64,
    /// Load carried when leaving the client.
    pub load: f64,
}

/// Accumulated constraint violation magnitudes of a route.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Violations {
    /// Sum of load excess over capacity, over all visits.
    pub capacity: f64,
    /// Sum of early-arrival hours.
    pub window_early: f64,
    /// Sum of late-arrival hours.
    pub window_late: f64,
    /// Hours the truck returns after the return limit.
    pub late_return: f64,
}

impl Violations {
    /// Returns `true` if every magnitude is zero.
    pub fn is_empty(&self) -> bool {
        self.capacity == 0.0
            && self.window_early == 0.0
            && self.window_late == 0.0
            && self.late_return == 0.0
    }
}

/// Full record of one simulated route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTrace {
    /// Departure time from the depot (HS).
    pub departure: f64,
    /// Per-client record, in visiting order.
    pub visits: Vec<Visit>,
    /// Hour the truck is back at the depot.
    pub return_time: f64,
    /// Route time (TT), `return_time - departure`.
    pub total_time: f64,
    /// Direct-distance length depot → … → depot.
    pub distance: f64,
    /// Violation magnitudes.
    pub violations: Violations,
    /// Sum of waits over all visits.
    pub total_wait: f64,
}

impl RouteTrace {
    /// Trace of a route with no clients.
    pub fn empty(departure: f64) -> Self {
        Self {
            departure,
            visits: Vec::new(),
            return_time: departure,
            total_time: 0.0,
            distance: 0.0,
            violations: Violations::default(),
            total_wait: 0.0,
        }
    }

    /// Returns `true` if the route visits no client.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

/// Simulates routes over an instance's travel data.
///
/// # Examples
///
/// ```
/// use u_dock_routing::evaluation::RouteSimulator;
/// use u_dock_routing::models::{Client, Instance, Parameters, TimeWindow, Truck};
/// use u_dock_routing::travel::{TravelMatrix, TravelTimes};
///
/// let clients = vec![
///     Client::depot(0),
///     Client::new(1).with_window(TimeWindow::new(5.0, 5.0).unwrap()),
/// ];
/// let instance = Instance::new(
///     clients,
///     vec![Truck::hourly(1, 10.0, 1.0)],
///     TravelMatrix::uniform(2, 1.0),
///     TravelTimes::single(TravelMatrix::uniform(2, 0.5)),
///     Parameters::default(),
/// )
/// .unwrap();
///
/// let trace = RouteSimulator::new(&instance).simulate(&[1], instance.truck_for_route(0), 0.0);
/// assert_eq!(trace.visits[0].service_start, 5.0);
/// assert_eq!(trace.visits[0].wait, 4.5);
/// assert_eq!(trace.return_time, 5.5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteSimulator<'a> {
    instance: &'a Instance,
}

impl<'a> RouteSimulator<'a> {
    /// Creates a simulator bound to an instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Simulates `route` leaving the depot at `departure`.
    ///
    /// Without a truck, capacity is unbounded.
    pub fn simulate(&self, route: &[usize], truck: Option<&Truck>, departure: f64) -> RouteTrace {
        if route.is_empty() {
            return RouteTrace::empty(departure);
        }

        let travel = self.instance.travel();
        let capacity = truck.map_or(f64::INFINITY, Truck::capacity);

        let mut visits = Vec::with_capacity(route.len());
        let mut violations = Violations::default();
        let mut total_wait = 0.0;
        let mut t = departure;
        let mut load: f64 = 0.0;
        let mut prev = DEPOT;

        for &id in route {
            let client = self.instance.client(id);
            let window = client.window();
            let arrival = t + travel.travel_time(prev, id, t);

            let (service_start, wait, early, late) = if arrival < window.earliest() {
                let wait = window.earliest() - arrival;
                (window.earliest(), wait, wait, 0.0)
            } else {
                (arrival, 0.0, 0.0, window.late_by(arrival))
            };

            load = (load - client.delivery() + client.pickup()).max(0.0);
            if load > capacity {
                violations.capacity += load - capacity;
            }
            violations.window_early += early;
            violations.window_late += late;
            total_wait += wait;

            visits.push(Visit {
                client: id,
                arrival,
                service_start,
                wait,
                early,
                late,
                load,
            });
            t = service_start + client.service_time();
            prev = id;
        }

        let return_time = t + travel.travel_time(prev, DEPOT, t);
        violations.late_return = (return_time - self.instance.params().return_limit).max(0.0);

        RouteTrace {
            departure,
            visits,
            return_time,
            total_time: return_time - departure,
            distance: self.instance.distances().path_length(DEPOT, route),
            violations,
            total_wait,
        }
    }
}
