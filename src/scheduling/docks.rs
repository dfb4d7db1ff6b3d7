//! Greedy dock-constrained departure scheduling.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::priority::{priority_scores, PriorityWeights, RouteSignals};
use crate::models::Instance;

/// Departures are only searched within one day.
const DAY_END: f64 = 24.0;

/// A dock occupied over `[start, end)` by one route's loading.
///
/// `start_slot` and `end_slot` index the grid `min_departure + k * load_unit`.
/// Occupancy is decided on them; `start` and `end` are the same bounds in
/// hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loading {
    /// Route slot being loaded.
    pub route: usize,
    /// Loading start, equal to the route's departure.
    pub start: f64,
    /// Exclusive loading end.
    pub end: f64,
    /// Grid index of `start`.
    pub start_slot: usize,
    /// Exclusive grid index of `end`.
    pub end_slot: usize,
}

impl Loading {
    /// Returns `true` if this loading overlaps grid slots `[start, end)`.
    pub fn overlaps(&self, start_slot: usize, end_slot: usize) -> bool {
        self.start_slot < end_slot && start_slot < self.end_slot
    }
}

/// Departure times for every route plus the loadings that justify them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DockSchedule {
    /// Departure hour per route slot.
    pub departures: Vec<f64>,
    /// Recorded loadings, in assignment order.
    pub loadings: Vec<Loading>,
    /// Route slots that found no free dock and were given the minimum
    /// departure time.
    pub fallbacks: Vec<usize>,
}

impl DockSchedule {
    /// Departure of route slot `route`.
    ///
    /// # Panics
    ///
    /// Panics if `route` is out of range.
    pub fn departure(&self, route: usize) -> f64 {
        self.departures[route]
    }

    /// Returns `true` if some route fell back to the minimum departure.
    pub fn has_fallbacks(&self) -> bool {
        !self.fallbacks.is_empty()
    }

    /// Largest number of recorded loadings active at the same instant.
    pub fn max_concurrent_loadings(&self) -> usize {
        let mut events: Vec<(usize, i32)> = self
            .loadings
            .iter()
            .filter(|l| l.end_slot > l.start_slot)
            .flat_map(|l| [(l.start_slot, 1), (l.end_slot, -1)])
            .collect();
        // ends sort before starts at the same slot (half-open intervals)
        events.sort_unstable();
        let mut active = 0i32;
        let mut peak = 0i32;
        for (_, delta) in events {
            active += delta;
            peak = peak.max(active);
        }
        peak as usize
    }
}

/// Assigns departures so that at most `docks` routes load at once.
///
/// Routes are handled in descending priority order (stable on ties). Each
/// takes the first time on the grid `min_departure + k * load_unit` (before
/// hour 24) with a free dock. Routes with no feasible time fall back to
/// `min_departure`. Empty routes get `min_departure` and never load.
///
/// # Examples
///
/// ```
/// use u_dock_routing::models::{Client, Instance, Parameters, Truck};
/// use u_dock_routing::scheduling::DockScheduler;
/// use u_dock_routing::travel::{TravelMatrix, TravelTimes};
///
/// let clients = vec![Client::depot(0), Client::new(1), Client::new(2)];
/// let instance = Instance::new(
///     clients,
///     vec![Truck::hourly(1, 10.0, 1.0), Truck::hourly(2, 10.0, 1.0)],
///     TravelMatrix::uniform(3, 1.0),
///     TravelTimes::single(TravelMatrix::uniform(3, 1.0)),
///     Parameters::default().with_docks(1).with_loading(0.5, 2),
/// )
/// .unwrap();
///
/// let schedule = DockScheduler::new(&instance).schedule(&[vec![1], vec![2]]);
/// assert_eq!(schedule.departure(0), 0.0);
/// assert_eq!(schedule.departure(1), 1.0);
/// assert_eq!(schedule.max_concurrent_loadings(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DockScheduler<'a> {
    instance: &'a Instance,
    weights: PriorityWeights,
}

impl<'a> DockScheduler<'a> {
    /// Creates a scheduler with the default priority weights.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            weights: PriorityWeights::default(),
        }
    }

    /// Sets the priority weights.
    pub fn with_weights(mut self, weights: PriorityWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Route slots in loading order, highest priority first.
    pub fn loading_order(&self, routes: &[Vec<usize>]) -> Vec<usize> {
        let signals: Vec<RouteSignals> = routes
            .iter()
            .map(|r| RouteSignals::measure(self.instance, r))
            .collect();
        let scores = priority_scores(&signals, &self.weights);
        let mut order: Vec<usize> = (0..routes.len()).collect();
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }

    /// Computes departures for `routes`.
    pub fn schedule(&self, routes: &[Vec<usize>]) -> DockSchedule {
        let params = self.instance.params();
        let min_departure = params.min_departure;
        let unit = params.load_unit;
        let span = if unit > 0.0 { params.slots_per_load } else { 0 };
        let hour = |slot: usize| min_departure + slot as f64 * unit;

        let mut schedule = DockSchedule {
            departures: vec![min_departure; routes.len()],
            loadings: Vec::with_capacity(routes.len()),
            fallbacks: Vec::new(),
        };

        for route in self.loading_order(routes) {
            if routes[route].is_empty() {
                continue;
            }
            match self.first_free_slot(&schedule.loadings, min_departure, unit, span) {
                Some(k) => {
                    schedule.departures[route] = hour(k);
                    schedule.loadings.push(Loading {
                        route,
                        start: hour(k),
                        end: hour(k + span),
                        start_slot: k,
                        end_slot: k + span,
                    });
                }
                None => {
                    debug!(route, min_departure, "no free dock, departing at minimum");
                    schedule.fallbacks.push(route);
                }
            }
        }
        schedule
    }

    fn first_free_slot(
        &self,
        loadings: &[Loading],
        min_departure: f64,
        unit: f64,
        span: usize,
    ) -> Option<usize> {
        let docks = self.instance.params().docks;
        if docks == 0 {
            return None;
        }
        let mut k = 0usize;
        loop {
            if min_departure + k as f64 * unit >= DAY_END {
                return None;
            }
            let busy = loadings.iter().filter(|l| l.overlaps(k, k + span)).count();
            if busy < docks {
                return Some(k);
            }
            if unit <= 0.0 {
                return None;
            }
            k += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{fixtures, Client, Parameters, Truck};
    use proptest::prelude::*;

    fn trucks(n: usize) -> Vec<Truck> {
        (0..n).map(|i| Truck::hourly(i, 10.0, 1.0)).collect()
    }

    #[test]
    fn test_single_dock_staggers_departures() {
        let inst = fixtures::uniform(
            3,
            1.0,
            trucks(3),
            Parameters::default().with_docks(1).with_loading(0.25, 2),
        );
        let s = DockScheduler::new(&inst).schedule(&[vec![1], vec![2], vec![3]]);
        let mut deps = s.departures.clone();
        deps.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        assert_eq!(deps, vec![0.0, 0.5, 1.0]);
        assert!(s.fallbacks.is_empty());
        assert_eq!(s.max_concurrent_loadings(), 1);
    }

    #[test]
    fn test_two_docks_share_first_slot() {
        let inst = fixtures::uniform(
            3,
            1.0,
            trucks(3),
            Parameters::default().with_docks(2).with_loading(0.25, 2),
        );
        let s = DockScheduler::new(&inst).schedule(&[vec![1], vec![2], vec![3]]);
        let at_zero = s.departures.iter().filter(|&&d| d == 0.0).count();
        assert_eq!(at_zero, 2);
        assert_eq!(s.max_concurrent_loadings(), 2);
    }

    #[test]
    fn test_priority_critical_routes_first() {
        let inst = fixtures::with_clients(
            vec![Client::new(1), Client::new(2).critical()],
            1.0,
            trucks(2),
            Parameters::default().with_docks(1).with_loading(1.0, 1),
        );
        let sched = DockScheduler::new(&inst);
        assert_eq!(sched.loading_order(&[vec![1], vec![2]]), vec![1, 0]);
        let s = sched.schedule(&[vec![1], vec![2]]);
        assert_eq!(s.departure(1), 0.0);
        assert_eq!(s.departure(0), 1.0);
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let inst = fixtures::uniform(2, 1.0, trucks(2), Parameters::default());
        let order = DockScheduler::new(&inst).loading_order(&[vec![1], vec![2]]);
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_empty_routes_do_not_load() {
        let inst = fixtures::uniform(
            1,
            1.0,
            trucks(3),
            Parameters::default().with_min_departure(6.0),
        );
        let s = DockScheduler::new(&inst).schedule(&[vec![], vec![1], vec![]]);
        assert_eq!(s.departures, vec![6.0, 6.0, 6.0]);
        assert_eq!(s.loadings.len(), 1);
        assert_eq!(s.loadings[0].route, 1);
    }

    #[test]
    fn test_no_docks_falls_back() {
        let inst = fixtures::uniform(
            2,
            1.0,
            trucks(2),
            Parameters::default().with_docks(0).with_min_departure(3.0),
        );
        let s = DockScheduler::new(&inst).schedule(&[vec![1], vec![2]]);
        assert_eq!(s.departures, vec![3.0, 3.0]);
        assert_eq!(s.fallbacks.len(), 2);
        assert!(s.loadings.is_empty());
    }

    #[test]
    fn test_day_exhausted_falls_back() {
        // 1 dock, loading takes 8 h: only three loadings fit before hour 24
        let inst = fixtures::uniform(
            4,
            0.1,
            trucks(4),
            Parameters::default().with_docks(1).with_loading(8.0, 1),
        );
        let s = DockScheduler::new(&inst).schedule(&[vec![1], vec![2], vec![3], vec![4]]);
        assert_eq!(s.loadings.len(), 3);
        assert_eq!(s.fallbacks.len(), 1);
        assert_eq!(s.departure(s.fallbacks[0]), 0.0);
    }

    #[test]
    fn test_zero_unit_tries_only_min_departure() {
        let inst = fixtures::uniform(
            2,
            1.0,
            trucks(2),
            Parameters::default().with_docks(1).with_loading(0.0, 3),
        );
        let s = DockScheduler::new(&inst).schedule(&[vec![1], vec![2]]);
        // zero-length loadings never overlap, so both depart at 0
        assert!(s.fallbacks.is_empty());
        assert_eq!(s.departures, vec![0.0, 0.0]);
    }

    #[test]
    fn test_max_concurrent_half_open() {
        let s = DockSchedule {
            departures: vec![0.0, 1.0, 0.5],
            loadings: vec![
                Loading { route: 0, start: 0.0, end: 1.0, start_slot: 0, end_slot: 2 },
                Loading { route: 1, start: 1.0, end: 2.0, start_slot: 2, end_slot: 4 },
                Loading { route: 2, start: 0.5, end: 1.5, start_slot: 1, end_slot: 3 },
            ],
            fallbacks: vec![],
        };
        assert_eq!(s.max_concurrent_loadings(), 2);
    }

    #[test]
    fn test_default_loadings_are_back_to_back() {
        // 0.166 h units accumulate rounding error in hour arithmetic
        let inst = fixtures::uniform(8, 0.5, trucks(8), Parameters::default());
        let plan: Vec<Vec<usize>> = (1..=8).map(|c| vec![c]).collect();
        let s = DockScheduler::new(&inst).schedule(&plan);
        let mut slots: Vec<usize> = s.loadings.iter().map(|l| l.start_slot).collect();
        slots.sort_unstable();
        assert_eq!(slots, vec![0, 3, 6, 9, 12, 15, 18, 21]);
        assert!(s.fallbacks.is_empty());
        assert_eq!(s.max_concurrent_loadings(), 1);
        for l in &s.loadings {
            assert!((s.departure(l.route) - l.start_slot as f64 * 0.166).abs() < 1e-10);
            assert_eq!(l.end_slot, l.start_slot + 3);
        }
    }

    proptest! {
        #[test]
        fn prop_concurrency_within_docks(
            docks in 1usize..4,
            unit in 0.05f64..1.0,
            slots in 1usize..6,
            routes in 1usize..12,
            min_departure in 0.0f64..20.0,
        ) {
            let params = Parameters::default()
                .with_docks(docks)
                .with_loading(unit, slots)
                .with_min_departure(min_departure);
            let inst = fixtures::uniform(routes, 0.5, trucks(routes), params);
            let plan: Vec<Vec<usize>> = (1..=routes).map(|c| vec![c]).collect();
            let s = DockScheduler::new(&inst).schedule(&plan);
            prop_assert!(s.max_concurrent_loadings() <= docks || s.has_fallbacks());
            for l in &s.loadings {
                prop_assert!(l.start >= min_departure - 1e-9);
                prop_assert!(l.start < DAY_END);
            }
        }
    }
}
