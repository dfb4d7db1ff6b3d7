//! Objective aggregation over a whole individual.
//!
//! ```text
//! Z = Σ truck cost + Σ window penalties + Σ late-return penalties
//!   + wait rate × Σ wait hours + Σ overtime penalties
//! ```
//!
//! Evaluating an individual first schedules departures under the dock
//! constraint, then simulates every route from its departure.

use serde::{Deserialize, Serialize};

use super::simulator::{RouteSimulator, RouteTrace};
use crate::ga::Chromosome;
use crate::models::Instance;
use crate::scheduling::{DockSchedule, DockScheduler, PriorityWeights};

/// Cost and penalty breakdown of one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEvaluation {
    /// Route slot.
    pub route: usize,
    /// Id of the truck serving the slot, if the fleet is non-empty.
    pub truck: Option<usize>,
    /// Simulation record.
    pub trace: RouteTrace,
    /// Contract cost (zero for an empty route).
    pub cost: f64,
    /// Early and late window penalties over all clients.
    pub window_penalty: f64,
    /// Penalty for returning after the limit.
    pub late_return_penalty: f64,
    /// Penalty for time spent waiting.
    pub wait_penalty: f64,
    /// Penalty for exceeding the maximum route time.
    pub overtime_penalty: f64,
}

impl RouteEvaluation {
    /// Sum of all penalty terms.
    pub fn penalty(&self) -> f64 {
        self.window_penalty + self.late_return_penalty + self.wait_penalty + self.overtime_penalty
    }

    /// Cost plus penalties.
    pub fn total(&self) -> f64 {
        self.cost + self.penalty()
    }
}

/// Result of evaluating an individual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Objective value Z, `cost + penalty`.
    pub objective: f64,
    /// Total contract cost.
    pub cost: f64,
    /// Total penalty.
    pub penalty: f64,
    /// Total waiting hours.
    pub total_wait: f64,
    /// The routes evaluated.
    pub routes: Vec<Vec<usize>>,
    /// Per-route breakdown.
    pub details: Vec<RouteEvaluation>,
    /// Departure schedule used.
    pub schedule: DockSchedule,
}

impl Evaluation {
    /// Hard feasibility: no capacity excess, no late return, and every route
    /// time within `max_route_hours` when one is given.
    pub fn is_feasible(&self, max_route_hours: Option<f64>) -> bool {
        self.details.iter().all(|d| {
            let v = &d.trace.violations;
            v.capacity == 0.0
                && v.late_return == 0.0
                && max_route_hours.map_or(true, |max| d.trace.total_time <= max)
        })
    }

    /// Longest route time (TT).
    pub fn max_route_time(&self) -> f64 {
        self.details
            .iter()
            .map(|d| d.trace.total_time)
            .fold(0.0, f64::max)
    }
}

/// Scores individuals against an instance.
///
/// # Examples
///
/// ```
/// use u_dock_routing::evaluation::Evaluator;
/// use u_dock_routing::ga::Chromosome;
/// use u_dock_routing::models::{Client, Instance, Parameters, PenaltyRates, Truck};
/// use u_dock_routing::travel::{TravelMatrix, TravelTimes};
///
/// let clients = vec![Client::depot(0), Client::new(1), Client::new(2)];
/// let instance = Instance::new(
///     clients,
///     vec![Truck::hourly(1, 10.0, 20.0)],
///     TravelMatrix::uniform(3, 1.0),
///     TravelTimes::single(TravelMatrix::uniform(3, 0.5)),
///     Parameters::default().with_penalties(PenaltyRates::zero()),
/// )
/// .unwrap();
///
/// let eval = Evaluator::new(&instance).evaluate(&Chromosome::from_routes(&[vec![1, 2]]));
/// // three legs of 0.5 h at 20/h
/// assert!((eval.objective - 30.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    instance: &'a Instance,
    scheduler: DockScheduler<'a>,
    simulator: RouteSimulator<'a>,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator with the default priority weights.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            scheduler: DockScheduler::new(instance),
            simulator: RouteSimulator::new(instance),
        }
    }

    /// Sets the dock priority weights.
    pub fn with_weights(mut self, weights: PriorityWeights) -> Self {
        self.scheduler = self.scheduler.with_weights(weights);
        self
    }

    /// The instance being evaluated against.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Objective value of an individual.
    pub fn objective(&self, chromosome: &Chromosome) -> f64 {
        self.evaluate(chromosome).objective
    }

    /// Full evaluation of an individual.
    pub fn evaluate(&self, chromosome: &Chromosome) -> Evaluation {
        self.evaluate_routes(chromosome.routes())
    }

    /// Schedules and evaluates a route list.
    pub fn evaluate_routes(&self, routes: Vec<Vec<usize>>) -> Evaluation {
        let schedule = self.scheduler.schedule(&routes);
        self.evaluate_with_schedule(routes, schedule)
    }

    /// Evaluates routes with one route's departure forced to `departure`.
    ///
    /// The other routes keep the departures the dock scheduler gives them.
    pub fn evaluate_with_departure(
        &self,
        routes: Vec<Vec<usize>>,
        route: usize,
        departure: f64,
    ) -> Evaluation {
        let mut schedule = self.scheduler.schedule(&routes);
        if let Some(d) = schedule.departures.get_mut(route) {
            *d = departure;
        }
        self.evaluate_with_schedule(routes, schedule)
    }

    /// Evaluates routes under a caller-supplied schedule.
    ///
    /// Slots without a scheduled departure leave at the minimum departure.
    pub fn evaluate_with_schedule(
        &self,
        routes: Vec<Vec<usize>>,
        schedule: DockSchedule,
    ) -> Evaluation {
        let params = self.instance.params();
        let rates = &params.penalties;

        let mut details = Vec::with_capacity(routes.len());
        for (i, route) in routes.iter().enumerate() {
            let truck = self.instance.truck_for_route(i);
            let departure = schedule
                .departures
                .get(i)
                .copied()
                .unwrap_or(params.min_departure);
            let trace = self.simulator.simulate(route, truck, departure);

            let cost = if trace.is_empty() {
                0.0
            } else {
                truck.map_or(0.0, |t| t.cost_for(trace.total_time))
            };
            let window_penalty: f64 = trace
                .visits
                .iter()
                .map(|v| {
                    let critical = self.instance.client(v.client).is_critical();
                    rates.early(critical) * v.early + rates.late(critical) * v.late
                })
                .sum();
            let overtime = params
                .max_route_hours
                .map_or(0.0, |max| (trace.total_time - max).max(0.0));

            details.push(RouteEvaluation {
                route: i,
                truck: truck.map(|t| t.id()),
                cost,
                window_penalty,
                late_return_penalty: rates.late_return * trace.violations.late_return,
                wait_penalty: rates.wait * trace.total_wait,
                overtime_penalty: rates.route_overtime * overtime,
                trace,
            });
        }

        let cost: f64 = details.iter().map(|d| d.cost).sum();
        let penalty: f64 = details.iter().map(RouteEvaluation::penalty).sum();
        let total_wait = details.iter().map(|d| d.trace.total_wait).sum();

        Evaluation {
            objective: cost + penalty,
            cost,
            penalty,
            total_wait,
            routes,
            details,
            schedule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{fixtures, Client, Parameters, PenaltyRates, TimeWindow, Truck};

    fn window(a: f64, b: f64) -> TimeWindow {
        TimeWindow::new(a, b).expect("valid")
    }

    #[test]
    fn test_fixed_contract_costs() {
        let inst = fixtures::uniform(
            2,
            1.0,
            vec![Truck::fixed_6h(1, 10.0, 100.0), Truck::fixed_12h(2, 10.0, 180.0)],
            Parameters::default(),
        );
        let ev = Evaluator::new(&inst);
        let one = ev.evaluate(&Chromosome::from_routes(&[vec![1, 2], vec![]]));
        assert!((one.objective - 100.0).abs() < 1e-10);
        let two = ev.evaluate(&Chromosome::from_routes(&[vec![1], vec![2]]));
        assert!((two.objective - 280.0).abs() < 1e-10);
        let other = ev.evaluate(&Chromosome::from_routes(&[vec![], vec![2, 1]]));
        assert!((other.objective - 180.0).abs() < 1e-10);
    }

    #[test]
    fn test_window_penalties_by_criticality() {
        let inst = fixtures::with_clients(
            vec![
                Client::new(1).critical().with_window(window(0.0, 0.5)),
                Client::new(2).with_window(window(0.0, 1.0)),
            ],
            1.0,
            vec![Truck::hourly(1, 10.0, 0.0)],
            Parameters::default(),
        );
        let e = Evaluator::new(&inst).evaluate(&Chromosome::from_routes(&[vec![1, 2]]));
        // client 1: late 0.5 at 500; client 2: arrives 2.0, late 1.0 at 200
        assert!((e.details[0].window_penalty - (250.0 + 200.0)).abs() < 1e-10);
        assert!((e.penalty - 450.0).abs() < 1e-10);
    }

    #[test]
    fn test_early_arrival_costs_wait_and_early_rate() {
        let inst = fixtures::with_clients(
            vec![Client::new(1).with_window(window(3.0, 4.0))],
            1.0,
            vec![Truck::hourly(1, 10.0, 0.0)],
            Parameters::default(),
        );
        let e = Evaluator::new(&inst).evaluate(&Chromosome::from_routes(&[vec![1]]));
        // waits 2 h: noncritical early 50 * 2 + wait 50 * 2
        assert!((e.total_wait - 2.0).abs() < 1e-10);
        assert!((e.details[0].window_penalty - 100.0).abs() < 1e-10);
        assert!((e.details[0].wait_penalty - 100.0).abs() < 1e-10);
        assert!((e.objective - 200.0).abs() < 1e-10);
    }

    #[test]
    fn test_late_return_and_overtime() {
        let params = Parameters::default()
            .with_penalties(PenaltyRates {
                late_return: 10.0,
                ..PenaltyRates::zero()
            })
            .with_return_limit(1.0)
            .with_max_route_hours(1.5, 4.0);
        let inst = fixtures::uniform(1, 1.0, vec![Truck::hourly(1, 10.0, 0.0)], params);
        let e = Evaluator::new(&inst).evaluate(&Chromosome::from_routes(&[vec![1]]));
        // TT = 2: one hour late back, half an hour over the maximum
        assert!((e.details[0].late_return_penalty - 10.0).abs() < 1e-10);
        assert!((e.details[0].overtime_penalty - 2.0).abs() < 1e-10);
        assert!(!e.is_feasible(None));
    }

    #[test]
    fn test_empty_fleet_costs_nothing() {
        let inst = fixtures::uniform(
            2,
            1.0,
            vec![],
            Parameters::default().with_penalties(PenaltyRates::zero()),
        );
        let e = Evaluator::new(&inst).evaluate(&Chromosome::from_routes(&[vec![1, 2]]));
        assert_eq!(e.objective, 0.0);
        assert_eq!(e.details[0].truck, None);
    }

    #[test]
    fn test_forced_departure() {
        let inst = fixtures::with_clients(
            vec![Client::new(1).with_window(window(5.0, 6.0))],
            1.0,
            vec![Truck::hourly(1, 10.0, 10.0)],
            Parameters::default(),
        );
        let ev = Evaluator::new(&inst);
        let routes = vec![vec![1]];
        let scheduled = ev.evaluate_routes(routes.clone());
        let forced = ev.evaluate_with_departure(routes, 0, 4.0);
        assert_eq!(forced.schedule.departure(0), 4.0);
        assert_eq!(forced.total_wait, 0.0);
        assert!(forced.objective < scheduled.objective);
    }

    #[test]
    fn test_explicit_schedule_missing_slots() {
        let inst = fixtures::uniform(
            2,
            1.0,
            vec![Truck::hourly(1, 10.0, 1.0)],
            Parameters::default().with_min_departure(2.0),
        );
        let e = Evaluator::new(&inst)
            .evaluate_with_schedule(vec![vec![1], vec![2]], DockSchedule::default());
        assert_eq!(e.details[0].trace.departure, 2.0);
        assert_eq!(e.details[1].trace.departure, 2.0);
    }

    #[test]
    fn test_feasibility_with_route_limit() {
        let inst = fixtures::uniform(2, 1.0, vec![Truck::hourly(1, 10.0, 1.0)], Parameters::default());
        let e = Evaluator::new(&inst).evaluate(&Chromosome::from_routes(&[vec![1, 2]]));
        assert!((e.max_route_time() - 3.0).abs() < 1e-10);
        assert!(e.is_feasible(None));
        assert!(e.is_feasible(Some(12.0)));
        assert!(!e.is_feasible(Some(2.0)));
    }

    #[test]
    fn test_deterministic() {
        let inst = fixtures::mixed();
        let ev = Evaluator::new(&inst);
        let c = Chromosome::from_routes(&[vec![1, 4, 7], vec![2, 5, 8, 10], vec![3, 6, 9]]);
        assert_eq!(ev.evaluate(&c), ev.evaluate(&c));
    }
}
