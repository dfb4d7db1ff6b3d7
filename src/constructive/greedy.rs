//! Greedy single-truck construction.
//!
//! # Algorithm
//!
//! Puts every client on the first truck. Starting from an empty route, the
//! unused client whose append yields the lowest objective is appended,
//! until all clients are placed. The other routes stay empty.
//!
//! # Complexity
//!
//! O(n²) objective evaluations.

use crate::evaluation::Evaluator;
use crate::ga::Chromosome;

/// Builds the greedy single-truck individual over the evaluator's instance.
///
/// Ties go to the lowest client id. With no trucks the result has no routes.
pub fn greedy_single_truck(evaluator: &Evaluator<'_>) -> Chromosome {
    let instance = evaluator.instance();
    let num_routes = instance.num_trucks();
    if num_routes == 0 {
        return Chromosome::from_routes(&[]);
    }

    let mut remaining = instance.eligible_clients();
    let mut routes = vec![Vec::new(); num_routes];
    while !remaining.is_empty() {
        let mut best: Option<(usize, f64)> = None;
        for (pos, &client) in remaining.iter().enumerate() {
            let mut candidate = routes.clone();
            candidate[0].push(client);
            let z = evaluator.evaluate_routes(candidate).objective;
            if best.map_or(true, |(_, b)| z < b) {
                best = Some((pos, z));
            }
        }
        let Some((pos, _)) = best else { break };
        routes[0].push(remaining.remove(pos));
    }
    Chromosome::from_routes(&routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{fixtures, Client, Parameters, TimeWindow, Truck};

    #[test]
    fn test_follows_window_order() {
        let w = |a: f64, b: f64| TimeWindow::new(a, b).expect("valid");
        let inst = fixtures::with_clients(
            vec![
                Client::new(1).with_window(w(6.0, 7.0)),
                Client::new(2).with_window(w(0.0, 2.0)),
                Client::new(3).with_window(w(3.0, 4.0)),
            ],
            0.5,
            vec![Truck::hourly(1, 10.0, 1.0), Truck::hourly(2, 10.0, 1.0)],
            Parameters::default(),
        );
        let c = greedy_single_truck(&Evaluator::new(&inst));
        assert_eq!(c.routes(), vec![vec![2, 3, 1], vec![]]);
    }

    #[test]
    fn test_covers_all_clients() {
        let inst = fixtures::mixed();
        let c = greedy_single_truck(&Evaluator::new(&inst));
        assert!(c.is_valid(&inst.eligible_clients(), inst.num_trucks()));
        assert_eq!(c.routes()[0].len(), 10);
    }

    #[test]
    fn test_no_trucks() {
        let inst = fixtures::uniform(2, 1.0, vec![], Parameters::default());
        let c = greedy_single_truck(&Evaluator::new(&inst));
        assert_eq!(c.num_routes(), 0);
    }
}
