//! Inter-route prefix transfer.
//!
//! # Algorithm
//!
//! For every ordered pair of distinct routes `(i, j)` and every non-empty
//! prefix of route `i`, tries appending that prefix to the end of route `j`.
//! The first strictly improving move is accepted and the scan restarts. The
//! evaluation budget counts candidates since the last accepted move.
//!
//! Moving a whole route empties it, which is how two trucks' work ends up on
//! one truck.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluation::Evaluator;
use crate::ga::Chromosome;

/// Route-merge search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteMergeConfig {
    /// Candidate evaluations allowed without an improvement.
    pub max_evaluations: usize,
}

impl Default for RouteMergeConfig {
    fn default() -> Self {
        Self {
            max_evaluations: 200,
        }
    }
}

/// Moves route prefixes between routes while that lowers the objective.
///
/// Returns the improved individual and its objective; never worse than the
/// input, whose objective is passed as `objective`.
pub fn route_merge_improve(
    chromosome: &Chromosome,
    objective: f64,
    evaluator: &Evaluator<'_>,
    config: &RouteMergeConfig,
) -> (Chromosome, f64) {
    let mut routes = chromosome.routes();
    let mut best = objective;
    let mut evaluations = 0usize;

    'scan: while evaluations < config.max_evaluations {
        for i in 0..routes.len() {
            for j in 0..routes.len() {
                if i == j {
                    continue;
                }
                for len in 1..=routes[i].len() {
                    if evaluations >= config.max_evaluations {
                        break 'scan;
                    }
                    let mut candidate = routes.clone();
                    let moved: Vec<usize> = candidate[i].drain(..len).collect();
                    candidate[j].extend(moved);
                    evaluations += 1;
                    let z = evaluator.evaluate_routes(candidate.clone()).objective;
                    if z < best {
                        debug!(from_route = i, to_route = j, len, from = best, to = z, "route merge");
                        routes = candidate;
                        best = z;
                        evaluations = 0;
                        continue 'scan;
                    }
                }
            }
        }
        break;
    }

    (Chromosome::from_routes(&routes), best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{fixtures, Parameters, Truck};

    #[test]
    fn test_merges_onto_one_fixed_fee_truck() {
        let inst = fixtures::uniform(
            3,
            0.5,
            vec![Truck::fixed_6h(1, 10.0, 100.0), Truck::fixed_6h(2, 10.0, 100.0)],
            Parameters::default(),
        );
        let ev = Evaluator::new(&inst);
        let start = Chromosome::from_routes(&[vec![1, 2], vec![3]]);
        let z0 = ev.objective(&start);
        assert!((z0 - 200.0).abs() < 1e-10);

        let (c, z) = route_merge_improve(&start, z0, &ev, &RouteMergeConfig::default());
        assert!((z - 100.0).abs() < 1e-10);
        let non_empty = c.routes().iter().filter(|r| !r.is_empty()).count();
        assert_eq!(non_empty, 1);
        assert!(c.is_valid(&[1, 2, 3], 2));
    }

    #[test]
    fn test_no_improvement_keeps_input() {
        let inst = fixtures::uniform(
            2,
            0.5,
            vec![Truck::fixed_6h(1, 10.0, 100.0), Truck::fixed_6h(2, 10.0, 100.0)],
            Parameters::default(),
        );
        let ev = Evaluator::new(&inst);
        let start = Chromosome::from_routes(&[vec![1, 2], vec![]]);
        let z0 = ev.objective(&start);
        let (c, z) = route_merge_improve(&start, z0, &ev, &RouteMergeConfig::default());
        assert_eq!(z, z0);
        assert_eq!(c, start);
    }

    #[test]
    fn test_single_route_untouched() {
        let inst = fixtures::uniform(2, 0.5, vec![Truck::hourly(1, 10.0, 1.0)], Parameters::default());
        let ev = Evaluator::new(&inst);
        let start = Chromosome::from_routes(&[vec![2, 1]]);
        let z0 = ev.objective(&start);
        assert_eq!(route_merge_improve(&start, z0, &ev, &RouteMergeConfig::default()), (start, z0));
    }
}
