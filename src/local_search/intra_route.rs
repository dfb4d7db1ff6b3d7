//! Intra-route reordering by position swaps and relocations.
//!
//! # Algorithm
//!
//! Samples a share of the routes. For each sampled route with at least two
//! clients, scans every pairwise swap and then every single-client
//! relocation, accepting the first candidate that strictly lowers the
//! individual's objective and restarting the scan. Stops at a pass with no
//! improvement or when the route's evaluation budget is spent.
//!
//! Candidates are scored through the full evaluator, so dock scheduling and
//! cross-route effects are taken into account.

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluation::Evaluator;
use crate::ga::Chromosome;

/// Intra-route search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntraRouteConfig {
    /// Share of routes sampled per call; at least one route is sampled.
    pub route_fraction: f64,
    /// Candidate evaluations allowed per sampled route.
    pub max_evaluations: usize,
}

impl Default for IntraRouteConfig {
    fn default() -> Self {
        Self {
            route_fraction: 0.3,
            max_evaluations: 50,
        }
    }
}

/// Reorders clients within a random sample of routes.
///
/// Returns the improved individual and its objective. The result is never
/// worse than `chromosome`, whose objective is passed as `objective`.
pub fn intra_route_improve<R: Rng + ?Sized>(
    chromosome: &Chromosome,
    objective: f64,
    evaluator: &Evaluator<'_>,
    config: &IntraRouteConfig,
    rng: &mut R,
) -> (Chromosome, f64) {
    let mut routes = chromosome.routes();
    let num_routes = routes.len();
    if num_routes == 0 {
        return (chromosome.clone(), objective);
    }

    let sample = ((config.route_fraction * num_routes as f64).ceil() as usize).clamp(1, num_routes);
    let mut best = objective;
    for r in index::sample(rng, num_routes, sample).iter() {
        if routes[r].len() < 2 {
            continue;
        }
        let mut evaluations = 0usize;
        'scan: while evaluations < config.max_evaluations {
            let n = routes[r].len();

            for i in 0..n {
                for j in (i + 1)..n {
                    if evaluations >= config.max_evaluations {
                        break 'scan;
                    }
                    let mut candidate = routes.clone();
                    candidate[r].swap(i, j);
                    evaluations += 1;
                    let z = evaluator.evaluate_routes(candidate.clone()).objective;
                    if z < best {
                        debug!(route = r, i, j, from = best, to = z, "intra-route swap");
                        routes = candidate;
                        best = z;
                        continue 'scan;
                    }
                }
            }

            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    if evaluations >= config.max_evaluations {
                        break 'scan;
                    }
                    let mut candidate = routes.clone();
                    let client = candidate[r].remove(i);
                    candidate[r].insert(j, client);
                    evaluations += 1;
                    let z = evaluator.evaluate_routes(candidate.clone()).objective;
                    if z < best {
                        debug!(
                            route = r,
                            from_pos = i,
                            to_pos = j,
                            from = best,
                            to = z,
                            "intra-route relocation"
                        );
                        routes = candidate;
                        best = z;
                        continue 'scan;
                    }
                }
            }

            break;
        }
    }

    (Chromosome::from_routes(&routes), best)
}
