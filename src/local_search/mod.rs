//! Local search intensification for individuals.
//!
//! - [`intra_route`] — Swaps and relocations inside sampled routes
//! - [`route_merge`] — Prefix transfers between routes
//!
//! [`LocalSearch::improve`] runs both in that order.

pub mod intra_route;
pub mod route_merge;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::evaluation::Evaluator;
use crate::ga::Chromosome;

pub use intra_route::{intra_route_improve, IntraRouteConfig};
pub use route_merge::{route_merge_improve, RouteMergeConfig};

/// Combined intra-route and route-merge search.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_dock_routing::evaluation::Evaluator;
/// use u_dock_routing::ga::Chromosome;
/// use u_dock_routing::local_search::LocalSearch;
/// use u_dock_routing::models::{Client, Instance, Parameters, Truck};
/// use u_dock_routing::travel::{TravelMatrix, TravelTimes};
///
/// let clients = vec![Client::depot(0), Client::new(1), Client::new(2)];
/// let instance = Instance::new(
///     clients,
///     vec![Truck::fixed_6h(1, 10.0, 100.0), Truck::fixed_6h(2, 10.0, 100.0)],
///     TravelMatrix::uniform(3, 1.0),
///     TravelTimes::single(TravelMatrix::uniform(3, 0.5)),
///     Parameters::default(),
/// )
/// .unwrap();
///
/// let evaluator = Evaluator::new(&instance);
/// let start = Chromosome::from_routes(&[vec![1], vec![2]]);
/// let z0 = evaluator.objective(&start);
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let (_, z) = LocalSearch::default().improve(&start, z0, &evaluator, &mut rng);
/// assert!((z - 100.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalSearch {
    /// Intra-route settings.
    pub intra: IntraRouteConfig,
    /// Route-merge settings.
    pub merge: RouteMergeConfig,
}

impl LocalSearch {
    /// Runs intra-route search, then route merging.
    ///
    /// Returns the improved individual and its objective, never worse than
    /// `objective`.
    pub fn improve<R: Rng + ?Sized>(
        &self,
        chromosome: &Chromosome,
        objective: f64,
        evaluator: &Evaluator<'_>,
        rng: &mut R,
    ) -> (Chromosome, f64) {
        let (c, z) = intra_route_improve(chromosome, objective, evaluator, &self.intra, rng);
        route_merge_improve(&c, z, evaluator, &self.merge)
    }
}
