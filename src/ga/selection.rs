//! Parent selection.
//!
//! All selection assumes **minimization**: the lowest objective wins.

use rand::seq::index;
use rand::Rng;

/// Tournament selection without replacement.
///
/// Samples `min(k, n)` distinct indices uniformly from `fitness` and returns
/// the one with the lowest value. Ties go to the first sampled.
///
/// # Panics
///
/// Panics if `fitness` is empty.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_dock_routing::ga::tournament;
///
/// let fitness = [5.0, 1.0, 3.0];
/// let mut rng = ChaCha8Rng::seed_from_u64(0);
/// // a tournament as large as the population always picks the best
/// assert_eq!(tournament(&fitness, 3, &mut rng), 1);
/// ```
pub fn tournament<R: Rng + ?Sized>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    assert!(!fitness.is_empty(), "cannot select from empty population");
    let n = fitness.len();
    let k = k.clamp(1, n);

    let mut best_idx = None;
    for idx in index::sample(rng, n, k).iter() {
        match best_idx {
            Some(b) if fitness[b] <= fitness[idx] => {}
            _ => best_idx = Some(idx),
        }
    }
    best_idx.unwrap_or(0)
}

/// Indices of the `count` lowest values, best first.
///
/// Sorting is stable, so equal values keep population order.
pub fn best_indices(fitness: &[f64], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| {
        fitness[a]
            .partial_cmp(&fitness[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(count);
    order
}

/// Indices of the `count` highest values, worst first.
pub fn worst_indices(fitness: &[f64], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| {
        fitness[b]
            .partial_cmp(&fitness[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(count);
    order
}
