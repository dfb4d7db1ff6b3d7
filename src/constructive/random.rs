//! Random even-partition construction.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::ga::Chromosome;

/// Shuffles `clients` and splits them evenly into `num_routes` routes.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_dock_routing::constructive::random_chromosome;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let c = random_chromosome(&[1, 2, 3, 4, 5], 2, &mut rng);
/// assert!(c.is_valid(&[1, 2, 3, 4, 5], 2));
/// assert_eq!(c.routes()[0].len(), 3);
/// ```
pub fn random_chromosome<R: Rng + ?Sized>(
    clients: &[usize],
    num_routes: usize,
    rng: &mut R,
) -> Chromosome {
    let mut order = clients.to_vec();
    order.shuffle(rng);
    Chromosome::from_sequence(&order, num_routes)
}
