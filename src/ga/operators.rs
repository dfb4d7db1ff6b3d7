//! Crossover and mutation operators.
//!
//! Every operator takes valid parents and returns a new valid individual:
//! same route count, every client exactly once. Parents are never modified.
//!
//! [`cut_and_fill`], [`swap_mutation`] and [`insert_mutation`] work on the
//! flattened client sequence and repartition it evenly afterwards, so the
//! parent's route sizes are not preserved.

use std::collections::HashSet;

use rand::seq::index;
use rand::Rng;

use super::chromosome::{partition_evenly, Chromosome};

/// Route-based crossover (RBX).
///
/// Copies k whole routes of `a` (k uniform in `[1, ⌈R/2⌉]`) into the same
/// slots of the child. The other slots receive `b`'s clients in their
/// left-to-right order, minus those already copied, split evenly with the
/// remainder going to the earliest slots.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_dock_routing::ga::{route_based_crossover, Chromosome};
///
/// let a = Chromosome::from_routes(&[vec![1, 2], vec![3], vec![4, 5]]);
/// let b = Chromosome::from_routes(&[vec![5, 4], vec![3, 2], vec![1]]);
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let child = route_based_crossover(&a, &b, &mut rng);
/// assert!(child.is_valid(&[1, 2, 3, 4, 5], 3));
/// ```
pub fn route_based_crossover<R: Rng + ?Sized>(
    a: &Chromosome,
    b: &Chromosome,
    rng: &mut R,
) -> Chromosome {
    let routes_a = a.routes();
    let num_routes = routes_a.len();
    if num_routes == 0 {
        return a.clone();
    }

    let k = rng.random_range(1..=num_routes.div_ceil(2));
    let mut slots: Vec<Option<Vec<usize>>> = vec![None; num_routes];
    let mut copied = HashSet::new();
    for i in index::sample(rng, num_routes, k).iter() {
        copied.extend(routes_a[i].iter().copied());
        slots[i] = Some(routes_a[i].clone());
    }

    let remaining: Vec<usize> = b
        .clients()
        .into_iter()
        .filter(|c| !copied.contains(c))
        .collect();
    let open: Vec<usize> = (0..num_routes).filter(|&i| slots[i].is_none()).collect();
    let mut fill = partition_evenly(&remaining, open.len()).into_iter();
    for i in open {
        slots[i] = Some(fill.next().unwrap_or_default());
    }

    let routes: Vec<Vec<usize>> = slots.into_iter().map(Option::unwrap_or_default).collect();
    Chromosome::from_routes(&routes)
}

/// Cut-and-fill crossover.
///
/// Keeps `a`'s flattened clients up to and including a random cut, appends
/// `b`'s clients in order skipping duplicates, then repartitions evenly.
pub fn cut_and_fill<R: Rng + ?Sized>(a: &Chromosome, b: &Chromosome, rng: &mut R) -> Chromosome {
    let flat_a = a.clients();
    let num_routes = a.num_routes();
    if flat_a.is_empty() {
        return Chromosome::from_sequence(&b.clients(), num_routes);
    }

    let cut = rng.random_range(0..flat_a.len());
    let mut sequence = flat_a[..=cut].to_vec();
    let mut seen: HashSet<usize> = sequence.iter().copied().collect();
    for c in b.clients().into_iter().chain(flat_a[cut + 1..].iter().copied()) {
        if seen.insert(c) {
            sequence.push(c);
        }
    }
    Chromosome::from_sequence(&sequence, num_routes)
}

/// Swaps two distinct positions of the flattened sequence, then repartitions.
pub fn swap_mutation<R: Rng + ?Sized>(c: &Chromosome, rng: &mut R) -> Chromosome {
    let mut flat = c.clients();
    let n = flat.len();
    if n >= 2 {
        let i = rng.random_range(0..n);
        let mut j = rng.random_range(0..n - 1);
        if j >= i {
            j += 1;
        }
        flat.swap(i, j);
    }
    Chromosome::from_sequence(&flat, c.num_routes())
}

/// Moves one client to a different position of the flattened sequence,
/// then repartitions.
pub fn insert_mutation<R: Rng + ?Sized>(c: &Chromosome, rng: &mut R) -> Chromosome {
    let mut flat = c.clients();
    let n = flat.len();
    if n >= 2 {
        let from = rng.random_range(0..n);
        let client = flat.remove(from);
        let mut to = rng.random_range(0..n - 1);
        if to >= from {
            to += 1;
        }
        flat.insert(to, client);
    }
    Chromosome::from_sequence(&flat, c.num_routes())
}
