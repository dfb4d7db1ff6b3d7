//! Depot-delimited route encoding.
//!
//! An individual is a flat sequence of node ids in which the depot marker
//! [`DEPOT`] opens the sequence and closes every route:
//!
//! ```text
//! [0, r1…, 0, r2…, 0, …, rR…, 0]
//! ```
//!
//! A sequence for R routes therefore carries exactly R + 1 markers. Empty
//! routes show up as two adjacent markers and survive decoding.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Marker value separating routes; also the depot's node id.
pub const DEPOT: usize = 0;

/// An immutable individual: R routes covering every client once.
///
/// # Examples
///
/// ```
/// use u_dock_routing::ga::Chromosome;
///
/// let c = Chromosome::from_routes(&[vec![3, 1], vec![], vec![2]]);
/// assert_eq!(c.genes(), &[0, 3, 1, 0, 0, 2, 0]);
/// assert_eq!(c.routes(), vec![vec![3, 1], vec![], vec![2]]);
/// assert_eq!(c.num_routes(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chromosome {
    genes: Vec<usize>,
}

impl Chromosome {
    /// Encodes a list of routes.
    pub fn from_routes(routes: &[Vec<usize>]) -> Self {
        let len = routes.iter().map(Vec::len).sum::<usize>() + routes.len() + 1;
        let mut genes = Vec::with_capacity(len);
        genes.push(DEPOT);
        for route in routes {
            genes.extend_from_slice(route);
            genes.push(DEPOT);
        }
        Self { genes }
    }

    /// Wraps a raw gene sequence.
    ///
    /// Returns `None` unless the sequence starts and ends with [`DEPOT`].
    pub fn from_genes(genes: Vec<usize>) -> Option<Self> {
        if genes.len() < 2 || genes[0] != DEPOT || genes[genes.len() - 1] != DEPOT {
            return None;
        }
        Some(Self { genes })
    }

    /// Splits `clients` evenly into `num_routes` routes and encodes them.
    pub fn from_sequence(clients: &[usize], num_routes: usize) -> Self {
        Self::from_routes(&partition_evenly(clients, num_routes))
    }

    /// The raw gene sequence.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Decodes into routes, keeping empty ones.
    pub fn routes(&self) -> Vec<Vec<usize>> {
        let mut routes = Vec::new();
        let mut current = Vec::new();
        for &g in self.genes.iter().skip(1) {
            if g == DEPOT {
                routes.push(std::mem::take(&mut current));
            } else {
                current.push(g);
            }
        }
        routes
    }

    /// Number of routes encoded.
    pub fn num_routes(&self) -> usize {
        self.genes.iter().filter(|&&g| g == DEPOT).count().saturating_sub(1)
    }

    /// Clients in route order, markers removed.
    pub fn clients(&self) -> Vec<usize> {
        self.genes.iter().copied().filter(|&g| g != DEPOT).collect()
    }

    /// Number of clients visited.
    pub fn num_clients(&self) -> usize {
        self.genes.iter().filter(|&&g| g != DEPOT).count()
    }

    /// Returns `true` if this individual has exactly `num_routes` routes and
    /// visits each of `clients` exactly once and nothing else.
    pub fn is_valid(&self, clients: &[usize], num_routes: usize) -> bool {
        if self.genes.first() != Some(&DEPOT) || self.genes.last() != Some(&DEPOT) {
            return false;
        }
        if self.num_routes() != num_routes {
            return false;
        }
        let expected: HashSet<usize> = clients.iter().copied().collect();
        let mut seen = HashSet::with_capacity(clients.len());
        for g in self.genes.iter().copied().filter(|&g| g != DEPOT) {
            if !expected.contains(&g) || !seen.insert(g) {
                return false;
            }
        }
        seen.len() == expected.len()
    }
}

/// Splits `clients` into `num_routes` consecutive chunks in order.
///
/// Every chunk gets `N / R` clients and the first `N mod R` chunks one
/// extra. Returns an empty list when `num_routes` is zero.
///
/// # Examples
///
/// ```
/// use u_dock_routing::ga::partition_evenly;
///
/// let routes = partition_evenly(&[1, 2, 3, 4, 5], 3);
/// assert_eq!(routes, vec![vec![1, 2], vec![3, 4], vec![5]]);
/// ```
pub fn partition_evenly(clients: &[usize], num_routes: usize) -> Vec<Vec<usize>> {
    if num_routes == 0 {
        return Vec::new();
    }
    let base = clients.len() / num_routes;
    let extra = clients.len() % num_routes;
    let mut routes = Vec::with_capacity(num_routes);
    let mut start = 0;
    for r in 0..num_routes {
        let size = base + usize::from(r < extra);
        routes.push(clients[start..start + size].to_vec());
        start += size;
    }
    routes
}
