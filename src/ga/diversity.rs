//! Population diversity measure.

use super::Chromosome;

/// Positional diversity of a population in `[0, 1]`.
///
/// Computed as one minus the mean, over all unordered pairs, of the fraction
/// of positions at which the two flattened client sequences agree. Pairs of
/// unequal length are compared over the shorter one. Populations with fewer
/// than two members, or with no clients, have diversity 0.
///
/// # Examples
///
/// ```
/// use u_dock_routing::ga::{population_diversity, Chromosome};
///
/// let a = Chromosome::from_routes(&[vec![1, 2, 3, 4]]);
/// let b = Chromosome::from_routes(&[vec![1, 2, 4, 3]]);
/// assert_eq!(population_diversity(&[a.clone(), a.clone()]), 0.0);
/// assert!((population_diversity(&[a, b]) - 0.5).abs() < 1e-10);
/// ```
pub fn population_diversity(population: &[Chromosome]) -> f64 {
    if population.len() < 2 {
        return 0.0;
    }
    let flat: Vec<Vec<usize>> = population.iter().map(Chromosome::clients).collect();

    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..flat.len() {
        for j in (i + 1)..flat.len() {
            let len = flat[i].len().min(flat[j].len());
            if len == 0 {
                continue;
            }
            let same = flat[i]
                .iter()
                .zip(&flat[j])
                .filter(|(a, b)| a == b)
                .count();
            total += same as f64 / len as f64;
            pairs += 1;
        }
    }
    if pairs == 0 {
        return 0.0;
    }
    1.0 - total / pairs as f64
}
