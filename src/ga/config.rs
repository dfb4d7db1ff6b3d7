//! Search configuration.
//!
//! [`SearchConfig`] holds every parameter of the generational loop.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::local_search::LocalSearch;
use crate::scheduling::PriorityWeights;

/// When children are improved by local search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LocalSearchMode {
    /// Never.
    Off,
    /// Every child of every generation.
    #[default]
    EveryGeneration,
    /// Only children bred in the last generation.
    FinalGeneration,
}

/// A mutation operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    /// [`swap_mutation`](super::swap_mutation).
    Swap,
    /// [`insert_mutation`](super::insert_mutation).
    Insert,
    /// [`cut_and_fill`](super::cut_and_fill) against the second parent.
    CutAndFill,
}

/// Relative odds of each mutation operator once mutation is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationWeights {
    /// Odds of a swap.
    pub swap: f64,
    /// Odds of an insert.
    pub insert: f64,
    /// Odds of a cut-and-fill.
    pub cut_and_fill: f64,
}

impl Default for MutationWeights {
    fn default() -> Self {
        Self {
            swap: 0.70,
            insert: 0.20,
            cut_and_fill: 0.10,
        }
    }
}

impl MutationWeights {
    /// Draws one operator in proportion to the weights.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Mutation {
        let total = self.swap + self.insert + self.cut_and_fill;
        let r = rng.random::<f64>() * total;
        if r < self.swap {
            Mutation::Swap
        } else if r < self.swap + self.insert {
            Mutation::Insert
        } else {
            Mutation::CutAndFill
        }
    }
}

/// Configuration of the genetic search.
///
/// # Defaults
///
/// ```
/// use u_dock_routing::ga::{LocalSearchMode, SearchConfig};
///
/// let config = SearchConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// assert_eq!(config.local_search_mode, LocalSearchMode::EveryGeneration);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_dock_routing::ga::{LocalSearchMode, SearchConfig};
///
/// let config = SearchConfig::default()
///     .with_population_size(30)
///     .with_max_generations(40)
///     .with_local_search_mode(LocalSearchMode::FinalGeneration)
///     .with_seed(7);
/// assert_eq!(config.seed, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of individuals per generation.
    pub population_size: usize,

    /// Maximum number of generations.
    pub max_generations: usize,

    /// Individuals sampled per tournament.
    pub tournament_size: usize,

    /// Probability that a child is bred by route-based crossover rather than
    /// cloned from the first parent.
    pub crossover_rate: f64,

    /// Probability that a child is mutated.
    pub mutation_rate: f64,

    /// Mix of mutation operators.
    pub mutation_weights: MutationWeights,

    /// Best individuals copied unchanged into the next generation.
    pub elite_count: usize,

    /// When local search runs on children.
    pub local_search_mode: LocalSearchMode,

    /// Local search settings.
    pub local_search: LocalSearch,

    /// Generations between diversity checks (0 disables them).
    pub diversity_interval: usize,

    /// Diversity below which part of the population is regenerated.
    pub diversity_threshold: f64,

    /// Share of the population replaced on regeneration.
    pub regeneration_ratio: f64,

    /// Generations without improvement before stopping (0 disables).
    pub stagnation_limit: usize,

    /// Seed of the search's random generator.
    pub seed: u64,

    /// Whether the initial population is seeded with the greedy
    /// single-truck individual and two mutants of it.
    pub greedy_seeding: bool,

    /// Whether the best individual is improved by local search after the
    /// last generation.
    pub polish_best: bool,

    /// Generations between progress log lines.
    pub log_interval: usize,

    /// Dock priority weights used by the evaluator.
    pub priority_weights: PriorityWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            tournament_size: 3,
            crossover_rate: 0.85,
            mutation_rate: 0.10,
            mutation_weights: MutationWeights::default(),
            elite_count: 2,
            local_search_mode: LocalSearchMode::default(),
            local_search: LocalSearch::default(),
            diversity_interval: 50,
            diversity_threshold: 0.8,
            regeneration_ratio: 0.3,
            stagnation_limit: 60,
            seed: 42,
            greedy_seeding: true,
            polish_best: false,
            log_interval: 10,
            priority_weights: PriorityWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation operator mix.
    pub fn with_mutation_weights(mut self, weights: MutationWeights) -> Self {
        self.mutation_weights = weights;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets when local search runs.
    pub fn with_local_search_mode(mut self, mode: LocalSearchMode) -> Self {
        self.local_search_mode = mode;
        self
    }

    /// Sets the local search settings.
    pub fn with_local_search(mut self, local_search: LocalSearch) -> Self {
        self.local_search = local_search;
        self
    }

    /// Sets the diversity check interval, threshold and regeneration share.
    pub fn with_diversity_control(mut self, interval: usize, threshold: f64, ratio: f64) -> Self {
        self.diversity_interval = interval;
        self.diversity_threshold = threshold;
        self.regeneration_ratio = ratio;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables greedy seeding.
    pub fn with_greedy_seeding(mut self, enabled: bool) -> Self {
        self.greedy_seeding = enabled;
        self
    }

    /// Enables or disables the final polish of the best individual.
    pub fn with_polish_best(mut self, enabled: bool) -> Self {
        self.polish_best = enabled;
        self
    }

    /// Sets the progress log interval.
    pub fn with_log_interval(mut self, n: usize) -> Self {
        self.log_interval = n;
        self
    }

    /// Sets the dock priority weights.
    pub fn with_priority_weights(mut self, weights: PriorityWeights) -> Self {
        self.priority_weights = weights;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.tournament_size == 0 {
            return Err("tournament_size must be at least 1".into());
        }
        if self.elite_count >= self.population_size {
            return Err("elite_count must be smaller than population_size".into());
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("diversity_threshold", self.diversity_threshold),
            ("regeneration_ratio", self.regeneration_ratio),
            ("local_search.intra.route_fraction", self.local_search.intra.route_fraction),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(format!("{name} must be in [0, 1]"));
            }
        }
        let w = &self.mutation_weights;
        if [w.swap, w.insert, w.cut_and_fill]
            .iter()
            .any(|x| !x.is_finite() || *x < 0.0)
        {
            return Err("mutation weights must be finite and non-negative".into());
        }
        if w.swap + w.insert + w.cut_and_fill <= 0.0 {
            return Err("mutation weights must not all be zero".into());
        }
        Ok(())
    }
}
