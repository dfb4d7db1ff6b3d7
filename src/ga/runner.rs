//! Generational search loop.
//!
//! [`GeneticSearch`] drives the complete process: seeding → evaluation →
//! elitism → tournament selection → crossover → mutation → local search →
//! diversity control → repeat, until the generation limit or stagnation.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::chromosome::Chromosome;
use super::config::{LocalSearchMode, Mutation, SearchConfig};
use super::diversity::population_diversity;
use super::operators::{cut_and_fill, insert_mutation, route_based_crossover, swap_mutation};
use super::selection::{best_indices, tournament, worst_indices};
use crate::constructive::{greedy_single_truck, random_chromosome};
use crate::evaluation::{Evaluation, Evaluator};
use crate::models::Instance;

/// Lifecycle of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    /// Created; no generation bred yet.
    Initialized,
    /// At least one generation bred, more to go.
    Running,
    /// Stopped because the best score stagnated.
    EarlyStopped,
    /// Ran every generation, or the input was trivial.
    Completed,
}

impl SearchState {
    /// Returns `true` for the two terminal states.
    pub fn is_finished(&self) -> bool {
        matches!(self, SearchState::EarlyStopped | SearchState::Completed)
    }
}

/// Progress snapshot taken after each generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation index; 0 is the initial population.
    pub generation: usize,
    /// Best objective seen so far.
    pub best_score: f64,
    /// Population diversity, when it was measured this generation.
    pub diversity: Option<f64>,
}

/// Outcome of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Best individual found.
    pub best: Chromosome,
    /// Full evaluation of `best`.
    pub evaluation: Evaluation,
    /// Generations bred.
    pub generations: usize,
    /// Terminal state.
    pub state: SearchState,
    /// One entry per generation, starting with the initial population.
    pub history: Vec<GenerationStats>,
}

impl SearchResult {
    /// Objective value of the best individual.
    pub fn best_score(&self) -> f64 {
        self.evaluation.objective
    }

    /// Serializes the result as pretty-printed JSON.
    #[cfg(feature = "json")]
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Errors raised before a search starts.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// [`SearchConfig::validate`] rejected the configuration.
    InvalidConfig(String),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::InvalidConfig(msg) => write!(f, "invalid search config: {}", msg),
        }
    }
}

impl std::error::Error for SearchError {}

/// Genetic search over an instance.
///
/// # Examples
///
/// ```
/// use u_dock_routing::ga::{GeneticSearch, SearchConfig, SearchState};
/// use u_dock_routing::models::{Client, Instance, Parameters, Truck};
/// use u_dock_routing::travel::{TravelMatrix, TravelTimes};
///
/// let mut clients = vec![Client::depot(0)];
/// clients.extend((1..=4).map(Client::new));
/// let instance = Instance::new(
///     clients,
///     vec![Truck::fixed_6h(1, 10.0, 100.0), Truck::fixed_12h(2, 10.0, 150.0)],
///     TravelMatrix::uniform(5, 1.0),
///     TravelTimes::single(TravelMatrix::uniform(5, 0.5)),
///     Parameters::default(),
/// )
/// .unwrap();
///
/// let config = SearchConfig::default()
///     .with_population_size(20)
///     .with_max_generations(20);
/// let result = GeneticSearch::new(&instance, config).unwrap().run();
/// assert!((result.best_score() - 100.0).abs() < 1e-10);
/// assert!(result.state.is_finished());
/// ```
#[derive(Debug)]
pub struct GeneticSearch<'a> {
    instance: &'a Instance,
    evaluator: Evaluator<'a>,
    config: SearchConfig,
    rng: ChaCha8Rng,
    clients: Vec<usize>,
    population: Vec<Chromosome>,
    fitness: Vec<f64>,
    best: Chromosome,
    best_score: f64,
    generation: usize,
    stagnation: usize,
    state: SearchState,
    history: Vec<GenerationStats>,
}

impl<'a> GeneticSearch<'a> {
    /// Creates a search in the [`SearchState::Initialized`] state.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn new(instance: &'a Instance, config: SearchConfig) -> Result<Self, SearchError> {
        config.validate().map_err(SearchError::InvalidConfig)?;
        let num_routes = instance.num_trucks();
        Ok(Self {
            instance,
            evaluator: Evaluator::new(instance).with_weights(config.priority_weights),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            clients: instance.eligible_clients(),
            population: Vec::with_capacity(config.population_size),
            fitness: Vec::with_capacity(config.population_size),
            best: Chromosome::from_routes(&vec![Vec::new(); num_routes]),
            best_score: f64::INFINITY,
            generation: 0,
            stagnation: 0,
            state: SearchState::Initialized,
            history: Vec::new(),
            config,
        })
    }

    /// Current state.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Generations bred so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current population.
    pub fn population(&self) -> &[Chromosome] {
        &self.population
    }

    /// Objective of each member of the current population.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Best individual seen so far and its objective.
    pub fn best(&self) -> (&Chromosome, f64) {
        (&self.best, self.best_score)
    }

    /// Per-generation progress so far.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    fn num_routes(&self) -> usize {
        self.instance.num_trucks()
    }

    fn is_trivial(&self) -> bool {
        self.num_routes() == 0 || self.clients.is_empty()
    }

    /// Builds and evaluates the initial population.
    ///
    /// Trivial inputs (no trucks or no clients) complete immediately with
    /// all routes empty. Calling this more than once has no effect.
    pub fn initialize(&mut self) {
        if !self.history.is_empty() || self.state.is_finished() {
            return;
        }
        if self.is_trivial() {
            self.best_score = self.evaluator.objective(&self.best);
            self.history.push(GenerationStats {
                generation: 0,
                best_score: self.best_score,
                diversity: None,
            });
            self.state = SearchState::Completed;
            return;
        }

        let num_routes = self.num_routes();
        self.population = (0..self.config.population_size)
            .map(|_| random_chromosome(&self.clients, num_routes, &mut self.rng))
            .collect();
        self.fitness = self.evaluate_all(&self.population);

        if self.config.greedy_seeding {
            let greedy = greedy_single_truck(&self.evaluator);
            let seeds = [
                swap_mutation(&greedy, &mut self.rng),
                insert_mutation(&greedy, &mut self.rng),
                greedy,
            ];
            let slots = worst_indices(&self.fitness, seeds.len().min(self.population.len()));
            // greedy itself takes the worst slot
            for (slot, seed) in slots.into_iter().zip(seeds.into_iter().rev()) {
                self.fitness[slot] = self.evaluator.objective(&seed);
                self.population[slot] = seed;
            }
        }

        let best = best_indices(&self.fitness, 1)[0];
        self.best = self.population[best].clone();
        self.best_score = self.fitness[best];
        self.history.push(GenerationStats {
            generation: 0,
            best_score: self.best_score,
            diversity: None,
        });
        info!(
            population = self.population.len(),
            routes = num_routes,
            clients = self.clients.len(),
            best = self.best_score,
            "initial population evaluated"
        );
    }

    /// Breeds one generation and returns the resulting state.
    ///
    /// Initializes first if needed. Does nothing once finished.
    pub fn step(&mut self) -> SearchState {
        if self.history.is_empty() {
            self.initialize();
        }
        if self.state.is_finished() {
            return self.state;
        }

        let generation = self.generation + 1;
        let next = self.breed(generation);
        self.fitness = self.evaluate_all(&next);
        self.population = next;
        self.generation = generation;
        self.state = SearchState::Running;

        let gen_best = best_indices(&self.fitness, 1)[0];
        if self.fitness[gen_best] < self.best_score {
            self.best = self.population[gen_best].clone();
            self.best_score = self.fitness[gen_best];
            self.stagnation = 0;
        } else {
            self.stagnation += 1;
        }

        let diversity = self.control_diversity(generation);
        self.history.push(GenerationStats {
            generation,
            best_score: self.best_score,
            diversity,
        });

        let last = generation == self.config.max_generations;
        if generation == 1
            || last
            || (self.config.log_interval > 0 && generation % self.config.log_interval == 0)
        {
            info!(generation, best = self.best_score, "generation complete");
        }

        if self.config.stagnation_limit > 0 && self.stagnation >= self.config.stagnation_limit {
            info!(
                generation,
                stagnation = self.stagnation,
                best = self.best_score,
                "early stop: no improvement"
            );
            self.state = SearchState::EarlyStopped;
        } else if last {
            self.state = SearchState::Completed;
        }
        self.state
    }

    /// Runs to completion and returns the result.
    #[tracing::instrument(
        skip_all,
        fields(
            population = self.config.population_size,
            generations = self.config.max_generations,
            seed = self.config.seed
        )
    )]
    pub fn run(mut self) -> SearchResult {
        self.initialize();
        while !self.state.is_finished() {
            self.step();
        }
        if self.config.polish_best && !self.is_trivial() {
            self.polish();
        }
        self.finish()
    }

    fn finish(self) -> SearchResult {
        let evaluation = self.evaluator.evaluate(&self.best);
        info!(
            generations = self.generation,
            state = ?self.state,
            objective = evaluation.objective,
            "search finished"
        );
        SearchResult {
            best: self.best,
            evaluation,
            generations: self.generation,
            state: self.state,
            history: self.history,
        }
    }

    fn evaluate_all(&self, population: &[Chromosome]) -> Vec<f64> {
        population.iter().map(|c| self.evaluator.objective(c)).collect()
    }

    fn breed(&mut self, generation: usize) -> Vec<Chromosome> {
        let size = self.config.population_size;
        let elites: Vec<Chromosome> = best_indices(&self.fitness, self.config.elite_count)
            .into_iter()
            .map(|i| self.population[i].clone())
            .collect();
        let improve = match self.config.local_search_mode {
            LocalSearchMode::Off => false,
            LocalSearchMode::EveryGeneration => true,
            LocalSearchMode::FinalGeneration => generation == self.config.max_generations,
        };

        let mut next = Vec::with_capacity(size);
        while next.len() < size - elites.len() {
            let a = tournament(&self.fitness, self.config.tournament_size, &mut self.rng);
            let b = tournament(&self.fitness, self.config.tournament_size, &mut self.rng);
            let (pa, pb) = (&self.population[a], &self.population[b]);

            let mut child = if self.rng.random_bool(self.config.crossover_rate) {
                route_based_crossover(pa, pb, &mut self.rng)
            } else {
                pa.clone()
            };
            if self.rng.random_bool(self.config.mutation_rate) {
                child = match self.config.mutation_weights.pick(&mut self.rng) {
                    Mutation::Swap => swap_mutation(&child, &mut self.rng),
                    Mutation::Insert => insert_mutation(&child, &mut self.rng),
                    Mutation::CutAndFill => cut_and_fill(&child, pb, &mut self.rng),
                };
            }
            if improve {
                let z = self.evaluator.objective(&child);
                child = self
                    .config
                    .local_search
                    .improve(&child, z, &self.evaluator, &mut self.rng)
                    .0;
            }
            next.push(child);
        }
        next.extend(elites);
        next
    }

    fn control_diversity(&mut self, generation: usize) -> Option<f64> {
        let interval = self.config.diversity_interval;
        if interval == 0 || generation % interval != 0 {
            return None;
        }
        let diversity = population_diversity(&self.population);
        info!(generation, diversity, "diversity check");
        if diversity < self.config.diversity_threshold {
            let size = self.population.len();
            let count = ((self.config.regeneration_ratio * size as f64).round() as usize)
                .clamp(1, size);
            info!(generation, diversity, replaced = count, "regenerating population");
            let num_routes = self.num_routes();
            for slot in worst_indices(&self.fitness, count) {
                let fresh = random_chromosome(&self.clients, num_routes, &mut self.rng);
                self.fitness[slot] = self.evaluator.objective(&fresh);
                self.population[slot] = fresh;
            }
        }
        Some(diversity)
    }

    fn polish(&mut self) {
        let (improved, z) = self.config.local_search.improve(
            &self.best,
            self.best_score,
            &self.evaluator,
            &mut self.rng,
        );
        if z < self.best_score {
            debug!(from = self.best_score, to = z, "polished best individual");
            self.best = improved;
            self.best_score = z;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::{IntraRouteConfig, LocalSearch, RouteMergeConfig};
    use crate::models::{fixtures, Parameters, Truck};

    fn two_truck_instance() -> Instance {
        fixtures::uniform(
            4,
            0.5,
            vec![Truck::fixed_6h(1, 10.0, 100.0), Truck::fixed_12h(2, 10.0, 150.0)],
            Parameters::default(),
        )
    }

    fn quick() -> SearchConfig {
        SearchConfig::default()
            .with_population_size(20)
            .with_max_generations(20)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let inst = two_truck_instance();
        let err = GeneticSearch::new(&inst, SearchConfig::default().with_population_size(0));
        assert!(matches!(err, Err(SearchError::InvalidConfig(_))));
    }

    #[test]
    fn test_two_trucks_converge_to_cheapest_plan() {
        let inst = two_truck_instance();
        let result = GeneticSearch::new(&inst, quick()).expect("valid").run();
        assert!((result.best_score() - 100.0).abs() < 1e-10);
        assert!(result.generations <= 20);
        let routes = result.best.routes();
        assert_eq!(routes[0].len(), 4);
        assert!(routes[1].is_empty());
        assert!(result.best.is_valid(&[1, 2, 3, 4], 2));
    }

    #[test]
    fn test_local_search_alone_finds_single_truck_plan() {
        let inst = two_truck_instance();
        let config = quick().with_greedy_seeding(false);
        let result = GeneticSearch::new(&inst, config).expect("valid").run();
        assert!((result.best_score() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let inst = fixtures::mixed();
        let config = quick()
            .with_max_generations(8)
            .with_local_search_mode(LocalSearchMode::Off)
            .with_seed(11);
        let a = GeneticSearch::new(&inst, config.clone()).expect("valid").run();
        let b = GeneticSearch::new(&inst, config).expect("valid").run();
        assert_eq!(a.history, b.history);
        assert_eq!(a.best, b.best);
    }

    #[test]
    fn test_deterministic_for_seed_with_local_search() {
        let inst = fixtures::mixed();
        let local_search = LocalSearch {
            intra: IntraRouteConfig {
                route_fraction: 0.5,
                max_evaluations: 10,
            },
            merge: RouteMergeConfig { max_evaluations: 20 },
        };
        let config = SearchConfig::default()
            .with_population_size(8)
            .with_max_generations(5)
            .with_local_search_mode(LocalSearchMode::EveryGeneration)
            .with_local_search(local_search)
            .with_seed(23);
        let a = GeneticSearch::new(&inst, config.clone()).expect("valid").run();
        let b = GeneticSearch::new(&inst, config).expect("valid").run();
        assert_eq!(a.history, b.history);
        assert_eq!(a.best, b.best);
    }

    #[test]
    fn test_best_score_never_increases() {
        let inst = fixtures::mixed();
        let config = quick()
            .with_max_generations(15)
            .with_local_search_mode(LocalSearchMode::Off)
            .with_greedy_seeding(false);
        let result = GeneticSearch::new(&inst, config).expect("valid").run();
        assert_eq!(result.history[0].generation, 0);
        for w in result.history.windows(2) {
            assert!(w[1].best_score <= w[0].best_score);
        }
        let last = result.history.last().map(|s| s.best_score);
        assert_eq!(last, Some(result.best_score()));
    }

    #[test]
    fn test_early_stop_on_stagnation() {
        let inst = two_truck_instance();
        let config = quick()
            .with_max_generations(500)
            .with_stagnation_limit(3)
            .with_local_search_mode(LocalSearchMode::Off);
        let result = GeneticSearch::new(&inst, config).expect("valid").run();
        // the greedy seed is already optimal, so nothing improves after it
        assert_eq!(result.state, SearchState::EarlyStopped);
        assert_eq!(result.generations, 3);
        assert_eq!(result.history.len(), 4);
    }

    #[test]
    fn test_runs_all_generations_without_stagnation_limit() {
        let inst = two_truck_instance();
        let config = quick()
            .with_max_generations(5)
            .with_stagnation_limit(0)
            .with_local_search_mode(LocalSearchMode::Off);
        let result = GeneticSearch::new(&inst, config).expect("valid").run();
        assert_eq!(result.state, SearchState::Completed);
        assert_eq!(result.generations, 5);
    }

    #[test]
    fn test_state_transitions() {
        let inst = two_truck_instance();
        let config = quick()
            .with_max_generations(2)
            .with_stagnation_limit(0)
            .with_local_search_mode(LocalSearchMode::Off);
        let mut search = GeneticSearch::new(&inst, config).expect("valid");
        assert_eq!(search.state(), SearchState::Initialized);
        search.initialize();
        assert_eq!(search.state(), SearchState::Initialized);
        assert_eq!(search.population().len(), 20);
        assert_eq!(search.step(), SearchState::Running);
        assert_eq!(search.step(), SearchState::Completed);
        assert_eq!(search.step(), SearchState::Completed);
        assert_eq!(search.generation(), 2);
    }

    #[test]
    fn test_population_stays_valid() {
        let inst = fixtures::mixed();
        let config = quick()
            .with_max_generations(3)
            .with_mutation_rate(1.0)
            .with_local_search_mode(LocalSearchMode::FinalGeneration);
        let mut search = GeneticSearch::new(&inst, config).expect("valid");
        let clients = inst.eligible_clients();
        while !search.step().is_finished() {
            assert_eq!(search.population().len(), 20);
            assert!(search.population().iter().all(|c| c.is_valid(&clients, 3)));
        }
        assert_eq!(search.fitness().len(), 20);
    }

    #[test]
    fn test_diversity_snapshots_and_regeneration() {
        let inst = fixtures::mixed();
        let config = quick()
            .with_max_generations(4)
            .with_stagnation_limit(0)
            .with_local_search_mode(LocalSearchMode::Off)
            .with_diversity_control(2, 1.0, 0.5);
        let result = GeneticSearch::new(&inst, config).expect("valid").run();
        assert!(result.history[1].diversity.is_none());
        assert!(result.history[2].diversity.is_some());
        assert!(result.history[4].diversity.is_some());
        assert!(result.best.is_valid(&inst.eligible_clients(), 3));
    }

    #[test]
    fn test_polish_never_hurts() {
        let inst = fixtures::mixed();
        let base = quick()
            .with_max_generations(3)
            .with_local_search_mode(LocalSearchMode::Off)
            .with_stagnation_limit(0);
        let plain = GeneticSearch::new(&inst, base.clone()).expect("valid").run();
        let polished = GeneticSearch::new(&inst, base.with_polish_best(true))
            .expect("valid")
            .run();
        assert!(polished.best_score() <= plain.best_score());
    }

    #[test]
    fn test_trivial_inputs_complete_immediately() {
        let no_clients = fixtures::uniform(0, 1.0, vec![Truck::hourly(1, 1.0, 1.0)], Parameters::default());
        let result = GeneticSearch::new(&no_clients, quick()).expect("valid").run();
        assert_eq!(result.state, SearchState::Completed);
        assert_eq!(result.generations, 0);
        assert_eq!(result.best.routes(), vec![Vec::<usize>::new()]);
        assert_eq!(result.best_score(), 0.0);

        let no_trucks = fixtures::uniform(3, 1.0, vec![], Parameters::default());
        let result = GeneticSearch::new(&no_trucks, quick()).expect("valid").run();
        assert_eq!(result.state, SearchState::Completed);
        assert_eq!(result.best.num_routes(), 0);
        assert_eq!(result.best_score(), 0.0);
    }

    #[test]
    fn test_result_serializes() {
        let inst = two_truck_instance();
        let config = quick().with_max_generations(2);
        let result = GeneticSearch::new(&inst, config).expect("valid").run();
        let value = serde_json::to_value(&result).expect("serializable");
        assert_eq!(value["state"], "Completed");
        assert!(value["history"].as_array().is_some_and(|h| h.len() == 3));
    }
}
