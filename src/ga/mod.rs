//! Genetic search over depot-delimited route encodings.
//!
//! - [`Chromosome`] — Flat route encoding with depot markers
//! - [`operators`] — Route-based crossover, cut-and-fill, swap and insert
//! - [`selection`] — Tournament selection over objective values
//! - [`GeneticSearch`] — Generational loop with elitism, local search,
//!   diversity control and early stopping

mod chromosome;
mod config;
mod diversity;
pub mod operators;
mod runner;
pub mod selection;

pub use chromosome::{partition_evenly, Chromosome, DEPOT};
pub use config::{LocalSearchMode, Mutation, MutationWeights, SearchConfig};
pub use diversity::population_diversity;
pub use operators::{cut_and_fill, insert_mutation, route_based_crossover, swap_mutation};
pub use runner::{GenerationStats, GeneticSearch, SearchError, SearchResult, SearchState};
pub use selection::tournament;
