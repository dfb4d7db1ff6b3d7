//! Constructive seeding for the initial population.
//!
//! - [`random_chromosome`] — Shuffled clients split evenly over all trucks
//! - [`greedy_single_truck`] — Objective-greedy route on the first truck

mod greedy;
mod random;

pub use greedy::greedy_single_truck;
pub use random::random_chromosome;
