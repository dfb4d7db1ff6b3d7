//! Departure scheduling under a shared pool of loading docks.
//!
//! - [`DockScheduler`] — Priority-ordered greedy dock assignment
//! - [`PriorityWeights`] — Weights of the five route priority signals

mod docks;
mod priority;

pub use docks::{DockSchedule, DockScheduler, Loading};
pub use priority::{priority_scores, PriorityWeights, RouteSignals};
