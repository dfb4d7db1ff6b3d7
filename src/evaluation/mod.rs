//! Route simulation and objective evaluation.
//!
//! - [`RouteSimulator`] — Time, wait and load trace of one route
//! - [`Evaluator`] — Dock scheduling plus simulation, aggregated into Z

mod objective;
mod simulator;

pub use objective::{Evaluation, Evaluator, RouteEvaluation};
pub use simulator::{RouteSimulator, RouteTrace, Violations, Visit};
