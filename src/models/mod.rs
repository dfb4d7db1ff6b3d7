//! Problem data consumed by the search.
//!
//! Provides the node, fleet and parameter types, and the validated
//! [`Instance`] that ties them to the travel data in [`crate::travel`].

mod client;
mod error;
mod instance;
mod params;
mod truck;

#[cfg(test)]
pub(crate) use instance::fixtures;

pub use client::{Client, TimeWindow};
pub use error::InstanceError;
pub use instance::Instance;
pub use params::{Parameters, PenaltyRates};
pub use truck::{Contract, ContractRates, Truck};
