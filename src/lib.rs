//! # u-dock-routing
//!
//! Truck routing under time windows, capacity limits and a shared pool of
//! loading docks, searched with a genetic algorithm whose fitness function
//! is a time-banded route simulator.
//!
//! ## Modules
//!
//! - [`models`] — Instance data (Client, Truck, Parameters, validated Instance)
//! - [`travel`] — Distance matrix and time-banded travel times
//! - [`evaluation`] — Route simulation and objective aggregation
//! - [`scheduling`] — Dock-constrained departure scheduling
//! - [`constructive`] — Random and greedy initial individuals
//! - [`local_search`] — Intra-route and route-merge improvement
//! - [`ga`] — Encoding, operators and the generational search
//!
//! ## Example
//!
//! ```
//! use u_dock_routing::ga::{GeneticSearch, SearchConfig};
//! use u_dock_routing::models::{Client, Instance, Parameters, TimeWindow, Truck};
//! use u_dock_routing::travel::{TravelMatrix, TravelTimes};
//!
//! let clients = vec![
//!     Client::depot(0),
//!     Client::new(1).with_window(TimeWindow::new(8.0, 10.0).unwrap()),
//!     Client::new(2).critical().with_demand(3.0, 0.0),
//!     Client::new(3).with_service_time(0.25),
//! ];
//! let instance = Instance::new(
//!     clients,
//!     vec![Truck::hourly(1, 10.0, 30.0), Truck::hourly(2, 10.0, 30.0)],
//!     TravelMatrix::uniform(4, 5.0),
//!     TravelTimes::single(TravelMatrix::uniform(4, 0.5)),
//!     Parameters::default().with_min_departure(6.0),
//! )
//! .unwrap();
//!
//! let config = SearchConfig::default()
//!     .with_population_size(10)
//!     .with_max_generations(10);
//! let result = GeneticSearch::new(&instance, config).unwrap().run();
//! assert!(result.best.is_valid(&[1, 2, 3], 2));
//! ```

pub mod constructive;
pub mod evaluation;
pub mod ga;
pub mod local_search;
pub mod models;
pub mod scheduling;
pub mod travel;
