//! Validated, immutable problem instance.

use serde::{Deserialize, Serialize};

use super::{Client, InstanceError, Parameters, Truck};
use crate::travel::{TravelMatrix, TravelTimes};

/// Everything the search reads: nodes, fleet, matrices and parameters.
///
/// Built once through [`Instance::new`], which rejects structurally
/// inconsistent data. Afterwards the instance is read-only.
///
/// # Examples
///
/// ```
/// use u_dock_routing::models::{Client, Instance, Parameters, Truck};
/// use u_dock_routing::travel::{TravelMatrix, TravelTimes};
///
/// let clients = vec![Client::depot(0), Client::new(1), Client::new(2)];
/// let trucks = vec![Truck::hourly(1, 100.0, 20.0)];
/// let instance = Instance::new(
///     clients,
///     trucks,
///     TravelMatrix::uniform(3, 10.0),
///     TravelTimes::single(TravelMatrix::uniform(3, 0.5)),
///     Parameters::default(),
/// )
/// .unwrap();
/// assert_eq!(instance.eligible_clients(), vec![1, 2]);
/// assert_eq!(instance.num_trucks(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    clients: Vec<Client>,
    trucks: Vec<Truck>,
    distances: TravelMatrix,
    travel: TravelTimes,
    params: Parameters,
}

impl Instance {
    /// Assembles and validates an instance.
    ///
    /// # Errors
    ///
    /// Returns an [`InstanceError`] if the node list is empty, node ids do
    /// not match their positions, node 0 is not the depot, any matrix has
    /// the wrong size, there are no time bands, a band is empty, or a
    /// timing parameter is negative or non-finite.
    pub fn new(
        clients: Vec<Client>,
        trucks: Vec<Truck>,
        distances: TravelMatrix,
        travel: TravelTimes,
        params: Parameters,
    ) -> Result<Self, InstanceError> {
        if clients.is_empty() {
            return Err(InstanceError::NoNodes);
        }
        if let Some((index, c)) = clients.iter().enumerate().find(|(i, c)| c.id() != *i) {
            return Err(InstanceError::NodeIdMismatch { index, id: c.id() });
        }
        if !clients[0].is_depot() {
            return Err(InstanceError::MissingDepot);
        }

        let n = clients.len();
        if distances.size() != n {
            return Err(InstanceError::MatrixSizeMismatch {
                matrix: "distance".to_string(),
                expected: n,
                actual: distances.size(),
            });
        }
        if travel.is_empty() {
            return Err(InstanceError::NoTimeBands);
        }
        for (band, matrix) in travel.bands() {
            if matrix.size() != n {
                return Err(InstanceError::MatrixSizeMismatch {
                    matrix: format!("band {} travel-time", band.id()),
                    expected: n,
                    actual: matrix.size(),
                });
            }
            if band.start() >= band.end() {
                return Err(InstanceError::EmptyBand { band: band.id() });
            }
        }

        for (name, value) in [
            ("load_unit", params.load_unit),
            ("return_limit", params.return_limit),
            ("min_departure", params.min_departure),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InstanceError::InvalidParameter { name, value });
            }
        }
        if let Some(hours) = params.max_route_hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(InstanceError::InvalidParameter {
                    name: "max_route_hours",
                    value: hours,
                });
            }
        }

        Ok(Self {
            clients,
            trucks,
            distances,
            travel,
            params,
        })
    }

    /// Node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a node of this instance.
    pub fn client(&self, id: usize) -> &Client {
        &self.clients[id]
    }

    /// All nodes, depot first.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Number of nodes including the depot.
    pub fn num_nodes(&self) -> usize {
        self.clients.len()
    }

    /// Trucks in the order given.
    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }

    /// Number of trucks, which is also the number of routes per individual.
    pub fn num_trucks(&self) -> usize {
        self.trucks.len()
    }

    /// Truck serving route slot `route`.
    ///
    /// Falls back to the first truck when the slot exceeds the fleet.
    /// Returns `None` only for an empty fleet.
    pub fn truck_for_route(&self, route: usize) -> Option<&Truck> {
        self.trucks.get(route).or_else(|| self.trucks.first())
    }

    /// Ids of the nodes that must be served, ascending.
    pub fn eligible_clients(&self) -> Vec<usize> {
        self.clients
            .iter()
            .filter(|c| c.is_client() && !c.is_depot())
            .map(|c| c.id())
            .collect()
    }

    /// Direct distance matrix.
    pub fn distances(&self) -> &TravelMatrix {
        &self.distances
    }

    /// Time-banded travel times.
    pub fn travel(&self) -> &TravelTimes {
        &self.travel
    }

    /// Global parameters.
    pub fn params(&self) -> &Parameters {
        &self.params
    }
}
