//! Truck type with capacity and contract pricing.

use serde::{Deserialize, Serialize};

/// Which of a truck's three rates is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Contract {
    /// Billed per hour of route time (TT).
    Hourly,
    /// Flat fee covering a 6-hour shift.
    Fixed6h,
    /// Flat fee covering a 12-hour shift.
    Fixed12h,
}

/// The three contract rates quoted for a truck.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContractRates {
    /// Cost per hour for [`Contract::Hourly`].
    pub hourly: f64,
    /// Flat fee for [`Contract::Fixed6h`].
    pub fixed_6h: f64,
    /// Flat fee for [`Contract::Fixed12h`].
    pub fixed_12h: f64,
}

/// A truck available for one route.
///
/// # Examples
///
/// ```
/// use u_dock_routing::models::{Contract, Truck};
///
/// let t = Truck::hourly(1, 80.0, 25.0);
/// assert_eq!(t.contract(), Contract::Hourly);
/// assert_eq!(t.cost_for(3.0), 75.0);
///
/// let f = Truck::fixed_12h(2, 120.0, 300.0);
/// assert_eq!(f.cost_for(3.0), 300.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    id: usize,
    capacity: f64,
    rates: ContractRates,
    contract: Contract,
}

impl Truck {
    /// Creates a truck with explicit rates and contract.
    pub fn new(id: usize, capacity: f64, rates: ContractRates, contract: Contract) -> Self {
        Self {
            id,
            capacity,
            rates,
            contract,
        }
    }

    /// Hourly-billed truck.
    pub fn hourly(id: usize, capacity: f64, rate: f64) -> Self {
        let rates = ContractRates {
            hourly: rate,
            ..ContractRates::default()
        };
        Self::new(id, capacity, rates, Contract::Hourly)
    }

    /// Truck on a fixed 6-hour fee.
    pub fn fixed_6h(id: usize, capacity: f64, fee: f64) -> Self {
        let rates = ContractRates {
            fixed_6h: fee,
            ..ContractRates::default()
        };
        Self::new(id, capacity, rates, Contract::Fixed6h)
    }

    /// Truck on a fixed 12-hour fee.
    pub fn fixed_12h(id: usize, capacity: f64, fee: f64) -> Self {
        let rates = ContractRates {
            fixed_12h: fee,
            ..ContractRates::default()
        };
        Self::new(id, capacity, rates, Contract::Fixed12h)
    }

    /// Truck ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load carried at any point of a route.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// All quoted rates.
    pub fn rates(&self) -> &ContractRates {
        &self.rates
    }

    /// The billed contract.
    pub fn contract(&self) -> Contract {
        self.contract
    }

    /// Cost of operating this truck for a route of `route_hours` (TT).
    ///
    /// Fixed contracts are not prorated.
    pub fn cost_for(&self, route_hours: f64) -> f64 {
        match self.contract {
            Contract::Hourly => self.rates.hourly * route_hours,
            Contract::Fixed6h => self.rates.fixed_6h,
            Contract::Fixed12h => self.rates.fixed_12h,
        }
    }
}
