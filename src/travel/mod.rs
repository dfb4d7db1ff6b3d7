//! Distance and time-banded travel-time data.

mod bands;
mod matrix;

pub use bands::{TimeBand, TravelTimes};
pub use matrix::TravelMatrix;
