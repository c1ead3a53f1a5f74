//! External data collaborators
//!
//! Both oracles cache their value and refresh on their own interval,
//! independent of the tick rate. A stale value is always acceptable.

pub mod facts;
pub mod weather;

pub use facts::FactOracle;
pub use weather::{FixedWeather, SimulatedWeather, WeatherCondition, WeatherOracle, WeatherReport};
