pub mod catalog;
pub mod handler;

pub use catalog::{ActionAvailability, ActionId};
pub use handler::{perform, ActionOutcome};
