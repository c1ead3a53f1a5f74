//! Mango - Virtual Lovebird Simulation
//!
//! The pet-state engine behind Mango: five bounded meters that decay over
//! time, guarded care actions, random events, weather pressure, aging and a
//! mini-game score ledger, all persisted across sessions.

pub mod actions;
pub mod core;
pub mod entity;
pub mod oracle;
pub mod persistence;
pub mod score;
pub mod simulation;

pub use crate::core::config::SimulationConfig;
pub use crate::core::error::{MangoError, Result};
pub use crate::entity::mood::Mood;
pub use crate::entity::pet::{Meter, PetState};
pub use crate::simulation::tick::{PetSnapshot, Simulation, SimulationEvent};
