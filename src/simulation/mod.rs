pub mod aging;
pub mod decay;
pub mod events;
pub mod tick;

pub use aging::age_if_due;
pub use decay::{apply_decay, DecayEngine, DecayReport};
pub use events::{EventInjector, RandomEvent};
pub use tick::{PetSnapshot, Simulation, SimulationEvent};
