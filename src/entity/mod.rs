pub mod mood;
pub mod pet;
pub mod status;

pub use mood::Mood;
pub use pet::{Meter, PetState, StatKind};
pub use status::{PetStatus, SicknessCause};
