pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;

pub use calendar::DayPhase;
pub use clock::{Clock, ClockHandle, ManualClock, SystemClock};
