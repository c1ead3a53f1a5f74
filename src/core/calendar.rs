//! Day/night tracking
//!
//! Mango's world follows the player's local clock: the night phase covers
//! the hours before 06:00 and after 18:00.

use chrono::{DateTime, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPhase {
    Day,   // 06:00-18:59
    Night, // 19:00-05:59
}

impl DayPhase {
    pub fn from_hour(hour: u32) -> Self {
        if hour < 6 || hour > 18 {
            DayPhase::Night
        } else {
            DayPhase::Day
        }
    }

    /// Phase at the given instant, in the machine's local time zone
    pub fn at(now: DateTime<Utc>) -> Self {
        Self::from_hour(now.with_timezone(&Local).hour())
    }

    pub fn is_night(&self) -> bool {
        matches!(self, DayPhase::Night)
    }
}
