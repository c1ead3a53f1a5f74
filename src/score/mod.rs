pub mod ledger;

pub use ledger::{ScoreLedger, ScoreOutcome};
