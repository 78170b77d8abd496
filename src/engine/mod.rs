pub mod difficulty;
pub mod round_engine;
pub mod selection;

pub use difficulty::Difficulty;
pub use round_engine::{Outcome, RoundEngine};
