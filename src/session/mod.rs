pub mod report;
pub mod round;
pub mod stats;
