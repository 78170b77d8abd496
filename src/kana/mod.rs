pub mod inventory;

pub use inventory::{ActiveInventory, Subset, Variant};

use thiserror::Error;

/// Returned when a variant, subset or difficulty name is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
