pub mod ledger;
pub mod progress;
pub mod schema;
pub mod storage;

pub use ledger::MistakeLedger;
pub use progress::ProgressStore;
pub use storage::{FileStorage, MemoryStorage, Storage};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported export version: {found} (expected {expected})")]
    UnsupportedExportVersion { found: u32, expected: u32 },
}
