pub mod sqlite;
pub mod traits;

use thiserror::Error;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageRead, StorageWrite};

/// Closed error taxonomy of the persistence layer. `NotFound` signals an
/// update/delete/append whose filter matched nothing; everything else is a
/// database or document-codec failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no record matched the filter")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("document codec error: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
