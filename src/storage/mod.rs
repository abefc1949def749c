//! String-keyed blob storage for election state.
//!
//! A [`Storage`] holds whole values under fixed keys and overwrites them in
//! full on every write. [`snapshot`] maps the election onto those keys.

pub mod file;
pub mod memory;
pub mod snapshot;

use thiserror::Error;

pub use file::FileStorage;
#[cfg(test)]
pub use memory::MemoryStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed value under {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

pub trait Storage {
    /// Read the value stored under `key`, `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
