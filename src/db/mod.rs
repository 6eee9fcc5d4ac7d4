// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable key-value slots.
//!
//! Each key holds one text value that survives process restarts.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Slot keys as constants.
pub mod keys {
    /// JSON array of every stored workout, in append order.
    pub const WORKOUTS: &str = "workouts";
}

/// A durable text key-value store.
///
/// All calls are synchronous; backends are expected to be local and fast.
pub trait KeyValueStore: Send {
    /// Read the value under `key`, `None` if the slot is empty.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the slot. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Errors from a durable slot backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid slot key: {0:?}")]
    InvalidKey(String),

    #[error("Storage I/O error for {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}
