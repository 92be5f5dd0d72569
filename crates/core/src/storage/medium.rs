//! Key-value medium abstraction over the durable store.

use thiserror::Error;

/// Error raised by a [`KeyValueMedium`] operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MediumError {
    /// The medium ran out of space.
    #[error("storage quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Any other I/O-level failure.
    #[error("storage medium unavailable: {0}")]
    Unavailable(String),
}

impl MediumError {
    pub fn is_quota(&self) -> bool {
        matches!(self, MediumError::QuotaExceeded(_))
    }
}

/// A synchronous string key-value medium.
///
/// All backends implement the same surface; there is no optional
/// capability probing at call sites. Failures carry enough
/// classification for the adapter to pick a degraded mode.
pub trait KeyValueMedium: Send {
    /// Read the value under `key`; `Ok(None)` is a clean miss.
    fn get(&self, key: &str) -> Result<Option<String>, MediumError>;

    /// Write `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), MediumError>;

    /// Delete `key`; deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), MediumError>;
}
