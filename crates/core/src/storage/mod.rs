//! Storage backends and the degraded-mode persistence adapter.

mod adapter;
mod file_medium;
mod medium;
mod memory_medium;

pub use adapter::{StorageAdapter, StorageIssue, StorageMode, StorageStatus};
pub use file_medium::FileMedium;
pub use medium::{KeyValueMedium, MediumError};
pub use memory_medium::MemoryMedium;
