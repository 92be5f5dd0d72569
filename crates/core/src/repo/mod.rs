//! Ticket repository backed by the storage adapter.

mod local;

pub use local::{LocalTicketRepo, LEGACY_KEYS, STORAGE_KEY};
