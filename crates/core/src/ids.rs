//! Ticket id generation.

use uuid::Uuid;

/// Source of fresh ticket ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Generator producing `t_` + random UUID ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        format!("t_{}", Uuid::new_v4())
    }
}
