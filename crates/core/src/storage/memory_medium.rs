//! In-process key-value medium; never fails.

use std::collections::HashMap;

use super::medium::{KeyValueMedium, MediumError};

/// HashMap-backed medium for tests and `backend = "memory"` configs.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    entries: HashMap<String, String>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>, MediumError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MediumError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), MediumError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_remove() {
        let mut medium = MemoryMedium::new();
        assert_eq!(medium.get("k").unwrap(), None);
        medium.set("k", "v").unwrap();
        assert_eq!(medium.get("k").unwrap().as_deref(), Some("v"));
        medium.remove("k").unwrap();
        assert_eq!(medium.get("k").unwrap(), None);
    }
}
