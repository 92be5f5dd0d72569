//! Filesystem-backed key-value medium, one file per key.

use std::fs;
use std::io;
use std::path::PathBuf;

use super::medium::{KeyValueMedium, MediumError};

// Quota-error signatures recognized at the OS level.
const ENOSPC: i32 = 28;
const EDQUOT: i32 = 122;

/// Stores each key as `<dir>/<sanitized-key>.json`.
pub struct FileMedium {
    dir: PathBuf,
}

impl FileMedium {
    /// Open (and create if needed) the backing directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, MediumError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(classify_io)?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

fn classify_io(err: io::Error) -> MediumError {
    match err.raw_os_error() {
        Some(ENOSPC) | Some(EDQUOT) => MediumError::QuotaExceeded(err.to_string()),
        _ => MediumError::Unavailable(err.to_string()),
    }
}

impl KeyValueMedium for FileMedium {
    fn get(&self, key: &str) -> Result<Option<String>, MediumError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(classify_io(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MediumError> {
        fs::write(self.key_path(key), value).map_err(classify_io)
    }

    fn remove(&mut self, key: &str) -> Result<(), MediumError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(classify_io(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut medium = FileMedium::new(dir.path()).unwrap();

        medium.set("ticketHealth:tickets:v2", "[]").unwrap();
        let read = medium.get("ticketHealth:tickets:v2").unwrap();
        assert_eq!(read.as_deref(), Some("[]"));
    }

    #[test]
    fn test_missing_key_is_clean_miss() {
        let dir = tempfile::tempdir().unwrap();
        let medium = FileMedium::new(dir.path()).unwrap();
        assert_eq!(medium.get("nothing-here").unwrap(), None);
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut medium = FileMedium::new(dir.path()).unwrap();
        assert!(medium.remove("nothing-here").is_ok());
    }

    #[test]
    fn test_remove_deletes_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut medium = FileMedium::new(dir.path()).unwrap();
        medium.set("k", "v").unwrap();
        medium.remove("k").unwrap();
        assert_eq!(medium.get("k").unwrap(), None);
    }

    #[test]
    fn test_key_sanitization() {
        let dir = tempfile::tempdir().unwrap();
        let mut medium = FileMedium::new(dir.path()).unwrap();
        medium.set("ticketHealth:tickets:v2", "payload").unwrap();
        assert!(dir.path().join("ticketHealth_tickets_v2.json").exists());
    }

    #[test]
    fn test_creates_backing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("tickets");
        let _medium = FileMedium::new(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
