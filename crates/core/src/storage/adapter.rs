//! Persistence adapter: probes the medium once at startup and absorbs
//! later failures into a mode/issue pair instead of surfacing them.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::medium::{KeyValueMedium, MediumError};

/// Durability mode of the current session.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    Persistent,
    Volatile,
}

/// Why the session is (or will be reported as) volatile.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageIssue {
    StorageUnavailable,
    QuotaExceeded,
    StorageCorrupted,
}

/// Derived storage health, recomputed on demand.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StorageStatus {
    pub mode: StorageMode,
    pub issue: Option<StorageIssue>,
}

const PROBE_KEY: &str = "__ticket_health_probe__";

/// Wraps a [`KeyValueMedium`] with degraded-mode bookkeeping.
///
/// Once downgraded to volatile the adapter stays volatile for the rest
/// of the session; callers keep their data in memory and never observe
/// a write failure.
pub struct StorageAdapter {
    medium: Option<Box<dyn KeyValueMedium>>,
    mode: StorageMode,
    issue: Option<StorageIssue>,
}

impl StorageAdapter {
    /// Probe the medium with a write-then-delete; a failed probe puts
    /// the whole session in volatile mode from the start.
    pub fn probe(mut medium: Box<dyn KeyValueMedium>) -> Self {
        let probed = medium
            .set(PROBE_KEY, "1")
            .and_then(|_| medium.remove(PROBE_KEY));

        match probed {
            Ok(()) => Self {
                medium: Some(medium),
                mode: StorageMode::Persistent,
                issue: None,
            },
            Err(err) => {
                warn!("storage probe failed, starting volatile: {err}");
                Self::unavailable()
            }
        }
    }

    /// Adapter for an environment with no usable medium at all.
    pub fn unavailable() -> Self {
        Self {
            medium: None,
            mode: StorageMode::Volatile,
            issue: Some(StorageIssue::StorageUnavailable),
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.mode == StorageMode::Persistent && self.medium.is_some()
    }

    pub fn issue(&self) -> Option<StorageIssue> {
        self.issue
    }

    /// Record that the persisted payload failed structured decode.
    /// Corruption does not force volatile mode by itself.
    pub fn note_corruption(&mut self) {
        self.issue = Some(StorageIssue::StorageCorrupted);
    }

    fn downgrade(&mut self, err: &MediumError) {
        self.mode = StorageMode::Volatile;
        self.issue = Some(if err.is_quota() {
            StorageIssue::QuotaExceeded
        } else {
            StorageIssue::StorageUnavailable
        });
        warn!("storage downgraded to volatile: {err}");
    }

    /// Read and structurally decode the payload under `key`.
    ///
    /// Miss and decode failure both come back as `None`; a decode
    /// failure additionally flags `storage_corrupted`. An I/O error
    /// downgrades the session to volatile.
    pub fn read_json(&mut self, key: &str) -> Option<Value> {
        if !self.is_persistent() {
            return None;
        }

        let outcome = self.medium.as_ref()?.get(key);
        match outcome {
            Ok(Some(raw)) => {
                if raw.trim().is_empty() {
                    return None;
                }
                match serde_json::from_str(&raw) {
                    Ok(value) => Some(value),
                    Err(err) => {
                        warn!("persisted payload under {key} is corrupted: {err}");
                        self.note_corruption();
                        None
                    }
                }
            }
            Ok(None) => None,
            Err(err) => {
                self.downgrade(&err);
                None
            }
        }
    }

    /// Write `payload` under `key`. Volatile mode makes this a no-op
    /// against the medium; a failing persistent write downgrades the
    /// session instead of erroring. A successful write does not clear
    /// a previously recorded corruption issue, so one-time recovery
    /// stays visible through [`StorageAdapter::status`].
    pub fn write_raw(&mut self, key: &str, payload: &str) {
        if !self.is_persistent() {
            return;
        }
        if let Some(medium) = self.medium.as_mut() {
            if let Err(err) = medium.set(key, payload) {
                self.downgrade(&err);
            }
        }
    }

    /// Best-effort delete, used when retiring legacy keys.
    pub fn remove(&mut self, key: &str) {
        if !self.is_persistent() {
            return;
        }
        if let Some(medium) = self.medium.as_mut() {
            let _ = medium.remove(key);
        }
    }

    /// Report storage health.
    ///
    /// A persistent session with a recorded issue is reported volatile:
    /// it tells the caller "we silently recovered once" even though
    /// later writes may still land on the medium.
    pub fn status(&self) -> StorageStatus {
        match (self.mode, self.issue) {
            (StorageMode::Persistent, None) => StorageStatus {
                mode: StorageMode::Persistent,
                issue: None,
            },
            (StorageMode::Persistent, Some(issue)) => StorageStatus {
                mode: StorageMode::Volatile,
                issue: Some(issue),
            },
            (StorageMode::Volatile, issue) => StorageStatus {
                mode: StorageMode::Volatile,
                issue: issue.or(Some(StorageIssue::StorageUnavailable)),
            },
        }
    }
}
