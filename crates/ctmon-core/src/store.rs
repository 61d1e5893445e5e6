//! Record store: the retained history, its retention policy, and the
//! persisted key-value slot behind it.
//!
//! Persistence-layer failures are recovered locally: the operator has no
//! remediation path, so a corrupt or unavailable slot resets to an empty
//! store with a diagnostic log instead of a hard error.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use tracing::{error, warn};
use uuid::Uuid;

use crate::clock::{format_display, Clock};
use crate::error::{MonitorError, Result};
use crate::export;
use crate::models::{Candidate, DerivedMetrics, Record};

/// Key under which the record history is persisted.
pub const STORAGE_KEY: &str = "monitoringData";

/// Records older than this are purged on load.
pub const RETENTION_DAYS: i64 = 7;

/// Generic key-value persistence slot.
pub trait KeyValueSlot {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn save(&self, key: &str, bytes: &[u8]) -> Result<()>;
    fn clear(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueSlot + ?Sized> KeyValueSlot for std::sync::Arc<S> {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).load(key)
    }
    fn save(&self, key: &str, bytes: &[u8]) -> Result<()> {
        (**self).save(key, bytes)
    }
    fn clear(&self, key: &str) -> Result<()> {
        (**self).clear(key)
    }
}

/// File-backed slot: one `<key>.json` file under the data directory.
///
/// Writes go through a temp file and rename, so the slot never holds a
/// partial write.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueSlot for FileSlot {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(path)?))
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, self.path(key))?;
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<()> {
        let path = self.path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory slot for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySlot {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl KeyValueSlot for MemorySlot {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| MonitorError::Other("slot lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| MonitorError::Other("slot lock poisoned".into()))?;
        entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| MonitorError::Other("slot lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Owns the retained history and keeps the persisted slot in sync with
/// the in-memory sequence after every mutation.
pub struct RecordStore<S: KeyValueSlot> {
    slot: S,
    records: Vec<Record>,
}

impl<S: KeyValueSlot> RecordStore<S> {
    pub fn new(slot: S) -> Self {
        Self {
            slot,
            records: Vec::new(),
        }
    }

    /// Load the persisted history, dropping records older than the
    /// retention window, and re-persist the filtered result. The window
    /// is normalized once per load, not re-evaluated continuously.
    ///
    /// Fails soft: a corrupt slot is cleared and treated as empty.
    /// Returns the number of retained records.
    pub fn load(&mut self, clock: &dyn Clock) -> usize {
        let raw = match self.slot.load(STORAGE_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                self.records.clear();
                return 0;
            }
            Err(e) => {
                warn!("failed to read persisted history: {e}");
                self.records.clear();
                return 0;
            }
        };

        let parsed: Vec<Record> = match serde_json::from_slice(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!("persisted history is corrupt, resetting: {e}");
                if let Err(e) = self.slot.clear(STORAGE_KEY) {
                    error!("failed to clear corrupt slot: {e}");
                }
                self.records.clear();
                return 0;
            }
        };

        let cutoff = clock.now().with_timezone(&Utc) - Duration::days(RETENTION_DAYS);
        self.records = parsed
            .into_iter()
            .filter(|record| within_retention(record, cutoff))
            .collect();
        self.persist();
        self.records.len()
    }

    /// Validate and append a new record, stamped from `clock`. The
    /// persisted slot holds the full updated sequence before this
    /// returns.
    pub fn commit(&mut self, candidate: Candidate, clock: &dyn Clock) -> Result<Record> {
        let derived = DerivedMetrics::compute(&candidate.inputs);

        let mut missing: Vec<&str> = Vec::new();
        if derived.productivity_loader <= 0.0 {
            missing.push("loader productivity");
        }
        if candidate.pit_location.trim().is_empty() {
            missing.push("pit location");
        }
        if candidate.unit_loader.trim().is_empty() {
            missing.push("loader unit");
        }
        if derived.match_factor <= 0.0 {
            missing.push("match factor");
        }
        if !missing.is_empty() {
            return Err(MonitorError::Validation(format!(
                "complete all monitoring data before saving (missing or zero: {})",
                missing.join(", ")
            )));
        }

        let now = clock.now();
        let record = Record {
            id: Uuid::new_v4().to_string(),
            date_time: format_display(now),
            pit_location: candidate.pit_location,
            unit_loader: candidate.unit_loader,
            inputs: candidate.inputs,
            loading_time: derived.loading_time,
            productivity_loader: derived.productivity_loader,
            productivity_hauler: derived.productivity_hauler,
            match_factor: derived.match_factor,
            timestamp: now
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        self.records.push(record.clone());
        self.persist();
        Ok(record)
    }

    /// Encode the history as a CSV document. An empty history is an
    /// error so no file is ever produced for it.
    pub fn export(&self) -> Result<Vec<u8>> {
        if self.records.is_empty() {
            return Err(MonitorError::EmptyStore);
        }
        export::encode_csv(&self.records)
    }

    /// Read-only view of the retained history, insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the full sequence to the slot. Failures are logged, not
    /// surfaced: the in-memory history stays authoritative for the
    /// session.
    fn persist(&self) {
        let bytes = match serde_json::to_vec(&self.records) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("failed to serialize history: {e}");
                return;
            }
        };
        if let Err(e) = self.slot.save(STORAGE_KEY, &bytes) {
            error!("failed to persist history: {e}");
        }
    }
}

fn within_retention(record: &Record, cutoff: DateTime<Utc>) -> bool {
    match DateTime::parse_from_rfc3339(&record.timestamp) {
        Ok(ts) => ts.with_timezone(&Utc) > cutoff,
        // An unreadable timestamp cannot be proven recent; drop it.
        Err(_) => false,
    }
}
