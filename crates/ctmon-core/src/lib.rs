//! ctmon-core: calculation, persistence and export pipeline for
//! mine-site cycle-time productivity monitoring.
//!
//! The metric engine is pure and UI-independent; the record store owns
//! the retained history behind a key-value persistence port; the export
//! encoder renders spreadsheet-ready CSV; the session clock stamps
//! records at commit time.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod store;

pub use clock::{Clock, FixedClock, SessionClock, SystemClock};
pub use config::MonitorConfig;
pub use error::MonitorError;
pub use models::{Candidate, DerivedMetrics, RawInputs, RawValue, Record};
pub use store::{FileSlot, KeyValueSlot, MemorySlot, RecordStore};
