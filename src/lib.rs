//! Risk Monitor: polls a kernel-exposed process risk listing and records
//! every process found at a designated risk tier.
//!
//! Each cycle reads the listing from scratch, skips its header, and for every
//! line carrying the risk marker prints a highlighted alert and appends the
//! raw line to an append-only log file.

pub mod alert;
pub mod config;
pub mod error;
pub mod listing;
pub mod loop_controller;
pub mod risk_log;
pub mod shutdown;
pub mod source;
pub mod stats;

pub use alert::Alert;
pub use config::Config;
pub use error::{MonitorError, Result};
pub use listing::{Listing, ProcessRiskRecord, RiskLevel};
pub use loop_controller::{CycleOutcome, CycleReport, LoopController, LoopResult};
pub use risk_log::RiskLog;
pub use shutdown::ShutdownListener;
pub use source::{FileSource, ListingSource};
pub use stats::MonitorStats;
