// src/engine/mod.rs
//! The boundary to the external scanning engine.
//!
//! [`ScanEngine`] is the seam the service talks through; [`SpiderFootClient`]
//! implements it over the engine's HTTP interface.
pub mod client;
pub mod models;

use async_trait::async_trait;
use serde_json::Value;

use crate::builder::ScanPayload;
use crate::error::IntakeResult;

pub use client::SpiderFootClient;
pub use models::{ScanState, ScanStatusReport, ScanSummary, StartScanReply};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScanEngine: Send + Sync {
    /// Submit a new scan
    async fn start_scan(&self, payload: &ScanPayload) -> IntakeResult<StartScanReply>;

    /// Query the status of one scan
    async fn scan_status(&self, scan_id: &str) -> IntakeResult<ScanStatusReport>;

    /// Ask the engine to abort a running scan
    async fn stop_scan(&self, scan_id: &str) -> IntakeResult<Value>;

    /// List all scans known to the engine
    async fn scan_list(&self) -> IntakeResult<Vec<ScanSummary>>;

    /// Export the events of one or more scans as JSON
    async fn export_json_multi(&self, scan_ids: &[String]) -> IntakeResult<Vec<Value>>;
}
