// src/service.rs
//! Request handling in front of the engine: validate, classify, shape and
//! forward, then normalize whatever came back.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::builder::{RequestBuilder, ScanPayload, ScanSelection, SelectionSource};
use crate::catalog::UseCase;
use crate::config::Config;
use crate::engine::{ScanEngine, ScanStatusReport, ScanSummary, SpiderFootClient};
use crate::error::{IntakeResult, ValidationError};
use crate::request::ScanRequest;
use crate::target::TargetType;

const SUCCESS: &str = "success";

/// What would be sent to the engine for a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanPlan {
    pub scan_name: String,
    pub target: String,
    pub target_type: TargetType,
    pub use_case: UseCase,
    pub selection: ScanSelection,
    pub payload: ScanPayload,
}

/// Result of a successfully forwarded scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSubmission {
    pub status: String,
    pub scan_id: String,
    pub scan_name: String,
    pub target: String,
    pub target_type: TargetType,
    pub use_case: UseCase,
    pub modules: Vec<String>,
    pub types: Vec<String>,
    pub source: SelectionSource,
    pub engine_response: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopResult {
    pub status: String,
    pub scan_id: String,
    pub engine_response: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanListing {
    pub scan_count: usize,
    pub scans: Vec<ScanSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanExport {
    pub scan_ids: Vec<String>,
    pub event_count: usize,
    pub data: Vec<Value>,
}

pub struct ScanService<E: ScanEngine> {
    engine: E,
    builder: RequestBuilder,
}

impl ScanService<SpiderFootClient> {
    /// Service talking to the engine named in the configuration
    pub fn from_config(config: &Config) -> IntakeResult<Self> {
        let engine = SpiderFootClient::new(&config.engine)?;
        info!("Using engine at {}", engine.base_url());

        let builder = RequestBuilder::new().quote_name_targets(config.intake.quote_name_targets);
        Ok(Self::new(engine, builder))
    }
}

impl<E: ScanEngine> ScanService<E> {
    pub fn new(engine: E, builder: RequestBuilder) -> Self {
        Self { engine, builder }
    }

    /// Shape a request without contacting the engine
    pub fn plan(&self, request: &ScanRequest) -> ScanPlan {
        let (target, selection, payload) = self.builder.payload(request);

        ScanPlan {
            scan_name: request.scan_name().to_string(),
            target: target.value,
            target_type: target.target_type,
            use_case: request.use_case(),
            selection,
            payload,
        }
    }

    /// Shape a request and start it on the engine
    pub async fn submit(&self, request: &ScanRequest) -> IntakeResult<ScanSubmission> {
        let plan = self.plan(request);
        info!(
            "Starting scan {} against {} ({})",
            plan.scan_name, plan.target, plan.target_type
        );
        debug!(
            "Forwarding {} modules and {} types",
            plan.selection.modules.len(),
            plan.selection.types.len()
        );

        let reply = self.engine.start_scan(&plan.payload).await?;
        info!("Engine accepted scan {} as {}", plan.scan_name, reply.scan_id);

        Ok(ScanSubmission {
            status: SUCCESS.to_string(),
            scan_id: reply.scan_id,
            scan_name: plan.scan_name,
            target: plan.target,
            target_type: plan.target_type,
            use_case: plan.use_case,
            modules: plan.selection.modules,
            types: plan.selection.types,
            source: plan.selection.source,
            engine_response: reply.raw,
        })
    }

    pub async fn status(&self, scan_id: &str) -> IntakeResult<ScanStatusReport> {
        let scan_id = require_scan_id(scan_id)?;
        let report = self.engine.scan_status(scan_id).await?;
        debug!("Scan {} is {} ({:?})", scan_id, report.status, report.state);
        Ok(report)
    }

    pub async fn stop(&self, scan_id: &str) -> IntakeResult<StopResult> {
        let scan_id = require_scan_id(scan_id)?;
        info!("Stopping scan {}", scan_id);

        let engine_response = self.engine.stop_scan(scan_id).await?;
        Ok(StopResult {
            status: SUCCESS.to_string(),
            scan_id: scan_id.to_string(),
            engine_response,
        })
    }

    pub async fn list(&self) -> IntakeResult<ScanListing> {
        let scans = self.engine.scan_list().await?;
        Ok(ScanListing {
            scan_count: scans.len(),
            scans,
        })
    }

    /// Export events for one or more scans; blank ids are ignored
    pub async fn export(&self, scan_ids: &[String]) -> IntakeResult<ScanExport> {
        let scan_ids: Vec<String> = scan_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();

        if scan_ids.is_empty() {
            return Err(ValidationError::MissingScanId.into());
        }

        let data = self.engine.export_json_multi(&scan_ids).await?;
        if data.is_empty() {
            warn!("Export of {} returned no events", scan_ids.join(","));
        }

        Ok(ScanExport {
            event_count: data.len(),
            scan_ids,
            data,
        })
    }
}

fn require_scan_id(scan_id: &str) -> Result<&str, ValidationError> {
    let scan_id = scan_id.trim();
    if scan_id.is_empty() {
        Err(ValidationError::MissingScanId)
    } else {
        Ok(scan_id)
    }
}
