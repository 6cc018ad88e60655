// src/engine/models.rs
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{IntakeError, IntakeResult};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Normalized lifecycle state of a scan on the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanState {
    Pending,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl ScanState {
    /// Map a raw engine status string; anything unrecognized counts as failed
    pub fn from_engine_status(status: &str) -> Self {
        match status.trim().to_ascii_uppercase().as_str() {
            "CREATED" | "STARTING" => ScanState::Pending,
            "STARTED" | "RUNNING" | "ABORT-REQUESTED" => ScanState::Running,
            "FINISHED" => ScanState::Completed,
            "STOPPED" | "ABORTED" => ScanState::Cancelled,
            _ => ScanState::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanState::Completed | ScanState::Cancelled | ScanState::Failed)
    }
}

/// Reply to a `startscan` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartScanReply {
    pub scan_id: String,
    pub raw: Value,
}

impl StartScanReply {
    pub fn from_value(endpoint: &str, value: Value) -> IntakeResult<Self> {
        reject_engine_error(endpoint, &value)?;

        let scan_id = match &value {
            Value::Array(items) => items.get(1).and_then(scalar_string),
            Value::Object(map) => map
                .get("id")
                .or_else(|| map.get("scan_id"))
                .and_then(scalar_string),
            _ => None,
        };

        match scan_id {
            Some(scan_id) => Ok(Self { scan_id, raw: value }),
            None => Err(IntakeError::MalformedReply {
                endpoint: endpoint.to_string(),
                message: format!("no scan id in {}", value),
            }),
        }
    }
}

/// Reply to a `scanstatus` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanStatusReport {
    pub scan_id: String,
    pub name: Option<String>,
    pub target: Option<String>,
    pub created: Option<NaiveDateTime>,
    pub started: Option<NaiveDateTime>,
    pub ended: Option<NaiveDateTime>,
    pub status: String,
    pub state: ScanState,
}

impl ScanStatusReport {
    /// Parse the engine's `[name, target, created, started, ended, status, ...]` row
    pub fn from_value(endpoint: &str, scan_id: &str, value: &Value) -> IntakeResult<Self> {
        reject_engine_error(endpoint, value)?;

        let row = value.as_array().ok_or_else(|| IntakeError::MalformedReply {
            endpoint: endpoint.to_string(),
            message: format!("expected a status row, got {}", value),
        })?;

        let status = row.get(5).and_then(scalar_string).ok_or_else(|| IntakeError::MalformedReply {
            endpoint: endpoint.to_string(),
            message: format!("status row has no status field: {}", value),
        })?;

        Ok(Self {
            scan_id: scan_id.to_string(),
            name: row.first().and_then(scalar_string),
            target: row.get(1).and_then(scalar_string),
            created: row.get(2).and_then(parse_timestamp),
            started: row.get(3).and_then(parse_timestamp),
            ended: row.get(4).and_then(parse_timestamp),
            state: ScanState::from_engine_status(&status),
            status,
        })
    }
}

/// One row of the engine's scan list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub id: String,
    pub name: String,
    pub target: String,
    pub created: Option<NaiveDateTime>,
    pub started: Option<NaiveDateTime>,
    pub finished: Option<NaiveDateTime>,
    pub status: String,
    pub state: ScanState,
    pub event_count: u64,
}

impl ScanSummary {
    /// Parse an `[id, name, target, created, started, finished, status, eventcount, ...]` row
    pub fn from_row(row: &Value) -> Option<Self> {
        let row = row.as_array()?;
        let status = row.get(6).and_then(scalar_string).unwrap_or_default();

        Some(Self {
            id: row.first().and_then(scalar_string)?,
            name: row.get(1).and_then(scalar_string).unwrap_or_default(),
            target: row.get(2).and_then(scalar_string).unwrap_or_default(),
            created: row.get(3).and_then(parse_timestamp),
            started: row.get(4).and_then(parse_timestamp),
            finished: row.get(5).and_then(parse_timestamp),
            state: ScanState::from_engine_status(&status),
            status,
            event_count: row.get(7).and_then(Value::as_u64).unwrap_or(0),
        })
    }
}

/// Parse a `scanlist` reply, skipping rows that carry no scan id
pub fn parse_scan_list(endpoint: &str, value: &Value) -> IntakeResult<Vec<ScanSummary>> {
    reject_engine_error(endpoint, value)?;

    let rows = value.as_array().ok_or_else(|| IntakeError::MalformedReply {
        endpoint: endpoint.to_string(),
        message: format!("expected a list of scans, got {}", value),
    })?;

    Ok(rows.iter().filter_map(ScanSummary::from_row).collect())
}

/// Parse a `scanexportjsonmulti` reply into its event list
pub fn parse_export(endpoint: &str, value: Value) -> IntakeResult<Vec<Value>> {
    reject_engine_error(endpoint, &value)?;

    match value {
        Value::Array(events) => Ok(events),
        other => Err(IntakeError::MalformedReply {
            endpoint: endpoint.to_string(),
            message: format!("expected a list of events, got {}", other),
        }),
    }
}

/// Fail when the engine answered with its `["ERROR", message]` convention
pub fn reject_engine_error(endpoint: &str, value: &Value) -> IntakeResult<()> {
    match engine_error(value) {
        Some(message) => Err(IntakeError::EngineRejected {
            endpoint: endpoint.to_string(),
            message,
        }),
        None => Ok(()),
    }
}

fn engine_error(value: &Value) -> Option<String> {
    let items = value.as_array()?;
    let head = items.first()?.as_str()?;
    if !head.eq_ignore_ascii_case("ERROR") {
        return None;
    }
    Some(
        items
            .get(1)
            .and_then(scalar_string)
            .unwrap_or_else(|| "unspecified engine error".to_string()),
    )
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Engine timestamps arrive either formatted or as epoch seconds; zero and
/// placeholders such as "Not yet" mean the event has not happened
fn parse_timestamp(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).ok(),
        Value::Number(n) => {
            let seconds = n.as_f64()?;
            if seconds <= 0.0 {
                return None;
            }
            DateTime::<Utc>::from_timestamp(seconds as i64, 0).map(|dt| dt.naive_utc())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ScanState::from_engine_status("CREATED"), ScanState::Pending);
        assert_eq!(ScanState::from_engine_status("STARTING"), ScanState::Pending);
        assert_eq!(ScanState::from_engine_status("RUNNING"), ScanState::Running);
        assert_eq!(ScanState::from_engine_status("started"), ScanState::Running);
        assert_eq!(ScanState::from_engine_status("FINISHED"), ScanState::Completed);
        assert_eq!(ScanState::from_engine_status("ABORTED"), ScanState::Cancelled);
        assert_eq!(ScanState::from_engine_status("ERROR-FAILED"), ScanState::Failed);
        assert_eq!(ScanState::from_engine_status("gibberish"), ScanState::Failed);
        assert!(ScanState::Completed.is_terminal());
        assert!(!ScanState::Running.is_terminal());
    }

    #[test]
    fn test_start_reply_array_form() {
        let reply = StartScanReply::from_value("startscan", json!(["SUCCESS", "ABC123"])).unwrap();
        assert_eq!(reply.scan_id, "ABC123");
    }

    #[test]
    fn test_start_reply_object_form() {
        let reply = StartScanReply::from_value("startscan", json!({"status": "success", "id": 42})).unwrap();
        assert_eq!(reply.scan_id, "42");
    }

    #[test]
    fn test_start_reply_engine_error() {
        let err = StartScanReply::from_value("startscan", json!(["ERROR", "Invalid target type"])).unwrap_err();
        match err {
            IntakeError::EngineRejected { endpoint, message } => {
                assert_eq!(endpoint, "startscan");
                assert_eq!(message, "Invalid target type");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_start_reply_without_id_is_malformed() {
        let err = StartScanReply::from_value("startscan", json!("ok")).unwrap_err();
        assert!(matches!(err, IntakeError::MalformedReply { .. }));
    }

    #[test]
    fn test_status_row() {
        let value = json!(["weekly", "example.com", "2024-05-01 10:00:00", "2024-05-01 10:00:05", "Not yet", "RUNNING", {}]);
        let report = ScanStatusReport::from_value("scanstatus", "ABC", &value).unwrap();

        assert_eq!(report.scan_id, "ABC");
        assert_eq!(report.name.as_deref(), Some("weekly"));
        assert_eq!(report.target.as_deref(), Some("example.com"));
        assert_eq!(report.state, ScanState::Running);
        assert!(report.started.is_some());
        assert!(report.ended.is_none());
        assert_eq!(
            report.created.unwrap().format(TIMESTAMP_FORMAT).to_string(),
            "2024-05-01 10:00:00"
        );
    }

    #[test]
    fn test_status_row_without_status_is_malformed() {
        let err = ScanStatusReport::from_value("scanstatus", "ABC", &json!(["only", "two"])).unwrap_err();
        assert!(matches!(err, IntakeError::MalformedReply { .. }));
    }

    #[test]
    fn test_scan_list_rows() {
        let value = json!([
            ["ID1", "first", "example.com", "2024-05-01 10:00:00", "2024-05-01 10:00:01", "2024-05-01 11:00:00", "FINISHED", 1520, {}],
            ["ID2", "second", "\"John Smith\"", 1714557600, 0, 0, "STARTING", 0, {}],
            "garbage",
            []
        ]);
        let scans = parse_scan_list("scanlist", &value).unwrap();

        assert_eq!(scans.len(), 2);
        assert_eq!(scans[0].id, "ID1");
        assert_eq!(scans[0].state, ScanState::Completed);
        assert_eq!(scans[0].event_count, 1520);
        assert!(scans[0].finished.is_some());
        assert_eq!(scans[1].state, ScanState::Pending);
        assert!(scans[1].created.is_some());
        assert!(scans[1].started.is_none());
    }

    #[test]
    fn test_export_events() {
        let events = parse_export("scanexportjsonmulti", json!([{"type": "IP_ADDRESS"}, {"type": "EMAILADDR"}])).unwrap();
        assert_eq!(events.len(), 2);

        let err = parse_export("scanexportjsonmulti", json!({"events": []})).unwrap_err();
        assert!(matches!(err, IntakeError::MalformedReply { .. }));
    }
}
