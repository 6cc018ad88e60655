// src/engine/client.rs
use std::time::Duration;

use async_trait::async_trait;
use diqwest::WithDigestAuth;
use reqwest::{header, Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::models::{self, ScanStatusReport, ScanSummary, StartScanReply};
use super::ScanEngine;
use crate::builder::ScanPayload;
use crate::config::{AuthScheme, EngineConfig};
use crate::error::{IntakeError, IntakeResult};

const START_SCAN: &str = "startscan";
const SCAN_STATUS: &str = "scanstatus";
const STOP_SCAN: &str = "stopscan";
const SCAN_LIST: &str = "scanlist";
const EXPORT_JSON_MULTI: &str = "scanexportjsonmulti";

/// HTTP client for a SpiderFoot web instance
#[derive(Clone)]
pub struct SpiderFootClient {
    client: Client,
    base_url: Url,
    username: Option<String>,
    password: Option<String>,
    auth: AuthScheme,
}

impl SpiderFootClient {
    /// Create a new client from the engine section of the configuration
    pub fn new(config: &EngineConfig) -> IntakeResult<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("spiderwrap/{}", env!("CARGO_PKG_VERSION")));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| IntakeError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        if config.password.is_some() && config.username.is_none() {
            warn!("Engine password configured without a username; requests will be sent unauthenticated");
        }

        Ok(Self {
            client,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
            auth: config.auth,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path against the base URL
    pub fn endpoint(&self, path: &str) -> IntakeResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| IntakeError::ConfigError(format!("Invalid endpoint {}: {}", path, e)))
    }

    fn endpoint_with_query(&self, path: &str, key: &str, value: &str) -> IntakeResult<Url> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut().append_pair(key, value);
        Ok(url)
    }

    /// Attach credentials that can be sent up front. Digest credentials
    /// answer the engine's challenge instead, see [`Self::digest_credentials`].
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match (&self.username, self.auth) {
            (Some(username), AuthScheme::Basic) => request.basic_auth(username, self.password.as_ref()),
            _ => request,
        }
    }

    fn digest_credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, self.auth) {
            (Some(username), AuthScheme::Digest) => {
                Some((username.as_str(), self.password.as_deref().unwrap_or("")))
            }
            _ => None,
        }
    }

    /// Send a request and decode the reply body as JSON.
    ///
    /// An empty body decodes to `Value::Null`; a body that is not JSON is
    /// kept as a string.
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> IntakeResult<Value> {
        let request = self.authorize(request).header(header::ACCEPT, "application/json");

        let response = match self.digest_credentials() {
            Some((username, password)) => request
                .send_with_digest_auth(username, password)
                .await
                .map_err(|e| IntakeError::NetworkError(format!("Digest request to {} failed: {}", endpoint, e)))?,
            None => request.send().await?,
        };

        let body = check_status(endpoint, response).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                debug!("Non-JSON reply from {}: {}", endpoint, e);
                Ok(Value::String(body))
            }
        }
    }
}

#[async_trait]
impl ScanEngine for SpiderFootClient {
    async fn start_scan(&self, payload: &ScanPayload) -> IntakeResult<StartScanReply> {
        let url = self.endpoint(START_SCAN)?;
        debug!("POST {}", url);

        let value = self.send(START_SCAN, self.client.post(url).form(payload)).await?;
        StartScanReply::from_value(START_SCAN, value)
    }

    async fn scan_status(&self, scan_id: &str) -> IntakeResult<ScanStatusReport> {
        let url = self.endpoint_with_query(SCAN_STATUS, "id", scan_id)?;
        debug!("GET {}", url);

        let value = self.send(SCAN_STATUS, self.client.get(url)).await?;
        ScanStatusReport::from_value(SCAN_STATUS, scan_id, &value)
    }

    async fn stop_scan(&self, scan_id: &str) -> IntakeResult<Value> {
        let url = self.endpoint_with_query(STOP_SCAN, "id", scan_id)?;
        debug!("GET {}", url);

        let value = self.send(STOP_SCAN, self.client.get(url)).await?;
        models::reject_engine_error(STOP_SCAN, &value)?;
        Ok(value)
    }

    async fn scan_list(&self) -> IntakeResult<Vec<ScanSummary>> {
        let url = self.endpoint(SCAN_LIST)?;
        debug!("GET {}", url);

        let value = self.send(SCAN_LIST, self.client.get(url)).await?;
        models::parse_scan_list(SCAN_LIST, &value)
    }

    async fn export_json_multi(&self, scan_ids: &[String]) -> IntakeResult<Vec<Value>> {
        let url = self.endpoint_with_query(EXPORT_JSON_MULTI, "ids", &scan_ids.join(","))?;
        debug!("GET {}", url);

        let value = self.send(EXPORT_JSON_MULTI, self.client.get(url)).await?;
        models::parse_export(EXPORT_JSON_MULTI, value)
    }
}

/// Parse the base URL, making sure it ends with a slash so endpoint paths
/// are appended rather than replacing the last segment
fn normalize_base_url(raw: &str) -> IntakeResult<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    let url = Url::parse(&with_slash)
        .map_err(|e| IntakeError::ConfigError(format!("Invalid engine base URL {:?}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(IntakeError::ConfigError(format!(
            "Unsupported engine URL scheme {:?}",
            scheme
        ))),
    }
}

async fn check_status(endpoint: &str, response: Response) -> IntakeResult<String> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!("Engine returned HTTP {} for {}", status.as_u16(), endpoint);
        return Err(IntakeError::EngineStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}
