// src/config/schema.rs
use serde::{Deserialize, Serialize};

use crate::catalog::UseCase;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub intake: IntakeConfig,
}

/// Connection settings for the SpiderFoot engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default)]
    pub auth: AuthScheme,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // Falls back to spiderwrap/<version>
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: None,
            password: None,
            auth: AuthScheme::default(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

/// HTTP authentication scheme used against the engine.
///
/// A password-protected SpiderFoot web UI answers with a digest challenge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    #[default]
    Digest,
    Basic,
}

/// How inbound requests are shaped before forwarding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeConfig {
    #[serde(default = "default_true")]
    pub quote_name_targets: bool,

    #[serde(default)]
    pub default_use_case: UseCase,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            quote_name_targets: true,
            default_use_case: UseCase::All,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}
