// src/error.rs
use thiserror::Error;

/// Rejections raised while validating an inbound scan request.
///
/// All of these are reported before anything is sent to the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Scan name must not be empty")]
    EmptyScanName,

    #[error("Scan name is {length} characters long, the maximum is {max}")]
    ScanNameTooLong {
        length: usize,
        max: usize,
    },

    #[error("Target must contain at least {min} characters, got {target:?}")]
    TargetTooShort {
        target: String,
        min: usize,
    },

    #[error("Unknown use case: {0} (expected one of all, footprint, investigate, passive)")]
    UnknownUseCase(String),

    #[error("Unknown module preset: {0}")]
    UnknownPreset(String),

    #[error("A module preset and an explicit module list cannot be combined")]
    PresetWithModules,

    #[error("At least one scan id is required")]
    MissingScanId,
}

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Invalid scan request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown target type: {0}")]
    UnknownTargetType(String),

    #[error("Engine returned HTTP {status} for {endpoint}: {body}")]
    EngineStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Engine rejected {endpoint}: {message}")]
    EngineRejected {
        endpoint: String,
        message: String,
    },

    #[error("Unexpected reply from {endpoint}: {message}")]
    MalformedReply {
        endpoint: String,
        message: String,
    },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<reqwest::Error> for IntakeError {
    fn from(error: reqwest::Error) -> Self {
        IntakeError::NetworkError(error.to_string())
    }
}

impl From<serde_json::Error> for IntakeError {
    fn from(error: serde_json::Error) -> Self {
        IntakeError::SerializationError(error.to_string())
    }
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;
