pub mod builder;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod request;
pub mod service;
pub mod target;

// Re-export main types for easier access
pub use builder::{build_scan_payload, PayloadLists, RequestBuilder, ScanPayload, ScanSelection};
pub use catalog::UseCase;
pub use config::Config;
pub use engine::{ScanEngine, SpiderFootClient};
pub use error::{IntakeError, IntakeResult, ValidationError};
pub use request::ScanRequest;
pub use service::ScanService;
pub use target::{classify_target, ClassifiedTarget, TargetClassifier, TargetType};
