// src/request.rs
use serde::{Deserialize, Serialize};

use crate::catalog::{self, UseCase};
use crate::error::ValidationError;

pub const MAX_SCAN_NAME_LEN: usize = 100;
pub const MIN_TARGET_LEN: usize = 3;

/// A validated scan request.
///
/// Construction goes through [`ScanRequest::new`] (or serde, which routes
/// through the same checks), so holding a `ScanRequest` means the name,
/// target and use case have already been accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScanRequest")]
pub struct ScanRequest {
    scan_name: String,
    target: String,
    use_case: UseCase,
    modules: String,
    type_list: String,
}

/// Inbound shape of a scan request before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScanRequest {
    pub scan_name: String,
    pub target: String,
    #[serde(default = "default_use_case")]
    pub use_case: String,
    #[serde(default)]
    pub modules: String,
    #[serde(default, alias = "typelist")]
    pub type_list: String,
    #[serde(default)]
    pub preset: Option<String>,
}

fn default_use_case() -> String {
    UseCase::All.as_str().to_string()
}

impl ScanRequest {
    pub fn new(
        scan_name: &str,
        target: &str,
        use_case: &str,
        modules: &str,
        type_list: &str,
    ) -> Result<Self, ValidationError> {
        let scan_name = scan_name.trim();
        let name_length = scan_name.chars().count();
        if scan_name.is_empty() {
            return Err(ValidationError::EmptyScanName);
        }
        if name_length > MAX_SCAN_NAME_LEN {
            return Err(ValidationError::ScanNameTooLong {
                length: name_length,
                max: MAX_SCAN_NAME_LEN,
            });
        }

        let target = target.trim();
        if target.chars().count() < MIN_TARGET_LEN {
            return Err(ValidationError::TargetTooShort {
                target: target.to_string(),
                min: MIN_TARGET_LEN,
            });
        }

        let use_case: UseCase = use_case.parse()?;

        Ok(Self {
            scan_name: scan_name.to_string(),
            target: target.to_string(),
            use_case,
            modules: modules.to_string(),
            type_list: type_list.to_string(),
        })
    }

    /// Validate a request whose module list may come from a named preset
    pub fn with_preset(
        scan_name: &str,
        target: &str,
        use_case: &str,
        preset: &str,
        type_list: &str,
    ) -> Result<Self, ValidationError> {
        let modules = catalog::module_preset(preset)
            .ok_or_else(|| ValidationError::UnknownPreset(preset.to_string()))?;
        Self::new(scan_name, target, use_case, &modules.join(","), type_list)
    }

    /// Scan name with surrounding whitespace removed
    pub fn scan_name(&self) -> &str {
        &self.scan_name
    }

    /// Target with surrounding whitespace removed
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn use_case(&self) -> UseCase {
        self.use_case
    }

    /// Explicit comma-separated module list, empty when none was given
    pub fn modules(&self) -> &str {
        &self.modules
    }

    /// Explicit comma-separated type list, empty when none was given
    pub fn type_list(&self) -> &str {
        &self.type_list
    }
}

impl TryFrom<RawScanRequest> for ScanRequest {
    type Error = ValidationError;

    fn try_from(raw: RawScanRequest) -> Result<Self, Self::Error> {
        match raw.preset.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(_) if !raw.modules.trim().is_empty() => Err(ValidationError::PresetWithModules),
            Some(preset) => Self::with_preset(
                &raw.scan_name,
                &raw.target,
                &raw.use_case,
                preset,
                &raw.type_list,
            ),
            None => Self::new(
                &raw.scan_name,
                &raw.target,
                &raw.use_case,
                &raw.modules,
                &raw.type_list,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request_is_normalized() {
        let request = ScanRequest::new("Test_Example_2025", "  example.com ", "FOOTPRINT", "", "").unwrap();
        assert_eq!(request.target(), "example.com");
        assert_eq!(request.use_case(), UseCase::Footprint);
        assert_eq!(request.scan_name(), "Test_Example_2025");
    }

    #[test]
    fn test_target_length_boundary() {
        assert_eq!(
            ScanRequest::new("scan", " ab ", "all", "", ""),
            Err(ValidationError::TargetTooShort {
                target: "ab".to_string(),
                min: MIN_TARGET_LEN
            })
        );
        assert!(ScanRequest::new("scan", "abc", "all", "", "").is_ok());
    }

    #[test]
    fn test_scan_name_bounds() {
        assert_eq!(
            ScanRequest::new("", "example.com", "all", "", ""),
            Err(ValidationError::EmptyScanName)
        );
        assert_eq!(
            ScanRequest::new("   ", "example.com", "all", "", ""),
            Err(ValidationError::EmptyScanName)
        );

        let longest = "n".repeat(MAX_SCAN_NAME_LEN);
        assert!(ScanRequest::new(&longest, "example.com", "all", "", "").is_ok());

        let too_long = "n".repeat(MAX_SCAN_NAME_LEN + 1);
        assert!(matches!(
            ScanRequest::new(&too_long, "example.com", "all", "", ""),
            Err(ValidationError::ScanNameTooLong { length: 101, max: 100 })
        ));
    }

    #[test]
    fn test_scan_name_is_trimmed_before_length_check() {
        let padded = format!("  {}  ", "n".repeat(MAX_SCAN_NAME_LEN));
        let request = ScanRequest::new(&padded, "example.com", "all", "", "").unwrap();
        assert_eq!(request.scan_name(), "n".repeat(MAX_SCAN_NAME_LEN));

        let request = ScanRequest::new(" weekly ", "example.com", "all", "", "").unwrap();
        assert_eq!(request.scan_name(), "weekly");
    }

    #[test]
    fn test_unknown_use_case_is_rejected() {
        assert_eq!(
            ScanRequest::new("scan", "example.com", "aggressive", "", ""),
            Err(ValidationError::UnknownUseCase("aggressive".to_string()))
        );
    }

    #[test]
    fn test_deserialize_applies_validation() {
        let request: ScanRequest = serde_json::from_str(
            r#"{"scan_name": "Test", "target": "example.com", "modules": "sfp_dnsresolve,sfp_whois"}"#,
        )
        .unwrap();
        assert_eq!(request.use_case(), UseCase::All);
        assert_eq!(request.modules(), "sfp_dnsresolve,sfp_whois");

        let rejected = serde_json::from_str::<ScanRequest>(r#"{"scan_name": "", "target": ""}"#);
        assert!(rejected.is_err());
    }

    #[test]
    fn test_deserialize_accepts_typelist_alias() {
        let request: ScanRequest = serde_json::from_str(
            r#"{"scan_name": "Test", "target": "example.com", "typelist": "type_IP_ADDRESS"}"#,
        )
        .unwrap();
        assert_eq!(request.type_list(), "type_IP_ADDRESS");
    }

    #[test]
    fn test_preset_expands_to_modules() {
        let request = ScanRequest::with_preset("scan", "example.com", "all", "basic", "").unwrap();
        assert_eq!(request.modules(), "sfp_dnsresolve,sfp_whois,sfp_crt");

        assert_eq!(
            ScanRequest::with_preset("scan", "example.com", "all", "nope", ""),
            Err(ValidationError::UnknownPreset("nope".to_string()))
        );
    }

    #[test]
    fn test_preset_and_modules_conflict() {
        let raw = RawScanRequest {
            scan_name: "scan".to_string(),
            target: "example.com".to_string(),
            use_case: "all".to_string(),
            modules: "sfp_whois".to_string(),
            preset: Some("basic".to_string()),
            ..Default::default()
        };
        assert_eq!(ScanRequest::try_from(raw), Err(ValidationError::PresetWithModules));
    }
}
