// src/builder.rs
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{self, UseCase};
use crate::error::ValidationError;
use crate::request::ScanRequest;
use crate::target::{ClassifiedTarget, TargetType};

/// Where the final selection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    ExplicitModules,
    ExplicitTypes,
    ModuleTable,
    TypeTable,
    UniversalTypes,
}

/// Modules and data types to request from the engine.
///
/// At most one of the two lists is populated: the engine treats a module
/// list and a type list as alternative ways of scoping a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSelection {
    pub modules: Vec<String>,
    pub types: Vec<String>,
    pub source: SelectionSource,
}

impl ScanSelection {
    fn modules(modules: Vec<String>, source: SelectionSource) -> Self {
        Self { modules, types: Vec::new(), source }
    }

    fn types(types: Vec<String>, source: SelectionSource) -> Self {
        Self { modules: Vec::new(), types, source }
    }

    pub fn module_list(&self) -> String {
        self.modules.join(",")
    }

    pub fn type_list(&self) -> String {
        self.types.join(",")
    }
}

/// Form body for the engine's `startscan` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanPayload {
    pub scanname: String,
    pub scantarget: String,
    pub usecase: String,
    pub modulelist: String,
    pub typelist: String,
}

/// Comma-joined module and type lists, as handed to the forwarding layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadLists {
    pub modules: String,
    pub types: String,
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
///
/// Duplicates are removed, keeping the first occurrence.
pub fn parse_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
    }
    items
}

/// Turns a classified target and use case into the engine's module/type selection
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    quote_name_targets: bool,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self { quote_name_targets: true }
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable quoting of person-name and username targets
    pub fn quote_name_targets(mut self, enabled: bool) -> Self {
        self.quote_name_targets = enabled;
        self
    }

    /// Resolve the module/type selection.
    ///
    /// Precedence, first hit wins:
    /// 1. explicit modules
    /// 2. explicit types
    /// 3. module table entry for the target type, filtered by use case
    /// 4. type table entry for the target type
    /// 5. the universal type list
    pub fn build(
        &self,
        target_type: TargetType,
        use_case: UseCase,
        explicit_modules: &str,
        explicit_types: &str,
    ) -> ScanSelection {
        let modules = parse_list(explicit_modules);
        if !modules.is_empty() {
            return ScanSelection::modules(modules, SelectionSource::ExplicitModules);
        }

        let types = parse_list(explicit_types);
        if !types.is_empty() {
            return ScanSelection::types(types, SelectionSource::ExplicitTypes);
        }

        if let Some(entries) = catalog::modules_for(target_type) {
            let modules: Vec<String> = entries
                .iter()
                .filter(|entry| entry.serves(use_case))
                .map(|entry| entry.name.to_string())
                .collect();

            if !modules.is_empty() {
                return ScanSelection::modules(modules, SelectionSource::ModuleTable);
            }
            debug!("No {} modules serve use case {}", target_type, use_case);
        }

        match catalog::types_for(target_type) {
            Some(types) => ScanSelection::types(owned_list(types), SelectionSource::TypeTable),
            None => ScanSelection::types(owned_list(catalog::UNIVERSAL_TYPES), SelectionSource::UniversalTypes),
        }
    }

    /// Classify the request target and build the complete form payload
    pub fn payload(&self, request: &ScanRequest) -> (ClassifiedTarget, ScanSelection, ScanPayload) {
        let target = ClassifiedTarget::classify(request.target());
        let selection = self.build(
            target.target_type,
            request.use_case(),
            request.modules(),
            request.type_list(),
        );

        debug!(
            "Shaped scan {} for {} target via {:?}",
            request.scan_name(),
            target.target_type,
            selection.source
        );

        let payload = ScanPayload {
            scanname: request.scan_name().to_string(),
            scantarget: target.engine_value(self.quote_name_targets),
            usecase: request.use_case().as_str().to_string(),
            modulelist: selection.module_list(),
            typelist: selection.type_list(),
        };

        (target, selection, payload)
    }
}

fn owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Build comma-joined module and type lists for a classified target.
///
/// Fails only when the use case is not one of the recognized set.
pub fn build_scan_payload(
    target_type: TargetType,
    use_case: &str,
    explicit_modules: &str,
    explicit_types: &str,
) -> Result<PayloadLists, ValidationError> {
    let use_case: UseCase = use_case.parse()?;
    let selection = RequestBuilder::new().build(target_type, use_case, explicit_modules, explicit_types);

    Ok(PayloadLists {
        modules: selection.module_list(),
        types: selection.type_list(),
    })
}
