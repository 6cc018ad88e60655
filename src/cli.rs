// src/cli.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use crate::catalog::{self, UseCase};
use crate::config::Config;
use crate::error::ValidationError;
use crate::request::ScanRequest;
use crate::service::ScanService;
use crate::target::{ClassifiedTarget, TargetType};

#[derive(Parser)]
#[command(name = "spiderwrap")]
#[command(about = "Classify reconnaissance targets and drive a SpiderFoot engine")]
pub struct Args {
    #[command(subcommand)]
    pub command: Cli,

    #[arg(long, global = true)]
    pub verbose: bool,

    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Cli {
    /// Start a scan on the engine
    Scan {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Show the payload a scan would send, without sending it
    Plan {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Classify one or more targets
    Classify {
        #[arg(required = true, help = "Targets to classify")]
        targets: Vec<String>,
    },

    /// Show the status of a scan
    Status {
        #[arg(help = "Scan id")]
        scan_id: String,
    },

    /// Stop a running scan
    Stop {
        #[arg(help = "Scan id")]
        scan_id: String,
    },

    /// List scans known to the engine
    List,

    /// Export scan events as JSON
    Export {
        #[arg(required = true, value_delimiter = ',', help = "Scan ids (space or comma separated)")]
        scan_ids: Vec<String>,
    },

    /// Show module and type tables
    Catalog {
        #[arg(long, help = "Target type, e.g. domain or person_name")]
        target_type: Option<String>,

        #[arg(long, help = "Use case used to filter modules")]
        use_case: Option<String>,
    },

    /// Initialize config
    Init {
        #[arg(short, long, help = "Force overwrite existing configuration")]
        force: bool,
    },
}

#[derive(clap::Args)]
pub struct ScanArgs {
    #[arg(short, long, help = "Scan name")]
    pub name: String,

    #[arg(short, long, help = "Target to scan")]
    pub target: String,

    #[arg(short, long, help = "Use case (all, footprint, investigate, passive)")]
    pub use_case: Option<String>,

    #[arg(short, long, help = "Comma-separated module list")]
    pub modules: Option<String>,

    #[arg(long, help = "Comma-separated type list")]
    pub types: Option<String>,

    #[arg(short, long, conflicts_with = "modules", help = "Module preset (basic, comprehensive, passive_only, threat_intel)")]
    pub preset: Option<String>,

    #[arg(long, help = "Send person names and usernames without quotes")]
    pub no_quote: bool,
}

impl ScanArgs {
    /// Validate into a request, defaulting the use case from configuration
    pub fn request(&self, config: &Config) -> Result<ScanRequest, ValidationError> {
        let use_case = self
            .use_case
            .clone()
            .unwrap_or_else(|| config.intake.default_use_case.as_str().to_string());
        let types = self.types.as_deref().unwrap_or("");

        match &self.preset {
            Some(preset) => ScanRequest::with_preset(&self.name, &self.target, &use_case, preset, types),
            None => ScanRequest::new(
                &self.name,
                &self.target,
                &use_case,
                self.modules.as_deref().unwrap_or(""),
                types,
            ),
        }
    }
}

/// Execute a parsed command line
pub async fn run(args: Args) -> Result<()> {
    if let Cli::Init { force } = args.command {
        let path = match &args.config {
            Some(path) => {
                Config::init_at(path, force)?;
                path.clone()
            }
            None => Config::init(force)?,
        };
        println!("Configuration initialized at {}", path.display());
        return Ok(());
    }

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    debug!("Engine base URL: {}", config.engine.base_url);

    match args.command {
        Cli::Scan { scan } => {
            if scan.no_quote {
                config.intake.quote_name_targets = false;
            }
            let request = scan.request(&config)?;
            let service = ScanService::from_config(&config)?;
            let submission = service.submit(&request).await.context("Failed to start scan")?;
            print_json(&submission)
        }
        Cli::Plan { scan } => {
            if scan.no_quote {
                config.intake.quote_name_targets = false;
            }
            let request = scan.request(&config)?;
            let service = ScanService::from_config(&config)?;
            print_json(&service.plan(&request))
        }
        Cli::Classify { targets } => {
            let classified: Vec<ClassifiedTarget> =
                targets.iter().map(|t| ClassifiedTarget::classify(t)).collect();
            print_json(&classified)
        }
        Cli::Status { scan_id } => {
            let service = ScanService::from_config(&config)?;
            let report = service
                .status(&scan_id)
                .await
                .with_context(|| format!("Failed to get status of scan {}", scan_id))?;
            print_json(&report)
        }
        Cli::Stop { scan_id } => {
            let service = ScanService::from_config(&config)?;
            let result = service
                .stop(&scan_id)
                .await
                .with_context(|| format!("Failed to stop scan {}", scan_id))?;
            print_json(&result)
        }
        Cli::List => {
            let service = ScanService::from_config(&config)?;
            let listing = service.list().await.context("Failed to list scans")?;
            info!("Engine reports {} scans", listing.scan_count);
            print_json(&listing)
        }
        Cli::Export { scan_ids } => {
            let service = ScanService::from_config(&config)?;
            let export = service.export(&scan_ids).await.context("Failed to export scans")?;
            info!("Exported {} events", export.event_count);
            print_json(&export)
        }
        Cli::Catalog { target_type, use_case } => {
            let use_case = match use_case {
                Some(raw) => raw.parse::<UseCase>()?,
                None => config.intake.default_use_case,
            };
            match target_type {
                Some(raw) => print_json(&catalog_entry(raw.parse()?, use_case)),
                None => print_json(&catalog_overview()),
            }
        }
        Cli::Init { .. } => Ok(()),
    }
}

fn catalog_entry(target_type: TargetType, use_case: UseCase) -> serde_json::Value {
    let modules: Vec<&str> = catalog::modules_for(target_type)
        .unwrap_or_default()
        .iter()
        .filter(|entry| entry.serves(use_case))
        .map(|entry| entry.name)
        .collect();
    let types = catalog::types_for(target_type).unwrap_or(catalog::UNIVERSAL_TYPES);

    json!({
        "target_type": target_type,
        "use_case": use_case,
        "modules": modules,
        "types": types,
    })
}

fn catalog_overview() -> serde_json::Value {
    let presets: serde_json::Map<String, serde_json::Value> = catalog::PRESETS
        .iter()
        .map(|(name, modules)| (name.to_string(), json!(modules)))
        .collect();
    let categories: serde_json::Map<String, serde_json::Value> = catalog::MODULE_CATEGORIES
        .iter()
        .map(|(name, modules)| (name.to_string(), json!(modules)))
        .collect();

    json!({
        "target_types": TargetType::ALL,
        "use_cases": UseCase::ALL,
        "presets": presets,
        "module_categories": categories,
        "universal_type_count": catalog::UNIVERSAL_TYPES.len(),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_scan_arguments_build_request() {
        let args = parse(&["spiderwrap", "scan", "-n", "weekly", "-t", " example.com ", "-m", "sfp_whois"]);
        let Cli::Scan { scan } = args.command else {
            panic!("expected scan command");
        };

        let request = scan.request(&Config::default()).unwrap();
        assert_eq!(request.target(), "example.com");
        assert_eq!(request.use_case(), UseCase::All);
        assert_eq!(request.modules(), "sfp_whois");
    }

    #[test]
    fn test_use_case_defaults_from_config() {
        let args = parse(&["spiderwrap", "plan", "--name", "p", "--target", "John Smith"]);
        let Cli::Plan { scan } = args.command else {
            panic!("expected plan command");
        };

        let mut config = Config::default();
        config.intake.default_use_case = UseCase::Passive;
        assert_eq!(scan.request(&config).unwrap().use_case(), UseCase::Passive);
    }

    #[test]
    fn test_preset_conflicts_with_modules() {
        let result = Args::try_parse_from([
            "spiderwrap", "scan", "-n", "x", "-t", "example.com", "-m", "sfp_whois", "-p", "basic",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_preset_expands() {
        let args = parse(&["spiderwrap", "scan", "-n", "x", "-t", "example.com", "--preset", "basic"]);
        let Cli::Scan { scan } = args.command else {
            panic!("expected scan command");
        };
        assert_eq!(
            scan.request(&Config::default()).unwrap().modules(),
            "sfp_dnsresolve,sfp_whois,sfp_crt"
        );
    }

    #[test]
    fn test_export_accepts_comma_separated_ids() {
        let args = parse(&["spiderwrap", "export", "A,B", "C"]);
        let Cli::Export { scan_ids } = args.command else {
            panic!("expected export command");
        };
        assert_eq!(scan_ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_catalog_entry_falls_back_to_universal_types() {
        let entry = catalog_entry(TargetType::Unknown, UseCase::All);
        assert_eq!(entry["modules"].as_array().unwrap().len(), 0);
        assert_eq!(entry["types"].as_array().unwrap().len(), catalog::UNIVERSAL_TYPES.len());
        assert_eq!(entry["target_type"], "unknown");
    }

    #[test]
    fn test_catalog_overview_lists_presets() {
        let overview = catalog_overview();
        assert!(overview["presets"].get("basic").is_some());
        assert_eq!(overview["module_categories"].as_object().unwrap().len(), 7);
        assert!(overview["module_categories"]["dns_recon"]
            .as_array()
            .unwrap()
            .iter()
            .any(|m| m == "sfp_dnsresolve"));
        assert_eq!(overview["use_cases"].as_array().unwrap().len(), 4);
    }
}
