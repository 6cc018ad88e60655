// src/catalog.rs
//! Static lookup tables consulted when shaping a scan request.
//!
//! Everything here is compiled into the binary as constant data: the
//! module table and type table keyed by [`TargetType`], the recognized use
//! cases, the universal type list and the named module presets. None of it
//! is mutable at runtime.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::target::TargetType;

/// Coarse scan intent, mirroring the engine's own use-case groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseCase {
    All,
    Footprint,
    Investigate,
    Passive,
}

impl UseCase {
    pub const ALL: [UseCase; 4] = [
        UseCase::All,
        UseCase::Footprint,
        UseCase::Investigate,
        UseCase::Passive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UseCase::All => "all",
            UseCase::Footprint => "footprint",
            UseCase::Investigate => "investigate",
            UseCase::Passive => "passive",
        }
    }
}

impl Default for UseCase {
    fn default() -> Self {
        UseCase::All
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UseCase {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        UseCase::ALL
            .iter()
            .copied()
            .find(|u| u.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownUseCase(s.to_string()))
    }
}

/// An engine module and the use cases it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleEntry {
    pub name: &'static str,
    pub use_cases: &'static [UseCase],
}

impl ModuleEntry {
    const fn new(name: &'static str, use_cases: &'static [UseCase]) -> Self {
        Self { name, use_cases }
    }

    /// Whether this module runs under the given use case; `All` admits everything
    pub fn serves(&self, use_case: UseCase) -> bool {
        use_case == UseCase::All || self.use_cases.contains(&use_case)
    }
}

use UseCase::{Footprint as F, Investigate as I, Passive as P};

const FIP: &[UseCase] = &[F, I, P];
const FI: &[UseCase] = &[F, I];
const FP: &[UseCase] = &[F, P];
const IP: &[UseCase] = &[I, P];
const FOOTPRINT: &[UseCase] = &[F];

const IP_ADDRESS_MODULES: &[ModuleEntry] = &[
    ModuleEntry::new("sfp_dnsresolve", FIP),
    ModuleEntry::new("sfp_ipinfo", FIP),
    ModuleEntry::new("sfp_bgpview", FIP),
    ModuleEntry::new("sfp_arin", FIP),
    ModuleEntry::new("sfp_robtex", FIP),
    ModuleEntry::new("sfp_shodan", FIP),
    ModuleEntry::new("sfp_abuseipdb", IP),
    ModuleEntry::new("sfp_alienvault", IP),
    ModuleEntry::new("sfp_greynoise", IP),
    ModuleEntry::new("sfp_virustotal", IP),
    ModuleEntry::new("sfp_portscan_tcp", FI),
    ModuleEntry::new("sfp_sslcert", FI),
];

const CIDR_MODULES: &[ModuleEntry] = &[
    ModuleEntry::new("sfp_bgpview", FIP),
    ModuleEntry::new("sfp_arin", FIP),
    ModuleEntry::new("sfp_robtex", FIP),
    ModuleEntry::new("sfp_shodan", FIP),
    ModuleEntry::new("sfp_abuseipdb", IP),
    ModuleEntry::new("sfp_portscan_tcp", FI),
];

const DOMAIN_MODULES: &[ModuleEntry] = &[
    ModuleEntry::new("sfp_dnsresolve", FIP),
    ModuleEntry::new("sfp_whois", FIP),
    ModuleEntry::new("sfp_crt", FIP),
    ModuleEntry::new("sfp_hackertarget", FIP),
    ModuleEntry::new("sfp_securitytrails", FIP),
    ModuleEntry::new("sfp_dnsdumpster", FP),
    ModuleEntry::new("sfp_archiveorg", FP),
    ModuleEntry::new("sfp_emailformat", FP),
    ModuleEntry::new("sfp_pgp", FP),
    ModuleEntry::new("sfp_virustotal", IP),
    ModuleEntry::new("sfp_alienvault", IP),
    ModuleEntry::new("sfp_dnscommonsrv", FI),
    ModuleEntry::new("sfp_sslcert", FI),
    ModuleEntry::new("sfp_dnsbrute", FOOTPRINT),
    ModuleEntry::new("sfp_spider", FOOTPRINT),
];

const SUBDOMAIN_MODULES: &[ModuleEntry] = &[
    ModuleEntry::new("sfp_dnsresolve", FIP),
    ModuleEntry::new("sfp_crt", FIP),
    ModuleEntry::new("sfp_hackertarget", FIP),
    ModuleEntry::new("sfp_virustotal", IP),
    ModuleEntry::new("sfp_sslcert", FI),
    ModuleEntry::new("sfp_spider", FOOTPRINT),
];

const EMAIL_MODULES: &[ModuleEntry] = &[
    ModuleEntry::new("sfp_emailrep", FIP),
    ModuleEntry::new("sfp_haveibeenpwned", FIP),
    ModuleEntry::new("sfp_email", FIP),
    ModuleEntry::new("sfp_hunter", FP),
    ModuleEntry::new("sfp_skymem", FP),
    ModuleEntry::new("sfp_pgp", FP),
    ModuleEntry::new("sfp_accounts", FP),
];

const PHONE_NUMBER_MODULES: &[ModuleEntry] = &[
    ModuleEntry::new("sfp_phone", FIP),
    ModuleEntry::new("sfp_numverify", FIP),
];

const ASN_MODULES: &[ModuleEntry] = &[
    ModuleEntry::new("sfp_bgpview", FIP),
    ModuleEntry::new("sfp_arin", FIP),
    ModuleEntry::new("sfp_robtex", FIP),
];

const BITCOIN_ADDRESS_MODULES: &[ModuleEntry] = &[
    ModuleEntry::new("sfp_bitcoin", FIP),
    ModuleEntry::new("sfp_blockchain", FIP),
    ModuleEntry::new("sfp_bitcoinabuse", IP),
];

const USERNAME_MODULES: &[ModuleEntry] = &[
    ModuleEntry::new("sfp_accounts", FIP),
    ModuleEntry::new("sfp_github", FP),
    ModuleEntry::new("sfp_twitter", FP),
    ModuleEntry::new("sfp_social", FP),
];

const PERSON_NAME_MODULES: &[ModuleEntry] = &[
    ModuleEntry::new("sfp_accounts", FIP),
    ModuleEntry::new("sfp_names", FP),
    ModuleEntry::new("sfp_social", FP),
    ModuleEntry::new("sfp_googlesearch", FP),
    ModuleEntry::new("sfp_bingsearch", FP),
];

/// Module table: the default module set for each target type.
///
/// `Hostname` and `Unknown` have no entry; requests for them are shaped
/// from the type table or the universal type list instead.
pub fn modules_for(target_type: TargetType) -> Option<&'static [ModuleEntry]> {
    match target_type {
        TargetType::IpAddress => Some(IP_ADDRESS_MODULES),
        TargetType::Cidr => Some(CIDR_MODULES),
        TargetType::Domain => Some(DOMAIN_MODULES),
        TargetType::Subdomain => Some(SUBDOMAIN_MODULES),
        TargetType::Email => Some(EMAIL_MODULES),
        TargetType::PhoneNumber => Some(PHONE_NUMBER_MODULES),
        TargetType::Asn => Some(ASN_MODULES),
        TargetType::BitcoinAddress => Some(BITCOIN_ADDRESS_MODULES),
        TargetType::Username => Some(USERNAME_MODULES),
        TargetType::PersonName => Some(PERSON_NAME_MODULES),
        TargetType::Hostname | TargetType::Unknown => None,
    }
}

const IP_ADDRESS_TYPES: &[&str] = &[
    "type_IP_ADDRESS",
    "type_INTERNET_NAME",
    "type_NETBLOCK_OWNER",
    "type_BGP_AS_OWNER",
    "type_GEOINFO",
    "type_TCP_PORT_OPEN",
    "type_MALICIOUS_IPADDR",
    "type_BLACKLISTED_IPADDR",
];

const CIDR_TYPES: &[&str] = &[
    "type_NETBLOCK_OWNER",
    "type_NETBLOCK_MEMBER",
    "type_IP_ADDRESS",
    "type_BGP_AS_OWNER",
    "type_MALICIOUS_NETBLOCK",
    "type_BLACKLISTED_NETBLOCK",
];

const DOMAIN_TYPES: &[&str] = &[
    "type_DOMAIN_NAME",
    "type_DOMAIN_WHOIS",
    "type_DOMAIN_REGISTRAR",
    "type_INTERNET_NAME",
    "type_IP_ADDRESS",
    "type_DNS_TEXT",
    "type_DNS_SPF",
    "type_EMAILADDR",
    "type_SSL_CERTIFICATE_ISSUED",
    "type_SIMILARDOMAIN",
];

const SUBDOMAIN_TYPES: &[&str] = &[
    "type_INTERNET_NAME",
    "type_INTERNET_NAME_UNRESOLVED",
    "type_IP_ADDRESS",
    "type_IPV6_ADDRESS",
    "type_SSL_CERTIFICATE_ISSUED",
    "type_WEBSERVER_BANNER",
];

const EMAIL_TYPES: &[&str] = &[
    "type_EMAILADDR",
    "type_EMAILADDR_COMPROMISED",
    "type_EMAILADDR_DELIVERABLE",
    "type_ACCOUNT_EXTERNAL_OWNED",
    "type_PGP_KEY",
    "type_HUMAN_NAME",
];

const PHONE_NUMBER_TYPES: &[&str] = &[
    "type_PHONE_NUMBER",
    "type_PHONE_NUMBER_TYPE",
    "type_PHONE_NUMBER_COMPROMISED",
    "type_PROVIDER_TELCO",
    "type_GEOINFO",
];

const ASN_TYPES: &[&str] = &[
    "type_BGP_AS_OWNER",
    "type_BGP_AS_MEMBER",
    "type_NETBLOCK_OWNER",
    "type_MALICIOUS_ASN",
];

const BITCOIN_ADDRESS_TYPES: &[&str] = &[
    "type_BITCOIN_ADDRESS",
    "type_BITCOIN_BALANCE",
    "type_MALICIOUS_BITCOIN_ADDRESS",
];

const USERNAME_TYPES: &[&str] = &[
    "type_USERNAME",
    "type_ACCOUNT_EXTERNAL_OWNED",
    "type_SIMILAR_ACCOUNT_EXTERNAL",
    "type_SOCIAL_MEDIA",
    "type_PUBLIC_CODE_REPO",
];

const PERSON_NAME_TYPES: &[&str] = &[
    "type_HUMAN_NAME",
    "type_ACCOUNT_EXTERNAL_OWNED",
    "type_SOCIAL_MEDIA",
    "type_EMAILADDR",
    "type_JOB_TITLE",
];

const HOSTNAME_TYPES: &[&str] = &[
    "type_INTERNET_NAME",
    "type_IP_ADDRESS",
    "type_IPV6_ADDRESS",
    "type_DNS_TEXT",
    "type_RAW_DNS_RECORDS",
    "type_TCP_PORT_OPEN",
    "type_WEBSERVER_BANNER",
    "type_SSL_CERTIFICATE_ISSUED",
];

/// Type table: data-type tags relevant to each target type
pub fn types_for(target_type: TargetType) -> Option<&'static [&'static str]> {
    match target_type {
        TargetType::IpAddress => Some(IP_ADDRESS_TYPES),
        TargetType::Cidr => Some(CIDR_TYPES),
        TargetType::Domain => Some(DOMAIN_TYPES),
        TargetType::Subdomain => Some(SUBDOMAIN_TYPES),
        TargetType::Email => Some(EMAIL_TYPES),
        TargetType::PhoneNumber => Some(PHONE_NUMBER_TYPES),
        TargetType::Asn => Some(ASN_TYPES),
        TargetType::BitcoinAddress => Some(BITCOIN_ADDRESS_TYPES),
        TargetType::Username => Some(USERNAME_TYPES),
        TargetType::PersonName => Some(PERSON_NAME_TYPES),
        TargetType::Hostname => Some(HOSTNAME_TYPES),
        TargetType::Unknown => None,
    }
}

/// Named module presets, expanded into an explicit module list on request
pub const PRESETS: &[(&str, &[&str])] = &[
    ("basic", &["sfp_dnsresolve", "sfp_whois", "sfp_crt"]),
    (
        "comprehensive",
        &[
            "sfp_dnsresolve",
            "sfp_whois",
            "sfp_crt",
            "sfp_portscan_tcp",
            "sfp_spider",
            "sfp_sslcert",
        ],
    ),
    (
        "passive_only",
        &[
            "sfp_dnsresolve",
            "sfp_whois",
            "sfp_crt",
            "sfp_archiveorg",
            "sfp_googlesearch",
        ],
    ),
    (
        "threat_intel",
        &[
            "sfp_virustotal",
            "sfp_shodan",
            "sfp_alienvault",
            "sfp_abuseipdb",
            "sfp_dnsresolve",
        ],
    ),
];

pub fn module_preset(name: &str) -> Option<&'static [&'static str]> {
    let name = name.trim().to_lowercase();
    PRESETS
        .iter()
        .find(|(preset, _)| *preset == name)
        .map(|(_, modules)| *modules)
}

/// Modules grouped by reconnaissance category
pub const MODULE_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "dns_recon",
        &["sfp_dnsresolve", "sfp_dnsbrute", "sfp_dnsraw", "sfp_crt"],
    ),
    ("whois_info", &["sfp_whois", "sfp_arin", "sfp_bgpview"]),
    (
        "port_scanning",
        &["sfp_portscan_tcp", "sfp_sslcert", "sfp_shodan"],
    ),
    (
        "web_recon",
        &["sfp_spider", "sfp_webanalytics", "sfp_sslcert", "sfp_webserver"],
    ),
    (
        "threat_intel",
        &["sfp_virustotal", "sfp_shodan", "sfp_alienvault", "sfp_abuseipdb"],
    ),
    (
        "social_osint",
        &["sfp_social", "sfp_accounts", "sfp_emailformat", "sfp_phone"],
    ),
    (
        "passive_recon",
        &["sfp_crt", "sfp_archiveorg", "sfp_googlesearch", "sfp_bingsearch"],
    ),
];

/// Categories a module belongs to, in table order
pub fn module_categories(module: &str) -> Vec<&'static str> {
    MODULE_CATEGORIES
        .iter()
        .filter(|(_, modules)| modules.contains(&module))
        .map(|(category, _)| *category)
        .collect()
}

/// Every data-type tag the engine knows about; used when nothing narrower applies
pub const UNIVERSAL_TYPES: &[&str] = &[
    "type_ACCOUNT_EXTERNAL_OWNED",
    "type_AFFILIATE_COMPANY_NAME",
    "type_AFFILIATE_DOMAIN_NAME",
    "type_AFFILIATE_DOMAIN_UNREGISTERED",
    "type_AFFILIATE_DOMAIN_WHOIS",
    "type_AFFILIATE_EMAILADDR",
    "type_AFFILIATE_IPADDR",
    "type_AFFILIATE_IPV6_ADDRESS",
    "type_AFFILIATE_INTERNET_NAME",
    "type_AFFILIATE_INTERNET_NAME_UNRESOLVED",
    "type_AFFILIATE_INTERNET_NAME_HIJACKABLE",
    "type_AFFILIATE_WEB_CONTENT",
    "type_AFFILIATE_DESCRIPTION_ABSTRACT",
    "type_AFFILIATE_DESCRIPTION_CATEGORY",
    "type_APPSTORE_ENTRY",
    "type_BGP_AS_MEMBER",
    "type_BGP_AS_OWNER",
    "type_BASE64_DATA",
    "type_BITCOIN_ADDRESS",
    "type_BITCOIN_BALANCE",
    "type_BLACKLISTED_AFFILIATE_IPADDR",
    "type_BLACKLISTED_AFFILIATE_INTERNET_NAME",
    "type_BLACKLISTED_COHOST",
    "type_BLACKLISTED_IPADDR",
    "type_BLACKLISTED_NETBLOCK",
    "type_BLACKLISTED_SUBNET",
    "type_BLACKLISTED_INTERNET_NAME",
    "type_CLOUD_STORAGE_BUCKET",
    "type_CLOUD_STORAGE_BUCKET_OPEN",
    "type_CO_HOSTED_SITE",
    "type_CO_HOSTED_SITE_DOMAIN",
    "type_CO_HOSTED_SITE_DOMAIN_WHOIS",
    "type_COMPANY_NAME",
    "type_PASSWORD_COMPROMISED",
    "type_HASH_COMPROMISED",
    "type_TARGET_WEB_COOKIE",
    "type_COUNTRY_NAME",
    "type_CREDIT_CARD_NUMBER",
    "type_DNS_SPF",
    "type_DNS_SRV",
    "type_DNS_TEXT",
    "type_DARKNET_MENTION_URL",
    "type_DARKNET_MENTION_CONTENT",
    "type_DATE_HUMAN_DOB",
    "type_DEFACED_INTERNET_NAME",
    "type_DEFACED_AFFILIATE_INTERNET_NAME",
    "type_DEFACED_AFFILIATE_IPADDR",
    "type_DEFACED_COHOST",
    "type_DEFACED_IPADDR",
    "type_EMAILADDR_DELIVERABLE",
    "type_DESCRIPTION_ABSTRACT",
    "type_DESCRIPTION_CATEGORY",
    "type_DEVICE_TYPE",
    "type_EMAILADDR_DISPOSABLE",
    "type_DOMAIN_NAME",
    "type_DOMAIN_NAME_PARENT",
    "type_DOMAIN_REGISTRAR",
    "type_DOMAIN_WHOIS",
    "type_EMAILADDR",
    "type_EMAILADDR_GENERIC",
    "type_PROVIDER_MAIL",
    "type_ERROR_MESSAGE",
    "type_ETHEREUM_ADDRESS",
    "type_ETHEREUM_BALANCE",
    "type_PROVIDER_JAVASCRIPT",
    "type_WEBSERVER_HTTPHEADERS",
    "type_HTTP_CODE",
    "type_ACCOUNT_EXTERNAL_OWNED_COMPROMISED",
    "type_EMAILADDR_COMPROMISED",
    "type_ACCOUNT_EXTERNAL_USER_SHARED_COMPROMISED",
    "type_HASH",
    "type_INTERESTING_FILE_HISTORIC",
    "type_URL_PASSWORD_HISTORIC",
    "type_URL_UPLOAD_HISTORIC",
    "type_URL_FORM_HISTORIC",
    "type_URL_STATIC_HISTORIC",
    "type_URL_FLASH_HISTORIC",
    "type_URL_JAVA_APPLET_HISTORIC",
    "type_URL_JAVASCRIPT_HISTORIC",
    "type_URL_WEB_FRAMEWORK_HISTORIC",
    "type_PROVIDER_HOSTING",
    "type_HUMAN_NAME",
    "type_IBAN_NUMBER",
    "type_IP_ADDRESS",
    "type_INTERNAL_IP_ADDRESS",
    "type_IPV6_ADDRESS",
    "type_INTERESTING_FILE",
    "type_ROOT",
    "type_INTERNET_NAME",
    "type_INTERNET_NAME_UNRESOLVED",
    "type_JOB_TITLE",
    "type_JUNK_FILE",
    "type_LEAKSITE_CONTENT",
    "type_LEAKSITE_URL",
    "type_LEI",
    "type_LINKED_URL_EXTERNAL",
    "type_LINKED_URL_INTERNAL",
    "type_MALICIOUS_ASN",
    "type_MALICIOUS_AFFILIATE_INTERNET_NAME",
    "type_MALICIOUS_AFFILIATE_IPADDR",
    "type_MALICIOUS_BITCOIN_ADDRESS",
    "type_MALICIOUS_COHOST",
    "type_MALICIOUS_EMAILADDR",
    "type_MALICIOUS_IPADDR",
    "type_MALICIOUS_NETBLOCK",
    "type_MALICIOUS_SUBNET",
    "type_MALICIOUS_INTERNET_NAME",
    "type_MALICIOUS_PHONE_NUMBER",
    "type_PROVIDER_DNS",
    "type_NETBLOCKV6_MEMBER",
    "type_NETBLOCKV6_OWNER",
    "type_NETBLOCK_MEMBER",
    "type_NETBLOCK_OWNER",
    "type_NETBLOCK_WHOIS",
    "type_WEBSERVER_STRANGEHEADER",
    "type_TCP_PORT_OPEN",
    "type_TCP_PORT_OPEN_BANNER",
    "type_UDP_PORT_OPEN",
    "type_UDP_PORT_OPEN_INFO",
    "type_OPERATING_SYSTEM",
    "type_PGP_KEY",
    "type_PHONE_NUMBER",
    "type_PHONE_NUMBER_COMPROMISED",
    "type_PHONE_NUMBER_TYPE",
    "type_PHYSICAL_ADDRESS",
    "type_PHYSICAL_COORDINATES",
    "type_GEOINFO",
    "type_PROXY_HOST",
    "type_PUBLIC_CODE_REPO",
    "type_RAW_DNS_RECORDS",
    "type_RAW_RIR_DATA",
    "type_RAW_FILE_META_DATA",
    "type_SSL_CERTIFICATE_ISSUER",
    "type_SSL_CERTIFICATE_ISSUED",
    "type_SSL_CERTIFICATE_RAW",
    "type_SSL_CERTIFICATE_EXPIRED",
    "type_SSL_CERTIFICATE_EXPIRING",
    "type_SSL_CERTIFICATE_MISMATCH",
    "type_SEARCH_ENGINE_WEB_CONTENT",
    "type_SIMILAR_ACCOUNT_EXTERNAL",
    "type_SIMILARDOMAIN",
    "type_SIMILARDOMAIN_WHOIS",
    "type_SOCIAL_MEDIA",
    "type_SOFTWARE_USED",
    "type_TOR_EXIT_NODE",
    "type_PROVIDER_TELCO",
    "type_URL_PASSWORD",
    "type_URL_UPLOAD",
    "type_URL_ADBLOCKED_EXTERNAL",
    "type_URL_ADBLOCKED_INTERNAL",
    "type_URL_FORM",
    "type_URL_STATIC",
    "type_URL_FLASH",
    "type_URL_JAVA_APPLET",
    "type_URL_JAVASCRIPT",
    "type_URL_WEB_FRAMEWORK",
    "type_EMAILADDR_UNDELIVERABLE",
    "type_USERNAME",
    "type_VPN_HOST",
    "type_VULNERABILITY_CVE_CRITICAL",
    "type_VULNERABILITY_CVE_HIGH",
    "type_VULNERABILITY_CVE_LOW",
    "type_VULNERABILITY_CVE_MEDIUM",
    "type_VULNERABILITY_GENERAL",
    "type_VULNERABILITY_DISCLOSURE",
    "type_WEB_ANALYTICS_ID",
    "type_TARGET_WEB_CONTENT",
    "type_TARGET_WEB_CONTENT_TYPE",
    "type_WEBSERVER_BANNER",
    "type_WEBSERVER_TECHNOLOGY",
    "type_WIFI_ACCESS_POINT",
    "type_WIKIPEDIA_PAGE_EDIT",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique<'a>(label: &str, items: impl IntoIterator<Item = &'a str>) {
        let mut seen = HashSet::new();
        for item in items {
            assert!(seen.insert(item), "{} lists {} twice", label, item);
        }
    }

    #[test]
    fn test_use_case_parsing_normalizes_case() {
        assert_eq!("FootPrint".parse::<UseCase>().unwrap(), UseCase::Footprint);
        assert_eq!(" passive ".parse::<UseCase>().unwrap(), UseCase::Passive);
        assert_eq!(
            "recon".parse::<UseCase>(),
            Err(ValidationError::UnknownUseCase("recon".to_string()))
        );
    }

    #[test]
    fn test_tables_have_no_duplicates() {
        for target_type in TargetType::ALL {
            if let Some(modules) = modules_for(target_type) {
                assert_unique(target_type.as_str(), modules.iter().map(|m| m.name));
            }
            if let Some(types) = types_for(target_type) {
                assert_unique(target_type.as_str(), types.iter().copied());
            }
        }
        assert_unique("universal", UNIVERSAL_TYPES.iter().copied());
        for (name, modules) in PRESETS {
            assert_unique(name, modules.iter().copied());
        }
    }

    #[test]
    fn test_type_table_is_a_subset_of_universal_list() {
        let universal: HashSet<&str> = UNIVERSAL_TYPES.iter().copied().collect();
        for target_type in TargetType::ALL {
            for tag in types_for(target_type).unwrap_or(&[]) {
                assert!(universal.contains(tag), "{} is not a known type tag", tag);
            }
        }
    }

    #[test]
    fn test_unknown_has_no_table_entries() {
        assert!(modules_for(TargetType::Unknown).is_none());
        assert!(types_for(TargetType::Unknown).is_none());
        assert!(modules_for(TargetType::Hostname).is_none());
        assert!(types_for(TargetType::Hostname).is_some());
    }

    #[test]
    fn test_every_module_entry_has_a_use_case() {
        for target_type in TargetType::ALL {
            for module in modules_for(target_type).unwrap_or(&[]) {
                assert!(!module.use_cases.is_empty(), "{} has no use case", module.name);
                assert!(module.serves(UseCase::All));
            }
        }
    }

    #[test]
    fn test_module_categories() {
        assert_eq!(MODULE_CATEGORIES.len(), 7);
        assert_eq!(module_categories("sfp_whois"), vec!["whois_info"]);
        assert_eq!(module_categories("sfp_shodan"), vec!["port_scanning", "threat_intel"]);
        assert!(module_categories("sfp_nonexistent").is_empty());

        // Every preset module is filed under at least one category
        for (name, modules) in PRESETS {
            for module in modules.iter() {
                assert!(!module_categories(module).is_empty(), "{} from {} has no category", module, name);
            }
        }
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(module_preset("Basic"), Some(&["sfp_dnsresolve", "sfp_whois", "sfp_crt"][..]));
        assert!(module_preset("everything").is_none());
    }

    #[test]
    fn test_universal_list_is_complete() {
        assert_eq!(UNIVERSAL_TYPES.len(), 172);
        assert!(UNIVERSAL_TYPES.iter().all(|t| t.starts_with("type_")));
    }
}
