// src/target/classifier.rs
use std::net::Ipv4Addr;
use std::str::FromStr;

use ipnetwork::Ipv4Network;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::types::TargetType;

/// A single classification rule: a full-string pattern plus an optional
/// semantic check run after the pattern matched
struct ClassifierRule {
    target_type: TargetType,
    pattern: Regex,
    check: Option<fn(&str) -> bool>,
}

impl ClassifierRule {
    fn new(target_type: TargetType, pattern: &str, check: Option<fn(&str) -> bool>) -> Self {
        // Patterns are compile-time literals; a failure here is a programming error
        let pattern = Regex::new(pattern).unwrap_or_else(|e| panic!("invalid {} pattern: {}", target_type, e));
        Self { target_type, pattern, check }
    }

    fn matches(&self, input: &str) -> bool {
        self.pattern.is_match(input) && self.check.map_or(true, |check| check(input))
    }
}

const DOMAIN_PATTERN: &str = r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.[A-Za-z]{2,63}$";

// Order is significant: the first matching rule wins.
static RULES: Lazy<Vec<ClassifierRule>> = Lazy::new(|| {
    vec![
        ClassifierRule::new(
            TargetType::IpAddress,
            r"^\d{1,3}(?:\.\d{1,3}){3}$",
            Some(|s| Ipv4Addr::from_str(s).is_ok()),
        ),
        ClassifierRule::new(
            TargetType::Cidr,
            r"^\d{1,3}(?:\.\d{1,3}){3}/\d{1,2}$",
            Some(|s| Ipv4Network::from_str(s).is_ok()),
        ),
        ClassifierRule::new(TargetType::Domain, DOMAIN_PATTERN, None),
        ClassifierRule::new(
            TargetType::Subdomain,
            r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.){2,}[A-Za-z]{2,63}$",
            None,
        ),
        ClassifierRule::new(
            TargetType::Email,
            r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$",
            None,
        ),
        ClassifierRule::new(TargetType::PhoneNumber, r"^\+?[0-9]{7,15}$", None),
        ClassifierRule::new(TargetType::Asn, r"^(?i:AS)[0-9]+$", None),
        ClassifierRule::new(
            TargetType::BitcoinAddress,
            r"^[13][a-km-zA-HJ-NP-Z1-9]{24,33}$",
            None,
        ),
        ClassifierRule::new(TargetType::Username, r"^@?[A-Za-z0-9_]{3,30}$", None),
        ClassifierRule::new(
            TargetType::PersonName,
            r"^[A-Z][a-z]+(?:-[A-Z][a-z]+)?(?:\s+[A-Z][a-z]+(?:-[A-Z][a-z]+)?)+$",
            None,
        ),
        // Same shape as Domain, so only reachable if the rules above change
        ClassifierRule::new(TargetType::Hostname, DOMAIN_PATTERN, None),
    ]
});

/// Assigns a semantic type to a free-text target by ordered pattern matching.
///
/// Classification is pure: no state is kept between calls and the rule
/// table is immutable once built, so a classifier can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetClassifier;

impl TargetClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a target string, returning `Unknown` when no rule matches
    pub fn classify(&self, raw: &str) -> TargetType {
        let input = raw.trim();

        let target_type = RULES
            .iter()
            .find(|rule| rule.matches(input))
            .map(|rule| rule.target_type)
            .unwrap_or(TargetType::Unknown);

        debug!("Classified target {:?} as {}", input, target_type);
        target_type
    }

    /// Rule order as evaluated, terminal `Unknown` excluded
    pub fn rule_order(&self) -> Vec<TargetType> {
        RULES.iter().map(|rule| rule.target_type).collect()
    }
}

/// Classify a target string with the default rule set
pub fn classify_target(raw_target: &str) -> TargetType {
    TargetClassifier::new().classify(raw_target)
}
