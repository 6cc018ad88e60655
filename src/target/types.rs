// src/target/types.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IntakeError;

/// Semantic kind of a free-text scan target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    IpAddress,
    Cidr,
    Domain,
    Subdomain,
    Email,
    PhoneNumber,
    Asn,
    BitcoinAddress,
    Username,
    PersonName,
    Hostname,
    Unknown,
}

impl TargetType {
    pub const ALL: [TargetType; 12] = [
        TargetType::IpAddress,
        TargetType::Cidr,
        TargetType::Domain,
        TargetType::Subdomain,
        TargetType::Email,
        TargetType::PhoneNumber,
        TargetType::Asn,
        TargetType::BitcoinAddress,
        TargetType::Username,
        TargetType::PersonName,
        TargetType::Hostname,
        TargetType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::IpAddress => "ip_address",
            TargetType::Cidr => "cidr",
            TargetType::Domain => "domain",
            TargetType::Subdomain => "subdomain",
            TargetType::Email => "email",
            TargetType::PhoneNumber => "phone_number",
            TargetType::Asn => "asn",
            TargetType::BitcoinAddress => "bitcoin_address",
            TargetType::Username => "username",
            TargetType::PersonName => "person_name",
            TargetType::Hostname => "hostname",
            TargetType::Unknown => "unknown",
        }
    }

    /// Targets the engine expects as a quoted phrase rather than a bare token
    pub fn is_quoted_phrase(&self) -> bool {
        matches!(self, TargetType::PersonName | TargetType::Username)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        TargetType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| IntakeError::UnknownTargetType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_forms_round_trip_through_from_str() {
        for target_type in TargetType::ALL {
            let parsed: TargetType = target_type.as_str().parse().unwrap();
            assert_eq!(parsed, target_type);
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Person_Name".parse::<TargetType>().unwrap(), TargetType::PersonName);
        assert!("mac_address".parse::<TargetType>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&TargetType::BitcoinAddress).unwrap();
        assert_eq!(json, "\"bitcoin_address\"");
    }

    #[test]
    fn test_only_names_and_handles_are_quoted() {
        let quoted: Vec<TargetType> = TargetType::ALL
            .iter()
            .copied()
            .filter(TargetType::is_quoted_phrase)
            .collect();
        assert_eq!(quoted, vec![TargetType::Username, TargetType::PersonName]);
    }
}
