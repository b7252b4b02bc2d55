//! Domain types shared by the validators, schemas and API client.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::checksum::string_checksum;
use crate::validators::{ValidationError, validate_zone_id};

// ============ Zone ID ============

/// A validated 32 character hexadecimal zone identifier.
///
/// Letter case is preserved as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneId(String);

impl ZoneId {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        validate_zone_id(value)?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ZoneId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_zone_id(&value)?;
        Ok(Self(value))
    }
}

impl From<ZoneId> for String {
    fn from(id: ZoneId) -> Self {
        id.0
    }
}

impl AsRef<str> for ZoneId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============ Record Type ============

/// DNS record type tags understood by the record validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Srv,
    Loc,
    Mx,
    Ns,
    Spf,
    Caa,
    Cert,
    Dnskey,
    Ds,
    Naptr,
    Smimea,
    Sshfp,
    Tlsa,
    Uri,
    Ptr,
    Https,
    Svcb,
}

impl RecordType {
    /// Every known type, proxiable ones first.
    pub const ALL: [Self; 21] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Txt,
        Self::Srv,
        Self::Loc,
        Self::Mx,
        Self::Ns,
        Self::Spf,
        Self::Caa,
        Self::Cert,
        Self::Dnskey,
        Self::Ds,
        Self::Naptr,
        Self::Smimea,
        Self::Sshfp,
        Self::Tlsa,
        Self::Uri,
        Self::Ptr,
        Self::Https,
        Self::Svcb,
    ];

    /// Parses an upper-case type tag. Case-sensitive: `"a"` is not `A`.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Txt => "TXT",
            Self::Srv => "SRV",
            Self::Loc => "LOC",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Spf => "SPF",
            Self::Caa => "CAA",
            Self::Cert => "CERT",
            Self::Dnskey => "DNSKEY",
            Self::Ds => "DS",
            Self::Naptr => "NAPTR",
            Self::Smimea => "SMIMEA",
            Self::Sshfp => "SSHFP",
            Self::Tlsa => "TLSA",
            Self::Uri => "URI",
            Self::Ptr => "PTR",
            Self::Https => "HTTPS",
            Self::Svcb => "SVCB",
        }
    }

    /// Whether traffic for this type may be routed through the proxy.
    pub fn is_proxiable(self) -> bool {
        matches!(self, Self::A | Self::Aaaa | Self::Cname)
    }

    /// Comma separated list of all tags, for error messages.
    pub fn known_tags() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Cache Reserve ============

/// Value of the Cache Reserve zone setting as sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheReserveValue {
    On,
    Off,
}

impl CacheReserveValue {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::On } else { Self::Off }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

/// Cache Reserve setting of a zone, as last reported by the API.
///
/// `value` is kept verbatim; anything other than `"on"` counts as disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheReserveSetting {
    pub value: String,
    pub editable: bool,
    #[serde(with = "crate::utils::datetime")]
    pub modified_on: Option<DateTime<Utc>>,
}

impl CacheReserveSetting {
    pub fn is_enabled(&self) -> bool {
        self.value == CacheReserveValue::On.as_str()
    }

    /// Canonical form of `modified_on` used as checksum input.
    ///
    /// A setting that was never modified yields the empty string.
    pub fn modified_on_string(&self) -> String {
        self.modified_on
            .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true))
            .unwrap_or_default()
    }

    /// Stable identifier derived from the last-modified timestamp.
    pub fn synthetic_id(&self) -> String {
        string_checksum(&self.modified_on_string())
    }
}
