//! Input validators for zone identifiers and DNS records.
//!
//! All functions are pure and return a [`ValidationError`] that carries the
//! offending value so callers can build a user-facing diagnostic from it.

use std::net::{Ipv4Addr, Ipv6Addr};

use thiserror::Error;

use crate::types::RecordType;

/// Zone ID 固定长度（32 位十六进制）
pub const ZONE_ID_LEN: usize = 32;

/// Schema key of the zone identifier attribute.
pub const ZONE_ID_KEY: &str = "zone_id";

/// A configuration value failed syntactic validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The value does not have the expected shape (zone identifiers).
    #[error("invalid {field} {value:?}: must be a 32 character hexadecimal string")]
    InvalidFormat {
        /// Attribute the value was read from.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Unknown record type, or a type that cannot be proxied.
    #[error("invalid record type {record_type:?}: {reason}")]
    InvalidRecordType {
        /// The rejected type tag.
        record_type: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Record content does not match the format required by its type.
    #[error("invalid content {content:?} for {record_type} record: {reason}")]
    InvalidContent {
        /// Record type the content was checked against.
        record_type: String,
        /// The rejected content.
        content: String,
        /// Which rule was violated.
        reason: &'static str,
    },
}

/// Checks that `value` is a 32 character hexadecimal zone identifier.
///
/// Letter case is irrelevant: lower, upper and mixed case are all accepted.
pub fn validate_zone_id(value: &str) -> Result<(), ValidationError> {
    if value.len() == ZONE_ID_LEN && value.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field: ZONE_ID_KEY,
            value: value.to_string(),
        })
    }
}

/// Checks a record type tag against the proxy flag.
///
/// Matching is case-sensitive. `A`, `AAAA` and `CNAME` are valid with either
/// flag; every other known type is only valid when `proxied` is `false`.
pub fn validate_record_type(record_type: &str, proxied: bool) -> Result<(), ValidationError> {
    let Some(parsed) = RecordType::parse(record_type) else {
        return Err(ValidationError::InvalidRecordType {
            record_type: record_type.to_string(),
            reason: format!("must be one of: {}", RecordType::known_tags()),
        });
    };

    if proxied && !parsed.is_proxiable() {
        return Err(ValidationError::InvalidRecordType {
            record_type: record_type.to_string(),
            reason: "this record type cannot be proxied".to_string(),
        });
    }

    Ok(())
}

/// Checks record content against the rules of its type.
///
/// Types without content rules accept any value.
pub fn validate_record_content(record_type: &str, content: &str) -> Result<(), ValidationError> {
    let invalid = |reason: &'static str| ValidationError::InvalidContent {
        record_type: record_type.to_string(),
        content: content.to_string(),
        reason,
    };

    match RecordType::parse(record_type) {
        Some(RecordType::A) => content
            .parse::<Ipv4Addr>()
            .map(|_| ())
            .map_err(|_| invalid("must be a valid IPv4 address")),
        Some(RecordType::Aaaa) => content
            .parse::<Ipv6Addr>()
            .map(|_| ())
            .map_err(|_| invalid("must be a valid IPv6 address")),
        Some(RecordType::Txt) => {
            if content.is_empty() {
                Err(invalid("must not be empty"))
            } else if content.chars().any(char::is_control) {
                Err(invalid("must not contain newlines or other control characters"))
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- zone id ----

    #[test]
    fn zone_id_rejects_empty() {
        assert!(validate_zone_id("").is_err());
    }

    #[test]
    fn zone_id_rejects_text() {
        assert!(validate_zone_id("this is a test").is_err());
    }

    #[test]
    fn zone_id_accepts_lower_case() {
        assert!(validate_zone_id("0da42c8d2132a9ddaf714f9e7c920711").is_ok());
    }

    #[test]
    fn zone_id_accepts_upper_case() {
        assert!(validate_zone_id("0DA42C8D2132A9DDAF714F9E7C920711").is_ok());
    }

    #[test]
    fn zone_id_accepts_mixed_case() {
        assert!(validate_zone_id("0DA42C8D2132A9DDaf714f9e7c920711").is_ok());
    }

    #[test]
    fn zone_id_rejects_wrong_length() {
        assert!(validate_zone_id("0da42c8d2132a9ddaf714f9e7c92071").is_err());
        assert!(validate_zone_id("0da42c8d2132a9ddaf714f9e7c9207111").is_err());
    }

    #[test]
    fn zone_id_rejects_non_hex() {
        assert!(validate_zone_id("0da42c8d2132a9ddaf714f9e7c92071g").is_err());
        assert!(validate_zone_id("0da42c8d-132a9ddaf714f9e7c920711").is_err());
    }

    #[test]
    fn zone_id_rejects_multibyte_of_matching_byte_length() {
        // 30 ASCII hex digits + one 2-byte char = 32 bytes
        assert!(validate_zone_id("0da42c8d2132a9ddaf714f9e7c9207é").is_err());
    }

    #[test]
    fn zone_id_error_carries_value() {
        let err = validate_zone_id("nope").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFormat {
                field: "zone_id",
                value: "nope".to_string(),
            }
        );
        assert!(err.to_string().contains("\"nope\""));
    }

    // ---- record type ----

    #[test]
    fn record_type_valid_combinations() {
        let valid = [
            ("A", true),
            ("A", false),
            ("AAAA", true),
            ("CNAME", true),
            ("TXT", false),
            ("SRV", false),
            ("LOC", false),
            ("MX", false),
            ("NS", false),
            ("SPF", false),
        ];
        for (t, proxied) in valid {
            assert!(
                validate_record_type(t, proxied).is_ok(),
                "{t} (proxied={proxied}) should be valid"
            );
        }
    }

    #[test]
    fn record_type_invalid_combinations() {
        let invalid = [
            ("a", false),
            ("cName", false),
            ("txt", false),
            ("SRv", false),
            ("foo", false),
            ("bar", false),
            ("TXT", true),
            ("SRV", true),
            ("SPF", true),
        ];
        for (t, proxied) in invalid {
            assert!(
                validate_record_type(t, proxied).is_err(),
                "{t} (proxied={proxied}) should be invalid"
            );
        }
    }

    #[test]
    fn record_type_proxied_error_message() {
        let err = validate_record_type("MX", true).unwrap_err();
        assert!(err.to_string().contains("cannot be proxied"));
    }

    #[test]
    fn record_type_unknown_lists_known_tags() {
        let err = validate_record_type("foo", false).unwrap_err();
        assert!(err.to_string().contains("A, AAAA, CNAME"));
    }

    // ---- record content ----

    #[test]
    fn content_valid() {
        assert!(validate_record_content("A", "192.168.0.1").is_ok());
        assert!(validate_record_content("AAAA", "2001:0db8:0000:0000:0000:0000:0000:0000").is_ok());
        assert!(validate_record_content("TXT", " ").is_ok());
    }

    #[test]
    fn content_invalid() {
        assert!(validate_record_content("A", "terraform.io").is_err());
        assert!(validate_record_content("AAAA", "192.168.0.1").is_err());
        assert!(validate_record_content("TXT", "\n").is_err());
    }

    #[test]
    fn content_ipv6_rejected_for_a() {
        assert!(validate_record_content("A", "2001:db8::1").is_err());
    }

    #[test]
    fn content_txt_rejects_empty_and_embedded_newline() {
        assert!(validate_record_content("TXT", "").is_err());
        assert!(validate_record_content("TXT", "v=spf1\n-all").is_err());
        assert!(validate_record_content("TXT", "v=spf1 -all").is_ok());
    }

    #[test]
    fn content_unchecked_types_pass() {
        assert!(validate_record_content("CNAME", "example.com").is_ok());
        assert!(validate_record_content("MX", "mail.example.com").is_ok());
    }

    #[test]
    fn content_error_names_type_and_content() {
        let err = validate_record_content("A", "terraform.io").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("A record"));
        assert!(msg.contains("terraform.io"));
    }
}
