//! Utility modules.

/// Deterministic string checksums for synthetic identifiers.
pub mod checksum;

/// Date/time serialization helpers for API payloads.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
