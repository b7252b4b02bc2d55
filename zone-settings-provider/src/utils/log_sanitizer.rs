//! Log sanitization utilities
//!
//! Keeps API tokens and oversized response bodies out of debug/error logs.

/// Byte budget for a logged response body.
const BODY_LOG_LIMIT: usize = 256;

/// Leading characters of a secret left visible by [`mask_secret`].
const MASK_VISIBLE_PREFIX: usize = 4;

/// Shortens a response body for logging.
///
/// Bodies over the budget are cut at the last character boundary that fits,
/// followed by a marker carrying the full byte length.
pub fn truncate_for_log(body: &str) -> String {
    if body.len() <= BODY_LOG_LIMIT {
        return body.to_string();
    }

    let cut = body
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|end| *end <= BODY_LOG_LIMIT)
        .last()
        .unwrap_or(0);

    format!("{}... [truncated, total {} bytes]", &body[..cut], body.len())
}

/// Masks an API token for display. Short tokens are hidden entirely.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    if secret.chars().count() <= MASK_VISIBLE_PREFIX * 2 {
        return "****".to_string();
    }
    let prefix: String = secret.chars().take(MASK_VISIBLE_PREFIX).collect();
    format!("{prefix}****")
}
