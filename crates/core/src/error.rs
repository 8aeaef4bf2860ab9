//! Error taxonomy for the SDK.
//!
//! Every failure surfaces as a [`UnihraError`] variant so callers can
//! branch on category (retry on `Connection`, treat `Validation` as a
//! usage bug, and so on). Server-reported FAILURE events carry a
//! numeric `error_code` that [`map_failure`] translates into a specific
//! variant.

use std::collections::HashMap;

/// All errors the SDK can produce.
#[derive(Debug, thiserror::Error)]
pub enum UnihraError {
    /// Request parameters failed local checks; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The service returned a non-2xx HTTP status.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A response body or stream event could not be decoded, or the
    /// service reported it could not parse a submitted page.
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Transport-level failure, or the status stream closed before a
    /// terminal event arrived.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The service could not fetch one of the submitted pages.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The account's analysis quota is exhausted.
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The analysis failed for a reason this SDK has no specific
    /// variant for. Carries the server-supplied message.
    #[error("Analysis failed: {0}")]
    Analysis(String),
}

/// Server error code: a submitted page could not be parsed.
pub const CODE_PARSE_FAILED: i64 = 1001;
/// Server error code: a submitted page could not be fetched.
pub const CODE_FETCH_FAILED: i64 = 1002;
/// Server error code: account analysis quota exhausted.
pub const CODE_QUOTA_EXCEEDED: i64 = 1003;

/// Error category a server `error_code` can be mapped to.
///
/// Used to extend the built-in code table at client construction when
/// the service starts reporting codes this SDK does not know yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Maps to [`UnihraError::Parsing`].
    Parsing,
    /// Maps to [`UnihraError::Fetch`].
    Fetch,
    /// Maps to [`UnihraError::QuotaExceeded`].
    QuotaExceeded,
    /// Maps to [`UnihraError::Analysis`].
    Analysis,
}

impl FailureKind {
    /// Build the concrete error for this category.
    pub fn into_error(self, message: String) -> UnihraError {
        match self {
            FailureKind::Parsing => UnihraError::Parsing(message),
            FailureKind::Fetch => UnihraError::Fetch(message),
            FailureKind::QuotaExceeded => UnihraError::QuotaExceeded(message),
            FailureKind::Analysis => UnihraError::Analysis(message),
        }
    }
}

/// Map a FAILURE event onto a specific error.
///
/// `overrides` is consulted first, then the built-in code table.
/// Unrecognized or absent codes fall back to [`UnihraError::Analysis`].
pub fn map_failure(
    error_code: Option<i64>,
    message: Option<&str>,
    overrides: &HashMap<i64, FailureKind>,
) -> UnihraError {
    let message = message.unwrap_or("Analysis failed without a message").to_string();

    if let Some(kind) = error_code.and_then(|code| overrides.get(&code)) {
        return kind.into_error(message);
    }

    match error_code {
        Some(CODE_PARSE_FAILED) => UnihraError::Parsing(message),
        Some(CODE_FETCH_FAILED) => UnihraError::Fetch(message),
        Some(CODE_QUOTA_EXCEEDED) => UnihraError::QuotaExceeded(message),
        _ => UnihraError::Analysis(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn no_overrides() -> HashMap<i64, FailureKind> {
        HashMap::new()
    }

    #[test]
    fn code_1001_maps_to_parsing() {
        let err = map_failure(Some(1001), Some("Failed to parse"), &no_overrides());
        assert_matches!(err, UnihraError::Parsing(msg) if msg == "Failed to parse");
    }

    #[test]
    fn code_1002_maps_to_fetch() {
        let err = map_failure(Some(1002), Some("Timeout fetching page"), &no_overrides());
        assert_matches!(err, UnihraError::Fetch(_));
    }

    #[test]
    fn code_1003_maps_to_quota() {
        let err = map_failure(Some(1003), Some("Monthly limit reached"), &no_overrides());
        assert_matches!(err, UnihraError::QuotaExceeded(_));
    }

    #[test]
    fn unknown_code_falls_back_to_analysis() {
        let err = map_failure(Some(9999), Some("boom"), &no_overrides());
        assert_matches!(err, UnihraError::Analysis(msg) if msg == "boom");
    }

    #[test]
    fn absent_code_falls_back_to_analysis() {
        let err = map_failure(None, Some("boom"), &no_overrides());
        assert_matches!(err, UnihraError::Analysis(_));
    }

    #[test]
    fn absent_message_gets_placeholder() {
        let err = map_failure(Some(1001), None, &no_overrides());
        assert_matches!(err, UnihraError::Parsing(msg) if msg.contains("without a message"));
    }

    #[test]
    fn override_wins_over_builtin_table() {
        let mut overrides = HashMap::new();
        overrides.insert(1001, FailureKind::Analysis);
        let err = map_failure(Some(1001), Some("reclassified"), &overrides);
        assert_matches!(err, UnihraError::Analysis(_));
    }

    #[test]
    fn override_adds_new_code() {
        let mut overrides = HashMap::new();
        overrides.insert(2001, FailureKind::QuotaExceeded);
        let err = map_failure(Some(2001), Some("limit"), &overrides);
        assert_matches!(err, UnihraError::QuotaExceeded(_));
    }

    #[test]
    fn error_display_includes_status_and_body() {
        let err = UnihraError::Api {
            status: 401,
            body: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API error (401): Unauthorized");
    }
}
