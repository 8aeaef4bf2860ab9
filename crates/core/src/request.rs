//! Analysis request parameters and local validation.
//!
//! Validation runs entirely client-side, before any network call, so a
//! malformed request never reaches the service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::UnihraError;

/// Language codes the service accepts by default.
///
/// The live set can grow server-side; clients may extend it via their
/// configuration without a new SDK release.
pub const DEFAULT_ALLOWED_LANGS: &[&str] = &["ru", "en"];

/// Language used when the caller does not specify one.
pub const DEFAULT_LANG: &str = "ru";

/// Parameters for a single analysis job.
///
/// `own_page` is the page being optimized; `competitors` are the pages
/// it is compared against. Order of competitors is preserved.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    /// URL of the page to analyze.
    pub own_page: String,
    /// URLs of competitor pages. Must not be empty.
    pub competitors: Vec<String>,
    /// Analysis language code (e.g. `"ru"`).
    pub lang: String,
}

impl AnalysisRequest {
    /// Build a request with the default language.
    pub fn new(own_page: impl Into<String>, competitors: Vec<String>) -> Self {
        Self {
            own_page: own_page.into(),
            competitors,
            lang: DEFAULT_LANG.to_string(),
        }
    }

    /// Override the analysis language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Validate the request against the given allowed-language set.
    ///
    /// Checks, in order: `own_page` is an HTTP(S) URL, `competitors` is
    /// non-empty, every competitor is an HTTP(S) URL, and `lang` is in
    /// `allowed_langs`. The first failed check is reported.
    pub fn validate(&self, allowed_langs: &[String]) -> Result<(), UnihraError> {
        if !is_http_url(&self.own_page) {
            return Err(UnihraError::Validation(format!(
                "own_page '{}' is not a valid http(s) URL",
                self.own_page
            )));
        }

        if self.competitors.is_empty() {
            return Err(UnihraError::Validation(
                "Competitor list cannot be empty".to_string(),
            ));
        }

        for url in &self.competitors {
            if !is_http_url(url) {
                return Err(UnihraError::Validation(format!(
                    "Competitor '{url}' is not a valid http(s) URL"
                )));
            }
        }

        if !allowed_langs.iter().any(|l| l == &self.lang) {
            return Err(UnihraError::Validation(format!(
                "Language must be one of: {}",
                allowed_langs.join(", ")
            )));
        }

        Ok(())
    }
}

/// Check that a string looks like an absolute HTTP(S) URL with a host.
fn is_http_url(url: &str) -> bool {
    let rest = match url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return false,
    };
    // Host part must be non-empty.
    !rest.is_empty() && !rest.starts_with('/')
}

/// Opaque server-assigned identifier for a queued analysis job.
///
/// Returned by job submission and consumed exactly once by the
/// progress watcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn allowed() -> Vec<String> {
        DEFAULT_ALLOWED_LANGS.iter().map(|s| s.to_string()).collect()
    }

    fn valid_request() -> AnalysisRequest {
        AnalysisRequest::new(
            "https://example.com/product",
            vec!["https://competitor.com/p1".to_string()],
        )
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid_request().validate(&allowed()).is_ok());
    }

    #[test]
    fn empty_competitors_rejected() {
        let req = AnalysisRequest::new("https://example.com", vec![]);
        let err = req.validate(&allowed()).unwrap_err();
        assert_matches!(err, UnihraError::Validation(msg) if msg.contains("cannot be empty"));
    }

    #[test]
    fn unknown_lang_rejected() {
        let req = valid_request().with_lang("fr");
        let err = req.validate(&allowed()).unwrap_err();
        assert_matches!(err, UnihraError::Validation(msg) if msg.contains("Language must be"));
    }

    #[test]
    fn extended_lang_set_accepted() {
        let mut langs = allowed();
        langs.push("de".to_string());
        let req = valid_request().with_lang("de");
        assert!(req.validate(&langs).is_ok());
    }

    #[test]
    fn non_http_own_page_rejected() {
        let req = AnalysisRequest::new(
            "ftp://example.com",
            vec!["https://competitor.com".to_string()],
        );
        assert_matches!(
            req.validate(&allowed()).unwrap_err(),
            UnihraError::Validation(_)
        );
    }

    #[test]
    fn non_http_competitor_rejected() {
        let req =
            AnalysisRequest::new("https://example.com", vec!["not a url".to_string()]);
        let err = req.validate(&allowed()).unwrap_err();
        assert_matches!(err, UnihraError::Validation(msg) if msg.contains("Competitor"));
    }

    #[test]
    fn url_without_host_rejected() {
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("http:///path"));
        assert!(is_http_url("http://site.com"));
    }

    #[test]
    fn request_serializes_expected_fields() {
        let req = valid_request();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["own_page"], "https://example.com/product");
        assert_eq!(json["competitors"][0], "https://competitor.com/p1");
        assert_eq!(json["lang"], "ru");
    }

    #[test]
    fn job_id_round_trips_as_plain_string() {
        let id: JobId = serde_json::from_str("\"uuid-123\"").unwrap();
        assert_eq!(id.as_str(), "uuid-123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"uuid-123\"");
    }
}
