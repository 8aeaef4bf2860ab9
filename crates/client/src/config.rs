//! Client configuration and builder.
//!
//! Configuration is read-only after construction: concurrent calls on
//! one [`UnihraClient`](crate::UnihraClient) share nothing but this
//! config and reqwest's connection pool.

use std::collections::HashMap;
use std::time::Duration;

use unihra_core::{FailureKind, DEFAULT_ALLOWED_LANGS};

use crate::client::UnihraClient;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.unihra.com";

/// Timeout for non-streaming requests (submission, health). The status
/// stream is long-lived and is never subject to this timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent sent on every request.
pub const USER_AGENT: &str = concat!("UnihraRustSDK/", env!("CARGO_PKG_VERSION"));

/// Immutable per-client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent as a bearer credential on every call.
    pub api_key: String,
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Timeout applied to non-streaming requests.
    pub timeout: Duration,
    /// Language codes accepted by request validation.
    pub allowed_langs: Vec<String>,
    /// Extra `error_code` → [`FailureKind`] mappings, consulted before
    /// the built-in table.
    pub error_overrides: HashMap<i64, FailureKind>,
}

impl ClientConfig {
    fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            allowed_langs: DEFAULT_ALLOWED_LANGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            error_overrides: HashMap::new(),
        }
    }
}

/// Builder for [`UnihraClient`] with non-default settings.
///
/// ```no_run
/// use unihra_client::UnihraClient;
/// use unihra_core::FailureKind;
///
/// let client = UnihraClient::builder("key")
///     .base_url("https://staging.unihra.com")
///     .allow_lang("de")
///     .map_error_code(2001, FailureKind::QuotaExceeded)
///     .build();
/// ```
pub struct UnihraClientBuilder {
    config: ClientConfig,
}

impl UnihraClientBuilder {
    /// Start a builder with production defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            config: ClientConfig::new(api_key.into()),
        }
    }

    /// Point the client at a different API host. A trailing slash is
    /// stripped so path joining stays predictable.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let url: String = base_url.into();
        self.config.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Timeout for non-streaming requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Accept an additional language code during request validation.
    pub fn allow_lang(mut self, lang: impl Into<String>) -> Self {
        self.config.allowed_langs.push(lang.into());
        self
    }

    /// Replace the allowed-language set entirely.
    pub fn allowed_langs(mut self, langs: Vec<String>) -> Self {
        self.config.allowed_langs = langs;
        self
    }

    /// Map a server `error_code` to a [`FailureKind`], overriding or
    /// extending the built-in table.
    pub fn map_error_code(mut self, code: i64, kind: FailureKind) -> Self {
        self.config.error_overrides.insert(code, kind);
        self
    }

    /// Build the client.
    pub fn build(self) -> UnihraClient {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        UnihraClient::from_parts(http, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production() {
        let builder = UnihraClientBuilder::new("key");
        assert_eq!(builder.config.base_url, DEFAULT_BASE_URL);
        assert_eq!(builder.config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(builder.config.allowed_langs, vec!["ru", "en"]);
        assert!(builder.config.error_overrides.is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let builder = UnihraClientBuilder::new("key").base_url("http://localhost:8080/");
        assert_eq!(builder.config.base_url, "http://localhost:8080");
    }

    #[test]
    fn allow_lang_extends_default_set() {
        let builder = UnihraClientBuilder::new("key").allow_lang("de");
        assert_eq!(builder.config.allowed_langs, vec!["ru", "en", "de"]);
    }

    #[test]
    fn map_error_code_registers_override() {
        let builder =
            UnihraClientBuilder::new("key").map_error_code(2001, FailureKind::QuotaExceeded);
        assert_eq!(
            builder.config.error_overrides.get(&2001),
            Some(&FailureKind::QuotaExceeded)
        );
    }

    #[test]
    fn user_agent_identifies_sdk() {
        assert!(USER_AGENT.starts_with("UnihraRustSDK/"));
    }
}
