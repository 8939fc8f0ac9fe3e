//! Configuration for building an HTTP transport.

use std::time::Duration;

use serde::Deserialize;

/// Let discovery pick the first available transport.
pub const BACKEND_AUTO: &str = "auto";

/// The reqwest-based transport.
pub const BACKEND_REQWEST: &str = "reqwest";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP transport configuration.
///
/// Deserializable from any serde format, or read from the environment with
/// [`HttpClientConfig::from_env`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Transport backend: `"auto"` or `"reqwest"`.
    pub backend: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    pub user_agent: Option<String>,

    /// Proxy URL applied to all requests.
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            backend: BACKEND_AUTO.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            proxy: None,
        }
    }
}

impl HttpClientConfig {
    /// Read configuration from `SWAP_HTTP_*` environment variables, falling
    /// back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let backend = std::env::var("SWAP_HTTP_CLIENT").unwrap_or_else(|_| defaults.backend);
        let timeout_secs = std::env::var("SWAP_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.timeout_secs);
        let user_agent = std::env::var("SWAP_HTTP_USER_AGENT").ok();
        let proxy = std::env::var("SWAP_HTTP_PROXY").ok().filter(|p| !p.is_empty());

        Self {
            backend,
            timeout_secs,
            user_agent,
            proxy,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("swap-rates/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn is_auto(&self) -> bool {
        self.backend.trim().is_empty() || self.backend.eq_ignore_ascii_case(BACKEND_AUTO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpClientConfig::default();
        assert!(config.is_auto());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent().starts_with("swap-rates/"));
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("SWAP_HTTP_CLIENT", "reqwest");
        std::env::set_var("SWAP_HTTP_TIMEOUT_SECS", "not-a-number");
        std::env::set_var("SWAP_HTTP_PROXY", "");

        let config = HttpClientConfig::from_env();
        assert_eq!(config.backend, BACKEND_REQWEST);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.proxy.is_none());

        std::env::remove_var("SWAP_HTTP_CLIENT");
        std::env::remove_var("SWAP_HTTP_TIMEOUT_SECS");
        std::env::remove_var("SWAP_HTTP_PROXY");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: HttpClientConfig =
            serde_json::from_str(r#"{"backend": "reqwest", "timeout_secs": 5}"#).unwrap();
        assert_eq!(config.backend, BACKEND_REQWEST);
        assert_eq!(config.timeout_secs, 5);
        assert!(config.proxy.is_none());
        assert!(!config.is_auto());
    }
}
