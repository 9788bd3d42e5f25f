//! Configuration Module
//!
//! Handles loading and managing client configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ClientError;

/// Base address of the cache server when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

// == Decode Mode ==
/// How the response body is turned into command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Parse the whole body as JSON and return its `output` field
    #[default]
    Json,
    /// Read only the first body chunk and map each byte to a char
    RawFirstChunk,
}

impl FromStr for DecodeMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(DecodeMode::Json),
            "raw" | "rawfirstchunk" | "raw_first_chunk" => Ok(DecodeMode::RawFirstChunk),
            other => Err(ClientError::Config(format!("Unknown decode mode: {}", other))),
        }
    }
}

impl fmt::Display for DecodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeMode::Json => f.write_str("json"),
            DecodeMode::RawFirstChunk => f.write_str("rawFirstChunk"),
        }
    }
}

// == Header Policy ==
/// Which extra headers go out with each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderPolicy {
    /// No custom headers
    #[default]
    None,
    /// Send `Access-Control-Allow-Headers: *` and `Access-Control-Allow-Origin: *`.
    ///
    /// These are response headers; on a request they do nothing. Kept only
    /// for compatibility with clients that send them.
    PermissiveCors,
}

impl FromStr for HeaderPolicy {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(HeaderPolicy::None),
            "cors" | "permissive" | "permissivecors" | "permissive_cors" => {
                Ok(HeaderPolicy::PermissiveCors)
            }
            other => Err(ClientError::Config(format!(
                "Unknown header policy: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for HeaderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderPolicy::None => f.write_str("none"),
            HeaderPolicy::PermissiveCors => f.write_str("permissiveCors"),
        }
    }
}

// == Client Config ==
/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base address of the cache server, without the `/cache` path
    pub base_url: String,
    /// Response decoding strategy
    pub decode_mode: DecodeMode,
    /// Extra request headers
    pub header_policy: HeaderPolicy,
    /// Optional whole-request timeout; `None` waits on the transport
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a new ClientConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_SERVER_URL` - Base address (default: http://127.0.0.1:8000)
    /// - `CACHE_DECODE_MODE` - `json` or `raw` (default: json)
    /// - `CACHE_HEADER_POLICY` - `none` or `cors` (default: none)
    /// - `CACHE_REQUEST_TIMEOUT` - Timeout in seconds; 0 means none (default: unset)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("CACHE_SERVER_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.base_url),
            decode_mode: lookup("CACHE_DECODE_MODE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.decode_mode),
            header_policy: lookup("CACHE_HEADER_POLICY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.header_policy),
            request_timeout: lookup("CACHE_REQUEST_TIMEOUT")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|&secs| secs > 0)
                .map(Duration::from_secs),
        }
    }

    /// Returns a copy with a different base address.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns a copy with a different decode mode.
    pub fn with_decode_mode(mut self, decode_mode: DecodeMode) -> Self {
        self.decode_mode = decode_mode;
        self
    }

    /// Returns a copy with a different header policy.
    pub fn with_header_policy(mut self, header_policy: HeaderPolicy) -> Self {
        self.header_policy = header_policy;
        self
    }

    /// Returns a copy with a different request timeout.
    pub fn with_request_timeout(mut self, request_timeout: Option<Duration>) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Full URL of the command endpoint.
    pub fn cache_url(&self) -> String {
        format!("{}/cache", self.base_url.trim_end_matches('/'))
    }

    /// Checks that the base address is usable.
    pub fn validate(&self) -> Result<(), ClientError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ClientError::Config("Base URL cannot be empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "Base URL must start with http:// or https://, got '{}'",
                base
            )));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            decode_mode: DecodeMode::Json,
            header_policy: HeaderPolicy::None,
            request_timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.decode_mode, DecodeMode::Json);
        assert_eq!(config.header_policy, HeaderPolicy::None);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_config_from_env_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_config_from_env_values() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("CACHE_SERVER_URL", "http://cache.local:9000"),
            ("CACHE_DECODE_MODE", "rawFirstChunk"),
            ("CACHE_HEADER_POLICY", "cors"),
            ("CACHE_REQUEST_TIMEOUT", "5"),
        ]));
        assert_eq!(config.base_url, "http://cache.local:9000");
        assert_eq!(config.decode_mode, DecodeMode::RawFirstChunk);
        assert_eq!(config.header_policy, HeaderPolicy::PermissiveCors);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_config_from_env_invalid_values_fall_back() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("CACHE_SERVER_URL", "   "),
            ("CACHE_DECODE_MODE", "xml"),
            ("CACHE_HEADER_POLICY", "strict"),
            ("CACHE_REQUEST_TIMEOUT", "soon"),
        ]));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_config_zero_timeout_means_none() {
        let config = ClientConfig::from_lookup(lookup_from(&[("CACHE_REQUEST_TIMEOUT", "0")]));
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_cache_url_strips_trailing_slash() {
        let config = ClientConfig::default().with_base_url("http://localhost:8000/");
        assert_eq!(config.cache_url(), "http://localhost:8000/cache");
        assert_eq!(ClientConfig::default().cache_url(), "http://127.0.0.1:8000/cache");
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(ClientConfig::default()
            .with_base_url("127.0.0.1:8000")
            .validate()
            .is_err());
    }

    #[test]
    fn test_mode_and_policy_display_parse() {
        assert_eq!(DecodeMode::RawFirstChunk.to_string(), "rawFirstChunk");
        assert_eq!("JSON".parse::<DecodeMode>().unwrap(), DecodeMode::Json);
        assert_eq!("raw".parse::<DecodeMode>().unwrap(), DecodeMode::RawFirstChunk);
        assert_eq!(
            "permissive".parse::<HeaderPolicy>().unwrap(),
            HeaderPolicy::PermissiveCors
        );
        assert!("other".parse::<HeaderPolicy>().is_err());
    }
}
