//! Cache Client
//!
//! One POST to `<base_url>/cache` per command, decoded per the configured mode.

use reqwest::header::CONTENT_TYPE;
use reqwest::RequestBuilder;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::decode::decode_response;
use crate::config::{ClientConfig, HeaderPolicy};
use crate::error::{ClientError, Result};
use crate::models::{CacheCommand, CommandRequest};

// == Cache Client ==
/// HTTP client for the cache server's command endpoint.
///
/// Cheap to clone and safe to share between tasks; every call builds and
/// owns its own request and response.
#[derive(Debug, Clone)]
pub struct CacheClient {
    /// Immutable settings, fixed at construction
    config: ClientConfig,
    /// Precomputed `<base_url>/cache`
    url: String,
    http: reqwest::Client,
}

impl CacheClient {
    // == Constructors ==
    /// Creates a client for the given configuration.
    ///
    /// Fails with `ClientError::Config` if the base address is unusable.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        // One connection per call; idle connections are not kept.
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Config(format!("Could not build HTTP client: {}", e)))?;

        Ok(Self {
            url: config.cache_url(),
            config,
            http,
        })
    }

    /// Creates a client from `CACHE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The endpoint every command is posted to.
    pub fn cache_url(&self) -> &str {
        &self.url
    }

    // == Send Command ==
    /// Sends one command and returns the decoded output.
    ///
    /// The command is wrapped as `{"cmd": <cmd>}` and posted as
    /// `application/json`.
    /// In JSON mode the result is the response's `output` field, whatever
    /// its type. In raw mode it is always a `Value::String` built from the
    /// first body chunk.
    ///
    /// # Errors
    /// - `Encode` if the command cannot be serialized
    /// - `Network` if the endpoint is unreachable, the connection drops, or
    ///   the status is not 2xx
    /// - `Decode` if JSON mode gets a non-JSON body or no `output` field
    pub async fn send_command<C>(&self, cmd: &C) -> Result<Value>
    where
        C: Serialize + ?Sized,
    {
        let body = serde_json::to_string(&CommandRequest::new(cmd))
            .map_err(|e| ClientError::Encode(format!("Could not serialize command: {}", e)))?;

        debug!(
            "POST {} (decode_mode={}, header_policy={})",
            self.url, self.config.decode_mode, self.config.header_policy
        );

        let request = self.apply_headers(
            self.http
                .post(&self.url)
                .header(CONTENT_TYPE, "application/json")
                .body(body),
        );
        let response = request.send().await.map_err(|e| {
            warn!("Cache request to {} failed: {}", self.url, e);
            ClientError::from(e)
        })?;

        let status = response.status();
        debug!("Cache server responded with {}", status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Cache server returned {}: {}", status, body);
            return Err(ClientError::Network(format!(
                "HTTP {} from cache server: {}",
                status, body
            )));
        }

        decode_response(response, self.config.decode_mode).await
    }

    /// Like `send_command`, but renders the output as text.
    ///
    /// A JSON string is returned without quotes; any other JSON value is
    /// returned as compact JSON.
    pub async fn send_command_text<C>(&self, cmd: &C) -> Result<String>
    where
        C: Serialize + ?Sized,
    {
        Ok(match self.send_command(cmd).await? {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    /// Sends one line of user input and renders the output as text.
    ///
    /// Input whose first word is `SET`, `GET` or `DEL` must parse as a
    /// `CacheCommand`; if it does not, nothing is sent and the parse error is
    /// returned. Any other input is sent verbatim.
    pub async fn send_input(&self, input: &str) -> Result<String> {
        if CacheCommand::has_command_keyword(input) {
            let cmd: CacheCommand = input.parse()?;
            return self.send_command_text(&cmd).await;
        }
        debug!("Sending '{}' verbatim", input);
        self.send_command_text(input).await
    }

    fn apply_headers(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.header_policy {
            HeaderPolicy::None => request,
            // Response-side CORS headers; servers ignore them on requests.
            HeaderPolicy::PermissiveCors => request
                .header("Access-Control-Allow-Headers", "*")
                .header("Access-Control-Allow-Origin", "*"),
        }
    }
}
