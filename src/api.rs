// API client module: a small blocking HTTP client that talks to the
// `/register` endpoint of a running ubl_core instance. Requests are sent
// one at a time; the client owns its connection pool and releases it on drop.

use crate::error::RegisterError;
use crate::pack::{display_field, record_name, Record, RecordKind};
use anyhow::{Context, Result};
use reqwest::blocking::{Client, Request};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the optional API key.
pub const API_KEY_HEADER: &str = "x-ubl-key";

/// Connection settings for [`ApiClient`], built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Body of a register call: `{"type": "chip"|"program", "data": {...}}`.
#[derive(Serialize, Debug)]
pub struct RegisterRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: &'a Record,
}

/// What the server returned for one record. Only `hash` matters for
/// output; both fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationResult {
    pub hash: Option<String>,
    pub status: Option<String>,
}

impl RegistrationResult {
    /// Parse a success body. An empty body counts as an empty object.
    pub fn from_body(body: &str) -> Result<Self, String> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        let map = match serde_json::from_str(body).map_err(|e| e.to_string())? {
            Value::Object(map) => map,
            other => return Err(format!("expected a JSON object, got {other}")),
        };
        Ok(RegistrationResult {
            hash: display_field(&map, "hash"),
            status: display_field(&map, "status"),
        })
    }
}

/// Anything that can register a single record. The upload loop only talks
/// to this trait, so it can be driven without a server.
pub trait Registrar {
    fn register(&self, kind: RecordKind, data: &Record) -> Result<RegistrationResult, RegisterError>;
}

/// Blocking client for the register endpoint.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: Option<HeaderValue>,
}

impl ApiClient {
    /// Build a client from `config`. Trailing slashes on the base URL are
    /// dropped and an empty API key is treated as unset.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let api_key = match config.api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => {
                let mut value = HeaderValue::from_str(key).map_err(|_| RegisterError::InvalidApiKey)?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };
        let base_url = config.base_url.trim_end_matches('/').to_string();
        debug!(%base_url, api_key = api_key.is_some(), timeout = ?config.timeout, "configured register client");
        Ok(ApiClient {
            client,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn register_url(&self) -> String {
        format!("{}/register", self.base_url)
    }

    /// Build the register request for one record without sending it.
    pub fn build_register(&self, kind: RecordKind, data: &Record) -> Result<Request, RegisterError> {
        let url = self.register_url();
        let body = RegisterRequest {
            kind: kind.wire_tag(),
            data,
        };
        let mut req = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&body);
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key.clone());
        }
        req.build()
            .map_err(|source| RegisterError::Transport { url, source })
    }
}

impl Registrar for ApiClient {
    /// POST one record. Non-2xx responses become [`RegisterError::Remote`]
    /// carrying status, reason and body text.
    fn register(&self, kind: RecordKind, data: &Record) -> Result<RegistrationResult, RegisterError> {
        let request = self.build_register(kind, data)?;
        let url = request.url().to_string();
        let name = record_name(data);
        debug!(%kind, name = name.as_deref().unwrap_or("?"), "sending register request");

        let res = self
            .client
            .execute(request)
            .map_err(|source| RegisterError::Transport {
                url: url.clone(),
                source,
            })?;
        let status = res.status();
        debug!(status = status.as_u16(), "register response");

        let body = res.text().map_err(|source| RegisterError::Transport {
            url: url.clone(),
            source,
        })?;
        if !status.is_success() {
            return Err(RegisterError::Remote {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }

        let result = RegistrationResult::from_body(&body)
            .map_err(|message| RegisterError::Decode { url, message })?;
        if let Some(server_status) = &result.status {
            debug!(status = %server_status, "server acknowledged record");
        }
        Ok(result)
    }
}
