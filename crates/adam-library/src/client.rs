//! CDISC Library HTTP client.
//!
//! Every lookup goes through [`MetadataSource::fetch`], which answers with a
//! JSON document or `None`. Transport failures, non-success statuses and
//! unparseable bodies are logged here and never raised; the caller decides
//! whether a missing document is fatal.

use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::LibraryConfig;
use crate::error::{LibraryError, Result};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("adam-metadata/", env!("CARGO_PKG_VERSION"));

/// Number of body characters echoed when an error body is not JSON.
const BODY_PREVIEW_CHARS: usize = 500;

/// A source of registry documents addressed by API path.
///
/// [`RegistryClient`] is the HTTP implementation; the resolution pipeline only
/// depends on this trait.
pub trait MetadataSource {
    /// Fetch the document at `path` (e.g. `/mdr/products/Terminology`).
    fn fetch(&self, path: &str) -> Option<Value>;
}

impl<S: MetadataSource + ?Sized> MetadataSource for &S {
    fn fetch(&self, path: &str) -> Option<Value> {
        (**self).fetch(path)
    }
}

/// Fetch `path` and deserialize it into `T`, logging shape mismatches.
pub(crate) fn fetch_as<T, S>(source: &S, path: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: MetadataSource + ?Sized,
{
    let value = source.fetch(path)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            let err = LibraryError::MalformedResponse {
                path: path.to_string(),
                message: err.to_string(),
            };
            error!("{err}");
            None
        }
    }
}

/// Blocking client for the CDISC Library REST API.
///
/// Single attempt per request, no retries.
#[derive(Debug)]
pub struct RegistryClient {
    client: Client,
    config: LibraryConfig,
}

impl RegistryClient {
    /// Creates a client with authentication headers taken from `config`.
    pub fn new(config: LibraryConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(config.api_key()).map_err(|_| {
            LibraryError::InvalidConfig("API key contains invalid header characters".to_string())
        })?;
        key.set_sensitive(true);
        headers.insert("api-key", key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| LibraryError::InvalidConfig(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Fetch a document, reporting why it could not be obtained.
    pub fn try_fetch(&self, path: &str) -> Result<Value> {
        let url = self.config.url_for(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| LibraryError::TransportFailure {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            log_error_body(path, response);
            return Err(LibraryError::TransportFailure {
                path: path.to_string(),
                message: format!("HTTP {status}"),
            });
        }

        let body = response.text().map_err(|e| LibraryError::TransportFailure {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| {
            warn!("Response text: {}...", preview(&body));
            LibraryError::MalformedResponse {
                path: path.to_string(),
                message: e.to_string(),
            }
        })
    }
}

impl MetadataSource for RegistryClient {
    fn fetch(&self, path: &str) -> Option<Value> {
        match self.try_fetch(path) {
            Ok(value) => Some(value),
            Err(err) => {
                error!("{err}");
                None
            }
        }
    }
}

/// Echo the upstream error body: pretty JSON when possible, else a prefix.
fn log_error_body(path: &str, response: Response) {
    let body = response.text().unwrap_or_default();
    if body.trim().is_empty() {
        return;
    }
    match serde_json::from_str::<Value>(&body) {
        Ok(details) => {
            let pretty = serde_json::to_string_pretty(&details).unwrap_or(body);
            warn!("API error details for {}: {}", path, pretty);
        }
        Err(_) => warn!("API error body for {}: {}...", path, preview(&body)),
    }
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}
