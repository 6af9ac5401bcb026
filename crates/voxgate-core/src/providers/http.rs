//! Shared HTTP plumbing for vendor adapters
//!
//! Every adapter owns one `reqwest::Client` and describes its vendor with a
//! [`Vendor`]: where the vendor puts its error message and what to say when a
//! request runs out of time. No raw `reqwest::Error` leaves this module.

use crate::{Error, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT_MESSAGE: &str = "Request timed out. The provider is taking too long to respond.";

/// Static description of one vendor API
#[derive(Debug, Clone, Copy)]
pub struct Vendor {
    pub name: &'static str,
    /// JSON pointers tried in order to find the error message of a failed call
    pub error_pointers: &'static [&'static str],
    pub timeout_message: &'static str,
}

impl Vendor {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            error_pointers: &[],
            timeout_message: DEFAULT_TIMEOUT_MESSAGE,
        }
    }

    pub const fn error_at(mut self, pointers: &'static [&'static str]) -> Self {
        self.error_pointers = pointers;
        self
    }

    pub const fn on_timeout(mut self, message: &'static str) -> Self {
        self.timeout_message = message;
        self
    }

    /// Build the per-adapter client
    pub fn client(&self, timeout: Duration) -> Result<Client> {
        Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::provider(self.name, format!("Failed to build HTTP client: {}", e)))
    }

    /// Send a request, mapping transport failures and non-2xx statuses.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(provider = self.name, %status, %body, "Vendor returned an error");

        Err(Error::provider(self.name, self.error_message(status, &body)))
    }

    /// Send and parse the body as JSON
    pub async fn send_json(&self, request: RequestBuilder) -> Result<Value> {
        let response = self.send(request).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| self.transport_error(e))
    }

    /// Send and return the raw body
    pub async fn send_bytes(&self, request: RequestBuilder) -> Result<Vec<u8>> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        Ok(bytes.to_vec())
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                provider: self.name.to_string(),
                message: self.timeout_message.to_string(),
            }
        } else {
            Error::provider(self.name, err.to_string())
        }
    }

    /// First vendor error field, else the raw body, else the status line.
    fn error_message(&self, status: reqwest::StatusCode, body: &str) -> String {
        if let Ok(json) = serde_json::from_str::<Value>(body)
            && let Some(message) = self
                .error_pointers
                .iter()
                .filter_map(|pointer| json.pointer(pointer).and_then(Value::as_str))
                .find(|message| !message.is_empty())
        {
            return message.to_string();
        }

        let body = body.trim();
        if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body.to_string()
        }
    }
}

/// String at `pointer`, or "" when absent
pub fn str_at<'a>(json: &'a Value, pointer: &str) -> &'a str {
    json.pointer(pointer).and_then(Value::as_str).unwrap_or("")
}

/// First non-empty string among `pointers`
pub fn first_str<'a>(json: &'a Value, pointers: &[&str]) -> Option<&'a str> {
    pointers
        .iter()
        .filter_map(|pointer| json.pointer(pointer).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// Eager credential check, used by constructors
pub fn require_key(key: Option<&String>, var: &str) -> Result<String> {
    key.filter(|k| !k.is_empty())
        .cloned()
        .ok_or_else(|| Error::config_error(format!("{} environment variable is not set", var)))
}

/// Lazy credential check, used on first capability call
pub fn lazy_key<'a>(key: Option<&'a str>, var: &str) -> Result<&'a str> {
    key.filter(|k| !k.is_empty()).ok_or_else(|| {
        Error::config_error(format!(
            "{} environment variable is not set. Please add your API key to the .env file.",
            var
        ))
    })
}
