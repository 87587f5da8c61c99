//! HTTP utilities for cloud REST API calls

use anyhow::{Context, Result};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        format!(
            "{}... [truncated, {} bytes total]",
            &body[..MAX_LOG_BODY_LENGTH],
            body.len()
        )
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for cloud API calls
///
/// All verbs authenticate with the `X-Auth-Token` header and parse JSON
/// bodies; delete/update calls that return an empty body yield `Value::Null`.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("stacksweep/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a GET request
    pub async fn get(&self, url: &str, token: &str) -> Result<Value> {
        self.request(Method::GET, url, token, None).await
    }

    /// Make a GET request, mapping 404 to `None`.
    /// Show calls use this to tell "already gone" apart from real failures.
    pub async fn get_opt(&self, url: &str, token: &str) -> Result<Option<Value>> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("X-Auth-Token", token)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(anyhow::anyhow!("API request failed: {}", status));
        }

        serde_json::from_str(&body)
            .map(Some)
            .context("Failed to parse response JSON")
    }

    /// Make a PUT request
    pub async fn put(&self, url: &str, token: &str, body: Option<&Value>) -> Result<Value> {
        self.request(Method::PUT, url, token, body).await
    }

    /// Make a PATCH request
    pub async fn patch(&self, url: &str, token: &str, body: &Value) -> Result<Value> {
        self.request(Method::PATCH, url, token, Some(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str, token: &str) -> Result<Value> {
        self.request(Method::DELETE, url, token, None).await
    }

    /// Make a HEAD request, mapping 2xx to `true` and 404 to `false`.
    /// Used for identity role-assignment and existence checks.
    pub async fn head(&self, url: &str, token: &str) -> Result<bool> {
        tracing::debug!("HEAD {}", url);

        let response = self
            .client
            .head(url)
            .header("X-Auth-Token", token)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Err(anyhow::anyhow!("API request failed: {}", status))
    }

    async fn request(
        &self,
        method: Method,
        url: &str,
        token: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .header("X-Auth-Token", token);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            return Err(anyhow::anyhow!("API request failed: {}", status));
        }

        // 204s and some deletes come back with no body
        if response_body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&response_body).context("Failed to parse response JSON")
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("truncated, 500 bytes total"));
        assert!(sanitized.len() < body.len());
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("ok\x1b[31m body\n"), "ok[31m body");
    }
}
