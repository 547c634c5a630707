//! Core HTTP client and request dispatcher.
//!
//! Every endpoint wrapper funnels through [`HighbondClient::request`],
//! which performs exactly one HTTP call and classifies the response by
//! status code: 2xx parses the JSON body, 4xx becomes an [`ApiError`]
//! carrying the server message, anything else is surfaced as an
//! unexpected response. There is no retry or backoff logic.

use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{header, multipart, Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while still failing fast.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// JSON:API media type used by every HighBond endpoint.
const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Encode a page number as the `page[number]` cursor.
/// The platform expects the decimal page number in base64.
pub(crate) fn page_cursor(page: u32) -> String {
    BASE64.encode(page.to_string())
}

/// API client for a single HighBond organization.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HighbondClient {
    http: Client,
    config: Config,
}

impl HighbondClient {
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Organization-scoped endpoint URL: `{base}/{path}`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url(), path)
    }

    /// URL of the organization resource itself.
    pub(crate) fn org_url(&self) -> String {
        self.config.base_url()
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", self.config.token))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(JSONAPI_MEDIA_TYPE),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static(JSONAPI_MEDIA_TYPE),
        );
        Ok(headers)
    }

    /// Issue a single HTTP call and classify the response.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: &str,
        query: Option<&[(&str, String)]>,
        body: Option<&Value>,
    ) -> Result<Value> {
        debug!(method = %method, url, "sending request");

        let mut request = self
            .http
            .request(method.clone(), url)
            .headers(self.auth_headers()?);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send {method} request to {url}"))?;

        self.classify(url, response).await
    }

    /// Multipart POST used by the file and script upload endpoints.
    pub(crate) async fn post_multipart(
        &self,
        url: &str,
        query: Option<&[(&str, String)]>,
        form: multipart::Form,
    ) -> Result<Value> {
        debug!(url, "sending multipart request");

        // multipart sets its own Content-Type boundary
        let mut headers = self.auth_headers()?;
        headers.remove(header::CONTENT_TYPE);

        let mut request = self.http.post(url).headers(headers);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("Failed to send multipart request to {url}"))?;

        self.classify(url, response).await
    }

    async fn classify(&self, url: &str, response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body).into());
        }

        if self.config.verbose {
            info!(status = status.as_u16(), url, "request succeeded");
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        // 202 responses sometimes arrive with an empty body
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON response from {url}"))
    }

    /// Read a local file into a multipart `file` part.
    pub(crate) async fn file_part(&self, path: &Path) -> Result<multipart::Part> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(multipart::Part::bytes(bytes).file_name(file_name))
    }

    /// GET raw bytes from an organization-scoped endpoint.
    pub(crate) async fn download(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "downloading");

        let response = self
            .http
            .get(url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body).into());
        }

        if self.config.verbose {
            info!(status = status.as_u16(), url, "download succeeded");
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read download body from {url}"))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Server;

    fn test_client() -> HighbondClient {
        HighbondClient::new(Config::new("token", "600123").with_server(Server::Sa))
            .expect("client should build")
    }

    #[test]
    fn test_url_building() {
        let client = test_client();
        assert_eq!(
            client.url("robots/42/robot_tasks"),
            "https://apis-sa.highbond.com/v1/orgs/600123/robots/42/robot_tasks"
        );
        assert_eq!(
            client.org_url(),
            "https://apis-sa.highbond.com/v1/orgs/600123"
        );
    }

    #[test]
    fn test_page_cursor_is_base64_of_decimal_page() {
        assert_eq!(page_cursor(1), "MQ==");
        assert_eq!(page_cursor(12), "MTI=");
        assert_eq!(page_cursor(137), "MTM3");
    }
}
