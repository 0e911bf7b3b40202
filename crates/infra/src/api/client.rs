//! JSON API client
//!
//! Wraps [`HttpClient`] with base-URL handling, an outer timeout, status
//! classification and JSON (de)serialisation.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use rota_domain::ApiConfig;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use tracing::{debug, instrument};

use super::errors::ApiError;
use crate::http::HttpClient;

/// HTTP client for the roster REST API
#[derive(Clone)]
pub struct ApiClient {
    http_client: HttpClient,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is empty or the HTTP client cannot be
    /// created
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::Config("API base URL is empty".into()));
        }

        let http_client = HttpClient::from_config(config)
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self { http_client, base_url, timeout: config.timeout() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a GET request with query parameters
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET request");

        let request = self.http_client.request(Method::GET, &url).query(query);
        self.execute(request, &url).await
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, query, body), fields(path = %path))]
    pub async fn post<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &T,
    ) -> Result<R, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "POST request");

        let request = self.http_client.request(Method::POST, &url).query(query).json(body);
        self.execute(request, &url).await
    }

    /// Execute a DELETE request, ignoring any response body
    ///
    /// # Errors
    ///
    /// Returns error if request fails
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        debug!(url = %url, "DELETE request");

        let request = self.http_client.request(Method::DELETE, &url);
        self.execute::<IgnoredAny>(request, &url).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<R, ApiError> {
        let response = match tokio::time::timeout(self.timeout, self.http_client.send(request)).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(ApiError::from(err)),
            Err(_) => return Err(ApiError::Timeout(self.timeout)),
        };

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(Self::map_status_error(status, url, &String::from_utf8_lossy(&body)));
        }

        // 204/205 and empty bodies carry no JSON
        if status == StatusCode::NO_CONTENT
            || status == StatusCode::RESET_CONTENT
            || body.iter().all(u8::is_ascii_whitespace)
        {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "{url} returned no content ({}), but a body was expected",
                    status.as_u16()
                ))
            });
        }

        serde_json::from_slice(&body)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response from {url}: {e}")))
    }

    fn map_status_error(status: StatusCode, url: &str, body: &str) -> ApiError {
        if status == StatusCode::BAD_REQUEST {
            return ApiError::BadRequest(body.to_string());
        }

        let message = if body.is_empty() {
            format!("{url} returned status {status}")
        } else {
            format!("{url} returned status {status}: {body}")
        };

        if status == StatusCode::NOT_FOUND {
            ApiError::NotFound(message)
        } else if status.is_server_error() {
            ApiError::Server(message)
        } else if status.is_client_error() {
            ApiError::Client(message)
        } else {
            ApiError::Network(message)
        }
    }
}
