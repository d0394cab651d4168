//! Thin JSON-over-HTTP adapter bound to one base URL

use dashboard_api::{ApiError, ApiResult};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Maximum number of body characters kept in a [`ApiError::Status`]
const ERROR_BODY_LIMIT: usize = 500;

pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        let text = self.send(Method::GET, &url, None::<&()>).await?;
        Self::decode(&text, &url)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let text = self.send(Method::POST, &url, Some(body)).await?;
        Self::decode(&text, &url)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let text = self.send(Method::PUT, &url, Some(body)).await?;
        Self::decode(&text, &url)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let text = self.send(Method::PATCH, &url, Some(body)).await?;
        Self::decode(&text, &url)
    }

    /// DELETE discards the response body; only the status matters
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let url = self.url(path);
        self.send(Method::DELETE, &url, None::<&()>).await?;
        Ok(())
    }

    async fn send<B>(&self, method: Method, url: &str, body: Option<&B>) -> ApiResult<String>
    where
        B: Serialize + ?Sized,
    {
        debug!("[HttpClient] {} {}", method, url);

        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            let err = Self::classify_reqwest_error(e, url, method.as_str());
            error!("[HttpClient] {} {} failed: {}", method, url, err);
            err
        })?;

        Self::handle_response(response, url).await
    }

    async fn handle_response(response: reqwest::Response, url: &str) -> ApiResult<String> {
        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            ApiError::network(format!("Failed to read response body from {}: {}", url, e))
        })?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body: truncate_body(&response_text),
            });
        }

        Ok(response_text)
    }

    fn decode<T: DeserializeOwned>(text: &str, url: &str) -> ApiResult<T> {
        serde_json::from_str(text).map_err(|e| {
            error!(
                "[HttpClient] Unexpected payload from {}: {} - Response: {}",
                url,
                e,
                text.chars().take(200).collect::<String>()
            );
            ApiError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Map a reqwest failure onto the error taxonomy with a readable message
    fn classify_reqwest_error(e: reqwest::Error, url: &str, operation: &str) -> ApiError {
        if e.is_timeout() {
            ApiError::network(format!(
                "{} {}: timeout - request took too long (check network or increase timeout)",
                operation, url
            ))
        } else if e.is_connect() {
            ApiError::network(format!(
                "{} {}: connection error - check network connectivity and DNS resolution. Error: {}",
                operation, url, e
            ))
        } else if e.is_decode() {
            ApiError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            }
        } else if e.is_builder() || e.is_request() {
            ApiError::internal(format!(
                "{} {}: request error - invalid URL or malformed request. Error: {}",
                operation, url, e
            ))
        } else {
            let display_str = e.to_string();
            if display_str.contains("certificate") || display_str.contains("TLS") {
                ApiError::network(format!(
                    "{} {}: TLS/certificate error. Error: {}",
                    operation, url, e
                ))
            } else {
                ApiError::network(format!("{} {}: {}. Debug details: {:?}", operation, url, display_str, e))
            }
        }
    }
}

fn truncate_body(text: &str) -> String {
    if text.chars().count() > ERROR_BODY_LIMIT {
        let head: String = text.chars().take(ERROR_BODY_LIMIT).collect();
        format!("{}... (truncated)", head)
    } else {
        text.to_string()
    }
}
