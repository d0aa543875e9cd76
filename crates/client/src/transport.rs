//! HTTP transport for the SRMA Engine API
//!
//! Single point of outbound HTTP communication. Every response failure
//! is normalized into an `ApiError` carrying a human-readable message,
//! preferring the server's structured `detail` field over generic
//! transport text, logged with its endpoint, and re-raised. No retry is
//! performed here.

use reqwest::multipart::Form;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use srma_common::config::ApiConfig;
use srma_common::{ApiError, Result};
use std::time::Duration;
use tracing::warn;

/// Structured error body returned by the API
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Configured HTTP client, shared by all accessors
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.http.get(self.url(path)).send().await?;
        decode(path, response).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.http.get(self.url(path)).query(query).send().await?;
        decode(path, response).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        decode(path, response).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let response = self.http.post(self.url(path)).multipart(form).send().await?;
        decode(path, response).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.http.patch(self.url(path)).json(body).send().await?;
        decode(path, response).await
    }

    /// Success is 204 No Content; nothing to decode.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self.http.delete(self.url(path)).send().await?;
        check_status(path, response).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T> {
    let response = check_status(endpoint, response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(endpoint, error = %e, "response failed to decode");
        ApiError::contract(format!("invalid response body for {}: {}", endpoint, e))
    })
}

async fn check_status(endpoint: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = normalize_message(status, &text);
    warn!(endpoint, status = status.as_u16(), message = %message, "API request failed");

    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound { message });
    }
    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Prefer the structured `detail` field; fall back to the raw body, then
/// to the status line.
fn normalize_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.detail;
    }
    if body.trim().is_empty() {
        status.to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_detail_is_preferred() {
        let message = normalize_message(
            StatusCode::NOT_FOUND,
            r#"{"detail": "Review not found"}"#,
        );
        assert_eq!(message, "Review not found");
    }

    #[test]
    fn test_unstructured_body_falls_back_to_text() {
        let message = normalize_message(StatusCode::BAD_GATEWAY, "upstream unavailable");
        assert_eq!(message, "upstream unavailable");
    }

    #[test]
    fn test_empty_body_falls_back_to_status_line() {
        let message = normalize_message(StatusCode::INTERNAL_SERVER_ERROR, "  ");
        assert_eq!(message, "500 Internal Server Error");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "http://localhost:8000/".into(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(
            client.url("/api/v1/reviews"),
            "http://localhost:8000/api/v1/reviews"
        );
    }
}
