//! HTTP client for gateway requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the REST gateway, handling authentication headers, the JSON response
//! envelope, and mapping of failure statuses onto [`GatewayError`].

use super::GatewayError;
use reqwest::{header, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;

/// Response envelope shared by every gateway route.
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
}

impl ApiResponse {
    /// Returns the envelope when the gateway accepted the request: `success`
    /// is not false and `statusCode` is absent or in the 2xx range.
    ///
    pub fn accepted(self) -> Result<ApiResponse, GatewayError> {
        let status_ok = self
            .status_code
            .map_or(true, |code| (200..300).contains(&code));
        if self.success.unwrap_or(true) && status_ok {
            return Ok(self);
        }
        if self.status_code == Some(401) {
            return Err(GatewayError::Unauthorized);
        }
        Err(GatewayError::Rejected {
            status_code: self.status_code,
            message: self.message,
        })
    }
}

/// Makes requests to the gateway and decodes the response envelope.
///
pub struct Client {
    base_url: String,
    access_token: Option<String>,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the base URL and optional bearer token.
    ///
    pub fn new(base_url: &str, access_token: Option<&str>) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            access_token: access_token.map(str::to_owned),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Replaces the bearer token sent with each request.
    ///
    pub fn set_access_token(&mut self, access_token: Option<String>) {
        self.access_token = access_token.filter(|token| !token.is_empty());
    }

    /// Make request with optional JSON body and return the decoded envelope.
    ///
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, GatewayError> {
        let request_url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        log::debug!("{} {}", method, request_url);

        let mut request = self
            .http_client
            .request(method.clone(), &request_url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = &self.access_token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            log::error!("{} {} failed: {}", method, request_url, e);
            GatewayError::Transport(e)
        })?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("{} {} returned 401", method, request_url);
            return Err(GatewayError::Unauthorized);
        }

        // Error bodies are best-effort; success bodies must decode.
        if !status.is_success() {
            let message = serde_json::from_slice::<ApiResponse>(&bytes)
                .ok()
                .and_then(|envelope| envelope.message);
            log::error!(
                "{} {} failed with status {}: {}",
                method,
                request_url,
                status,
                message.as_deref().unwrap_or("no message")
            );
            if status == StatusCode::CONFLICT {
                return Err(GatewayError::Conflict { message });
            }
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if bytes.is_empty() {
            return Ok(ApiResponse::default());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
