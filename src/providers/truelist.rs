use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::providers::EmailVerifier;
use crate::verification::EmailValidation;

/// Default public API endpoint
const DEFAULT_ENDPOINT: &str = "https://api.truelist.io";

/// Truelist client for interacting with the Truelist API
#[derive(Clone)]
pub struct Truelist {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
}

/// Response envelope of the inline verification endpoint
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    /// Verified addresses; one entry per address in the request
    emails: Vec<EmailValidation>,
}

// The API key must never appear in log output
impl std::fmt::Debug for Truelist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Truelist")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl Truelist {
    /// Create a new Truelist client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_timeout(api_key, endpoint, Duration::from_secs(30))
    }

    /// Create a new Truelist client with a custom request timeout
    pub fn with_timeout(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Base URL with trailing slashes stripped, falling back to the public API
    fn base_url(&self) -> String {
        if self.endpoint.is_empty() {
            DEFAULT_ENDPOINT.to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        }
    }

    /// Map a non-success HTTP status onto a typed provider error
    async fn error_for_status(response: reqwest::Response) -> ProviderError {
        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        error!("Truelist API error ({}): {}", status, message);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::AuthenticationError(message)
            }
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(message),
            _ => ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            },
        }
    }

    /// Classify a reqwest transport failure
    fn request_error(error: reqwest::Error) -> ProviderError {
        if error.is_connect() || error.is_timeout() {
            ProviderError::ConnectionError(error.to_string())
        } else {
            ProviderError::RequestFailed(error.to_string())
        }
    }
}

#[async_trait]
impl EmailVerifier for Truelist {
    async fn validate(&self, email: &str) -> Result<EmailValidation, ProviderError> {
        let api_url = format!("{}/api/v1/verify_inline", self.base_url());

        let response = self
            .client
            .post(&api_url)
            .bearer_auth(&self.api_key)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(Self::request_error)?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let verify_response = response
            .json::<VerifyResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        verify_response.emails.into_iter().next().ok_or_else(|| {
            ProviderError::ParseError("Verification response contained no email record".to_string())
        })
    }

    async fn account(&self) -> Result<serde_json::Value, ProviderError> {
        let api_url = format!("{}/api/v1/me", self.base_url());

        let response = self
            .client
            .get(&api_url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(Self::request_error)?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}
