//! REST client for the gateway's auth endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: `HttpAuthApi` reports
//! `ApiError::Unavailable`, since these endpoints only make sense in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures are returned as `ApiError` exactly as observed (transport error,
//! non-2xx status with its body, or an undecodable body). Nothing here
//! retries, times out, or formats messages for users beyond `detail()`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{AuthAction, Credentials, TokenResponse};
use crate::config::ApiConfig;

/// Failure of a single API request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("{status} response: {body}")]
    Status { status: u16, body: String },
    /// The response body did not match the expected schema.
    #[error("invalid response body: {0}")]
    Decode(String),
    /// No HTTP transport exists in this build (server render or native host).
    #[error("not available outside the browser")]
    Unavailable,
}

impl ApiError {
    /// HTTP status code, when the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Backend-provided `detail` message from a `{"detail": "..."}` body.
    pub fn detail(&self) -> Option<String> {
        let Self::Status { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value.get("detail")?.as_str().map(str::to_owned)
    }

    /// Short text suitable for an inline form message.
    pub fn user_message(&self) -> String {
        self.detail().unwrap_or_else(|| self.to_string())
    }
}

#[cfg(feature = "hydrate")]
impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Credential exchange against the auth endpoints.
///
/// The store is generic over this trait so tests can script responses
/// without a browser.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// Send `credentials` to the endpoint for `action`.
    ///
    /// # Errors
    ///
    /// Returns the request failure unchanged.
    async fn authenticate(&self, action: AuthAction, credentials: &Credentials) -> Result<TokenResponse, ApiError>;
}

/// `AuthApi` backed by `fetch` through `gloo-net`.
#[derive(Clone, Debug, Default)]
pub struct HttpAuthApi {
    config: ApiConfig,
}

impl HttpAuthApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

impl AuthApi for HttpAuthApi {
    async fn authenticate(&self, action: AuthAction, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = self.config.endpoint(action.path());
            let resp = gloo_net::http::Request::post(&url)
                .json(credentials)?
                .send()
                .await?;
            if !resp.ok() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                return Err(ApiError::Status { status, body });
            }
            resp.json::<TokenResponse>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (action, credentials);
            Err(ApiError::Unavailable)
        }
    }
}
