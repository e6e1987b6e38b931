//! Wire DTOs for the gateway's auth endpoints.
//!
//! DESIGN
//! ======
//! These types mirror the auth service's request and token models so serde
//! round-trips stay lossless.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Username/password body sent to both `/auth/login` and `/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

/// Successful authentication response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token to attach to subsequent API calls.
    pub access_token: String,
    /// Token scheme; the auth service always issues `"bearer"`.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Numeric user identifier.
    pub user_id: i64,
    /// Canonical username as stored by the auth service.
    pub username: String,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// Which auth endpoint a credential exchange targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

impl AuthAction {
    /// Endpoint path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/auth/login",
            Self::Register => "/auth/register",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }
}
