//! Client configuration resolved at build time.
//!
//! The WASM bundle has no process environment at runtime, so overrides are
//! baked in through `option_env!` when the crate is compiled.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Gateway prefix used when `API_BASE_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "/api/v1";

/// Settings for the REST client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Prefix prepended to every endpoint path (no trailing slash).
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url }
    }

    /// Build the config from the `API_BASE_URL` compile-time variable.
    pub fn from_env() -> Self {
        option_env!("API_BASE_URL").map_or_else(Self::default, Self::new)
    }

    /// Join `path` (e.g. `/auth/login`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.base_url)
    }
}
