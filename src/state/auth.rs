//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthStore` owns the session signal. The route guard and user-aware
//! components read it; only `login`, `register`, and `logout` write it.
//!
//! CONCURRENCY
//! ===========
//! Actions suspend on a single request and then replace the whole session.
//! Overlapping actions are not deduplicated: whichever response resolves
//! last wins. A spawned action cannot be cancelled.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::api::{ApiError, AuthApi, HttpAuthApi};
use crate::net::types::{AuthAction, Credentials, TokenResponse};
use crate::util::storage::{ACCESS_TOKEN_KEY, KeyValueStorage, SharedStorage};

/// Identity returned alongside the token on login/register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUser {
    pub username: String,
    pub id: i64,
}

/// Token plus identity for the current browser session.
///
/// An empty token means unauthenticated. `user` is only known after a
/// login/register in this page lifetime; a session restored from storage has
/// a token and no user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    fn from_token_response(resp: TokenResponse) -> Self {
        Self {
            token: resp.access_token,
            user: Some(SessionUser { username: resp.username, id: resp.user_id }),
        }
    }
}

/// Store type provided through context by the application root.
pub type AppAuthStore = AuthStore<HttpAuthApi, SharedStorage>;

/// Mediates auth actions and owns the session signal.
#[derive(Clone)]
pub struct AuthStore<A, S> {
    session: RwSignal<Session>,
    api: A,
    storage: S,
}

impl<A, S> AuthStore<A, S>
where
    A: AuthApi,
    S: KeyValueStorage,
{
    /// Create a store whose token is seeded from storage.
    ///
    /// The user identity is not persisted and starts out `None`.
    pub fn restore(api: A, storage: S) -> Self {
        let token = storage.get_item(ACCESS_TOKEN_KEY).unwrap_or_default();
        let session = RwSignal::new(Session { token, user: None });
        Self { session, api, storage }
    }

    /// Reactive handle to the session.
    pub fn session(&self) -> RwSignal<Session> {
        self.session
    }

    /// Untracked snapshot of the session.
    pub fn snapshot(&self) -> Session {
        self.session.get_untracked()
    }

    pub fn token(&self) -> String {
        self.session.with_untracked(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.session.with_untracked(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with_untracked(Session::is_authenticated)
    }

    /// Exchange credentials at `/auth/login` and store the resulting session.
    ///
    /// # Errors
    ///
    /// Returns the request failure unchanged; session and storage are left
    /// as they were.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        self.authenticate(AuthAction::Login, username, password).await
    }

    /// Create an account at `/auth/register` and store the resulting session.
    ///
    /// # Errors
    ///
    /// Returns the request failure unchanged; session and storage are left
    /// as they were.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        self.authenticate(AuthAction::Register, username, password).await
    }

    /// Drop the session and its persisted token. Makes no network call.
    pub fn logout(&self) {
        self.session.set(Session::default());
        self.storage.remove_item(ACCESS_TOKEN_KEY);
        leptos::logging::log!("auth: logged out");
    }

    async fn authenticate(&self, action: AuthAction, username: &str, password: &str) -> Result<(), ApiError> {
        let credentials = Credentials::new(username, password);
        let resp = match self.api.authenticate(action, &credentials).await {
            Ok(resp) => resp,
            Err(e) => {
                leptos::logging::warn!("auth: {} failed: {e}", action.label());
                return Err(e);
            }
        };

        let session = Session::from_token_response(resp);
        self.storage.set_item(ACCESS_TOKEN_KEY, &session.token);
        if let Some(user) = &session.user {
            leptos::logging::log!("auth: {} ok user={} id={}", action.label(), user.username, user.id);
        }
        self.session.set(session);
        Ok(())
    }
}
