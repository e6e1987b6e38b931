use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use super::*;
use crate::util::storage::MemoryStorage;

// =============================================================
// Helpers
// =============================================================

type Reply = Result<TokenResponse, ApiError>;

/// Replies to each call with the next queued response and records requests.
#[derive(Clone, Default)]
struct ScriptedApi {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<Mutex<Vec<(AuthAction, Credentials)>>>,
}

impl ScriptedApi {
    fn replying(replies: impl IntoIterator<Item = Reply>) -> Self {
        let api = Self::default();
        api.replies.lock().unwrap().extend(replies);
        api
    }

    fn calls(&self) -> Vec<(AuthAction, Credentials)> {
        self.calls.lock().unwrap().clone()
    }
}

impl AuthApi for ScriptedApi {
    async fn authenticate(&self, action: AuthAction, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        self.calls.lock().unwrap().push((action, credentials.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected auth call")
    }
}

/// Each call waits on the next queued channel, so tests control resolve order.
#[derive(Clone, Default)]
struct GatedApi {
    gates: Arc<Mutex<VecDeque<oneshot::Receiver<Reply>>>>,
}

impl AuthApi for GatedApi {
    async fn authenticate(&self, _action: AuthAction, _credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        let gate = self.gates.lock().unwrap().pop_front().expect("no gate queued");
        gate.await.expect("gate dropped")
    }
}

fn token_response(token: &str, username: &str, user_id: i64) -> TokenResponse {
    TokenResponse {
        access_token: token.to_owned(),
        token_type: "bearer".to_owned(),
        user_id,
        username: username.to_owned(),
    }
}

fn unauthorized() -> ApiError {
    ApiError::Status {
        status: 401,
        body: r#"{"detail":"Incorrect username or password"}"#.to_owned(),
    }
}

// =============================================================
// Session
// =============================================================

#[test]
fn session_default_is_unauthenticated() {
    let session = Session::default();
    assert!(!session.is_authenticated());
    assert!(session.user.is_none());
}

// =============================================================
// restore
// =============================================================

#[test]
fn restore_without_stored_token_starts_empty() {
    let store = AuthStore::restore(ScriptedApi::default(), MemoryStorage::new());
    assert_eq!(store.token(), "");
    assert!(store.user().is_none());
    assert!(!store.is_authenticated());
}

#[test]
fn restore_seeds_token_but_not_user() {
    let storage = MemoryStorage::with_item(ACCESS_TOKEN_KEY, "persisted");
    let store = AuthStore::restore(ScriptedApi::default(), storage);
    assert_eq!(store.token(), "persisted");
    assert!(store.is_authenticated());
    assert!(store.user().is_none());
}

// =============================================================
// login / register
// =============================================================

#[tokio::test]
async fn login_sets_session_and_persists_token() {
    let api = ScriptedApi::replying([Ok(token_response("tok1", "alice", 7))]);
    let storage = MemoryStorage::new();
    let store = AuthStore::restore(api.clone(), storage.clone());

    store.login("alice", "pw").await.unwrap();

    assert_eq!(store.token(), "tok1");
    assert_eq!(store.user(), Some(SessionUser { username: "alice".to_owned(), id: 7 }));
    assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).as_deref(), Some("tok1"));
    assert_eq!(api.calls(), vec![(AuthAction::Login, Credentials::new("alice", "pw"))]);
}

#[tokio::test]
async fn login_uses_username_from_response() {
    let api = ScriptedApi::replying([Ok(token_response("tok1", "Alice", 7))]);
    let store = AuthStore::restore(api, MemoryStorage::new());

    store.login("alice", "pw").await.unwrap();

    assert_eq!(store.user().map(|u| u.username).as_deref(), Some("Alice"));
}

#[tokio::test]
async fn login_passes_credentials_through_unvalidated() {
    let api = ScriptedApi::replying([Err(unauthorized())]);
    let store = AuthStore::restore(api.clone(), MemoryStorage::new());

    let _ = store.login("  ", "").await;

    assert_eq!(api.calls(), vec![(AuthAction::Login, Credentials::new("  ", ""))]);
}

#[tokio::test]
async fn failed_login_surfaces_error_and_keeps_prior_state() {
    let api = ScriptedApi::replying([Ok(token_response("tok1", "alice", 7)), Err(unauthorized())]);
    let storage = MemoryStorage::new();
    let store = AuthStore::restore(api, storage.clone());
    store.login("alice", "pw").await.unwrap();
    let before = store.snapshot();

    let err = store.login("alice", "wrong").await.unwrap_err();

    assert_eq!(err, unauthorized());
    assert_eq!(store.snapshot(), before);
    assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).as_deref(), Some("tok1"));
}

#[tokio::test]
async fn failed_login_from_restored_session_keeps_restored_token() {
    let api = ScriptedApi::replying([Err(ApiError::Network("offline".to_owned()))]);
    let storage = MemoryStorage::with_item(ACCESS_TOKEN_KEY, "persisted");
    let store = AuthStore::restore(api, storage.clone());

    let err = store.login("alice", "pw").await.unwrap_err();

    assert_eq!(err, ApiError::Network("offline".to_owned()));
    assert_eq!(store.snapshot(), Session { token: "persisted".to_owned(), user: None });
    assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).as_deref(), Some("persisted"));
}

#[tokio::test]
async fn register_mirrors_login_against_register_endpoint() {
    let api = ScriptedApi::replying([Ok(token_response("tok9", "bob", 12))]);
    let storage = MemoryStorage::new();
    let store = AuthStore::restore(api.clone(), storage.clone());

    store.register("bob", "secret").await.unwrap();

    assert_eq!(store.token(), "tok9");
    assert_eq!(store.user(), Some(SessionUser { username: "bob".to_owned(), id: 12 }));
    assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).as_deref(), Some("tok9"));
    assert_eq!(api.calls(), vec![(AuthAction::Register, Credentials::new("bob", "secret"))]);
}

#[tokio::test]
async fn failed_register_leaves_session_empty() {
    let conflict = ApiError::Status {
        status: 400,
        body: r#"{"detail":"Username already registered"}"#.to_owned(),
    };
    let api = ScriptedApi::replying([Err(conflict.clone())]);
    let storage = MemoryStorage::new();
    let store = AuthStore::restore(api, storage.clone());

    assert_eq!(store.register("bob", "secret").await, Err(conflict));
    assert_eq!(store.snapshot(), Session::default());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn overlapping_logins_last_resolved_wins() {
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    let api = GatedApi::default();
    api.gates.lock().unwrap().extend([first_rx, second_rx]);
    let storage = MemoryStorage::new();
    let store = AuthStore::restore(api, storage.clone());

    let release = async {
        second_tx.send(Ok(token_response("tok2", "bob", 2))).unwrap();
        while store.token() != "tok2" {
            tokio::task::yield_now().await;
        }
        first_tx.send(Ok(token_response("tok1", "alice", 1))).unwrap();
    };
    let (first, second, ()) = tokio::join!(store.login("alice", "pw"), store.login("bob", "pw"), release);

    assert!(first.is_ok() && second.is_ok());
    assert_eq!(store.token(), "tok1");
    assert_eq!(store.user().map(|u| u.id), Some(1));
    assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).as_deref(), Some("tok1"));
}

// =============================================================
// logout
// =============================================================

#[tokio::test]
async fn logout_after_login_clears_session_and_storage() {
    let api = ScriptedApi::replying([Ok(token_response("tok1", "alice", 7))]);
    let storage = MemoryStorage::new();
    let store = AuthStore::restore(api.clone(), storage.clone());
    store.login("alice", "pw").await.unwrap();

    store.logout();

    assert_eq!(store.snapshot(), Session::default());
    assert_eq!(storage.get_item(ACCESS_TOKEN_KEY), None);
    assert_eq!(api.calls().len(), 1);
}

#[test]
fn logout_when_already_logged_out_is_harmless() {
    let storage = MemoryStorage::with_item("theme", "dark");
    let store = AuthStore::restore(ScriptedApi::default(), storage.clone());

    store.logout();

    assert!(!store.is_authenticated());
    assert_eq!(storage.get_item("theme").as_deref(), Some("dark"));
}

#[test]
fn session_signal_observes_logout() {
    let storage = MemoryStorage::with_item(ACCESS_TOKEN_KEY, "persisted");
    let store = AuthStore::restore(ScriptedApi::default(), storage);
    let session = store.session();
    assert!(session.get_untracked().is_authenticated());

    store.logout();

    assert!(!session.get_untracked().is_authenticated());
}
