//! # knowledge-client
//!
//! Leptos + WASM frontend shell for the knowledge-base chat application.
//!
//! This crate contains the route table and navigation guard, the auth store
//! that owns the browser session, the REST client for the gateway's auth
//! endpoints, and the route-level pages that drive them.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;
pub mod util;

/// Browser entry point: hydrates the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
