//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is injected through Leptos context rather than held in globals so
//! tests can build isolated instances.

pub mod auth;
