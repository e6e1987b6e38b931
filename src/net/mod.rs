//! Networking modules for the gateway's REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the auth calls and defines the error surface, and `types`
//! defines the request/response schema shared with the auth service.

pub mod api;
pub mod types;
