//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration. Access control lives in the
//! router guard, so pages assume they are only mounted when allowed.

pub mod chat;
pub mod knowledge;
pub mod layout;
pub mod login;
