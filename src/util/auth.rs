//! Reactive wiring for the navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route goes through the same guard, so the effect is installed once
//! under the router rather than per page.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::router::{self, GuardDecision, Landing};
use crate::state::auth::Session;

/// Whether the guard admits the authenticated layout shell. Every route
/// nested under `/` is guarded the same way, so the decision for the shell's
/// own path covers its children.
pub fn layout_allowed(session: &Session) -> bool {
    router::guard(&router::resolve("/"), None, session) == GuardDecision::Proceed
}

/// Path to replace the current location with, if guarding or redirects
/// move `pathname` somewhere else. Unmatched paths are left to the router
/// fallback once the guard has passed.
pub fn guard_redirect_target(pathname: &str, session: &Session) -> Option<String> {
    match router::navigate(pathname, session) {
        Landing::Render(m) if m.path != router::normalize_path(pathname) => Some(m.path),
        Landing::Render(_) | Landing::NotFound(_) => None,
    }
}

/// Re-run the guard whenever the location or the session changes.
///
/// Rendering of protected views is gated synchronously by `MainLayout`;
/// this effect moves the address bar to the landing route (`/` to `/chat`,
/// unmatched paths to `/login` when signed out).
pub fn install_route_guard<P, F>(pathname: P, session: RwSignal<Session>, navigate: F)
where
    P: Fn() -> String + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let path = pathname();
        let target = session.with(|s| guard_redirect_target(&path, s));
        if let Some(target) = target {
            leptos::logging::log!("route guard: {path} -> {target}");
            navigate(
                &target,
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });
}
