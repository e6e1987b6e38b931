//! Authenticated layout shell wrapping the chat and knowledge routes.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use leptos::prelude::*;
use leptos_router::components::{A, Outlet, Redirect};

use crate::router::{self, RouteName};
use crate::state::auth::{AppAuthStore, Session};
use crate::util::auth::layout_allowed;

/// Header label for the signed-in user. Sessions restored from storage carry
/// no identity, so they get a generic label.
fn display_name(session: &Session) -> String {
    session
        .user
        .as_ref()
        .map_or_else(|| "Signed in".to_owned(), |u| u.username.clone())
}

/// Layout shell with navigation, current user, logout, and the child route.
///
/// The guard decision is evaluated while rendering, so neither the shell nor
/// the nested view is produced without a token; the fallback redirects to
/// `/login` instead. Logging out flips the same condition.
#[component]
pub fn MainLayout() -> impl IntoView {
    let auth = expect_context::<AppAuthStore>();
    let session = auth.session();
    let login_path = router::path_for(RouteName::Login).unwrap_or_default();
    let on_logout = move |_: leptos::ev::MouseEvent| auth.logout();

    view! {
        <Show
            when=move || session.with(layout_allowed)
            fallback=move || view! { <Redirect path=login_path.clone()/> }
        >
            <div class="layout">
                <header class="layout__header">
                    <span class="layout__brand">"Knowledge Assistant"</span>
                    <nav class="layout__nav">
                        <A href="/chat">"Chat"</A>
                        <A href="/knowledge">"Knowledge"</A>
                    </nav>
                    <span class="layout__user">{move || session.with(display_name)}</span>
                    <button class="layout__logout" type="button" on:click=on_logout.clone()>
                        "Log out"
                    </button>
                </header>
                <main class="layout__main">
                    <Outlet/>
                </main>
            </div>
        </Show>
    }
}
