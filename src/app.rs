//! Root application component with routing and context providers.

#[cfg(all(test, feature = "ssr"))]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::config::ApiConfig;
use crate::net::api::HttpAuthApi;
use crate::pages::{chat::ChatPage, knowledge::KnowledgePage, layout::MainLayout, login::LoginPage};
use crate::state::auth::{AppAuthStore, AuthStore};
use crate::util::auth::install_route_guard;
use crate::util::storage::{BrowserStorage, SharedStorage};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Uses an auth store already in context when a host provides one, otherwise
/// restores it from `localStorage`; then sets up client-side routing behind
/// the navigation guard.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = use_context::<AppAuthStore>().unwrap_or_else(|| {
        let storage: SharedStorage = Arc::new(BrowserStorage);
        AuthStore::restore(HttpAuthApi::new(ApiConfig::from_env()), storage)
    });
    provide_context(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/knowledge-client.css"/>
        <Title text="Knowledge Assistant"/>

        <Router>
            <RouteGuard/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <ParentRoute path=StaticSegment("") view=MainLayout>
                    <Route path=StaticSegment("") view=LayoutIndex/>
                    <Route path=StaticSegment("chat") view=ChatPage/>
                    <Route path=StaticSegment("knowledge") view=KnowledgePage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}

/// Applies the navigation guard to every location change.
#[component]
fn RouteGuard() -> impl IntoView {
    let auth = expect_context::<AppAuthStore>();
    let location = use_location();
    let navigate = use_navigate();
    install_route_guard(move || location.pathname.get(), auth.session(), navigate);
}

/// Index of the layout shell; the guard replaces `/` with `/chat`.
#[component]
fn LayoutIndex() -> impl IntoView {}
