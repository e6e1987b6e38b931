//! Login page supporting sign-in and account registration.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

#[cfg(any(test, feature = "hydrate"))]
use crate::net::api::ApiError;
use crate::net::types::AuthAction;
use crate::state::auth::AppAuthStore;

/// Blank fields are rejected; values are forwarded exactly as typed.
fn validate_credentials_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err("Enter both username and password.");
    }
    Ok((username.to_owned(), password.to_owned()))
}

fn toggle_mode(mode: AuthAction) -> AuthAction {
    match mode {
        AuthAction::Login => AuthAction::Register,
        AuthAction::Register => AuthAction::Login,
    }
}

fn submit_label(mode: AuthAction) -> &'static str {
    match mode {
        AuthAction::Login => "Sign In",
        AuthAction::Register => "Create Account",
    }
}

fn toggle_label(mode: AuthAction) -> &'static str {
    match mode {
        AuthAction::Login => "Need an account? Register",
        AuthAction::Register => "Already registered? Sign in",
    }
}

fn pending_message(mode: AuthAction) -> &'static str {
    match mode {
        AuthAction::Login => "Signing in...",
        AuthAction::Register => "Creating account...",
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn failure_message(mode: AuthAction, err: &ApiError) -> String {
    let prefix = match mode {
        AuthAction::Login => "Sign-in failed",
        AuthAction::Register => "Registration failed",
    };
    format!("{prefix}: {}", err.user_message())
}

/// Login page: username/password form that signs in or registers, then
/// navigates to `/` and lets the guard pick the landing route.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AppAuthStore>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let mode = RwSignal::new(AuthAction::Login);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (user, pass) = match validate_credentials_input(&username.get(), &password.get()) {
            Ok(values) => values,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        let action = mode.get();
        busy.set(true);
        info.set(pending_message(action).to_owned());

        #[cfg(feature = "hydrate")]
        {
            let auth = auth.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = match action {
                    AuthAction::Login => auth.login(&user, &pass).await,
                    AuthAction::Register => auth.register(&user, &pass).await,
                };
                match result {
                    Ok(()) => {
                        password.set(String::new());
                        info.set(String::new());
                        navigate("/", NavigateOptions::default());
                    }
                    Err(e) => info.set(failure_message(action, &e)),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&auth, &navigate, user, pass);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Knowledge Assistant"</h1>
                <p class="login-card__subtitle">{move || submit_label(mode.get())}</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || submit_label(mode.get())}
                    </button>
                </form>
                <button
                    class="login-toggle"
                    type="button"
                    disabled=move || busy.get()
                    on:click=move |_| {
                        mode.update(|m| *m = toggle_mode(*m));
                        info.set(String::new());
                    }
                >
                    {move || toggle_label(mode.get())}
                </button>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
