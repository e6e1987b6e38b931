//! Chat route placeholder rendered inside the layout shell.

use leptos::prelude::*;

#[component]
pub fn ChatPage() -> impl IntoView {
    view! {
        <section class="page page--chat">
            <h2>"Chat"</h2>
            <p class="page__hint">"Ask questions about your knowledge base."</p>
        </section>
    }
}
