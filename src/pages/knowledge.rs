//! Knowledge-base route placeholder rendered inside the layout shell.

use leptos::prelude::*;

#[component]
pub fn KnowledgePage() -> impl IntoView {
    view! {
        <section class="page page--knowledge">
            <h2>"Knowledge"</h2>
            <p class="page__hint">"Documents available to the assistant."</p>
        </section>
    }
}
