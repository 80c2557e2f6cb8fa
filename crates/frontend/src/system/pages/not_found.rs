//! Catch-all for unmatched paths.

use leptos::prelude::*;

use crate::routes::table::use_navigator;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let navigator = use_navigator();
    view! {
        <div class="status-page">
            <h1 class="status-code">"404"</h1>
            <p class="status-message">"Page not found."</p>
            <button class="btn" on:click=move |_| navigator.push("/")>
                "Back to dashboard"
            </button>
        </div>
    }
}
