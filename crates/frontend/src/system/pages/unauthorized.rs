//! Shown when the guard denies a permission-protected route.

use leptos::prelude::*;

use crate::routes::table::use_navigator;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    let navigator = use_navigator();
    view! {
        <div class="status-page">
            <h1 class="status-code">"403"</h1>
            <p class="status-message">"You do not have permission to view this page."</p>
            <button class="btn" on:click=move |_| navigator.push("/")>
                "Back to dashboard"
            </button>
        </div>
    }
}
