//! Landing page after login.

use leptos::prelude::*;

use crate::routes::table::use_navigator;
use crate::system::access::catalog;
use crate::system::auth::use_session;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let navigator = use_navigator();

    let greeting = move || {
        session
            .user
            .with(|u| u.as_ref().map(|u| u.name.clone()))
            .unwrap_or_default()
    };

    let can_products = session.has_permission(catalog::cms::products::VIEW_ANY);
    let can_news = session.has_permission(catalog::cms::news::VIEW_ANY);

    let nav_products = {
        let navigator = navigator.clone();
        move |_| navigator.push("/content/products")
    };
    let nav_news = {
        let navigator = navigator.clone();
        move |_| navigator.push("/content/news")
    };

    view! {
        <div class="dashboard-page">
            <h1 class="page-title">{move || format!("Welcome, {}", greeting())}</h1>
            <div class="dashboard-cards">
                <Show when=move || can_products>
                    <button class="dashboard-card" on:click=nav_products.clone()>
                        <span class="card-title">"Products"</span>
                        <span class="card-hint">"Manage the product catalog"</span>
                    </button>
                </Show>
                <Show when=move || can_news>
                    <button class="dashboard-card" on:click=nav_news.clone()>
                        <span class="card-title">"News"</span>
                        <span class="card-hint">"Publish company updates"</span>
                    </button>
                </Show>
            </div>
        </div>
    }
}
