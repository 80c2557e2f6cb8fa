//! Application root: context wiring, shell layout, router outlet.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::routes::table::{Navigator, RouterView};
use crate::routes::Router;
use crate::shared::api::ApiClient;
use crate::shared::notify::{Notifier, ToastStack};
use crate::shared::theme::{ThemeControls, ThemeProvider};
use crate::system::auth::SessionStore;

#[component]
pub fn App() -> impl IntoView {
    let router = Router::new();
    let session = SessionStore::new();
    let client = ApiClient::new();
    let notifier = Notifier::new();
    let navigator = Navigator::new(router, session, client.clone());

    provide_context(router);
    provide_context(session);
    provide_context(client);
    provide_context(notifier);
    provide_context(navigator.clone());

    navigator.listen_popstate();
    // Guard the URL the app was opened on before rendering settles.
    navigator.resolve_current();

    view! {
        <ThemeProvider>
            <AppShell/>
        </ThemeProvider>
    }
}

#[component]
fn AppShell() -> impl IntoView {
    let session = use_context::<SessionStore>().expect("SessionStore not provided");
    let navigator = use_context::<Navigator>().expect("Navigator not provided");
    let authenticated = session.authenticated();

    let nav_dashboard = navigator.clone();
    let nav_products = navigator.clone();
    let nav_news = navigator.clone();
    let logout_nav = navigator.clone();

    let user_name = move || {
        session
            .user
            .with(|u| u.as_ref().map(|u| u.name.clone()))
            .unwrap_or_default()
    };

    let logout = move |_| {
        let navigator = logout_nav.clone();
        spawn_local(async move {
            navigator.session.logout(&navigator.client).await;
            navigator.push("/login");
        });
    };

    view! {
        <div class="app-shell">
            <header class="app-header">
                <span class="app-brand">"Helix Pharma Admin"</span>
                <Show when=move || authenticated.get()>
                    {
                        let nav_dashboard = nav_dashboard.clone();
                        let nav_products = nav_products.clone();
                        let nav_news = nav_news.clone();
                        view! {
                            <nav class="app-nav">
                                <a class="nav-link" on:click=move |_| nav_dashboard.push("/")>
                                    "Dashboard"
                                </a>
                                <a
                                    class="nav-link"
                                    on:click=move |_| nav_products.push("/content/products")
                                >
                                    "Products"
                                </a>
                                <a class="nav-link" on:click=move |_| nav_news.push("/content/news")>
                                    "News"
                                </a>
                            </nav>
                        }
                    }
                </Show>
                <div class="app-header-right">
                    <ThemeControls/>
                    <Show when=move || authenticated.get()>
                        {
                            let logout = logout.clone();
                            view! {
                                <span class="app-user">{user_name}</span>
                                <button class="btn btn-ghost" on:click=logout>
                                    "Sign out"
                                </button>
                            }
                        }
                    </Show>
                </div>
            </header>
            <main class="app-main">
                <RouterView/>
            </main>
            <ToastStack/>
        </div>
    }
}
