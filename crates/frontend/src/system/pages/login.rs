//! Login page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use contracts::system::auth::LoginCredentials;

use crate::routes::table::use_navigator;
use crate::system::auth::{use_session, AuthStatus};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let navigator = use_navigator();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let status = session.status;
    let error = session.error;
    let busy = move || status.get() == AuthStatus::Loading;

    let submit = move || {
        if busy() {
            return;
        }
        let credentials = LoginCredentials {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            session.error.set(Some("Email and password are required.".to_string()));
            return;
        }
        let navigator = navigator.clone();
        spawn_local(async move {
            if session.login(&navigator.client, &credentials).await.is_ok() {
                // Post-login target: remembered return URL, then the
                // `redirect` query parameter, then the dashboard.
                let target = session
                    .take_return_url()
                    .or_else(|| {
                        navigator
                            .router
                            .location
                            .get_untracked()
                            .query
                            .get("redirect")
                            .cloned()
                    })
                    .unwrap_or_else(|| "/".to_string());
                navigator.push(&target);
            }
        });
    };

    view! {
        <div class="login-page">
            <form
                class="login-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                <h1 class="login-title">"Sign in"</h1>
                <Show when=move || error.get().is_some()>
                    <div class="form-error">{move || error.get().unwrap_or_default()}</div>
                </Show>
                <label class="form-label">
                    "Email"
                    <input
                        type="email"
                        class="form-input"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-label">
                    "Password"
                    <input
                        type="password"
                        class="form-input"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="btn btn-primary" disabled=busy>
                    {move || if busy() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
