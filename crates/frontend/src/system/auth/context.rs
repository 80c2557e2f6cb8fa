//! Session state shared through Leptos context.
//!
//! `SessionStore` is the single owner of the current user, the token, and
//! the post-login return URL. Signals are `Copy`, so the store can be passed
//! into closures freely. The async navigation resolution lives here because
//! it needs to mutate session state (stale token cleanup) before the pure
//! guard decision runs.

use leptos::prelude::*;

use contracts::system::auth::{LoginCredentials, User};

use super::api;
use super::guard::{decide, GuardDecision, RouteMeta, SessionSnapshot};
use super::storage;
use crate::shared::api::{ApiClient, ApiError, ApiErrorKind};
use crate::system::access::catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Clone, Copy)]
pub struct SessionStore {
    pub user: RwSignal<Option<User>>,
    pub token: RwSignal<Option<String>>,
    pub status: RwSignal<AuthStatus>,
    pub error: RwSignal<Option<String>>,
    return_url: RwSignal<Option<String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            user: RwSignal::new(None),
            token: RwSignal::new(storage::get_token()),
            status: RwSignal::new(AuthStatus::Idle),
            error: RwSignal::new(None),
            return_url: RwSignal::new(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.with_untracked(|u| u.is_some())
    }

    /// Reactive variant for views.
    pub fn authenticated(&self) -> Signal<bool> {
        let user = self.user;
        Signal::derive(move || user.with(|u| u.is_some()))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.user.with_untracked(|user| match user {
            Some(user) => SessionSnapshot {
                authenticated: true,
                is_super_user: user.is_super_user
                    || user
                        .effective_permissions
                        .iter()
                        .any(|p| p == catalog::SUPER_USER),
                permissions: user.effective_permissions.iter().cloned().collect(),
            },
            None => SessionSnapshot::default(),
        })
    }

    /// Bypass-aware single-permission check for UI visibility.
    pub fn has_permission(&self, key: &str) -> bool {
        let snap = self.snapshot();
        snap.is_super_user || snap.permissions.contains(key)
    }

    pub fn has_role(&self, role_key: &str) -> bool {
        if self.snapshot().is_super_user {
            return true;
        }
        self.user.with_untracked(|user| {
            user.as_ref()
                .map(|u| u.roles.iter().any(|r| r.key == role_key))
                .unwrap_or(false)
        })
    }

    fn apply_user(&self, user: User) {
        self.user.set(Some(user));
        self.status.set(AuthStatus::Success);
        self.error.set(None);
    }

    /// Drops the session entirely: user, token, persisted token.
    fn clear_session(&self) {
        self.user.set(None);
        self.token.set(None);
        storage::clear_token();
    }

    pub fn clear_transient_flags(&self) {
        self.status.set(AuthStatus::Idle);
        self.error.set(None);
    }

    pub fn set_return_url(&self, url: impl Into<String>) {
        self.return_url.set(Some(url.into()));
    }

    pub fn take_return_url(&self) -> Option<String> {
        self.return_url.try_update(Option::take).flatten()
    }

    pub async fn login(
        &self,
        client: &ApiClient,
        credentials: &LoginCredentials,
    ) -> Result<(), ApiError> {
        self.status.set(AuthStatus::Loading);
        self.error.set(None);
        match api::login(client, credentials).await {
            Ok(envelope) => {
                let auth = envelope.data;
                storage::save_token(&auth.access_token);
                self.token.set(Some(auth.access_token));
                self.apply_user(auth.user);
                Ok(())
            }
            Err(err) => {
                self.status.set(AuthStatus::Error);
                self.error.set(Some(err.message.clone()));
                Err(err)
            }
        }
    }

    /// Fetches the current user for the stored token. Any failure invalidates
    /// the whole session so a dead token cannot keep looping the guard.
    pub async fn fetch_user(&self, client: &ApiClient) -> Result<(), ApiError> {
        self.status.set(AuthStatus::Loading);
        match api::fetch_me(client).await {
            Ok(envelope) => {
                self.apply_user(envelope.data);
                Ok(())
            }
            Err(err) => {
                self.clear_session();
                self.status.set(AuthStatus::Error);
                self.error.set(Some(err.message.clone()));
                Err(err)
            }
        }
    }

    /// Logs out locally regardless of whether the server call succeeds.
    pub async fn logout(&self, client: &ApiClient) {
        let result = api::logout(client).await;
        if let Err(err) = result {
            if err.kind() != ApiErrorKind::Auth {
                log::warn!("logout request failed: {err}");
            }
        }
        self.clear_session();
        self.clear_transient_flags();
    }

    /// Guard entry point for a navigation to `requested` with `meta`.
    ///
    /// Blocks on a user fetch when a token exists but no user is loaded yet
    /// (page reload with a persisted token), then evaluates the pure rules.
    /// A `RedirectLogin` decision records the return URL as a side effect.
    pub async fn resolve_navigation(
        &self,
        client: &ApiClient,
        meta: &RouteMeta,
        requested: &str,
    ) -> GuardDecision {
        let has_token = self.token.with_untracked(|t| t.is_some());
        if has_token && !self.is_authenticated() {
            // Failure clears the token; the snapshot below sees a guest.
            let _ = self.fetch_user(client).await;
        }
        self.clear_transient_flags();
        let decision = decide(meta, &self.snapshot(), requested);
        if let GuardDecision::RedirectLogin { return_to } = &decision {
            self.set_return_url(return_to.clone());
        }
        decision
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_session() -> SessionStore {
    use_context::<SessionStore>().expect("SessionStore not provided")
}
