//! Toast notifications.
//!
//! A `Notifier` lives in context; any component or engine can push a toast.
//! Server-provided notifications (the envelope's `notification` object) take
//! precedence over locally composed messages so backend wording wins.

#[cfg(target_arch = "wasm32")]
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use contracts::api::{Notification, NotificationKind};

use crate::shared::api::ApiError;

/// How long a toast stays on screen.
#[cfg(target_arch = "wasm32")]
const DISMISS_AFTER_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct Notifier {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn toasts(&self) -> ReadSignal<Vec<Toast>> {
        self.toasts.read_only()
    }

    pub fn push(&self, kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) {
        let id = self.next_id.try_update_value(|n| {
            *n += 1;
            *n
        });
        let Some(id) = id else { return };
        let toast = Toast {
            id,
            kind,
            title: title.into(),
            message: message.into(),
        };
        self.toasts.update(|list| list.push(toast));
        self.schedule_dismiss(id);
    }

    // Timers only exist in the browser; elsewhere toasts stay until
    // dismissed explicitly.
    #[cfg(target_arch = "wasm32")]
    fn schedule_dismiss(&self, id: u64) {
        let toasts = self.toasts;
        Timeout::new(DISMISS_AFTER_MS, move || {
            let _ = toasts.try_update(|list| list.retain(|t| t.id != id));
        })
        .forget();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_dismiss(&self, _id: u64) {}

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationKind::Success, "Success", message);
    }

    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) {
        self.push(NotificationKind::Info, title, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(NotificationKind::Warning, "Warning", message);
    }

    pub fn error_msg(&self, message: impl Into<String>) {
        self.push(NotificationKind::Error, "Error", message);
    }

    fn push_server(&self, n: &Notification) {
        let title = n
            .title
            .clone()
            .unwrap_or_else(|| default_title(n.kind).to_string());
        self.push(n.kind, title, n.message.clone());
    }

    /// Shows the server's notification when present, otherwise a success
    /// toast with the fallback message.
    pub fn notify(&self, fallback: &str, notification: Option<&Notification>) {
        match notification {
            Some(n) => self.push_server(n),
            None => self.success(fallback),
        }
    }

    /// One toast per failed request. Validation errors are rendered inline
    /// by forms, so the toast only carries the summary message.
    pub fn api_error(&self, err: &ApiError, fallback_title: &str) {
        match &err.notification {
            Some(n) => self.push_server(n),
            None => self.push(NotificationKind::Error, fallback_title, err.message.clone()),
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier not provided")
}

fn default_title(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "Success",
        NotificationKind::Info => "Info",
        NotificationKind::Warning => "Warning",
        NotificationKind::Error => "Error",
    }
}

fn kind_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "toast toast-success",
        NotificationKind::Info => "toast toast-info",
        NotificationKind::Warning => "toast toast-warning",
        NotificationKind::Error => "toast toast-error",
    }
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let notifier = use_notifier();
    let toasts = notifier.toasts();
    view! {
        <div class="toast-stack">
            {move || {
                toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        view! {
                            <div class=kind_class(toast.kind)>
                                <div class="toast-title">{toast.title.clone()}</div>
                                <div class="toast-message">{toast.message.clone()}</div>
                                <button
                                    class="toast-close"
                                    on:click=move |_| notifier.dismiss(id)
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
