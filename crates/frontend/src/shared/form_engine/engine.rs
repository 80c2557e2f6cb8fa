//! Reactive form shell: fetch, edit, submit.
//!
//! One `ResourceForm` instance backs a create or edit view for a single
//! resource. Submissions are fenced the same way table fetches are, and a
//! `submitting` flag makes double-clicking the save button a no-op while a
//! request is in flight.

use std::collections::HashMap;
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

use contracts::api::ApiEnvelope;

use super::record::{self, FormRecord};
use crate::routes::{HistoryMode, Router};
use crate::shared::api::{multipart, ApiClient, ApiError, ApiErrorKind};
use crate::shared::notify::Notifier;

/// Hook applied to the working record just before submission, e.g. deriving
/// a slug from the name.
pub type BeforeSubmit = Arc<dyn Fn(FormRecord) -> FormRecord + Send + Sync>;

#[derive(Clone)]
pub struct FormConfig {
    /// Human-readable singular name used in notifications.
    pub resource_name: String,
    /// API collection path, e.g. `/products`.
    pub endpoint: String,
    /// Route of the list view, used after create and on failed fetches.
    pub index_path: String,
    /// Field layout for the create form.
    pub initial: FormRecord,
    pub before_submit: Option<BeforeSubmit>,
}

impl FormConfig {
    pub fn new(
        resource_name: impl Into<String>,
        endpoint: impl Into<String>,
        index_path: impl Into<String>,
        initial: FormRecord,
    ) -> Self {
        Self {
            resource_name: resource_name.into(),
            endpoint: endpoint.into(),
            index_path: index_path.into(),
            initial,
            before_submit: None,
        }
    }

    pub fn before_submit(mut self, hook: BeforeSubmit) -> Self {
        self.before_submit = Some(hook);
        self
    }
}

#[derive(Clone)]
pub struct ResourceForm {
    config: Arc<FormConfig>,
    /// `None` for a create form.
    resource_id: Option<String>,
    pub pristine: RwSignal<FormRecord>,
    pub working: RwSignal<FormRecord>,
    /// Files picked but not yet uploaded, keyed by field. Local storage
    /// because `File` handles are not thread-safe.
    files: RwSignal<HashMap<String, web_sys::File>, LocalStorage>,
    pub errors: RwSignal<HashMap<String, Vec<String>>>,
    pub loading: RwSignal<bool>,
    pub submitting: RwSignal<bool>,
    seq: StoredValue<u64>,
    client: ApiClient,
    router: Router,
    notifier: Notifier,
}

impl ResourceForm {
    pub fn new(
        config: FormConfig,
        resource_id: Option<String>,
        client: ApiClient,
        router: Router,
        notifier: Notifier,
    ) -> Self {
        let initial = config.initial.clone();
        Self {
            config: Arc::new(config),
            resource_id,
            pristine: RwSignal::new(initial.clone()),
            working: RwSignal::new(initial),
            files: RwSignal::new_local(HashMap::new()),
            errors: RwSignal::new(HashMap::new()),
            loading: RwSignal::new(false),
            submitting: RwSignal::new(false),
            seq: StoredValue::new(0),
            client,
            router,
            notifier,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.resource_id.is_some()
    }

    fn item_path(&self) -> String {
        match &self.resource_id {
            Some(id) => format!("{}/{}", self.config.endpoint, id),
            None => self.config.endpoint.clone(),
        }
    }

    /// Loads the resource on edit forms and registers cleanup. Create forms
    /// start from the configured initial record.
    pub fn init(&self) {
        if self.is_edit() {
            self.fetch();
        }
        let seq = self.seq;
        on_cleanup(move || {
            let _ = seq.try_update_value(|n| *n += 1);
        });
    }

    fn fetch(&self) {
        let Some(token) = self.next_token() else { return };
        self.loading.set(true);
        let this = self.clone();
        spawn_local(async move {
            let result = this
                .client
                .get::<ApiEnvelope<FormRecord>>(&this.item_path(), &[])
                .await;
            if this.seq.try_get_value() != Some(token) {
                return;
            }
            match result {
                Ok(envelope) => {
                    this.set_pristine(envelope.data);
                }
                Err(err) => {
                    this.notifier.api_error(
                        &err,
                        &format!("Failed to load {}", this.config.resource_name),
                    );
                    if err.kind() == ApiErrorKind::NotFound {
                        this.router
                            .commit(&this.config.index_path, HistoryMode::Replace);
                    }
                }
            }
            let _ = this.loading.try_set(false);
        });
    }

    /// Resets both records to the given snapshot and drops staged files and
    /// stale validation errors. The form is clean afterwards.
    pub fn set_pristine(&self, snapshot: FormRecord) {
        let _ = self.pristine.try_set(snapshot.clone());
        let _ = self.working.try_set(snapshot);
        let _ = self.files.try_update(HashMap::clear);
        let _ = self.errors.try_update(HashMap::clear);
    }

    pub fn field(&self, key: &str) -> Value {
        self.working
            .with(|w| w.get(key).cloned().unwrap_or(Value::Null))
    }

    pub fn field_string(&self, key: &str) -> String {
        match self.field(key) {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    pub fn field_bool(&self, key: &str) -> bool {
        self.field(key).as_bool().unwrap_or(false)
    }

    pub fn set_field(&self, key: &str, value: Value) {
        self.working.update(|w| {
            w.insert(key.to_string(), value);
        });
    }

    pub fn set_file(&self, key: &str, file: web_sys::File) {
        self.files.update(|f| {
            f.insert(key.to_string(), file);
        });
    }

    pub fn clear_file(&self, key: &str) {
        self.files.update(|f| {
            f.remove(key);
        });
    }

    pub fn staged_file_name(&self, key: &str) -> Option<String> {
        self.files.with(|f| f.get(key).map(|file| file.name()))
    }

    fn dirty(&self) -> std::collections::BTreeMap<String, bool> {
        let staged: Vec<String> = self.files.with(|f| f.keys().cloned().collect());
        self.pristine.with(|pristine| {
            self.working
                .with(|working| record::dirty_map(pristine, working, staged.iter().map(String::as_str)))
        })
    }

    pub fn is_dirty(&self) -> bool {
        record::is_dirty(&self.dirty())
    }

    pub fn is_field_dirty(&self, key: &str) -> bool {
        self.dirty().get(key).copied().unwrap_or(false)
    }

    pub fn field_error(&self, key: &str) -> Option<String> {
        self.errors
            .with(|e| e.get(key).and_then(|list| list.first().cloned()))
    }

    fn next_token(&self) -> Option<u64> {
        self.seq.try_update_value(|n| {
            *n += 1;
            *n
        })
    }

    /// Saves the working record. A clean edit form short-circuits into an
    /// informational toast without touching the network. While a submission
    /// is in flight further calls return immediately.
    pub fn submit(&self) {
        if self.submitting.get_untracked() {
            return;
        }
        if self.is_edit() && !self.is_dirty() {
            self.notifier.info("Unchanged", "No changes to save.");
            return;
        }
        let Some(token) = self.next_token() else { return };
        self.submitting.set(true);
        self.errors.update(HashMap::clear);

        let mut snapshot = self.working.get_untracked();
        if let Some(hook) = &self.config.before_submit {
            snapshot = hook(snapshot);
        }
        let files = self.files.get_untracked();
        let was_create = !self.is_edit();

        let this = self.clone();
        spawn_local(async move {
            let result = this.send(snapshot, files).await;
            if this.seq.try_get_value() != Some(token) {
                return;
            }
            match result {
                Ok(envelope) => {
                    this.notifier.notify(
                        &format!("{} saved.", this.config.resource_name),
                        envelope.notification.as_ref(),
                    );
                    this.set_pristine(envelope.data);
                    if was_create {
                        this.router
                            .commit(&this.config.index_path, HistoryMode::Push);
                    }
                }
                Err(err) => this.handle_submit_error(err),
            }
            let _ = this.submitting.try_set(false);
        });
    }

    /// Staged files force the multipart path; edits then go out as POST with
    /// a method override since multipart bodies are only parsed on POST.
    /// Without files the body is plain JSON with nulls omitted.
    async fn send(
        &self,
        snapshot: FormRecord,
        files: HashMap<String, web_sys::File>,
    ) -> Result<ApiEnvelope<FormRecord>, ApiError> {
        if !files.is_empty() {
            let method_override = self.is_edit().then_some(multipart::METHOD_PUT);
            let form = multipart::build_form_data(&snapshot, &files, method_override)
                .map_err(|err| ApiError::request_setup(format!("{err:?}")))?;
            return self.client.post_multipart(&self.item_path(), form).await;
        }
        let payload = record::json_payload(&snapshot);
        if self.is_edit() {
            self.client.put_json(&self.item_path(), &payload).await
        } else {
            self.client.post_json(&self.item_path(), &payload).await
        }
    }

    fn handle_submit_error(&self, err: ApiError) {
        if err.kind() == ApiErrorKind::Validation && err.has_field_errors() {
            let _ = self.errors.try_set(err.errors.clone());
        }
        self.notifier.api_error(
            &err,
            &format!("Failed to save {}", self.config.resource_name),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> FormRecord {
        value.as_object().unwrap().clone()
    }

    fn form_with(notifier: Notifier) -> ResourceForm {
        let config = FormConfig::new(
            "Item",
            "/items",
            "/content/items",
            record(json!({ "name": "", "count": 0 })),
        );
        let router = Router {
            location: RwSignal::new(Default::default()),
        };
        ResourceForm::new(
            config,
            Some("1".to_string()),
            ApiClient::with_base(String::new()),
            router,
            notifier,
        )
    }

    fn form() -> ResourceForm {
        form_with(Notifier::new())
    }

    #[test]
    fn form_is_clean_after_a_pristine_reset() {
        let form = form();
        form.set_field("name", json!("Aspirin"));
        assert!(form.is_dirty());

        form.set_pristine(record(json!({ "name": "Aspirin", "count": 3 })));
        assert!(!form.is_dirty());
        assert!(!form.is_field_dirty("name"));
        assert!(!form.is_field_dirty("count"));
        assert_eq!(form.field_string("name"), "Aspirin");
    }

    #[test]
    fn reverting_an_edit_clears_the_dirty_flag() {
        let form = form();
        form.set_pristine(record(json!({ "name": "Aspirin", "count": 3 })));

        form.set_field("count", json!(4));
        assert!(form.is_field_dirty("count"));
        assert!(!form.is_field_dirty("name"));

        form.set_field("count", json!(3));
        assert!(!form.is_dirty());
    }

    #[test]
    fn clean_edit_submit_only_raises_an_info_toast() {
        let notifier = Notifier::new();
        let form = form_with(notifier);
        form.set_pristine(record(json!({ "name": "Aspirin", "count": 3 })));
        assert!(!form.is_dirty());

        // A clean edit must short-circuit before any request is spawned;
        // spawning off the browser would abort the test.
        form.submit();

        let toasts = notifier.toasts().get_untracked();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, contracts::api::NotificationKind::Info);
        assert_eq!(toasts[0].message, "No changes to save.");
        assert!(!form.submitting.get_untracked());
    }

    #[test]
    fn pristine_reset_drops_stale_validation_errors() {
        let form = form();
        form.errors.set(HashMap::from([(
            "name".to_string(),
            vec!["Name is required.".to_string()],
        )]));
        assert!(form.field_error("name").is_some());

        form.set_pristine(record(json!({ "name": "Aspirin" })));
        assert!(form.field_error("name").is_none());
    }
}
