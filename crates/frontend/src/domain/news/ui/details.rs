//! News create / edit form. No file uploads here, so submissions always go
//! out as JSON.

use leptos::prelude::*;
use serde_json::{json, Value};
use wasm_bindgen::JsCast;

use crate::routes::table::use_navigator;
use crate::shared::form_engine::record::FormRecord;
use crate::shared::form_engine::{FormConfig, ResourceForm};
use crate::shared::notify::use_notifier;

use crate::domain::products::ui::details::slugify;

fn initial_record() -> FormRecord {
    json!({
        "title": "",
        "slug": "",
        "excerpt": null,
        "body": "",
        "is_published": false,
        "published_at": null,
    })
    .as_object()
    .cloned()
    .unwrap_or_default()
}

fn text_field(
    form: &ResourceForm,
    key: &'static str,
    label: &'static str,
) -> impl IntoView {
    let value_form = form.clone();
    let input_form = form.clone();
    let dirty_form = form.clone();
    let error_form = form.clone();
    view! {
        <label class="form-label" class:dirty=move || dirty_form.is_field_dirty(key)>
            {label}
            <input
                type="text"
                class="form-input"
                prop:value=move || value_form.field_string(key)
                on:input=move |ev| {
                    input_form.set_field(key, Value::String(event_target_value(&ev)));
                }
            />
            <span class="field-error">
                {move || error_form.field_error(key).unwrap_or_default()}
            </span>
        </label>
    }
}

#[component]
pub fn NewsDetails(#[prop(optional, into)] id: Option<String>) -> impl IntoView {
    let navigator = use_navigator();
    let notifier = use_notifier();

    let config = FormConfig::new("Article", "/news", "/content/news", initial_record())
        .before_submit(std::sync::Arc::new(|mut record: FormRecord| {
            let slug_empty = record
                .get("slug")
                .and_then(Value::as_str)
                .map(|s| s.trim().is_empty())
                .unwrap_or(true);
            if slug_empty {
                let title = record
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                record.insert("slug".to_string(), Value::String(slugify(title)));
            }
            record
        }));

    let is_edit = id.is_some();
    let form = ResourceForm::new(
        config,
        id,
        navigator.client.clone(),
        navigator.router,
        notifier,
    );
    form.init();

    let loading = form.loading;
    let submitting = form.submitting;

    let excerpt_value = form.clone();
    let excerpt_input = form.clone();
    let body_value = form.clone();
    let body_input = form.clone();
    let body_error = form.clone();
    let published_value = form.clone();
    let published_input = form.clone();
    let dirty_form = form.clone();
    let submit_form = form.clone();
    let back_nav = navigator.clone();

    view! {
        <div class="details-page">
            <div class="details-toolbar">
                <h1 class="page-title">
                    {if is_edit { "Edit article" } else { "New article" }}
                </h1>
                <button class="btn" on:click=move |_| back_nav.push("/content/news")>
                    "Back to list"
                </button>
            </div>

            <Show when=move || loading.get()>
                <div class="form-loading">"Loading..."</div>
            </Show>

            <form
                class="details-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit_form.submit();
                }
            >
                {text_field(&form, "title", "Title")}
                {text_field(&form, "slug", "Slug")}

                <label class="form-label">
                    "Excerpt"
                    <textarea
                        class="form-input"
                        prop:value=move || excerpt_value.field_string("excerpt")
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            let value = if text.is_empty() {
                                Value::Null
                            } else {
                                Value::String(text)
                            };
                            excerpt_input.set_field("excerpt", value);
                        }
                    ></textarea>
                </label>

                <label class="form-label">
                    "Body"
                    <textarea
                        class="form-input form-input-tall"
                        prop:value=move || body_value.field_string("body")
                        on:input=move |ev| {
                            body_input.set_field("body", Value::String(event_target_value(&ev)));
                        }
                    ></textarea>
                    <span class="field-error">
                        {move || body_error.field_error("body").unwrap_or_default()}
                    </span>
                </label>

                <label class="form-check">
                    <input
                        type="checkbox"
                        prop:checked=move || published_value.field_bool("is_published")
                        on:change=move |ev| {
                            let input = ev
                                .target()
                                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
                            if let Some(input) = input {
                                published_input
                                    .set_field("is_published", Value::Bool(input.checked()));
                            }
                        }
                    />
                    "Published"
                </label>

                {text_field(&form, "published_at", "Published at")}

                <div class="form-actions">
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || submitting.get()
                    >
                        {move || if submitting.get() { "Saving..." } else { "Save" }}
                    </button>
                    <Show when=move || dirty_form.is_dirty()>
                        <span class="dirty-hint">"Unsaved changes"</span>
                    </Show>
                </div>
            </form>
        </div>
    }
}
