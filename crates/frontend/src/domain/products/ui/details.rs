//! Product create / edit form.

use leptos::prelude::*;
use serde_json::{json, Value};
use wasm_bindgen::JsCast;

use crate::routes::table::use_navigator;
use crate::shared::form_engine::record::FormRecord;
use crate::shared::form_engine::{FormConfig, ResourceForm};
use crate::shared::notify::use_notifier;

/// URL-safe slug from a display name: lowercase alphanumerics with single
/// dashes, trimmed at both ends.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn initial_record() -> FormRecord {
    json!({
        "name": "",
        "slug": "",
        "generic_name": "",
        "category": "",
        "description": null,
        "is_active": true,
        "is_featured": false,
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

fn checkbox_field(
    form: &ResourceForm,
    key: &'static str,
    label: &'static str,
) -> impl IntoView {
    let value_form = form.clone();
    let input_form = form.clone();
    view! {
        <label class="form-check">
            <input
                type="checkbox"
                prop:checked=move || value_form.field_bool(key)
                on:change=move |ev| {
                    let input = ev
                        .target()
                        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
                    if let Some(input) = input {
                        input_form.set_field(key, Value::Bool(input.checked()));
                    }
                }
            />
            {label}
        </label>
    }
}

#[component]
pub fn ProductDetails(#[prop(optional, into)] id: Option<String>) -> impl IntoView {
    let navigator = use_navigator();
    let notifier = use_notifier();

    let config = FormConfig::new("Product", "/products", "/content/products", initial_record())
        .before_submit(std::sync::Arc::new(|mut record: FormRecord| {
            let slug_empty = record
                .get("slug")
                .and_then(Value::as_str)
                .map(|s| s.trim().is_empty())
                .unwrap_or(true);
            if slug_empty {
                let name = record
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                record.insert("slug".to_string(), Value::String(slugify(name)));
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

    let file_form = form.clone();
    let file_name_form = form.clone();
    let image_url_form = form.clone();
    let dirty_form = form.clone();
    let submit_form = form.clone();
    let description_value = form.clone();
    let description_input = form.clone();
    let back_nav = navigator.clone();

    view! {
        <div class="details-page">
            <div class="details-toolbar">
                <h1 class="page-title">
                    {if is_edit { "Edit product" } else { "New product" }}
                </h1>
                <button class="btn" on:click=move |_| back_nav.push("/content/products")>
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
                {text_field(&form, "name", "Name")}
                {text_field(&form, "slug", "Slug")}
                {text_field(&form, "generic_name", "Generic name")}
                {text_field(&form, "category", "Category")}

                <label class="form-label">
                    "Description"
                    <textarea
                        class="form-input"
                        prop:value=move || description_value.field_string("description")
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            let value = if text.is_empty() {
                                Value::Null
                            } else {
                                Value::String(text)
                            };
                            description_input.set_field("description", value);
                        }
                    ></textarea>
                </label>

                <label class="form-label">
                    "Packshot image"
                    <input
                        type="file"
                        accept="image/*"
                        on:change=move |ev| {
                            let file = ev
                                .target()
                                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                                .and_then(|input| input.files())
                                .and_then(|files| files.get(0));
                            if let Some(file) = file {
                                file_form.set_file("image", file);
                            }
                        }
                    />
                    <span class="file-hint">
                        {move || {
                            file_name_form
                                .staged_file_name("image")
                                .map(|name| format!("Staged: {name}"))
                                .unwrap_or_else(|| {
                                    image_url_form.field_string("image_url")
                                })
                        }}
                    </span>
                </label>

                {checkbox_field(&form, "is_active", "Active")}
                {checkbox_field(&form, "is_featured", "Featured")}

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_normalizes_names() {
        assert_eq!(slugify("Amoxicillin 500mg (Caps)"), "amoxicillin-500mg-caps");
        assert_eq!(slugify("  Aspirin  "), "aspirin");
        assert_eq!(slugify(""), "");
    }
}
