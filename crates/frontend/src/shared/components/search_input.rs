//! Debounced search box.
//!
//! Typing updates `value` immediately (local refinement) and schedules the
//! debounced callback; Enter fires it at once. Dropping the previous timer
//! cancels it, so only the trailing edge of a burst of keystrokes submits.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const DEBOUNCE_MS: u32 = 400;

#[component]
pub fn SearchInput(
    value: RwSignal<String>,
    #[prop(into)] placeholder: String,
    on_search: Callback<()>,
) -> impl IntoView {
    let pending: StoredValue<Option<Timeout>, LocalStorage> = StoredValue::new_local(None);

    let schedule = move || {
        let timer = Timeout::new(DEBOUNCE_MS, move || {
            pending.set_value(None);
            on_search.run(());
        });
        // Replacing the stored timer drops and cancels the previous one.
        pending.set_value(Some(timer));
    };

    on_cleanup(move || {
        let _ = pending.try_set_value(None);
    });

    view! {
        <input
            type="text"
            class="search-input"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| {
                value.set(event_target_value(&ev));
                schedule();
            }
            on:keydown=move |ev| {
                if ev.key() == "Enter" {
                    pending.set_value(None);
                    on_search.run(());
                }
            }
        />
    }
}
