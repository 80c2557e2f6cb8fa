//! Pagination bar shared by all list views. Pages are 1-based, matching the
//! paginator the backend returns.

use leptos::prelude::*;

#[component]
pub fn PaginationControls(
    current_page: Signal<u32>,
    last_page: Signal<u32>,
    total: Signal<u64>,
    from: Signal<Option<u64>>,
    to: Signal<Option<u64>>,
    per_page: Signal<u32>,
    per_page_options: Vec<u32>,
    on_page: Callback<u32>,
    on_per_page: Callback<u32>,
) -> impl IntoView {
    let range_label = move || match (from.get(), to.get()) {
        (Some(from), Some(to)) => format!("{from}-{to} of {}", total.get()),
        _ => format!("{} records", total.get()),
    };

    let has_prev = move || current_page.get() > 1;
    let has_next = move || current_page.get() < last_page.get();

    view! {
        <div class="pagination-controls">
            <div class="pagination-info">{range_label}</div>
            <div class="pagination-buttons">
                <button
                    class="pagination-btn"
                    disabled=move || !has_prev()
                    on:click=move |_| on_page.run(1)
                >
                    "«"
                </button>
                <button
                    class="pagination-btn"
                    disabled=move || !has_prev()
                    on:click=move |_| on_page.run(current_page.get().saturating_sub(1).max(1))
                >
                    "‹"
                </button>
                <span class="pagination-current">
                    {move || format!("{} / {}", current_page.get(), last_page.get().max(1))}
                </span>
                <button
                    class="pagination-btn"
                    disabled=move || !has_next()
                    on:click=move |_| on_page.run(current_page.get() + 1)
                >
                    "›"
                </button>
                <button
                    class="pagination-btn"
                    disabled=move || !has_next()
                    on:click=move |_| on_page.run(last_page.get())
                >
                    "»"
                </button>
            </div>
            <select
                class="pagination-page-size"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        on_per_page.run(size);
                    }
                }
            >
                {per_page_options
                    .into_iter()
                    .map(|size| {
                        view! {
                            <option
                                value=size.to_string()
                                selected=move || per_page.get() == size
                            >
                                {size.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
