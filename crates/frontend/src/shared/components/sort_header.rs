//! Sortable column header with a multi-sort indicator.

use leptos::prelude::*;

use crate::shared::data_table::query::{SortDirection, SortRequest};

/// Arrow plus the 1-based rank when the column is not the primary key, so a
/// three-column sort reads `▲ ▼2 ▲3` across the header row.
pub fn sort_indicator(direction: Option<SortDirection>, rank: Option<usize>) -> String {
    match (direction, rank) {
        (Some(direction), Some(rank)) => {
            let arrow = match direction {
                SortDirection::Asc => "▲",
                SortDirection::Desc => "▼",
            };
            if rank > 1 {
                format!("{arrow}{rank}")
            } else {
                arrow.to_string()
            }
        }
        _ => String::new(),
    }
}

#[component]
pub fn SortHeader(
    #[prop(into)] label: String,
    direction: Signal<Option<SortDirection>>,
    rank: Signal<Option<usize>>,
    on_sort: Callback<SortRequest>,
) -> impl IntoView {
    view! {
        <th
            class="sort-header"
            on:click=move |ev| {
                let request = if ev.shift_key() {
                    SortRequest::Clear
                } else {
                    SortRequest::Toggle
                };
                on_sort.run(request);
            }
        >
            {label}
            <span class="sort-indicator">
                {move || sort_indicator(direction.get(), rank.get())}
            </span>
        </th>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_shows_rank_only_for_secondary_keys() {
        assert_eq!(sort_indicator(Some(SortDirection::Asc), Some(1)), "▲");
        assert_eq!(sort_indicator(Some(SortDirection::Desc), Some(3)), "▼3");
        assert_eq!(sort_indicator(None, None), "");
    }
}
