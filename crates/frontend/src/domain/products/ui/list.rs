//! Product list view.

use chrono::{DateTime, Utc};
use leptos::prelude::*;

use contracts::domain::product::Product;

use crate::routes::table::use_navigator;
use crate::shared::components::{PaginationControls, SearchInput, SortHeader};
use crate::shared::data_table::{ColumnDef, DataTable, SortRequest, TableConfig, TableRow};
use crate::system::access::catalog;
use crate::system::auth::use_session;

impl TableRow for Product {
    fn row_id(&self) -> String {
        self.id.to_string()
    }
}

fn format_date(value: &Option<DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn table_config() -> TableConfig {
    TableConfig::new("/products", "products")
        .columns(vec![
            ColumnDef::new("name", "Name").sortable().filterable(),
            ColumnDef::new("generic_name", "Generic name").sortable().filterable(),
            ColumnDef::new("category", "Category").sortable().filterable(),
            ColumnDef::new("is_active", "Active").filterable(),
            ColumnDef::new("updated_at", "Updated").sortable(),
        ])
        .initial_sort("updated_at", "desc")
}

#[component]
pub fn ProductList() -> impl IntoView {
    let navigator = use_navigator();
    let session = use_session();

    let table = DataTable::<Product>::new(
        table_config(),
        navigator.router,
        navigator.client.clone(),
    );
    table.init();

    let can_create = session.has_permission(catalog::cms::products::CREATE);
    let can_update = session.has_permission(catalog::cms::products::UPDATE);

    let loading = table.loading;
    let error = table.error;
    let query = table.query;
    let data = table.data;

    let search_table = table.clone();
    let reset_table = table.clone();
    let create_nav = navigator.clone();

    let sortable_headers = {
        let table = table.clone();
        table
            .config
            .columns
            .clone()
            .into_iter()
            .map(move |column| {
                let key = column.key;
                if column.sortable {
                    let dir_table = table.clone();
                    let rank_table = table.clone();
                    let sort_table = table.clone();
                    view! {
                        <SortHeader
                            label=column.label
                            direction=Signal::derive(move || {
                                dir_table.query.with(|q| q.direction_of(key))
                            })
                            rank=Signal::derive(move || {
                                rank_table.query.with(|q| q.sort_rank(key))
                            })
                            on_sort=Callback::new(move |request: SortRequest| {
                                sort_table.perform_sort(key, request);
                            })
                        />
                    }
                    .into_any()
                } else {
                    view! { <th>{column.label}</th> }.into_any()
                }
            })
            .collect_view()
    };

    let filter_row = {
        let table = table.clone();
        table
            .config
            .columns
            .clone()
            .into_iter()
            .map(move |column| {
                if column.filterable {
                    let key = column.key;
                    let value_query = query;
                    let filter_table = table.clone();
                    view! {
                        <th class="filter-cell">
                            <input
                                type="text"
                                class="filter-input"
                                prop:value=move || {
                                    value_query
                                        .with(|q| q.filters.get(key).cloned().unwrap_or_default())
                                }
                                on:change=move |ev| {
                                    filter_table
                                        .update_column_filter(key, &event_target_value(&ev));
                                }
                            />
                        </th>
                    }
                    .into_any()
                } else {
                    view! { <th class="filter-cell"></th> }.into_any()
                }
            })
            .collect_view()
    };

    let body_table = table.clone();
    let all_table = table.clone();
    let all_checked_table = table.clone();
    let page_table = table.clone();
    let per_page_table = table.clone();
    let paginated_table = table.clone();
    let count_when_table = table.clone();
    let count_view_table = table.clone();

    view! {
        <div class="list-page">
            <div class="list-toolbar">
                <h1 class="page-title">"Products"</h1>
                <SearchInput
                    value=table.local_search
                    placeholder="Search products..."
                    on_search=Callback::new(move |_| search_table.perform_backend_search())
                />
                <button class="btn" on:click=move |_| reset_table.reset_filters_and_search()>
                    "Reset"
                </button>
                <Show when=move || can_create>
                    {
                        let nav = create_nav.clone();
                        view! {
                            <button
                                class="btn btn-primary"
                                on:click=move |_| nav.push("/content/products/create")
                            >
                                "New product"
                            </button>
                        }
                    }
                </Show>
            </div>

            <Show when=move || error.get().is_some()>
                <div class="list-error">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <Show when=move || { count_when_table.selected_count() > 0 }>
                {
                    let count = count_view_table.clone();
                    view! {
                        <div class="selection-bar">
                            {move || format!("{} selected", count.selected_count())}
                        </div>
                    }
                }
            </Show>

            <table class="data-table" class:loading=move || loading.get()>
                <thead>
                    <tr>
                        <th class="select-cell">
                            <input
                                type="checkbox"
                                prop:checked=move || all_checked_table.is_all_selected()
                                on:change=move |_| all_table.toggle_all_visible()
                            />
                        </th>
                        {sortable_headers}
                    </tr>
                    <tr class="filter-row">
                        <th class="filter-cell"></th>
                        {filter_row}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = body_table.rows_to_display();
                        if rows.is_empty() && !loading.get() {
                            return view! {
                                <tr>
                                    <td class="empty-cell" colspan="6">"No products found."</td>
                                </tr>
                            }
                            .into_any();
                        }
                        rows.into_iter()
                            .map(|product| {
                                let id = product.row_id();
                                let check_id = id.clone();
                                let row_table = body_table.clone();
                                let checked_table = body_table.clone();
                                let checked_id = id.clone();
                                let edit_nav = navigator.clone();
                                let edit_path =
                                    format!("/content/products/{id}/edit");
                                view! {
                                    <tr>
                                        <td class="select-cell">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || {
                                                    checked_table.is_selected(&checked_id)
                                                }
                                                on:change=move |_| {
                                                    row_table.toggle_row(&check_id)
                                                }
                                            />
                                        </td>
                                        <td>
                                            {if can_update {
                                                view! {
                                                    <a
                                                        class="row-link"
                                                        on:click=move |_| edit_nav.push(&edit_path)
                                                    >
                                                        {product.name.clone()}
                                                    </a>
                                                }
                                                .into_any()
                                            } else {
                                                view! { <span>{product.name.clone()}</span> }
                                                    .into_any()
                                            }}
                                        </td>
                                        <td>{product.generic_name.clone()}</td>
                                        <td>{product.category.clone()}</td>
                                        <td>{if product.is_active { "Yes" } else { "No" }}</td>
                                        <td>{format_date(&product.updated_at)}</td>
                                    </tr>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>

            <Show when=move || paginated_table.is_paginated()>
                {
                    let page_table = page_table.clone();
                    let per_page_table = per_page_table.clone();
                    let options = page_table.config.rows_per_page_options.clone();
                    view! {
                        <PaginationControls
                            current_page=Signal::derive(move || data.with(|d| d.current_page))
                            last_page=Signal::derive(move || data.with(|d| d.last_page))
                            total=Signal::derive(move || data.with(|d| d.total))
                            from=Signal::derive(move || data.with(|d| d.from))
                            to=Signal::derive(move || data.with(|d| d.to))
                            per_page=Signal::derive(move || query.with(|q| q.per_page))
                            per_page_options=options
                            on_page=Callback::new(move |page| page_table.go_to_page(page))
                            on_per_page=Callback::new(move |size| {
                                per_page_table.update_rows_per_page(size)
                            })
                        />
                    }
                }
            </Show>
        </div>
    }
}
