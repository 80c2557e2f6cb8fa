//! News list view.

use chrono::{DateTime, Utc};
use leptos::prelude::*;

use contracts::domain::news::NewsUpdate;

use crate::routes::table::use_navigator;
use crate::shared::components::{PaginationControls, SearchInput, SortHeader};
use crate::shared::data_table::{ColumnDef, DataTable, SortRequest, TableConfig, TableRow};
use crate::system::access::catalog;
use crate::system::auth::use_session;

impl TableRow for NewsUpdate {
    fn row_id(&self) -> String {
        self.id.to_string()
    }
}

fn format_date(value: &Option<DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn table_config() -> TableConfig {
    TableConfig::new("/news", "news")
        .columns(vec![
            ColumnDef::new("title", "Title").sortable().filterable(),
            ColumnDef::new("is_published", "Published").filterable(),
            ColumnDef::new("published_at", "Published at").sortable(),
        ])
        .initial_sort("published_at", "desc")
}

#[component]
pub fn NewsList() -> impl IntoView {
    let navigator = use_navigator();
    let session = use_session();

    let table = DataTable::<NewsUpdate>::new(
        table_config(),
        navigator.router,
        navigator.client.clone(),
    );
    table.init();

    let can_create = session.has_permission(catalog::cms::news::CREATE);
    let can_update = session.has_permission(catalog::cms::news::UPDATE);

    let loading = table.loading;
    let error = table.error;
    let query = table.query;
    let data = table.data;

    let search_table = table.clone();
    let reset_table = table.clone();
    let create_nav = navigator.clone();

    let title_table = table.clone();
    let title_sort = table.clone();
    let title_rank = table.clone();
    let date_sort = table.clone();
    let date_rank = table.clone();
    let date_request = table.clone();
    let published_filter = table.clone();

    let body_table = table.clone();
    let page_table = table.clone();
    let per_page_table = table.clone();
    let paginated_table = table.clone();

    view! {
        <div class="list-page">
            <div class="list-toolbar">
                <h1 class="page-title">"News"</h1>
                <SearchInput
                    value=table.local_search
                    placeholder="Search news..."
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
                                on:click=move |_| nav.push("/content/news/create")
                            >
                                "New article"
                            </button>
                        }
                    }
                </Show>
            </div>

            <Show when=move || error.get().is_some()>
                <div class="list-error">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <table class="data-table" class:loading=move || loading.get()>
                <thead>
                    <tr>
                        <SortHeader
                            label="Title"
                            direction=Signal::derive(move || {
                                title_sort.query.with(|q| q.direction_of("title"))
                            })
                            rank=Signal::derive(move || {
                                title_rank.query.with(|q| q.sort_rank("title"))
                            })
                            on_sort=Callback::new(move |request: SortRequest| {
                                title_table.perform_sort("title", request);
                            })
                        />
                        <th>"Published"</th>
                        <SortHeader
                            label="Published at"
                            direction=Signal::derive(move || {
                                date_sort.query.with(|q| q.direction_of("published_at"))
                            })
                            rank=Signal::derive(move || {
                                date_rank.query.with(|q| q.sort_rank("published_at"))
                            })
                            on_sort=Callback::new(move |request: SortRequest| {
                                date_request.perform_sort("published_at", request);
                            })
                        />
                    </tr>
                    <tr class="filter-row">
                        <th class="filter-cell">
                            <input
                                type="text"
                                class="filter-input"
                                prop:value=move || {
                                    query.with(|q| {
                                        q.filters.get("title").cloned().unwrap_or_default()
                                    })
                                }
                                on:change=move |ev| {
                                    published_filter
                                        .update_column_filter("title", &event_target_value(&ev));
                                }
                            />
                        </th>
                        <th class="filter-cell"></th>
                        <th class="filter-cell"></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = body_table.rows_to_display();
                        if rows.is_empty() && !loading.get() {
                            return view! {
                                <tr>
                                    <td class="empty-cell" colspan="3">"No articles found."</td>
                                </tr>
                            }
                            .into_any();
                        }
                        rows.into_iter()
                            .map(|article| {
                                let edit_nav = navigator.clone();
                                let edit_path =
                                    format!("/content/news/{}/edit", article.id);
                                view! {
                                    <tr>
                                        <td>
                                            {if can_update {
                                                view! {
                                                    <a
                                                        class="row-link"
                                                        on:click=move |_| edit_nav.push(&edit_path)
                                                    >
                                                        {article.title.clone()}
                                                    </a>
                                                }
                                                .into_any()
                                            } else {
                                                view! { <span>{article.title.clone()}</span> }
                                                    .into_any()
                                            }}
                                        </td>
                                        <td>{if article.is_published { "Yes" } else { "No" }}</td>
                                        <td>{format_date(&article.published_at)}</td>
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
