//! Reactive table engine.
//!
//! `DataTable<T>` owns the query state, the fetched page, selection, and the
//! URL projection for one table instance. Responses are fenced with a
//! monotonically increasing sequence token, so a slow response for an old
//! query can never overwrite data for a newer one; the token is also bumped
//! on cleanup, which retires in-flight responses after the view unmounts.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;

use contracts::api::{ApiEnvelope, PaginatedResponse};

use super::columns::TableConfig;
use super::query::{SortRequest, TableQuery};
use super::{search, selection};
use crate::routes::Router;
use crate::shared::api::ApiClient;

/// Implemented by row DTOs a table can display.
pub trait TableRow: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Stable identifier used for selection tracking.
    fn row_id(&self) -> String;
}

#[derive(Clone)]
pub struct DataTable<T: TableRow> {
    pub config: Arc<TableConfig>,
    pub query: RwSignal<TableQuery>,
    pub data: RwSignal<PaginatedResponse<T>>,
    pub selected: RwSignal<HashSet<String>>,
    /// Search box contents; becomes the backend term on submit.
    pub local_search: RwSignal<String>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    seq: StoredValue<u64>,
    /// Query parameters this table last wrote into the URL. Location changes
    /// matching this snapshot are our own writes and must not refetch.
    last_synced: StoredValue<Option<BTreeMap<String, String>>>,
    mount_path: StoredValue<String>,
    router: Router,
    client: ApiClient,
}

impl<T: TableRow> DataTable<T> {
    /// Builds the engine, hydrating state from the current URL. URL
    /// parameters win over config defaults.
    pub fn new(config: TableConfig, router: Router, client: ApiClient) -> Self {
        let location = router.location.get_untracked();
        let query = TableQuery::hydrate_from_url(&config, &location.query);
        let per_page = query.per_page;
        let search = query.search.clone();
        Self {
            config: Arc::new(config),
            query: RwSignal::new(query),
            data: RwSignal::new(PaginatedResponse::empty(per_page)),
            selected: RwSignal::new(HashSet::new()),
            local_search: RwSignal::new(search),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            seq: StoredValue::new(0),
            last_synced: StoredValue::new(None),
            mount_path: StoredValue::new(location.path),
            router,
            client,
        }
    }

    /// Issues the first fetch and wires up back/forward handling. The
    /// location effect re-hydrates the query when the URL changes underneath
    /// us (popstate), but ignores both our own query writes and locations
    /// belonging to another path.
    pub fn init(&self) {
        self.fetch(&BTreeMap::new(), true);

        let this = self.clone();
        Effect::new(move |_| {
            let location = this.router.location.get();
            if location.path != this.mount_path.get_value() {
                return;
            }
            let own_write = this
                .last_synced
                .get_value()
                .map(|synced| synced == location.query)
                .unwrap_or(false);
            if own_write {
                return;
            }
            let query = TableQuery::hydrate_from_url(&this.config, &location.query);
            if query == this.query.get_untracked() {
                return;
            }
            this.query.set(query);
            this.fetch(&BTreeMap::new(), false);
        });

        let seq = self.seq;
        on_cleanup(move || {
            let _ = seq.try_update_value(|n| *n += 1);
        });
    }

    /// Core fetch: snapshots the query, optionally projects it into the URL,
    /// and applies the response only if no newer request has started since.
    /// Caller extras ride along for this request only and may override
    /// column filters.
    fn fetch(&self, extra: &BTreeMap<String, String>, sync_url: bool) {
        let Some(token) = self.seq.try_update_value(|n| {
            *n += 1;
            *n
        }) else {
            return;
        };

        let query = self.query.get_untracked();
        let params = query.params(extra);
        // The box reflects whatever term the server is now answering for.
        self.local_search.set(query.search.clone());
        self.loading.set(true);
        self.error.set(None);

        self.last_synced.set_value(Some(params.clone()));
        if sync_url {
            self.router.replace_query(&params);
        }

        let this = self.clone();
        spawn_local(async move {
            let pairs: Vec<(String, String)> = params.into_iter().collect();
            let result = this
                .client
                .get::<ApiEnvelope<PaginatedResponse<T>>>(&this.config.endpoint, &pairs)
                .await;
            if this.seq.try_get_value() != Some(token) {
                return;
            }
            match result {
                Ok(envelope) => {
                    let _ = this.data.try_set(envelope.data);
                    let _ = this.selected.try_update(HashSet::clear);
                }
                // Previous data stays visible; only the error is surfaced.
                Err(err) => {
                    let _ = this.error.try_set(Some(err.message));
                }
            }
            let _ = this.loading.try_set(false);
        });
    }

    pub fn refresh(&self) {
        self.fetch(&BTreeMap::new(), true);
    }

    /// Refetches with one-off request parameters layered over the query,
    /// e.g. a trashed-records toggle the columns don't know about.
    pub fn apply_filters(&self, extra: BTreeMap<String, String>, sync_url: bool) {
        self.query.update(|q| q.set_page(1));
        self.fetch(&extra, sync_url);
    }

    pub fn perform_sort(&self, column: &str, request: SortRequest) {
        self.query.update(|q| q.apply_sort(column, request));
        self.fetch(&BTreeMap::new(), true);
    }

    pub fn update_column_filter(&self, key: &str, value: &str) {
        self.query.update(|q| q.set_filter(key, value));
        self.fetch(&BTreeMap::new(), true);
    }

    /// Submits the current box contents as the backend search term.
    pub fn perform_backend_search(&self) {
        let term = self.local_search.get_untracked();
        self.query.update(|q| q.set_search(&term));
        self.fetch(&BTreeMap::new(), true);
    }

    pub fn update_rows_per_page(&self, per_page: u32) {
        self.query.update(|q| q.set_rows_per_page(per_page));
        self.fetch(&BTreeMap::new(), true);
    }

    pub fn go_to_page(&self, page: u32) {
        self.query.update(|q| q.set_page(page));
        self.fetch(&BTreeMap::new(), true);
    }

    pub fn reset_filters_and_search(&self) {
        self.query.set(TableQuery::from_config(&self.config));
        self.fetch(&BTreeMap::new(), true);
    }

    /// Rows for the view. The locally-typed term refines the loaded page
    /// only while it still equals the term the server last answered for;
    /// once edited further, rows pass through unfiltered until the next
    /// backend search.
    pub fn rows_to_display(&self) -> Vec<T> {
        let rows = self.data.with(|d| d.data.clone());
        let local = self.local_search.get();
        let backend = self.query.with(|q| q.search.clone());
        if local.is_empty() || local != backend {
            return rows;
        }
        rows.into_iter()
            .filter(|row| match serde_json::to_value(row) {
                Ok(value) => search::deep_search(&value, &local),
                Err(_) => true,
            })
            .collect()
    }

    /// Pagination controls are shown only when there is more than one page.
    pub fn is_paginated(&self) -> bool {
        self.data
            .with(|d| d.total > u64::from(d.per_page.max(1)))
    }

    pub fn toggle_row(&self, id: &str) {
        self.selected.update(|s| selection::toggle_row(s, id));
    }

    pub fn toggle_all_visible(&self) {
        let ids: Vec<String> = self.rows_to_display().iter().map(TableRow::row_id).collect();
        self.selected
            .update(|s| selection::toggle_all(s, ids.iter().map(String::as_str)));
    }

    pub fn is_all_selected(&self) -> bool {
        let ids: Vec<String> = self.rows_to_display().iter().map(TableRow::row_id).collect();
        self.selected
            .with(|s| selection::all_selected(s, ids.iter().map(String::as_str)))
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.with(|s| s.contains(id))
    }

    pub fn selected_count(&self) -> usize {
        self.selected.with(|s| s.len())
    }
}
