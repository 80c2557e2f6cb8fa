//! Column and table configuration.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Field key as it appears in row JSON and in query parameters.
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    /// Filterable columns get a per-column filter input and may appear as
    /// URL query parameters.
    pub filterable: bool,
}

impl ColumnDef {
    pub fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: false,
            filterable: false,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }
}

pub const DEFAULT_ROWS_PER_PAGE: u32 = 10;
pub const ROWS_PER_PAGE_OPTIONS: &[u32] = &[5, 10, 15, 20, 25, 50, 100];

/// Static description of one table instance.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// API path of the list endpoint, e.g. `/products`.
    pub endpoint: String,
    /// Stable name used to distinguish tables sharing a page.
    pub table_name: String,
    pub columns: Vec<ColumnDef>,
    /// Filters applied from the first request on, before any user input.
    pub initial_filters: BTreeMap<String, String>,
    /// Initial sort as `(column, direction)` pairs, outermost first.
    pub initial_sort: Vec<(String, String)>,
    pub initial_rows_per_page: u32,
    pub rows_per_page_options: Vec<u32>,
}

impl TableConfig {
    pub fn new(endpoint: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            table_name: table_name.into(),
            columns: Vec::new(),
            initial_filters: BTreeMap::new(),
            initial_sort: Vec::new(),
            initial_rows_per_page: DEFAULT_ROWS_PER_PAGE,
            rows_per_page_options: ROWS_PER_PAGE_OPTIONS.to_vec(),
        }
    }

    pub fn columns(mut self, columns: Vec<ColumnDef>) -> Self {
        self.columns = columns;
        self
    }

    pub fn initial_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.initial_filters.insert(key.into(), value.into());
        self
    }

    pub fn initial_sort(mut self, column: impl Into<String>, direction: impl Into<String>) -> Self {
        self.initial_sort.push((column.into(), direction.into()));
        self
    }

    pub fn rows_per_page(mut self, rows: u32) -> Self {
        self.initial_rows_per_page = rows;
        self
    }

    /// A key is accepted from the URL only if a filterable column declares
    /// it or an initial filter uses it.
    pub fn is_filterable(&self, key: &str) -> bool {
        self.initial_filters.contains_key(key)
            || self
                .columns
                .iter()
                .any(|c| c.filterable && c.key == key)
    }
}
