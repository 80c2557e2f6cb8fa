//! Pure query state for a data table.
//!
//! `TableQuery` is plain data: page, page size, per-column filters, the
//! search term, and a multi-column sort. The sort is held as two parallel
//! vectors, `sort` and `direction`, which every mutation keeps aligned. The
//! most recently touched column sits at the front and is the outermost sort
//! key on the server.

use std::collections::BTreeMap;

use super::columns::TableConfig;

pub const PARAM_PAGE: &str = "page";
pub const PARAM_PER_PAGE: &str = "per_page";
pub const PARAM_SEARCH: &str = "search";
pub const PARAM_SORT: &str = "sort";
pub const PARAM_DIRECTION: &str = "direction";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// What a sort interaction asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortRequest {
    /// Header click: flip if present, otherwise start ascending.
    Toggle,
    /// Explicit direction from a dropdown.
    Direction(SortDirection),
    /// Remove the column from the sort.
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub page: u32,
    pub per_page: u32,
    pub filters: BTreeMap<String, String>,
    pub search: String,
    pub sort: Vec<String>,
    pub direction: Vec<SortDirection>,
}

impl TableQuery {
    pub fn from_config(config: &TableConfig) -> Self {
        let mut query = Self {
            page: 1,
            per_page: config.initial_rows_per_page,
            filters: config.initial_filters.clone(),
            search: String::new(),
            sort: Vec::new(),
            direction: Vec::new(),
        };
        for (column, direction) in &config.initial_sort {
            query.sort.push(column.clone());
            query.direction.push(SortDirection::parse(direction));
        }
        query
    }

    /// Builds the state for a fresh mount: URL parameters win over config
    /// defaults, and unknown filter keys in the URL are dropped. A direction
    /// list that disagrees in length with the sort list is padded with
    /// ascending or truncated, so the invariant holds even for hand-edited
    /// URLs.
    pub fn hydrate_from_url(config: &TableConfig, url: &BTreeMap<String, String>) -> Self {
        let mut query = Self::from_config(config);

        if let Some(page) = url.get(PARAM_PAGE).and_then(|v| v.parse::<u32>().ok()) {
            query.page = page.max(1);
        }
        if let Some(per_page) = url.get(PARAM_PER_PAGE).and_then(|v| v.parse::<u32>().ok()) {
            query.per_page = per_page.max(1);
        }
        if let Some(search) = url.get(PARAM_SEARCH) {
            query.search = search.clone();
        }
        if let Some(sort) = url.get(PARAM_SORT) {
            query.sort = sort
                .split(',')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            let directions: Vec<SortDirection> = url
                .get(PARAM_DIRECTION)
                .map(|d| {
                    d.split(',')
                        .filter(|s| !s.is_empty())
                        .map(SortDirection::parse)
                        .collect()
                })
                .unwrap_or_default();
            query.direction = (0..query.sort.len())
                .map(|i| directions.get(i).copied().unwrap_or_default())
                .collect();
        }
        for (key, value) in url {
            if config.is_filterable(key) {
                query.filters.insert(key.clone(), value.clone());
            }
        }
        query
    }

    pub fn direction_of(&self, column: &str) -> Option<SortDirection> {
        self.sort
            .iter()
            .position(|c| c == column)
            .map(|i| self.direction[i])
    }

    /// 1-based position of the column in the sort order, for indicators.
    pub fn sort_rank(&self, column: &str) -> Option<usize> {
        self.sort.iter().position(|c| c == column).map(|i| i + 1)
    }

    /// Applies a sort interaction and resets to the first page. The touched
    /// column moves to the front of the order; the two vectors stay aligned.
    pub fn apply_sort(&mut self, column: &str, request: SortRequest) {
        let existing = self.sort.iter().position(|c| c == column);
        let next = match (request, existing) {
            (SortRequest::Clear, Some(i)) => {
                self.sort.remove(i);
                self.direction.remove(i);
                None
            }
            (SortRequest::Clear, None) => None,
            (SortRequest::Toggle, Some(i)) => Some(self.direction[i].toggled()),
            (SortRequest::Toggle, None) => Some(SortDirection::Asc),
            (SortRequest::Direction(d), _) => Some(d),
        };
        if let Some(direction) = next {
            if let Some(i) = self.sort.iter().position(|c| c == column) {
                self.sort.remove(i);
                self.direction.remove(i);
            }
            self.sort.insert(0, column.to_string());
            self.direction.insert(0, direction);
        }
        self.page = 1;
    }

    /// Sets or clears (on empty value) a column filter and resets the page.
    pub fn set_filter(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            self.filters.remove(key);
        } else {
            self.filters.insert(key.to_string(), value.to_string());
        }
        self.page = 1;
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.page = 1;
    }

    pub fn set_rows_per_page(&mut self, per_page: u32) {
        self.per_page = per_page.max(1);
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Projects the state into request / URL parameters. Build order: page,
    /// filters, caller extras (which may override filters), sort and
    /// direction comma-joined, search, page size. Empty values are stripped
    /// at the end so cleared filters vanish from URLs.
    pub fn params(&self, extra: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert(PARAM_PAGE.to_string(), self.page.to_string());
        for (key, value) in &self.filters {
            params.insert(key.clone(), value.clone());
        }
        for (key, value) in extra {
            params.insert(key.clone(), value.clone());
        }
        if !self.sort.is_empty() {
            params.insert(PARAM_SORT.to_string(), self.sort.join(","));
            params.insert(
                PARAM_DIRECTION.to_string(),
                self.direction
                    .iter()
                    .map(|d| d.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }
        if !self.search.is_empty() {
            params.insert(PARAM_SEARCH.to_string(), self.search.clone());
        }
        params.insert(PARAM_PER_PAGE.to_string(), self.per_page.to_string());
        params.retain(|_, v| !v.is_empty());
        params
    }

    pub fn to_query_string(&self, extra: &BTreeMap<String, String>) -> String {
        serde_qs::to_string(&self.params(extra)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_table::columns::ColumnDef;

    fn config() -> TableConfig {
        TableConfig::new("/products", "products")
            .columns(vec![
                ColumnDef::new("name", "Name").sortable().filterable(),
                ColumnDef::new("category", "Category").sortable().filterable(),
                ColumnDef::new("updated_at", "Updated").sortable(),
            ])
            .initial_sort("updated_at", "desc")
    }

    fn no_extra() -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    #[test]
    fn initial_request_carries_defaults() {
        let query = TableQuery::from_config(&config());
        let params = query.params(&no_extra());
        assert_eq!(params["page"], "1");
        assert_eq!(params["per_page"], "10");
        assert_eq!(params["sort"], "updated_at");
        assert_eq!(params["direction"], "desc");
        assert!(!params.contains_key("search"));
    }

    #[test]
    fn toggle_cycles_and_moves_to_front() {
        let mut query = TableQuery::from_config(&config());
        query.apply_sort("name", SortRequest::Toggle);
        assert_eq!(query.sort, vec!["name", "updated_at"]);
        assert_eq!(query.direction_of("name"), Some(SortDirection::Asc));

        query.apply_sort("updated_at", SortRequest::Toggle);
        assert_eq!(query.sort, vec!["updated_at", "name"]);
        assert_eq!(query.direction_of("updated_at"), Some(SortDirection::Asc));

        query.apply_sort("updated_at", SortRequest::Toggle);
        assert_eq!(query.direction_of("updated_at"), Some(SortDirection::Desc));
        assert_eq!(query.sort.len(), query.direction.len());
    }

    #[test]
    fn clear_removes_the_aligned_pair() {
        let mut query = TableQuery::from_config(&config());
        query.apply_sort("name", SortRequest::Toggle);
        query.apply_sort("category", SortRequest::Direction(SortDirection::Desc));
        assert_eq!(query.sort, vec!["category", "name", "updated_at"]);

        query.apply_sort("name", SortRequest::Clear);
        assert_eq!(query.sort, vec!["category", "updated_at"]);
        assert_eq!(
            query.direction,
            vec![SortDirection::Desc, SortDirection::Desc]
        );
    }

    #[test]
    fn clearing_the_primary_column_leaves_the_rest_aligned() {
        let mut query = TableQuery::from_config(&TableConfig::new("/items", "items"));
        query.sort = vec!["a".to_string(), "b".to_string()];
        query.direction = vec![SortDirection::Desc, SortDirection::Asc];

        query.apply_sort("a", SortRequest::Clear);
        assert_eq!(query.sort, vec!["b"]);
        assert_eq!(query.direction.len(), query.sort.len());
        assert_eq!(query.direction_of("b"), Some(SortDirection::Asc));
    }

    #[test]
    fn mount_with_empty_url_sends_configured_defaults() {
        let config = TableConfig::new("/items", "items")
            .initial_sort("id", "asc")
            .rows_per_page(10);
        let query = TableQuery::hydrate_from_url(&config, &BTreeMap::new());
        let params = query.params(&BTreeMap::new());
        assert_eq!(params["per_page"], "10");
        assert_eq!(params["sort"], "id");
        assert_eq!(params["direction"], "asc");
        assert_eq!(params["page"], "1");
    }

    #[test]
    fn sort_interactions_reset_the_page() {
        let mut query = TableQuery::from_config(&config());
        query.set_page(4);
        query.apply_sort("name", SortRequest::Toggle);
        assert_eq!(query.page, 1);

        query.set_page(3);
        query.set_filter("category", "otc");
        assert_eq!(query.page, 1);

        query.set_page(2);
        query.set_search("aspirin");
        assert_eq!(query.page, 1);
    }

    #[test]
    fn filters_and_search_accumulate_in_params() {
        let mut query = TableQuery::from_config(&config());
        query.set_filter("category", "otc");
        query.set_search("asp");
        let params = query.params(&no_extra());
        assert_eq!(params["category"], "otc");
        assert_eq!(params["search"], "asp");
        assert_eq!(params["sort"], "updated_at");
    }

    #[test]
    fn empty_values_are_stripped() {
        let mut query = TableQuery::from_config(&config());
        query.set_search("");
        query.set_filter("category", "");
        let params = query.params(&no_extra());
        assert!(!params.contains_key("search"));
        assert!(!params.contains_key("category"));
    }

    #[test]
    fn extras_override_filters() {
        let mut query = TableQuery::from_config(&config());
        query.set_filter("category", "otc");
        let extra = BTreeMap::from([("category".to_string(), "rx".to_string())]);
        assert_eq!(query.params(&extra)["category"], "rx");
    }

    #[test]
    fn extras_apply_per_call_without_sticking() {
        let mut query = TableQuery::from_config(&config());
        query.set_filter("category", "otc");
        let extra = BTreeMap::from([("trashed".to_string(), "1".to_string())]);
        assert_eq!(query.params(&extra)["trashed"], "1");
        // The next projection without extras is back to the plain query.
        assert!(!query.params(&no_extra()).contains_key("trashed"));
        assert_eq!(query.params(&no_extra())["category"], "otc");
    }

    #[test]
    fn url_hydration_clamps_zero_paging() {
        let url = BTreeMap::from([
            ("page".to_string(), "0".to_string()),
            ("per_page".to_string(), "0".to_string()),
        ]);
        let query = TableQuery::hydrate_from_url(&config(), &url);
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 1);
    }

    #[test]
    fn url_hydration_wins_over_config() {
        let url = BTreeMap::from([
            ("page".to_string(), "3".to_string()),
            ("per_page".to_string(), "25".to_string()),
            ("sort".to_string(), "name,category".to_string()),
            ("direction".to_string(), "desc".to_string()),
            ("category".to_string(), "otc".to_string()),
            ("bogus".to_string(), "x".to_string()),
        ]);
        let query = TableQuery::hydrate_from_url(&config(), &url);
        assert_eq!(query.page, 3);
        assert_eq!(query.per_page, 25);
        assert_eq!(query.sort, vec!["name", "category"]);
        // Missing directions pad with ascending.
        assert_eq!(
            query.direction,
            vec![SortDirection::Desc, SortDirection::Asc]
        );
        assert_eq!(query.filters.get("category").map(String::as_str), Some("otc"));
        assert!(!query.filters.contains_key("bogus"));
    }

    #[test]
    fn query_string_round_trips_through_hydration() {
        let mut query = TableQuery::from_config(&config());
        query.apply_sort("name", SortRequest::Toggle);
        query.set_filter("category", "otc");
        query.set_search("ibu");
        query.set_page(2);

        let qs = query.to_query_string(&no_extra());
        let url: BTreeMap<String, String> = serde_qs::from_str(&qs).unwrap();
        let rehydrated = TableQuery::hydrate_from_url(&config(), &url);
        assert_eq!(rehydrated, query);
    }
}
