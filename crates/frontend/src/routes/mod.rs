//! Client-side routing over the History API.
//!
//! The router keeps one `RwSignal<RouteLocation>` in context. Navigations go
//! through the guard pipeline in [`table`]; query-only URL updates (the data
//! table projecting its state) use [`Router::replace_query`], which rewrites
//! the address bar without re-running the guard or remounting the view.

pub mod table;

use std::collections::BTreeMap;

use leptos::prelude::*;
use wasm_bindgen::JsValue;
use web_sys::window;

use crate::system::auth::guard::RouteMeta;

pub type RouteParams = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteLocation {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl RouteLocation {
    /// Path plus serialized query, as written to the address bar.
    pub fn href(&self) -> String {
        match build_query(&self.query) {
            Some(qs) => format!("{}?{}", self.path, qs),
            None => self.path.clone(),
        }
    }

    pub fn from_window() -> Self {
        let Some(location) = window().map(|w| w.location()) else {
            return Self::default();
        };
        let path = location.pathname().unwrap_or_else(|_| "/".to_string());
        let search = location.search().unwrap_or_default();
        Self {
            path,
            query: parse_query(search.trim_start_matches('?')),
        }
    }
}

pub fn parse_query(raw: &str) -> BTreeMap<String, String> {
    if raw.is_empty() {
        return BTreeMap::new();
    }
    serde_qs::from_str(raw).unwrap_or_default()
}

pub fn build_query(query: &BTreeMap<String, String>) -> Option<String> {
    if query.is_empty() {
        return None;
    }
    serde_qs::to_string(query).ok().filter(|s| !s.is_empty())
}

/// One entry of the route table.
pub struct RouteDef {
    pub name: &'static str,
    /// Path pattern; `:name` segments capture parameters.
    pub pattern: &'static str,
    pub meta: fn() -> RouteMeta,
    pub view: fn(RouteParams) -> AnyView,
}

/// Matches `path` against `pattern`, capturing `:name` segments.
/// Captured values are percent-decoded.
pub fn match_path(pattern: &str, path: &str) -> Option<RouteParams> {
    let pattern_segments: Vec<&str> = pattern.trim_matches('/').split('/').collect();
    let path_segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    if pattern_segments.len() != path_segments.len() {
        return None;
    }
    let mut params = RouteParams::new();
    for (pat, seg) in pattern_segments.iter().zip(&path_segments) {
        if let Some(name) = pat.strip_prefix(':') {
            let decoded = urlencoding::decode(seg).ok()?;
            params.insert(name.to_string(), decoded.into_owned());
        } else if pat != seg {
            return None;
        }
    }
    Some(params)
}

/// First route whose pattern matches, with its captured parameters.
pub fn find_route_in<'a>(
    routes: &'a [RouteDef],
    path: &str,
) -> Option<(&'a RouteDef, RouteParams)> {
    routes
        .iter()
        .find_map(|route| match_path(route.pattern, path).map(|params| (route, params)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Push,
    Replace,
}

#[derive(Clone, Copy)]
pub struct Router {
    pub location: RwSignal<RouteLocation>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            location: RwSignal::new(RouteLocation::from_window()),
        }
    }

    /// Writes `href` into the history and updates the location signal.
    pub fn commit(&self, href: &str, mode: HistoryMode) {
        let (path, query) = match href.split_once('?') {
            Some((p, q)) => (p.to_string(), parse_query(q)),
            None => (href.to_string(), BTreeMap::new()),
        };
        let next = RouteLocation { path, query };
        if next == self.location.get_untracked() {
            return;
        }
        write_history(&next.href(), mode);
        self.location.set(next);
    }

    /// Replaces only the query component of the current location. The path
    /// is untouched, so views keyed on the path do not remount.
    pub fn replace_query(&self, query: &BTreeMap<String, String>) {
        let current = self.location.get_untracked();
        if current.query == *query {
            return;
        }
        let next = RouteLocation {
            path: current.path,
            query: query.clone(),
        };
        write_history(&next.href(), HistoryMode::Replace);
        self.location.set(next);
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

fn write_history(href: &str, mode: HistoryMode) {
    let Some(history) = window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(href)),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(href)),
    };
    if let Err(err) = result {
        log::warn!("history update failed: {err:?}");
    }
}

pub fn use_router() -> Router {
    use_context::<Router>().expect("Router not provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_patterns_match_exactly() {
        assert!(match_path("/content/products", "/content/products").is_some());
        assert!(match_path("/content/products", "/content/news").is_none());
        assert!(match_path("/content/products", "/content/products/7").is_none());
    }

    #[test]
    fn param_segments_capture_and_decode() {
        let params = match_path("/content/products/:id/edit", "/content/products/a%20b/edit")
            .expect("should match");
        assert_eq!(params["id"], "a b");
    }

    #[test]
    fn root_pattern_matches_root_only() {
        assert!(match_path("/", "/").is_some());
        assert!(match_path("/", "/login").is_none());
    }

    #[test]
    fn href_serializes_query_sorted() {
        let location = RouteLocation {
            path: "/content/products".to_string(),
            query: BTreeMap::from([
                ("page".to_string(), "2".to_string()),
                ("category".to_string(), "otc".to_string()),
            ]),
        };
        assert_eq!(location.href(), "/content/products?category=otc&page=2");
    }

    #[test]
    fn query_round_trips() {
        let parsed = parse_query("page=2&search=asp%20irin");
        assert_eq!(parsed["page"], "2");
        assert_eq!(parsed["search"], "asp irin");
        let rebuilt = build_query(&parsed).unwrap();
        assert_eq!(parse_query(&rebuilt), parsed);
    }
}
