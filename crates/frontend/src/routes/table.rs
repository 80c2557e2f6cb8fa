//! Route table and guarded navigation.
//!
//! Every navigation, including the initial load and browser back/forward,
//! funnels through [`Navigator`]: resolve the route's metadata, let the
//! session guard decide, then commit either the requested location or the
//! redirect target.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{find_route_in, HistoryMode, RouteDef, RouteLocation, RouteParams, Router};
use crate::domain::news::ui::{NewsDetails, NewsList};
use crate::domain::products::ui::{ProductDetails, ProductList};
use crate::shared::api::ApiClient;
use crate::system::access::catalog;
use crate::system::access::expression::PermissionExpression;
use crate::system::auth::guard::{GuardDecision, RouteMeta};
use crate::system::auth::SessionStore;
use crate::system::pages::{DashboardPage, LoginPage, NotFoundPage, UnauthorizedPage};

fn meta_open() -> RouteMeta {
    RouteMeta::default()
}

fn meta_guest() -> RouteMeta {
    RouteMeta::guest()
}

fn meta_dashboard() -> RouteMeta {
    RouteMeta::with_permission(PermissionExpression::single(catalog::dashboard::VIEW))
}

fn meta_products() -> RouteMeta {
    RouteMeta::with_permission(PermissionExpression::labeled(catalog::cms::products::ALL))
}

fn meta_products_create() -> RouteMeta {
    RouteMeta::with_permission(PermissionExpression::single(catalog::cms::products::CREATE))
}

fn meta_products_edit() -> RouteMeta {
    RouteMeta::with_permission(PermissionExpression::single(catalog::cms::products::UPDATE))
}

fn meta_news() -> RouteMeta {
    RouteMeta::with_permission(PermissionExpression::labeled(catalog::cms::news::ALL))
}

fn meta_news_create() -> RouteMeta {
    RouteMeta::with_permission(PermissionExpression::single(catalog::cms::news::CREATE))
}

fn meta_news_edit() -> RouteMeta {
    RouteMeta::with_permission(PermissionExpression::single(catalog::cms::news::UPDATE))
}

fn login_view(_params: RouteParams) -> AnyView {
    view! { <LoginPage/> }.into_any()
}

fn dashboard_view(_params: RouteParams) -> AnyView {
    view! { <DashboardPage/> }.into_any()
}

fn unauthorized_view(_params: RouteParams) -> AnyView {
    view! { <UnauthorizedPage/> }.into_any()
}

fn products_list_view(_params: RouteParams) -> AnyView {
    view! { <ProductList/> }.into_any()
}

fn products_create_view(_params: RouteParams) -> AnyView {
    view! { <ProductDetails/> }.into_any()
}

fn products_edit_view(params: RouteParams) -> AnyView {
    let id = params.get("id").cloned().unwrap_or_default();
    view! { <ProductDetails id=id/> }.into_any()
}

fn news_list_view(_params: RouteParams) -> AnyView {
    view! { <NewsList/> }.into_any()
}

fn news_create_view(_params: RouteParams) -> AnyView {
    view! { <NewsDetails/> }.into_any()
}

fn news_edit_view(params: RouteParams) -> AnyView {
    let id = params.get("id").cloned().unwrap_or_default();
    view! { <NewsDetails id=id/> }.into_any()
}

pub static ROUTES: &[RouteDef] = &[
    RouteDef {
        name: "login",
        pattern: "/login",
        meta: meta_guest,
        view: login_view,
    },
    RouteDef {
        name: "dashboard",
        pattern: "/",
        meta: meta_dashboard,
        view: dashboard_view,
    },
    RouteDef {
        name: "products",
        pattern: "/content/products",
        meta: meta_products,
        view: products_list_view,
    },
    RouteDef {
        name: "products-create",
        pattern: "/content/products/create",
        meta: meta_products_create,
        view: products_create_view,
    },
    RouteDef {
        name: "products-edit",
        pattern: "/content/products/:id/edit",
        meta: meta_products_edit,
        view: products_edit_view,
    },
    RouteDef {
        name: "news",
        pattern: "/content/news",
        meta: meta_news,
        view: news_list_view,
    },
    RouteDef {
        name: "news-create",
        pattern: "/content/news/create",
        meta: meta_news_create,
        view: news_create_view,
    },
    RouteDef {
        name: "news-edit",
        pattern: "/content/news/:id/edit",
        meta: meta_news_edit,
        view: news_edit_view,
    },
    RouteDef {
        name: "unauthorized",
        pattern: "/unauthorized",
        meta: meta_open,
        view: unauthorized_view,
    },
];

pub fn find_route(path: &str) -> Option<(&'static RouteDef, RouteParams)> {
    find_route_in(ROUTES, path)
}

/// Login URL carrying the denied location, so the target survives a reload
/// of the login page.
fn login_href(return_to: &str) -> String {
    if return_to.is_empty() || return_to == "/" || return_to.starts_with("/login") {
        "/login".to_string()
    } else {
        format!("/login?redirect={}", urlencoding::encode(return_to))
    }
}

/// Guarded navigation handle, provided in context.
#[derive(Clone)]
pub struct Navigator {
    pub router: Router,
    pub session: SessionStore,
    pub client: ApiClient,
}

impl Navigator {
    pub fn new(router: Router, session: SessionStore, client: ApiClient) -> Self {
        Self {
            router,
            session,
            client,
        }
    }

    /// Navigates to `href` (path plus optional query), creating a history
    /// entry when the guard allows it.
    pub fn push(&self, href: &str) {
        self.navigate(href, HistoryMode::Push);
    }

    fn navigate(&self, href: &str, mode: HistoryMode) {
        let this = self.clone();
        let href = href.to_string();
        spawn_local(async move {
            this.resolve_and_commit(&href, mode).await;
        });
    }

    /// Runs the guard for the location already in the address bar: initial
    /// page load and popstate. Redirects replace instead of pushing, so the
    /// history stays sane.
    pub fn resolve_current(&self) {
        let href = self.router.location.get_untracked().href();
        let this = self.clone();
        spawn_local(async move {
            this.resolve_and_commit(&href, HistoryMode::Replace).await;
        });
    }

    async fn resolve_and_commit(&self, href: &str, mode: HistoryMode) {
        let path = href.split('?').next().unwrap_or(href);
        let meta = find_route(path)
            .map(|(route, _)| (route.meta)())
            .unwrap_or_default();
        let decision = self
            .session
            .resolve_navigation(&self.client, &meta, href)
            .await;
        match decision {
            GuardDecision::Allowed => self.router.commit(href, mode),
            GuardDecision::RedirectLogin { return_to } => {
                self.router.commit(&login_href(&return_to), mode)
            }
            GuardDecision::RedirectHome => self.router.commit("/", mode),
            GuardDecision::RedirectUnauthorized => self.router.commit("/unauthorized", mode),
        }
    }

    /// Re-runs the guard whenever the browser restores a history entry.
    pub fn listen_popstate(&self) {
        let this = self.clone();
        let closure = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(
            move |_event: web_sys::PopStateEvent| {
                let _ = this.router.location.try_set(RouteLocation::from_window());
                this.resolve_current();
            },
        );
        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }
}

pub fn use_navigator() -> Navigator {
    use_context::<Navigator>().expect("Navigator not provided")
}

/// Renders the view matched by the current path. Tracks only the path, so
/// query rewrites by the table engine never remount the active view.
#[component]
pub fn RouterView() -> impl IntoView {
    let router = super::use_router();
    let path = Memo::new(move |_| router.location.with(|l| l.path.clone()));
    view! {
        {move || {
            let current = path.get();
            match find_route(&current) {
                Some((route, params)) => (route.view)(params),
                None => view! { <NotFoundPage/> }.into_any(),
            }
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_table_matches_expected_paths() {
        assert_eq!(find_route("/").unwrap().0.name, "dashboard");
        assert_eq!(find_route("/login").unwrap().0.name, "login");
        assert_eq!(
            find_route("/content/products/create").unwrap().0.name,
            "products-create"
        );
        let (route, params) = find_route("/content/news/42/edit").unwrap();
        assert_eq!(route.name, "news-edit");
        assert_eq!(params["id"], "42");
        assert!(find_route("/nowhere").is_none());
    }

    #[test]
    fn login_redirect_preserves_the_requested_url() {
        assert_eq!(
            login_href("/content/products?page=2"),
            "/login?redirect=%2Fcontent%2Fproducts%3Fpage%3D2"
        );
        assert_eq!(login_href(""), "/login");
        assert_eq!(login_href("/"), "/login");
        assert_eq!(login_href("/login"), "/login");
    }

    #[test]
    fn every_route_meta_builds() {
        for route in ROUTES {
            let _ = (route.meta)();
        }
    }
}
