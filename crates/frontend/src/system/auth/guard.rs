//! Navigation guard.
//!
//! [`decide`] is the pure rule set evaluated for every route change, fed by a
//! [`SessionSnapshot`] taken after any pending user fetch has settled. The
//! async wrapper that performs that fetch lives on
//! [`SessionStore`](super::context::SessionStore) so the decision itself
//! stays testable without a browser.

use std::collections::HashSet;

use crate::system::access::expression::{check, PermissionExpression};

/// Declarative route requirements, attached to the route table.
#[derive(Debug, Clone, Default)]
pub struct RouteMeta {
    /// Route is only reachable with an authenticated session.
    pub requires_auth: bool,
    /// Route is only reachable without one (login).
    pub is_guest: bool,
    /// Additional permission requirement, checked after authentication.
    pub permission: Option<PermissionExpression>,
}

impl RouteMeta {
    pub fn requires_auth() -> Self {
        Self {
            requires_auth: true,
            ..Self::default()
        }
    }

    pub fn guest() -> Self {
        Self {
            is_guest: true,
            ..Self::default()
        }
    }

    pub fn with_permission(permission: PermissionExpression) -> Self {
        Self {
            requires_auth: true,
            is_guest: false,
            permission: Some(permission),
        }
    }
}

/// Session facts the guard decides on. Snapshot, not live signals.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub is_super_user: bool,
    pub permissions: HashSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allowed,
    /// Send to login, remembering where the user wanted to go.
    RedirectLogin { return_to: String },
    /// Guest-only route hit by an authenticated user.
    RedirectHome,
    /// Authenticated but lacking the required permission.
    RedirectUnauthorized,
}

/// Evaluates the guard rules in order: authentication first, then the
/// guest restriction, then permissions. `requested` is the full path with
/// query, preserved for the post-login redirect.
pub fn decide(meta: &RouteMeta, session: &SessionSnapshot, requested: &str) -> GuardDecision {
    if meta.requires_auth && !session.authenticated {
        return GuardDecision::RedirectLogin {
            return_to: requested.to_string(),
        };
    }
    if meta.is_guest && session.authenticated {
        return GuardDecision::RedirectHome;
    }
    if let Some(required) = &meta.permission {
        if session.is_super_user {
            return GuardDecision::Allowed;
        }
        if !check(&session.permissions, required) {
            return GuardDecision::RedirectUnauthorized;
        }
    }
    GuardDecision::Allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::access::catalog;

    fn session(authenticated: bool, permissions: &[&str]) -> SessionSnapshot {
        SessionSnapshot {
            authenticated,
            is_super_user: false,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn unauthenticated_user_is_sent_to_login_with_return_path() {
        let decision = decide(
            &RouteMeta::requires_auth(),
            &session(false, &[]),
            "/content/products?page=3",
        );
        assert_eq!(
            decision,
            GuardDecision::RedirectLogin {
                return_to: "/content/products?page=3".to_string()
            }
        );
    }

    #[test]
    fn authenticated_user_cannot_revisit_guest_routes() {
        let decision = decide(&RouteMeta::guest(), &session(true, &[]), "/login");
        assert_eq!(decision, GuardDecision::RedirectHome);
    }

    #[test]
    fn guest_route_allows_anonymous_visitors() {
        let decision = decide(&RouteMeta::guest(), &session(false, &[]), "/login");
        assert_eq!(decision, GuardDecision::Allowed);
    }

    #[test]
    fn missing_permission_redirects_to_unauthorized() {
        let meta = RouteMeta::with_permission(PermissionExpression::labeled(
            catalog::cms::products::ALL,
        ));
        let decision = decide(&meta, &session(true, &["cms.news.view"]), "/content/products");
        assert_eq!(decision, GuardDecision::RedirectUnauthorized);
    }

    #[test]
    fn any_key_of_a_labeled_group_suffices() {
        let meta =
            RouteMeta::with_permission(PermissionExpression::labeled(catalog::cms::leaders::ALL));
        let decision = decide(
            &meta,
            &session(true, &[catalog::cms::leaders::VIEW]),
            "/content/leaders",
        );
        assert_eq!(decision, GuardDecision::Allowed);
    }

    #[test]
    fn super_user_flag_bypasses_permission_checks() {
        let meta = RouteMeta::with_permission(PermissionExpression::single("cms.products.view"));
        let mut snap = session(true, &[]);
        snap.is_super_user = true;
        assert_eq!(decide(&meta, &snap, "/content/products"), GuardDecision::Allowed);
    }

    #[test]
    fn open_route_always_passes() {
        assert_eq!(
            decide(&RouteMeta::default(), &session(false, &[]), "/unauthorized"),
            GuardDecision::Allowed
        );
    }
}
