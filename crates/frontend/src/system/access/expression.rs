//! Permission expressions and the checks evaluated against a session's
//! effective permission set.
//!
//! A route (or a UI element) declares what it requires as a
//! [`PermissionExpression`]: a single key, a list of keys and/or labeled
//! groups, or a single labeled group. Checking is OR-based: holding any one
//! of the resolved keys is enough. The [`catalog::SUPER_USER`] key
//! short-circuits every check.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::catalog;

/// One entry of a list expression. Values that are neither a key nor a
/// labeled group (possible when metadata comes from config) deserialize into
/// `Other` and are ignored during resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListEntry {
    Key(String),
    Labeled(BTreeMap<String, String>),
    Other(serde_json::Value),
}

/// The shapes a permission requirement can take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermissionExpression {
    Single(String),
    List(Vec<ListEntry>),
    Labeled(BTreeMap<String, String>),
}

impl PermissionExpression {
    pub fn single(key: impl Into<String>) -> Self {
        Self::Single(key.into())
    }

    /// Builds a labeled group from a catalog `ALL` table.
    pub fn labeled(pairs: &[(&str, &str)]) -> Self {
        Self::Labeled(
            pairs
                .iter()
                .map(|(label, key)| (label.to_string(), key.to_string()))
                .collect(),
        )
    }

    /// Flattens the expression into the plain permission keys it names.
    /// Duplicates are harmless and preserved.
    pub fn resolve(&self) -> Vec<String> {
        match self {
            Self::Single(key) => vec![key.clone()],
            Self::Labeled(group) => group.values().cloned().collect(),
            Self::List(entries) => entries
                .iter()
                .flat_map(|entry| match entry {
                    ListEntry::Key(key) => vec![key.clone()],
                    ListEntry::Labeled(group) => group.values().cloned().collect(),
                    ListEntry::Other(_) => Vec::new(),
                })
                .collect(),
        }
    }
}

/// True when `held` satisfies `required`: the bypass key wins outright,
/// otherwise any intersection with the resolved keys suffices. An expression
/// resolving to nothing fails closed.
pub fn check(held: &HashSet<String>, required: &PermissionExpression) -> bool {
    if held.contains(catalog::SUPER_USER) {
        return true;
    }
    required.resolve().iter().any(|key| held.contains(key))
}

/// Role membership test, bypass-aware the same way as [`check`].
pub fn check_role(held: &HashSet<String>, role_keys: &[String], role_key: &str) -> bool {
    if held.contains(catalog::SUPER_USER) {
        return true;
    }
    role_keys.iter().any(|key| key == role_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[&str]) -> HashSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn bypass_satisfies_any_expression() {
        let super_user = held(&[catalog::SUPER_USER]);
        assert!(check(&super_user, &PermissionExpression::single("anything")));
        assert!(check(&super_user, &PermissionExpression::List(vec![])));
        assert!(check(
            &super_user,
            &PermissionExpression::Labeled(BTreeMap::new())
        ));
    }

    #[test]
    fn check_is_intersection_or() {
        let user = held(&["cms.news.view"]);
        let expr = PermissionExpression::labeled(catalog::cms::news::ALL);
        assert!(check(&user, &expr));

        let other = held(&["cms.products.view"]);
        assert!(!check(&other, &expr));
    }

    #[test]
    fn empty_expression_fails_closed() {
        let user = held(&["cms.news.view"]);
        assert!(!check(&user, &PermissionExpression::List(vec![])));
        assert!(!check(&user, &PermissionExpression::Labeled(BTreeMap::new())));
    }

    #[test]
    fn list_flattens_keys_and_groups_in_order() {
        let expr = PermissionExpression::List(vec![
            ListEntry::Key("a".into()),
            ListEntry::Labeled(BTreeMap::from([("x".to_string(), "b".to_string())])),
            ListEntry::Key("c".into()),
        ]);
        assert_eq!(expr.resolve(), vec!["a", "b", "c"]);
    }

    #[test]
    fn malformed_list_entries_are_ignored() {
        let expr: PermissionExpression =
            serde_json::from_str(r#"["a", 42, {"view": "b"}, null]"#).unwrap();
        assert_eq!(expr.resolve(), vec!["a", "b"]);
    }

    #[test]
    fn check_role_respects_bypass() {
        let roles = vec!["editor".to_string()];
        assert!(check_role(&held(&[]), &roles, "editor"));
        assert!(!check_role(&held(&[]), &roles, "admin"));
        assert!(check_role(&held(&[catalog::SUPER_USER]), &roles, "admin"));
    }
}
