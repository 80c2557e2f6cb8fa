//! Row selection helpers over a set of row ids.
//!
//! Selection is cleared whenever the backend query changes; these helpers
//! only implement the toggle semantics within one result page.

use std::collections::HashSet;

pub fn toggle_row(selected: &mut HashSet<String>, id: &str) {
    if !selected.remove(id) {
        selected.insert(id.to_string());
    }
}

/// Header checkbox: if every visible row is selected, deselect them all,
/// otherwise select every visible row. Rows from other pages are untouched.
pub fn toggle_all<'a>(selected: &mut HashSet<String>, visible: impl Iterator<Item = &'a str> + Clone) {
    if all_selected(selected, visible.clone()) {
        for id in visible {
            selected.remove(id);
        }
    } else {
        for id in visible {
            selected.insert(id.to_string());
        }
    }
}

/// True when every visible row is selected. An empty page counts as not
/// selected so the header checkbox stays unchecked.
pub fn all_selected<'a>(
    selected: &HashSet<String>,
    mut visible: impl Iterator<Item = &'a str>,
) -> bool {
    let mut any = false;
    let all = visible.all(|id| {
        any = true;
        selected.contains(id)
    });
    any && all
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn toggle_row_is_an_involution() {
        let mut selected = HashSet::new();
        toggle_row(&mut selected, "a");
        assert!(selected.contains("a"));
        toggle_row(&mut selected, "a");
        assert!(selected.is_empty());
    }

    #[test]
    fn toggle_all_selects_then_deselects_visible_rows() {
        let visible = ids(&["a", "b", "c"]);
        let mut selected: HashSet<String> = HashSet::from(["x".to_string()]);

        toggle_all(&mut selected, visible.iter().map(String::as_str));
        assert!(all_selected(&selected, visible.iter().map(String::as_str)));
        assert!(selected.contains("x"));

        toggle_all(&mut selected, visible.iter().map(String::as_str));
        assert!(!selected.contains("a"));
        assert!(selected.contains("x"));
    }

    #[test]
    fn partial_selection_means_select_all() {
        let visible = ids(&["a", "b"]);
        let mut selected: HashSet<String> = HashSet::from(["a".to_string()]);
        toggle_all(&mut selected, visible.iter().map(String::as_str));
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn empty_page_is_never_fully_selected() {
        let selected = HashSet::new();
        assert!(!all_selected(&selected, std::iter::empty()));
    }
}
