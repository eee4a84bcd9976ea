use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::path::{self, ROOT_TOKEN};

/// Per-path expanded/collapsed flags for container nodes. Primitives never
/// get an entry. Rebuilt whenever the source document changes; entries for
/// paths that no longer exist simply go stale and are ignored.
pub type ExpandState = HashMap<String, bool>;

/// Walk the document and record a flag for every container node, expanding
/// those shallower than `initial_depth`. A depth of -1 expands everything.
pub fn initialize(root: &Value, initial_depth: i32) -> ExpandState {
    let mut state = ExpandState::new();
    visit_containers(
        root,
        "",
        0,
        &mut |depth| initial_depth == -1 || (depth as i32) < initial_depth,
        &mut state,
    );
    state
}

/// Record the same flag for every container node.
pub fn set_all(root: &Value, expanded: bool) -> ExpandState {
    let mut state = ExpandState::new();
    visit_containers(root, "", 0, &mut |_| expanded, &mut state);
    state
}

fn visit_containers(
    value: &Value,
    current_path: &str,
    depth: usize,
    decide: &mut impl FnMut(usize) -> bool,
    state: &mut ExpandState,
) {
    match value {
        Value::Object(map) => {
            state.insert(state_key(current_path), decide(depth));
            for (k, child) in map {
                visit_containers(child, &path::join_key(current_path, k), depth + 1, decide, state);
            }
        }
        Value::Array(items) => {
            state.insert(state_key(current_path), decide(depth));
            for (i, item) in items.iter().enumerate() {
                visit_containers(item, &path::join_index(current_path, i), depth + 1, decide, state);
            }
        }
        _ => {}
    }
}

fn state_key(current_path: &str) -> String {
    if current_path.is_empty() {
        ROOT_TOKEN.to_string()
    } else {
        current_path.to_string()
    }
}

/// Flip the flag at a path. A path with no entry counts as expanded, so the
/// first toggle on an untracked node collapses it.
pub fn toggle(state: &mut ExpandState, p: &str) {
    let current = state.get(p).copied().unwrap_or(true);
    state.insert(p.to_string(), !current);
}

/// Effective visibility: the stored flag (absent means expanded) widened by
/// the search expansion closure. The closure only ever forces open.
pub fn is_expanded(state: &ExpandState, p: &str, forced_open: &HashSet<String>) -> bool {
    state.get(p).copied().unwrap_or(true) || forced_open.contains(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "user": {"name": "John", "active": true},
            "items": [1, 2],
            "metadata": null
        })
    }

    #[test]
    fn initialize_expands_only_above_the_depth_cutoff() {
        let state = initialize(&sample(), 1);
        assert_eq!(state.get("root"), Some(&true));
        // depth 1 is not shallower than the cutoff of 1
        assert_eq!(state.get("user"), Some(&false));
        assert_eq!(state.get("items"), Some(&false));
        // primitives never get entries
        assert!(!state.contains_key("user.name"));
        assert!(!state.contains_key("user.active"));
        assert!(!state.contains_key("metadata"));
    }

    #[test]
    fn initialize_with_sentinel_expands_everything() {
        let doc = json!({"a": {"b": {"c": [1]}}});
        let state = initialize(&doc, -1);
        assert!(state.values().all(|&expanded| expanded));
        assert_eq!(state.len(), 4); // root, a, a.b, a.b.c
    }

    #[test]
    fn initialize_with_zero_collapses_the_root_too() {
        let state = initialize(&sample(), 0);
        assert_eq!(state.get("root"), Some(&false));
        assert_eq!(state.get("user"), Some(&false));
    }

    #[test]
    fn set_all_is_idempotent() {
        let doc = sample();
        let once = set_all(&doc, true);
        let twice = set_all(&doc, true);
        assert_eq!(once, twice);
        assert!(once.values().all(|&expanded| expanded));

        let collapsed = set_all(&doc, false);
        assert!(collapsed.values().all(|&expanded| !expanded));
        assert_eq!(collapsed.len(), once.len());
    }

    #[test]
    fn toggle_defaults_absent_entries_to_expanded() {
        let mut state = ExpandState::new();
        toggle(&mut state, "user");
        assert_eq!(state.get("user"), Some(&false));
        toggle(&mut state, "user");
        assert_eq!(state.get("user"), Some(&true));
    }

    #[test]
    fn closure_forces_collapsed_nodes_open() {
        let mut state = initialize(&sample(), 1);
        let mut forced = HashSet::new();
        assert!(!is_expanded(&state, "user", &forced));
        forced.insert("user".to_string());
        assert!(is_expanded(&state, "user", &forced));
        // but an explicit expansion survives without the closure
        toggle(&mut state, "items");
        assert!(is_expanded(&state, "items", &HashSet::new()));
    }
}
