use serde_json::Value;

/// Path of the document root when used as a state-map key. The empty string
/// addresses the root while building child paths; the rendered root node and
/// the expand/pagination maps use this token instead so that it never
/// collides with a top-level object key produced by joining onto "".
pub const ROOT_TOKEN: &str = "root";

/// Append an object key to a path. At the root the key stands alone.
pub fn join_key(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{base}.{key}")
    }
}

/// Append an array index to a path. At the root the index stands alone.
pub fn join_index(base: &str, index: usize) -> String {
    if base.is_empty() {
        index.to_string()
    } else {
        format!("{base}[{index}]")
    }
}

/// Split a path back into its steps. Splits on `.`, `[` and `]` boundaries,
/// discarding empty tokens, so `items[2].name` yields `["items", "2", "name"]`.
pub fn steps(path: &str) -> Vec<&str> {
    path.split(['.', '[', ']'])
        .filter(|part| !part.is_empty())
        .collect()
}

/// Number of steps from the root; the root itself has depth 0.
pub fn depth(path: &str) -> usize {
    if path.is_empty() || path == ROOT_TOKEN {
        return 0;
    }
    steps(path).len()
}

/// Whether `path` addresses a node inside the subtree at `ancestor`.
/// The root is an ancestor of every path.
pub fn is_descendant(ancestor: &str, path: &str) -> bool {
    if ancestor.is_empty() || ancestor == ROOT_TOKEN {
        return true;
    }
    path.starts_with(&format!("{ancestor}.")) || path.starts_with(&format!("{ancestor}["))
}

/// Walk a parsed document down to the node a path addresses. Steps are
/// untyped, so each one is tried as an object key first and as an array
/// index second.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() || path == ROOT_TOKEN {
        return Some(root);
    }
    let mut current = root;
    for step in steps(path) {
        current = match current {
            Value::Object(map) => map.get(step)?,
            Value::Array(items) => items.get(step.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
