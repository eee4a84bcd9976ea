use std::collections::HashSet;

use serde_json::Value;

use crate::path::{self, ROOT_TOKEN};
use crate::types::{HighlightSpan, MatchKind, SearchMatch};
use crate::value::{format_value, is_primitive};

/// Scan the whole tree for case-insensitive substring hits on object keys
/// and primitive values. Traversal is depth-first in key insertion order,
/// then array order; a blank term means search is inactive and yields
/// nothing.
pub fn search(root: &Value, term: &str) -> Vec<SearchMatch> {
    let mut matches = Vec::new();
    if term.trim().is_empty() {
        return matches;
    }
    let needle = term.to_lowercase();
    search_recursive(root, "", None, &needle, &mut matches);
    matches
}

fn search_recursive(
    value: &Value,
    current_path: &str,
    key_name: Option<&str>,
    needle: &str,
    matches: &mut Vec<SearchMatch>,
) {
    let key_matched = key_name.is_some_and(|key| key.to_lowercase().contains(needle));
    if key_matched {
        matches.push(SearchMatch {
            path: current_path.to_string(),
            key: key_name.map(str::to_string),
            value: None,
            match_kind: MatchKind::Key,
        });
    }

    if is_primitive(value) {
        let text = format_value(value);
        if text.to_lowercase().contains(needle) {
            if key_matched {
                // the key hit above is the only possible record for this path
                if let Some(existing) = matches.last_mut() {
                    existing.value = Some(text);
                    existing.match_kind = MatchKind::Both;
                }
            } else {
                matches.push(SearchMatch {
                    path: current_path.to_string(),
                    key: None,
                    value: Some(text),
                    match_kind: MatchKind::Value,
                });
            }
        }
    }

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = path::join_key(current_path, key);
                search_recursive(child, &child_path, Some(key), needle, matches);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let child_path = path::join_index(current_path, index);
                search_recursive(item, &child_path, None, needle, matches);
            }
        }
        _ => {}
    }
}

/// Every path that must be treated as expanded for the given matches to be
/// visible: each match path plus all of its ancestors, the ancestors
/// rebuilt by progressively re-joining the split steps. The result is
/// additive; it never marks anything collapsed.
pub fn expansion_closure(matches: &[SearchMatch]) -> HashSet<String> {
    let mut paths = HashSet::new();
    for m in matches {
        paths.insert(m.path.clone());
        let mut current = String::new();
        for part in path::steps(&m.path) {
            if current.is_empty() {
                current = part.to_string();
            } else {
                current = format!("{current}.{part}");
            }
            paths.insert(current.clone());
        }
    }
    paths
}

/// Membership keys (`path:key` / `path:value`) for constant-time hit tests
/// while rendering. A match at the document root is keyed under the root
/// token so it lines up with the rendered root path.
pub fn match_key_set(matches: &[SearchMatch]) -> HashSet<String> {
    let mut keys = HashSet::new();
    for m in matches {
        let p = if m.path.is_empty() { ROOT_TOKEN } else { m.path.as_str() };
        if matches!(m.match_kind, MatchKind::Key | MatchKind::Both) {
            keys.insert(format!("{p}:key"));
        }
        if matches!(m.match_kind, MatchKind::Value | MatchKind::Both) {
            keys.insert(format!("{p}:value"));
        }
    }
    keys
}

/// Segment display text into highlight runs around each case-insensitive
/// occurrence of the term. Text without a hit (or a blank term) comes back
/// as a single pass-through run.
pub fn highlight_spans(text: &str, term: &str) -> Vec<HighlightSpan> {
    let pass_through = || {
        vec![HighlightSpan {
            before: String::new(),
            matched: String::new(),
            after: text.to_string(),
        }]
    };
    if term.trim().is_empty() {
        return pass_through();
    }

    let lower_text = text.to_lowercase();
    let lower_term = term.to_lowercase();
    // offsets into the lowered text are only transferable when lowering
    // kept the byte length; otherwise skip highlighting rather than split
    // the original at the wrong boundary
    if lower_text.len() != text.len() {
        return pass_through();
    }

    let mut spans: Vec<HighlightSpan> = Vec::new();
    let mut last_end = 0usize;
    let mut from = 0usize;
    while let Some(pos) = lower_text[from..].find(&lower_term) {
        let start = from + pos;
        let end = start + lower_term.len();
        let (Some(before), Some(matched)) = (text.get(last_end..start), text.get(start..end))
        else {
            break;
        };
        spans.push(HighlightSpan {
            before: before.to_string(),
            matched: matched.to_string(),
            after: String::new(),
        });
        last_end = end;
        from = end;
    }

    if spans.is_empty() {
        return pass_through();
    }
    if let (Some(last), Some(rest)) = (spans.last_mut(), text.get(last_end..)) {
        last.after = rest.to_string();
    }
    spans
}
