use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::expand::ExpandState;
use crate::page::PaginationState;
use crate::parse::ParseError;
use crate::types::SearchMatch;

/// Results of the most recent search pass, recomputed as one unit so a
/// render never sees matches from one term and a closure from another.
#[derive(Debug, Default)]
pub struct SearchState {
    pub term: String,
    pub matches: Vec<SearchMatch>,
    /// Paths forced open so every match stays visible.
    pub forced_open: HashSet<String>,
    /// `path:key` / `path:value` membership keys for render-time hit tests.
    pub match_keys: HashSet<String>,
}

/// All state owned by one viewer instance. Every piece is recomputed or
/// patched between render passes; a render pass only ever reads.
pub struct ViewerState {
    pub doc: RwLock<Option<Arc<Value>>>,
    pub parse_error: RwLock<Option<ParseError>>,
    pub raw_text: RwLock<String>,
    pub expand: RwLock<ExpandState>,
    pub pages: RwLock<PaginationState>,
    pub search: RwLock<SearchState>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            doc: RwLock::new(None),
            parse_error: RwLock::new(None),
            raw_text: RwLock::new(String::new()),
            expand: RwLock::new(ExpandState::new()),
            pages: RwLock::new(PaginationState::new()),
            search: RwLock::new(SearchState::default()),
        }
    }
}
