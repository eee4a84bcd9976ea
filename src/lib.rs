//! # json-tree-view
//!
//! The rendering and state engine behind an embeddable JSON viewer: a host
//! application hands over raw JSON text plus display options, and gets back
//! a fully resolved visual tree it can draw with any toolkit.
//!
//! The engine decides, per node, how a value should be shown (plain
//! primitive, key/value object table, multi-column table for uniform object
//! arrays, flat list for primitive arrays, or a mixed list), tracks
//! expand/collapse and pagination state under stable string paths, and
//! computes substring search matches together with the set of ancestors
//! that must be forced open to reveal them.
//!
//! ## Quick start
//!
//! ```rust
//! use json_tree_view::{JsonViewer, ViewerOptions};
//!
//! let viewer = JsonViewer::new(ViewerOptions::default());
//! viewer.set_source(r#"{"name":"Alice","scores":[95,87,92]}"#);
//!
//! let view = viewer.view();
//! // hand `view` to the presentation layer
//! # drop(view);
//! ```
//!
//! User interaction flows back in through [`JsonViewer::toggle`],
//! [`JsonViewer::set_page`], [`JsonViewer::set_search_term_debounced`] and
//! [`JsonViewer::value_clicked`]; call [`JsonViewer::view`] again after any
//! of them for the updated tree.
//!
//! The document itself is never mutated. Malformed input never panics; it
//! surfaces as an error body in the returned view.

mod clipboard;
mod debounce;
mod expand;
mod options;
mod page;
mod parse;
mod path;
mod render;
mod search;
mod state;
mod types;
mod value;
mod viewer;

pub use crate::clipboard::{ClipboardCapability, NullClipboard, SystemClipboard};
pub use crate::debounce::Debouncer;
pub use crate::expand::{initialize, is_expanded, set_all, toggle, ExpandState};
pub use crate::options::ViewerOptions;
pub use crate::page::{
    controls, display_window, page_count, page_summary, page_window, should_paginate,
    visible_slice, PageControls, PageEntry, PageSummary, PaginationState,
};
pub use crate::parse::{parse_document, ParseError};
pub use crate::path::{depth, is_descendant, join_index, join_key, resolve, steps, ROOT_TOKEN};
pub use crate::render::{
    render_tree, select_strategy, ItemsContent, ObjectContent, PrimitiveContent, RenderContent,
    RenderContext, RenderNode, Strategy, TableContent, TableRow, MAX_DEPTH_CLASS,
};
pub use crate::search::{expansion_closure, highlight_spans, match_key_set, search};
pub use crate::types::{
    DataType, HighlightSpan, MatchKind, ResolvedTheme, SearchMatch, Theme, ViewMode,
};
pub use crate::value::{
    count_items, detect_data_type, format_date, format_value, is_date_string, is_email_string,
    is_primitive, is_table_compatible, is_url_string, table_columns, truncate_display,
};
pub use crate::viewer::{JsonViewer, ViewBody, ViewState};
