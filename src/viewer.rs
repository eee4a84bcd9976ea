use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;
use serde::Serialize;

use crate::clipboard::{ClipboardCapability, SystemClipboard};
use crate::debounce::Debouncer;
use crate::expand;
use crate::options::ViewerOptions;
use crate::parse;
use crate::path;
use crate::render::{self, RenderContext, RenderNode};
use crate::search;
use crate::state::{SearchState, ViewerState};
use crate::types::{ResolvedTheme, SearchMatch, ViewMode};
use crate::value;

/// The fully resolved view for one render pass: the container chrome plus
/// one of the three body states.
#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    pub theme: ResolvedTheme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<String>,
    pub body: ViewBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewBody {
    /// The source text did not parse. `message` is absent when the host
    /// suppresses parse errors; `raw` carries the unparsed text only when
    /// configured.
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw: Option<String>,
    },
    /// A parsed `null` document, or nothing loaded yet. Not an error.
    Empty,
    Tree {
        root: RenderNode,
        view_mode: ViewMode,
        #[serde(skip_serializing_if = "Option::is_none")]
        root_label: Option<String>,
        match_count: usize,
    },
}

type ClickHandler = Arc<dyn Fn() + Send + Sync>;

/// The embeddable viewer component. The host feeds it raw JSON text and
/// user events; [`JsonViewer::view`] produces the visual tree for the
/// current state. All operations are synchronous except the debounced
/// search path, which re-scans on a timer thread after input goes quiet.
pub struct JsonViewer {
    options: ViewerOptions,
    state: Arc<ViewerState>,
    debouncer: Debouncer,
    clipboard: Box<dyn ClipboardCapability>,
    on_value_click: Option<ClickHandler>,
    view_mode: RwLock<ViewMode>,
    system_prefers_dark: AtomicBool,
}

impl JsonViewer {
    pub fn new(options: ViewerOptions) -> Self {
        Self::with_clipboard(options, Box::new(SystemClipboard))
    }

    /// Build a viewer with a custom clipboard backend, e.g. a no-op one
    /// for headless hosts.
    pub fn with_clipboard(options: ViewerOptions, clipboard: Box<dyn ClipboardCapability>) -> Self {
        let debouncer = Debouncer::new(options.search_debounce);
        Self {
            options,
            state: Arc::new(ViewerState::default()),
            debouncer,
            clipboard,
            on_value_click: None,
            view_mode: RwLock::new(ViewMode::Rows),
            system_prefers_dark: AtomicBool::new(false),
        }
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Register the host callback invoked whenever a rendered value is
    /// activated. The callback takes no arguments; what a click means is
    /// up to the host.
    pub fn set_on_value_click(&mut self, handler: impl Fn() + Send + Sync + 'static) {
        self.on_value_click = Some(Arc::new(handler));
    }

    /// Tell the viewer what `Theme::Auto` should resolve to.
    pub fn set_system_prefers_dark(&self, dark: bool) {
        self.system_prefers_dark.store(dark, Ordering::Relaxed);
    }

    /// Replace the source document. On success all per-node state is
    /// rebuilt for the new tree; on failure the viewer switches to the
    /// error view and keeps the raw text around for optional display.
    pub fn set_source(&self, text: &str) {
        *self.state.raw_text.write() = text.to_string();
        self.debouncer.cancel();
        *self.state.search.write() = SearchState::default();
        self.state.pages.write().clear();

        match parse::parse_document(text) {
            Ok(root) => {
                let depth = if self.options.default_expanded {
                    -1
                } else {
                    self.options.initial_expand_depth
                };
                *self.state.expand.write() = expand::initialize(&root, depth);
                *self.state.parse_error.write() = None;
                *self.state.doc.write() = Some(Arc::new(root));
            }
            Err(err) => {
                *self.state.expand.write() = Default::default();
                *self.state.doc.write() = None;
                *self.state.parse_error.write() = Some(err);
            }
        }
    }

    /// Flip one container between expanded and collapsed.
    pub fn toggle(&self, node_path: &str) {
        expand::toggle(&mut self.state.expand.write(), node_path);
    }

    pub fn expand_all(&self) {
        self.set_all_expanded(true);
    }

    pub fn collapse_all(&self) {
        self.set_all_expanded(false);
    }

    fn set_all_expanded(&self, expanded: bool) {
        if !self.options.enable_expand_collapse_all {
            return;
        }
        let doc = self.state.doc.read().clone();
        if let Some(root) = doc {
            *self.state.expand.write() = expand::set_all(&root, expanded);
        }
    }

    /// Jump an array node to a page. Out-of-range pages are kept verbatim
    /// and simply render an empty slice.
    pub fn set_page(&self, node_path: &str, page: usize) {
        self.state.pages.write().insert(node_path.to_string(), page);
    }

    pub fn toggle_view_mode(&self) {
        let mut mode = self.view_mode.write();
        *mode = match *mode {
            ViewMode::Rows => ViewMode::Columns,
            ViewMode::Columns => ViewMode::Rows,
        };
    }

    /// Run a search immediately, replacing any pending debounced one.
    pub fn set_search_term(&self, term: &str) {
        if !self.options.enable_search {
            return;
        }
        self.debouncer.cancel();
        run_search(&self.state, term);
    }

    /// Schedule a search for after the input quiesces; of several calls in
    /// quick succession only the last term is scanned.
    pub fn set_search_term_debounced(&self, term: &str) {
        if !self.options.enable_search {
            return;
        }
        let state = Arc::clone(&self.state);
        let term = term.to_string();
        self.debouncer.submit(move || run_search(&state, &term));
    }

    /// Drop a pending debounced search without running it.
    pub fn cancel_pending_search(&self) {
        self.debouncer.cancel();
    }

    pub fn search_matches(&self) -> Vec<SearchMatch> {
        self.state.search.read().matches.clone()
    }

    /// Copy the stringified form of the primitive at a path. Containers
    /// and unknown paths are not copied.
    pub fn copy_value(&self, node_path: &str) -> bool {
        let doc = self.state.doc.read().clone();
        let Some(root) = doc else {
            return false;
        };
        let Some(target) = path::resolve(&root, node_path) else {
            return false;
        };
        if !value::is_primitive(target) {
            return false;
        }
        self.clipboard.copy_text(&value::format_value(target))
    }

    /// A rendered value was activated: copy it when copying is enabled,
    /// then hand control to the host's click callback.
    pub fn value_clicked(&self, node_path: &str) {
        if self.options.enable_copy_value {
            let copied = self.copy_value(node_path);
            debug!("value at {node_path} clicked, copied: {copied}");
        }
        if let Some(handler) = &self.on_value_click {
            handler();
        }
    }

    /// Produce the view for the current state.
    pub fn view(&self) -> ViewState {
        let theme = self
            .options
            .theme
            .resolve(self.system_prefers_dark.load(Ordering::Relaxed));
        let chrome = |body| ViewState {
            theme,
            custom_class: self.options.custom_class.clone(),
            max_height: self.options.max_height.clone(),
            body,
        };

        if let Some(err) = self.state.parse_error.read().clone() {
            let message = self.options.show_parse_errors.then(|| {
                self.options
                    .error_message
                    .clone()
                    .unwrap_or_else(|| err.to_string())
            });
            let raw = (self.options.show_parse_errors && self.options.show_raw_on_error)
                .then(|| self.state.raw_text.read().clone());
            return chrome(ViewBody::Error { message, raw });
        }

        let doc = self.state.doc.read().clone();
        let Some(root) = doc else {
            return chrome(ViewBody::Empty);
        };
        if root.is_null() {
            return chrome(ViewBody::Empty);
        }

        let search_state = self.state.search.read();
        let expand_state = self.state.expand.read();
        let pages = self.state.pages.read();
        let ctx = RenderContext {
            options: &self.options,
            expand: &expand_state,
            pages: &pages,
            search_term: if self.options.enable_search {
                &search_state.term
            } else {
                ""
            },
            match_keys: &search_state.match_keys,
            forced_open: &search_state.forced_open,
        };
        let rendered = render::render_tree(&root, &ctx);
        chrome(ViewBody::Tree {
            root: rendered,
            view_mode: *self.view_mode.read(),
            root_label: self.options.root_label.clone(),
            match_count: search_state.matches.len(),
        })
    }
}

/// Recompute the search state for a term against the current document.
/// Runs on the caller's thread for immediate searches and on the debounce
/// timer thread for deferred ones.
fn run_search(state: &ViewerState, term: &str) {
    let doc = state.doc.read().clone();
    let mut next = SearchState {
        term: term.to_string(),
        ..Default::default()
    };
    if let Some(root) = doc {
        if !term.trim().is_empty() {
            let matches = search::search(&root, term);
            debug!("search for {term:?} found {} matches", matches.len());
            next.forced_open = search::expansion_closure(&matches);
            next.match_keys = search::match_key_set(&matches);
            next.matches = matches;
        }
    }
    *state.search.write() = next;
}
