use std::time::Duration;

use crate::types::Theme;

/// Display options supplied by the host.
///
/// Use [`Default::default()`] and override individual fields as needed.
/// Flags that only gate presentation (`show_data_types`, `show_item_count`)
/// change what the rendered nodes carry; the behavioural settings
/// (pagination, search, expand depth) change what gets rendered at all.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    /// Requested theme; `Auto` resolves against the host's system
    /// preference. Default: [`Theme::Auto`].
    pub theme: Theme,

    /// Label shown next to the root node. Default: none.
    pub root_label: Option<String>,

    /// Start with every container expanded, overriding
    /// `initial_expand_depth`. Default: false.
    pub default_expanded: bool,

    /// Expand containers shallower than this depth after (re)parsing;
    /// -1 expands everything. Default: 1.
    pub initial_expand_depth: i32,

    /// Attach a short type badge to every rendered node. Default: false.
    pub show_data_types: bool,

    /// Attach an item-count label to container nodes. Default: true.
    pub show_item_count: bool,

    /// Indent per nesting level, in the host's length unit. Default: 20.
    pub indent_size: u32,

    /// Allow searching the document. Default: true.
    pub enable_search: bool,

    /// Allow the expand-all / collapse-all bulk operations. Default: true.
    pub enable_expand_collapse_all: bool,

    /// Copy a primitive's text to the clipboard when it is activated.
    /// Default: true.
    pub enable_copy_value: bool,

    /// Slice long arrays into pages. Default: true.
    pub enable_pagination: bool,

    /// Items per page once an array paginates. Default: 10.
    pub page_size: usize,

    /// Minimum item count before an array paginates. Default: 50.
    pub pagination_threshold: usize,

    /// Height cap for the whole view, passed through to the host layout.
    /// Default: none.
    pub max_height: Option<String>,

    /// Extra style class for the host container. Default: none.
    pub custom_class: Option<String>,

    /// Show parse failures instead of an empty view. Default: true.
    pub show_parse_errors: bool,

    /// Replaces the parser diagnostic when set. Default: none.
    pub error_message: Option<String>,

    /// Show the raw unparsed text under the error message. Default: false.
    pub show_raw_on_error: bool,

    /// Quiescence window for debounced search input. Default: 300 ms.
    pub search_debounce: Duration,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            theme: Theme::Auto,
            root_label: None,
            default_expanded: false,
            initial_expand_depth: 1,
            show_data_types: false,
            show_item_count: true,
            indent_size: 20,
            enable_search: true,
            enable_expand_collapse_all: true,
            enable_copy_value: true,
            enable_pagination: true,
            page_size: 10,
            pagination_threshold: 50,
            max_height: None,
            custom_class: None,
            show_parse_errors: true,
            error_message: None,
            show_raw_on_error: false,
            search_debounce: Duration::from_millis(300),
        }
    }
}
