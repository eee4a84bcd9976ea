use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::expand::{self, ExpandState};
use crate::options::ViewerOptions;
use crate::page::{self, PageControls, PaginationState};
use crate::path::{self, ROOT_TOKEN};
use crate::search;
use crate::types::{DataType, HighlightSpan};
use crate::value;

/// Depth is clamped to this for styling hooks only; recursion itself is
/// never cut off.
pub const MAX_DEPTH_CLASS: usize = 5;

/// Primitive display text longer than this is truncated; the node keeps a
/// flag so the host can offer a show-more affordance.
const MAX_PRIMITIVE_DISPLAY_LENGTH: usize = 200;

/// The visual shape chosen for a node. The rows/columns sub-decision for
/// objects is a separate view-mode toggle and not part of this selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Primitive,
    Object,
    ArrayTable,
    ArrayList,
    ArrayMixed,
}

/// Decide how a value should be displayed. Total and deterministic over
/// every possible value; empty arrays fall out as (zero-row) lists.
pub fn select_strategy(v: &Value) -> Strategy {
    match v {
        Value::Object(_) => Strategy::Object,
        Value::Array(items) => array_strategy(items),
        _ => Strategy::Primitive,
    }
}

fn array_strategy(items: &[Value]) -> Strategy {
    if value::is_table_compatible(items) {
        Strategy::ArrayTable
    } else if items.iter().all(value::is_primitive) {
        Strategy::ArrayList
    } else {
        Strategy::ArrayMixed
    }
}

/// Everything a render pass reads. All of it is borrowed for the duration
/// of a single pass; nothing here is mutated while rendering.
pub struct RenderContext<'a> {
    pub options: &'a ViewerOptions,
    pub expand: &'a ExpandState,
    pub pages: &'a PaginationState,
    pub search_term: &'a str,
    pub match_keys: &'a HashSet<String>,
    pub forced_open: &'a HashSet<String>,
}

impl RenderContext<'_> {
    fn searching(&self) -> bool {
        !self.search_term.trim().is_empty()
    }
}

/// One rendered node of the visual tree.
#[derive(Debug, Clone, Serialize)]
pub struct RenderNode {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_index: Option<usize>,
    pub depth: usize,
    pub depth_class: usize,
    /// Left padding in the host's indent unit.
    pub indent: u32,
    pub data_type: DataType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_badge: Option<&'static str>,
    pub key_match: bool,
    pub value_match: bool,
    pub content: RenderContent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderContent {
    Primitive(PrimitiveContent),
    Object(ObjectContent),
    ArrayTable(TableContent),
    ArrayList(ItemsContent),
    ArrayMixed(ItemsContent),
}

#[derive(Debug, Clone, Serialize)]
pub struct PrimitiveContent {
    pub text: String,
    pub truncated: bool,
    pub highlights: Vec<HighlightSpan>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectContent {
    pub item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count_label: Option<String>,
    pub expanded: bool,
    pub entries: Vec<RenderNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableContent {
    pub item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count_label: Option<String>,
    pub expanded: bool,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageControls>,
}

/// One row of a multi-column object-array table. Cells follow the column
/// list; `None` marks a column the row's object does not carry.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub index: usize,
    pub path: String,
    pub cells: Vec<Option<RenderNode>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemsContent {
    pub item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count_label: Option<String>,
    pub expanded: bool,
    pub items: Vec<RenderNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageControls>,
}

/// Render the whole document into a visual tree, honouring expand state,
/// pagination and the active search.
pub fn render_tree(root: &Value, ctx: &RenderContext) -> RenderNode {
    render_node(root, "", 0, None, None, ctx)
}

fn render_node(
    v: &Value,
    node_path: &str,
    depth: usize,
    key: Option<&str>,
    array_index: Option<usize>,
    ctx: &RenderContext,
) -> RenderNode {
    let current_path = if node_path.is_empty() { ROOT_TOKEN } else { node_path };
    let searching = ctx.searching();
    let key_match = searching && ctx.match_keys.contains(&format!("{current_path}:key"));
    let value_match = searching && ctx.match_keys.contains(&format!("{current_path}:value"));
    let data_type = value::detect_data_type(v);

    let content = match v {
        Value::Object(map) => RenderContent::Object(object_content(map, current_path, depth, ctx)),
        Value::Array(items) => array_content(items, current_path, depth, ctx),
        _ => RenderContent::Primitive(primitive_content(v, data_type, value_match, ctx)),
    };

    let indent = match content {
        RenderContent::Primitive(_) => depth as u32 * ctx.options.indent_size,
        _ => {
            if depth > 0 {
                ctx.options.indent_size
            } else {
                0
            }
        }
    };

    RenderNode {
        path: current_path.to_string(),
        key: key.map(str::to_string),
        array_index,
        depth,
        depth_class: depth.min(MAX_DEPTH_CLASS),
        indent,
        data_type,
        type_badge: ctx.options.show_data_types.then(|| data_type.badge_label()),
        key_match,
        value_match,
        content,
    }
}

fn primitive_content(
    v: &Value,
    data_type: DataType,
    value_match: bool,
    ctx: &RenderContext,
) -> PrimitiveContent {
    let raw = match (data_type, v.as_str()) {
        (DataType::Date, Some(s)) => value::format_date(s),
        _ => value::format_value(v),
    };
    let truncated = raw.chars().count() > MAX_PRIMITIVE_DISPLAY_LENGTH;
    let text = if truncated {
        value::truncate_display(&raw, MAX_PRIMITIVE_DISPLAY_LENGTH)
    } else {
        raw
    };
    let highlights = if value_match && ctx.searching() {
        search::highlight_spans(&text, ctx.search_term)
    } else {
        Vec::new()
    };
    PrimitiveContent {
        text,
        truncated,
        highlights,
    }
}

fn object_content(
    map: &Map<String, Value>,
    current_path: &str,
    depth: usize,
    ctx: &RenderContext,
) -> ObjectContent {
    let expanded = expand::is_expanded(ctx.expand, current_path, ctx.forced_open);
    let entries = if expanded {
        let base = child_base(current_path);
        map.iter()
            .map(|(k, child)| {
                render_node(child, &path::join_key(base, k), depth + 1, Some(k), None, ctx)
            })
            .collect()
    } else {
        Vec::new()
    };
    ObjectContent {
        item_count: map.len(),
        item_count_label: count_label(ctx, map.len()),
        expanded,
        entries,
    }
}

fn array_content(items: &[Value], current_path: &str, depth: usize, ctx: &RenderContext) -> RenderContent {
    let item_count = items.len();
    let item_count_label = count_label(ctx, item_count);
    let expanded = expand::is_expanded(ctx.expand, current_path, ctx.forced_open);
    let strategy = array_strategy(items);
    let base = child_base(current_path);

    if !expanded {
        return collapsed_array(strategy, item_count, item_count_label);
    }

    let opts = ctx.options;
    let paginating = page::should_paginate(opts.enable_pagination, item_count, opts.pagination_threshold);
    let current_page = ctx.pages.get(current_path).copied().unwrap_or(0);
    let (visible, start_index) =
        page::display_window(items, opts.enable_pagination, opts.pagination_threshold, current_page, opts.page_size);
    let pagination = paginating.then(|| page::controls(current_page, opts.page_size, item_count));

    match strategy {
        Strategy::ArrayTable => {
            let columns = value::table_columns(visible);
            let rows = visible
                .iter()
                .enumerate()
                .map(|(offset, item)| {
                    let index = start_index + offset;
                    let row_path = path::join_index(base, index);
                    let cells = columns
                        .iter()
                        .map(|col| {
                            item.as_object().and_then(|obj| obj.get(col)).map(|cell| {
                                // nested values restart visual depth inside the cell
                                render_node(cell, &path::join_key(&row_path, col), 0, None, None, ctx)
                            })
                        })
                        .collect();
                    TableRow {
                        index,
                        path: row_path,
                        cells,
                    }
                })
                .collect();
            RenderContent::ArrayTable(TableContent {
                item_count,
                item_count_label,
                expanded,
                columns,
                rows,
                pagination,
            })
        }
        _ => {
            let nodes = visible
                .iter()
                .enumerate()
                .map(|(offset, item)| {
                    let index = start_index + offset;
                    let item_path = path::join_index(base, index);
                    render_node(item, &item_path, depth + 1, None, Some(index), ctx)
                })
                .collect();
            let content = ItemsContent {
                item_count,
                item_count_label,
                expanded,
                items: nodes,
                pagination,
            };
            if strategy == Strategy::ArrayList {
                RenderContent::ArrayList(content)
            } else {
                RenderContent::ArrayMixed(content)
            }
        }
    }
}

fn collapsed_array(strategy: Strategy, item_count: usize, item_count_label: Option<String>) -> RenderContent {
    match strategy {
        Strategy::ArrayTable => RenderContent::ArrayTable(TableContent {
            item_count,
            item_count_label,
            expanded: false,
            columns: Vec::new(),
            rows: Vec::new(),
            pagination: None,
        }),
        Strategy::ArrayList => RenderContent::ArrayList(ItemsContent {
            item_count,
            item_count_label,
            expanded: false,
            items: Vec::new(),
            pagination: None,
        }),
        _ => RenderContent::ArrayMixed(ItemsContent {
            item_count,
            item_count_label,
            expanded: false,
            items: Vec::new(),
            pagination: None,
        }),
    }
}

fn child_base(current_path: &str) -> &str {
    if current_path == ROOT_TOKEN {
        ""
    } else {
        current_path
    }
}

fn count_label(ctx: &RenderContext, count: usize) -> Option<String> {
    if !ctx.options.show_item_count {
        return None;
    }
    Some(if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context_parts(doc: &Value) -> (ExpandState, PaginationState) {
        (expand::initialize(doc, -1), PaginationState::new())
    }

    fn ctx<'a>(
        options: &'a ViewerOptions,
        expand_state: &'a ExpandState,
        pages: &'a PaginationState,
        match_keys: &'a HashSet<String>,
        forced: &'a HashSet<String>,
    ) -> RenderContext<'a> {
        RenderContext {
            options,
            expand: expand_state,
            pages,
            search_term: "",
            match_keys,
            forced_open: forced,
        }
    }

    #[test]
    fn strategy_selection_covers_every_shape() {
        assert_eq!(select_strategy(&json!(null)), Strategy::Primitive);
        assert_eq!(select_strategy(&json!("x")), Strategy::Primitive);
        assert_eq!(select_strategy(&json!({"a": 1})), Strategy::Object);
        assert_eq!(select_strategy(&json!({})), Strategy::Object);
        assert_eq!(
            select_strategy(&json!([{"id": 1}, {"id": 2}])),
            Strategy::ArrayTable
        );
        assert_eq!(select_strategy(&json!([1, "a", null])), Strategy::ArrayList);
        assert_eq!(select_strategy(&json!([])), Strategy::ArrayList);
        assert_eq!(select_strategy(&json!([1, [2]])), Strategy::ArrayMixed);
        // objects without shared keys fall back to mixed, not table
        assert_eq!(
            select_strategy(&json!([{"a": 1}, {"b": 2}])),
            Strategy::ArrayMixed
        );
    }

    #[test]
    fn renders_nested_objects_with_paths_and_depths() {
        let doc = json!({"user": {"name": "Ada"}});
        let options = ViewerOptions::default();
        let (expand_state, pages) = context_parts(&doc);
        let (keys, forced) = (HashSet::new(), HashSet::new());
        let tree = render_tree(&doc, &ctx(&options, &expand_state, &pages, &keys, &forced));

        assert_eq!(tree.path, "root");
        assert_eq!(tree.depth, 0);
        let RenderContent::Object(root) = &tree.content else {
            panic!("root should render as an object");
        };
        assert!(root.expanded);
        assert_eq!(root.entries.len(), 1);
        let user = &root.entries[0];
        assert_eq!(user.path, "user");
        assert_eq!(user.key.as_deref(), Some("user"));
        assert_eq!(user.depth, 1);
        let RenderContent::Object(user_content) = &user.content else {
            panic!("user should render as an object");
        };
        assert_eq!(user_content.entries[0].path, "user.name");
    }

    #[test]
    fn collapsed_containers_render_no_children() {
        let doc = json!({"user": {"name": "Ada"}});
        let options = ViewerOptions::default();
        let expand_state = expand::initialize(&doc, 1); // user collapsed
        let pages = PaginationState::new();
        let (keys, forced) = (HashSet::new(), HashSet::new());
        let tree = render_tree(&doc, &ctx(&options, &expand_state, &pages, &keys, &forced));

        let RenderContent::Object(root) = &tree.content else {
            panic!("root should render as an object");
        };
        let RenderContent::Object(user) = &root.entries[0].content else {
            panic!("user should render as an object");
        };
        assert!(!user.expanded);
        assert!(user.entries.is_empty());
        assert_eq!(user.item_count, 1);
    }

    #[test]
    fn depth_class_is_clamped_but_recursion_is_not() {
        let doc = json!({"a": {"b": {"c": {"d": {"e": {"f": {"g": 1}}}}}}});
        let options = ViewerOptions::default();
        let (expand_state, pages) = context_parts(&doc);
        let (keys, forced) = (HashSet::new(), HashSet::new());
        let mut node = render_tree(&doc, &ctx(&options, &expand_state, &pages, &keys, &forced));
        let mut last_depth;
        loop {
            last_depth = node.depth;
            assert!(node.depth_class <= MAX_DEPTH_CLASS);
            match node.content {
                RenderContent::Object(mut content) => {
                    if content.entries.is_empty() {
                        break;
                    }
                    node = content.entries.remove(0);
                }
                _ => break,
            }
        }
        assert_eq!(last_depth, 7);
    }

    #[test]
    fn table_arrays_paginate_and_keep_absolute_indices() {
        let items: Vec<Value> = (0..12).map(|i| json!({"id": i, "name": format!("row{i}")})).collect();
        let doc = json!({ "rows": items });
        let mut options = ViewerOptions::default();
        options.enable_pagination = true;
        options.page_size = 5;
        options.pagination_threshold = 10;
        let (expand_state, mut pages) = context_parts(&doc);
        pages.insert("rows".to_string(), 2);
        let (keys, forced) = (HashSet::new(), HashSet::new());
        let tree = render_tree(&doc, &ctx(&options, &expand_state, &pages, &keys, &forced));

        let RenderContent::Object(root) = &tree.content else {
            panic!("root should render as an object");
        };
        let RenderContent::ArrayTable(table) = &root.entries[0].content else {
            panic!("rows should render as a table");
        };
        assert_eq!(table.item_count, 12);
        assert_eq!(table.columns, ["id", "name"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].index, 10);
        assert_eq!(table.rows[0].path, "rows[10]");
        assert_eq!(table.rows[1].index, 11);
        let controls = table.pagination.as_ref().expect("pagination controls");
        assert_eq!(controls.total_pages, 3);
        assert_eq!(controls.current_page, 2);
    }

    #[test]
    fn out_of_range_pages_render_empty_but_keep_controls() {
        let items: Vec<Value> = (0..12).map(|i| json!(i)).collect();
        let doc = json!({ "nums": items });
        let mut options = ViewerOptions::default();
        options.enable_pagination = true;
        options.page_size = 5;
        options.pagination_threshold = 10;
        let (expand_state, mut pages) = context_parts(&doc);
        pages.insert("nums".to_string(), 9);
        let (keys, forced) = (HashSet::new(), HashSet::new());
        let tree = render_tree(&doc, &ctx(&options, &expand_state, &pages, &keys, &forced));

        let RenderContent::Object(root) = &tree.content else {
            panic!("root should render as an object");
        };
        let RenderContent::ArrayList(list) = &root.entries[0].content else {
            panic!("nums should render as a primitive list");
        };
        assert!(list.items.is_empty());
        assert_eq!(list.item_count, 12);
        assert!(list.pagination.is_some());
    }

    #[test]
    fn short_arrays_ignore_pagination_state() {
        let doc = json!({ "nums": [1, 2, 3] });
        let mut options = ViewerOptions::default();
        options.enable_pagination = true;
        options.pagination_threshold = 10;
        let (expand_state, mut pages) = context_parts(&doc);
        pages.insert("nums".to_string(), 4);
        let (keys, forced) = (HashSet::new(), HashSet::new());
        let tree = render_tree(&doc, &ctx(&options, &expand_state, &pages, &keys, &forced));

        let RenderContent::Object(root) = &tree.content else {
            panic!("root should render as an object");
        };
        let RenderContent::ArrayList(list) = &root.entries[0].content else {
            panic!("nums should render as a primitive list");
        };
        assert_eq!(list.items.len(), 3);
        assert_eq!(list.items[0].array_index, Some(0));
        assert!(list.pagination.is_none());
    }

    #[test]
    fn mixed_arrays_recurse_into_container_items() {
        let doc = json!({ "mixed": [1, {"a": 2}] });
        let options = ViewerOptions::default();
        let (expand_state, pages) = context_parts(&doc);
        let (keys, forced) = (HashSet::new(), HashSet::new());
        let tree = render_tree(&doc, &ctx(&options, &expand_state, &pages, &keys, &forced));

        let RenderContent::Object(root) = &tree.content else {
            panic!("root should render as an object");
        };
        let RenderContent::ArrayMixed(mixed) = &root.entries[0].content else {
            panic!("mixed should render as a mixed array");
        };
        assert_eq!(mixed.items.len(), 2);
        assert_eq!(mixed.items[1].path, "mixed[1]");
        assert!(matches!(mixed.items[1].content, RenderContent::Object(_)));
    }

    #[test]
    fn missing_table_cells_are_none() {
        let doc = json!([{"id": 1, "name": "a"}, {"id": 2}]);
        let options = ViewerOptions::default();
        let (expand_state, pages) = context_parts(&doc);
        let (keys, forced) = (HashSet::new(), HashSet::new());
        let tree = render_tree(&doc, &ctx(&options, &expand_state, &pages, &keys, &forced));

        let RenderContent::ArrayTable(table) = &tree.content else {
            panic!("root should render as a table");
        };
        assert_eq!(table.rows[0].path, "0");
        assert!(table.rows[1].cells[1].is_none());
        let id_cell = table.rows[1].cells[0].as_ref().expect("id cell");
        assert_eq!(id_cell.path, "1.id");
        assert_eq!(id_cell.depth, 0);
    }

    #[test]
    fn search_matches_flag_nodes_and_force_containers_open() {
        let doc = json!({"user": {"name": "John"}});
        let options = ViewerOptions::default();
        let expand_state = expand::initialize(&doc, 0); // everything collapsed
        let pages = PaginationState::new();
        let matches = search::search(&doc, "john");
        let keys = search::match_key_set(&matches);
        let forced = search::expansion_closure(&matches);
        let render_ctx = RenderContext {
            options: &options,
            expand: &expand_state,
            pages: &pages,
            search_term: "john",
            match_keys: &keys,
            forced_open: &forced,
        };
        let tree = render_tree(&doc, &render_ctx);

        // root is not in the closure, but "user" is; render through it anyway
        let RenderContent::Object(root) = &tree.content else {
            panic!("root should render as an object");
        };
        assert!(!root.expanded);
        assert!(root.entries.is_empty());

        // expand the root as a user toggle would and check the chain
        let mut expand_state = expand_state;
        expand::toggle(&mut expand_state, "root");
        let render_ctx = RenderContext {
            options: &options,
            expand: &expand_state,
            pages: &pages,
            search_term: "john",
            match_keys: &keys,
            forced_open: &forced,
        };
        let tree = render_tree(&doc, &render_ctx);
        let RenderContent::Object(root) = &tree.content else {
            panic!("root should render as an object");
        };
        let user = &root.entries[0];
        let RenderContent::Object(user_content) = &user.content else {
            panic!("user should render as an object");
        };
        assert!(user_content.expanded, "closure must force user open");
        let name = &user_content.entries[0];
        assert!(name.value_match);
        let RenderContent::Primitive(primitive) = &name.content else {
            panic!("name should render as a primitive");
        };
        assert_eq!(primitive.highlights[0].matched, "John");
    }

    #[test]
    fn type_badges_and_count_labels_follow_options() {
        let doc = json!({"n": 1, "list": [1]});
        let mut options = ViewerOptions::default();
        options.show_data_types = true;
        options.show_item_count = true;
        let (expand_state, pages) = context_parts(&doc);
        let (keys, forced) = (HashSet::new(), HashSet::new());
        let tree = render_tree(&doc, &ctx(&options, &expand_state, &pages, &keys, &forced));

        let RenderContent::Object(root) = &tree.content else {
            panic!("root should render as an object");
        };
        assert_eq!(root.item_count_label.as_deref(), Some("2 items"));
        assert_eq!(root.entries[0].type_badge, Some("num"));
        let RenderContent::ArrayList(list) = &root.entries[1].content else {
            panic!("list should render as a primitive list");
        };
        assert_eq!(list.item_count_label.as_deref(), Some("1 item"));
    }
}
