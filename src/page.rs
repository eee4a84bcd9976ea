use std::collections::HashMap;

use serde::Serialize;

/// Per-path current page for paginating array nodes. Entries appear lazily;
/// a missing entry means page 0. A remembered page past the end of a
/// shrunken array just produces an empty visible slice.
pub type PaginationState = HashMap<String, usize>;

/// One entry of the rendered page-button row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageEntry {
    Page { index: usize },
    Ellipsis,
}

/// Item range and prev/next availability for the pagination info row.
/// Item numbers are 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub first_item: usize,
    pub last_item: usize,
    pub total_items: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Everything a host needs to draw the pagination strip of one array node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageControls {
    pub current_page: usize,
    pub total_pages: usize,
    pub window: Vec<PageEntry>,
    pub summary: PageSummary,
}

/// An array paginates only when pagination is enabled and it has at least
/// the threshold number of items.
pub fn should_paginate(enabled: bool, item_count: usize, threshold: usize) -> bool {
    enabled && item_count >= threshold
}

pub fn page_count(item_count: usize, page_size: usize) -> usize {
    item_count.div_ceil(page_size)
}

/// The raw page slice and its starting index. Does not clamp: a page past
/// the end yields an empty slice.
pub fn visible_slice<T>(items: &[T], page: usize, page_size: usize) -> (&[T], usize) {
    let start = page.saturating_mul(page_size);
    if start >= items.len() {
        return (&[], start);
    }
    let end = (start + page_size).min(items.len());
    (&items[start..end], start)
}

/// The items an array node actually shows: the full array when it does not
/// paginate, otherwise the current page slice.
pub fn display_window<'a, T>(
    items: &'a [T],
    enabled: bool,
    threshold: usize,
    page: usize,
    page_size: usize,
) -> (&'a [T], usize) {
    if !should_paginate(enabled, items.len(), threshold) {
        return (items, 0);
    }
    visible_slice(items, page, page_size)
}

/// Bounded page-button layout. Up to five pages are listed in full; beyond
/// that the window pins the first and last page, keeps the current page's
/// neighbours, and elides the gaps. Never longer than seven entries.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageEntry> {
    let mut window = Vec::new();
    if total_pages <= 5 {
        for index in 0..total_pages {
            window.push(PageEntry::Page { index });
        }
        return window;
    }

    window.push(PageEntry::Page { index: 0 });
    if current_page > 2 {
        window.push(PageEntry::Ellipsis);
    }
    let start = current_page.saturating_sub(1).max(1);
    let end = (current_page + 1).min(total_pages - 2);
    for index in start..=end {
        window.push(PageEntry::Page { index });
    }
    if current_page < total_pages - 3 {
        window.push(PageEntry::Ellipsis);
    }
    window.push(PageEntry::Page { index: total_pages - 1 });
    window
}

pub fn page_summary(
    current_page: usize,
    page_size: usize,
    total_items: usize,
    total_pages: usize,
) -> PageSummary {
    PageSummary {
        first_item: current_page * page_size + 1,
        last_item: ((current_page + 1) * page_size).min(total_items),
        total_items,
        has_prev: current_page > 0,
        has_next: current_page + 1 < total_pages,
    }
}

/// Assemble the full control strip for one paginating array. The stored
/// page is kept verbatim for the slice, but the button window is computed
/// from a clamped page so the strip stays well-formed for stale pages.
pub fn controls(current_page: usize, page_size: usize, total_items: usize) -> PageControls {
    let total_pages = page_count(total_items, page_size);
    let display_page = current_page.min(total_pages.saturating_sub(1));
    PageControls {
        current_page,
        total_pages,
        window: page_window(display_page, total_pages),
        summary: page_summary(current_page, page_size, total_items, total_pages),
    }
}
