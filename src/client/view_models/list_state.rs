//! # List Presentation State
//!
//! Client-side search, category filtering, and pagination over a cached
//! collection. The state never holds the collection itself; callers pass
//! the current snapshot in and get a page view back, so the page index
//! is re-clamped against whatever the collection looks like now.

/// Implemented by anything a board lists.
pub trait Listed {
    /// Text fields the search box matches against (case-insensitive
    /// substring).
    fn search_fields(&self) -> Vec<&str>;

    /// Categorical field matched by the filter, when the list has one.
    fn category(&self) -> Option<&str> {
        None
    }
}

/// Category filter: everything, or one named category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    fn matches(&self, item_category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => item_category == Some(name.as_str()),
        }
    }
}

/// One entry of the windowed pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// One page's worth of a filtered collection.
#[derive(Debug)]
pub struct ListView<'a, T> {
    pub items: Vec<&'a T>,
    pub filtered_len: usize,
    pub total_pages: usize,
    pub page: usize,
    /// 1-based inclusive bounds for "Showing X to Y of Z"; zero when
    /// the filtered collection is empty.
    pub first_index: usize,
    pub last_index: usize,
}

/// Search + filter + numbered-page state for one list.
#[derive(Debug, Clone)]
pub struct ListState {
    search_term: String,
    filter: CategoryFilter,
    page_size: usize,
    page: usize,
    total_pages: usize,
}

impl ListState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            filter: CategoryFilter::All,
            page_size: page_size.max(1),
            page: 1,
            total_pages: 0,
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Changing the search always lands the user back on page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Changing the category filter always lands the user back on
    /// page 1.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.page = 1;
    }

    /// Requests outside `[1, total_pages]` are no-ops.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.page.checked_sub(1) {
            Some(previous) => self.go_to_page(previous),
            None => false,
        }
    }

    fn item_matches<T: Listed>(&self, item: &T) -> bool {
        let matches_filter = self.filter.matches(item.category());
        if !matches_filter {
            return false;
        }
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        item.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Filter the snapshot and slice out the current page, clamping the
    /// page index back into range when the collection shrank underneath
    /// it (a delete on the last page steps back, never shows an empty
    /// page while earlier pages have content).
    pub fn view<'a, T: Listed>(&mut self, items: &'a [T]) -> ListView<'a, T> {
        let filtered: Vec<&'a T> = items.iter().filter(|item| self.item_matches(*item)).collect();
        let filtered_len = filtered.len();

        self.total_pages = filtered_len.div_ceil(self.page_size);
        self.page = self.page.clamp(1, self.total_pages.max(1));

        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(filtered_len);
        let items: Vec<&'a T> = if start < filtered_len {
            filtered[start..end].to_vec()
        } else {
            Vec::new()
        };

        ListView {
            first_index: if filtered_len == 0 { 0 } else { start + 1 },
            last_index: end,
            items,
            filtered_len,
            total_pages: self.total_pages,
            page: self.page,
        }
    }

    /// Windowed pagination control for the current state.
    pub fn page_items(&self) -> Vec<PageItem> {
        page_items(self.total_pages, self.page)
    }
}

/// Windowed page numbers: everything up to five pages, otherwise first
/// and last page bracketing a three-page window with ellipses.
pub fn page_items(total_pages: usize, current: usize) -> Vec<PageItem> {
    if total_pages <= 5 {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let mut items = vec![PageItem::Page(1)];
    if current <= 3 {
        items.extend([2, 3, 4].into_iter().map(PageItem::Page));
        items.push(PageItem::Ellipsis);
    } else if current >= total_pages - 2 {
        items.push(PageItem::Ellipsis);
        items.extend(
            (total_pages - 3..total_pages).map(PageItem::Page),
        );
    } else {
        items.push(PageItem::Ellipsis);
        items.extend((current - 1..=current + 1).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total_pages));
    items
}

/// Incremental reveal used by the order boards instead of numbered
/// pages: a visible-count window that grows by a fixed step and resets
/// whenever the filtered collection's identity changes.
#[derive(Debug, Clone)]
pub struct LoadMore {
    initial: usize,
    step: usize,
    visible: usize,
}

impl LoadMore {
    pub fn new(initial: usize, step: usize) -> Self {
        Self {
            initial: initial.max(1),
            step: step.max(1),
            visible: initial.max(1),
        }
    }

    /// How many of `filtered_len` items are visible right now.
    pub fn visible_count(&self, filtered_len: usize) -> usize {
        self.visible.min(filtered_len)
    }

    pub fn has_more(&self, filtered_len: usize) -> bool {
        self.visible_count(filtered_len) < filtered_len
    }

    /// Reveal one more step, never exceeding the filtered length.
    pub fn load_more(&mut self, filtered_len: usize) {
        self.visible = (self.visible + self.step).min(filtered_len.max(self.initial));
    }

    /// The collection changed identity (new search term): back to the
    /// initial window.
    pub fn reset(&mut self) {
        self.visible = self.initial;
    }
}
