//! State shared by the resource list pages: query parameters, fetch
//! generations and client-side pagination.

use crate::error::AdminClientError;
use std::time::Duration;

pub const REPORTS_PER_PAGE: usize = 10;
const MAX_VISIBLE_PAGES: usize = 5;

/// Collections behind the list pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Blogs,
    Users,
    Podcasts,
    Reports,
}

impl Collection {
    /// Delay between a search, filter or sort edit and the fetch. `None` fetches at once.
    pub fn query_debounce(self) -> Option<Duration> {
        match self {
            Self::Blogs => Some(Duration::from_millis(300)),
            Self::Users | Self::Podcasts => Some(Duration::from_millis(500)),
            Self::Reports => None,
        }
    }
}

/// `search` / `status` / `sortBy` parameters accepted by every collection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub status: Option<String>,
    pub sort_by: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if !self.search.trim().is_empty() {
            pairs.push(("search".to_string(), self.search.trim().to_string()));
        }
        if let Some(status) = self.status.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("status".to_string(), status.clone()));
        }
        if let Some(sort_by) = self.sort_by.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("sortBy".to_string(), sort_by.clone()));
        }
        pairs
    }
}

/// What a list page should render.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<'a, T> {
    Loading,
    Failed(&'a str),
    Empty,
    Ready(&'a [T]),
}

/// Loaded collection plus the generation of the fetch that is allowed to
/// update it. A response carrying an older ticket is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fetch and returns its ticket.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.generation
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.generation
    }

    /// Applies a finished fetch. Returns `false` when the ticket was superseded.
    pub fn finish(
        &mut self,
        ticket: u64,
        result: Result<Vec<T>, AdminClientError>,
        fallback: &str,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(ticket, current = self.generation, "Dropping stale response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(err) => self.error = Some(err.toast_message(fallback)),
        }
        true
    }

    pub fn view(&self) -> ListView<'_, T> {
        if self.loading {
            ListView::Loading
        } else if let Some(error) = &self.error {
            ListView::Failed(error)
        } else if self.items.is_empty() {
            ListView::Empty
        } else {
            ListView::Ready(&self.items)
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn update_where(&mut self, pred: impl Fn(&T) -> bool, apply: impl Fn(&mut T)) {
        self.items.iter_mut().filter(|item| pred(item)).for_each(apply);
    }
}

/// Client-side pagination over an already loaded collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub per_page: usize,
    pub current: usize,
    pub total_items: usize,
}

impl Paginator {
    pub fn new(per_page: usize, total_items: usize) -> Self {
        Self {
            per_page: per_page.max(1),
            current: 1,
            total_items,
        }
    }

    /// Always at least one page, even when empty.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page).max(1)
    }

    /// Moves to `page` if it exists. Returns whether the page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() && page != self.current {
            self.current = page;
            true
        } else {
            false
        }
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        let start = ((self.current - 1) * self.per_page).min(self.total_items);
        let end = (start + self.per_page).min(self.total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        &items[range.start.min(items.len())..range.end.min(items.len())]
    }

    /// Up to five page numbers around the current page.
    pub fn window(&self) -> std::ops::RangeInclusive<usize> {
        let total = self.total_pages();
        let mut start = self.current.saturating_sub(2).max(1);
        let end = (start + MAX_VISIBLE_PAGES - 1).min(total);
        if end + 1 - start < MAX_VISIBLE_PAGES {
            start = (end + 1).saturating_sub(MAX_VISIBLE_PAGES).max(1);
        }
        start..=end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_edits_wait_per_collection() {
        assert_eq!(Collection::Blogs.query_debounce(), Some(Duration::from_millis(300)));
        assert_eq!(Collection::Users.query_debounce(), Some(Duration::from_millis(500)));
        assert_eq!(Collection::Podcasts.query_debounce(), Some(Duration::from_millis(500)));
        assert_eq!(Collection::Reports.query_debounce(), None);
    }

    #[test]
    fn query_skips_empty_parameters() {
        let query = ListQuery::new().search("  ").status("published").sort_by("date");
        assert_eq!(
            query.to_pairs(),
            vec![
                ("status".to_string(), "published".to_string()),
                ("sortBy".to_string(), "date".to_string()),
            ]
        );
    }

    #[test]
    fn stale_response_does_not_overwrite_newer_one() {
        let mut state: ListState<&str> = ListState::new();
        let first = state.begin();
        let second = state.begin();

        assert!(state.finish(second, Ok(vec!["new"]), "failed"));
        assert!(!state.finish(first, Ok(vec!["old"]), "failed"));
        assert_eq!(state.items(), ["new"]);
        assert!(!state.is_loading());
    }

    #[test]
    fn view_reflects_state() {
        let mut state: ListState<u32> = ListState::new();
        let ticket = state.begin();
        assert_eq!(state.view(), ListView::Loading);

        state.finish(ticket, Ok(vec![]), "failed");
        assert_eq!(state.view(), ListView::Empty);

        let ticket = state.begin();
        state.finish(ticket, Err(AdminClientError::from_status(500, None)), "Failed to fetch");
        assert_eq!(state.view(), ListView::Failed("Failed to fetch"));

        let ticket = state.begin();
        state.finish(ticket, Ok(vec![1, 2]), "failed");
        assert_eq!(state.view(), ListView::Ready(&[1, 2]));
    }

    #[test]
    fn update_where_touches_matching_items() {
        let mut state: ListState<(u32, bool)> = ListState::new();
        let ticket = state.begin();
        state.finish(ticket, Ok(vec![(1, false), (2, false)]), "failed");
        state.update_where(|item| item.0 == 2, |item| item.1 = true);
        assert_eq!(state.items(), [(1, false), (2, true)]);
    }

    #[test]
    fn paginator_slices_and_bounds() {
        let items: Vec<u32> = (0..23).collect();
        let mut pages = Paginator::new(REPORTS_PER_PAGE, items.len());
        assert_eq!(pages.total_pages(), 3);
        assert_eq!(pages.slice(&items).len(), 10);

        assert!(pages.go_to(3));
        assert_eq!(pages.slice(&items), &items[20..23]);
        assert!(!pages.go_to(4));
        assert!(!pages.go_to(0));

        let empty = Paginator::new(REPORTS_PER_PAGE, 0);
        assert_eq!(empty.total_pages(), 1);
        assert!(empty.slice::<u32>(&[]).is_empty());
    }

    #[test]
    fn page_window_stays_five_wide() {
        let mut pages = Paginator::new(10, 200);
        assert_eq!(pages.window(), 1..=5);
        pages.go_to(10);
        assert_eq!(pages.window(), 8..=12);
        pages.go_to(20);
        assert_eq!(pages.window(), 16..=20);

        let small = Paginator::new(10, 25);
        assert_eq!(small.window(), 1..=3);
    }
}
