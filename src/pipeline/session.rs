use serde::{Deserialize, Serialize};

use super::{ListQuery, SortSpec};

/// Interactive state of one list view: what the search box holds, which
/// column is sorted, which page is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSession {
    search: String,
    sort: Option<SortSpec>,
    page: usize,
}

/// One user gesture on a list view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SessionCommand {
    Search { term: String },
    Sort { key: String },
    Page { page: i64 },
    Next,
    Prev,
    Reset,
}

impl ViewSession {
    pub fn new(default_sort: Option<SortSpec>) -> Self {
        Self { search: String::new(), sort: default_sort, page: 1 }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Typing into the search box always returns to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Header click: the sorted column flips direction, any other column
    /// becomes the sort key in ascending order.
    pub fn click_sort(&mut self, key: &str) {
        self.sort = Some(match self.sort.take() {
            Some(current) if current.key == key => SortSpec {
                order: current.order.flipped(),
                ..current
            },
            _ => SortSpec::asc(key),
        });
    }

    pub fn go_to(&mut self, page: i64) {
        self.page = usize::try_from(page).unwrap_or(0).max(1);
    }

    pub fn next(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Pulls the stored page back inside `[1, max(page_count, 1)]`.
    pub fn clamp_to(&mut self, page_count: usize) {
        self.page = self.page.clamp(1, page_count.max(1));
    }

    pub fn reset(&mut self, default_sort: Option<SortSpec>) {
        *self = Self::new(default_sort);
    }

    /// Applies `command`; `Reset` restores `default_sort`.
    pub fn apply(&mut self, command: SessionCommand, default_sort: Option<SortSpec>) {
        match command {
            SessionCommand::Search { term } => self.set_search(term),
            SessionCommand::Sort { key } => self.click_sort(&key),
            SessionCommand::Page { page } => self.go_to(page),
            SessionCommand::Next => self.next(),
            SessionCommand::Prev => self.prev(),
            SessionCommand::Reset => self.reset(default_sort),
        }
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            search: self.search.clone(),
            sort: self.sort.clone(),
            page: self.page,
        }
    }
}
