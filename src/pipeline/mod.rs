//! pipeline
//!
//! List projection shared by every admin view.
//!
//! A view hands over its in-memory collection together with a [`ListQuery`]
//! (search term, optional sort, requested page) and gets back the slice of
//! records to render plus what the pagination controls need. The projection
//! is pure: same records and query, same page. It never fails; out-of-range
//! pages are clamped.

mod session;
mod sort;

pub use session::{SessionCommand, ViewSession};
pub use sort::{compare_values, sort_records};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of one record field as seen by search and sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i64),
    Unsigned(u64),
    Text(String),
    /// Field exists in the schema but has no value on this record.
    Missing,
}

impl FieldValue {
    /// Lower-cased string form, the representation search and text sort work on.
    pub fn normalized(&self) -> String {
        self.to_string().to_lowercase()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Unsigned(value) => write!(f, "{}", value),
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Missing => Ok(()),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Unsigned(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(FieldValue::Missing, Into::into)
    }
}

/// A row of an admin list view.
pub trait Record: Clone + Send + Sync + 'static {
    /// Every field name search and sort may refer to, `id` included.
    const FIELDS: &'static [&'static str];

    fn id(&self) -> u64;

    /// `None` when `key` is not one of [`Record::FIELDS`].
    fn field(&self, key: &str) -> Option<FieldValue>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn asc(key: impl Into<String>) -> Self {
        Self { key: key.into(), order: SortOrder::Asc }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self { key: key.into(), order: SortOrder::Desc }
    }
}

/// Which fields the search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    AllFields,
    Fields(&'static [&'static str]),
}

impl SearchScope {
    pub fn fields<T: Record>(&self) -> &'static [&'static str] {
        match self {
            SearchScope::AllFields => T::FIELDS,
            SearchScope::Fields(fields) => fields,
        }
    }
}

/// Fixed per-view settings of the projection.
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    pub page_size: usize,
    pub scope: SearchScope,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub sort: Option<SortSpec>,
    /// 1-based.
    pub page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self { search: String::new(), sort: None, page: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// Requested page after clamping.
    pub page: usize,
    pub page_size: usize,
    /// `ceil(total / page_size)`; 0 when nothing matched.
    pub page_count: usize,
    /// Records left after filtering.
    pub total: usize,
}

/// True when the lower-cased `needle` occurs in any in-scope field.
pub fn matches<T: Record>(record: &T, scope: &SearchScope, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    scope
        .fields::<T>()
        .iter()
        .filter_map(|key| record.field(key))
        .any(|value| value.normalized().contains(needle))
}

pub fn filter<'a, T: Record>(records: &'a [T], scope: &SearchScope, search: &str) -> Vec<&'a T> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|record| matches(*record, scope, &needle))
        .collect()
}

/// Page bounds for `total` items: `(clamped page, page count, start, end)`.
pub fn page_bounds(total: usize, page: usize, page_size: usize) -> (usize, usize, usize, usize) {
    let page_size = page_size.max(1);
    let page_count = total.div_ceil(page_size);
    let page = page.clamp(1, page_count.max(1));
    let start = ((page - 1) * page_size).min(total);
    let end = (start + page_size).min(total);
    (page, page_count, start, end)
}

pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> ListPage<T> {
    let (page, page_count, start, end) = page_bounds(items.len(), page, page_size);
    ListPage {
        items: items[start..end].to_vec(),
        page,
        page_size: page_size.max(1),
        page_count,
        total: items.len(),
    }
}

/// Filter, sort and paginate `records` for `query`.
pub fn run<T: Record>(records: &[T], options: &ViewOptions, query: &ListQuery) -> ListPage<T> {
    let mut visible = filter(records, &options.scope, &query.search);
    if let Some(spec) = &query.sort {
        sort_records(&mut visible, spec);
    }

    let listing = paginate(&visible, query.page, options.page_size);
    ListPage {
        items: listing.items.into_iter().cloned().collect(),
        page: listing.page,
        page_size: listing.page_size,
        page_count: listing.page_count,
        total: listing.total,
    }
}
