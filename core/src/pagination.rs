//! Pagination query parameters and the list envelope shared by every
//! paginated endpoint.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const DEFAULT_PAGE: u32 = 1;

/// Append `perPage` and `page` query parameters to `path`.
///
/// `count` and `offset` are expected to be at least 1; values are passed
/// through unchecked. Callers normally go through `Page`, whose defaults
/// are 10 and 1.
pub fn paginate_url(path: &str, count: u32, offset: u32) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}perPage={count}&page={offset}")
}

/// A page request: page size and 1-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub per_page: u32,
    pub page: u32,
}

impl Page {
    /// Zero for either value falls back to the default (10 per page, page 1).
    pub fn new(per_page: u32, page: u32) -> Self {
        let per_page = if per_page == 0 { DEFAULT_PER_PAGE } else { per_page };
        let page = if page == 0 { DEFAULT_PAGE } else { page };
        Self { per_page, page }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page: DEFAULT_PAGE,
        }
    }
}

/// Pagination metadata returned alongside every list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListMeta {
    pub total: u64,
    pub skipped: u64,
    pub per_page: u64,
    pub page: u64,
    pub page_count: u64,
}

/// The `{meta, data}` envelope used by every listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    #[serde(default)]
    pub meta: ListMeta,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            meta: ListMeta::default(),
            data: Vec::new(),
        }
    }
}

impl<T> List<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}
