//! Page slicing over a filtered sequence.

use serde::Serialize;

/// Default number of recipes shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a filtered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Length of the whole filtered sequence
    pub total: usize,
    pub page_index: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn page_count(&self) -> usize {
        page_count(self.total, self.page_size)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page_index: self.page_index,
            page_size: self.page_size,
        }
    }
}

/// Slice `[page_index * page_size, page_index * page_size + page_size)` out of `items`.
///
/// Out-of-range pages and a zero page size produce an empty slice, never a panic.
pub fn paginate<T>(items: &[T], page_index: usize, page_size: usize) -> Page<&T> {
    let start = page_index.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: items[start..end].iter().collect(),
        total: items.len(),
        page_index,
        page_size,
    }
}

/// Number of pages needed for `total` items.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}
