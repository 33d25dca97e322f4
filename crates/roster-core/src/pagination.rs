//! Pagination types for list operations.

use crate::{RosterError, RosterResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Columns a page of users may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Id,
}

impl SortField {
    /// Returns the column name used by the store.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

/// Sort specification for a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: SortField,
    pub direction: Direction,
}

impl Sort {
    /// Sorts ascending by the given field.
    #[must_use]
    pub const fn by(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    /// Switches the sort to descending order.
    #[must_use]
    pub const fn descending(self) -> Self {
        Self {
            field: self.field,
            direction: Direction::Desc,
        }
    }

    /// Returns the `ORDER BY` clause body, e.g. `id DESC`.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("{} {}", self.field.column(), self.direction)
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::by(SortField::Id).descending()
    }
}

/// A request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (0-indexed).
    pub page: usize,
    /// The number of items per page (always at least 1).
    pub size: usize,
    /// Ordering applied before slicing.
    #[serde(default)]
    pub sort: Sort,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: usize = 10;

    /// Creates a new page request sorted by id, newest first.
    #[must_use]
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Sort::default(),
        }
    }

    /// Builds a request from 1-based, possibly missing query values.
    ///
    /// A missing or non-positive `page` selects the first page; a missing or
    /// non-positive `size` selects [`Self::DEFAULT_SIZE`].
    #[must_use]
    pub fn from_one_based(page: Option<i64>, size: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p > 0 => usize::try_from(p - 1).unwrap_or(0),
            _ => 0,
        };
        let size = match size {
            Some(s) if s > 0 => usize::try_from(s).unwrap_or(Self::DEFAULT_SIZE),
            _ => Self::DEFAULT_SIZE,
        };
        Self::new(page, size)
    }

    /// Returns the number of rows to skip.
    ///
    /// Fails with a validation error when `page * size` does not fit in a
    /// `usize`.
    pub fn offset(&self) -> RosterResult<usize> {
        self.page.checked_mul(self.size).ok_or_else(|| {
            RosterError::validation(format!(
                "Page {} of size {} is out of range",
                self.page + 1,
                self.size
            ))
        })
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.size
    }
}

/// Information about a page of results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageInfo {
    /// The current page number (0-indexed).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
    /// The total number of items across all pages.
    pub total_elements: u64,
    /// The total number of pages.
    pub total_pages: u64,
    /// Whether this is the first page.
    pub first: bool,
    /// Whether this is the last page.
    pub last: bool,
    /// The number of items on this page.
    pub number_of_elements: usize,
}

impl PageInfo {
    /// Creates a new page info.
    #[must_use]
    pub fn new(page: usize, size: usize, total_elements: u64, number_of_elements: usize) -> Self {
        let total_pages = if size > 0 {
            total_elements.div_ceil(size as u64)
        } else {
            0
        };

        Self {
            page,
            size,
            total_elements,
            total_pages,
            first: page == 0,
            last: page as u64 >= total_pages.saturating_sub(1),
            number_of_elements,
        }
    }
}

/// A page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// Information about this page.
    #[serde(flatten)]
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(content: Vec<T>, page: usize, size: usize, total_elements: u64) -> Self {
        let number_of_elements = content.len();
        Self {
            content,
            info: PageInfo::new(page, size, total_elements, number_of_elements),
        }
    }

    /// Maps the page content to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            info: self.info,
        }
    }

    /// Returns the total number of elements across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.info.total_elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request() {
        let req = PageRequest::new(2, 10);
        assert_eq!(req.offset().unwrap(), 20);
        assert_eq!(req.limit(), 10);
        assert_eq!(req.sort, Sort::by(SortField::Id).descending());
    }

    #[test]
    fn test_page_request_size_is_at_least_one() {
        let req = PageRequest::new(0, 0);
        assert_eq!(req.size, 1);
    }

    #[test]
    fn test_from_one_based_defaults() {
        let req = PageRequest::from_one_based(None, None);
        assert_eq!(req.page, 0);
        assert_eq!(req.size, PageRequest::DEFAULT_SIZE);
    }

    #[test]
    fn test_from_one_based_shifts_page_index() {
        let req = PageRequest::from_one_based(Some(2), Some(5));
        assert_eq!(req.page, 1);
        assert_eq!(req.size, 5);
        assert_eq!(req.offset().unwrap(), 5);
    }

    #[test]
    fn test_offset_overflow_is_a_validation_error() {
        let req = PageRequest::from_one_based(Some(4_294_967_298), Some(4_294_967_297));
        assert!(matches!(req.offset(), Err(RosterError::Validation(_))));

        let req = PageRequest::new(usize::MAX, 2);
        assert!(req.offset().is_err());
    }

    #[test]
    fn test_from_one_based_non_positive_values() {
        let req = PageRequest::from_one_based(Some(0), Some(-3));
        assert_eq!(req.page, 0);
        assert_eq!(req.size, 10);

        let req = PageRequest::from_one_based(Some(-7), Some(0));
        assert_eq!(req.page, 0);
        assert_eq!(req.size, 10);
    }

    #[test]
    fn test_sort_to_sql() {
        assert_eq!(Sort::default().to_sql(), "id DESC");
        assert_eq!(Sort::by(SortField::Id).to_sql(), "id ASC");
    }

    #[test]
    fn test_page_info() {
        let page: Page<i32> = Page::new(vec![1, 2, 3], 0, 10, 25);
        assert!(page.info.first);
        assert!(!page.info.last);
        assert_eq!(page.info.total_pages, 3);
    }

    #[test]
    fn test_page_info_last_page() {
        let page: Page<i32> = Page::new(vec![1, 2], 2, 10, 22);
        assert!(!page.info.first);
        assert!(page.info.last);
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], 0, 10, 3);
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.content, vec![2, 4, 6]);
    }

    #[test]
    fn test_page_without_results() {
        let page: Page<i32> = Page::new(Vec::new(), 0, 10, 0);
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements(), 0);
        assert_eq!(page.info.total_pages, 0);
    }
}
