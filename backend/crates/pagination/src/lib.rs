//! Page-number pagination primitives.
//!
//! Catalogue endpoints page through results with a 1-based page number and a
//! positive page size. [`PageRequest`] validates both at construction so an
//! invalid page can never reach a repository, and exposes the offset/limit
//! arithmetic shared by SQL and in-memory adapters.
//!
//! ```
//! use pagination::PageRequest;
//!
//! let page = PageRequest::new(2, 5).expect("valid page");
//! assert_eq!(page.offset(), 5);
//! assert_eq!(page.slice((1..=12).collect()), vec![6, 7, 8, 9, 10]);
//! ```

use serde::{Deserialize, Serialize};

/// Page number used when a request does not supply one.
pub const DEFAULT_PAGE_NUM: u32 = 1;

/// Page size used when a request does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Errors raised while validating page parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Page numbers start at one.
    #[error("page number must be a positive integer, got {value}")]
    InvalidPageNum {
        /// Rejected page number.
        value: i64,
    },
    /// Page sizes must hold at least one item.
    #[error("page size must be a positive integer, got {value}")]
    InvalidPageSize {
        /// Rejected page size.
        value: i64,
    },
    /// Page numbers are bounded by `u32::MAX`.
    #[error("page number {value} is out of range (1..={max})", max = u32::MAX)]
    PageNumOutOfRange {
        /// Rejected page number.
        value: i64,
    },
    /// Page sizes are bounded by `u32::MAX`.
    #[error("page size {value} is out of range (1..={max})", max = u32::MAX)]
    PageSizeOutOfRange {
        /// Rejected page size.
        value: i64,
    },
}

/// Validated 1-based page selection.
///
/// ## Invariants
/// - `page_num >= 1`
/// - `page_size >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PageRequestDto", into = "PageRequestDto")]
pub struct PageRequest {
    page_num: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate and build a page selection.
    ///
    /// # Errors
    /// Returns [`PaginationError::InvalidPageNum`] or
    /// [`PaginationError::InvalidPageSize`] when a value is below one, and the
    /// matching `*OutOfRange` variant when it does not fit in `u32`. The page
    /// number is checked first.
    pub fn new(page_num: i64, page_size: i64) -> Result<Self, PaginationError> {
        let page_num = bounded(
            page_num,
            |value| PaginationError::InvalidPageNum { value },
            |value| PaginationError::PageNumOutOfRange { value },
        )?;
        let page_size = bounded(
            page_size,
            |value| PaginationError::InvalidPageSize { value },
            |value| PaginationError::PageSizeOutOfRange { value },
        )?;
        Ok(Self {
            page_num,
            page_size,
        })
    }

    /// Selected page, starting at one.
    #[must_use]
    pub const fn page_num(&self) -> u32 {
        self.page_num
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items to skip before the page starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page_num - 1) * u64::from(self.page_size)
    }

    /// Number of items to take, equal to the page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page_size
    }

    /// Cut this page out of an already ordered result set.
    ///
    /// Pages past the end yield an empty vector.
    #[must_use]
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(self.page_size).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take).collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_num: DEFAULT_PAGE_NUM,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn bounded(
    value: i64,
    too_small: fn(i64) -> PaginationError,
    too_large: fn(i64) -> PaginationError,
) -> Result<u32, PaginationError> {
    if value < 1 {
        return Err(too_small(value));
    }
    u32::try_from(value).map_err(|_| too_large(value))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageRequestDto {
    page_num: i64,
    page_size: i64,
}

impl From<PageRequest> for PageRequestDto {
    fn from(value: PageRequest) -> Self {
        Self {
            page_num: i64::from(value.page_num),
            page_size: i64::from(value.page_size),
        }
    }
}

impl TryFrom<PageRequestDto> for PageRequest {
    type Error = PaginationError;

    fn try_from(value: PageRequestDto) -> Result<Self, Self::Error> {
        Self::new(value.page_num, value.page_size)
    }
}
