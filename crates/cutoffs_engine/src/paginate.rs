//! Pagination engine.
//!
//! This module provides:
//! - [`PageSize`] - The allowed rows-per-page values
//! - [`PageRange`] - The valid page numbers for a result size
//! - [`paginate`] - The slice of rows for a requested page
//!
//! Page numbers are 1-based. An empty result has no pages at all, not one
//! empty page.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::Serialize;

use cutoffs_foundation::{Error, Record};

// =============================================================================
// Page Size
// =============================================================================

/// The allowed number of rows per page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum PageSize {
    /// 10 rows.
    Ten,
    /// 20 rows.
    #[default]
    Twenty,
    /// 50 rows.
    Fifty,
    /// 100 rows.
    Hundred,
}

impl PageSize {
    /// All allowed sizes, smallest first.
    pub const ALL: [PageSize; 4] = [Self::Ten, Self::Twenty, Self::Fifty, Self::Hundred];

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rows())
    }
}

impl TryFrom<usize> for PageSize {
    type Error = Error;

    fn try_from(rows: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.rows() == rows)
            .ok_or_else(|| Error::invalid_page_size(rows.to_string()))
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: usize = s
            .trim()
            .parse()
            .map_err(|_| Error::invalid_page_size(s.trim()))?;
        Self::try_from(rows)
    }
}

// =============================================================================
// Page Range
// =============================================================================

/// The valid page numbers `1..=last`; empty when `last` is 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PageRange {
    last: usize,
}

impl PageRange {
    /// Derives the range for `len` rows at `size` rows per page.
    #[must_use]
    pub const fn new(len: usize, size: PageSize) -> Self {
        Self {
            last: len.div_ceil(size.rows()),
        }
    }

    /// Returns the number of pages.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.last
    }

    /// Returns true if there are no pages.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.last == 0
    }

    /// Returns the last page number, if any.
    #[must_use]
    pub const fn last(&self) -> Option<usize> {
        if self.last == 0 { None } else { Some(self.last) }
    }

    /// Returns true if `page` is a valid page number.
    #[must_use]
    pub const fn contains(&self, page: usize) -> bool {
        page >= 1 && page <= self.last
    }

    /// Clamps a requested page into the range. `None` when empty.
    #[must_use]
    pub fn clamp(&self, page: usize) -> Option<usize> {
        self.last().map(|last| page.clamp(1, last))
    }

    /// Returns the page numbers in order.
    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.last
    }
}

impl IntoIterator for PageRange {
    type Item = usize;
    type IntoIter = std::ops::RangeInclusive<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Page
// =============================================================================

/// One page of ordered rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    /// The rows on this page, in order.
    pub rows: Vec<Arc<Record>>,
    /// The page actually shown, after clamping. `None` when there are no rows.
    pub current: Option<usize>,
    /// All valid page numbers.
    pub range: PageRange,
}

/// Cuts the page `requested` out of `records`.
///
/// The request is clamped into the valid range, so page 0 shows page 1
/// and anything past the end shows the last page.
#[must_use]
pub fn paginate(records: &[Arc<Record>], size: PageSize, requested: usize) -> Page {
    let range = PageRange::new(records.len(), size);
    let Some(current) = range.clamp(requested) else {
        return Page {
            rows: Vec::new(),
            current: None,
            range,
        };
    };

    let start = (current - 1) * size.rows();
    let end = (start + size.rows()).min(records.len());
    Page {
        rows: records[start..end].to_vec(),
        current: Some(current),
        range,
    }
}
