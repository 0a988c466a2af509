//! Filtering, sorting, pagination, and view orchestration for the cutoff table.
//!
//! This crate provides:
//! - [`filter`](filter::filter) and [`available_values`] - Selection matching and candidate lists
//! - [`sort`](sort::sort) and [`SortSpec`] - Two-key ordering with a missing-value policy
//! - [`paginate`] and [`PageSize`] - Fixed-size pages with clamping
//! - [`View`] - Recomputes all derived state after every action

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod filter;
pub mod paginate;
pub mod sort;
pub mod view;

pub use filter::{AvailableValues, SearchTexts, Selections, available_values, locale_cmp};
pub use paginate::{Page, PageRange, PageSize, paginate};
pub use sort::{SortChange, SortDirection, SortKey, SortRole, SortSpec, compare_cutoffs};
pub use view::{Outcome, Snapshot, View, ViewAction, ViewConfig, ViewState};
