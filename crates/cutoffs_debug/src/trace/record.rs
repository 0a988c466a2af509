//! Trace event and record types.
//!
//! This module defines the events that can be traced while a view is being
//! driven: dataset loading, user actions, and each recomputation stage.

use serde::Serialize;

use cutoffs_engine::{SortKey, SortRole, ViewAction};
use cutoffs_foundation::Category;

// =============================================================================
// Stage
// =============================================================================

/// A step of the recomputation pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Selection matching.
    Filter,
    /// Two-key ordering.
    Sort,
    /// Page slicing.
    Paginate,
    /// Candidate value lists.
    Available,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Filter => "filter",
            Self::Sort => "sort",
            Self::Paginate => "paginate",
            Self::Available => "available",
        })
    }
}

// =============================================================================
// Trace Event
// =============================================================================

/// Events that can be traced.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TraceEvent {
    /// A dataset was loaded into the store.
    DatasetLoaded {
        /// Where the records came from.
        source: String,
        /// Number of records loaded.
        records: usize,
        /// Categories with at least one value.
        categories: Vec<Category>,
    },

    /// An input column was not recognized and was ignored.
    ColumnIgnored {
        /// Where the column was seen.
        source: String,
        /// The column name.
        column: String,
    },

    /// The user performed an action.
    ViewAction {
        /// The action.
        action: ViewAction,
        /// Whether it changed the view state.
        changed: bool,
    },

    /// A pipeline stage finished.
    StageComplete {
        /// The stage.
        stage: Stage,
        /// Rows (or candidate values) it produced.
        rows: usize,
    },

    /// Assigning a sort role removed the same category from the other role.
    SortRoleCleared {
        /// The role that was emptied.
        role: SortRole,
        /// The key it held.
        key: SortKey,
    },

    /// The page went back to 1 after a change.
    PageReset {
        /// The page shown before.
        from: usize,
    },

    /// A page request fell outside the valid range.
    PageClamped {
        /// The page asked for.
        requested: usize,
        /// The page shown; `None` when nothing matched.
        shown: Option<usize>,
    },
}

impl TraceEvent {
    /// Returns a short name for the event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::DatasetLoaded { .. } => "dataset-loaded",
            Self::ColumnIgnored { .. } => "column-ignored",
            Self::ViewAction { .. } => "view-action",
            Self::StageComplete { .. } => "stage-complete",
            Self::SortRoleCleared { .. } => "sort-role-cleared",
            Self::PageReset { .. } => "page-reset",
            Self::PageClamped { .. } => "page-clamped",
        }
    }

    /// Every event type name, in declaration order.
    pub const TYPES: [&'static str; 7] = [
        "dataset-loaded",
        "column-ignored",
        "view-action",
        "stage-complete",
        "sort-role-cleared",
        "page-reset",
        "page-clamped",
    ];
}

// =============================================================================
// Trace Record
// =============================================================================

/// A timestamped trace record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraceRecord {
    /// Unique record ID within the session.
    pub id: u64,
    /// The snapshot revision current when this event occurred.
    pub revision: u64,
    /// Timestamp in nanoseconds since session start.
    pub timestamp_ns: u64,
    /// The trace event.
    pub event: TraceEvent,
}

impl TraceRecord {
    /// Creates a new trace record.
    #[must_use]
    pub fn new(id: u64, revision: u64, timestamp_ns: u64, event: TraceEvent) -> Self {
        Self {
            id,
            revision,
            timestamp_ns,
            event,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}
