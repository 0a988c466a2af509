//! The view orchestrator.
//!
//! This module provides:
//! - [`ViewConfig`] - Initial page size and sort
//! - [`ViewAction`] - Every user action that can change the view
//! - [`View`] - Owns the view state and its current [`Snapshot`]
//!
//! Every action is followed by a full recomputation from the record
//! store: filter, then sort, then paginate, then the available values.
//! The new snapshot is built completely before it replaces the old one.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::Serialize;

use cutoffs_foundation::{Category, FilterField, Record};
use cutoffs_storage::RecordStore;

use crate::filter::{AvailableValues, SearchTexts, Selections, available_values, filter};
use crate::paginate::{PageRange, PageSize, paginate};
use crate::sort::{SortDirection, SortKey, SortRole, SortSpec, sort};

// =============================================================================
// Configuration
// =============================================================================

/// Initial settings for a view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewConfig {
    /// Rows per page.
    pub page_size: PageSize,
    /// Initial sort.
    pub sort: SortSpec,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::Twenty,
            sort: SortSpec::new()
                .with_primary(SortKey::desc(Category::Oc))
                .with_secondary(SortKey::desc(Category::Bc)),
        }
    }
}

impl ViewConfig {
    /// Creates the default configuration (20 rows, OC then BC descending).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with no sort keys.
    #[must_use]
    pub fn unsorted() -> Self {
        Self {
            sort: SortSpec::new(),
            ..Self::default()
        }
    }

    /// Builder method to set the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Builder method to replace the sort.
    #[must_use]
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }
}

// =============================================================================
// Actions
// =============================================================================

/// A user action on the view.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "action", rename_all = "kebab-case"))]
pub enum ViewAction {
    /// Select a value if unselected, deselect it otherwise.
    ToggleFilter {
        /// The field.
        field: FilterField,
        /// The value.
        value: String,
    },
    /// Select a value.
    Select {
        /// The field.
        field: FilterField,
        /// The value.
        value: String,
    },
    /// Deselect a value.
    Deselect {
        /// The field.
        field: FilterField,
        /// The value.
        value: String,
    },
    /// Clear one field's selection.
    ClearFilter {
        /// The field.
        field: FilterField,
    },
    /// Clear every selection.
    ClearAllFilters,
    /// Change a field's search text.
    Search {
        /// The field.
        field: FilterField,
        /// The new text.
        text: String,
    },
    /// Put a category in a sort role, or empty the role.
    AssignSort {
        /// The role.
        role: SortRole,
        /// The category, `None` to empty the role.
        category: Option<Category>,
    },
    /// Flip the direction of whichever role holds a category.
    ToggleDirection {
        /// The category.
        category: Category,
    },
    /// Set a role's direction.
    SetDirection {
        /// The role.
        role: SortRole,
        /// The direction.
        direction: SortDirection,
    },
    /// Change the rows per page.
    SetPageSize {
        /// The new size.
        page_size: PageSize,
    },
    /// Show a page (clamped into range).
    GoToPage {
        /// The requested page.
        page: usize,
    },
    /// Show the following page, if any.
    NextPage,
    /// Show the preceding page, if any.
    PreviousPage,
}

impl ViewAction {
    /// Returns true if this action changes the result set, its order, or
    /// its paging, which sends the view back to page 1.
    #[must_use]
    pub const fn resets_page(&self) -> bool {
        !matches!(
            self,
            Self::Search { .. } | Self::GoToPage { .. } | Self::NextPage | Self::PreviousPage
        )
    }
}

/// What applying an action did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the view state changed.
    pub changed: bool,
    /// Whether the page was sent back to 1.
    pub page_reset: bool,
    /// A sort key removed from the other role by an assignment.
    pub sort_cleared: Option<(SortRole, SortKey)>,
    /// The page requested before clamping.
    pub requested_page: usize,
    /// The page shown after clamping.
    pub current_page: Option<usize>,
    /// Revision of the snapshot produced.
    pub revision: u64,
}

impl Outcome {
    /// Returns true if the requested page had to be clamped.
    ///
    /// With nothing matched, only a request past page 1 counts.
    #[must_use]
    pub fn clamped(&self) -> bool {
        match self.current_page {
            Some(page) => page != self.requested_page,
            None => self.requested_page != 1,
        }
    }
}

// =============================================================================
// State and Snapshot
// =============================================================================

/// The user-controlled inputs of a view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    /// Per-field selections.
    pub selections: Selections,
    /// Per-field search texts.
    pub searches: SearchTexts,
    /// Sort keys.
    pub sort: SortSpec,
    /// Rows per page.
    pub page_size: PageSize,
    /// Requested page, 1-based.
    pub page: usize,
}

impl ViewState {
    /// Creates the initial state for a configuration.
    #[must_use]
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            selections: Selections::new(),
            searches: SearchTexts::new(),
            sort: config.sort,
            page_size: config.page_size,
            page: 1,
        }
    }
}

/// Everything a renderer needs, derived from one state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    /// Incremented on every recomputation.
    pub revision: u64,
    /// Rows of the current page, in sorted order.
    pub rows: Vec<Arc<Record>>,
    /// Valid page numbers.
    pub page_range: PageRange,
    /// The page shown; `None` when nothing matches.
    pub current_page: Option<usize>,
    /// Rows per page.
    pub page_size: PageSize,
    /// Candidate values for each filter field.
    pub available: AvailableValues,
    /// The selections the snapshot was computed from.
    pub selections: Selections,
    /// The search texts the snapshot was computed from.
    pub searches: SearchTexts,
    /// The sort the snapshot was computed from.
    pub sort: SortSpec,
    /// Records in the store.
    pub total: usize,
    /// Records matching the selections.
    pub matched: usize,
}

impl Snapshot {
    /// Returns the 1-based positions of the first and last rows shown.
    #[must_use]
    pub fn row_span(&self) -> Option<(usize, usize)> {
        let page = self.current_page?;
        let first = (page - 1) * self.page_size.rows() + 1;
        Some((first, first + self.rows.len() - 1))
    }
}

// =============================================================================
// View
// =============================================================================

/// A filterable, sortable, paginated view over a record store.
#[derive(Clone, Debug)]
pub struct View {
    store: RecordStore,
    state: ViewState,
    snapshot: Snapshot,
}

impl View {
    /// Creates a view with the default configuration.
    #[must_use]
    pub fn new(store: RecordStore) -> Self {
        Self::with_config(store, &ViewConfig::default())
    }

    /// Creates a view with the given configuration.
    #[must_use]
    pub fn with_config(store: RecordStore, config: &ViewConfig) -> Self {
        let state = ViewState::new(config);
        let snapshot = Self::compute(&store, &state, 0);
        let mut view = Self {
            store,
            state,
            snapshot,
        };
        view.settle_page();
        view
    }

    /// Returns the record store.
    #[must_use]
    pub const fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Returns the current snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Applies an action and recomputes the snapshot.
    pub fn apply(&mut self, action: &ViewAction) -> Outcome {
        let mut sort_cleared = None;
        let changed = match action {
            ViewAction::ToggleFilter { field, value } => {
                self.state.selections.toggle(*field, value);
                true
            }
            ViewAction::Select { field, value } => {
                self.state.selections.insert(*field, value.clone())
            }
            ViewAction::Deselect { field, value } => self.state.selections.remove(*field, value),
            ViewAction::ClearFilter { field } => self.state.selections.clear(*field),
            ViewAction::ClearAllFilters => self.state.selections.clear_all(),
            ViewAction::Search { field, text } => self.state.searches.set(*field, text.clone()),
            ViewAction::AssignSort { role, category } => {
                let change = self.state.sort.assign(*role, *category);
                sort_cleared = change.cleared.map(|key| (role.other(), key));
                change.changed(&self.state.sort)
            }
            ViewAction::ToggleDirection { category } => {
                self.state.sort.toggle_direction(*category).is_some()
            }
            ViewAction::SetDirection { role, direction } => {
                self.state.sort.set_direction(*role, *direction)
            }
            ViewAction::SetPageSize { page_size } => {
                let changed = self.state.page_size != *page_size;
                self.state.page_size = *page_size;
                changed
            }
            ViewAction::GoToPage { page } => self.request_page(*page),
            ViewAction::NextPage => self.request_page(self.state.page.saturating_add(1)),
            ViewAction::PreviousPage => self.request_page(self.state.page.saturating_sub(1).max(1)),
        };

        let page_reset = changed && action.resets_page() && self.state.page != 1;
        if changed && action.resets_page() {
            self.state.page = 1;
        }

        let requested_page = self.state.page;
        self.recompute();

        Outcome {
            changed,
            page_reset,
            sort_cleared,
            requested_page,
            current_page: self.snapshot.current_page,
            revision: self.snapshot.revision,
        }
    }

    /// Recomputes the snapshot from the store and current state.
    pub fn recompute(&mut self) {
        let next = Self::compute(&self.store, &self.state, self.snapshot.revision + 1);
        self.snapshot = next;
        self.settle_page();
    }

    fn request_page(&mut self, page: usize) -> bool {
        let changed = self.state.page != page;
        self.state.page = page;
        changed
    }

    /// Records the clamped page back into the state so the stored page is
    /// always a valid one.
    fn settle_page(&mut self) {
        self.state.page = self.snapshot.current_page.unwrap_or(1);
    }

    fn compute(store: &RecordStore, state: &ViewState, revision: u64) -> Snapshot {
        let filtered = filter(store, &state.selections);
        let matched = filtered.len();
        let ordered = sort(filtered, &state.sort);
        let page = paginate(&ordered, state.page_size, state.page);
        let available = available_values(store, &state.selections, &state.searches);

        Snapshot {
            revision,
            rows: page.rows,
            page_range: page.range,
            current_page: page.current,
            page_size: state.page_size,
            available,
            selections: state.selections.clone(),
            searches: state.searches.clone(),
            sort: state.sort,
            total: store.len(),
            matched,
        }
    }

    // -------------------------------------------------------------------------
    // Convenience methods
    // -------------------------------------------------------------------------

    /// Toggles a filter value.
    pub fn toggle_filter(&mut self, field: FilterField, value: impl Into<String>) -> Outcome {
        self.apply(&ViewAction::ToggleFilter {
            field,
            value: value.into(),
        })
    }

    /// Adds a filter value.
    pub fn select(&mut self, field: FilterField, value: impl Into<String>) -> Outcome {
        self.apply(&ViewAction::Select {
            field,
            value: value.into(),
        })
    }

    /// Removes one selected value.
    pub fn deselect(&mut self, field: FilterField, value: impl Into<String>) -> Outcome {
        self.apply(&ViewAction::Deselect {
            field,
            value: value.into(),
        })
    }

    /// Clears one field's selection.
    pub fn clear_filter(&mut self, field: FilterField) -> Outcome {
        self.apply(&ViewAction::ClearFilter { field })
    }

    /// Clears every field's selection.
    pub fn clear_all_filters(&mut self) -> Outcome {
        self.apply(&ViewAction::ClearAllFilters)
    }

    /// Sets a field's search text.
    pub fn set_search(&mut self, field: FilterField, text: impl Into<String>) -> Outcome {
        self.apply(&ViewAction::Search {
            field,
            text: text.into(),
        })
    }

    /// Assigns a category to a sort role, or empties it.
    pub fn assign_sort(&mut self, role: SortRole, category: Option<Category>) -> Outcome {
        self.apply(&ViewAction::AssignSort { role, category })
    }

    /// Flips the direction of the role holding a category.
    pub fn toggle_direction(&mut self, category: Category) -> Outcome {
        self.apply(&ViewAction::ToggleDirection { category })
    }

    /// Sets the direction of a role.
    pub fn set_direction(&mut self, role: SortRole, direction: SortDirection) -> Outcome {
        self.apply(&ViewAction::SetDirection { role, direction })
    }

    /// Changes the page size.
    pub fn set_page_size(&mut self, page_size: PageSize) -> Outcome {
        self.apply(&ViewAction::SetPageSize { page_size })
    }

    /// Shows a page.
    pub fn go_to_page(&mut self, page: usize) -> Outcome {
        self.apply(&ViewAction::GoToPage { page })
    }

    /// Moves forward one page, staying on the last.
    pub fn next_page(&mut self) -> Outcome {
        self.apply(&ViewAction::NextPage)
    }

    /// Moves back one page, staying on the first.
    pub fn previous_page(&mut self) -> Outcome {
        self.apply(&ViewAction::PreviousPage)
    }
}
