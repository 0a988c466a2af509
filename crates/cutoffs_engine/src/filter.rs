//! Filter engine.
//!
//! This module provides:
//! - [`Selections`] - The chosen values per filter field
//! - [`SearchTexts`] - Per-field text used to narrow candidate lists
//! - [`filter`] - The record subset matching all active selections
//! - [`available_values`] - The values still selectable for every field
//!
//! Within a field the selected values are OR-ed, across fields they are
//! AND-ed. A field with an empty selection imposes no constraint.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::Serialize;

use cutoffs_foundation::{FilterField, Record};

// =============================================================================
// Selections
// =============================================================================

/// The set of values chosen for each filter field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Selections {
    by_field: [BTreeSet<String>; 4],
}

impl Selections {
    /// Creates selections with nothing chosen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a selected value.
    #[must_use]
    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Returns the values selected for a field.
    #[must_use]
    pub fn get(&self, field: FilterField) -> &BTreeSet<String> {
        &self.by_field[field.index()]
    }

    /// Returns true if `value` is selected for `field`.
    #[must_use]
    pub fn is_selected(&self, field: FilterField, value: &str) -> bool {
        self.get(field).contains(value)
    }

    /// Adds a value. Returns true if it was not already selected.
    pub fn insert(&mut self, field: FilterField, value: impl Into<String>) -> bool {
        self.by_field[field.index()].insert(value.into())
    }

    /// Removes a value. Returns true if it was selected.
    pub fn remove(&mut self, field: FilterField, value: &str) -> bool {
        self.by_field[field.index()].remove(value)
    }

    /// Selects `value` if absent, deselects it if present.
    ///
    /// Returns true if the value is selected afterwards.
    pub fn toggle(&mut self, field: FilterField, value: &str) -> bool {
        if self.remove(field, value) {
            false
        } else {
            self.insert(field, value)
        }
    }

    /// Clears one field. Returns true if anything was removed.
    pub fn clear(&mut self, field: FilterField) -> bool {
        let set = &mut self.by_field[field.index()];
        let changed = !set.is_empty();
        set.clear();
        changed
    }

    /// Clears every field. Returns true if anything was removed.
    pub fn clear_all(&mut self) -> bool {
        FilterField::ALL
            .into_iter()
            .fold(false, |changed, field| self.clear(field) | changed)
    }

    /// Returns true if no field has a selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_field.iter().all(BTreeSet::is_empty)
    }

    /// Returns the fields with a non-empty selection.
    pub fn active(&self) -> impl Iterator<Item = (FilterField, &BTreeSet<String>)> {
        FilterField::ALL
            .into_iter()
            .map(|field| (field, self.get(field)))
            .filter(|(_, values)| !values.is_empty())
    }

    /// Returns true if the record satisfies every active selection.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.matches_except(record, None)
    }

    /// Returns true if the record satisfies every active selection other
    /// than the one on `excluded`.
    #[must_use]
    pub fn matches_except(&self, record: &Record, excluded: Option<FilterField>) -> bool {
        self.active()
            .filter(|(field, _)| Some(*field) != excluded)
            .all(|(field, values)| {
                record
                    .get(field.column())
                    .is_some_and(|value| values.contains(value))
            })
    }
}

// =============================================================================
// Search Texts
// =============================================================================

/// Free-form text per field, used only to narrow that field's candidates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SearchTexts {
    by_field: [String; 4],
}

impl SearchTexts {
    /// Creates empty search texts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the search text for a field.
    #[must_use]
    pub fn get(&self, field: FilterField) -> &str {
        &self.by_field[field.index()]
    }

    /// Sets the search text for a field. Returns true if it changed.
    pub fn set(&mut self, field: FilterField, text: impl Into<String>) -> bool {
        let text = text.into();
        let slot = &mut self.by_field[field.index()];
        if *slot == text {
            return false;
        }
        *slot = text;
        true
    }
}

// =============================================================================
// Available Values
// =============================================================================

/// The ordered candidate values for every filter field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AvailableValues {
    by_field: [Vec<String>; 4],
}

impl AvailableValues {
    /// Returns the candidates for a field.
    #[must_use]
    pub fn get(&self, field: FilterField) -> &[String] {
        &self.by_field[field.index()]
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Keeps the records that satisfy every active selection, in input order.
pub fn filter<'a, I>(records: I, selections: &Selections) -> Vec<Arc<Record>>
where
    I: IntoIterator<Item = &'a Arc<Record>>,
{
    if selections.is_empty() {
        return records.into_iter().cloned().collect();
    }
    records
        .into_iter()
        .filter(|r| selections.matches(r))
        .cloned()
        .collect()
}

/// Computes the selectable values for every filter field.
///
/// Each field's candidates are drawn from the records that satisfy the
/// *other* fields' selections, so a field never narrows its own list.
pub fn available_values<'a, I>(
    records: I,
    selections: &Selections,
    searches: &SearchTexts,
) -> AvailableValues
where
    I: IntoIterator<Item = &'a Arc<Record>> + Clone,
{
    let mut available = AvailableValues::default();
    for field in FilterField::ALL {
        let candidates = candidate_values(records.clone(), selections, field);
        available.by_field[field.index()] = narrow(candidates, searches.get(field));
    }
    available
}

/// Distinct values of `field` across the records that satisfy every
/// selection except `field`'s own, in locale order.
///
/// Records without a value for `field` contribute nothing.
pub fn candidate_values<'a, I>(
    records: I,
    selections: &Selections,
    field: FilterField,
) -> Vec<String>
where
    I: IntoIterator<Item = &'a Arc<Record>>,
{
    let distinct: BTreeSet<&str> = records
        .into_iter()
        .filter(|r| selections.matches_except(r, Some(field)))
        .filter_map(|r| r.get(field.column()))
        .collect();

    let mut values: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    values.sort_by(|a, b| locale_cmp(a, b));
    values
}

/// Keeps the values whose lowercase form contains the lowercase search.
#[must_use]
pub fn narrow(values: Vec<String>, search: &str) -> Vec<String> {
    if search.is_empty() {
        return values;
    }
    let needle = search.to_lowercase();
    values
        .into_iter()
        .filter(|v| v.to_lowercase().contains(&needle))
        .collect()
}

/// Orders strings the way a human-facing list expects: letters compare
/// case-insensitively first, and only exact case-folded ties fall back to
/// case, lowercase first.
///
/// Folded characters compare by code point, so accented letters are not
/// collated with their base letter: `"École"` sorts after `"Zeta"`.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| b.cmp(a))
}
