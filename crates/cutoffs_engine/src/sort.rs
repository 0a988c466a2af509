//! Sort engine.
//!
//! This module provides:
//! - [`SortSpec`] - The primary and secondary sort keys
//! - [`compare_cutoffs`] - The per-key comparator with the missing-value policy
//! - [`sort`] - A stable two-key sort over records
//!
//! Missing or unparseable cutoffs are a separate comparison class, not a
//! number: they always sort after present values, whichever the direction.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::Serialize;

use cutoffs_foundation::{Category, Error, Record, parse_cutoff};

// =============================================================================
// Direction and Role
// =============================================================================

/// Sort direction for one key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SortDirection {
    /// Smaller values first.
    Ascending,
    /// Larger values first.
    #[default]
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Applies this direction to an ascending ordering.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(Error::invalid_command(format!(
                "unknown sort direction: {other}"
            ))),
        }
    }
}

/// One of the two sort slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SortRole {
    /// Decides the order first.
    Primary,
    /// Breaks ties left by the primary key.
    Secondary,
}

impl SortRole {
    /// Returns the other role.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }
}

impl fmt::Display for SortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

impl FromStr for SortRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" | "1" => Ok(Self::Primary),
            "secondary" | "2" => Ok(Self::Secondary),
            other => Err(Error::invalid_command(format!("unknown sort role: {other}"))),
        }
    }
}

// =============================================================================
// Sort Spec
// =============================================================================

/// A category together with the direction to sort it in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SortKey {
    /// The category compared.
    pub category: Category,
    /// The direction.
    pub direction: SortDirection,
}

impl SortKey {
    /// Creates a new sort key.
    #[must_use]
    pub const fn new(category: Category, direction: SortDirection) -> Self {
        Self {
            category,
            direction,
        }
    }

    /// Creates an ascending key.
    #[must_use]
    pub const fn asc(category: Category) -> Self {
        Self::new(category, SortDirection::Ascending)
    }

    /// Creates a descending key.
    #[must_use]
    pub const fn desc(category: Category) -> Self {
        Self::new(category, SortDirection::Descending)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category, self.direction)
    }
}

/// What a call to [`SortSpec::assign`] changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortChange {
    /// The role that was assigned.
    pub role: SortRole,
    /// The key the role held before.
    pub previous: Option<SortKey>,
    /// The key removed from the other role, if it held the same category.
    pub cleared: Option<SortKey>,
}

impl SortChange {
    /// Returns true if the spec differs from before the call.
    #[must_use]
    pub fn changed(&self, spec: &SortSpec) -> bool {
        self.cleared.is_some() || spec.get(self.role) != self.previous
    }
}

/// The primary and secondary sort keys.
///
/// The two roles never hold the same category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SortSpec {
    primary: Option<SortKey>,
    secondary: Option<SortKey>,
}

impl SortSpec {
    /// Creates a spec with both roles empty.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            primary: None,
            secondary: None,
        }
    }

    /// Builder method to set the primary key.
    ///
    /// Clears the secondary key if it sorts the same category.
    #[must_use]
    pub fn with_primary(mut self, key: SortKey) -> Self {
        self.set(SortRole::Primary, Some(key));
        self
    }

    /// Builder method to set the secondary key.
    ///
    /// Clears the primary key if it sorts the same category.
    #[must_use]
    pub fn with_secondary(mut self, key: SortKey) -> Self {
        self.set(SortRole::Secondary, Some(key));
        self
    }

    /// Returns the primary key.
    #[must_use]
    pub const fn primary(&self) -> Option<SortKey> {
        self.primary
    }

    /// Returns the secondary key.
    #[must_use]
    pub const fn secondary(&self) -> Option<SortKey> {
        self.secondary
    }

    /// Returns the key held by a role.
    #[must_use]
    pub const fn get(&self, role: SortRole) -> Option<SortKey> {
        match role {
            SortRole::Primary => self.primary,
            SortRole::Secondary => self.secondary,
        }
    }

    fn slot_mut(&mut self, role: SortRole) -> &mut Option<SortKey> {
        match role {
            SortRole::Primary => &mut self.primary,
            SortRole::Secondary => &mut self.secondary,
        }
    }

    /// Returns the role holding `category`, if any.
    #[must_use]
    pub fn role_of(&self, category: Category) -> Option<SortRole> {
        [SortRole::Primary, SortRole::Secondary]
            .into_iter()
            .find(|&role| self.get(role).is_some_and(|k| k.category == category))
    }

    /// Returns the keys in precedence order.
    pub fn keys(&self) -> impl Iterator<Item = SortKey> {
        self.primary.into_iter().chain(self.secondary)
    }

    /// Returns the categories offered for the secondary role: every
    /// category except the current primary.
    pub fn secondary_choices(&self) -> impl Iterator<Item = Category> {
        let primary = self.primary.map(|k| k.category);
        Category::ALL
            .into_iter()
            .filter(move |&c| Some(c) != primary)
    }

    fn set(&mut self, role: SortRole, key: Option<SortKey>) -> SortChange {
        let previous = self.get(role);
        let other = role.other();
        let cleared = match (key, self.get(other)) {
            (Some(new), Some(held)) if held.category == new.category => {
                *self.slot_mut(other) = None;
                Some(held)
            }
            _ => None,
        };
        *self.slot_mut(role) = key;
        SortChange {
            role,
            previous,
            cleared,
        }
    }

    /// Assigns a category to a role, or empties the role with `None`.
    ///
    /// The role keeps its previous direction (descending if it was empty).
    /// If the other role held the same category, it is cleared.
    pub fn assign(&mut self, role: SortRole, category: Option<Category>) -> SortChange {
        let direction = self.get(role).map(|k| k.direction).unwrap_or_default();
        self.set(role, category.map(|c| SortKey::new(c, direction)))
    }

    /// Flips the direction of whichever role holds `category`.
    ///
    /// Returns the role that changed; `None` (and no change) if neither
    /// role holds the category.
    pub fn toggle_direction(&mut self, category: Category) -> Option<SortRole> {
        let role = self.role_of(category)?;
        if let Some(key) = self.slot_mut(role) {
            key.direction = key.direction.flipped();
        }
        Some(role)
    }

    /// Sets the direction of a role. Returns true if it changed.
    pub fn set_direction(&mut self, role: SortRole, direction: SortDirection) -> bool {
        match self.slot_mut(role) {
            Some(key) if key.direction != direction => {
                key.direction = direction;
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// Comparison
// =============================================================================

/// Compares two cutoff texts under a direction.
///
/// Present values compare numerically; a missing or unparseable value
/// sorts after a present one in either direction; two missing values are
/// equal.
#[must_use]
pub fn compare_cutoffs(a: Option<&str>, b: Option<&str>, direction: SortDirection) -> Ordering {
    match (a.and_then(parse_cutoff), b.and_then(parse_cutoff)) {
        // parse_cutoff only yields finite values
        (Some(x), Some(y)) => direction.apply(x.partial_cmp(&y).unwrap_or(Ordering::Equal)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compares two records by the sort keys in precedence order.
#[must_use]
pub fn compare_records(a: &Record, b: &Record, spec: &SortSpec) -> Ordering {
    for key in spec.keys() {
        let ordering = compare_cutoffs(
            a.cutoff(key.category),
            b.cutoff(key.category),
            key.direction,
        );
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Orders records by the spec. Records that compare equal keep their
/// input order.
#[must_use]
pub fn sort(mut records: Vec<Arc<Record>>, spec: &SortSpec) -> Vec<Arc<Record>> {
    if spec.keys().next().is_some() {
        // `sort_by` is stable
        records.sort_by(|a, b| compare_records(a, b, spec));
    }
    records
}
