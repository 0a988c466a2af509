//! Closed field enumerations.
//!
//! Every column the table knows about is a variant here, so an invalid
//! field reference cannot be constructed inside the engine. Text names
//! are only resolved at the edges through [`FromStr`].

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Normalizes a user-supplied field name: case-insensitive, and `-`/`_`
/// treated as spaces.
fn normalize(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Category
// =============================================================================

/// A reservation category whose value is a numeric admission cutoff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Category {
    /// Open competition.
    #[cfg_attr(feature = "serde", serde(rename = "OC"))]
    Oc,
    /// Backward class.
    #[cfg_attr(feature = "serde", serde(rename = "BC"))]
    Bc,
    /// Backward class (Muslim).
    #[cfg_attr(feature = "serde", serde(rename = "BCM"))]
    Bcm,
    /// Most backward class.
    #[cfg_attr(feature = "serde", serde(rename = "MBC"))]
    Mbc,
    /// Most backward class and denotified communities.
    #[cfg_attr(feature = "serde", serde(rename = "MBCDNC"))]
    Mbcdnc,
    /// Most backward class (Vanniyar).
    #[cfg_attr(feature = "serde", serde(rename = "MBCV"))]
    Mbcv,
    /// Scheduled caste.
    #[cfg_attr(feature = "serde", serde(rename = "SC"))]
    Sc,
    /// Scheduled caste (Arunthathiyar).
    #[cfg_attr(feature = "serde", serde(rename = "SCA"))]
    Sca,
    /// Scheduled tribe.
    #[cfg_attr(feature = "serde", serde(rename = "ST"))]
    St,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 9] = [
        Self::Oc,
        Self::Bc,
        Self::Bcm,
        Self::Mbc,
        Self::Mbcdnc,
        Self::Mbcv,
        Self::Sc,
        Self::Sca,
        Self::St,
    ];

    /// Returns the category code as it appears in column headers.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Oc => "OC",
            Self::Bc => "BC",
            Self::Bcm => "BCM",
            Self::Mbc => "MBC",
            Self::Mbcdnc => "MBCDNC",
            Self::Mbcv => "MBCV",
            Self::Sc => "SC",
            Self::Sca => "SCA",
            Self::St => "ST",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::unknown_category(trimmed))
    }
}

// =============================================================================
// Filter Field
// =============================================================================

/// A field the user can restrict by selecting values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FilterField {
    /// Branch code (identity).
    BranchCode,
    /// College code (identity).
    CollegeCode,
    /// College name (descriptive).
    CollegeName,
    /// Branch name (descriptive).
    BranchName,
}

impl FilterField {
    /// All filter fields in the order their controls are laid out.
    pub const ALL: [FilterField; 4] = [
        Self::BranchCode,
        Self::CollegeCode,
        Self::CollegeName,
        Self::BranchName,
    ];

    /// Dense index for per-field storage.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::BranchCode => 0,
            Self::CollegeCode => 1,
            Self::CollegeName => 2,
            Self::BranchName => 3,
        }
    }

    /// Human-readable label; also the dataset key.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.column().label()
    }

    /// The record column this field filters on.
    #[must_use]
    pub const fn column(self) -> Column {
        match self {
            Self::BranchCode => Column::BranchCode,
            Self::CollegeCode => Column::CollegeCode,
            Self::CollegeName => Column::CollegeName,
            Self::BranchName => Column::BranchName,
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|field| normalize(field.label()) == wanted)
            .ok_or_else(|| Error::unknown_field(s.trim()))
    }
}

// =============================================================================
// Column
// =============================================================================

/// Any column of the cutoff table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Column {
    /// College code.
    CollegeCode,
    /// College name.
    CollegeName,
    /// Branch code.
    BranchCode,
    /// Branch name.
    BranchName,
    /// A cutoff category.
    Cutoff(Category),
}

impl Column {
    /// The descriptive and identity columns, in table order.
    pub const IDENTITY: [Column; 4] = [
        Self::CollegeCode,
        Self::CollegeName,
        Self::BranchCode,
        Self::BranchName,
    ];

    /// Returns the column label used as a header and as a dataset key.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CollegeCode => "College Code",
            Self::CollegeName => "College Name",
            Self::BranchCode => "Branch Code",
            Self::BranchName => "Branch Name",
            Self::Cutoff(category) => category.code(),
        }
    }

    /// Returns all columns: identity columns then every category.
    pub fn all() -> impl Iterator<Item = Column> {
        Self::IDENTITY
            .into_iter()
            .chain(Category::ALL.into_iter().map(Self::Cutoff))
    }

    /// Returns the category if this is a cutoff column.
    #[must_use]
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::Cutoff(category) => Some(category),
            _ => None,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::all()
            .find(|column| normalize(column.label()) == wanted)
            .ok_or_else(|| Error::unknown_field(s.trim()))
    }
}
