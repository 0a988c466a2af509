//! Cutoff records.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::field::{Category, Column};

/// The identity of a record: its (college code, branch code) pair.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecordKey {
    /// College code.
    pub college_code: String,
    /// Branch code.
    pub branch_code: String,
}

impl RecordKey {
    /// Creates a new key.
    #[must_use]
    pub fn new(college_code: impl Into<String>, branch_code: impl Into<String>) -> Self {
        Self {
            college_code: college_code.into(),
            branch_code: branch_code.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.college_code, self.branch_code)
    }
}

/// One college/branch cutoff entry.
///
/// Every value is kept as the text it was loaded with. Cutoffs are only
/// interpreted as numbers when compared, see [`parse_cutoff`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record {
    key: RecordKey,
    college_name: Option<String>,
    branch_name: Option<String>,
    cutoffs: BTreeMap<Category, String>,
}

impl Record {
    /// Creates a record with only its identity fields.
    #[must_use]
    pub fn new(college_code: impl Into<String>, branch_code: impl Into<String>) -> Self {
        Self {
            key: RecordKey::new(college_code, branch_code),
            college_name: None,
            branch_name: None,
            cutoffs: BTreeMap::new(),
        }
    }

    /// Builder method to set the college name.
    #[must_use]
    pub fn with_college_name(mut self, name: impl Into<String>) -> Self {
        self.college_name = Some(name.into());
        self
    }

    /// Builder method to set the branch name.
    #[must_use]
    pub fn with_branch_name(mut self, name: impl Into<String>) -> Self {
        self.branch_name = Some(name.into());
        self
    }

    /// Builder method to record a cutoff for a category.
    #[must_use]
    pub fn with_cutoff(mut self, category: Category, value: impl Into<String>) -> Self {
        self.cutoffs.insert(category, value.into());
        self
    }

    /// Returns the record key.
    #[must_use]
    pub fn key(&self) -> &RecordKey {
        &self.key
    }

    /// Returns the college code.
    #[must_use]
    pub fn college_code(&self) -> &str {
        &self.key.college_code
    }

    /// Returns the branch code.
    #[must_use]
    pub fn branch_code(&self) -> &str {
        &self.key.branch_code
    }

    /// Returns the college name, if recorded.
    #[must_use]
    pub fn college_name(&self) -> Option<&str> {
        self.college_name.as_deref()
    }

    /// Returns the branch name, if recorded.
    #[must_use]
    pub fn branch_name(&self) -> Option<&str> {
        self.branch_name.as_deref()
    }

    /// Returns the raw cutoff text for a category.
    #[must_use]
    pub fn cutoff(&self, category: Category) -> Option<&str> {
        self.cutoffs.get(&category).map(String::as_str)
    }

    /// Returns the cutoff for a category as a number.
    ///
    /// `None` when the category is absent or its text is not a finite
    /// decimal number.
    #[must_use]
    pub fn cutoff_value(&self, category: Category) -> Option<f64> {
        self.cutoff(category).and_then(parse_cutoff)
    }

    /// Returns the categories this record has a value for.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.cutoffs.keys().copied()
    }

    /// Returns the text stored under any column.
    #[must_use]
    pub fn get(&self, column: Column) -> Option<&str> {
        match column {
            Column::CollegeCode => Some(self.college_code()),
            Column::BranchCode => Some(self.branch_code()),
            Column::CollegeName => self.college_name(),
            Column::BranchName => self.branch_name(),
            Column::Cutoff(category) => self.cutoff(category),
        }
    }
}

/// Parses cutoff text as a decimal number.
///
/// Surrounding whitespace is ignored. Empty text, non-numeric text and
/// non-finite results (`inf`, `NaN`) are all unparseable.
#[must_use]
pub fn parse_cutoff(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::new("1", "CS")
            .with_college_name("University Departments of Anna University")
            .with_branch_name("Computer Science and Engineering")
            .with_cutoff(Category::Oc, "199.5")
            .with_cutoff(Category::St, "n/a")
    }

    #[test]
    fn identity_columns_always_present() {
        let r = Record::new("1", "CS");
        assert_eq!(r.get(Column::CollegeCode), Some("1"));
        assert_eq!(r.get(Column::BranchCode), Some("CS"));
        assert_eq!(r.get(Column::CollegeName), None);
    }

    #[test]
    fn cutoff_text_and_value() {
        let r = sample();
        assert_eq!(r.cutoff(Category::Oc), Some("199.5"));
        assert_eq!(r.cutoff_value(Category::Oc), Some(199.5));
        assert_eq!(r.get(Column::Cutoff(Category::Oc)), Some("199.5"));
    }

    #[test]
    fn unparseable_cutoff_has_text_but_no_value() {
        let r = sample();
        assert_eq!(r.cutoff(Category::St), Some("n/a"));
        assert_eq!(r.cutoff_value(Category::St), None);
        assert_eq!(r.cutoff_value(Category::Bc), None);
    }

    #[test]
    fn parse_cutoff_rules() {
        assert_eq!(parse_cutoff("180"), Some(180.0));
        assert_eq!(parse_cutoff(" 77.25 "), Some(77.25));
        assert_eq!(parse_cutoff("-1"), Some(-1.0));
        assert_eq!(parse_cutoff(""), None);
        assert_eq!(parse_cutoff("   "), None);
        assert_eq!(parse_cutoff("abc"), None);
        assert_eq!(parse_cutoff("inf"), None);
        assert_eq!(parse_cutoff("NaN"), None);
    }

    #[test]
    fn categories_are_listed_in_order() {
        let r = sample();
        let cats: Vec<_> = r.categories().collect();
        assert_eq!(cats, vec![Category::Oc, Category::St]);
    }

    #[test]
    fn key_display() {
        assert_eq!(sample().key().to_string(), "1/CS");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn finite_numbers_parse_back(value in -1.0e6f64..1.0e6) {
            let text = value.to_string();
            prop_assert_eq!(parse_cutoff(&text), Some(value));
        }

        #[test]
        fn alphabetic_text_never_parses(text in "[a-mo-zA-MO-Z]{1,8}") {
            // `n` excluded so "nan" and "inf"-like words cannot appear by accident
            prop_assume!(!text.eq_ignore_ascii_case("e"));
            prop_assert_eq!(parse_cutoff(&text), None);
        }
    }
}
