//! Integration tests for filtering and available values

use cutoffs_engine::filter::filter;
use cutoffs_engine::{SearchTexts, Selections, available_values, locale_cmp};
use cutoffs_foundation::FilterField;
use std::cmp::Ordering;

use crate::small_store;

fn codes(records: &[std::sync::Arc<cutoffs_foundation::Record>]) -> Vec<&str> {
    records.iter().map(|r| r.college_code()).collect()
}

#[test]
fn no_selection_keeps_everything_in_order() {
    let store = small_store();
    let out = filter(&store, &Selections::new());
    assert_eq!(codes(&out), vec!["A", "B", "C"]);
}

#[test]
fn values_within_a_field_are_alternatives() {
    let store = small_store();
    let selections = Selections::new()
        .with(FilterField::BranchCode, "CS")
        .with(FilterField::BranchCode, "ME");
    assert_eq!(codes(&filter(&store, &selections)), vec!["A", "C"]);
}

#[test]
fn fields_combine_with_and() {
    let store = small_store();
    let selections = Selections::new()
        .with(FilterField::BranchCode, "CS")
        .with(FilterField::CollegeName, "Gamma");
    assert!(filter(&store, &selections).is_empty());
}

#[test]
fn contradictory_selection_keeps_own_field_candidates() {
    let store = small_store();
    let selections = Selections::new()
        .with(FilterField::CollegeCode, "A")
        .with(FilterField::BranchCode, "EC");
    assert!(filter(&store, &selections).is_empty());

    let available = available_values(&store, &selections, &SearchTexts::new());
    // College Code is narrowed only by Branch Code = EC
    assert_eq!(available.get(FilterField::CollegeCode), ["B"]);
    // Branch Code is narrowed only by College Code = A
    assert_eq!(available.get(FilterField::BranchCode), ["CS"]);
    // other fields see both selections
    assert!(available.get(FilterField::CollegeName).is_empty());
}

#[test]
fn search_narrows_case_insensitively() {
    let store = small_store();
    let mut searches = SearchTexts::new();
    searches.set(FilterField::BranchName, "EC");
    let available = available_values(&store, &Selections::new(), &searches);
    assert_eq!(
        available.get(FilterField::BranchName),
        ["Electronics", "Mechanical"]
    );
    assert_eq!(available.get(FilterField::BranchCode), ["CS", "EC", "ME"]);
}

#[test]
fn locale_order_folds_case() {
    assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
    assert_eq!(locale_cmp("Zeta", "alpha"), Ordering::Greater);
    assert_ne!(locale_cmp("a", "A"), Ordering::Equal);
}
