//! Integration tests for the two-key sort

use std::cmp::Ordering;

use cutoffs_engine::sort::sort;
use cutoffs_engine::{SortDirection, SortKey, SortRole, SortSpec, compare_cutoffs};
use cutoffs_foundation::{Category, Record};
use cutoffs_storage::RecordStore;
use proptest::prelude::*;

use crate::{grid_store, small_store};

fn ordered(store: &RecordStore, spec: &SortSpec) -> Vec<String> {
    sort(store.iter().cloned().collect(), spec)
        .iter()
        .map(|r| r.college_code().to_string())
        .collect()
}

#[test]
fn missing_values_sort_last_descending() {
    let spec = SortSpec::new().with_primary(SortKey::desc(Category::Oc));
    assert_eq!(ordered(&small_store(), &spec), vec!["A", "C", "B"]);
}

#[test]
fn missing_values_sort_last_ascending() {
    let spec = SortSpec::new().with_primary(SortKey::asc(Category::Oc));
    assert_eq!(ordered(&small_store(), &spec), vec!["C", "A", "B"]);
}

#[test]
fn secondary_breaks_ties() {
    let store = RecordStore::from_records(vec![
        Record::new("1", "CS")
            .with_cutoff(Category::Oc, "190")
            .with_cutoff(Category::Bc, "170"),
        Record::new("2", "CS")
            .with_cutoff(Category::Oc, "190.0")
            .with_cutoff(Category::Bc, "185"),
        Record::new("3", "CS").with_cutoff(Category::Oc, "195"),
    ])
    .unwrap();
    let spec = SortSpec::new()
        .with_primary(SortKey::desc(Category::Oc))
        .with_secondary(SortKey::desc(Category::Bc));
    assert_eq!(ordered(&store, &spec), vec!["3", "2", "1"]);
}

#[test]
fn unparseable_text_counts_as_missing() {
    assert_eq!(
        compare_cutoffs(Some("n/a"), Some("10"), SortDirection::Descending),
        Ordering::Greater
    );
    assert_eq!(
        compare_cutoffs(Some("n/a"), None, SortDirection::Ascending),
        Ordering::Equal
    );
}

#[test]
fn empty_spec_keeps_input_order() {
    assert_eq!(ordered(&small_store(), &SortSpec::new()), vec!["A", "B", "C"]);
}

#[test]
fn assigning_a_held_category_moves_it() {
    let mut spec = SortSpec::new()
        .with_primary(SortKey::desc(Category::Oc))
        .with_secondary(SortKey::asc(Category::Bc));
    let change = spec.assign(SortRole::Primary, Some(Category::Bc));
    assert_eq!(change.cleared, Some(SortKey::asc(Category::Bc)));
    assert_eq!(spec.primary().map(|k| k.category), Some(Category::Bc));
    assert_eq!(spec.secondary(), None);
}

proptest! {
    #[test]
    fn sort_is_stable_and_ordered(count in 0usize..120, ascending in any::<bool>()) {
        let store = grid_store(count);
        let key = if ascending { SortKey::asc(Category::Oc) } else { SortKey::desc(Category::Oc) };
        let spec = SortSpec::new().with_primary(key);
        let sorted = sort(store.iter().cloned().collect(), &spec);
        prop_assert_eq!(sorted.len(), count);

        let position = |r: &Record| (0..store.len())
            .find(|&i| store.get(i).is_some_and(|s| s.key() == r.key()));
        for pair in sorted.windows(2) {
            let ordering = compare_cutoffs(
                pair[0].cutoff(Category::Oc),
                pair[1].cutoff(Category::Oc),
                key.direction,
            );
            prop_assert_ne!(ordering, Ordering::Greater);
            if ordering == Ordering::Equal {
                prop_assert!(position(&pair[0]) < position(&pair[1]));
            }
        }
    }
}
