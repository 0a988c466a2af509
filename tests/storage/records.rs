//! Integration tests for the record store
//!
//! Tests source order, key lookup, duplicate rejection, and cheap clones.

use std::sync::Arc;

use cutoffs_foundation::{Category, ErrorKind, Record, RecordKey};
use cutoffs_storage::RecordStore;
use proptest::prelude::*;

fn store() -> RecordStore {
    RecordStore::from_records(vec![
        Record::new("A", "CS").with_cutoff(Category::Oc, "180"),
        Record::new("B", "EC"),
        Record::new("C", "ME").with_cutoff(Category::St, "120"),
    ])
    .unwrap()
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn positions_follow_source_order() {
    let store = store();
    assert_eq!(store.len(), 3);
    assert_eq!(store.get(0).unwrap().college_code(), "A");
    assert_eq!(store.get(2).unwrap().college_code(), "C");
    assert!(store.get(3).is_none());
}

#[test]
fn find_by_key() {
    let store = store();
    let record = store.find(&RecordKey::new("B", "EC")).unwrap();
    assert_eq!(record.branch_code(), "EC");
    assert!(store.find(&RecordKey::new("B", "CS")).is_none());
}

#[test]
fn categories_present_in_table_order() {
    assert_eq!(store().categories_present(), vec![Category::Oc, Category::St]);
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn duplicate_keys_are_rejected() {
    let err = RecordStore::from_records(vec![
        Record::new("A", "CS"),
        Record::new("A", "EC"),
        Record::new("A", "CS").with_cutoff(Category::Oc, "1"),
    ])
    .unwrap_err();
    match err.kind {
        ErrorKind::DuplicateRecord(key) => assert_eq!(key, RecordKey::new("A", "CS")),
        other => panic!("expected duplicate record, got {other:?}"),
    }
}

#[test]
fn clones_share_records() {
    let store = store();
    let copy = store.clone();
    for (a, b) in store.iter().zip(&copy) {
        assert!(Arc::ptr_eq(a, b));
    }
}

proptest! {
    #[test]
    fn every_record_is_found_by_its_key(count in 0usize..60) {
        let records = (0..count).map(|i| Record::new((i / 3).to_string(), ["CS", "EC", "ME"][i % 3]));
        let store = RecordStore::from_records(records).unwrap();
        prop_assert_eq!(store.len(), count);
        for (i, record) in store.iter().enumerate() {
            let found = store.find(record.key()).unwrap();
            prop_assert!(Arc::ptr_eq(found, store.get(i).unwrap()));
        }
    }
}
