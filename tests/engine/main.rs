//! Integration tests for Layer 2: Engine
//!
//! Tests for filtering, sorting, pagination, and the view that composes them.

mod filtering;
mod paging;
mod sorting;
mod view;

use cutoffs_foundation::{Category, Record};
use cutoffs_storage::RecordStore;

/// Three records: A/CS (OC 180), B/EC (no OC), C/ME (OC 150).
pub fn small_store() -> RecordStore {
    RecordStore::from_records(vec![
        Record::new("A", "CS")
            .with_college_name("Alpha")
            .with_branch_name("Computer Science")
            .with_cutoff(Category::Oc, "180"),
        Record::new("B", "EC")
            .with_college_name("Beta")
            .with_branch_name("Electronics"),
        Record::new("C", "ME")
            .with_college_name("Gamma")
            .with_branch_name("Mechanical")
            .with_cutoff(Category::Oc, "150"),
    ])
    .unwrap()
}

/// `count` records over colleges `0..count/3` and branches CS, EC, ME.
pub fn grid_store(count: usize) -> RecordStore {
    let records = (0..count).map(|i| {
        let branch = ["CS", "EC", "ME"][i % 3];
        Record::new((i / 3).to_string(), branch)
            .with_cutoff(Category::Oc, format!("{}", 100 + i % 17))
            .with_cutoff(Category::Bc, format!("{}", 90 + i % 5))
    });
    RecordStore::from_records(records).unwrap()
}
