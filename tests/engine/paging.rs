//! Integration tests for pagination

use cutoffs_engine::{PageSize, paginate};
use proptest::prelude::*;

use crate::grid_store;

#[test]
fn last_page_holds_the_remainder() {
    let store = grid_store(23);
    let records: Vec<_> = store.iter().cloned().collect();

    let first = paginate(&records, PageSize::Ten, 1);
    assert_eq!(first.range.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(first.rows.len(), 10);
    assert!(std::sync::Arc::ptr_eq(&first.rows[0], &records[0]));

    let last = paginate(&records, PageSize::Ten, 3);
    assert_eq!(last.current, Some(3));
    assert_eq!(last.rows.len(), 3);
    assert!(std::sync::Arc::ptr_eq(&last.rows[2], &records[22]));
}

#[test]
fn out_of_range_requests_are_clamped() {
    let records: Vec<_> = grid_store(23).iter().cloned().collect();
    assert_eq!(paginate(&records, PageSize::Twenty, 0).current, Some(1));
    assert_eq!(paginate(&records, PageSize::Twenty, 99).current, Some(2));
}

#[test]
fn empty_input_has_no_pages() {
    let page = paginate(&[], PageSize::Fifty, 1);
    assert!(page.rows.is_empty());
    assert!(page.range.is_empty());
    assert_eq!(page.current, None);
}

#[test]
fn page_size_parsing() {
    assert_eq!("100".parse::<PageSize>().unwrap(), PageSize::Hundred);
    assert!("0".parse::<PageSize>().is_err());
    assert!("twenty".parse::<PageSize>().is_err());
    assert_eq!(PageSize::try_from(50).unwrap(), PageSize::Fifty);
}

proptest! {
    #[test]
    fn pages_partition_the_records(count in 0usize..260, size_index in 0usize..4) {
        let size = PageSize::ALL[size_index];
        let records: Vec<_> = grid_store(count).iter().cloned().collect();
        let range = paginate(&records, size, 1).range;
        prop_assert_eq!(range.len(), count.div_ceil(size.rows()));

        let mut seen = Vec::new();
        for page in range.iter() {
            let slice = paginate(&records, size, page);
            prop_assert_eq!(slice.current, Some(page));
            prop_assert!(!slice.rows.is_empty());
            prop_assert!(slice.rows.len() <= size.rows());
            seen.extend(slice.rows);
        }
        prop_assert_eq!(seen.len(), count);
        for (a, b) in seen.iter().zip(&records) {
            prop_assert!(std::sync::Arc::ptr_eq(a, b));
        }
    }
}
