//! Integration tests for the view orchestrator
//!
//! Drives a view through action sequences and checks the snapshot after
//! each one.

use cutoffs_engine::{PageSize, SortKey, SortRole, View, ViewAction, ViewConfig};
use cutoffs_foundation::{Category, FilterField};

use crate::{grid_store, small_store};

fn codes(view: &View) -> Vec<&str> {
    view.snapshot().rows.iter().map(|r| r.college_code()).collect()
}

#[test]
fn default_view_orders_by_oc_descending() {
    let view = View::new(small_store());
    assert_eq!(codes(&view), vec!["A", "C", "B"]);
    assert_eq!(view.snapshot().page_range.len(), 1);
}

#[test]
fn contradictory_filters_empty_the_table() {
    let mut view = View::new(small_store());
    view.toggle_filter(FilterField::CollegeCode, "A");
    view.toggle_filter(FilterField::BranchCode, "EC");

    let snap = view.snapshot();
    assert!(snap.rows.is_empty());
    assert_eq!(snap.current_page, None);
    assert_eq!(snap.available.get(FilterField::CollegeCode), ["B"]);

    // dropping the branch selection restores A
    view.toggle_filter(FilterField::BranchCode, "EC");
    assert_eq!(codes(&view), vec!["A"]);
}

#[test]
fn action_sequence_keeps_page_valid() {
    let config = ViewConfig::new().with_page_size(PageSize::Ten);
    let mut view = View::with_config(grid_store(95), &config);
    let actions = [
        ViewAction::GoToPage { page: 10 },
        ViewAction::NextPage,
        ViewAction::ToggleFilter {
            field: FilterField::BranchCode,
            value: "EC".into(),
        },
        ViewAction::GoToPage { page: 4 },
        ViewAction::SetPageSize {
            page_size: PageSize::Fifty,
        },
        ViewAction::PreviousPage,
        ViewAction::ClearAllFilters,
        ViewAction::GoToPage { page: 2 },
    ];
    let mut pages = Vec::new();
    for action in &actions {
        let outcome = view.apply(action);
        let snap = view.snapshot();
        if let Some(page) = snap.current_page {
            assert!(snap.page_range.contains(page));
        }
        assert_eq!(outcome.current_page, snap.current_page);
        pages.push(snap.current_page);
    }
    assert_eq!(
        pages,
        vec![
            Some(10),
            Some(10),
            Some(1),
            Some(4),
            Some(1),
            Some(1),
            Some(1),
            Some(2)
        ]
    );
}

#[test]
fn sort_roles_never_share_a_category() {
    let mut view = View::new(grid_store(30));
    view.assign_sort(SortRole::Secondary, Some(Category::Oc));
    let sort = view.snapshot().sort;
    assert_eq!(sort.primary(), None);
    assert_eq!(sort.secondary(), Some(SortKey::desc(Category::Oc)));

    view.assign_sort(SortRole::Primary, Some(Category::Oc));
    let sort = view.snapshot().sort;
    assert_eq!(sort.primary(), Some(SortKey::desc(Category::Oc)));
    assert_eq!(sort.secondary(), None);
}

#[test]
fn cloned_store_serves_independent_views() {
    let store = grid_store(30);
    let mut first = View::new(store.clone());
    let second = View::new(store);
    first.toggle_filter(FilterField::BranchCode, "CS");
    assert_eq!(first.snapshot().matched, 10);
    assert_eq!(second.snapshot().matched, 30);
}
