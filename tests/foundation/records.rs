//! Integration tests for Record
//!
//! Tests record construction, column access, and cutoff parsing.

use cutoffs_foundation::{Category, Column, Record, RecordKey, parse_cutoff};

fn record() -> Record {
    Record::new("2006", "EC")
        .with_college_name("Alpha College of Engineering")
        .with_branch_name("Electronics and Communication")
        .with_cutoff(Category::Oc, "196.25")
        .with_cutoff(Category::Mbc, "  188 ")
}

#[test]
fn key_combines_identity_fields() {
    let r = record();
    assert_eq!(r.key(), &RecordKey::new("2006", "EC"));
    assert_eq!(r.key().to_string(), "2006/EC");
}

#[test]
fn get_reads_every_column() {
    let r = record();
    assert_eq!(r.get(Column::CollegeCode), Some("2006"));
    assert_eq!(r.get(Column::BranchName), Some("Electronics and Communication"));
    assert_eq!(r.get(Column::Cutoff(Category::Oc)), Some("196.25"));
    assert_eq!(r.get(Column::Cutoff(Category::St)), None);
}

#[test]
fn cutoff_values_parse_on_demand() {
    let r = record();
    assert_eq!(r.cutoff_value(Category::Oc), Some(196.25));
    assert_eq!(r.cutoff_value(Category::Mbc), Some(188.0));
    assert_eq!(r.cutoff_value(Category::Sc), None);
}

#[test]
fn categories_lists_present_values() {
    let present: Vec<_> = record().categories().collect();
    assert_eq!(present, vec![Category::Oc, Category::Mbc]);
}

#[test]
fn parse_cutoff_rules() {
    assert_eq!(parse_cutoff("199.5"), Some(199.5));
    assert_eq!(parse_cutoff(" 77 "), Some(77.0));
    assert_eq!(parse_cutoff(""), None);
    assert_eq!(parse_cutoff("   "), None);
    assert_eq!(parse_cutoff("n/a"), None);
    assert_eq!(parse_cutoff("inf"), None);
    assert_eq!(parse_cutoff("NaN"), None);
}
