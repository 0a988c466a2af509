//! Integration tests for the field enumerations
//!
//! Tests category codes, filter field labels, and column name parsing.

use cutoffs_foundation::{Category, Column, ErrorKind, FilterField};

#[test]
fn categories_in_table_order() {
    let codes: Vec<_> = Category::ALL.iter().map(|c| c.code()).collect();
    assert_eq!(
        codes,
        vec!["OC", "BC", "BCM", "MBC", "MBCDNC", "MBCV", "SC", "SCA", "ST"]
    );
}

#[test]
fn category_parsing_ignores_case() {
    assert_eq!("mbcv".parse::<Category>().unwrap(), Category::Mbcv);
    assert_eq!(" SCA ".parse::<Category>().unwrap(), Category::Sca);
    let err = "GEN".parse::<Category>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownCategory(_)));
}

#[test]
fn filter_fields_map_to_columns() {
    for field in FilterField::ALL {
        assert_eq!(field.column().label(), field.label());
        assert_eq!(FilterField::ALL[field.index()], field);
    }
}

#[test]
fn filter_field_spellings() {
    for text in ["branch-code", "Branch Code", "BRANCH_CODE", " branch  code "] {
        assert_eq!(text.parse::<FilterField>().unwrap(), FilterField::BranchCode);
    }
    assert!("OC".parse::<FilterField>().is_err());
}

#[test]
fn columns_cover_identity_and_categories() {
    let all: Vec<Column> = Column::all().collect();
    assert_eq!(all.len(), 4 + Category::ALL.len());
    assert_eq!(all[..4], Column::IDENTITY);
    assert_eq!("oc".parse::<Column>().unwrap(), Column::Cutoff(Category::Oc));
    assert_eq!(
        "college name".parse::<Column>().unwrap(),
        Column::CollegeName
    );
    assert_eq!(Column::CollegeName.category(), None);
}
