//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use cutoffs_foundation::{Error, ErrorContext, ErrorKind, RecordKey};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_missing_field() {
    let err = Error::missing_field("College Code", 7);
    assert!(matches!(err.kind, ErrorKind::MissingField { record: 7, .. }));
    let msg = format!("{err}");
    assert!(msg.contains("College Code"));
    assert!(msg.contains('7'));
}

#[test]
fn error_duplicate_record() {
    let err = Error::duplicate_record(RecordKey::new("1", "CS"));
    assert!(matches!(err.kind, ErrorKind::DuplicateRecord(_)));
    assert!(format!("{err}").contains("1/CS"));
}

#[test]
fn error_parse_has_position() {
    let err = Error::parse("expected value", 3, 14);
    assert_eq!(format!("{err}"), "parse error at 3:14: expected value");
}

#[test]
fn error_invalid_page_size_lists_choices() {
    let err = Error::invalid_page_size("15");
    let msg = format!("{err}");
    assert!(msg.contains("15"));
    assert!(msg.contains("10, 20, 50 or 100"));
}

#[test]
fn error_unknown_names() {
    assert!(format!("{}", Error::unknown_field("Region")).contains("Region"));
    assert!(format!("{}", Error::unknown_category("XYZ")).contains("XYZ"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_display() {
    let context = ErrorContext::new()
        .with_source("cutoffs.json")
        .with_record(4);
    assert_eq!(format!("{context}"), "at cutoffs.json (record 4)");
}

#[test]
fn context_is_attached() {
    let err = Error::io("permission denied")
        .with_context(ErrorContext::new().with_source("secret.json"));
    let context = err.context.expect("context");
    assert_eq!(context.source.as_deref(), Some("secret.json"));
    assert_eq!(context.record, None);
}
