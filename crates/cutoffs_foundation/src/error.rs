//! Error types for the cutoff table.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! The table engine itself is total; these errors come from the edges
//! (dataset loading, parsing user-supplied field names, shell commands).

use std::fmt;

use thiserror::Error;

use crate::record::RecordKey;

/// The main error type for cutoff table operations.
///
/// Displays as the kind's message followed by the context, if any:
/// `record 0 is missing required field "Branch Code" at b.json (record 0)`.
#[derive(Debug, Error)]
#[error("{kind}{}", context_suffix(.context))]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates a parse error at the given position.
    #[must_use]
    pub fn parse(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::new(ErrorKind::Parse {
            message: message.into(),
            line,
            column,
        })
    }

    /// Creates a missing required field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>, record: usize) -> Self {
        Self::new(ErrorKind::MissingField {
            field: field.into(),
            record,
        })
    }

    /// Creates a duplicate record key error.
    #[must_use]
    pub fn duplicate_record(key: RecordKey) -> Self {
        Self::new(ErrorKind::DuplicateRecord(key))
    }

    /// Creates an unknown filter field error.
    #[must_use]
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownField(name.into()))
    }

    /// Creates an unknown cutoff category error.
    #[must_use]
    pub fn unknown_category(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownCategory(name.into()))
    }

    /// Creates an invalid page size error.
    #[must_use]
    pub fn invalid_page_size(value: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPageSize(value.into()))
    }

    /// Creates an invalid command error.
    #[must_use]
    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCommand(message.into()))
    }
}

#[allow(clippy::ref_option)]
fn context_suffix(context: &Option<ErrorContext>) -> String {
    match context {
        Some(context) if context.source.is_some() => format!(" {context}"),
        _ => String::new(),
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// Dataset text could not be parsed.
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed, 0 if unknown).
        line: usize,
        /// Column number (1-indexed, 0 if unknown).
        column: usize,
    },

    /// A record is missing one of its identity fields.
    #[error("record {record} is missing required field \"{field}\"")]
    MissingField {
        /// The label of the missing field.
        field: String,
        /// Zero-based position of the record in the source.
        record: usize,
    },

    /// Two records share the same (college code, branch code) key.
    #[error("duplicate record: {0}")]
    DuplicateRecord(RecordKey),

    /// A name does not denote one of the filterable fields.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A name does not denote one of the cutoff categories.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// A page size outside the allowed set.
    #[error("invalid page size: {0} (expected 10, 20, 50 or 100)")]
    InvalidPageSize(String),

    /// A shell command could not be understood.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file or command name.
    pub source: Option<String>,
    /// Zero-based record index in the source.
    pub record: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the record index.
    #[must_use]
    pub fn with_record(mut self, record: usize) -> Self {
        self.record = Some(record);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(record) = self.record {
                write!(f, " (record {record})")?;
            }
        }
        Ok(())
    }
}
