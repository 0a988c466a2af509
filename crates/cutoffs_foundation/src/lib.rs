//! Core types, field enumerations, and errors for the cutoff table.
//!
//! This crate provides:
//! - [`Record`] - One college/branch cutoff entry and its [`RecordKey`]
//! - [`Column`], [`FilterField`], [`Category`] - Closed field enumerations
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod field;
pub mod record;

pub use error::{Error, ErrorContext, ErrorKind};
pub use field::{Category, Column, FilterField};
pub use record::{Record, RecordKey, parse_cutoff};

/// Result type alias using the cutoff [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
