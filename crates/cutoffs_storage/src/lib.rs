//! Immutable record storage for the cutoff table.
//!
//! This crate provides:
//! - [`RecordStore`] - The ordered, read-only sequence of loaded records

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod store;

pub use store::RecordStore;
