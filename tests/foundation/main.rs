//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Record, field enumerations, and Error.

mod errors;
mod fields;
mod records;
