//! Integration tests for Layer 1: Storage
//!
//! Tests for the record store: ordering, key lookup, and sharing.

mod records;
