//! Cutoffs - Filterable, sortable, paginated admission cutoff tables
//!
//! This crate re-exports all layers of the system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: cutoffs_runtime    — Dataset loading, rendering, shell, CLI
//! Layer 3: cutoffs_debug      — Tracing of view actions and recomputation
//! Layer 2: cutoffs_engine     — Filter, sort, paginate, view orchestration
//! Layer 1: cutoffs_storage    — Immutable record store
//! Layer 0: cutoffs_foundation — Core types (Record, Category, FilterField, Error)
//! ```

pub use cutoffs_debug as debug;
pub use cutoffs_engine as engine;
pub use cutoffs_foundation as foundation;
pub use cutoffs_runtime as runtime;
pub use cutoffs_storage as storage;
