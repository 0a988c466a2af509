//! Tracing for the cutoff table.
//!
//! This crate provides:
//! - [`Tracer`] - Bounded recording of view actions and pipeline stages
//! - [`TraceFormatter`] - Human-readable and JSON rendering of trace records

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod trace;

pub use trace::{
    HumanFormatter, JsonFormatter, Stage, TraceBuffer, TraceBufferStats, TraceEvent,
    TraceFormatter, TraceOutput, TraceRecord, Tracer, TracerConfig,
};
