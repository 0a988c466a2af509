//! Dataset loading, rendering, and the interactive shell for the cutoff table.
//!
//! This crate provides:
//! - [`DatasetLoader`] - Reads JSON datasets into a record store
//! - [`render`] - Plain-text tables, filter cards and value lists
//! - [`Command`] and [`Session`] - The shell's command language over a view
//! - [`Repl`] - Interactive loop with completion and history

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod editor;
pub mod highlight;
pub mod loader;
pub mod render;
pub mod repl;
pub mod session;

pub use command::{Command, TraceCommand};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use loader::{DatasetLoader, IgnoredColumn, LoadedDataset, SourceSummary, load_str};
pub use repl::Repl;
pub use session::{Reply, Session, help_text};
