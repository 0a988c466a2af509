//! Tracing system for the cutoff view.
//!
//! Records what the user did and what each recomputation produced, with
//! zero overhead when disabled. Supports both human-readable and JSON
//! output formats.
//!
//! # Example
//!
//! ```text
//! cutoffs> trace on                # Enable tracing
//! cutoffs> filter branch-code CS   # Events are printed as they happen
//! cutoffs> trace last 5            # Show recent trace records
//! cutoffs> trace rev 3 5           # Show records from revisions 3 to 5
//! cutoffs> trace only page-reset   # Keep only page resets
//! cutoffs> trace off               # Disable tracing
//! ```

pub mod buffer;
pub mod format;
pub mod record;

pub use buffer::{TraceBuffer, TraceBufferStats};
pub use format::{HumanFormatter, JsonFormatter, TraceFormatter};
pub use record::{Stage, TraceEvent, TraceRecord};

use std::io::{self, Write};
use std::time::Instant;

use cutoffs_engine::{Outcome, Snapshot, SortKey, SortRole, ViewAction};
use cutoffs_foundation::Category;

// =============================================================================
// Trace Output
// =============================================================================

/// Where trace output should be sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceOutput {
    /// No output (traces still recorded in buffer).
    #[default]
    None,
    /// Write to stderr.
    Stderr,
}

// =============================================================================
// Tracer Configuration
// =============================================================================

/// Records kept by a tracer unless configured otherwise.
pub const DEFAULT_BUFFER_SIZE: usize = 10_000;

/// Configuration for the tracer.
#[derive(Clone, Debug)]
pub struct TracerConfig {
    /// Whether tracing is enabled.
    pub enabled: bool,
    /// Maximum records to keep in buffer.
    pub buffer_size: usize,
    /// Where to output traces.
    pub output: TraceOutput,
    /// Whether to use JSON format.
    pub json_format: bool,
    /// Filter for specific event types (empty = all).
    pub event_filter: Vec<String>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
            output: TraceOutput::None,
            json_format: false,
            event_filter: Vec::new(),
        }
    }
}

impl TracerConfig {
    /// Creates a new tracer configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to enable tracing.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Builder method to set buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to output to stderr.
    #[must_use]
    pub fn to_stderr(mut self) -> Self {
        self.output = TraceOutput::Stderr;
        self
    }

    /// Builder method to use JSON format.
    #[must_use]
    pub fn json(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Builder method to filter event types.
    #[must_use]
    pub fn filter_events(mut self, types: Vec<String>) -> Self {
        self.event_filter = types;
        self
    }
}

// =============================================================================
// Tracer
// =============================================================================

/// Records view events into a bounded buffer.
///
/// The `record` method returns immediately if tracing is off.
#[derive(Debug)]
pub struct Tracer {
    config: TracerConfig,
    buffer: TraceBuffer,
    current_revision: u64,
    start_time: Instant,
    human_formatter: HumanFormatter,
    json_formatter: JsonFormatter,
}

impl Tracer {
    /// Creates a new tracer with the given configuration.
    #[must_use]
    pub fn new(config: TracerConfig) -> Self {
        let buffer_size = config.buffer_size;
        Self {
            config,
            buffer: TraceBuffer::new(buffer_size),
            current_revision: 0,
            start_time: Instant::now(),
            human_formatter: HumanFormatter::new().with_timestamps(),
            json_formatter: JsonFormatter::new(),
        }
    }

    /// Creates a tracer with default configuration (disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(TracerConfig::default())
    }

    /// Returns whether tracing is enabled.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Enables tracing.
    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    /// Disables tracing.
    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    /// Sets the current snapshot revision.
    pub fn set_revision(&mut self, revision: u64) {
        self.current_revision = revision;
    }

    /// Returns the current snapshot revision.
    #[must_use]
    pub fn current_revision(&self) -> u64 {
        self.current_revision
    }

    /// Returns whether JSON output is selected.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.config.json_format
    }

    /// Sets whether to use JSON output format.
    pub fn set_json_format(&mut self, json: bool) {
        self.config.json_format = json;
    }

    /// Sets the trace output destination.
    pub fn set_output(&mut self, output: TraceOutput) {
        self.config.output = output;
    }

    /// Restricts recording to the given event types (empty = all).
    pub fn set_event_filter(&mut self, types: Vec<String>) {
        self.config.event_filter = types;
    }

    /// Returns the recorded event types (empty = all).
    #[must_use]
    pub fn event_filter(&self) -> &[String] {
        &self.config.event_filter
    }

    /// Records a trace event.
    #[inline]
    pub fn record(&mut self, event: TraceEvent) {
        if !self.config.enabled {
            return;
        }

        self.record_internal(event);
    }

    fn record_internal(&mut self, event: TraceEvent) {
        if !self.config.event_filter.is_empty()
            && !self
                .config
                .event_filter
                .iter()
                .any(|t| t == event.event_type())
        {
            return;
        }

        #[allow(clippy::cast_possible_truncation)]
        let timestamp_ns = self.start_time.elapsed().as_nanos() as u64;
        self.buffer.push(self.current_revision, timestamp_ns, event);

        if self.config.output == TraceOutput::Stderr {
            if let Some(record) = self.buffer.last() {
                let line = self.format_record(record);
                let _ = writeln!(io::stderr(), "{line}");
            }
        }
    }

    /// Formats a record using the current format settings.
    #[must_use]
    pub fn format_record(&self, record: &TraceRecord) -> String {
        if self.config.json_format {
            self.json_formatter.format(record)
        } else {
            self.human_formatter.format(record)
        }
    }

    /// Formats multiple records.
    #[must_use]
    pub fn format_records(&self, records: &[&TraceRecord]) -> String {
        if self.config.json_format {
            self.json_formatter.format_many(records)
        } else {
            self.human_formatter.format_many(records)
        }
    }

    /// Returns the trace buffer.
    #[must_use]
    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Clears the trace buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Returns buffer statistics.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        self.buffer.stats()
    }

    // -------------------------------------------------------------------------
    // Convenience methods for common events
    // -------------------------------------------------------------------------

    /// Records a dataset load.
    #[inline]
    pub fn dataset_loaded(&mut self, source: &str, records: usize, categories: Vec<Category>) {
        self.record(TraceEvent::DatasetLoaded {
            source: source.to_string(),
            records,
            categories,
        });
    }

    /// Records an ignored input column.
    #[inline]
    pub fn column_ignored(&mut self, source: &str, column: &str) {
        self.record(TraceEvent::ColumnIgnored {
            source: source.to_string(),
            column: column.to_string(),
        });
    }

    /// Records a sort role cleared by an assignment.
    #[inline]
    pub fn sort_role_cleared(&mut self, role: SortRole, key: SortKey) {
        self.record(TraceEvent::SortRoleCleared { role, key });
    }

    /// Records everything an applied action did.
    ///
    /// `previous_page` is the page shown before the action.
    pub fn view_applied(
        &mut self,
        action: &ViewAction,
        outcome: &Outcome,
        snapshot: &Snapshot,
        previous_page: usize,
    ) {
        if !self.config.enabled {
            return;
        }

        self.set_revision(outcome.revision);
        self.record(TraceEvent::ViewAction {
            action: action.clone(),
            changed: outcome.changed,
        });
        if let Some((role, key)) = outcome.sort_cleared {
            self.sort_role_cleared(role, key);
        }
        self.snapshot_computed(snapshot);
        if outcome.page_reset {
            self.record(TraceEvent::PageReset {
                from: previous_page,
            });
        }
        if outcome.clamped() {
            self.record(TraceEvent::PageClamped {
                requested: outcome.requested_page,
                shown: outcome.current_page,
            });
        }
    }

    /// Records the stage sizes of a freshly computed snapshot.
    pub fn snapshot_computed(&mut self, snapshot: &Snapshot) {
        if !self.config.enabled {
            return;
        }

        self.set_revision(snapshot.revision);
        let candidates = cutoffs_foundation::FilterField::ALL
            .into_iter()
            .map(|field| snapshot.available.get(field).len())
            .sum();
        for (stage, rows) in [
            (Stage::Filter, snapshot.matched),
            (Stage::Sort, snapshot.matched),
            (Stage::Paginate, snapshot.rows.len()),
            (Stage::Available, candidates),
        ] {
            self.record(TraceEvent::StageComplete { stage, rows });
        }
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}
