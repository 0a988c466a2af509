//! Trace output formatters.
//!
//! Provides human-readable and JSON formatters for trace records.

use std::fmt::Write;

use cutoffs_engine::ViewAction;

use super::record::{TraceEvent, TraceRecord};

// =============================================================================
// Trace Formatter Trait
// =============================================================================

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats a single trace record to a string.
    fn format(&self, record: &TraceRecord) -> String;

    /// Formats multiple records.
    fn format_many(&self, records: &[&TraceRecord]) -> String {
        records
            .iter()
            .map(|r| self.format(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats trace records in human-readable form.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to include timestamps.
    pub show_timestamps: bool,
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }

    /// Formats timestamp in microseconds.
    #[allow(clippy::cast_precision_loss)]
    fn format_timestamp(ns: u64) -> String {
        let us = ns / 1000;
        if us >= 1_000_000 {
            format!("{:.3}s", us as f64 / 1_000_000.0)
        } else if us >= 1000 {
            format!("{:.3}ms", us as f64 / 1000.0)
        } else {
            format!("{us}us")
        }
    }

    fn describe_action(action: &ViewAction) -> String {
        match action {
            ViewAction::ToggleFilter { field, value } => format!("toggle {field} = {value:?}"),
            ViewAction::Select { field, value } => format!("select {field} = {value:?}"),
            ViewAction::Deselect { field, value } => format!("deselect {field} = {value:?}"),
            ViewAction::ClearFilter { field } => format!("clear {field}"),
            ViewAction::ClearAllFilters => "clear all filters".to_string(),
            ViewAction::Search { field, text } => format!("search {field} for {text:?}"),
            ViewAction::AssignSort { role, category } => match category {
                Some(category) => format!("sort {role} by {category}"),
                None => format!("sort {role} off"),
            },
            ViewAction::ToggleDirection { category } => format!("flip {category}"),
            ViewAction::SetDirection { role, direction } => format!("{role} {direction}"),
            ViewAction::SetPageSize { page_size } => format!("{page_size} rows per page"),
            ViewAction::GoToPage { page } => format!("go to page {page}"),
            ViewAction::NextPage => "next page".to_string(),
            ViewAction::PreviousPage => "previous page".to_string(),
        }
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let mut prefix = format!("R{:04} ", record.revision);

        if self.show_timestamps {
            let _ = write!(
                prefix,
                "{:>10} ",
                Self::format_timestamp(record.timestamp_ns)
            );
        }

        let event_str = match &record.event {
            TraceEvent::DatasetLoaded {
                source,
                records,
                categories,
            } => {
                let codes: Vec<_> = categories.iter().map(|c| c.code()).collect();
                format!("LOADED {source}: {records} records [{}]", codes.join(" "))
            }
            TraceEvent::ColumnIgnored { source, column } => {
                format!("  IGNORED {source}: unknown column {column:?}")
            }
            TraceEvent::ViewAction { action, changed } => {
                let note = if *changed { "" } else { " (no change)" };
                format!("ACTION {}{note}", Self::describe_action(action))
            }
            TraceEvent::StageComplete { stage, rows } => {
                format!("  {stage:<9} -> {rows}")
            }
            TraceEvent::SortRoleCleared { role, key } => {
                format!("  CLEARED {role} sort ({key})")
            }
            TraceEvent::PageReset { from } => {
                format!("  PAGE {from} -> 1")
            }
            TraceEvent::PageClamped { requested, shown } => match shown {
                Some(shown) => format!("  PAGE {requested} clamped to {shown}"),
                None => format!("  PAGE {requested} unavailable (no rows)"),
            },
        };

        format!("{prefix}{event_str}")
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

/// Formats trace records as JSON, one object per line.
#[derive(Clone, Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TraceFormatter for JsonFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        serde_json::to_string(record).unwrap_or_else(|e| {
            format!(
                "{{\"id\":{},\"error\":{:?}}}",
                record.id,
                e.to_string()
            )
        })
    }
}
