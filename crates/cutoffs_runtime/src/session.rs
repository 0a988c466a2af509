//! Session state for the shell.
//!
//! The session owns the view over the loaded dataset, the columns to
//! display, and the tracer. Every view change goes through
//! [`Session::apply`] so that it is traced.

use std::fmt::Write;

use cutoffs_debug::{TraceEvent, TraceOutput, TraceRecord, Tracer};
use cutoffs_engine::{Outcome, Snapshot, View, ViewAction, ViewConfig};
use cutoffs_foundation::{Category, Column, Error, FilterField, Result};

use crate::command::{ARGUMENT_WORDS, COMMAND_WORDS, Command, TraceCommand};
use crate::loader::LoadedDataset;
use crate::render;

/// What the shell should do after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Print this text.
    Output(String),
    /// Leave the shell.
    Quit,
}

/// Session state for an interactive or batch run.
#[derive(Debug)]
pub struct Session {
    /// The view over the dataset.
    view: View,
    /// Columns shown in the table.
    columns: Vec<Column>,
    /// Tracer for observability.
    tracer: Tracer,
}

impl Session {
    /// Creates a session over a loaded dataset.
    ///
    /// Load notes and the initial snapshot are traced.
    #[must_use]
    pub fn new(dataset: LoadedDataset, config: &ViewConfig, tracer: Tracer) -> Self {
        let mut tracer = tracer;
        let categories = dataset.store.categories_present();
        for source in &dataset.sources {
            tracer.dataset_loaded(&source.name, source.records, categories.clone());
        }
        for ignored in &dataset.ignored_columns {
            tracer.column_ignored(&ignored.source, &ignored.column);
        }

        let columns = render::display_columns(&dataset.store);
        let view = View::with_config(dataset.store, config);
        tracer.snapshot_computed(view.snapshot());

        Self {
            view,
            columns,
            tracer,
        }
    }

    /// Creates a session with the default view and a disabled tracer.
    #[must_use]
    pub fn with_dataset(dataset: LoadedDataset) -> Self {
        Self::new(dataset, &ViewConfig::default(), Tracer::disabled())
    }

    /// Returns the view.
    #[must_use]
    pub const fn view(&self) -> &View {
        &self.view
    }

    /// Returns the current snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        self.view.snapshot()
    }

    /// Returns the displayed columns.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the tracer.
    #[must_use]
    pub const fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Returns a mutable reference to the tracer.
    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    /// Applies a view action and traces it.
    pub fn apply(&mut self, action: ViewAction) -> Outcome {
        let previous_page = self.view.state().page;
        let outcome = self.view.apply(&action);
        self.tracer
            .view_applied(&action, &outcome, self.view.snapshot(), previous_page);
        outcome
    }

    /// Words offered for tab completion: commands, field names, categories
    /// and the identity values in the dataset.
    #[must_use]
    pub fn completion_words(&self) -> Vec<String> {
        let mut words: Vec<String> = COMMAND_WORDS
            .iter()
            .chain(ARGUMENT_WORDS.iter())
            .map(|w| (*w).to_string())
            .collect();
        words.extend(
            FilterField::ALL
                .iter()
                .map(|f| f.label().to_lowercase().replace(' ', "-")),
        );
        words.extend(Category::ALL.iter().map(|c| c.code().to_string()));
        words.extend(TraceEvent::TYPES.iter().map(|t| (*t).to_string()));
        for field in [FilterField::CollegeCode, FilterField::BranchCode] {
            words.extend(self.snapshot().available.get(field).iter().cloned());
        }
        words.sort();
        words.dedup();
        words
    }

    /// Renders the current page.
    #[must_use]
    pub fn render(&self) -> String {
        render::render_table(self.snapshot(), &self.columns)
    }

    fn exists(&self, field: FilterField, value: &str) -> bool {
        self.view
            .store()
            .iter()
            .any(|r| r.get(field.column()) == Some(value))
    }

    /// Executes a parsed command.
    ///
    /// # Errors
    ///
    /// Returns an error if a filter names a value no record has.
    pub fn execute(&mut self, command: &Command) -> Result<Reply> {
        let action = match command {
            Command::Show => return Ok(Reply::Output(self.render())),
            Command::Filters => {
                return Ok(Reply::Output(render::render_filters(self.snapshot())));
            }
            Command::Sorts => {
                return Ok(Reply::Output(render::render_sort(&self.snapshot().sort)));
            }
            Command::Values(field) => {
                return Ok(Reply::Output(render::render_values(self.snapshot(), *field)));
            }
            Command::Help => return Ok(Reply::Output(help_text())),
            Command::Quit => return Ok(Reply::Quit),
            Command::Trace(trace) => return Ok(Reply::Output(self.trace(trace))),
            Command::Filter { field, value } => {
                let selected = self.snapshot().selections.is_selected(*field, value);
                if !selected && !self.exists(*field, value) {
                    return Err(Error::invalid_command(format!(
                        "no record has {field} = {value:?}"
                    )));
                }
                ViewAction::ToggleFilter {
                    field: *field,
                    value: value.clone(),
                }
            }
            Command::Unfilter { field, value } => ViewAction::Deselect {
                field: *field,
                value: value.clone(),
            },
            Command::Clear(Some(field)) => ViewAction::ClearFilter { field: *field },
            Command::Clear(None) => ViewAction::ClearAllFilters,
            Command::Search { field, text } => ViewAction::Search {
                field: *field,
                text: text.clone(),
            },
            Command::Sort { role, category } => ViewAction::AssignSort {
                role: *role,
                category: *category,
            },
            Command::Flip(category) => ViewAction::ToggleDirection {
                category: *category,
            },
            Command::Dir { role, direction } => ViewAction::SetDirection {
                role: *role,
                direction: *direction,
            },
            Command::Page(page) => ViewAction::GoToPage { page: *page },
            Command::Next => ViewAction::NextPage,
            Command::Prev => ViewAction::PreviousPage,
            Command::Rows(page_size) => ViewAction::SetPageSize {
                page_size: *page_size,
            },
        };

        let searched = match &action {
            ViewAction::Search { field, .. } => Some(*field),
            _ => None,
        };
        let outcome = self.apply(action);

        let mut out = String::new();
        if let Some((role, key)) = outcome.sort_cleared {
            let _ = writeln!(out, "({role} sort on {} removed)", key.category);
        }
        match searched {
            // searching only narrows a candidate list
            Some(field) => out.push_str(&render::render_values(self.snapshot(), field)),
            None => out.push_str(&self.render()),
        }
        Ok(Reply::Output(out))
    }

    fn trace(&mut self, command: &TraceCommand) -> String {
        match command {
            TraceCommand::On => {
                self.tracer.set_json_format(false);
                self.tracer.set_output(TraceOutput::Stderr);
                self.tracer.enable();
                "Tracing on.".to_string()
            }
            TraceCommand::Json => {
                self.tracer.set_json_format(true);
                self.tracer.set_output(TraceOutput::Stderr);
                self.tracer.enable();
                "Tracing on (JSON).".to_string()
            }
            TraceCommand::Off => {
                self.tracer.disable();
                "Tracing off.".to_string()
            }
            TraceCommand::Last(count) => self.show_records(&self.tracer.buffer().recent(*count)),
            TraceCommand::Revisions { from, to } => {
                let buffer = self.tracer.buffer();
                let records = if from == to {
                    buffer.records_for_revision(*from)
                } else {
                    buffer.records_in_range(*from, *to)
                };
                self.show_records(&records)
            }
            TraceCommand::Only(types) => {
                self.tracer.set_event_filter(types.clone());
                if types.is_empty() {
                    "Recording all events.".to_string()
                } else {
                    format!("Recording only: {}.", types.join(", "))
                }
            }
            TraceCommand::Stats => {
                let stats = self.tracer.stats();
                let mut out = format!("{} of {} records", stats.record_count, stats.max_size);
                if let (Some(oldest), Some(newest)) = (stats.oldest_revision, stats.newest_revision)
                {
                    let _ = write!(
                        out,
                        ", revisions {oldest}..{newest} ({} distinct)",
                        stats.revision_count
                    );
                }
                let only = self.tracer.event_filter();
                if !only.is_empty() {
                    let _ = write!(out, ", recording only {}", only.join(", "));
                }
                let mut counts: Vec<_> = stats.event_counts.into_iter().collect();
                counts.sort_unstable();
                for (event_type, count) in counts {
                    let _ = write!(out, "\n  {event_type:<18} {count}");
                }
                out
            }
            TraceCommand::Clear => {
                self.tracer.clear();
                "Trace buffer cleared.".to_string()
            }
        }
    }

    fn show_records(&self, records: &[&TraceRecord]) -> String {
        if records.is_empty() {
            "No trace records.".to_string()
        } else {
            self.tracer.format_records(records)
        }
    }
}

/// The shell's help text.
#[must_use]
pub fn help_text() -> String {
    "\
Commands:
  show                          Show the current page
  filter FIELD VALUE            Select VALUE (or deselect it if selected)
  unfilter FIELD VALUE          Deselect VALUE
  clear [FIELD]                 Clear one field's selection, or all
  search FIELD [TEXT]           Narrow FIELD's value list (empty TEXT clears)
  values FIELD                  List FIELD's selectable values
  filters                       Show all selections
  sort                          Show the sort roles and secondary choices
  sort primary|secondary CAT    Sort by category CAT (or `none`)
  flip CAT                      Reverse the direction for CAT
  dir primary|secondary asc|desc
  page N | next | prev          Move between pages
  rows 10|20|50|100             Change the page size
  trace on|off|json             Control tracing
  trace last [N] | rev A [B]    Show recent records, or those of revisions A..B
  trace only [EVENT...|all]     Record only some event types
  trace stats | clear           Inspect or empty the trace buffer
  help | quit

Fields: branch-code, college-code, college-name, branch-name
Categories: OC BC BCM MBC MBCDNC MBCV SC SCA ST"
        .to_string()
}
