//! Dataset loading.
//!
//! A dataset file is a JSON array of objects keyed by column label:
//!
//! ```text
//! [
//!   { "College Code": "E001", "College Name": "Alpha", "Branch Code": "CS",
//!     "Branch Name": "Computer Science", "OC": "199.5", "BC": 197 },
//!   ...
//! ]
//! ```
//!
//! Cutoffs may be strings or numbers. `null` and blank strings mean the
//! value is absent. Keys that are not column labels are ignored and
//! reported back in [`LoadedDataset::ignored_columns`].

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use cutoffs_foundation::{Column, Error, ErrorContext, Record, RecordKey, Result};
use cutoffs_storage::RecordStore;

/// One cell of a dataset row.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Cell {
    Text(String),
    Number(serde_json::Number),
    Empty,
}

impl Cell {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Self::Number(number) => Some(number.to_string()),
            Self::Empty => None,
        }
    }
}

type Row = BTreeMap<String, Cell>;

/// A column name seen in a source that is not part of the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoredColumn {
    /// The source it appeared in.
    pub source: String,
    /// The column name as written.
    pub column: String,
}

/// How many records a source contributed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSummary {
    /// Source name.
    pub name: String,
    /// Records read from it.
    pub records: usize,
}

/// The result of loading one or more sources.
#[derive(Clone, Debug)]
pub struct LoadedDataset {
    /// The records, in source order.
    pub store: RecordStore,
    /// Unknown columns, once per source.
    pub ignored_columns: Vec<IgnoredColumn>,
    /// Per-source record counts, in load order.
    pub sources: Vec<SourceSummary>,
}

/// Accumulates records from several sources into one dataset.
#[derive(Debug, Default)]
pub struct DatasetLoader {
    records: Vec<Record>,
    keys: HashSet<RecordKey>,
    ignored_columns: Vec<IgnoredColumn>,
    sources: Vec<SourceSummary>,
}

impl DatasetLoader {
    /// Creates an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and adds a dataset file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid dataset.
    pub fn add_file(&mut self, path: &Path) -> Result<usize> {
        let source = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::io(e.to_string()).with_context(ErrorContext::new().with_source(&source))
        })?;
        self.add_str(&text, &source)
    }

    /// Adds dataset text under the given source name.
    ///
    /// Returns the number of records read.
    ///
    /// # Errors
    ///
    /// Returns a parse error with line and column for malformed JSON, a
    /// missing field error for rows without a college or branch code, and a
    /// duplicate record error for a key already added from any source.
    pub fn add_str(&mut self, text: &str, source: &str) -> Result<usize> {
        let rows: Vec<Row> = serde_json::from_str(text).map_err(|e| {
            Error::parse(e.to_string(), e.line(), e.column())
                .with_context(ErrorContext::new().with_source(source))
        })?;

        let mut ignored = BTreeSet::new();
        let count = rows.len();
        for (index, row) in rows.into_iter().enumerate() {
            let context = || ErrorContext::new().with_source(source).with_record(index);
            let record = Self::record_from_row(row, index, &mut ignored)
                .map_err(|e| e.with_context(context()))?;
            if !self.keys.insert(record.key().clone()) {
                return Err(Error::duplicate_record(record.key().clone()).with_context(context()));
            }
            self.records.push(record);
        }

        self.ignored_columns
            .extend(ignored.into_iter().map(|column| IgnoredColumn {
                source: source.to_string(),
                column,
            }));
        self.sources.push(SourceSummary {
            name: source.to_string(),
            records: count,
        });
        Ok(count)
    }

    fn record_from_row(row: Row, index: usize, ignored: &mut BTreeSet<String>) -> Result<Record> {
        let mut values: BTreeMap<Column, String> = BTreeMap::new();
        for (key, cell) in row {
            match key.parse::<Column>() {
                Ok(column) => {
                    if let Some(text) = cell.into_text() {
                        values.insert(column, text);
                    }
                }
                Err(_) => {
                    ignored.insert(key);
                }
            }
        }

        let college_code = values
            .remove(&Column::CollegeCode)
            .ok_or_else(|| Error::missing_field(Column::CollegeCode.label(), index))?;
        let branch_code = values
            .remove(&Column::BranchCode)
            .ok_or_else(|| Error::missing_field(Column::BranchCode.label(), index))?;

        let mut record = Record::new(college_code, branch_code);
        for (column, text) in values {
            record = match column {
                Column::CollegeName => record.with_college_name(text),
                Column::BranchName => record.with_branch_name(text),
                Column::Cutoff(category) => record.with_cutoff(category, text),
                Column::CollegeCode | Column::BranchCode => record,
            };
        }
        Ok(record)
    }

    /// Builds the store from everything added so far.
    ///
    /// # Errors
    ///
    /// Returns an error if two records share a (college code, branch code) key.
    pub fn finish(self) -> Result<LoadedDataset> {
        let store = RecordStore::from_records(self.records)?;
        Ok(LoadedDataset {
            store,
            ignored_columns: self.ignored_columns,
            sources: self.sources,
        })
    }
}

/// Loads a single dataset text.
///
/// # Errors
///
/// See [`DatasetLoader::add_str`] and [`DatasetLoader::finish`].
pub fn load_str(text: &str, source: &str) -> Result<LoadedDataset> {
    let mut loader = DatasetLoader::new();
    loader.add_str(text, source)?;
    loader.finish()
}
