//! Ring buffer for trace records.
//!
//! Provides a fixed-size buffer that stores the most recent trace records
//! and answers queries by snapshot revision.

use std::collections::{BTreeSet, HashMap, VecDeque};

use super::record::{TraceEvent, TraceRecord};

// =============================================================================
// Trace Buffer
// =============================================================================

/// A ring buffer for storing trace records.
///
/// Maintains a fixed maximum size, discarding oldest records when full.
#[derive(Clone, Debug)]
pub struct TraceBuffer {
    /// The records, oldest first.
    records: VecDeque<TraceRecord>,
    /// Maximum number of records to store.
    max_size: usize,
    /// Next record ID to assign.
    next_id: u64,
}

impl TraceBuffer {
    /// Creates a new trace buffer with the given maximum size.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(max_size.min(1024)),
            max_size,
            next_id: 0,
        }
    }

    /// Pushes a new event to the buffer.
    ///
    /// Returns the assigned record ID.
    pub fn push(&mut self, revision: u64, timestamp_ns: u64, event: TraceEvent) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.records
            .push_back(TraceRecord::new(id, revision, timestamp_ns, event));
        while self.records.len() > self.max_size {
            self.records.pop_front();
        }

        id
    }

    /// Returns the number of records in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clears all records from the buffer.
    ///
    /// Record IDs keep increasing across clears.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Returns an iterator over all records.
    pub fn iter(&self) -> impl Iterator<Item = &TraceRecord> {
        self.records.iter()
    }

    /// Returns the most recently pushed record.
    #[must_use]
    pub fn last(&self) -> Option<&TraceRecord> {
        self.records.back()
    }

    /// Returns records for a specific revision.
    #[must_use]
    pub fn records_for_revision(&self, revision: u64) -> Vec<&TraceRecord> {
        self.filter(|r| r.revision == revision)
    }

    /// Returns records in a revision range (inclusive).
    #[must_use]
    pub fn records_in_range(&self, start: u64, end: u64) -> Vec<&TraceRecord> {
        self.filter(|r| (start..=end).contains(&r.revision))
    }

    /// Returns the most recent N records.
    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<&TraceRecord> {
        let start = self.records.len().saturating_sub(count);
        self.records.iter().skip(start).collect()
    }

    /// Returns records matching a predicate.
    pub fn filter<F>(&self, predicate: F) -> Vec<&TraceRecord>
    where
        F: Fn(&TraceRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Returns records of a specific event type.
    #[must_use]
    pub fn by_event_type(&self, event_type: &str) -> Vec<&TraceRecord> {
        self.filter(|r| r.event_type() == event_type)
    }

    /// Returns the oldest revision in the buffer.
    #[must_use]
    pub fn oldest_revision(&self) -> Option<u64> {
        self.records.front().map(|r| r.revision)
    }

    /// Returns the newest revision in the buffer.
    #[must_use]
    pub fn newest_revision(&self) -> Option<u64> {
        self.records.back().map(|r| r.revision)
    }

    /// Returns statistics about the buffer.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        let mut event_counts = HashMap::new();
        for record in &self.records {
            *event_counts.entry(record.event_type()).or_insert(0) += 1;
        }
        let revisions: BTreeSet<u64> = self.records.iter().map(|r| r.revision).collect();

        TraceBufferStats {
            record_count: self.records.len(),
            max_size: self.max_size,
            oldest_revision: self.oldest_revision(),
            newest_revision: self.newest_revision(),
            revision_count: revisions.len(),
            event_counts,
        }
    }
}

// =============================================================================
// Buffer Statistics
// =============================================================================

/// Statistics about a trace buffer.
#[derive(Clone, Debug)]
pub struct TraceBufferStats {
    /// Number of records currently in buffer.
    pub record_count: usize,
    /// Maximum buffer size.
    pub max_size: usize,
    /// Oldest revision in buffer.
    pub oldest_revision: Option<u64>,
    /// Newest revision in buffer.
    pub newest_revision: Option<u64>,
    /// Number of distinct revisions.
    pub revision_count: usize,
    /// Count of each event type.
    pub event_counts: HashMap<&'static str, usize>,
}
