//! The record store.
//!
//! Records are loaded once and never mutated. The store keeps them in
//! source order inside persistent `im` structures so that cloning a store
//! (for example to hand the same dataset to several views) is O(1).

use std::sync::Arc;

use cutoffs_foundation::{Category, Error, Record, RecordKey, Result};

/// The immutable, ordered sequence of input records.
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    /// Records in source order.
    records: im::Vector<Arc<Record>>,
    /// Key index: record key to position.
    index: im::HashMap<RecordKey, usize>,
}

impl RecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from records in source order.
    ///
    /// # Errors
    ///
    /// Returns an error if two records share the same (college code,
    /// branch code) key.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut store = Self::new();
        for record in records {
            let key = record.key().clone();
            if store.index.contains_key(&key) {
                return Err(Error::duplicate_record(key));
            }
            store.index.insert(key, store.records.len());
            store.records.push_back(Arc::new(record));
        }
        Ok(store)
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Gets a record by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<Record>> {
        self.records.get(index)
    }

    /// Looks a record up by its key.
    #[must_use]
    pub fn find(&self, key: &RecordKey) -> Option<&Arc<Record>> {
        self.index.get(key).and_then(|&i| self.records.get(i))
    }

    /// Returns an iterator over the records in source order.
    pub fn iter(&self) -> im::vector::Iter<'_, Arc<Record>> {
        self.records.iter()
    }

    /// Returns the categories at least one record has a value for, in
    /// category order.
    #[must_use]
    pub fn categories_present(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|&c| self.records.iter().any(|r| r.cutoff(c).is_some()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Arc<Record>;
    type IntoIter = im::vector::Iter<'a, Arc<Record>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
