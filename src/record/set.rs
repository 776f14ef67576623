use super::{Record, RecordIndex};

/// Ordered, immutable collection of records for one clustering run
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a record by its input position
    pub fn get(&self, index: RecordIndex) -> Option<&Record> {
        self.records.get(index)
    }

    /// Iterate records in input order
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    /// Identifier of every record, falling back to its position when the
    /// record carries no id of its own
    pub fn ids(&self) -> Vec<String> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| r.id.clone().unwrap_or_else(|| i.to_string()))
            .collect()
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
