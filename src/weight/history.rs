//! Weight history collection
//!
//! An animal's measurements, as kept by the medical record. Entries are
//! stored in insertion order; callers ask for a sorted copy when they need
//! one for a table or a chart.

use serde::{Deserialize, Serialize};

use super::types::{SortOrder, WeightEntry};
use super::units::WeightUnit;

/// Minimum number of entries needed to draw a chart
pub const MIN_CHART_ENTRIES: usize = 2;

/// An ordered collection of weight entries
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct WeightHistory {
    entries: Vec<WeightEntry>,
}

impl WeightHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[WeightEntry] {
        &self.entries
    }

    /// Whether there are enough entries to chart
    pub fn is_chartable(&self) -> bool {
        self.entries.len() >= MIN_CHART_ENTRIES
    }

    /// Add an entry, assigning a fresh id if it has none. Returns the id.
    pub fn add(&mut self, mut entry: WeightEntry) -> String {
        if entry.id.is_empty() {
            entry.id = uuid::Uuid::new_v4().to_string();
        }
        let id = entry.id.clone();
        tracing::debug!(id = %id, weight = entry.weight, unit = %entry.unit, "Added weight entry");
        self.entries.push(entry);
        id
    }

    /// Replace the entry with the same id. Returns false if no entry matched.
    pub fn update(&mut self, entry: WeightEntry) -> bool {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => {
                *existing = entry;
                true
            }
            None => false,
        }
    }

    /// Remove an entry by id
    pub fn remove(&mut self, id: &str) -> Option<WeightEntry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }

    /// Look up an entry by id
    pub fn get(&self, id: &str) -> Option<&WeightEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Most recent measurement
    pub fn latest(&self) -> Option<&WeightEntry> {
        self.entries.iter().max_by_key(|e| e.date)
    }

    /// A copy of the entries sorted by date (stable for equal dates)
    pub fn sorted(&self, order: SortOrder) -> Vec<WeightEntry> {
        let mut sorted = self.entries.clone();
        match order {
            SortOrder::Asc => sorted.sort_by(|a, b| a.date.cmp(&b.date)),
            SortOrder::Desc => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
        }
        sorted
    }

    /// A small history used by demos and benchmarks
    pub fn sample() -> Self {
        let entries = [
            ("w1", 2023, 1, 15, 34.0, WeightUnit::Kg),
            ("w2", 2023, 7, 20, 35.2, WeightUnit::Kg),
            ("w3", 2024, 1, 10, 78.9, WeightUnit::Lb),
        ];

        entries
            .into_iter()
            .filter_map(|(id, y, m, d, weight, unit)| {
                WeightEntry::on_day(y, m, d, weight, unit).map(|e| e.id(id))
            })
            .collect()
    }
}

impl From<Vec<WeightEntry>> for WeightHistory {
    fn from(entries: Vec<WeightEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<WeightEntry> for WeightHistory {
    fn from_iter<I: IntoIterator<Item = WeightEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for WeightHistory {
    type Item = WeightEntry;
    type IntoIter = std::vec::IntoIter<WeightEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
