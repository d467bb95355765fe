//! Row selection shared by all loaders.
//!
//! Applied in a fixed order: explicit indices (which bypass everything
//! else), vulnerability label, Top-25 CWE restriction, ordering, then the
//! example count.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use secvul_core::constants::CWE_TOP_25;
use secvul_core::errors::DatasetError;

use crate::sample::Entry;

/// Shuffles are seeded so repeated runs pick the same samples.
const SHUFFLE_SEED: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleOrder {
    #[default]
    AsIs,
    Cwe,
    Random,
    /// Shuffle, then group by CWE keeping the shuffled order within a group.
    RandomCwe,
}

impl FromStr for SampleOrder {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "as_is" | "" => Ok(Self::AsIs),
            "cwe" => Ok(Self::Cwe),
            "random" => Ok(Self::Random),
            "random_cwe" => Ok(Self::RandomCwe),
            _ => Err(DatasetError::InvalidValue {
                column: "sort".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Exact ids to return, in this order. Overrides every other field.
    pub indices: Option<Vec<String>>,
    pub vulnerable: Option<bool>,
    /// Keep only the first N CWEs of the Top 25 list.
    pub top_cwe: Option<usize>,
    pub order: SampleOrder,
    /// Per CWE when `top_cwe` is set, otherwise overall.
    pub n_examples: Option<usize>,
}

impl Selection {
    pub(crate) fn apply<T>(&self, entries: Vec<Entry<T>>) -> Result<Vec<Entry<T>>, DatasetError> {
        if let Some(indices) = &self.indices {
            return pick_indices(entries, indices);
        }

        let mut entries: Vec<Entry<T>> = match self.vulnerable {
            Some(want) => entries.into_iter().filter(|e| e.vulnerable == want).collect(),
            None => entries,
        };

        if let Some(n) = self.top_cwe {
            let top: HashSet<u32> = CWE_TOP_25.iter().take(n).copied().collect();
            entries.retain(|e| e.cwe.is_some_and(|c| top.contains(&c)));
        }

        match self.order {
            SampleOrder::AsIs => {}
            SampleOrder::Cwe => sort_by_cwe(&mut entries),
            SampleOrder::Random => shuffle(&mut entries),
            SampleOrder::RandomCwe => {
                shuffle(&mut entries);
                sort_by_cwe(&mut entries);
            }
        }

        if let Some(n) = self.n_examples {
            if self.top_cwe.is_some() {
                let mut taken: HashMap<Option<u32>, usize> = HashMap::new();
                entries.retain(|e| {
                    let count = taken.entry(e.cwe).or_insert(0);
                    *count += 1;
                    *count <= n
                });
            } else {
                entries.truncate(n);
            }
        }

        tracing::debug!(selected = entries.len(), "selection applied");
        Ok(entries)
    }
}

/// Ids must be unique; a repeated id would make the pick ambiguous.
fn pick_indices<T>(entries: Vec<Entry<T>>, indices: &[String]) -> Result<Vec<Entry<T>>, DatasetError> {
    let mut by_id: HashMap<String, Entry<T>> = HashMap::with_capacity(entries.len());
    for entry in entries {
        if by_id.contains_key(&entry.id) {
            return Err(DatasetError::DuplicateId { id: entry.id });
        }
        by_id.insert(entry.id.clone(), entry);
    }
    indices
        .iter()
        .map(|id| {
            by_id.remove(id).ok_or_else(|| DatasetError::UnknownIndex { index: id.clone() })
        })
        .collect()
}

/// Stable; unknown CWEs sort last.
fn sort_by_cwe<T>(entries: &mut [Entry<T>]) {
    entries.sort_by_key(|e| e.cwe.unwrap_or(u32::MAX));
}

fn shuffle<T>(entries: &mut [Entry<T>]) {
    entries.shuffle(&mut StdRng::seed_from_u64(SHUFFLE_SEED));
}
