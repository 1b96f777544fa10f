//! Recurring theme/trigger frequency tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One ranked row of a frequency table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub name: String,
    /// Number of entries mentioning the item.
    pub count: usize,
    /// Percentage of entries mentioning the item, 0-100.
    pub pct: f64,
}

/// Count item occurrences across per-entry lists, convert to percentages
/// of the entry count, rank descending (count, then name ascending for
/// determinism), and truncate to `top_n`.
///
/// Duplicate mentions within one entry count once: the table answers
/// "how many entries touched this theme", not "how many times".
pub fn frequency_table(entry_lists: &[Vec<String>], top_n: usize) -> Vec<FrequencyEntry> {
    let total = entry_lists.len();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for list in entry_lists {
        let mut seen: Vec<&str> = Vec::with_capacity(list.len());
        for item in list {
            if !seen.contains(&item.as_str()) {
                seen.push(item);
                *counts.entry(item).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(top_n);
    ranked
        .into_iter()
        .map(|(name, count)| FrequencyEntry {
            name: name.to_string(),
            count,
            pct: 100.0 * count as f64 / total as f64,
        })
        .collect()
}
