use std::collections::BTreeMap;

use formats::VolcanoRecord;
use serde::Serialize;

/// Row count per primary volcano type.
///
/// Iteration is sorted by type name so seeded fact picks are reproducible;
/// chart consumers treat it as an unordered set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeDistribution {
    counts: BTreeMap<String, usize>,
}

pub fn aggregate<'a>(rows: impl IntoIterator<Item = &'a VolcanoRecord>) -> TypeDistribution {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for r in rows {
        *counts.entry(r.primary_type.clone()).or_insert(0) += 1;
    }
    TypeDistribution { counts }
}

impl TypeDistribution {
    pub fn get(&self, primary_type: &str) -> usize {
        self.counts.get(primary_type).copied().unwrap_or(0)
    }

    /// Number of distinct types.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, equal to the number of aggregated rows.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn types(&self) -> Vec<&str> {
        self.counts.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Percent share per type.
    pub fn proportions(&self) -> Vec<(&str, f64)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.iter()
            .map(|(k, v)| (k, v as f64 * 100.0 / total as f64))
            .collect()
    }
}
