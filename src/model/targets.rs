use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MetricError, check_open_unit_interval};
use crate::model::ranking::RankedList;

const SUM_TOLERANCE: f64 = 1e-6;

/// Target share per protected group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetDistribution {
    proportions: BTreeMap<String, f64>,
}

impl TargetDistribution {
    pub fn new(proportions: BTreeMap<String, f64>) -> Result<Self, MetricError> {
        let out = Self { proportions };
        out.validate()?;
        Ok(out)
    }

    pub fn single(group: impl Into<String>, proportion: f64) -> Result<Self, MetricError> {
        let mut proportions = BTreeMap::new();
        proportions.insert(group.into(), proportion);
        Self::new(proportions)
    }

    /// Share of each label over a population of labelled items.
    ///
    /// Items with several labels count once per label, so shares of
    /// overlapping groups may sum past 1; disjoint populations always sum to 1.
    /// Groups at share 0 or 1 cannot be audited and are left out.
    pub fn from_labels<'a, I>(population: I) -> Self
    where
        I: IntoIterator<Item = &'a crate::model::ranking::PerspectiveSet>,
    {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut total = 0usize;
        for set in population {
            total += 1;
            for label in set.labels() {
                *counts.entry(label.to_string()).or_insert(0) += 1;
            }
        }
        let mut proportions = BTreeMap::new();
        if total == 0 {
            return Self { proportions };
        }
        for (label, count) in counts {
            let share = count as f64 / total as f64;
            if share > 0.0 && share < 1.0 {
                proportions.insert(label, share);
            } else {
                tracing::warn!(
                    group = %label,
                    share,
                    "group share is degenerate; not auditing it"
                );
            }
        }
        Self { proportions }
    }

    pub fn from_gold(gold: &RankedList) -> Self {
        Self::from_labels(gold.perspectives())
    }

    /// Every share must lie in `(0, 1)`. Shares of disjoint groups must not
    /// sum past 1; the sum check is skipped when `disjoint` is false.
    pub fn validate_with(&self, disjoint: bool) -> Result<(), MetricError> {
        for &share in self.proportions.values() {
            check_open_unit_interval("gold_proportion", share)?;
        }
        if disjoint {
            let sum: f64 = self.proportions.values().sum();
            if sum > 1.0 + SUM_TOLERANCE {
                return Err(MetricError::InvalidTargets(format!(
                    "shares sum to {sum:.6}, above 1"
                )));
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), MetricError> {
        self.validate_with(true)
    }

    pub fn get(&self, group: &str) -> Option<f64> {
        self.proportions.get(group).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.proportions.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.proportions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proportions.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/targets.rs"]
mod tests;
