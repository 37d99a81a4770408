use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{MetricError, check_unit_interval};

/// Perspective labels attached to one ranked item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "PerspectiveRepr", into = "Vec<String>")]
pub struct PerspectiveSet {
    labels: BTreeSet<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PerspectiveRepr {
    One(String),
    Many(Vec<String>),
}

impl From<PerspectiveRepr> for PerspectiveSet {
    fn from(value: PerspectiveRepr) -> Self {
        match value {
            PerspectiveRepr::One(label) => PerspectiveSet::single(label),
            PerspectiveRepr::Many(labels) => labels.into_iter().collect(),
        }
    }
}

impl From<PerspectiveSet> for Vec<String> {
    fn from(value: PerspectiveSet) -> Self {
        value.labels.into_iter().collect()
    }
}

impl PerspectiveSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(label: impl Into<String>) -> Self {
        let mut labels = BTreeSet::new();
        labels.insert(label.into());
        Self { labels }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn overlaps(&self, other: &PerspectiveSet) -> bool {
        // Iterate the smaller set; most items carry a single label.
        let (small, large) = if self.labels.len() <= other.labels.len() {
            (&self.labels, &other.labels)
        } else {
            (&other.labels, &self.labels)
        };
        small.iter().any(|label| large.contains(label))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl From<&str> for PerspectiveSet {
    fn from(value: &str) -> Self {
        PerspectiveSet::single(value)
    }
}

impl From<String> for PerspectiveSet {
    fn from(value: String) -> Self {
        PerspectiveSet::single(value)
    }
}

impl<S: Into<String>> FromIterator<S> for PerspectiveSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub relevance: f64,
    #[serde(default)]
    pub perspectives: PerspectiveSet,
}

/// Ordered items; index 0 is rank 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedList {
    items: Vec<RankedItem>,
}

impl RankedList {
    pub fn new(items: Vec<RankedItem>) -> Result<Self, MetricError> {
        for item in &items {
            check_unit_interval("relevance", item.relevance)?;
        }
        Ok(Self { items })
    }

    /// Zips parallel relevance/perspective sequences into a list.
    pub fn from_parallel<P>(relevance: &[f64], perspectives: &[P]) -> Result<Self, MetricError>
    where
        P: Clone + Into<PerspectiveSet>,
    {
        if relevance.len() != perspectives.len() {
            return Err(MetricError::LengthMismatch {
                what: "perspectives",
                expected: relevance.len(),
                actual: perspectives.len(),
            });
        }
        let items = relevance
            .iter()
            .zip(perspectives)
            .map(|(&relevance, p)| RankedItem {
                relevance,
                perspectives: p.clone().into(),
            })
            .collect();
        Self::new(items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[RankedItem] {
        &self.items
    }

    /// Whether any item carries more than one label, so groups may overlap.
    pub fn is_multi_label(&self) -> bool {
        self.items.iter().any(|item| item.perspectives.len() > 1)
    }

    pub fn perspectives(&self) -> impl Iterator<Item = &PerspectiveSet> {
        self.items.iter().map(|item| &item.perspectives)
    }

    /// Whether each position belongs to `group`.
    pub fn membership(&self, group: &str) -> Vec<bool> {
        self.items
            .iter()
            .map(|item| item.perspectives.contains(group))
            .collect()
    }

    /// Re-validates a list obtained through deserialization.
    pub fn validate(&self) -> Result<(), MetricError> {
        for item in &self.items {
            check_unit_interval("relevance", item.relevance)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/ranking.rs"]
mod tests;
