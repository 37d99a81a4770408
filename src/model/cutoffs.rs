use crate::error::MetricError;

/// Strictly ascending rank cutoffs, each in `1..=limit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutoffSet {
    points: Vec<usize>,
}

impl CutoffSet {
    /// Accepts cutoffs in any order; duplicates collapse.
    pub fn normalized(points: &[usize], limit: usize) -> Result<Self, MetricError> {
        let mut sorted = points.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        Self::check(&sorted, limit)?;
        Ok(Self { points: sorted })
    }

    /// Requires the caller to already supply a strictly ascending sequence.
    pub fn strict(points: &[usize], limit: usize) -> Result<Self, MetricError> {
        if let Some(pair) = points.windows(2).find(|w| w[0] >= w[1]) {
            return Err(MetricError::InvalidCutoffs(format!(
                "must be strictly ascending ({} followed by {})",
                pair[0], pair[1]
            )));
        }
        Self::check(points, limit)?;
        Ok(Self {
            points: points.to_vec(),
        })
    }

    fn check(points: &[usize], limit: usize) -> Result<(), MetricError> {
        if points.is_empty() {
            return Err(MetricError::InvalidCutoffs("must not be empty".to_string()));
        }
        if points.contains(&0) {
            return Err(MetricError::InvalidCutoffs(
                "must be positive ranks".to_string(),
            ));
        }
        if let Some(&max) = points.last() {
            if max > limit {
                return Err(MetricError::InvalidCutoffs(format!(
                    "{max} exceeds the limit of {limit}"
                )));
            }
        }
        Ok(())
    }

    pub fn points(&self) -> &[usize] {
        &self.points
    }

    pub fn max(&self) -> usize {
        self.points.last().copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Drops cutoffs above `limit`; used by callers that score lists of varying length.
pub fn clip_cutoffs(points: &[usize], limit: usize) -> Vec<usize> {
    points
        .iter()
        .copied()
        .filter(|&k| k > 0 && k <= limit)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/cutoffs.rs"]
mod tests;
