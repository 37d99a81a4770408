use serde::Serialize;

use crate::error::{MetricError, check_unit_interval};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RklNormalization {
    /// Discounted KL (nats) averaged over the sampled cutoffs.
    #[default]
    CutoffMean,
    /// Discounted KL over the largest attainable discounted KL; bounded to `[0, 1]`.
    MaxDivergence,
}

impl RklNormalization {
    pub fn as_str(self) -> &'static str {
        match self {
            RklNormalization::CutoffMean => "cutoff_mean",
            RklNormalization::MaxDivergence => "max_divergence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSource {
    /// Per-record targets, then the targets file; queries with neither skip rKL.
    Supplied,
    /// Per-record targets, then the targets file, then the gold list's label shares.
    SuppliedOrGold,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvalProfile {
    pub alpha: f64,
    pub k_range: Vec<usize>,
    pub rkl_cut_off_points: Vec<usize>,
    pub rkl_k: Option<usize>,
    pub rkl_normalization: RklNormalization,
    pub target_source: TargetSource,
}

impl EvalProfile {
    pub fn default_v1() -> Self {
        Self {
            alpha: 0.5,
            k_range: vec![4, 8, 16],
            rkl_cut_off_points: vec![4, 8, 16],
            rkl_k: None,
            rkl_normalization: RklNormalization::CutoffMean,
            target_source: TargetSource::Supplied,
        }
    }

    pub fn validate(&self) -> Result<(), MetricError> {
        check_unit_interval("alpha", self.alpha)?;
        if self.k_range.is_empty() {
            return Err(MetricError::InvalidCutoffs(
                "k_range must not be empty".to_string(),
            ));
        }
        if self.rkl_cut_off_points.is_empty() {
            return Err(MetricError::InvalidCutoffs(
                "rkl cut-off points must not be empty".to_string(),
            ));
        }
        if self.k_range.contains(&0) || self.rkl_cut_off_points.contains(&0) {
            return Err(MetricError::InvalidCutoffs(
                "must be positive ranks".to_string(),
            ));
        }
        if self.rkl_k == Some(0) {
            return Err(MetricError::InvalidCutoffs(
                "rkl k must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/profile.rs"]
mod tests;
