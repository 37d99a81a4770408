use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{EvalError, MetricError};
use crate::input::QueryRecord;
use crate::metrics::{alpha_ndcg_lists, rkl_per_group};
use crate::model::cutoffs::{CutoffSet, clip_cutoffs};
use crate::model::profile::{EvalProfile, TargetSource};
use crate::model::targets::TargetDistribution;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryScores {
    pub query_id: String,
    pub n_items: usize,
    pub alpha_ndcg: BTreeMap<usize, f64>,
    pub rkl_k: Option<usize>,
    pub rkl_cut_off_points: Vec<usize>,
    pub rkl: BTreeMap<String, f64>,
}

/// Scores every record; the first invalid record aborts the run.
pub fn evaluate_all(
    records: &[QueryRecord],
    profile: &EvalProfile,
    fallback_targets: Option<&TargetDistribution>,
) -> Result<Vec<QueryScores>, EvalError> {
    profile
        .validate()
        .map_err(|e| EvalError::Config(e.to_string()))?;
    records
        .iter()
        .map(|record| {
            evaluate_query(record, profile, fallback_targets).map_err(|source| {
                EvalError::Metric {
                    query_id: record.query_id.clone(),
                    source,
                }
            })
        })
        .collect()
}

/// Scores one query.
///
/// Configured cutoffs beyond the list length are dropped for this query
/// rather than rejected, so one profile can serve lists of different sizes.
pub fn evaluate_query(
    record: &QueryRecord,
    profile: &EvalProfile,
    fallback_targets: Option<&TargetDistribution>,
) -> Result<QueryScores, MetricError> {
    let predicted = &record.predicted;
    let gold = &record.gold;
    if predicted.len() != gold.len() {
        return Err(MetricError::ItemCountMismatch {
            predicted: predicted.len(),
            gold: gold.len(),
        });
    }
    let n_items = predicted.len();

    let k_range = clip_cutoffs(&profile.k_range, n_items);
    log_dropped(&record.query_id, "alpha-nDCG", &profile.k_range, &k_range, n_items);
    let alpha_ndcg = if k_range.is_empty() {
        predicted.validate()?;
        gold.validate()?;
        BTreeMap::new()
    } else {
        let cutoffs = CutoffSet::normalized(&k_range, n_items)?;
        alpha_ndcg_lists(predicted, gold, profile.alpha, &cutoffs)?
    };

    let mut rkl_k = None;
    let mut rkl_cut_off_points = Vec::new();
    let mut rkl = BTreeMap::new();
    if let Some(targets) = resolve_targets(record, profile, fallback_targets)? {
        let k = profile.rkl_k.unwrap_or(n_items).min(n_items);
        let points = clip_cutoffs(&profile.rkl_cut_off_points, k);
        log_dropped(&record.query_id, "rKL", &profile.rkl_cut_off_points, &points, k);
        if !points.is_empty() && !targets.is_empty() {
            let cutoffs = CutoffSet::normalized(&points, k)?;
            rkl = rkl_per_group(
                predicted,
                &targets,
                cutoffs.points(),
                k,
                profile.rkl_normalization,
            )?;
            rkl_k = Some(k);
            rkl_cut_off_points = cutoffs.points().to_vec();
        }
    } else {
        tracing::debug!(query_id = %record.query_id, "no target distribution; skipping rKL");
    }

    Ok(QueryScores {
        query_id: record.query_id.clone(),
        n_items,
        alpha_ndcg,
        rkl_k,
        rkl_cut_off_points,
        rkl,
    })
}

fn resolve_targets<'a>(
    record: &'a QueryRecord,
    profile: &EvalProfile,
    fallback: Option<&'a TargetDistribution>,
) -> Result<Option<Cow<'a, TargetDistribution>>, MetricError> {
    // Shares of overlapping groups may sum past 1.
    let disjoint = !(record.predicted.is_multi_label() || record.gold.is_multi_label());
    if let Some(targets) = record.targets.as_ref().or(fallback) {
        targets.validate_with(disjoint)?;
        return Ok(Some(Cow::Borrowed(targets)));
    }
    match profile.target_source {
        TargetSource::Supplied => Ok(None),
        TargetSource::SuppliedOrGold => {
            Ok(Some(Cow::Owned(TargetDistribution::from_gold(&record.gold))))
        }
    }
}

fn log_dropped(query_id: &str, metric: &str, requested: &[usize], kept: &[usize], limit: usize) {
    let dropped = requested
        .iter()
        .filter(|k| !kept.contains(k))
        .collect::<Vec<_>>();
    if !dropped.is_empty() {
        tracing::info!(
            query_id,
            metric,
            limit,
            dropped = ?dropped,
            "cutoffs beyond the ranking length dropped"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/evaluate.rs"]
mod tests;
