//! Normalized discounted KL-divergence (rKL) of a protected group's share in
//! ranking prefixes against a target share.

use std::collections::BTreeMap;

use crate::error::{MetricError, check_open_unit_interval};
use crate::metrics::discount::{rank_discount, xlogy_ratio};
use crate::model::cutoffs::CutoffSet;
use crate::model::profile::RklNormalization;
use crate::model::ranking::RankedList;
use crate::model::targets::TargetDistribution;

/// rKL of `protected_group` in a single-label ranking, default normalization.
///
/// `cut_off_points` must be strictly ascending and within `1..=k`;
/// `k` must not exceed the ranking length.
///
/// The default [`RklNormalization::CutoffMean`] is a mean divergence in nats
/// and is not bounded above: a small target share with the group placed on
/// top scores well past 1. Use [`normalized_discounted_kl_divergence_with`]
/// and [`RklNormalization::MaxDivergence`] for a score in `[0, 1]`.
pub fn normalized_discounted_kl_divergence<S>(
    ranked_perspectives: &[S],
    gold_proportion: f64,
    protected_group: &str,
    cut_off_points: &[usize],
    k: usize,
) -> Result<f64, MetricError>
where
    S: AsRef<str>,
{
    normalized_discounted_kl_divergence_with(
        ranked_perspectives,
        gold_proportion,
        protected_group,
        cut_off_points,
        k,
        RklNormalization::default(),
    )
}

pub fn normalized_discounted_kl_divergence_with<S>(
    ranked_perspectives: &[S],
    gold_proportion: f64,
    protected_group: &str,
    cut_off_points: &[usize],
    k: usize,
    normalization: RklNormalization,
) -> Result<f64, MetricError>
where
    S: AsRef<str>,
{
    let membership = ranked_perspectives
        .iter()
        .map(|label| label.as_ref() == protected_group)
        .collect::<Vec<_>>();
    rkl_from_membership(
        &membership,
        gold_proportion,
        cut_off_points,
        k,
        normalization,
    )
}

/// rKL for every group of `targets`; an item belongs to a group when its
/// perspective set carries the group label.
pub fn rkl_per_group(
    list: &RankedList,
    targets: &TargetDistribution,
    cut_off_points: &[usize],
    k: usize,
    normalization: RklNormalization,
) -> Result<BTreeMap<String, f64>, MetricError> {
    let mut out = BTreeMap::new();
    for (group, proportion) in targets.iter() {
        let membership = list.membership(group);
        let value = rkl_from_membership(&membership, proportion, cut_off_points, k, normalization)?;
        out.insert(group.to_string(), value);
    }
    Ok(out)
}

/// Core rKL over a protected-membership mask in rank order.
pub fn rkl_from_membership(
    membership: &[bool],
    gold_proportion: f64,
    cut_off_points: &[usize],
    k: usize,
    normalization: RklNormalization,
) -> Result<f64, MetricError> {
    check_open_unit_interval("gold_proportion", gold_proportion)?;
    if k == 0 || k > membership.len() {
        return Err(MetricError::InvalidCutoffs(format!(
            "k = {k} must lie within 1..={}",
            membership.len()
        )));
    }
    let cutoffs = CutoffSet::strict(cut_off_points, k)?;

    // Largest divergence any prefix can reach: the group fully absent or fully dominant.
    let worst_divergence = binary_kl(0.0, gold_proportion).max(binary_kl(1.0, gold_proportion));

    let mut protected_seen = 0usize;
    let mut scanned = 0usize;
    let mut raw = 0.0;
    let mut worst = 0.0;
    for &cutoff in cutoffs.points() {
        protected_seen += membership[scanned..cutoff].iter().filter(|&&m| m).count();
        scanned = cutoff;

        let observed = protected_seen as f64 / cutoff as f64;
        let discount = rank_discount(cutoff);
        raw += discount * binary_kl(observed, gold_proportion);
        worst += discount * worst_divergence;
    }

    let value = match normalization {
        RklNormalization::CutoffMean => raw / cutoffs.len() as f64,
        RklNormalization::MaxDivergence => (raw / worst).min(1.0),
    };
    Ok(value)
}

/// KL-divergence in nats between Bernoulli(`observed`) and Bernoulli(`target`).
pub fn binary_kl(observed: f64, target: f64) -> f64 {
    // Rounding can push near-equal shares a hair below zero.
    (xlogy_ratio(observed, target) + xlogy_ratio(1.0 - observed, 1.0 - target)).max(0.0)
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/rkl.rs"]
mod tests;
