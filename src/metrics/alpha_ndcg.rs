//! alpha-nDCG: discounted cumulative gain where each item's relevance is
//! decayed by `(1 - alpha)` for every earlier relevant item that shares one of
//! its perspective labels, normalized by a greedily built ideal ranking.

use std::collections::BTreeMap;

use crate::error::{MetricError, check_unit_interval};
use crate::metrics::discount::rank_discount;
use crate::model::cutoffs::CutoffSet;
use crate::model::ranking::{PerspectiveSet, RankedItem, RankedList};

const IDEAL_EXCESS_TOLERANCE: f64 = 1e-12;

/// alpha-nDCG of a predicted ranking against a gold ranking, per cutoff.
///
/// `perspectives_*` and `relevance_scores_*` are parallel sequences for the
/// gold and predicted lists. `k_range` may be unordered; duplicates collapse.
pub fn alpha_ndcg<P>(
    perspectives_global: &[P],
    perspectives_predictions: &[P],
    relevance_scores_global: &[f64],
    relevance_scores_predictions: &[f64],
    alpha: f64,
    k_range: &[usize],
) -> Result<BTreeMap<usize, f64>, MetricError>
where
    P: Clone + Into<PerspectiveSet>,
{
    let gold = RankedList::from_parallel(relevance_scores_global, perspectives_global)?;
    let predicted =
        RankedList::from_parallel(relevance_scores_predictions, perspectives_predictions)?;
    if predicted.len() != gold.len() {
        return Err(MetricError::ItemCountMismatch {
            predicted: predicted.len(),
            gold: gold.len(),
        });
    }
    let cutoffs = CutoffSet::normalized(k_range, predicted.len())?;
    alpha_ndcg_lists(&predicted, &gold, alpha, &cutoffs)
}

pub fn alpha_ndcg_lists(
    predicted: &RankedList,
    gold: &RankedList,
    alpha: f64,
    cutoffs: &CutoffSet,
) -> Result<BTreeMap<usize, f64>, MetricError> {
    check_unit_interval("alpha", alpha)?;
    predicted.validate()?;
    gold.validate()?;
    if predicted.len() != gold.len() {
        return Err(MetricError::ItemCountMismatch {
            predicted: predicted.len(),
            gold: gold.len(),
        });
    }
    if cutoffs.max() > predicted.len() {
        return Err(MetricError::InvalidCutoffs(format!(
            "{} exceeds the list length of {}",
            cutoffs.max(),
            predicted.len()
        )));
    }

    let dcg = cumulative_dcg(&position_gains(predicted.items(), alpha));
    let order = ideal_order(gold, alpha);
    let ideal_items = order.iter().map(|&idx| &gold.items()[idx]);
    let idcg = cumulative_dcg(&position_gains(ideal_items, alpha));

    let mut out = BTreeMap::new();
    for &k in cutoffs.points() {
        let (dcg_k, idcg_k) = (dcg[k - 1], idcg[k - 1]);
        let score = if idcg_k <= 0.0 {
            tracing::debug!(k, "no relevant items within cutoff; alpha-nDCG is 0");
            0.0
        } else if dcg_k > idcg_k * (1.0 + IDEAL_EXCESS_TOLERANCE) {
            tracing::warn!(
                k,
                dcg = dcg_k,
                idcg = idcg_k,
                "prediction outscores the greedy ideal ranking; capping alpha-nDCG at 1"
            );
            1.0
        } else {
            (dcg_k / idcg_k).min(1.0)
        };
        out.insert(k, score);
    }
    Ok(out)
}

/// Gain per position: `r * (1 - alpha)^c`, `c` counting earlier relevant
/// items that overlap this item's perspectives.
pub fn position_gains<'a, I>(items: I, alpha: f64) -> Vec<f64>
where
    I: IntoIterator<Item = &'a RankedItem>,
{
    let mut covered: Vec<&PerspectiveSet> = Vec::new();
    let mut gains = Vec::new();
    for item in items {
        if item.relevance <= 0.0 {
            gains.push(0.0);
            continue;
        }
        let redundancy = covered
            .iter()
            .filter(|seen| seen.overlaps(&item.perspectives))
            .count();
        gains.push(redundant_gain(item.relevance, redundancy, alpha));
        covered.push(&item.perspectives);
    }
    gains
}

pub fn redundant_gain(relevance: f64, redundancy: usize, alpha: f64) -> f64 {
    if relevance <= 0.0 {
        return 0.0;
    }
    let exponent = i32::try_from(redundancy).unwrap_or(i32::MAX);
    relevance * (1.0 - alpha).powi(exponent)
}

/// Running DCG; entry `i` holds DCG@(i+1).
pub fn cumulative_dcg(gains: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    gains
        .iter()
        .enumerate()
        .map(|(idx, gain)| {
            total += gain * rank_discount(idx + 1);
            total
        })
        .collect()
}

/// Greedy ideal ordering of the gold list, as indices into it.
///
/// Each step takes the remaining item with the largest marginal gain given the
/// labels covered so far. Ties go to the earliest gold position. Once no
/// remaining item has positive gain the rest keep their gold order.
pub fn ideal_order(gold: &RankedList, alpha: f64) -> Vec<usize> {
    let items = gold.items();
    let n = items.len();
    let mut redundancy = vec![0usize; n];
    let mut placed = vec![false; n];
    let mut order = Vec::with_capacity(n);

    while order.len() < n {
        let mut best: Option<(usize, f64)> = None;
        for (idx, item) in items.iter().enumerate() {
            if placed[idx] {
                continue;
            }
            let gain = redundant_gain(item.relevance, redundancy[idx], alpha);
            match best {
                Some((_, best_gain)) if gain <= best_gain => {}
                _ => best = Some((idx, gain)),
            }
        }
        let Some((chosen, gain)) = best else {
            break;
        };
        if gain <= 0.0 {
            order.extend((0..n).filter(|&idx| !placed[idx]));
            break;
        }

        placed[chosen] = true;
        order.push(chosen);
        let chosen_labels = &items[chosen].perspectives;
        for (idx, item) in items.iter().enumerate() {
            if !placed[idx] && item.perspectives.overlaps(chosen_labels) {
                redundancy[idx] += 1;
            }
        }
    }
    order
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/alpha_ndcg.rs"]
mod tests;
