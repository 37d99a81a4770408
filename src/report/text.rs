use crate::model::profile::RklNormalization;
use crate::pipeline::evaluate::QueryScores;
use crate::report::{RunInfo, format_f64_6, join_usize};

pub fn render_report_text(info: &RunInfo, scores: &[QueryScores]) -> String {
    let mut out = String::new();

    out.push_str("Ranking Diversity & Group Fairness Report\n");
    out.push_str("=========================================\n\n");

    out.push_str(&format!("Tool: {} {}\n", info.tool_name, info.tool_version));
    out.push_str(&format!("Input: {}\n", info.input));
    out.push_str(&format!("alpha: {}\n", format_f64_6(info.profile.alpha)));
    out.push_str(&format!(
        "alpha-nDCG cutoffs: {}\n",
        join_usize(&info.profile.k_range)
    ));
    out.push_str(&format!(
        "rKL cutoffs: {} (normalization: {})\n",
        join_usize(&info.profile.rkl_cut_off_points),
        info.profile.rkl_normalization.as_str()
    ));
    out.push_str(&format!("Queries: {}\n\n", scores.len()));

    for (idx, query) in scores.iter().enumerate() {
        out.push_str(&format!(
            "{}. Query {} ({} items)\n",
            idx + 1,
            query.query_id,
            query.n_items
        ));

        if query.alpha_ndcg.is_empty() {
            out.push_str("alpha-nDCG: no cutoff fits this ranking\n");
        } else {
            for (k, value) in &query.alpha_ndcg {
                out.push_str(&format!(
                    "alpha-nDCG@{}: {} ({})\n",
                    k,
                    format_f64_6(*value),
                    diversity_statement(*value)
                ));
            }
        }

        if query.rkl.is_empty() {
            out.push_str("rKL: not audited\n");
        } else {
            if let Some(k) = query.rkl_k {
                out.push_str(&format!(
                    "rKL sampled at {} (k={})\n",
                    join_usize(&query.rkl_cut_off_points),
                    k
                ));
            }
            for (group, value) in &query.rkl {
                out.push_str(&format!(
                    "rKL[{}]: {} ({})\n",
                    group,
                    format_f64_6(*value),
                    fairness_statement(*value, info.profile.rkl_normalization)
                ));
            }
        }
        out.push('\n');
    }

    out
}

fn diversity_statement(score: f64) -> &'static str {
    if score >= 0.90 {
        "near-ideal relevance and perspective coverage"
    } else if score >= 0.60 {
        "partial perspective coverage"
    } else {
        "redundant or weakly relevant top ranks"
    }
}

/// Cutoff-mean scores are nats and unbounded; max-divergence scores lie in `[0, 1]`.
fn fairness_statement(rkl: f64, normalization: RklNormalization) -> &'static str {
    let (close, moderate) = match normalization {
        RklNormalization::CutoffMean => (0.05, 0.20),
        RklNormalization::MaxDivergence => (0.10, 0.40),
    };
    if rkl <= 1e-6 {
        "proportional"
    } else if rkl < close {
        "close to target share"
    } else if rkl < moderate {
        "moderately skewed"
    } else {
        "strongly skewed"
    }
}
