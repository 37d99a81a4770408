use std::fmt::Write;

use crate::pipeline::evaluate::QueryScores;
use crate::report::format_f64_6;

pub const TSV_HEADER: &str = "query_id\tmetric\tparameter\tvalue";

/// One row per (query, metric, parameter).
pub fn render_scores_tsv(scores: &[QueryScores]) -> String {
    let mut out = String::new();
    out.push_str(TSV_HEADER);
    out.push('\n');
    for query in scores {
        for (k, value) in &query.alpha_ndcg {
            let _ = writeln!(
                out,
                "{}\talpha_ndcg\tk={}\t{}",
                query.query_id,
                k,
                format_f64_6(*value)
            );
        }
        for (group, value) in &query.rkl {
            let _ = writeln!(
                out,
                "{}\trkl\tgroup={}\t{}",
                query.query_id,
                group,
                format_f64_6(*value)
            );
        }
    }
    out
}
