use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::EvalError;
use crate::pipeline::evaluate::QueryScores;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::tsv::render_scores_tsv;

pub use crate::report::RunInfo;

pub fn write_reports(
    info: &RunInfo,
    scores: &[QueryScores],
    out_dir: &Path,
) -> Result<(), EvalError> {
    fs::create_dir_all(out_dir)?;

    let tsv_path = out_dir.join("scores.tsv");
    write_file(&tsv_path, &render_scores_tsv(scores))?;

    let summary_path = out_dir.join("summary.json");
    write_file(&summary_path, &render_summary_json(info, scores)?)?;

    let report_path = out_dir.join("report.txt");
    write_file(&report_path, &render_report_text(info, scores))?;

    tracing::info!(
        out_dir = %out_dir.display(),
        n_queries = scores.len(),
        "reports written"
    );
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), EvalError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(contents.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/write.rs"]
mod tests;
