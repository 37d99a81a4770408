use serde::Serialize;

use crate::error::EvalError;
use crate::pipeline::evaluate::QueryScores;
use crate::report::RunInfo;

#[derive(Serialize)]
struct Summary<'a> {
    tool: &'a str,
    tool_meta: ToolMeta<'a>,
    input: &'a str,
    profile: &'a crate::model::profile::EvalProfile,
    n_queries: usize,
    queries: &'a [QueryScores],
}

#[derive(Serialize)]
struct ToolMeta<'a> {
    name: &'a str,
    version: &'a str,
    git_hash: Option<&'a str>,
}

pub fn render_summary_json(info: &RunInfo, scores: &[QueryScores]) -> Result<String, EvalError> {
    let summary = Summary {
        tool: "kira-rankdiv",
        tool_meta: ToolMeta {
            name: &info.tool_name,
            version: &info.tool_version,
            git_hash: info.git_hash.as_deref(),
        },
        input: &info.input,
        profile: &info.profile,
        n_queries: scores.len(),
        queries: scores,
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}
