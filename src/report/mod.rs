pub mod json;
pub mod text;
pub mod tsv;

use serde::Serialize;

use crate::model::profile::EvalProfile;

/// Run-level metadata carried into every report.
#[derive(Debug, Clone, Serialize)]
pub struct RunInfo {
    pub tool_name: String,
    pub tool_version: String,
    pub git_hash: Option<String>,
    pub input: String,
    pub profile: EvalProfile,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn join_usize(values: &[usize]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
