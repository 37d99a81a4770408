use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::input::reader::open_maybe_gz;
use crate::model::ranking::RankedList;
use crate::model::targets::TargetDistribution;

/// One query's predicted and gold rankings, as handed over by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub query_id: String,
    pub predicted: RankedList,
    pub gold: RankedList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<TargetDistribution>,
}

pub fn read_query_records(path: &Path) -> Result<Vec<QueryRecord>, EvalError> {
    let reader = open_maybe_gz(path)?;
    parse_query_records(reader)
}

/// Parses JSON Lines; blank lines are skipped.
pub fn parse_query_records<R: BufRead>(mut reader: R) -> Result<Vec<QueryRecord>, EvalError> {
    let mut buf = String::new();
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim();
        if line.is_empty() {
            continue;
        }
        let record: QueryRecord = serde_json::from_str(line).map_err(|source| EvalError::Parse {
            line: line_no,
            source,
        })?;
        if !seen.insert(record.query_id.clone()) {
            tracing::warn!(
                line = line_no,
                query_id = %record.query_id,
                "duplicate query id; keeping first"
            );
            continue;
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(EvalError::Config("query file holds no records".to_string()));
    }

    Ok(records)
}

/// Loads a group-to-share JSON object.
///
/// Only per-share bounds are checked here; the sum limit depends on whether a
/// query's labels overlap and is checked per query.
pub fn load_targets(path: &Path) -> Result<TargetDistribution, EvalError> {
    let reader = open_maybe_gz(path)?;
    let targets: TargetDistribution = serde_json::from_reader(reader)?;
    targets
        .validate_with(false)
        .map_err(|e| EvalError::Config(format!("{}: {e}", path.display())))?;
    Ok(targets)
}
