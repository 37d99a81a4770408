use thiserror::Error;

/// Rejection raised by the metric functions before any computation starts.
///
/// Every variant describes malformed caller input; degenerate-but-valid
/// inputs (no relevant items, boundary proportions) are scored, not rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    #[error("invalid input: {what} has {actual} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid input: predicted list has {predicted} items but gold list has {gold}")]
    ItemCountMismatch { predicted: usize, gold: usize },
    #[error("invalid input: {what} = {value} is outside {domain}")]
    ValueOutOfDomain {
        what: &'static str,
        value: f64,
        domain: &'static str,
    },
    #[error("invalid input: cutoffs {0}")]
    InvalidCutoffs(String),
    #[error("invalid input: target distribution {0}")]
    InvalidTargets(String),
}

impl MetricError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            MetricError::LengthMismatch { .. }
                | MetricError::ItemCountMismatch { .. }
                | MetricError::ValueOutOfDomain { .. }
                | MetricError::InvalidCutoffs(_)
                | MetricError::InvalidTargets(_)
        )
    }
}

/// Failure of the request/report layer around the metrics.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("query {query_id}: {source}")]
    Metric {
        query_id: String,
        #[source]
        source: MetricError,
    },
    #[error("config error: {0}")]
    Config(String),
}

pub(crate) fn check_unit_interval(what: &'static str, value: f64) -> Result<(), MetricError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MetricError::ValueOutOfDomain {
            what,
            value,
            domain: "[0, 1]",
        })
    }
}

pub(crate) fn check_open_unit_interval(what: &'static str, value: f64) -> Result<(), MetricError> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(MetricError::ValueOutOfDomain {
            what,
            value,
            domain: "(0, 1)",
        })
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/error.rs"]
mod tests;
