//! Rank-diversity and group-fairness metrics for ranked retrieval results.
//!
//! - [`metrics::alpha_ndcg`]: relevance with a redundancy penalty across
//!   perspective labels, normalized by a greedy ideal ranking.
//! - [`metrics::normalized_discounted_kl_divergence`]: how far a protected
//!   group's share in ranking prefixes drifts from a target share.
//!
//! Both are pure functions over one ranked list. Everything else in the crate
//! (JSON Lines records, reports, the CLI) is plumbing around them.

pub mod error;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod report;

pub use error::{EvalError, MetricError};
pub use metrics::{
    alpha_ndcg, alpha_ndcg_lists, normalized_discounted_kl_divergence,
    normalized_discounted_kl_divergence_with, rkl_per_group,
};
pub use model::{
    CutoffSet, EvalProfile, PerspectiveSet, RankedItem, RankedList, RklNormalization,
    TargetDistribution, TargetSource,
};
