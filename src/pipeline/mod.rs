pub mod evaluate;
pub mod write;

pub use evaluate::{QueryScores, evaluate_all, evaluate_query};
pub use write::{RunInfo, write_reports};
