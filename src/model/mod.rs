pub mod cutoffs;
pub mod profile;
pub mod ranking;
pub mod targets;

pub use cutoffs::CutoffSet;
pub use profile::{EvalProfile, RklNormalization, TargetSource};
pub use ranking::{PerspectiveSet, RankedItem, RankedList};
pub use targets::TargetDistribution;
