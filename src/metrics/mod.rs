pub mod alpha_ndcg;
pub mod discount;
pub mod rkl;

pub use alpha_ndcg::{alpha_ndcg, alpha_ndcg_lists, ideal_order};
pub use rkl::{
    normalized_discounted_kl_divergence, normalized_discounted_kl_divergence_with, rkl_per_group,
};
