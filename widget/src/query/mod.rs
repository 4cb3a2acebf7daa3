//! Query shaping: constraint augmentation and per-filter counting.

mod augment;
pub use augment::augment_constraints;

mod counts;
pub use counts::compute_filter_counts;

pub mod count_sql;
