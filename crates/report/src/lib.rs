pub mod aggregate;
pub mod summary;

pub use aggregate::{
    filter_by_date_range, group_by_category, group_by_month, summarize, summarize_filtered,
    top_categories,
};
pub use summary::{CategorySummary, MonthlySummary, Summary};
