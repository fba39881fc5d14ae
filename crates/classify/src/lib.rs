pub mod engine;
pub mod normalize;
pub(crate) mod table;

pub use engine::{CategorizationResult, CategoryEngine, ConfidencePolicy, MatchType, TableError};
pub use normalize::normalize;
