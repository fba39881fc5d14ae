pub mod category;
pub mod period;
pub mod transaction;

pub use category::{Category, ALL_CATEGORIES};
pub use period::DateRangeFilter;
pub use transaction::{BankSource, Transaction, TransactionType};
