use chrono::NaiveDate;
use extrato_core::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Overall totals for a set of transactions. Both date bounds are `None`
/// exactly when the input was empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// income − expense; negative when spending outpaced income.
    pub net_balance: Decimal,
    pub transaction_count: usize,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Summary {
    pub(crate) fn empty() -> Self {
        Summary {
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            net_balance: Decimal::ZERO,
            transaction_count: 0,
            start: None,
            end: None,
        }
    }
}

/// Expense breakdown for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub amount: Decimal,
    /// Share of total expense amount in [0, 100]; 0 when total expense is 0.
    pub percentage: f64,
    pub transaction_count: usize,
}

/// Income/expense/balance for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// "YYYY-MM"; lexical order on this key is chronological order.
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub transaction_count: usize,
}
