use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// Which bank export dialect a transaction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankSource {
    Nubank,
    Inter,
}

impl fmt::Display for BankSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankSource::Nubank => write!(f, "nubank"),
            BankSource::Inter => write!(f, "inter"),
        }
    }
}

/// Normalized transaction record. `amount` is always non-negative; the
/// direction of money movement lives in `tx_type` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque id, unique within one ingestion run.
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    /// Absent only transiently, before categorization has run.
    pub category: Option<Category>,
    pub source: BankSource,
}

impl Transaction {
    /// Effective category, falling back the same way the classifier does.
    pub fn category_or_fallback(&self) -> Category {
        self.category.unwrap_or_else(Category::fallback)
    }
}
