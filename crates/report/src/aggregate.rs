use std::collections::BTreeMap;

use chrono::Datelike;
use extrato_core::{Category, DateRangeFilter, Transaction, TransactionType};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::summary::{CategorySummary, MonthlySummary, Summary};

/// Totals, count and date span for a slice of transactions.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    if transactions.is_empty() {
        return Summary::empty();
    }

    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for tx in transactions {
        match tx.tx_type {
            TransactionType::Income => total_income += tx.amount,
            TransactionType::Expense => total_expense += tx.amount,
        }
    }

    let start = transactions.iter().map(|t| t.date).min();
    let end = transactions.iter().map(|t| t.date).max();

    Summary {
        total_income,
        total_expense,
        net_balance: total_income - total_expense,
        transaction_count: transactions.len(),
        start,
        end,
    }
}

/// Keeps transactions inside the filter's inclusive bounds. A filter with
/// neither bound set returns the input unchanged (order preserved).
pub fn filter_by_date_range(
    transactions: &[Transaction],
    filter: DateRangeFilter,
) -> Vec<Transaction> {
    if filter.is_unbounded() {
        return transactions.to_vec();
    }
    transactions
        .iter()
        .filter(|tx| filter.contains(tx.date))
        .cloned()
        .collect()
}

/// Expense breakdown per category, largest amount first. Income
/// transactions are ignored; a missing category counts toward the fallback.
pub fn group_by_category(transactions: &[Transaction]) -> Vec<CategorySummary> {
    let mut buckets: BTreeMap<Category, (Decimal, usize)> = BTreeMap::new();
    for tx in transactions {
        if tx.tx_type != TransactionType::Expense {
            continue;
        }
        let bucket = buckets.entry(tx.category_or_fallback()).or_default();
        bucket.0 += tx.amount;
        bucket.1 += 1;
    }

    let total: Decimal = buckets.values().map(|(amount, _)| *amount).sum();

    let mut summaries: Vec<CategorySummary> = buckets
        .into_iter()
        .map(|(category, (amount, count))| CategorySummary {
            category,
            amount,
            percentage: if total > Decimal::ZERO {
                (amount / total * Decimal::from(100)).to_f64().unwrap_or(0.0)
            } else {
                0.0
            },
            transaction_count: count,
        })
        .collect();

    summaries.sort_by(|a, b| b.amount.cmp(&a.amount));
    summaries
}

/// Income/expense/balance per "YYYY-MM" key, ascending.
pub fn group_by_month(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut buckets: BTreeMap<String, (Decimal, Decimal, usize)> = BTreeMap::new();
    for tx in transactions {
        let key = format!("{:04}-{:02}", tx.date.year(), tx.date.month());
        let bucket = buckets.entry(key).or_default();
        match tx.tx_type {
            TransactionType::Income => bucket.0 += tx.amount,
            TransactionType::Expense => bucket.1 += tx.amount,
        }
        bucket.2 += 1;
    }

    buckets
        .into_iter()
        .map(|(month, (income, expense, count))| MonthlySummary {
            month,
            income,
            expense,
            balance: income - expense,
            transaction_count: count,
        })
        .collect()
}

/// The first `limit` entries of [`group_by_category`].
pub fn top_categories(transactions: &[Transaction], limit: usize) -> Vec<CategorySummary> {
    let mut categories = group_by_category(transactions);
    categories.truncate(limit);
    categories
}

/// [`filter_by_date_range`] composed with [`summarize`]; an absent filter
/// is a pass-through.
pub fn summarize_filtered(
    transactions: &[Transaction],
    filter: Option<DateRangeFilter>,
) -> Summary {
    match filter {
        Some(filter) => summarize(&filter_by_date_range(transactions, filter)),
        None => summarize(transactions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use extrato_core::BankSource;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn tx(
        date: NaiveDate,
        amount: i64,
        tx_type: TransactionType,
        category: Option<Category>,
    ) -> Transaction {
        Transaction {
            id: format!("{date}-{amount}-{tx_type}"),
            date,
            description: "test".to_string(),
            amount: Decimal::from(amount),
            tx_type,
            category,
            source: BankSource::Nubank,
        }
    }

    fn expense(date: NaiveDate, amount: i64, category: Category) -> Transaction {
        tx(date, amount, TransactionType::Expense, Some(category))
    }

    fn income(date: NaiveDate, amount: i64) -> Transaction {
        tx(date, amount, TransactionType::Income, None)
    }

    #[test]
    fn summarize_empty_is_all_zero_with_null_range() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.total_expense, Decimal::ZERO);
        assert_eq!(summary.net_balance, Decimal::ZERO);
        assert_eq!(summary.transaction_count, 0);
        assert_eq!(summary.start, None);
        assert_eq!(summary.end, None);
    }

    #[test]
    fn summarize_totals_and_balance() {
        let txns = vec![
            income(d(2024, 1, 1), 1000),
            income(d(2024, 1, 2), 500),
            expense(d(2024, 1, 3), 200, Category::Alimentacao),
            expense(d(2024, 1, 4), 300, Category::Transporte),
        ];
        let summary = summarize(&txns);
        assert_eq!(summary.total_income, Decimal::from(1500));
        assert_eq!(summary.total_expense, Decimal::from(500));
        assert_eq!(summary.net_balance, Decimal::from(1000));
        assert_eq!(summary.transaction_count, 4);
        assert_eq!(summary.start, Some(d(2024, 1, 1)));
        assert_eq!(summary.end, Some(d(2024, 1, 4)));
    }

    #[test]
    fn summarize_date_range_is_min_max_not_first_last() {
        let txns = vec![
            income(d(2024, 6, 1), 1),
            income(d(2024, 1, 1), 1),
            income(d(2024, 3, 1), 1),
        ];
        let summary = summarize(&txns);
        assert_eq!(summary.start, Some(d(2024, 1, 1)));
        assert_eq!(summary.end, Some(d(2024, 6, 1)));
    }

    #[test]
    fn filter_unbounded_returns_input_unchanged() {
        let txns = vec![income(d(2024, 2, 1), 1), income(d(2024, 1, 1), 2)];
        let filtered = filter_by_date_range(&txns, DateRangeFilter::default());
        assert_eq!(filtered, txns);
    }

    #[test]
    fn filter_applies_inclusive_bounds() {
        let txns = vec![
            income(d(2024, 1, 1), 1),
            income(d(2024, 1, 15), 2),
            income(d(2024, 2, 1), 3),
        ];
        let filter = DateRangeFilter::new(Some(d(2024, 1, 1)), Some(d(2024, 1, 15)));
        let filtered = filter_by_date_range(&txns, filter);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[1].date, d(2024, 1, 15));
    }

    #[test]
    fn group_by_category_considers_expenses_only() {
        let txns = vec![
            income(d(2024, 1, 1), 1000),
            expense(d(2024, 1, 2), 100, Category::Alimentacao),
        ];
        let groups = group_by_category(&txns);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, Category::Alimentacao);
        assert_eq!(groups[0].amount, Decimal::from(100));
        assert_eq!(groups[0].transaction_count, 1);
    }

    #[test]
    fn group_by_category_orders_by_amount_descending() {
        let txns = vec![
            expense(d(2024, 1, 1), 50, Category::Lazer),
            expense(d(2024, 1, 2), 300, Category::Moradia),
            expense(d(2024, 1, 3), 120, Category::Alimentacao),
        ];
        let groups = group_by_category(&txns);
        let order: Vec<Category> = groups.iter().map(|g| g.category).collect();
        assert_eq!(order, vec![Category::Moradia, Category::Alimentacao, Category::Lazer]);
    }

    #[test]
    fn group_by_category_percentages_sum_to_100() {
        let txns = vec![
            expense(d(2024, 1, 1), 333, Category::Lazer),
            expense(d(2024, 1, 2), 333, Category::Moradia),
            expense(d(2024, 1, 3), 334, Category::Alimentacao),
        ];
        let total: f64 = group_by_category(&txns).iter().map(|g| g.percentage).sum();
        assert!((total - 100.0).abs() < 1e-6, "sum was {total}");
    }

    #[test]
    fn group_by_category_missing_category_falls_back_to_outros() {
        let txns = vec![tx(d(2024, 1, 1), 10, TransactionType::Expense, None)];
        let groups = group_by_category(&txns);
        assert_eq!(groups[0].category, Category::Outros);
    }

    #[test]
    fn group_by_category_zero_total_means_zero_percentages() {
        let txns = vec![expense(d(2024, 1, 1), 0, Category::Lazer)];
        let groups = group_by_category(&txns);
        assert_eq!(groups[0].percentage, 0.0);
    }

    #[test]
    fn group_by_month_sorted_ascending_regardless_of_input_order() {
        let txns = vec![
            income(d(2024, 2, 10), 1500),
            expense(d(2024, 1, 20), 200, Category::Lazer),
            expense(d(2024, 2, 5), 300, Category::Lazer),
            income(d(2024, 1, 5), 1000),
        ];
        let months = group_by_month(&txns);
        assert_eq!(months.len(), 2);

        assert_eq!(months[0].month, "2024-01");
        assert_eq!(months[0].balance, Decimal::from(800));
        assert_eq!(months[0].transaction_count, 2);

        assert_eq!(months[1].month, "2024-02");
        assert_eq!(months[1].balance, Decimal::from(1200));
    }

    #[test]
    fn month_keys_zero_pad_the_month() {
        let months = group_by_month(&[income(d(2024, 3, 1), 1)]);
        assert_eq!(months[0].month, "2024-03");
    }

    #[test]
    fn top_categories_truncates() {
        let txns = vec![
            expense(d(2024, 1, 1), 5, Category::Lazer),
            expense(d(2024, 1, 1), 4, Category::Moradia),
            expense(d(2024, 1, 1), 3, Category::Saude),
        ];
        let top = top_categories(&txns, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].category, Category::Lazer);
        assert_eq!(top[1].category, Category::Moradia);
    }

    #[test]
    fn summarize_filtered_composes_filter_and_summary() {
        let txns = vec![income(d(2024, 1, 1), 100), income(d(2024, 2, 1), 200)];
        let filter = DateRangeFilter::new(Some(d(2024, 2, 1)), None);
        let summary = summarize_filtered(&txns, Some(filter));
        assert_eq!(summary.total_income, Decimal::from(200));
        assert_eq!(summary.transaction_count, 1);
    }

    #[test]
    fn summarize_filtered_without_filter_is_passthrough() {
        let txns = vec![income(d(2024, 1, 1), 100)];
        assert_eq!(summarize_filtered(&txns, None), summarize(&txns));
    }

    #[test]
    fn aggregation_does_not_mutate_input() {
        let txns = vec![expense(d(2024, 1, 1), 10, Category::Lazer)];
        let before = txns.clone();
        let _ = summarize(&txns);
        let _ = group_by_category(&txns);
        let _ = group_by_month(&txns);
        let _ = filter_by_date_range(&txns, DateRangeFilter::default());
        assert_eq!(txns, before);
    }
}
