use csv::StringRecord;
use extrato_classify::CategoryEngine;
use extrato_core::{BankSource, Transaction, TransactionType};
use rust_decimal::Decimal;

use crate::columns::{self, ColumnMap};
use crate::row::{fresh_id, parse_amount_brazilian, parse_br_date, RowError};

/// Inter export: `Data,Descrição,Valor` (accent optional). Dates are
/// `DD/MM/YYYY` with an ISO fallback; there is no type column, so direction
/// is inferred from the amount's sign.
pub struct InterParser<'a> {
    engine: &'a CategoryEngine,
    columns: ColumnMap,
}

impl<'a> InterParser<'a> {
    pub fn new(engine: &'a CategoryEngine, headers: &StringRecord) -> Self {
        InterParser {
            engine,
            columns: ColumnMap::new(headers),
        }
    }

    /// `Ok(None)` when a required field is absent or empty; `Err` when a
    /// present field is malformed.
    pub fn parse_row(&self, record: &StringRecord) -> Result<Option<Transaction>, RowError> {
        let (Some(date_str), Some(description), Some(amount_str)) = (
            self.columns.field(record, columns::DATE),
            self.columns.field(record, columns::DESCRIPTION),
            self.columns.field(record, columns::AMOUNT),
        ) else {
            return Ok(None);
        };

        let date =
            parse_br_date(date_str).ok_or_else(|| RowError::InvalidDate(date_str.to_string()))?;
        let raw_amount = parse_amount_brazilian(amount_str)?;

        let tx_type = if raw_amount >= Decimal::ZERO {
            TransactionType::Income
        } else {
            TransactionType::Expense
        };

        let categorization = self.engine.categorize(description);

        Ok(Some(Transaction {
            id: fresh_id(),
            date,
            description: description.to_string(),
            amount: raw_amount.abs(),
            tx_type,
            category: Some(categorization.category),
            source: BankSource::Inter,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use extrato_core::Category;

    fn parser_fixture() -> (CategoryEngine, StringRecord) {
        let engine = CategoryEngine::new();
        let headers = StringRecord::from(vec!["Data", "Descrição", "Valor"]);
        (engine, headers)
    }

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn parses_expense_from_negative_amount() {
        let (engine, headers) = parser_fixture();
        let parser = InterParser::new(&engine, &headers);
        let tx = parser
            .parse_row(&record(&["15/01/2024", "Uber Eats", "-50.00"]))
            .unwrap()
            .unwrap();

        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(tx.description, "Uber Eats");
        assert_eq!(tx.amount, Decimal::new(5000, 2));
        assert_eq!(tx.tx_type, TransactionType::Expense);
        assert_eq!(tx.category, Some(Category::Alimentacao));
        assert_eq!(tx.source, BankSource::Inter);
    }

    #[test]
    fn non_negative_amount_is_income() {
        let (engine, headers) = parser_fixture();
        let parser = InterParser::new(&engine, &headers);
        let tx = parser
            .parse_row(&record(&["15/01/2024", "Deposito", "1500,00"]))
            .unwrap()
            .unwrap();
        assert_eq!(tx.tx_type, TransactionType::Income);
        assert_eq!(tx.amount, Decimal::new(150000, 2));

        let zero = parser
            .parse_row(&record(&["15/01/2024", "Ajuste", "0"]))
            .unwrap()
            .unwrap();
        assert_eq!(zero.tx_type, TransactionType::Income);
    }

    #[test]
    fn brazilian_grouping_is_tolerated() {
        let (engine, headers) = parser_fixture();
        let parser = InterParser::new(&engine, &headers);
        let tx = parser
            .parse_row(&record(&["15/01/2024", "Aluguel", "-1.234,56"]))
            .unwrap()
            .unwrap();
        assert_eq!(tx.amount, Decimal::new(123456, 2));
    }

    #[test]
    fn iso_date_fallback_is_accepted() {
        let (engine, headers) = parser_fixture();
        let parser = InterParser::new(&engine, &headers);
        let tx = parser
            .parse_row(&record(&["2024-01-15", "Uber Eats", "-50.00"]))
            .unwrap()
            .unwrap();
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn unaccented_description_header_works() {
        let engine = CategoryEngine::new();
        let headers = StringRecord::from(vec!["data", "descricao", "valor"]);
        let parser = InterParser::new(&engine, &headers);
        let tx = parser
            .parse_row(&record(&["15/01/2024", "Cinema", "-30.00"]))
            .unwrap()
            .unwrap();
        assert_eq!(tx.category, Some(Category::Lazer));
    }

    #[test]
    fn missing_field_is_silent_skip() {
        let (engine, headers) = parser_fixture();
        let parser = InterParser::new(&engine, &headers);
        assert_eq!(parser.parse_row(&record(&["15/01/2024", "Uber Eats"])), Ok(None));
        assert_eq!(parser.parse_row(&record(&["", "Uber Eats", "-50.00"])), Ok(None));
    }

    #[test]
    fn malformed_date_and_amount_are_errors() {
        let (engine, headers) = parser_fixture();
        let parser = InterParser::new(&engine, &headers);
        assert_eq!(
            parser.parse_row(&record(&["not-a-date", "Uber Eats", "-50.00"])),
            Err(RowError::InvalidDate("not-a-date".to_string()))
        );
        assert_eq!(
            parser.parse_row(&record(&["15/01/2024", "Uber Eats", "R$ ??"])),
            Err(RowError::InvalidAmount("R$ ??".to_string()))
        );
    }
}
