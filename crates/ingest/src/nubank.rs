use csv::StringRecord;
use extrato_classify::CategoryEngine;
use extrato_core::{BankSource, Transaction, TransactionType};

use crate::columns::{self, ColumnMap};
use crate::row::{fresh_id, parse_amount_comma_or_dot, parse_iso_date, RowError};

/// Nubank export: `data,descricao,valor,tipo`. Dates are `YYYY-MM-DD`;
/// amounts carry a sign but direction is taken from the `tipo` column alone.
pub struct NubankParser<'a> {
    engine: &'a CategoryEngine,
    columns: ColumnMap,
}

impl<'a> NubankParser<'a> {
    pub fn new(engine: &'a CategoryEngine, headers: &StringRecord) -> Self {
        NubankParser {
            engine,
            columns: ColumnMap::new(headers),
        }
    }

    /// `Ok(None)` when a required field is absent or empty; `Err` when a
    /// present field is malformed.
    pub fn parse_row(&self, record: &StringRecord) -> Result<Option<Transaction>, RowError> {
        let (Some(date_str), Some(description), Some(amount_str), Some(tipo)) = (
            self.columns.field(record, columns::DATE),
            self.columns.field(record, columns::DESCRIPTION),
            self.columns.field(record, columns::AMOUNT),
            self.columns.field(record, columns::TYPE),
        ) else {
            return Ok(None);
        };

        let date =
            parse_iso_date(date_str).ok_or_else(|| RowError::InvalidDate(date_str.to_string()))?;
        let amount = parse_amount_comma_or_dot(amount_str)?;

        let tx_type = if tipo.eq_ignore_ascii_case("receita") {
            TransactionType::Income
        } else {
            TransactionType::Expense
        };

        let categorization = self.engine.categorize(description);

        Ok(Some(Transaction {
            id: fresh_id(),
            date,
            description: description.to_string(),
            amount: amount.abs(),
            tx_type,
            category: Some(categorization.category),
            source: BankSource::Nubank,
        }))
    }
}
