use csv::StringRecord;
use extrato_classify::CategoryEngine;
use extrato_core::Transaction;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detect::{detect, Dialect};
use crate::inter::InterParser;
use crate::nubank::NubankParser;

/// Progress is reported every this many rows.
const PROGRESS_INTERVAL: usize = 100;
/// Row count a "typical" export is assumed to have. The true total is
/// unknown until the pass ends, so intermediate percentages are estimates.
const ASSUMED_TOTAL_ROWS: f32 = 5000.0;
/// Intermediate reports never reach 100; only the terminal report does.
const PROGRESS_CEILING: f32 = 90.0;

/// Terminal artifact of one ingestion pass. Every offered row is either a
/// success (in `transactions`, input order) or counted in `skipped_rows`;
/// rows that failed with a structural error additionally leave an indexed
/// message in `errors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestionResult {
    pub transactions: Vec<Transaction>,
    pub errors: Vec<String>,
    pub skipped_rows: usize,
    pub total_rows: usize,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unrecognized export format: header matches no known bank dialect")]
    UnknownDialect,
}

enum RowParser<'a> {
    Nubank(NubankParser<'a>),
    Inter(InterParser<'a>),
}

impl RowParser<'_> {
    fn parse_row(
        &self,
        record: &StringRecord,
    ) -> Result<Option<Transaction>, crate::row::RowError> {
        match self {
            RowParser::Nubank(p) => p.parse_row(record),
            RowParser::Inter(p) => p.parse_row(record),
        }
    }
}

/// Single-pass ingestion orchestrator. Borrows the categorization engine so
/// one engine (and its registered keywords) serves any number of files.
pub struct Ingestor<'a> {
    engine: &'a CategoryEngine,
}

impl<'a> Ingestor<'a> {
    pub fn new(engine: &'a CategoryEngine) -> Self {
        Ingestor { engine }
    }

    pub fn ingest(&self, csv_text: &str) -> Result<IngestionResult, IngestError> {
        self.ingest_with_progress(csv_text, |_| {})
    }

    /// Streams rows through the dialect-appropriate parser. `on_progress`
    /// receives values in [0, 100], monotonically non-decreasing, and is
    /// called with exactly 100 once when the pass completes.
    ///
    /// One bad row never aborts the run; an unrecognized header or an
    /// undecodable stream does, with nothing partial returned.
    pub fn ingest_with_progress<F>(
        &self,
        csv_text: &str,
        mut on_progress: F,
    ) -> Result<IngestionResult, IngestError>
    where
        F: FnMut(f32),
    {
        let dialect = detect(csv_text);
        tracing::debug!(%dialect, "detected export dialect");

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_text.as_bytes());
        let headers = reader.headers()?.clone();

        let parser = match dialect {
            Dialect::Nubank => RowParser::Nubank(NubankParser::new(self.engine, &headers)),
            Dialect::Inter => RowParser::Inter(InterParser::new(self.engine, &headers)),
            Dialect::Unknown => return Err(IngestError::UnknownDialect),
        };

        let mut result = IngestionResult::default();

        for record in reader.records() {
            let record = record?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            result.total_rows += 1;

            match parser.parse_row(&record) {
                Ok(Some(tx)) => result.transactions.push(tx),
                Ok(None) => {
                    result.skipped_rows += 1;
                    tracing::debug!(row = result.total_rows, "skipped row with missing fields");
                }
                Err(err) => {
                    result.skipped_rows += 1;
                    tracing::warn!(row = result.total_rows, error = %err, "skipped malformed row");
                    result.errors.push(format!("Row {}: {err}", result.total_rows));
                }
            }

            if result.total_rows % PROGRESS_INTERVAL == 0 {
                let estimate = result.total_rows as f32 / ASSUMED_TOTAL_ROWS * 100.0;
                on_progress(estimate.min(PROGRESS_CEILING));
            }
        }

        on_progress(100.0);

        tracing::info!(
            total = result.total_rows,
            imported = result.transactions.len(),
            skipped = result.skipped_rows,
            "ingestion pass complete"
        );

        Ok(result)
    }
}
