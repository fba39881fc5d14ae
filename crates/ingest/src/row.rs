use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Malformed-but-present field values. Absent fields are not errors; they
/// surface as `Ok(None)` from the row parsers instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("Invalid date format: {0}")]
    InvalidDate(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

fn iso_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"))
}

fn br_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("valid regex"))
}

/// Strict `YYYY-MM-DD`. The shape check comes first so that loose inputs
/// chrono would accept (single-digit months, trailing text) are rejected.
pub(crate) fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !iso_date_re().is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Brazilian `DD/MM/YYYY`, falling back to `YYYY-MM-DD` for exports that
/// ship ISO dates under the same header.
pub(crate) fn parse_br_date(value: &str) -> Option<NaiveDate> {
    if br_date_re().is_match(value) {
        if let Ok(date) = NaiveDate::parse_from_str(value, "%d/%m/%Y") {
            return Some(date);
        }
    }
    parse_iso_date(value)
}

/// Signed decimal with either comma or dot as the decimal separator
/// ("-50.00", "-50,00"). Sign handling is the caller's concern.
pub(crate) fn parse_amount_comma_or_dot(value: &str) -> Result<Decimal, RowError> {
    Decimal::from_str(&value.replacen(',', ".", 1))
        .map_err(|_| RowError::InvalidAmount(value.to_string()))
}

/// Brazilian convention: when a comma is present it is the decimal
/// separator and dots are thousands grouping ("1.234,56"); otherwise the
/// value is a plain dot-decimal.
pub(crate) fn parse_amount_brazilian(value: &str) -> Result<Decimal, RowError> {
    let cleaned = if value.contains(',') {
        value.replace('.', "").replacen(',', ".", 1)
    } else {
        value.to_string()
    };
    Decimal::from_str(&cleaned).map_err(|_| RowError::InvalidAmount(value.to_string()))
}

/// Opaque per-record id; v4 UUIDs make collisions within a run a non-issue.
pub(crate) fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}
