use std::fmt;

use serde::{Deserialize, Serialize};

/// A bank's export layout: column names, date format, amount convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Nubank,
    Inter,
    Unknown,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Nubank => write!(f, "nubank"),
            Dialect::Inter => write!(f, "inter"),
            Dialect::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classifies a CSV blob by its header line alone. Data rows are never
/// inspected. Column-name comparison is case-insensitive with quoting and
/// surrounding whitespace stripped.
///
/// The Nubank signature (data, descricao, valor, tipo) is checked before the
/// Inter signature (data, descrição/descricao, valor), so a header
/// satisfying both is routed to Nubank.
pub fn detect(csv_text: &str) -> Dialect {
    let Some(first_line) = csv_text.trim().lines().next() else {
        return Dialect::Unknown;
    };

    let columns: Vec<String> = first_line
        .to_lowercase()
        .split(',')
        .map(|c| c.trim().replace('"', ""))
        .collect();
    let has = |name: &str| columns.iter().any(|c| c == name);

    if has("data") && has("descricao") && has("valor") && has("tipo") {
        return Dialect::Nubank;
    }

    if has("data") && (has("descrição") || has("descricao")) && has("valor") {
        return Dialect::Inter;
    }

    Dialect::Unknown
}
