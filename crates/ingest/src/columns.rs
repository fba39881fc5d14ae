use std::collections::HashMap;

use csv::StringRecord;

/// Accepted header spellings for each logical field, tried in order.
/// Exports are inconsistent about accents, so both variants are listed.
pub(crate) const DATE: &[&str] = &["data"];
pub(crate) const DESCRIPTION: &[&str] = &["descricao", "descrição"];
pub(crate) const AMOUNT: &[&str] = &["valor"];
pub(crate) const TYPE: &[&str] = &["tipo"];

/// Resolves logical fields against a header row once, so row parsing is a
/// plain index lookup.
pub(crate) struct ColumnMap {
    by_name: HashMap<String, usize>,
}

impl ColumnMap {
    pub fn new(headers: &StringRecord) -> Self {
        let by_name = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_lowercase(), idx))
            .collect();
        ColumnMap { by_name }
    }

    pub fn resolve(&self, synonyms: &[&str]) -> Option<usize> {
        synonyms
            .iter()
            .find_map(|name| self.by_name.get(*name).copied())
    }

    /// Returns the trimmed field value, or `None` when the column is absent
    /// or the cell is empty. Empty cells and missing columns are equivalent
    /// to the row parsers.
    pub fn field<'r>(&self, record: &'r StringRecord, synonyms: &[&str]) -> Option<&'r str> {
        self.resolve(synonyms)
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}
