use std::collections::{BTreeMap, HashSet};

use extrato_core::Category;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalize::normalize;
use crate::table::default_table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Partial,
    None,
}

/// Outcome of classifying one description. Produced fresh per call; the
/// engine keeps no per-result state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizationResult {
    pub category: Category,
    /// Heuristic score in [0, 100], not a probability.
    pub confidence: f32,
    pub matched_keyword: Option<String>,
    pub match_type: MatchType,
}

impl CategorizationResult {
    fn none() -> Self {
        CategorizationResult {
            category: Category::fallback(),
            confidence: 0.0,
            matched_keyword: None,
            match_type: MatchType::None,
        }
    }
}

/// Scoring constants for partial matches. Policy, not law: longer keywords
/// are treated as more trustworthy, capped below the exact-match score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidencePolicy {
    pub partial_base: f32,
    pub per_char_bonus: f32,
    pub partial_bonus_cap: f32,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        ConfidencePolicy {
            partial_base: 60.0,
            per_char_bonus: 2.0,
            partial_bonus_cap: 35.0,
        }
    }
}

impl ConfidencePolicy {
    fn partial(&self, keyword_len: usize) -> f32 {
        self.partial_base + (keyword_len as f32 * self.per_char_bonus).min(self.partial_bonus_cap)
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to parse keyword table: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Keyword-based categorization engine. Owns its keyword table outright —
/// callers construct one and pass it where classification is needed; there
/// is no process-global table. Mutation happens only through
/// [`CategoryEngine::register_keyword`], and the engine provides no internal
/// locking: concurrent writers need external serialization.
pub struct CategoryEngine {
    keywords: BTreeMap<Category, Vec<String>>,
    /// Derived index for O(1) exact-match lookup per category.
    exact: BTreeMap<Category, HashSet<String>>,
    policy: ConfidencePolicy,
}

impl Default for CategoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryEngine {
    /// Engine loaded with the built-in Brazilian keyword table.
    pub fn new() -> Self {
        Self::from_table(default_table())
    }

    /// Engine loaded from a TOML document of the shape
    /// `Transporte = ["uber", "taxi"]`, one key per category. Categories
    /// absent from the document start with empty keyword lists. Keywords
    /// are normalized on load, so accented spellings are accepted.
    pub fn from_toml(doc: &str) -> Result<Self, TableError> {
        let raw: BTreeMap<Category, Vec<String>> = toml::from_str(doc)?;
        Ok(Self::from_table(raw))
    }

    pub fn with_policy(mut self, policy: ConfidencePolicy) -> Self {
        self.policy = policy;
        self
    }

    fn from_table(raw: BTreeMap<Category, Vec<String>>) -> Self {
        let mut keywords: BTreeMap<Category, Vec<String>> = extrato_core::ALL_CATEGORIES
            .into_iter()
            .map(|c| (c, Vec::new()))
            .collect();
        for (category, list) in raw {
            let normalized: Vec<String> = list
                .iter()
                .map(|k| normalize(k))
                .filter(|k| !k.is_empty())
                .collect();
            keywords.insert(category, normalized);
        }
        let exact = keywords
            .iter()
            .map(|(category, list)| (*category, list.iter().cloned().collect()))
            .collect();
        CategoryEngine {
            keywords,
            exact,
            policy: ConfidencePolicy::default(),
        }
    }

    /// Classifies a description. Exact matches (normalized text equals a
    /// keyword) beat partial matches (keyword occurs as a substring); within
    /// the same match type the longer keyword wins, then the fixed category
    /// priority breaks remaining ties.
    pub fn categorize(&self, description: &str) -> CategorizationResult {
        let normalized = normalize(description);
        if normalized.is_empty() {
            return CategorizationResult::none();
        }

        let mut candidates: Vec<(Category, MatchType, &str)> = Vec::new();

        for (category, set) in &self.exact {
            if set.contains(&normalized) {
                candidates.push((*category, MatchType::Exact, normalized.as_str()));
            }
        }

        if candidates.is_empty() {
            for (category, list) in &self.keywords {
                for keyword in list {
                    if normalized.contains(keyword.as_str()) {
                        candidates.push((*category, MatchType::Partial, keyword.as_str()));
                    }
                }
            }
        }

        candidates.sort_by(|a, b| {
            let type_rank = |t: MatchType| match t {
                MatchType::Exact => 0u8,
                _ => 1,
            };
            type_rank(a.1)
                .cmp(&type_rank(b.1))
                .then(b.2.len().cmp(&a.2.len()))
                .then(b.0.priority().cmp(&a.0.priority()))
        });

        match candidates.first() {
            Some(&(category, match_type, keyword)) => {
                let confidence = match match_type {
                    MatchType::Exact => 100.0,
                    MatchType::Partial => self.policy.partial(keyword.len()),
                    MatchType::None => 0.0,
                };
                CategorizationResult {
                    category,
                    confidence,
                    matched_keyword: Some(keyword.to_string()),
                    match_type,
                }
            }
            None => CategorizationResult::none(),
        }
    }

    /// Element-wise [`categorize`](Self::categorize); input order preserved.
    pub fn categorize_batch<S: AsRef<str>>(&self, descriptions: &[S]) -> Vec<CategorizationResult> {
        descriptions
            .iter()
            .map(|d| self.categorize(d.as_ref()))
            .collect()
    }

    /// Appends a keyword to a category. Takes effect on subsequent
    /// `categorize` calls only; results already produced are untouched.
    /// Blank keywords are ignored (an empty string is a substring of
    /// everything).
    pub fn register_keyword(&mut self, category: Category, keyword: &str) {
        let normalized = normalize(keyword);
        if normalized.is_empty() {
            return;
        }
        self.exact
            .entry(category)
            .or_default()
            .insert(normalized.clone());
        self.keywords.entry(category).or_default().push(normalized);
    }

    /// Snapshot of one category's keyword list.
    pub fn keywords(&self, category: Category) -> Vec<String> {
        self.keywords.get(&category).cloned().unwrap_or_default()
    }

    /// Snapshot of the whole table. Mutating the returned map does not
    /// affect the engine.
    pub fn all_mappings(&self) -> BTreeMap<Category, Vec<String>> {
        self.keywords.clone()
    }
}
