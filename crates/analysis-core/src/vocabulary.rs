//! Keyword tables used by the sentiment and qualitative risk checks.
//!
//! Matching is plain substring containment over lowercased text, so
//! "risking" contains "risk" and "nonprofit" contains "profit".

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::AnalysisError;

pub const POSITIVE_SENTIMENT: &[&str] = &[
    "growth", "expansion", "profit", "strong", "increase", "positive",
];

pub const NEGATIVE_SENTIMENT: &[&str] = &[
    "loss", "decline", "risk", "decrease", "negative", "litigation",
];

pub const MARKET_RISK: &[&str] = &[
    "competition", "inflation", "recession", "regulation", "currency", "volatility",
];

pub const OPERATIONAL_RISK: &[&str] = &[
    "lawsuit", "litigation", "supply chain", "strike", "fraud", "management failure",
];

pub const NEGATIVE_SIGNALS: &[&str] = &[
    "loss", "decline", "uncertain", "risk", "default", "bankruptcy", "crisis",
];

/// A named, ordered list of lowercase keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTable {
    /// Defaults to the vocabulary field the table was loaded into.
    #[serde(default)]
    pub category: String,
    pub keywords: Vec<String>,
}

impl KeywordTable {
    pub fn new(category: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            category: category.into(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Total occurrences of every keyword in `lowered`, with repetition.
    pub fn count_occurrences(&self, lowered: &str) -> usize {
        self.keywords
            .iter()
            .map(|k| lowered.matches(k.as_str()).count())
            .sum()
    }

    /// Keywords present at least once in `lowered`, in table order.
    pub fn matches_in<'a>(&'a self, lowered: &str) -> Vec<&'a str> {
        self.keywords
            .iter()
            .filter(|k| lowered.contains(k.as_str()))
            .map(String::as_str)
            .collect()
    }

    fn validate(&mut self, field: &str) -> Result<(), AnalysisError> {
        if self.category.trim().is_empty() {
            self.category = field.to_string();
        }
        if self.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(AnalysisError::InvalidData(format!(
                "keyword table '{}' contains an empty keyword",
                self.category
            )));
        }
        for keyword in &mut self.keywords {
            *keyword = keyword.to_lowercase();
        }
        Ok(())
    }
}

/// Every keyword table the engines consult.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub positive_sentiment: KeywordTable,
    pub negative_sentiment: KeywordTable,
    pub market_risk: KeywordTable,
    pub operational_risk: KeywordTable,
    pub negative_signals: KeywordTable,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            positive_sentiment: KeywordTable::new("positive_sentiment", POSITIVE_SENTIMENT),
            negative_sentiment: KeywordTable::new("negative_sentiment", NEGATIVE_SENTIMENT),
            market_risk: KeywordTable::new("market_risk", MARKET_RISK),
            operational_risk: KeywordTable::new("operational_risk", OPERATIONAL_RISK),
            negative_signals: KeywordTable::new("negative_signals", NEGATIVE_SIGNALS),
        }
    }
}

impl Vocabulary {
    /// Parse a JSON vocabulary. Tables missing from the document keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, AnalysisError> {
        let mut vocabulary: Vocabulary = serde_json::from_str(json)?;
        for (field, table) in vocabulary.tables_mut() {
            table.validate(field)?;
        }
        Ok(vocabulary)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn tables_mut(&mut self) -> [(&'static str, &mut KeywordTable); 5] {
        [
            ("positive_sentiment", &mut self.positive_sentiment),
            ("negative_sentiment", &mut self.negative_sentiment),
            ("market_risk", &mut self.market_risk),
            ("operational_risk", &mut self.operational_risk),
            ("negative_signals", &mut self.negative_signals),
        ]
    }
}
