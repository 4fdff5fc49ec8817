use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Unknown numeral policy '{0}' (expected 'strict-integer' or 'decimal')")]
    UnknownPolicy(String),
}

/// Which captured numerals count as amounts.
///
/// `StrictInteger` keeps only numerals that are plain digit strings once the
/// thousands separators are removed, so `12.50` and `1,200.` are dropped.
/// `Decimal` also accepts a single decimal point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumeralPolicy {
    #[default]
    StrictInteger,
    Decimal,
}

impl NumeralPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumeralPolicy::StrictInteger => "strict-integer",
            NumeralPolicy::Decimal => "decimal",
        }
    }

    /// Parse a captured numeral such as `1,200`, or `None` if the policy rejects it.
    pub fn parse(&self, raw: &str) -> Option<f64> {
        let cleaned = raw.replace(',', "");
        let accepted = match self {
            NumeralPolicy::StrictInteger => {
                !cleaned.is_empty() && cleaned.bytes().all(|b| b.is_ascii_digit())
            }
            NumeralPolicy::Decimal => {
                cleaned.bytes().any(|b| b.is_ascii_digit())
                    && cleaned.bytes().filter(|&b| b == b'.').count() <= 1
                    && cleaned.bytes().all(|b| b.is_ascii_digit() || b == b'.')
            }
        };
        if !accepted {
            return None;
        }
        cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl FromStr for NumeralPolicy {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "strict-integer" | "strict" | "integer" => Ok(NumeralPolicy::StrictInteger),
            "decimal" | "numeric" => Ok(NumeralPolicy::Decimal),
            other => Err(ExtractionError::UnknownPolicy(other.to_string())),
        }
    }
}
