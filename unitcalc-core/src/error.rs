//! Structured errors
//!
//! Errors never end the session. Each one is local to the line that produced
//! it and is handed back to the driver as a value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const NO_CONVERSION: &str = "NO_CONVERSION";
    pub const AMBIGUOUS_CONVERSION: &str = "AMBIGUOUS_CONVERSION";
}

/// Malformed input text
///
/// `position` is a 0-based character offset into the line that was
/// evaluated, so a caret can be drawn under the offending spot.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Parse error at position {position}: expected {expected}, found {found}")]
pub struct ParseError {
    pub position: usize,
    pub expected: String,
    pub found: String,
}

impl ParseError {
    pub fn new(position: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            position,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Error for input that stopped before the parser was satisfied
    pub fn end_of_input(position: usize, expected: impl Into<String>) -> Self {
        Self::new(position, expected, "end of input")
    }

    /// Shift the position by `offset` characters.
    ///
    /// Used when a sub-slice of a line was parsed on its own.
    pub fn offset(mut self, offset: usize) -> Self {
        self.position += offset;
        self
    }
}

/// Every way a single evaluation can fail
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Don't know unit {0}!")]
    UnknownCategory(String),

    #[error("{}No unit conversion known for {from} to {to}!", category_prefix(.category))]
    NoConversionFound {
        category: Option<String>,
        from: String,
        to: String,
    },

    #[error("More than one unit conversion matched.\nConsider disambiguating with an explicit unit type.")]
    AmbiguousConversion {
        from: String,
        to: String,
        /// Categories that all define the requested pair
        categories: Vec<String>,
    },
}

fn category_prefix(category: &Option<String>) -> String {
    match category {
        Some(name) => format!("In {} :: ", name),
        None => String::new(),
    }
}

impl CalcError {
    pub fn no_conversion(from: &str, to: &str) -> Self {
        CalcError::NoConversionFound {
            category: None,
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn no_conversion_in(category: &str, from: &str, to: &str) -> Self {
        CalcError::NoConversionFound {
            category: Some(category.to_string()),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn unknown_category(name: &str) -> Self {
        CalcError::UnknownCategory(name.to_string())
    }

    /// Machine-readable code, see [`codes`]
    pub fn code(&self) -> &'static str {
        match self {
            CalcError::Parse(_) => codes::PARSE_ERROR,
            CalcError::UnknownCategory(_) => codes::UNKNOWN_CATEGORY,
            CalcError::NoConversionFound { .. } => codes::NO_CONVERSION,
            CalcError::AmbiguousConversion { .. } => codes::AMBIGUOUS_CONVERSION,
        }
    }

    /// Hint for fixing the input, if there is a useful one
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CalcError::Parse(_) => Some("Check expression syntax".to_string()),
            CalcError::UnknownCategory(_) => Some("Use :units to list known unit types".to_string()),
            CalcError::NoConversionFound { category: Some(name), .. } => {
                Some(format!("Use :units {} to list its conversions", name))
            }
            CalcError::NoConversionFound { category: None, .. } => {
                Some("Use :units to list available conversions".to_string())
            }
            CalcError::AmbiguousConversion { categories, .. } => Some(format!(
                "Prefix the line with one of: {}",
                categories.iter().map(|c| format!("{}:", c)).collect::<Vec<_>>().join(", ")
            )),
        }
    }

    /// Serializable snapshot of this error
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code().to_string(),
            message: self.to_string(),
            suggestion: self.suggestion(),
            position: match self {
                CalcError::Parse(e) => Some(e.position),
                _ => None,
            },
        }
    }
}

/// Structured error for machine consumers (JSON output)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}
