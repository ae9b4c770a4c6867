//! Result of evaluating one input line

use serde::{Deserialize, Serialize};

/// What a successful evaluation produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    /// Unit conversion: value expressed in the target unit
    Converted { value: f64, unit: String },
    /// Plain arithmetic result
    Value { value: f64 },
    /// Informational text (listings, help)
    Text { text: String },
}

impl Outcome {
    pub fn value(value: f64) -> Self {
        Outcome::Value { value }
    }

    pub fn converted(value: f64, unit: impl Into<String>) -> Self {
        Outcome::Converted { value, unit: unit.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Outcome::Text { text: text.into() }
    }

    /// Numeric part of the outcome, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Outcome::Value { value } | Outcome::Converted { value, .. } => Some(*value),
            Outcome::Text { .. } => None,
        }
    }

    pub fn unit(&self) -> Option<&str> {
        match self {
            Outcome::Converted { unit, .. } => Some(unit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let o = Outcome::converted(212.0, "F");
        assert_eq!(o.as_number(), Some(212.0));
        assert_eq!(o.unit(), Some("F"));

        let o = Outcome::value(14.0);
        assert_eq!(o.as_number(), Some(14.0));
        assert_eq!(o.unit(), None);

        assert_eq!(Outcome::text("hi").as_number(), None);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&Outcome::converted(0.0, "C")).unwrap();
        assert_eq!(json, r#"{"value":0.0,"unit":"C"}"#);

        let json = serde_json::to_string(&Outcome::value(14.0)).unwrap();
        assert_eq!(json, r#"{"value":14.0}"#);
    }
}
