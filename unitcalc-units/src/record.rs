//! A single directional conversion

use std::fmt;
use std::sync::Arc;

/// Pure numeric transformation applied by a conversion
pub type Transform = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Key a conversion is stored under: source symbol then target symbol,
/// no separator, case preserved.
pub fn pair_key(from: &str, to: &str) -> String {
    let mut key = String::with_capacity(from.len() + to.len());
    key.push_str(from);
    key.push_str(to);
    key
}

/// Immutable (transformation, description) pair registered under one pair key
#[derive(Clone)]
pub struct ConversionRecord {
    from: String,
    to: String,
    description: String,
    transform: Transform,
}

impl ConversionRecord {
    /// Create a conversion from an arbitrary pure function
    pub fn new<F>(from: &str, to: &str, description: &str, transform: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        ConversionRecord {
            from: from.to_string(),
            to: to.to_string(),
            description: description.to_string(),
            transform: Arc::new(transform),
        }
    }

    /// Create a proportional conversion (value * factor)
    pub fn scale(from: &str, to: &str, description: &str, factor: f64) -> Self {
        Self::new(from, to, description, move |x| x * factor)
    }

    pub fn from_unit(&self) -> &str {
        &self.from
    }

    pub fn to_unit(&self) -> &str {
        &self.to
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn key(&self) -> String {
        pair_key(&self.from, &self.to)
    }

    /// Apply the transformation. NaN and infinities propagate unchanged.
    pub fn apply(&self, value: f64) -> f64 {
        (self.transform)(value)
    }
}

impl fmt::Debug for ConversionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRecord")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ConversionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_concatenates() {
        assert_eq!(pair_key("m", "ft"), "mft");
        assert_eq!(pair_key("km", "nmi"), "kmnmi");
        assert_eq!(pair_key("F", "C"), "FC");
    }

    #[test]
    fn test_apply_function() {
        let rec = ConversionRecord::new("C", "K", "Celsius to Kelvin", |x| x + 273.15);
        assert_eq!(rec.apply(0.0), 273.15);
        assert_eq!(rec.key(), "CK");
        assert_eq!(rec.description(), "Celsius to Kelvin");
    }

    #[test]
    fn test_scale() {
        let rec = ConversionRecord::scale("ft", "m", "foot to meter", 0.3048);
        assert!((rec.apply(10.0) - 3.048).abs() < 1e-12);
    }

    #[test]
    fn test_nan_propagates() {
        let rec = ConversionRecord::scale("ft", "m", "foot to meter", 0.3048);
        assert!(rec.apply(f64::NAN).is_nan());
        assert_eq!(rec.apply(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_display() {
        let rec = ConversionRecord::scale("ft", "m", "foot to meter", 0.3048);
        assert_eq!(rec.to_string(), "ft -> m: foot to meter");
    }
}
