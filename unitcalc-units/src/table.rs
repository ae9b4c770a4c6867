//! Two-level conversion table: category -> pair key -> record

use std::collections::HashMap;
use tracing::warn;
use unitcalc_core::CalcResult;

use crate::record::{pair_key, ConversionRecord};
use crate::resolve::{self, Converted};

/// Named group of conversions, e.g. "Temp" or "Length"
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    conversions: HashMap<String, ConversionRecord>,
}

impl Category {
    pub fn new(name: &str) -> Self {
        Category {
            name: name.to_string(),
            conversions: HashMap::new(),
        }
    }

    /// Add a conversion. A record with the same pair key replaces the old one.
    pub fn with_conversion(mut self, record: ConversionRecord) -> Self {
        let key = record.key();
        if self.conversions.insert(key.clone(), record).is_some() {
            warn!(category = %self.name, key = %key, "duplicate pair key replaced");
        }
        self
    }

    /// Add both directions of a proportional conversion.
    ///
    /// `unit -> base` multiplies by `factor`, `base -> unit` divides by it.
    pub fn with_linear(self, unit: &str, unit_name: &str, base: &str, base_name: &str, factor: f64) -> Self {
        self.with_conversion(ConversionRecord::scale(
            unit,
            base,
            &format!("{} to {}", unit_name, base_name),
            factor,
        ))
        .with_conversion(ConversionRecord::new(
            base,
            unit,
            &format!("{} to {}", base_name, unit_name),
            move |x| x / factor,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&ConversionRecord> {
        self.conversions.get(key)
    }

    /// Look up by unit symbols instead of a precomputed key
    pub fn lookup(&self, from: &str, to: &str) -> Option<&ConversionRecord> {
        self.get(&pair_key(from, to))
    }

    /// All (pair key, record) entries, sorted by key
    pub fn entries(&self) -> Vec<(&str, &ConversionRecord)> {
        let mut entries: Vec<_> = self.conversions
            .iter()
            .map(|(k, r)| (k.as_str(), r))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }
}

/// The complete set of supported conversions.
///
/// Built once through the `with_*` chain, then only read. Safe to share
/// across threads without locking.
#[derive(Debug, Clone, Default)]
pub struct ConversionTable {
    categories: HashMap<String, Category>,
}

impl ConversionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category. A category with the same name replaces the old one.
    pub fn with_category(mut self, category: Category) -> Self {
        let name = category.name.clone();
        if self.categories.insert(name.clone(), category).is_some() {
            warn!(category = %name, "duplicate category replaced");
        }
        self
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// Category names, sorted
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.categories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over categories in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    /// Total number of conversions across all categories
    pub fn len(&self) -> usize {
        self.categories.values().map(Category::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert `value` from `from` to `to`, see [`resolve::resolve`]
    pub fn resolve(&self, from: &str, to: &str, category: Option<&str>, value: f64) -> CalcResult<Converted> {
        resolve::resolve(self, from, to, category, value)
    }
}
