//! Resolve a unit pair against the table and apply the conversion

use serde::{Deserialize, Serialize};
use tracing::debug;
use unitcalc_core::{CalcError, CalcResult, Outcome};

use crate::record::{pair_key, ConversionRecord};
use crate::table::ConversionTable;

/// A converted value and the unit it is now expressed in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Converted {
    pub value: f64,
    pub unit: String,
}

impl From<Converted> for Outcome {
    fn from(c: Converted) -> Self {
        Outcome::Converted { value: c.value, unit: c.unit }
    }
}

/// Convert `value` from unit `from` to unit `to`.
///
/// With a category hint only that category is searched. Without one every
/// category is scanned and the pair must match exactly once: a pair found in
/// several categories is rejected, never tie-broken.
pub fn resolve(
    table: &ConversionTable,
    from: &str,
    to: &str,
    category: Option<&str>,
    value: f64,
) -> CalcResult<Converted> {
    let key = pair_key(from, to);

    let record = match category {
        Some(name) => {
            let cat = table.category(name)
                .ok_or_else(|| CalcError::unknown_category(name))?;
            cat.get(&key)
                .ok_or_else(|| CalcError::no_conversion_in(name, from, to))?
        }
        None => scan_all(table, &key, from, to)?,
    };

    let converted = record.apply(value);
    debug!(key = %key, input = value, output = converted, "{}", record.description());

    Ok(Converted {
        value: converted,
        unit: to.to_string(),
    })
}

fn scan_all<'t>(table: &'t ConversionTable, key: &str, from: &str, to: &str) -> CalcResult<&'t ConversionRecord> {
    let mut matches: Vec<(&str, &ConversionRecord)> = Vec::new();
    for category in table.iter() {
        if let Some(record) = category.get(key) {
            matches.push((category.name(), record));
        }
    }

    match matches.as_slice() {
        [] => Err(CalcError::no_conversion(from, to)),
        [(name, record)] => {
            debug!(key = %key, category = %name, "unique match");
            Ok(*record)
        }
        _ => {
            let mut categories: Vec<String> = matches.iter().map(|(n, _)| n.to_string()).collect();
            categories.sort();
            debug!(key = %key, ?categories, "ambiguous pair key");
            Err(CalcError::AmbiguousConversion {
                from: from.to_string(),
                to: to.to_string(),
                categories,
            })
        }
    }
}
