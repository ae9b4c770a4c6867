//! The compiled-in conversion table

use std::sync::{Arc, LazyLock};

use crate::record::ConversionRecord;
use crate::table::{Category, ConversionTable};

pub const TEMP: &str = "Temp";
pub const LENGTH: &str = "Length";

/// Global conversion table, built on first use and shared by every engine
pub static STANDARD: LazyLock<Arc<ConversionTable>> = LazyLock::new(|| Arc::new(standard_table()));

/// Build the standard table: temperature and length conversions
pub fn standard_table() -> ConversionTable {
    ConversionTable::new()
        .with_category(temperature())
        .with_category(length())
}

fn temperature() -> Category {
    Category::new(TEMP)
        .with_conversion(ConversionRecord::new("F", "C", "Fahrenheit to Celsius", |x| (x - 32.0) * 5.0 / 9.0))
        .with_conversion(ConversionRecord::new("C", "F", "Celsius to Fahrenheit", |x| x * 9.0 / 5.0 + 32.0))
        .with_conversion(ConversionRecord::new("C", "K", "Celsius to Kelvin", |x| x + 273.15))
        .with_conversion(ConversionRecord::new("K", "C", "Kelvin to Celsius", |x| x - 273.15))
        .with_conversion(ConversionRecord::new("F", "K", "Fahrenheit to Kelvin", |x| (x + 459.67) * 5.0 / 9.0))
        .with_conversion(ConversionRecord::new("K", "F", "Kelvin to Fahrenheit", |x| x * 9.0 / 5.0 - 459.67))
}

fn length() -> Category {
    // Factors are the size of the first unit expressed in the second
    Category::new(LENGTH)
        .with_linear("ft", "foot", "m", "meter", 0.3048)
        .with_linear("in", "inch", "m", "meter", 0.0254)
        .with_linear("mi", "mile", "m", "meter", 1609.344)
        .with_linear("mi", "mile", "km", "kilometer", 1.609344)
        .with_linear("yd", "yard", "m", "meter", 0.9144)
        .with_linear("nmi", "nautical mile", "m", "meter", 1852.0)
        .with_linear("nmi", "nautical mile", "km", "kilometer", 1.852)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LENGTH_PAIRS: [(&str, &str); 7] = [
        ("m", "ft"),
        ("m", "in"),
        ("m", "mi"),
        ("km", "mi"),
        ("m", "yd"),
        ("m", "nmi"),
        ("km", "nmi"),
    ];

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_temperature_keys() {
        let temp = STANDARD.category(TEMP).unwrap();
        let keys: Vec<&str> = temp.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["CF", "CK", "FC", "FK", "KC", "KF"]);
    }

    #[test]
    fn test_length_keys() {
        let length = STANDARD.category(LENGTH).unwrap();
        assert_eq!(length.len(), 14);
        for key in ["mft", "ftm", "min", "inm", "mmi", "mim", "kmmi", "mikm",
                    "myd", "ydm", "mnmi", "nmim", "kmnmi", "nmikm"] {
            assert!(length.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_no_pair_key_shared_between_categories() {
        let temp = STANDARD.category(TEMP).unwrap();
        let length = STANDARD.category(LENGTH).unwrap();
        for (key, _) in temp.entries() {
            assert!(length.get(key).is_none(), "{} in both", key);
        }
    }

    #[test]
    fn test_length_factors() {
        let length = STANDARD.category(LENGTH).unwrap();
        assert!(close(length.lookup("ft", "m").unwrap().apply(1.0), 0.3048));
        assert!(close(length.lookup("in", "m").unwrap().apply(1.0), 0.0254));
        assert!(close(length.lookup("mi", "m").unwrap().apply(1.0), 1609.344));
        assert!(close(length.lookup("mi", "km").unwrap().apply(1.0), 1.609344));
        assert!(close(length.lookup("yd", "m").unwrap().apply(1.0), 0.9144));
        assert!(close(length.lookup("nmi", "m").unwrap().apply(1.0), 1852.0));
        assert!(close(length.lookup("nmi", "km").unwrap().apply(1.0), 1.852));
        assert!(close(length.lookup("km", "nmi").unwrap().apply(1.852), 1.0));
    }

    #[test]
    fn test_length_round_trip_representative_values() {
        for (a, b) in LENGTH_PAIRS {
            for v in [0.0, 1.0, 100.0, -50.0, 3.14159] {
                let there = STANDARD.resolve(a, b, Some(LENGTH), v).unwrap();
                let back = STANDARD.resolve(b, a, Some(LENGTH), there.value).unwrap();
                assert!(close(back.value, v), "{}->{}->{} for {}: {}", a, b, a, v, back.value);
                assert_eq!(back.unit, a);
            }
        }
    }

    #[test]
    fn test_temperature_fixed_points() {
        assert_eq!(STANDARD.resolve("F", "C", None, -40.0).unwrap().value, -40.0);
        assert_eq!(STANDARD.resolve("C", "F", None, -40.0).unwrap().value, -40.0);
        assert!(close(STANDARD.resolve("K", "F", None, 0.0).unwrap().value, -459.67));
    }

    proptest! {
        #[test]
        fn prop_resolve_matches_recorded_transform(v in -1.0e9f64..1.0e9) {
            for name in STANDARD.categories() {
                let category = STANDARD.category(name).unwrap();
                for (_, record) in category.entries() {
                    let converted = STANDARD
                        .resolve(record.from_unit(), record.to_unit(), Some(name), v)
                        .unwrap();
                    prop_assert_eq!(converted.value, record.apply(v));
                    prop_assert_eq!(converted.unit.as_str(), record.to_unit());
                }
            }
        }

        #[test]
        fn prop_length_round_trip(v in -1.0e6f64..1.0e6) {
            for (a, b) in LENGTH_PAIRS {
                let there = STANDARD.resolve(a, b, Some(LENGTH), v).unwrap();
                let back = STANDARD.resolve(b, a, Some(LENGTH), there.value).unwrap();
                prop_assert!(close(back.value, v));
            }
        }

        #[test]
        fn prop_unhinted_matches_hinted(v in -1.0e6f64..1.0e6) {
            // No pair key is shared, so the scan always finds the same record
            for name in STANDARD.categories() {
                for (_, record) in STANDARD.category(name).unwrap().entries() {
                    let hinted = STANDARD.resolve(record.from_unit(), record.to_unit(), Some(name), v).unwrap();
                    let scanned = STANDARD.resolve(record.from_unit(), record.to_unit(), None, v).unwrap();
                    prop_assert_eq!(hinted, scanned);
                }
            }
        }
    }
}
