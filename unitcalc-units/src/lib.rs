//! unitcalc units - compiled-in conversion table
//!
//! Conversions are stored two levels deep: category name, then the pair key
//! formed by concatenating source and target unit symbols ("FC", "mft").
//!
//! Categories:
//! - Temp (F, C, K)
//! - Length (m, km, ft, in, yd, mi, nmi)

mod record;
mod table;
mod resolve;
mod standard;

pub use record::{pair_key, ConversionRecord, Transform};
pub use table::{Category, ConversionTable};
pub use resolve::{resolve, Converted};
pub use standard::{standard_table, LENGTH, STANDARD, TEMP};
