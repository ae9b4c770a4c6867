//! unitcalc core types
//!
//! Shared by every unitcalc crate:
//! - `CalcError` / `ParseError`: the error taxonomy, returned as values
//! - `Outcome`: what one evaluated line produced

mod error;
mod outcome;

pub use error::{codes, CalcError, ErrorReport, ParseError};
pub use outcome::Outcome;

/// Result alias used across the workspace
pub type CalcResult<T> = Result<T, CalcError>;

/// Re-export common types
pub mod prelude {
    pub use crate::{CalcError, CalcResult, Outcome, ParseError};
}
