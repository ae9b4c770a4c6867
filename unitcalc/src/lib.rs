//! unitcalc - arithmetic and unit conversion, one line at a time

mod dispatch;
mod expr;
mod render;

pub use dispatch::{classify, Command, Request, Span};
pub use expr::{evaluate, real_power, real_power_log_exp, square_root};
pub use render::{NumberFormat, OutputMode, Renderer};

pub use unitcalc_core::{CalcError, CalcResult, ErrorReport, Outcome, ParseError};
pub use unitcalc_units::{ConversionTable, Converted, STANDARD};

use std::sync::Arc;
use tracing::debug;

const HELP: &str = "\
Enter an arithmetic expression or a unit conversion.

  2 + 3 * 4            operators + - * / ^, parentheses, sqrt(...)
  100 C -> F           convert (arrow may also be '→' or 'to')
  Temp: 32 F -> C      restrict the lookup to one unit type

Commands:
  :units [type]        list known conversions
  :help                show this text
  :quit                leave";

/// Main evaluation engine
///
/// Holds only the shared, read-only conversion table, so one instance can
/// serve any number of threads.
#[derive(Debug, Clone)]
pub struct UnitCalc {
    table: Arc<ConversionTable>,
}

impl UnitCalc {
    pub fn new(table: ConversionTable) -> Self {
        Self::with_shared_table(Arc::new(table))
    }

    pub fn with_shared_table(table: Arc<ConversionTable>) -> Self {
        Self { table }
    }

    /// Engine over the global [`STANDARD`] table
    pub fn with_standard_table() -> Self {
        Self::with_shared_table(Arc::clone(&STANDARD))
    }

    pub fn table(&self) -> &ConversionTable {
        &self.table
    }

    /// Evaluate one input line
    pub fn eval_line(&self, line: &str) -> CalcResult<Outcome> {
        let request = classify(line)?;
        self.execute(request)
    }

    /// Execute an already classified line
    pub fn execute(&self, request: Request<'_>) -> CalcResult<Outcome> {
        match request {
            Request::Empty | Request::Command(Command::Quit) => Ok(Outcome::text("")),
            Request::Command(Command::Help) => Ok(Outcome::text(HELP)),
            Request::Command(Command::Units(category)) => self.list_units(category.as_deref()).map(Outcome::text),
            Request::Arithmetic(span) => {
                let value = evaluate(span.text).map_err(|e| e.offset(span.offset))?;
                Ok(Outcome::value(value))
            }
            Request::Conversion { category, expression, from, to } => {
                let value = evaluate(expression.text).map_err(|e| e.offset(expression.offset))?;
                debug!(value, from, to, category, "converting");
                self.convert(from, to, category, value).map(Outcome::from)
            }
        }
    }

    /// Convert `value` between two units, see [`unitcalc_units::resolve`]
    pub fn convert(&self, from: &str, to: &str, category: Option<&str>, value: f64) -> CalcResult<Converted> {
        self.table.resolve(from, to, category, value)
    }

    /// Listing of all conversions, or of one category
    pub fn list_units(&self, category: Option<&str>) -> CalcResult<String> {
        let names = match category {
            Some(name) => {
                self.table.category(name).ok_or_else(|| CalcError::unknown_category(name))?;
                vec![name]
            }
            None => self.table.categories(),
        };

        let mut out = String::new();
        for name in names {
            let Some(cat) = self.table.category(name) else { continue };
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(name);
            for (_, record) in cat.entries() {
                let pair = format!("{} -> {}", record.from_unit(), record.to_unit());
                out.push_str(&format!("\n  {:<12} {}", pair, record.description()));
            }
        }
        Ok(out)
    }

    pub fn help(&self) -> &'static str {
        HELP
    }
}

impl Default for UnitCalc {
    fn default() -> Self {
        Self::with_standard_table()
    }
}
