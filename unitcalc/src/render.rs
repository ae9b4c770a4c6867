//! Outcome renderer
//!
//! Turns evaluation results into the text the driver prints.

use serde_json::json;
use unitcalc_core::{CalcResult, Outcome};

/// Display format for numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    /// Shortest text that reads back to the same value (default)
    #[default]
    Shortest,
    /// Fixed decimal places
    Decimal(usize),
}

/// Output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    /// One JSON object per result
    Json,
}

/// Result renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    pub format: NumberFormat,
    pub mode: OutputMode,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Render a successful outcome or an error
    pub fn render(&self, result: &CalcResult<Outcome>) -> String {
        match self.mode {
            OutputMode::Text => self.render_text(result),
            OutputMode::Json => self.render_json(result),
        }
    }

    fn render_text(&self, result: &CalcResult<Outcome>) -> String {
        match result {
            Ok(Outcome::Value { value }) => self.render_number(*value),
            Ok(Outcome::Converted { value, unit }) => format!("{} {}", self.render_number(*value), unit),
            Ok(Outcome::Text { text }) => text.clone(),
            Err(e) => e.to_string(),
        }
    }

    fn render_json(&self, result: &CalcResult<Outcome>) -> String {
        let value = match result {
            Ok(outcome) => serde_json::to_value(outcome).unwrap_or_else(|e| json!({ "error": e.to_string() })),
            Err(e) => json!({ "error": e.report() }),
        };
        value.to_string()
    }

    /// Format a number. NaN and infinities print as `NaN`, `inf`, `-inf`.
    pub fn render_number(&self, value: f64) -> String {
        match self.format {
            _ if !value.is_finite() => value.to_string(),
            NumberFormat::Shortest => value.to_string(),
            NumberFormat::Decimal(places) => format!("{:.*}", places, value),
        }
    }
}
