//! Value/unit parsing
//!
//! Light-weight helper for splitting strings like "30 km/h" into a
//! numeric value and a unit.

use regex::Regex;
use std::sync::OnceLock;

/// A parsed numeric value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Int(i64),
    Float(f64),
}

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+(\.\d+)?").expect("literal pattern compiles"))
}

/// Split a string into a numeric value and a unit.
///
/// The first digit run (optionally with a decimal part) becomes the
/// value; what follows it, trimmed of separators and trailing periods,
/// becomes the unit. A string that looks numeric but fails to convert
/// yields no value, never an error.
pub fn parse_value_and_unit(text: &str) -> (Option<NumericValue>, Option<String>) {
    let Some(found) = number_pattern().find(text) else {
        return (None, None);
    };

    let raw = found.as_str();
    let value = if raw.contains('.') {
        raw.parse::<f64>().ok().map(NumericValue::Float)
    } else {
        raw.parse::<i64>().ok().map(NumericValue::Int)
    };

    let unit = text[found.end()..]
        .trim()
        .trim_start_matches(&['/', ' '][..])
        .trim_end_matches('.')
        .trim();
    let unit = (!unit.is_empty()).then(|| unit.to_string());

    (value, unit)
}
