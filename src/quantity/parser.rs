//! Quantity parsing and formatting
//!
//! Splits grocery lines like "2 bananen" into a count and a base name, and
//! formats counts back for display.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Decimal separator used when formatting quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecimalSeparator {
    Period,
    #[default]
    Comma,
}

impl DecimalSeparator {
    /// Parse from a config string, defaulting to Comma for unknown values
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "period" | "point" | "." => DecimalSeparator::Period,
            _ => DecimalSeparator::Comma,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DecimalSeparator::Period => "period",
            DecimalSeparator::Comma => "comma",
        }
    }
}

/// An item name split into an optional quantity and its base
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedItem {
    pub qty: Option<f64>,
    pub base: String,
}

static QUANTITY_PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: "2 bananen", "1,5 kg bloem" (number, whitespace, rest)
    Regex::new(r"^(\d+(?:[.,]\d+)?)\s+(.+)$").ok()
});

/// Split an item name into a leading quantity and its base name.
///
/// The base is always lowercased and trimmed so the same product compares
/// equal however it was typed; a comma counts as a decimal point. Names
/// without a leading number come back whole with `qty: None`.
pub fn parse_quantity(text: &str) -> ParsedItem {
    let trimmed = text.trim();

    if let Some(re) = QUANTITY_PREFIX.as_ref() {
        if let Some(caps) = re.captures(trimmed) {
            if let Ok(qty) = caps[1].replace(',', ".").parse::<f64>() {
                return ParsedItem {
                    qty: Some(qty),
                    base: caps[2].trim().to_lowercase(),
                };
            }
        }
    }

    ParsedItem {
        qty: None,
        base: trimmed.to_lowercase(),
    }
}

/// Format a quantity for display.
///
/// Whole values drop their decimals ("5", not "5.0"); fractional values
/// keep one decimal place, localized to the configured separator.
pub fn format_quantity(value: f64, sep: DecimalSeparator) -> String {
    let formatted = format!("{:.1}", value);
    match formatted.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => match sep {
            DecimalSeparator::Period => formatted,
            DecimalSeparator::Comma => formatted.replace('.', ","),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_integer_quantity() {
        let parsed = parse_quantity("2 bananen");
        assert_eq!(parsed.qty, Some(2.0));
        assert_eq!(parsed.base, "bananen");
    }

    #[test]
    fn test_parses_decimal_quantity() {
        let parsed = parse_quantity("1.5 kg bloem");
        assert_eq!(parsed.qty, Some(1.5));
        assert_eq!(parsed.base, "kg bloem");
    }

    #[test]
    fn test_comma_as_decimal_separator() {
        let parsed = parse_quantity("1,5 kg bloem");
        assert_eq!(parsed.qty, Some(1.5));
        assert_eq!(parsed.base, "kg bloem");
    }

    #[test]
    fn test_no_leading_quantity() {
        let parsed = parse_quantity("bananen");
        assert_eq!(parsed.qty, None);
        assert_eq!(parsed.base, "bananen");
    }

    #[test]
    fn test_bare_number_is_not_a_quantity() {
        let parsed = parse_quantity("2");
        assert_eq!(parsed.qty, None);
        assert_eq!(parsed.base, "2");
    }

    #[test]
    fn test_digits_inside_name_are_ignored() {
        let parsed = parse_quantity("cola 2l");
        assert_eq!(parsed.qty, None);
        assert_eq!(parsed.base, "cola 2l");
    }

    #[test]
    fn test_base_is_lowercased_and_trimmed() {
        let parsed = parse_quantity("  3 Appels  ");
        assert_eq!(parsed.qty, Some(3.0));
        assert_eq!(parsed.base, "appels");

        let parsed = parse_quantity("  Bananen  ");
        assert_eq!(parsed.qty, None);
        assert_eq!(parsed.base, "bananen");
    }

    #[test]
    fn test_format_whole_numbers() {
        assert_eq!(format_quantity(5.0, DecimalSeparator::Comma), "5");
        assert_eq!(format_quantity(1000.0, DecimalSeparator::Period), "1000");
        assert_eq!(format_quantity(0.0, DecimalSeparator::Comma), "0");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_quantity(2.5, DecimalSeparator::Comma), "2,5");
        assert_eq!(format_quantity(2.5, DecimalSeparator::Period), "2.5");
        assert_eq!(format_quantity(0.5, DecimalSeparator::Comma), "0,5");
    }

    #[test]
    fn test_format_rounds_to_one_decimal() {
        assert_eq!(format_quantity(2.04, DecimalSeparator::Comma), "2");
        assert_eq!(format_quantity(1.0 / 3.0, DecimalSeparator::Period), "0.3");
    }

    #[test]
    fn test_separator_from_str() {
        assert_eq!(DecimalSeparator::from_str("period"), DecimalSeparator::Period);
        assert_eq!(DecimalSeparator::from_str("comma"), DecimalSeparator::Comma);
        assert_eq!(DecimalSeparator::from_str("unknown"), DecimalSeparator::Comma);
        assert_eq!(DecimalSeparator::default(), DecimalSeparator::Comma);
    }
}
