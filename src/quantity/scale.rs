//! Ingredient scaling
//!
//! Rewrites the quantities inside free-text ingredient lines when a recipe
//! is cooked for a different number of servings.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::parser::{format_quantity, DecimalSeparator};

static SCALE_TOKEN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: a vulgar fraction glyph or a plain number ("½", "400", "1,5")
    Regex::new(r"[½¼¾⅓⅔]|\d+(?:[.,]\d+)?").ok()
});

static GRAM_ML_MARKER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: an amount with a gram/milliliter unit ("400g", "250 ml")
    Regex::new(r"\d\s*(grammen|gram|gr|g|milliliter|ml)\b").ok()
});

/// Scale the quantities inside one ingredient line.
///
/// A multiplier of exactly 1.0 returns the line unchanged. Otherwise every
/// number and vulgar-fraction glyph is scaled and reformatted in a single
/// pass. Numbers over 1000 are taken for years or product codes and stay
/// as-is, unless the line carries a gram/milliliter amount in which case
/// large values are real weights. Lines with nothing to scale pass
/// through untouched; the function never fails.
pub fn scale_ingredient(ingredient: &str, multiplier: f64, sep: DecimalSeparator) -> String {
    if multiplier == 1.0 {
        return ingredient.to_string();
    }

    let re = match SCALE_TOKEN.as_ref() {
        Some(re) => re,
        None => return ingredient.to_string(),
    };

    let has_unit_marker = GRAM_ML_MARKER
        .as_ref()
        .map(|marker| marker.is_match(ingredient))
        .unwrap_or(false);

    re.replace_all(ingredient, |caps: &Captures| {
        let token = &caps[0];
        let value = match token {
            "½" => 0.5,
            "¼" => 0.25,
            "¾" => 0.75,
            "⅓" => 1.0 / 3.0,
            "⅔" => 2.0 / 3.0,
            _ => match token.replace(',', ".").parse::<f64>() {
                Ok(v) => v,
                Err(_) => return token.to_string(),
            },
        };

        if value > 1000.0 && !has_unit_marker {
            tracing::warn!(
                "Not scaling large number {} in '{}' (no gram/ml unit found)",
                token,
                ingredient
            );
            return token.to_string();
        }

        format_quantity(value * multiplier, sep)
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_one_is_identity() {
        for line in [
            "500g kip",
            "½ cup flour",
            "snufje zout",
            "1 2024 editie",
            "",
        ] {
            assert_eq!(scale_ingredient(line, 1.0, DecimalSeparator::Comma), line);
        }
    }

    #[test]
    fn test_scales_weight() {
        assert_eq!(
            scale_ingredient("500g kip", 2.0, DecimalSeparator::Comma),
            "1000g kip"
        );
    }

    #[test]
    fn test_scales_fraction_glyphs() {
        assert_eq!(
            scale_ingredient("½ cup flour", 2.0, DecimalSeparator::Comma),
            "1 cup flour"
        );
        assert_eq!(
            scale_ingredient("¼ tsp zout", 2.0, DecimalSeparator::Comma),
            "0,5 tsp zout"
        );
    }

    #[test]
    fn test_scales_every_number_in_line() {
        assert_eq!(
            scale_ingredient("2 eieren en 100g suiker", 2.0, DecimalSeparator::Comma),
            "4 eieren en 200g suiker"
        );
    }

    #[test]
    fn test_comma_decimal_input() {
        assert_eq!(
            scale_ingredient("1,5 l melk", 2.0, DecimalSeparator::Comma),
            "3 l melk"
        );
    }

    #[test]
    fn test_halving_with_ml_unit() {
        assert_eq!(
            scale_ingredient("250 ml melk", 0.5, DecimalSeparator::Comma),
            "125 ml melk"
        );
    }

    #[test]
    fn test_large_number_without_unit_stays() {
        // "mg" is not a gram marker, so 1200 looks like a code and stays put
        assert_eq!(
            scale_ingredient("1200 mg magnesium", 2.0, DecimalSeparator::Comma),
            "1200 mg magnesium"
        );
    }

    #[test]
    fn test_large_number_with_gram_unit_scales() {
        assert_eq!(
            scale_ingredient("1200g bloem", 2.0, DecimalSeparator::Comma),
            "2400g bloem"
        );
    }

    #[test]
    fn test_year_stays_while_count_scales() {
        assert_eq!(
            scale_ingredient("1 2024 editie", 1.5, DecimalSeparator::Comma),
            "1,5 2024 editie"
        );
        assert_eq!(
            scale_ingredient("1 2024 editie", 1.5, DecimalSeparator::Period),
            "1.5 2024 editie"
        );
    }

    #[test]
    fn test_no_numbers_passes_through() {
        assert_eq!(
            scale_ingredient("snufje zout", 3.0, DecimalSeparator::Comma),
            "snufje zout"
        );
    }

    #[test]
    fn test_formats_with_separator() {
        assert_eq!(
            scale_ingredient("1 ui", 1.5, DecimalSeparator::Comma),
            "1,5 ui"
        );
        assert_eq!(
            scale_ingredient("1 ui", 1.5, DecimalSeparator::Period),
            "1.5 ui"
        );
    }
}
