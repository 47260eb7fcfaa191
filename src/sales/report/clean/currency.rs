/// Currency symbols and codes removed before an amount is parsed.
const CURRENCY_TOKENS: &[&str] = &["USD", "$", "€", "£", "¥", ","];

/// Parses a free-form currency amount such as `$1,200.50 USD`.
///
/// Symbols and the `USD` code are removed as whole tokens along with
/// separators and whitespace. Stray letters elsewhere in the value make it
/// unparsable instead of being dropped. Unparsable, negative, or non-finite amounts yield `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    let mut stripped = raw.to_string();
    for token in CURRENCY_TOKENS {
        stripped = stripped.replace(token, "");
    }
    stripped.retain(|ch| !ch.is_whitespace());

    sanitize_amount(stripped.parse::<f64>().unwrap_or(0.0))
}

/// Clamps an already numeric amount into the accepted range.
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        // folds -0.0 into 0.0
        value + 0.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_symbols_separators_and_code() {
        assert_eq!(parse_amount("$1,200.50 USD"), 1200.50);
        assert_eq!(parse_amount("USD 3,000"), 3000.0);
        assert_eq!(parse_amount("€ 12.5"), 12.5);
        assert_eq!(parse_amount("  42 "), 42.0);
    }

    #[test]
    fn unparsable_amounts_become_zero() {
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("12 units"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
    }

    #[test]
    fn stray_code_letters_are_not_stripped() {
        assert_eq!(parse_amount("1S0"), 0.0);
        assert_eq!(parse_amount("U5D"), 0.0);
    }

    #[test]
    fn negative_amounts_become_zero() {
        assert_eq!(parse_amount("-15.00"), 0.0);
        assert_eq!(sanitize_amount(-0.0).to_bits(), 0.0f64.to_bits());
    }
}
