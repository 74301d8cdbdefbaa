use crate::core::error::LossError;

/// Parses a typed cash amount such as `10,000`, `$2 500.50` or `1_000`.
pub fn parse_amount(text: &str) -> Result<f64, LossError> {
    let cleaned: String = text
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '-' && c != '.')
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' ' | '\u{a0}'))
        .collect();

    if cleaned.is_empty() {
        return Err(LossError::InvalidAmount(text.to_string()));
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(LossError::InvalidAmount(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_formats() {
        assert_eq!(parse_amount("10000").unwrap(), 10_000.0);
        assert_eq!(parse_amount(" 10,000.50 ").unwrap(), 10_000.5);
        assert_eq!(parse_amount("$2 500").unwrap(), 2_500.0);
        assert_eq!(parse_amount("€1_000").unwrap(), 1_000.0);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
    }

    #[test]
    fn rejects_invalid_input() {
        for input in ["", "   ", "abc", "-5", "12abc", "inf", "NaN", "$"] {
            assert!(
                matches!(parse_amount(input), Err(LossError::InvalidAmount(_))),
                "{input:?} should be rejected"
            );
        }
    }
}
