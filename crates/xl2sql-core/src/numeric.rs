//! Numeric clean-up for spreadsheet text.
//!
//! Spreadsheet users type amounts the way they see them: `"$1,234.50"`,
//! `"15%"`, `" 12 "`. These helpers strip the decoration before parsing.

/// Tokens that stand for "no value" in a numeric column (compared lowercase).
pub const NULL_TOKENS: &[&str] = &["n/a", "na", "null", "none"];

/// Tokens that make a cell count as empty (compared trimmed and lowercase).
pub const EMPTY_TOKENS: &[&str] = &["nan", "none", ""];

/// Removes thousands separators, currency and percent signs, then trims.
pub fn clean_numeric_text(value: &str) -> String {
    value
        .replace([',', '$', '%'], "")
        .trim()
        .to_string()
}

/// True if the cleaned text is empty or a null token.
pub fn is_null_token(cleaned: &str) -> bool {
    cleaned.is_empty()
        || NULL_TOKENS
            .iter()
            .any(|token| cleaned.eq_ignore_ascii_case(token))
}

/// True if the text is empty once trimmed, or spells NaN/None.
pub fn is_empty_token(value: &str) -> bool {
    let folded = value.trim().to_lowercase();
    EMPTY_TOKENS.contains(&folded.as_str())
}

/// Parses text after [`clean_numeric_text`], returning None if unparseable.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let cleaned = clean_numeric_text(value);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_is_idempotent_on_clean_values() {
        assert_eq!(parse_numeric("1234.50"), Some(1234.5));
        assert_eq!(parse_numeric("1,234.50"), Some(1234.5));
        assert_eq!(parse_numeric("$1,234.50"), Some(1234.5));
    }

    #[test]
    fn test_percent_and_whitespace() {
        assert_eq!(parse_numeric(" 15% "), Some(15.0));
        assert_eq!(parse_numeric("-2.5%"), Some(-2.5));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("12.34.56"), None);
        assert_eq!(parse_numeric("$"), None);
    }

    #[test]
    fn test_null_tokens() {
        assert!(is_null_token(""));
        assert!(is_null_token("N/A"));
        assert!(is_null_token("null"));
        assert!(is_null_token("None"));
        assert!(!is_null_token("0"));
    }

    #[test]
    fn test_empty_tokens() {
        assert!(is_empty_token("  "));
        assert!(is_empty_token("NaN"));
        assert!(is_empty_token(" none "));
        assert!(!is_empty_token("n/a"));
        assert!(!is_empty_token("0"));
    }

    #[test]
    fn test_exponent_notation() {
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
    }
}
