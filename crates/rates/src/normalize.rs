//! Normalization of provider-native dates and locale-formatted numerals.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Convert a provider-native date string to ISO-8601.
///
/// An input matching `DD/MM/YYYY` exactly is reordered to `YYYY-MM-DD`.
/// Anything else is returned unchanged, which covers already-ISO values.
/// Calendar correctness (e.g. day 31 in a 30-day month) is not checked.
pub fn normalize_date(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let is_dmy = bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && raw
            .char_indices()
            .all(|(i, c)| matches!(i, 2 | 5) || c.is_ascii_digit());
    if is_dmy {
        format!("{}-{}-{}", &raw[6..10], &raw[3..5], &raw[0..2])
    } else {
        raw.to_string()
    }
}

/// Parse a locale-formatted numeral string into a positive decimal.
///
/// Separator rule: when a period is present, commas are thousands
/// separators and are removed ("1,234.56" -> 1234.56); a single comma with
/// no period is a decimal separator ("17,456700" -> 17.4567); any other
/// commas are stripped. A non-positive or unparseable result yields `None`,
/// which callers report as a parse failure rather than a zero rate.
pub fn parse_locale_decimal(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    let cleaned = if s.contains('.') {
        s.replace(',', "")
    } else if s.matches(',').count() == 1 {
        s.replace(',', ".")
    } else {
        s.replace(',', "")
    };
    let value = Decimal::from_str(&cleaned).ok()?;
    if value > Decimal::ZERO {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalize_date_reorders_dmy() {
        assert_eq!(normalize_date("15/03/2024"), "2024-03-15");
        assert_eq!(normalize_date("01/12/1999"), "1999-12-01");
        assert_eq!(normalize_date("31/02/2024"), "2024-02-31"); // no calendar validation
    }

    #[test]
    fn test_normalize_date_passes_through_non_matching() {
        assert_eq!(normalize_date("2024-03-15"), "2024-03-15");
        assert_eq!(normalize_date("15-03-2024"), "15-03-2024");
        assert_eq!(normalize_date("3/15/24"), "3/15/24");
        assert_eq!(normalize_date("15/03/24"), "15/03/24"); // too short
        assert_eq!(normalize_date("1a/03/2024"), "1a/03/2024");
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn test_parse_decimal_comma_is_decimal_separator() {
        assert_eq!(parse_locale_decimal("17,456700"), Some(dec!(17.4567)));
    }

    #[test]
    fn test_parse_decimal_strips_thousands_separators() {
        assert_eq!(parse_locale_decimal("1,234.56"), Some(dec!(1234.56)));
        assert_eq!(parse_locale_decimal("1,234,567.8"), Some(dec!(1234567.8)));
    }

    #[test]
    fn test_parse_decimal_plain_values() {
        assert_eq!(parse_locale_decimal("17.10"), Some(dec!(17.10)));
        assert_eq!(parse_locale_decimal(" 17.30 "), Some(dec!(17.30)));
    }

    #[test]
    fn test_parse_decimal_rejects_non_positive_and_garbage() {
        assert_eq!(parse_locale_decimal("0"), None);
        assert_eq!(parse_locale_decimal("0.000000"), None);
        assert_eq!(parse_locale_decimal("-17.10"), None);
        assert_eq!(parse_locale_decimal("N/E"), None);
        assert_eq!(parse_locale_decimal(""), None);
    }
}
