//! Price Parsing and Formatting
//!
//! Users type prices in either convention: `350.000,00` (BR, comma decimal)
//! or `350,000.00` (US, period decimal), often half-way between the two.
//! [`parse_price`] resolves the separators with a fixed positional rule so the
//! result never depends on the browser locale.

use crate::domain::{DomainError, DomainResult};

/// Result of parsing a price field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedPrice {
    /// Positive, finite amount
    Value(f64),
    /// Field left blank
    Absent,
    /// Text that is not a positive amount
    Invalid,
}

impl ParsedPrice {
    pub fn value(&self) -> Option<f64> {
        match self {
            ParsedPrice::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ParsedPrice::Invalid)
    }

    /// Value to submit for a nullable column; `Invalid` blocks submission.
    pub fn into_field(self, field: &str) -> DomainResult<Option<f64>> {
        match self {
            ParsedPrice::Value(v) => Ok(Some(v)),
            ParsedPrice::Absent => Ok(None),
            ParsedPrice::Invalid => Err(DomainError::InvalidInput(format!(
                "{field} deve ser um valor numérico válido"
            ))),
        }
    }
}

fn is_price_char(c: char) -> bool {
    c.is_ascii_digit() || c == ',' || c == '.'
}

/// Strip everything but digits, commas and periods (applied as the user types).
pub fn sanitize_price_input(raw: &str) -> String {
    raw.chars().filter(|c| is_price_char(*c)).collect()
}

/// Parse free-form price text.
///
/// Expects sanitized input; any other character (a minus sign included)
/// makes the text invalid.
pub fn parse_price(text: &str) -> ParsedPrice {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParsedPrice::Absent;
    }
    if !trimmed.chars().all(is_price_char) {
        return ParsedPrice::Invalid;
    }

    match leading_decimal(&normalize_separators(trimmed)) {
        Some(v) if v.is_finite() && v > 0.0 => ParsedPrice::Value(v),
        _ => ParsedPrice::Invalid,
    }
}

/// Rewrite to a single `.` decimal point with no grouping.
fn normalize_separators(s: &str) -> String {
    match (s.rfind(','), s.rfind('.')) {
        // Comma is the decimal separator, periods group thousands
        (Some(comma), Some(dot)) if comma > dot => {
            let (before, after) = (&s[..comma], &s[comma + 1..]);
            let int_part = padded_thousands(before).unwrap_or_else(|| before.replace('.', ""));
            format!("{int_part}.{after}")
        }
        // Period is the decimal separator, commas group thousands
        (Some(_), Some(_)) => s.replace(',', ""),
        (Some(comma), None) => {
            if s.len() - comma - 1 <= 2 {
                s.replacen(',', ".", 1)
            } else {
                s.replace(',', "")
            }
        }
        (None, Some(dot)) => {
            if s.len() - dot - 1 <= 2 {
                s.to_string()
            } else {
                s.replace('.', "")
            }
        }
        (None, None) => s.to_string(),
    }
}

/// `900.00` before a decimal comma is read as `900000`: a thousands group
/// typed without its last triplet.
fn padded_thousands(segment: &str) -> Option<String> {
    let digits = segment.strip_suffix(".00")?;
    if (1..=3).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(format!("{digits}000"))
    } else {
        None
    }
}

/// Longest `digits[.digits]` prefix, parsed; trailing garbage is ignored.
pub(crate) fn leading_decimal(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'0'..=b'9' => {
                seen_digit = true;
                end = i + 1;
            }
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

/// Editable text for a stored amount that [`parse_price`] reads back
/// unchanged (`450000,00`).
pub fn price_text(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}").replace('.', ",")).unwrap_or_default()
}

/// `R$ 1.234,56`; missing or zero amounts render as `R$ 0,00`.
pub fn format_brl(value: Option<f64>) -> String {
    let value = match value {
        Some(v) if v != 0.0 && v.is_finite() => v,
        _ => return "R$ 0,00".to_string(),
    };

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part}")
}

/// Millions with one decimal, for report cards: `R$ 6.5M`
pub fn format_brl_compact(value: f64) -> String {
    format!("R$ {:.1}M", value / 1_000_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_examples() {
        assert_eq!(parse_price("350.000,00"), ParsedPrice::Value(350000.0));
        assert_eq!(parse_price("350000,00"), ParsedPrice::Value(350000.0));
        assert_eq!(parse_price("900.00,00"), ParsedPrice::Value(900000.0));
        assert_eq!(parse_price("1,234.56"), ParsedPrice::Value(1234.56));
        assert_eq!(parse_price("80"), ParsedPrice::Value(80.0));
        assert_eq!(parse_price(""), ParsedPrice::Absent);
        assert_eq!(parse_price("   "), ParsedPrice::Absent);
        assert_eq!(parse_price("0"), ParsedPrice::Invalid);
        assert_eq!(parse_price("-5"), ParsedPrice::Invalid);
    }

    #[test]
    fn test_single_separator_rules() {
        assert_eq!(parse_price("1.234.567"), ParsedPrice::Value(1234567.0));
        assert_eq!(parse_price("1,234,567"), ParsedPrice::Value(1234567.0));
        assert_eq!(parse_price("12,5"), ParsedPrice::Value(12.5));
        assert_eq!(parse_price("99.9"), ParsedPrice::Value(99.9));
        assert_eq!(parse_price("1.500"), ParsedPrice::Value(1500.0));
    }

    #[test]
    fn test_zero_pad_quirk_is_narrow() {
        // Only 1-3 digits then exactly ".00" before the decimal comma
        assert_eq!(parse_price("45.00,50"), ParsedPrice::Value(45000.5));
        assert_eq!(parse_price("1234.00,00"), ParsedPrice::Value(123400.0));
        assert_eq!(parse_price("900.000,00"), ParsedPrice::Value(900000.0));
    }

    #[test]
    fn test_lenient_prefix_parse() {
        // Only the first comma becomes the point; the rest is ignored
        assert_eq!(parse_price("1,234,56"), ParsedPrice::Value(1.234));
        assert_eq!(parse_price("1.2.3"), ParsedPrice::Value(1.2));
    }

    #[test]
    fn test_rejections() {
        assert_eq!(parse_price("0,00"), ParsedPrice::Invalid);
        assert_eq!(parse_price(".,"), ParsedPrice::Invalid);
        assert_eq!(parse_price("R$ 10"), ParsedPrice::Invalid);
        assert_eq!(parse_price(&"9".repeat(400)), ParsedPrice::Invalid);
    }

    #[test]
    fn test_canonical_form_is_a_fixed_point() {
        for value in [0.5, 1.0, 80.0, 99.99, 1234.56, 350000.0, 1250000.1] {
            assert_eq!(parse_price(&value.to_string()), ParsedPrice::Value(value));
        }
    }

    #[test]
    fn test_deterministic() {
        for input in ["350.000,00", "1,234.56", "900.00,00", "abc", ""] {
            assert_eq!(parse_price(input), parse_price(input));
        }
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_price_input("R$ 1.500,00"), "1.500,00");
        assert_eq!(sanitize_price_input("-5 mil"), "5");
    }

    #[test]
    fn test_into_field() {
        assert_eq!(parse_price("").into_field("Orçamento"), Ok(None));
        assert_eq!(parse_price("10").into_field("Orçamento"), Ok(Some(10.0)));
        assert!(parse_price("0").into_field("Orçamento").is_err());
    }

    #[test]
    fn test_price_text_parses_back() {
        assert_eq!(price_text(None), "");
        assert_eq!(price_text(Some(450_000.0)), "450000,00");
        assert_eq!(parse_price(&price_text(Some(1234.5))), ParsedPrice::Value(1234.5));
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(Some(1234.56)), "R$ 1.234,56");
        assert_eq!(format_brl(Some(350000.0)), "R$ 350.000,00");
        assert_eq!(format_brl(Some(999.0)), "R$ 999,00");
        assert_eq!(format_brl(Some(1250000.5)), "R$ 1.250.000,50");
        assert_eq!(format_brl(None), "R$ 0,00");
        assert_eq!(format_brl(Some(0.0)), "R$ 0,00");
        assert_eq!(format_brl(Some(-1500.0)), "-R$ 1.500,00");
    }

    #[test]
    fn test_format_brl_compact() {
        assert_eq!(format_brl_compact(6_480_000.0), "R$ 6.5M");
    }
}
