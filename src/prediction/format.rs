//! Number formatting in the Indonesian locale (`id-ID`).

/// Format `value` with `decimals` fraction digits, `.` as thousands
/// separator and `,` as decimal separator.
///
/// # Examples
///
/// ```
/// use jagung::prediction::format::format_decimal;
///
/// assert_eq!(format_decimal(1234567.891, 2), "1.234.567,89");
/// assert_eq!(format_decimal(5.75, 1), "5,8");
/// ```
pub fn format_decimal(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let grouped = group_thousands(integer);

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let mut out = String::new();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

/// Format a whole number with thousands separators. Exact over the whole
/// `i64` range.
pub fn format_integer(value: i64) -> String {
    let grouped = group_thousands(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Insert `.` every three digits from the right of an ASCII digit string.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// Format a percentage with one fraction digit, e.g. `8,0%`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_decimal(value, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers_have_no_grouping() {
        assert_eq!(format_decimal(5.735625, 2), "5,74");
        assert_eq!(format_decimal(999.0, 0), "999");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_integer(1000), "1.000");
        assert_eq!(format_integer(20_300_000), "20.300.000");
        assert_eq!(format_decimal(123456.0, 1), "123.456,0");
    }

    #[test]
    fn test_integer_extremes_are_exact() {
        assert_eq!(format_integer(i64::MAX), "9.223.372.036.854.775.807");
        assert_eq!(format_integer(i64::MIN), "-9.223.372.036.854.775.808");
        assert_eq!(format_integer((1 << 53) + 1), "9.007.199.254.740.993");
        assert_eq!(format_integer(0), "0");
        assert_eq!(format_integer(-999), "-999");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_decimal(-1234.5, 1), "-1.234,5");
        assert_eq!(format_decimal(-0.001, 2), "0,00");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(8.0091), "8,0%");
    }
}
