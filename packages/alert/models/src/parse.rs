//! Lenient readers for the free-form text fields on an alert.
//!
//! Alert `time` and `distance` values are typed by people, not machines, so
//! they are read by prefix: leading whitespace is skipped and trailing junk
//! after a well-formed number is ignored (`"0 km"` reads as `0`). Text that
//! does not start with a number yields `None`.

/// Reads a leading decimal integer with an optional sign.
///
/// Returns `None` when no digits follow the (optional) sign or when the
/// value does not fit in an `i64`.
#[must_use]
pub fn leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let sign = usize::from(matches!(s.as_bytes().first(), Some(b'+' | b'-')));

    let len = count_digits(&s.as_bytes()[sign..]);
    if len == 0 {
        return None;
    }

    s[..sign + len].parse().ok()
}

/// Reads the longest leading floating-point number.
///
/// Accepts an optional sign, integer digits, an optional fraction, an
/// optional exponent, or the literal `Infinity`. A lone `.` or sign is not a
/// number.
#[must_use]
pub fn leading_float(text: &str) -> Option<f64> {
    const INFINITY: &str = "Infinity";

    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if s[end..].starts_with(INFINITY) {
        return s[..end + INFINITY.len()].parse().ok();
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_reads_prefix() {
        assert_eq!(leading_int("07"), Some(7));
        assert_eq!(leading_int("  23"), Some(23));
        assert_eq!(leading_int("9am"), Some(9));
        assert_eq!(leading_int("-1"), Some(-1));
        assert_eq!(leading_int("+4"), Some(4));
    }

    #[test]
    fn int_reads_full_signed_range() {
        assert_eq!(leading_int("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(leading_int("9223372036854775807h"), Some(i64::MAX));
        assert_eq!(leading_int("9223372036854775808"), None);
    }

    #[test]
    fn int_rejects_non_numeric() {
        assert_eq!(leading_int(""), None);
        assert_eq!(leading_int("noon"), None);
        assert_eq!(leading_int("-"), None);
        assert_eq!(leading_int("99999999999999999999"), None);
    }

    #[test]
    fn float_reads_prefix() {
        assert_eq!(leading_float("5"), Some(5.0));
        assert_eq!(leading_float("0 km"), Some(0.0));
        assert_eq!(leading_float(" 2.5m"), Some(2.5));
        assert_eq!(leading_float(".5"), Some(0.5));
        assert_eq!(leading_float("5."), Some(5.0));
        assert_eq!(leading_float("-3.25"), Some(-3.25));
        assert_eq!(leading_float("1e3 meters"), Some(1000.0));
        assert_eq!(leading_float("4e"), Some(4.0));
        assert_eq!(leading_float("Infinity"), Some(f64::INFINITY));
        assert_eq!(leading_float("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn float_rejects_non_numeric() {
        assert_eq!(leading_float(""), None);
        assert_eq!(leading_float("abc"), None);
        assert_eq!(leading_float("."), None);
        assert_eq!(leading_float("-"), None);
        assert_eq!(leading_float("infinity"), None);
        assert_eq!(leading_float("km 5"), None);
    }
}
