//! Lenient scalar casts for caller-supplied values.
//!
//! Request values arrive as strings and are cast the way a dynamic
//! language casts them: the longest numeric prefix wins, anything
//! unparseable becomes zero, and no value is ever rejected.

/// Numeric prefix of `input` after leading whitespace.
///
/// Returns the prefix and whether it is a plain integer (no fraction, no
/// exponent).
fn numeric_prefix(input: &str) -> (&str, bool) {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut integral = true;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
            integral = false;
        }
    }

    if digits == 0 {
        return ("", true);
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
            integral = false;
        }
    }

    (&s[..end], integral)
}

/// Casts to an integer.
///
/// ```rust
/// use mika::coerce::to_int;
///
/// assert_eq!(to_int("31"), 31);
/// assert_eq!(to_int(" 12abc"), 12);
/// assert_eq!(to_int("1.9"), 1);
/// assert_eq!(to_int("1e3"), 1000);
/// assert_eq!(to_int("abc"), 0);
/// ```
pub fn to_int(input: &str) -> i64 {
    let (prefix, integral) = numeric_prefix(input);
    if prefix.is_empty() {
        return 0;
    }

    if integral {
        match prefix.parse::<i64>() {
            Ok(value) => value,
            Err(_) if prefix.starts_with('-') => i64::MIN,
            Err(_) => i64::MAX,
        }
    } else {
        // `as` saturates and maps NaN to zero
        prefix.parse::<f64>().map(|f| f as i64).unwrap_or(0)
    }
}

/// Casts to a float.
///
/// ```rust
/// use mika::coerce::to_float;
///
/// assert_eq!(to_float("2.5kg"), 2.5);
/// assert_eq!(to_float("-.5"), -0.5);
/// assert_eq!(to_float("none"), 0.0);
/// ```
pub fn to_float(input: &str) -> f64 {
    let (prefix, _) = numeric_prefix(input);
    prefix.parse::<f64>().unwrap_or(0.0)
}

/// Casts to a boolean: only `""` and `"0"` are false.
pub fn to_bool(input: &str) -> bool {
    !(input.is_empty() || input == "0")
}
