//! Currency formatting.
//!
//! Values are rendered with exactly two decimals and a `,` between every group
//! of three integer digits. Rounding works on the exact binary value of the
//! `f64` (mantissa and exponent as integers), so `1953.445`, which is stored
//! as `1953.44499...`, rounds down, and large whole numbers never gain cents.

const DECIMALS: u32 = 2;
const GROUP_SEPARATOR: char = ',';

/// Magnitude from which the value is printed in exponent form instead.
const EXPONENT_FORM_FROM: f64 = 1e21;

/// Format `value` as `1,234.50`.
///
/// Negative values carry a single leading `-` (`-1,234.50`). A negative value
/// that rounds to zero keeps its sign (`-0.00`); negative zero does not.
/// Exact halves round away from zero (`0.125` gives `0.13`). Magnitudes of
/// `1e21` and above print in exponent form without grouping (`1e+21`).
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }

    let negative = value < 0.0;
    let abs = value.abs();
    if abs >= EXPONENT_FORM_FROM {
        let exp_form = format!("{abs:e}").replacen('e', "e+", 1);
        return if negative {
            format!("-{exp_form}")
        } else {
            exp_form
        };
    }

    let scale_int = 10_u128.pow(DECIMALS);
    let cents = round_scaled(abs, scale_int);
    let int_part = cents / scale_int;
    let frac_part = cents % scale_int;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part.to_string(), GROUP_SEPARATOR));
    out.push('.');

    let frac_str = frac_part.to_string();
    for _ in 0..(DECIMALS as usize).saturating_sub(frac_str.len()) {
        out.push('0');
    }
    out.push_str(&frac_str);
    out
}

/// `abs * scale` rounded half up, computed exactly.
///
/// `abs` must be finite, non-negative and below `1e21`, so the result fits
/// comfortably in a `u128` for small scales.
fn round_scaled(abs: f64, scale: u128) -> u128 {
    let bits = abs.to_bits();
    let biased_exp = ((bits >> 52) & 0x7ff) as i32;
    let fraction = u128::from(bits & ((1u64 << 52) - 1));
    let (mantissa, exp) = if biased_exp == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u128 << 52), biased_exp - 1075)
    };

    let n = mantissa * scale;
    if exp >= 0 {
        return n << exp;
    }

    let shift = exp.unsigned_abs();
    // n < 2^60 here, so anything shifted this far is below half a unit.
    if shift >= 127 {
        return 0;
    }
    let quotient = n >> shift;
    let remainder = n - (quotient << shift);
    let half = 1u128 << (shift - 1);
    if remainder >= half {
        quotient + 1
    } else {
        quotient
    }
}

/// Insert `separator` between every group of three digits, counted from the right.
///
/// `digits` is expected to be a run of ASCII digits without sign or decimals.
pub fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_sign_positive() {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_integer_digits_with_two_decimals() {
        assert_eq!(format_currency(1234.5), "1,234.50");
        assert_eq!(format_currency(999.0), "999.00");
        assert_eq!(format_currency(1_000_000.0), "1,000,000.00");
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(12.345_678), "12.35");
        assert_eq!(format_currency(100_000.0), "100,000.00");
    }

    #[test]
    fn negative_sign_stays_in_front_of_groups() {
        assert_eq!(format_currency(-1234.5), "-1,234.50");
        assert_eq!(format_currency(-999.0), "-999.00");
        assert_eq!(format_currency(-123_456.0), "-123,456.00");
        assert_eq!(format_currency(-0.001), "-0.00");
        assert_eq!(format_currency(-0.0), "0.00");
    }

    #[test]
    fn non_finite_values_have_fixed_spellings() {
        assert_eq!(format_currency(f64::NAN), "NaN");
        assert_eq!(format_currency(f64::INFINITY), "Infinity");
        assert_eq!(format_currency(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn rounds_the_stored_binary_value() {
        // Stored as 1953.44499999999993...
        assert_eq!(format_currency(1953.445), "1,953.44");
        // Stored as 1.00499999999999989...
        assert_eq!(format_currency(1.005), "1.00");
        // Exact half rounds away from zero.
        assert_eq!(format_currency(0.125), "0.13");
        assert_eq!(format_currency(-0.125), "-0.13");
        assert_eq!(format_currency(2.675), "2.67");
        assert_eq!(format_currency(0.005), "0.01");
        assert_eq!(format_currency(f64::MIN_POSITIVE), "0.00");
        assert_eq!(format_currency(5e-324), "0.00");
    }

    #[test]
    fn large_whole_numbers_keep_zero_cents() {
        assert_eq!(
            format_currency(9_007_199_254_740_994.0),
            "9,007,199,254,740,994.00"
        );
        assert_eq!(
            format_currency(123_456_789_012_345_680_000.0),
            "123,456,789,012,345,683,968.00"
        );
    }

    #[test]
    fn huge_magnitudes_use_exponent_form() {
        assert_eq!(format_currency(1e21), "1e+21");
        assert_eq!(format_currency(1.5e21), "1.5e+21");
        assert_eq!(format_currency(-2e21), "-2e+21");
        assert_eq!(format_currency(f64::MAX), "1.7976931348623157e+308");
    }

    #[test]
    fn group_thousands_handles_short_and_exact_runs() {
        assert_eq!(group_thousands("", ','), "");
        assert_eq!(group_thousands("7", ','), "7");
        assert_eq!(group_thousands("123", ','), "123");
        assert_eq!(group_thousands("1234", ','), "1,234");
        assert_eq!(group_thousands("123456", ' '), "123 456");
        assert_eq!(group_thousands("1234567", '.'), "1.234.567");
    }
}
