//! Numeric sanitizing for values that come from catalogs and save data.
//!
//! Whole-unit quantities (score, costs, counts, production) go through
//! [`whole`] and are floored. Multipliers and effect values go through
//! [`fraction`] and keep their fractional part until they feed a formula.

/// Floor `value` to a whole, non-negative quantity.
///
/// Non-finite input (NaN, ±inf) and negative input fall back to `fallback`.
/// Values beyond `u64::MAX` saturate.
pub fn whole(value: f64, fallback: u64) -> u64 {
    if !value.is_finite() || value < 0.0 {
        return fallback;
    }
    value.floor() as u64
}

/// Keep `value` as a non-negative finite float, or return `fallback`.
pub fn fraction(value: f64, fallback: f64) -> f64 {
    if !value.is_finite() || value < 0.0 {
        return fallback;
    }
    value
}

/// Round to 4 decimal places. Bounds drift when multipliers stack.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_floors_positive_values() {
        assert_eq!(whole(11.5, 0), 11);
        assert_eq!(whole(13.999, 0), 13);
        assert_eq!(whole(0.0, 7), 0);
    }

    #[test]
    fn whole_rejects_non_finite() {
        assert_eq!(whole(f64::NAN, 3), 3);
        assert_eq!(whole(f64::INFINITY, 3), 3);
        assert_eq!(whole(f64::NEG_INFINITY, 0), 0);
    }

    #[test]
    fn whole_clamps_negative_to_fallback() {
        assert_eq!(whole(-5.0, 0), 0);
        assert_eq!(whole(-0.5, 9), 9);
    }

    #[test]
    fn whole_saturates_huge_values() {
        assert_eq!(whole(1e30, 0), u64::MAX);
    }

    #[test]
    fn fraction_keeps_decimals() {
        assert!((fraction(0.2, 0.0) - 0.2).abs() < f64::EPSILON);
        assert!((fraction(-1.0, 1.0) - 1.0).abs() < f64::EPSILON);
        assert!((fraction(f64::NAN, 1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn round4_trims_drift() {
        assert!((round4(1.1 * 1.1 * 1.1) - 1.331).abs() < 1e-12);
        assert!((round4(1.023456789) - 1.0235).abs() < 1e-12);
    }
}
