//! Numeric guards shared by the descriptors and the normalizer
//!
//! Degenerate inputs (flat tiles, tiny tiles, all-zero feature columns) are
//! resolved here with a neutral value instead of producing NaN or infinity.

/// Divisor with zero replaced by one.
///
/// Used for histogram and co-occurrence normalization, the WLD center and
/// horizontal-gradient responses, and feature column maxima.
#[inline]
pub fn safe_divisor(value: f64) -> f64 {
    if value == 0.0 { 1.0 } else { value }
}

/// `numerator / denominator`, or `None` when the denominator is zero
#[inline]
pub fn checked_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Entropy contribution `-p ln p`, zero for empty cells
#[inline]
pub fn entropy_term(p: f64) -> f64 {
    if p > 0.0 { -p * p.ln() } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_divisor() {
        assert_eq!(safe_divisor(0.0), 1.0);
        assert_eq!(safe_divisor(-0.0), 1.0);
        assert_eq!(safe_divisor(-3.0), -3.0);
    }

    #[test]
    fn test_checked_ratio() {
        assert_eq!(checked_ratio(1.0, 0.0), None);
        assert_eq!(checked_ratio(1.0, 4.0), Some(0.25));
    }

    #[test]
    fn test_entropy_term() {
        assert_eq!(entropy_term(0.0), 0.0);
        assert_eq!(entropy_term(1.0), 0.0);
        assert!((entropy_term(0.5) - 0.5 * std::f64::consts::LN_2).abs() < 1e-12);
    }
}
