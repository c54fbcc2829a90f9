/// Clamps an arbitrary numeric input to a finite, non-negative amount.
///
/// Every amount entering the engine passes through here first, so the
/// arithmetic downstream never sees NaN, infinities, or negative money.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_ordinary_amounts_through() {
        assert_eq!(sanitize(1234.56), 1234.56);
        assert_eq!(sanitize(0.0), 0.0);
    }

    #[test]
    fn clamps_negatives_to_zero() {
        assert_eq!(sanitize(-1.0), 0.0);
        assert_eq!(sanitize(-0.0), 0.0);
    }

    #[test]
    fn zeroes_non_finite_values() {
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(f64::INFINITY), 0.0);
        assert_eq!(sanitize(f64::NEG_INFINITY), 0.0);
    }
}
