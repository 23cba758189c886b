use crate::ClError;

/// Floating point type used throughout the loop model
pub type Real = f64;

/// Open-interval test `center - tol < v < center + tol`.
pub fn within_open(v: Real, center: Real, tol: Real) -> bool {
    center - tol < v && v < center + tol
}

/// `|prev - next| / |next|`, the stopping measure of the fixed-point solvers.
pub fn relative_change(prev: Real, next: Real) -> Real {
    (prev - next).abs() / next.abs()
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, ClError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ClError::NonFinite { what, value: v })
    }
}

pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, ClError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(ClError::NotPositive { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_open_excludes_edges() {
        assert!(within_open(0.0, 0.0, 1e-4));
        assert!(within_open(0.99995, 1.0, 1e-4));
        assert!(!within_open(1e-4, 0.0, 1e-4));
        assert!(!within_open(-1e-4, 0.0, 1e-4));
    }

    #[test]
    fn relative_change_is_scaled_by_new_value() {
        assert_eq!(relative_change(0.05, 0.025), 1.0);
        assert_eq!(relative_change(2.0, 2.0), 0.0);
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(matches!(
            ensure_positive(0.0, "volume"),
            Err(ClError::NotPositive { .. })
        ));
        assert!(matches!(
            ensure_positive(f64::INFINITY, "volume"),
            Err(ClError::NonFinite { .. })
        ));
        assert_eq!(ensure_positive(0.1, "volume").unwrap(), 0.1);
    }
}
