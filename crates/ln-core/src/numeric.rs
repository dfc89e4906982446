use crate::LnError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, LnError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(LnError::NonFinite { what, value: v })
    }
}

/// Finite and >= 0, otherwise a configuration error naming `what`.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, LnError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(LnError::Config { what, value: v });
    }
    Ok(v)
}

/// Apply a signed change to a particle count, clamping at zero.
#[inline]
pub fn offset_particles(count: u64, delta: i64) -> u64 {
    if delta >= 0 {
        count.saturating_add(delta as u64)
    } else {
        count.saturating_sub(delta.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_non_negative_rejects_negative() {
        assert!(ensure_non_negative(0.0, "dt").is_ok());
        let err = ensure_non_negative(-0.5, "dt").unwrap_err();
        assert!(matches!(err, LnError::Config { what: "dt", .. }));
    }

    #[test]
    fn offset_particles_clamps_at_zero() {
        assert_eq!(offset_particles(5, 3), 8);
        assert_eq!(offset_particles(5, -3), 2);
        assert_eq!(offset_particles(5, -30), 0);
        assert_eq!(offset_particles(0, i64::MIN), 0);
    }
}
