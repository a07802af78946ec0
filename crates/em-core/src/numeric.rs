use crate::EmError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, EmError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EmError::NonFinite { what, value: v })
    }
}

/// Remainder of `a / b` carrying the sign of the divisor.
///
/// Computed as `fmod` followed by a single correction, so for `a >= 0` and
/// `b > 0` the result is exactly `a % b`.
pub fn floor_mod(a: Real, b: Real) -> Real {
    let r = a % b;
    if r != 0.0 && ((r < 0.0) != (b < 0.0)) {
        r + b
    } else {
        r
    }
}
