/// Normalizes an angle in degrees to the range [0, 360).
pub(crate) fn normalize_degrees_360(degrees: f64) -> f64 {
    let turns = degrees / 360.0;
    let mut limited = 360.0 * (turns - turns.floor());
    if limited < 0.0 {
        limited += 360.0;
    }
    limited
}

/// Computes a polynomial using Horner's method for numerical stability.
///
/// Coefficients are ordered [a₀, a₁, a₂, ...] for a₀ + a₁x + a₂x² + ...
pub(crate) fn polynomial(coeffs: &[f64], x: f64) -> f64 {
    let Some(&last) = coeffs.last() else {
        return 0.0;
    };

    let mut result = last;
    for &coeff in coeffs.iter().rev().skip(1) {
        result = result.mul_add(x, coeff);
    }
    result
}

pub(crate) fn sin_deg(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

pub(crate) fn cos_deg(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Inverse cosine that reports an out-of-domain argument instead of
/// returning NaN.
///
/// An argument outside [-1, 1] means the sun never reaches the requested
/// angle on that day.
pub(crate) fn checked_acos(x: f64) -> Option<f64> {
    (-1.0..=1.0).contains(&x).then(|| x.acos())
}

/// Truncates toward zero, like an integer cast of the value.
pub(crate) fn trunc_minutes(minutes: f64) -> i64 {
    minutes.trunc() as i64
}
