//! Small numeric helpers shared by the pipeline stages.

/// Sign of `value` as `-1.0`, `0.0` or `1.0`.
///
/// Unlike [`f64::signum`], zero maps to zero: a hole lying exactly on an axis
/// contributes no offset along it.
///
/// # Example
///
/// ```
/// use splice_types::math::sign;
///
/// assert_eq!(sign(-3.5), -1.0);
/// assert_eq!(sign(0.0), 0.0);
/// assert_eq!(sign(12.0), 1.0);
/// ```
#[must_use]
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Returns `true` if `value` lies strictly between `low` and `high`.
#[must_use]
pub fn in_open_interval(value: f64, low: f64, high: f64) -> bool {
    value > low && value < high
}

/// Returns `true` if a direction component is `±1` within `tolerance`.
#[must_use]
pub fn is_unit_component(component: f64, tolerance: f64) -> bool {
    (component.abs() - 1.0).abs() <= tolerance
}
