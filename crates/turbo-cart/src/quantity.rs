//! Quantity validation and normalization.
//!
//! Quantities are decimals with a configurable `[min, max]` range and a step
//! size. [`normalize`] clamps a raw value into range and snaps it onto the
//! step grid anchored at `min`, working in scaled integers so fractional
//! steps do not accumulate floating-point drift.

/// Check that a value is usable as a quantity: finite and strictly positive.
pub fn is_valid_quantity(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Number of decimal places in a value's shortest representation.
///
/// Exponent notation is accounted for: `2.5e-3` has 4 decimal places.
pub fn decimal_places(value: f64) -> u32 {
    let repr = value.to_string();
    let (mantissa, exponent) = match repr.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (repr.as_str(), 0),
    };
    let fraction = mantissa
        .split_once('.')
        .map(|(_, f)| f.len() as i32)
        .unwrap_or(0);
    (fraction - exponent).max(0) as u32
}

/// Clamp `raw` into `[min, max]` and snap it onto the step grid.
///
/// - An unset `min` clamps at 1; an unset `max` means no upper clamp.
/// - An unset, zero, or negative `step` is treated as 1.
/// - Off-grid values snap up to the next step boundary above `min`; if that
///   overshoots `max`, they snap down one step instead.
///
/// The result is exact at the step's decimal precision. A value already on
/// the grid and in range comes back unchanged.
pub fn normalize(raw: f64, min: Option<f64>, max: Option<f64>, step: Option<f64>) -> f64 {
    let step = match step {
        Some(s) if s.is_finite() && s > 0.0 => s,
        _ => 1.0,
    };
    let min = min.filter(|m| m.is_finite()).unwrap_or(1.0);
    let max = max.filter(|m| m.is_finite());

    let mut value = raw;
    match max {
        Some(m) if value > m => value = m,
        _ if value < min => value = min,
        _ => {}
    }

    // Scale everything to integers at the step's precision.
    let precision = decimal_places(step);
    let scale = 10f64.powi(precision as i32);
    let scaled_value = (value * scale).round() as i64;
    let scaled_min = (min * scale).round() as i64;
    let scaled_step = (step * scale).round() as i64;
    let scaled_max = max.map(|m| (m * scale).round() as i64);

    let mut snapped = scaled_value;
    let remainder = (scaled_value - scaled_min) % scaled_step;
    if remainder != 0 {
        snapped = scaled_value + (scaled_step - remainder);
        if let Some(scaled_max) = scaled_max {
            if scaled_max > 0 && snapped > scaled_max {
                snapped -= scaled_step;
            }
        }
    }

    snapped as f64 / scale
}
