//! Conversion of u/v flow components into speed and compass bearing.

use serde_json::Value;

/// Converts eastward (`u`) and northward (`v`) components into
/// `(speed, bearing)`.
///
/// Bearing is measured clockwise from north (+v) towards east (+u) and lies
/// in `[0, 360)`; it is the direction the flow is heading towards.
///
/// # Examples
///
/// ```
/// use seastate::uv_to_speed_bearing;
///
/// let (speed, bearing) = uv_to_speed_bearing(0.0, -2.0);
/// assert_eq!(speed, 2.0);
/// assert_eq!(bearing, 180.0);
/// ```
pub fn uv_to_speed_bearing(u: f64, v: f64) -> (f64, f64) {
    let speed = u.hypot(v);
    let bearing = (u.atan2(v).to_degrees() + 360.0) % 360.0;
    (speed, if bearing >= 360.0 { 0.0 } else { bearing })
}

/// [`uv_to_speed_bearing`] over raw JSON values.
///
/// Numbers and numeric strings are accepted. Anything else (including
/// non-finite results) yields `None` rather than an error.
pub fn to_speed_bearing(u: &Value, v: &Value) -> Option<(f64, f64)> {
    let u = as_number(u)?;
    let v = as_number(v)?;
    Some(uv_to_speed_bearing(u, v))
}

/// Numeric reading of a JSON value: numbers and numeric strings, finite only.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}
