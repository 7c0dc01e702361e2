//! Rendering of evaluation results as response text.

/// Render `value` the way it is returned to clients.
///
/// Whole finite values are printed as plain integers without a fractional
/// part or exponent (`110`, `-3`, `100000000000000000000`), negative zero
/// as `0`. Anything else uses the shortest decimal text that parses back to
/// the same value (`27.5`, `0.30000000000000004`). Non-finite values become
/// `Infinity`, `-Infinity` and `NaN`.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            "Infinity".to_owned()
        } else {
            "-Infinity".to_owned()
        };
    }
    if value.fract() == 0.0 {
        if value == 0.0 {
            return "0".to_owned();
        }
        return format!("{value:.0}");
    }
    value.to_string()
}
