//! Presentation-boundary number formatting.
//!
//! Values travel through the system as full-precision `f64`; these helpers
//! are the only place they are rounded or rendered as text.

/// Render a value as `"<mantissa> x 10^<exponent>"` with a two-decimal
/// mantissa, e.g. `0.0162 -> "1.62 x 10^-2"`.
pub fn format_scientific(value: f64) -> String {
    let rendered = format!("{value:.2e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => format!("{mantissa} x 10^{exponent}"),
        None => rendered,
    }
}

/// Render a value with a fixed number of decimal places.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}
