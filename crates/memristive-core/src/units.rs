//! Engineering units and SI prefix handling.
//!
//! Simulation inputs span many decades (pA currents, µs steps, kHz drives),
//! so command-line values accept SPICE-style suffixes and reported values are
//! scaled to the nearest SI prefix.

/// SI prefixes used for display, largest first.
const DISPLAY_PREFIXES: [(f64, &str); 10] = [
    (1e12, "T"),
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "k"),
    (1.0, ""),
    (1e-3, "m"),
    (1e-6, "u"),
    (1e-9, "n"),
    (1e-12, "p"),
    (1e-15, "f"),
];

/// Parse a value with an optional SPICE-style SI suffix.
///
/// Supported suffixes (case-insensitive):
/// - T (tera, 1e12)
/// - G (giga, 1e9)
/// - MEG (mega, 1e6)
/// - K (kilo, 1e3)
/// - M (milli, 1e-3)
/// - U (micro, 1e-6)
/// - N (nano, 1e-9)
/// - P (pico, 1e-12)
/// - F (femto, 1e-15)
///
/// Trailing unit letters after the prefix are ignored, so `10ms`, `1uS` and
/// `5V` parse as expected.
pub fn parse_value(s: &str) -> Option<f64> {
    let s = s.trim().to_uppercase();

    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }

    let num_end = s
        .find(|c: char| !c.is_ascii_digit() && !matches!(c, '.' | '-' | '+' | 'E'))
        .unwrap_or(s.len());

    if num_end == 0 {
        return None;
    }

    let (num_str, suffix) = s.split_at(num_end);
    let value: f64 = num_str.parse().ok()?;

    let multiplier = if suffix.starts_with("MEG") {
        1e6
    } else {
        match suffix.chars().next() {
            Some('T') => 1e12,
            Some('G') => 1e9,
            Some('K') => 1e3,
            Some('M') => 1e-3,
            Some('U') => 1e-6,
            Some('N') => 1e-9,
            Some('P') => 1e-12,
            Some('F') => 1e-15,
            Some('S') | Some('V') | Some('A') | Some('H') => 1.0,
            _ => return None,
        }
    };

    Some(value * multiplier)
}

/// Scale factor and SI prefix for the order of magnitude of `value`.
///
/// Returns `(1.0, "")` for zero and for values outside the table, so
/// `value / scale` is always safe to display.
pub fn magnitude(value: f64) -> (f64, &'static str) {
    let abs_value = value.abs();
    if abs_value == 0.0 || !abs_value.is_finite() {
        return (1.0, "");
    }

    DISPLAY_PREFIXES
        .iter()
        .find(|(scale, _)| abs_value >= *scale)
        .copied()
        .unwrap_or((1.0, ""))
}

/// Format a value with an SI prefix and unit symbol, e.g. `12.5000uA`.
pub fn format_with_unit(value: f64, unit: &str) -> String {
    let (scale, prefix) = magnitude(value);
    format!("{:.4}{}{}", value / scale, prefix, unit)
}

/// Format a value with the appropriate SI prefix.
pub fn format_value(value: f64) -> String {
    format_with_unit(value, "")
}
