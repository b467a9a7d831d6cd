//! Centimeter formatting and input parsing

/// Format a length with two decimals
pub fn format_cm(value: f64) -> String {
    format!("{:.2}", value)
}

/// Parse user input as centimeters; anything unparsable becomes 0
pub fn parse_cm(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => (value * 100.0).round() / 100.0,
        _ => 0.0,
    }
}

/// Round to the nearest multiple of `grid`; a non-positive grid leaves the value alone
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return value;
    }
    (value / grid).round() * grid
}
