//! Numeric formatting for tooltips and tables.

/// Fixed two-decimal amplitude with the configured unit suffix.
pub fn format_amplitude(value: f64, unit: &str) -> String {
    format!("{:.2} {}", value, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amplitudes_use_two_decimals_and_a_unit() {
        assert_eq!(format_amplitude(12.3456, "µV"), "12.35 µV");
        assert_eq!(format_amplitude(-0.5, "µV"), "-0.50 µV");
        assert_eq!(format_amplitude(0.0, "µV"), "0.00 µV");
    }
}
