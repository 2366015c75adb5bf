//! Number formatting shared by export cells and axis ticks

/// Shortest round-trip text for a number, with whole numbers printed
/// without a fractional part
///
/// # Примеры
/// ```
/// use engine::format::format_number;
/// assert_eq!(format_number(10.0), "10");
/// assert_eq!(format_number(2.5), "2.5");
/// ```
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // also folds -0.0
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    format!("{}", value)
}

/// Percentage change with an explicit `+` for growth: "+5%", "-3.2%", "0%"
pub fn format_change(change: f64) -> String {
    if change > 0.0 {
        format!("+{}%", format_number(change))
    } else {
        format!("{}%", format_number(change))
    }
}
