/// Format a metric value for the summary table; `-` marks a failed
/// lookup.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_value_rounds_to_one_decimal() {
        assert_eq!(format_value(Some(37.25)), "37.2");
        assert_eq!(format_value(Some(0.0)), "0.0");
    }

    #[test]
    fn format_value_marks_failed_reading() {
        assert_eq!(format_value(None), "-");
    }
}
