/// Format a fraction as a percentage (0.0123 -> "1.23%")
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a price with two decimals and thousands separators
pub fn format_price(value: f64) -> String {
    let abs_value = value.abs();
    let whole = abs_value.trunc() as u64;
    let mut cents = ((abs_value - whole as f64) * 100.0).round() as u64;
    let mut whole = whole;
    if cents == 100 {
        whole += 1;
        cents = 0;
    }

    let digits = whole.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let whole_formatted: String = result.chars().rev().collect();

    if value < 0.0 {
        format!("-{whole_formatted}.{cents:02}")
    } else {
        format!("{whole_formatted}.{cents:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0123), "1.23%");
        assert_eq!(format_percentage(-0.5), "-50.00%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(100.0), "100.00");
        assert_eq!(format_price(1234567.891), "1,234,567.89");
        assert_eq!(format_price(999.999), "1,000.00");
        assert_eq!(format_price(-42.5), "-42.50");
    }
}
