//! Quetzal formatting

/// Group the integer part with `,` and keep exactly two decimals.
///
/// ```
/// use contracts::shared::money::format_amount;
/// assert_eq!(format_amount(1234567.891), "1,234,567.89");
/// ```
pub fn format_amount(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let cents = (value.abs() * 100.0).round() as u64;
    let integer = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, fraction)
}

/// Currency string as shown across the admin: `Q1,234.50`.
pub fn format_quetzal(value: f64) -> String {
    let amount = format_amount(value);
    match amount.strip_prefix('-') {
        Some(rest) => format!("-Q{}", rest),
        None => format!("Q{}", amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(-0.001), "0.00");
        assert_eq!(format_amount(f64::NAN), "0.00");
    }

    #[test]
    fn test_format_quetzal() {
        assert_eq!(format_quetzal(1500.0), "Q1,500.00");
        assert_eq!(format_quetzal(-25.5), "-Q25.50");
    }
}
