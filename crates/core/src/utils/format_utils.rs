use rust_decimal::Decimal;

/// Formats an amount for display text, e.g. `1,250.00 USD`.
///
/// Stands in for the device's locale-aware formatter; reminder text only
/// needs a stable, readable rendering.
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    format!("{} {}", group_thousands(&format!("{:.2}", amount)), currency)
}

fn group_thousands(raw: &str) -> String {
    let (whole, frac) = match raw.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (raw, None),
    };
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(1250), "USD"), "1,250.00 USD");
        assert_eq!(format_amount(dec!(999.5), "EUR"), "999.50 EUR");
        assert_eq!(format_amount(dec!(1234567.89), "CAD"), "1,234,567.89 CAD");
        assert_eq!(format_amount(dec!(-4200), "USD"), "-4,200.00 USD");
    }
}
