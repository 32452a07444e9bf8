//! US dollar currency formatting

/// Format an amount as `en-US` USD with two fraction digits: `$1,234.50`, `-$5.00`
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if negative { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// Insert a comma every three digits from the right
fn group_thousands(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    let mut index = digits.len() % 3;
    if index == 0 {
        index = 3;
    }
    result.push_str(&digits[..index]);
    while index < digits.len() {
        result.push(',');
        result.push_str(&digits[index..index + 3]);
        index += 3;
    }
    result
}
