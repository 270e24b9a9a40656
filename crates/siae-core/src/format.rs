//! Pure display formatters: phone mask, byte-size humanizer, Brazilian dates.

use chrono::NaiveDate;

/// Mask a Brazilian phone number.
///
/// Non-digits are stripped first and input is truncated to 11 digits, so the
/// mask is idempotent: `(##) ####-####` for up to 10 digits, `(##) #####-####`
/// for 11 (mobile).
pub fn format_phone(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).take(11).collect();
    if digits.is_empty() {
        return String::new();
    }
    if digits.len() <= 2 {
        // Too short for a DDD group; leave the bare digits.
        return digits;
    }

    let (ddd, rest) = digits.split_at(2);
    let split = if digits.len() <= 10 { 4 } else { 5 };
    if rest.len() <= split {
        format!("({ddd}) {rest}")
    } else {
        let (prefix, suffix) = rest.split_at(split);
        format!("({ddd}) {prefix}-{suffix}")
    }
}

const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Humanize a byte count in base-1024 units with up to two decimals.
///
/// Trailing zeros are trimmed: `1048576` is "1 MB", not "1.00 MB".
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exp = (bytes.ilog2() / 10).min(BYTE_UNITS.len() as u32 - 1);
    let value = bytes as f64 / f64::powi(1024.0, exp as i32);
    let mut text = format!("{value:.2}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    format!("{} {}", text, BYTE_UNITS[exp as usize])
}

/// Render a date as `dd/MM/yyyy`.
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
