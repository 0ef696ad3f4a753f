//! CPF (Brazilian taxpayer id) masking and validation.
//!
//! Login accepts the CPF masked or bare; the backend always receives digits.

/// Digits only.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Length, repeated-digit and check-digit validation.
#[must_use]
pub fn is_valid(raw: &str) -> bool {
    let digits: Vec<u32> = normalize(raw)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();
    if digits.len() != 11 || digits.iter().all(|d| *d == digits[0]) {
        return false;
    }
    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

fn check_digit(digits: &[u32]) -> u32 {
    let weight_start = u32::try_from(digits.len()).unwrap_or(0) + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=weight_start).rev())
        .map(|(d, w)| d * w)
        .sum();
    match (sum * 10) % 11 {
        10 => 0,
        r => r,
    }
}

/// `000.000.000-00`, or `None` unless the input has exactly 11 digits.
#[must_use]
pub fn format(raw: &str) -> Option<String> {
    let d = normalize(raw);
    if d.len() != 11 {
        return None;
    }
    Some(format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]))
}

#[cfg(test)]
#[path = "cpf_test.rs"]
mod tests;
