/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a display booking reference, e.g. `SC-MF1K2QZ3AB7X`.
///
/// Layout: `SC-` + base36(millis since Unix epoch) + 4 random base36 chars,
/// uppercased. Unique enough for a customer-facing reference; authoritative
/// order ids come from the payment provider.
pub fn booking_reference() -> String {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    let suffix: String = (0..4)
        .map(|_| {
            let digit = rng.gen_range(0..36u32);
            // digit < 36, from_digit cannot fail
            std::char::from_digit(digit, 36).unwrap()
        })
        .collect();

    format!("SC-{}{}", to_base36(now_millis() as u64), suffix).to_uppercase()
}

/// u64 → base36 (0-9a-z)
fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(std::char::from_digit((value % 36) as u32, 36).unwrap());
        value /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base36_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(46655), "zzz");
    }

    #[test]
    fn test_booking_reference_shape() {
        let reference = booking_reference();

        assert!(reference.starts_with("SC-"));
        // base36 millis (8+ chars at current epoch) + 4 random chars
        assert!(reference.len() >= 3 + 8 + 4);
        assert!(
            reference[3..]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }
}
