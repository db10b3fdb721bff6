//! Small shared helpers for rendering replies.

use thousands::Separable;

/// Render a number of seconds as a compact `1h 2m 3s` string.
pub fn format_duration(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    let (hours, rem) = (secs / 3600, secs % 3600);
    let (mins, secs) = (rem / 60, rem % 60);

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if mins > 0 {
        parts.push(format!("{mins}m"));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{secs}s"));
    }
    parts.join(" ")
}

/// Render a credit amount with thousands separators.
pub fn format_credits(amount: i64) -> String {
    format!("{} credits", amount.separate_with_commas())
}

/// Parse a compact duration such as `90s`, `10m`, `2h`, `1d12h`, or `1w`.
/// A bare number is seconds. Returns `None` for anything malformed or
/// non-positive.
pub fn parse_duration(input: &str) -> Option<i64> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }
    if let Ok(secs) = input.parse::<i64>() {
        return (secs > 0).then_some(secs);
    }
    let mut total: i64 = 0;
    let mut digits = String::new();
    for c in input.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if !c.is_whitespace() {
            let unit = match c {
                's' => 1,
                'm' => 60,
                'h' => 3600,
                'd' => 86_400,
                'w' => 604_800,
                _ => return None,
            };
            let n: i64 = digits.parse().ok()?;
            digits.clear();
            total = total.checked_add(n.checked_mul(unit)?)?;
        }
    }
    if !digits.is_empty() {
        return None;
    }
    (total > 0).then_some(total)
}

/// Render a `mm:ss` (or `hh:mm:ss`) track timestamp.
pub fn format_timestamp(duration: std::time::Duration) -> String {
    let total = duration.as_secs();
    let (hours, rem) = (total / 3600, total % 3600);
    let (mins, secs) = (rem / 60, rem % 60);
    if hours > 0 {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{mins}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(0, "0s")]
    #[test_case(59, "59s")]
    #[test_case(60, "1m")]
    #[test_case(185, "3m 5s")]
    #[test_case(3600, "1h")]
    #[test_case(3725, "1h 2m 5s")]
    #[test_case(-5, "0s")]
    fn durations(secs: i64, expected: &str) {
        assert_eq!(format_duration(secs), expected);
    }

    #[test]
    fn credits_get_separators() {
        assert_eq!(format_credits(1_234_567), "1,234,567 credits");
        assert_eq!(format_credits(5), "5 credits");
    }

    #[test_case(65, "1:05")]
    #[test_case(3, "0:03")]
    #[test_case(3671, "1:01:11")]
    fn timestamps(secs: u64, expected: &str) {
        assert_eq!(format_timestamp(std::time::Duration::from_secs(secs)), expected);
    }

    #[test_case("90", Some(90))]
    #[test_case("90s", Some(90))]
    #[test_case("10m", Some(600))]
    #[test_case("2h", Some(7200))]
    #[test_case("2d", Some(172_800))]
    #[test_case("1w", Some(604_800))]
    #[test_case("1d12h", Some(129_600))]
    #[test_case("1d 12h", Some(129_600))]
    #[test_case("", None)]
    #[test_case("0", None)]
    #[test_case("-5", None)]
    #[test_case("soon", None)]
    #[test_case("5x", None)]
    #[test_case("1d5", None)]
    fn durations_parse(input: &str, expected: Option<i64>) {
        assert_eq!(parse_duration(input), expected);
    }
}
