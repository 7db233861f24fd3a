//! Trip length extraction from freeform survey answers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Day count used when nothing can be extracted.
pub const DEFAULT_TRIP_DAYS: u32 = 3;

static ENGLISH_DAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)[\s-]*day").expect("valid day pattern"));
static KOREAN_DAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*일").expect("valid 일 pattern"));

fn first_count(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        // Only digits are captured, so a failed parse is an overflow.
        .map(|digits| digits.as_str().parse::<u32>().unwrap_or(u32::MAX))
        .map(|days| days.max(1))
}

/// Extracts the number of days from strings like `"2night 3days"`,
/// `"3-day"` or `"1박 2일"`.
///
/// The English `<n> day` form wins over the Korean `<n>일` form. Counts are
/// at least 1 and saturate at `u32::MAX`; anything unparsable yields
/// [`DEFAULT_TRIP_DAYS`].
pub fn extract_days(duration: &str) -> u32 {
    first_count(&ENGLISH_DAYS, duration)
        .or_else(|| first_count(&KOREAN_DAYS, duration))
        .unwrap_or(DEFAULT_TRIP_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_forms() {
        assert_eq!(extract_days("2night 3days"), 3);
        assert_eq!(extract_days("3 days"), 3);
        assert_eq!(extract_days("5-day trip"), 5);
        assert_eq!(extract_days("4 DAYS"), 4);
        assert_eq!(extract_days("1day"), 1);
    }

    #[test]
    fn test_korean_forms() {
        assert_eq!(extract_days("1박 2일"), 2);
        assert_eq!(extract_days("3일"), 3);
        assert_eq!(extract_days("4박 5 일"), 5);
    }

    #[test]
    fn test_english_wins_over_korean() {
        assert_eq!(extract_days("2일 / 4 days"), 4);
    }

    #[test]
    fn test_minimum_is_one() {
        assert_eq!(extract_days("0 days"), 1);
        assert_eq!(extract_days("0일"), 1);
    }

    #[test]
    fn test_fallback_to_default() {
        assert_eq!(extract_days(""), DEFAULT_TRIP_DAYS);
        assert_eq!(extract_days("garbage"), DEFAULT_TRIP_DAYS);
        assert_eq!(extract_days("a week or so"), DEFAULT_TRIP_DAYS);
        assert_eq!(extract_days("3 nights"), DEFAULT_TRIP_DAYS);
    }

    #[test]
    fn test_overflowing_count_saturates() {
        assert_eq!(extract_days("99999999999 days"), u32::MAX);
        assert_eq!(extract_days("99999999999 days, 2일"), u32::MAX);
        assert_eq!(extract_days("99999999999일"), u32::MAX);
    }

    #[test]
    fn test_garbage_between_digits_and_unit() {
        assert_eq!(extract_days("3 whole days"), DEFAULT_TRIP_DAYS);
        assert_eq!(extract_days("3 whole days, 2 days really"), 2);
    }
}
