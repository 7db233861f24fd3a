//! `HH:MM-HH:MM` interval parsing.

/// Minutes since midnight.
pub type Minutes = u32;

/// Parses one `H:MM` or `HH:MM` token, surrounding whitespace allowed.
///
/// Anything else (wrong widths, non-digits, missing colon) reads as `0`.
/// Hours are not range checked.
pub fn parse_clock(token: &str) -> Minutes {
    let Some((hours, minutes)) = token.trim().split_once(':') else {
        return 0;
    };

    let well_formed = (1..=2).contains(&hours.len())
        && minutes.len() == 2
        && hours.bytes().all(|b| b.is_ascii_digit())
        && minutes.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return 0;
    }

    match (hours.parse::<Minutes>(), minutes.parse::<Minutes>()) {
        (Ok(h), Ok(m)) => h * 60 + m,
        _ => 0,
    }
}

/// Parses `"08:00-10:30"` into `(480, 630)`.
///
/// Each side that fails to parse becomes `0`; input without a `-` yields
/// `(0, 0)`. Only the first `-` separates the two sides.
pub fn time_range_minutes(range: &str) -> (Minutes, Minutes) {
    match range.split_once('-') {
        Some((start, end)) => (parse_clock(start), parse_clock(end)),
        None => (0, 0),
    }
}

/// Formats minutes as zero-padded `HH:MM`.
pub fn format_hhmm(minutes: Minutes) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Formats an interval as `HH:MM-HH:MM`.
pub fn format_range(start: Minutes, end: Minutes) -> String {
    format!("{}-{}", format_hhmm(start), format_hhmm(end))
}
