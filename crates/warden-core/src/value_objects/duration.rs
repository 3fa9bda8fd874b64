//! Sanction duration tokens
//!
//! Accepted forms: a bare integer (minutes) or an integer followed by one of
//! `s`, `m`, `h`, `d`.

/// Longest temporary sanction accepted by default (28 days)
pub const MAX_SANCTION_DURATION_MS: i64 = 28 * DAY_MS;

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Parse a duration token into milliseconds
///
/// Returns `None` for malformed tokens, zero-length durations, and values
/// that overflow.
pub fn parse_duration_ms(token: &str) -> Option<i64> {
    parse_length_ms(token).filter(|ms| *ms > 0)
}

/// Whether a token is well formed but spans no time at all (`0`, `0d`, ...)
pub fn is_zero_duration(token: &str) -> bool {
    parse_length_ms(token) == Some(0)
}

fn parse_length_ms(token: &str) -> Option<i64> {
    let token = token.trim().to_ascii_lowercase();
    if token.is_empty() {
        return None;
    }

    let (digits, unit_ms) = match token.char_indices().last() {
        Some((idx, 's')) => (&token[..idx], SECOND_MS),
        Some((idx, 'm')) => (&token[..idx], MINUTE_MS),
        Some((idx, 'h')) => (&token[..idx], HOUR_MS),
        Some((idx, 'd')) => (&token[..idx], DAY_MS),
        _ => (token.as_str(), MINUTE_MS),
    };

    let digits = digits.trim_end();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let count: i64 = digits.parse().ok()?;
    count.checked_mul(unit_ms)
}
