//! AssureID date values
//!
//! Dates arrive as strings such as `/Date(1609459200000)/` or
//! `/Date(-86400000+0000)/`. The number inside the last pair of parentheses
//! is milliseconds since the Unix epoch.

use chrono::DateTime;

const CARD_DATE_FORMAT: &str = "%m-%d-%Y";

/// Format an AssureID date value as `MM-DD-YYYY` (UTC).
///
/// Returns `None` when no epoch value can be read from `raw`.
pub fn parse_epoch_date(raw: &str) -> Option<String> {
    let open = raw.rfind('(')?;
    let close = raw.rfind(')')?;
    if close <= open {
        return None;
    }

    let millis = leading_integer(&raw[open + 1..close])?;
    // Integer division truncates toward zero, also for pre-1970 values
    let seconds = millis / 1000;

    DateTime::from_timestamp(seconds, 0).map(|date| date.format(CARD_DATE_FORMAT).to_string())
}

/// Parse the optionally signed run of digits at the start of `value`
fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let sign_len = usize::from(value.starts_with(['-', '+']));
    let digit_len = value[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();

    if digit_len == 0 {
        return None;
    }

    value[..sign_len + digit_len].parse().ok()
}
