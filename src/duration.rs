//! Human readable durations such as `3h`, `10mi` or `1d12h`, as accepted by
//! the cache and cookie helpers of [`HttpResponse`](crate::http::response::HttpResponse).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Used when no duration is given at all.
pub const DEFAULT_SECONDS: u64 = 60 * 60 * 24 * 30;

static WHOLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]+(?:d|h|min|mi|mn|s))+$").unwrap());
static GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)(d|h|min|mi|mn|s)").unwrap());

/// Parses a duration into seconds. `None` means thirty days.
pub fn parse_duration(duration: Option<&str>) -> Result<u64> {
    let Some(raw) = duration else {
        return Ok(DEFAULT_SECONDS);
    };
    let text = raw.trim();
    if !WHOLE.is_match(text) {
        return Err(Error::InvalidDuration(raw.to_string()));
    }

    let mut total: u64 = 0;
    for group in GROUP.captures_iter(text) {
        let amount: u64 = group[1]
            .parse()
            .map_err(|_| Error::InvalidDuration(raw.to_string()))?;
        let unit = match &group[2] {
            "d" => 60 * 60 * 24,
            "h" => 60 * 60,
            "min" | "mi" | "mn" => 60,
            _ => 1,
        };
        total = amount
            .checked_mul(unit)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(|| Error::InvalidDuration(raw.to_string()))?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_units() {
        assert_eq!(parse_duration(Some("1d")).unwrap(), 86_400);
        assert_eq!(parse_duration(Some("3h")).unwrap(), 10_800);
        assert_eq!(parse_duration(Some("10mn")).unwrap(), 600);
        assert_eq!(parse_duration(Some("10min")).unwrap(), 600);
        assert_eq!(parse_duration(Some("10mi")).unwrap(), 600);
        assert_eq!(parse_duration(Some("45s")).unwrap(), 45);
    }

    #[test]
    fn combined_units_add_up() {
        assert_eq!(parse_duration(Some("1h30mn")).unwrap(), 5_400);
        assert_eq!(parse_duration(Some("1d2h3min4s")).unwrap(), 93_784);
        assert_eq!(parse_duration(Some("2mi30s")).unwrap(), 150);
        assert_eq!(parse_duration(Some("1min1mi")).unwrap(), 120);
    }

    #[test]
    fn missing_duration_is_thirty_days() {
        assert_eq!(parse_duration(None).unwrap(), 2_592_000);
    }

    #[test]
    fn garbage_is_rejected() {
        for bad in ["", "3", "h", "3 hours", "-1h", "1w"] {
            assert!(
                matches!(parse_duration(Some(bad)), Err(Error::InvalidDuration(_))),
                "{bad:?} should not parse"
            );
        }
    }
}
