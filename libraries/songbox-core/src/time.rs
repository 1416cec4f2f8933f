//! Duration formatting and parsing in `m:ss` form

/// Format seconds as `m:ss`; invalid or negative input renders as `0:00`
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }
    let whole = secs.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Parse a user-entered `mm:ss` duration (1-3 digit minutes, seconds 00-59)
///
/// Returns `None` for blank or malformed input.
pub fn parse_duration(text: &str) -> Option<f64> {
    let (minutes, seconds) = text.trim().split_once(':')?;

    let minutes_ok = (1..=3).contains(&minutes.len()) && minutes.bytes().all(|b| b.is_ascii_digit());
    let seconds_ok = seconds.len() == 2
        && seconds.bytes().all(|b| b.is_ascii_digit())
        && seconds.as_bytes()[0] <= b'5';
    if !minutes_ok || !seconds_ok {
        return None;
    }

    let minutes: u32 = minutes.parse().ok()?;
    let seconds: u32 = seconds.parse().ok()?;
    Some(f64::from(minutes * 60 + seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_time(600.0), "10:00");
    }

    #[test]
    fn format_time_rejects_invalid() {
        assert_eq!(format_time(-1.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn parse_duration_accepts_mm_ss() {
        assert_eq!(parse_duration("3:45"), Some(225.0));
        assert_eq!(parse_duration(" 120:00 "), Some(7200.0));
        assert_eq!(parse_duration("0:09"), Some(9.0));
    }

    #[test]
    fn parse_duration_rejects_malformed() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("3:60"), None);
        assert_eq!(parse_duration("3:5"), None);
        assert_eq!(parse_duration("1234:00"), None);
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration(":30"), None);
        assert_eq!(parse_duration("-1:30"), None);
    }
}
