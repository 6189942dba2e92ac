use anyhow::{anyhow, Result};
use chrono::{NaiveDateTime, NaiveTime};

/// Format used by reminder times, e.g. `08:00`.
pub const REMINDER_FORMAT: &str = "%H:%M";

/// Current minute in the same shape reminder times are stored in.
pub fn minute_of(moment: NaiveDateTime) -> String {
    moment.format(REMINDER_FORMAT).to_string()
}

/// Validates a user supplied reminder time and normalises it, so `8:5` becomes `08:05`.
pub fn parse_reminder_time(value: &str) -> Result<String> {
    let value = value.trim();
    let time = NaiveTime::parse_from_str(value, REMINDER_FORMAT)
        .map_err(|e| anyhow!("Reminder time should look like HH:mm, got {value:?}: {e}"))?;
    Ok(time.format(REMINDER_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_minute_is_zero_padded() {
        let moment = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 5, 59)
            .unwrap();
        assert_eq!(minute_of(moment), "08:05");
    }

    #[test]
    fn test_reminder_time_is_normalised() {
        assert_eq!(parse_reminder_time("8:05").unwrap(), "08:05");
        assert_eq!(parse_reminder_time(" 21:30 ").unwrap(), "21:30");
    }

    #[test]
    fn test_reminder_time_rejects_garbage() {
        assert!(parse_reminder_time("25:00").is_err());
        assert!(parse_reminder_time("morning").is_err());
    }
}
