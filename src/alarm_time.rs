use std::{fmt, str::FromStr};

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlarmTimeError {
    #[error("invalid time format '{0}', expected HH:MM (e.g. 07:30)")]
    InvalidFormat(String),
    #[error("hour {0} is out of range, expected 00-23")]
    HourOutOfRange(u32),
    #[error("minute {0} is out of range, expected 00-59")]
    MinuteOutOfRange(u32),
}

/// Hour and minute of the day the alarm fires at, seconds are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlarmTime {
    time: NaiveTime,
}

impl AlarmTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, AlarmTimeError> {
        if hour > 23 {
            return Err(AlarmTimeError::HourOutOfRange(hour));
        }

        if minute > 59 {
            return Err(AlarmTimeError::MinuteOutOfRange(minute));
        }

        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(|time| Self { time })
            .ok_or(AlarmTimeError::HourOutOfRange(hour))
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    pub fn matches(&self, time: &NaiveTime) -> bool {
        time.hour() == self.hour() && time.minute() == self.minute()
    }

    pub fn to_naive_time(self) -> NaiveTime {
        self.time
    }

    /// Returns the start of the next minute at which this alarm would fire.
    ///
    /// If `now` already falls within the alarm minute the alarm is due
    /// immediately and `now` is returned.
    pub fn next_occurrence(&self, now: NaiveDateTime) -> NaiveDateTime {
        if self.matches(&now.time()) {
            return now;
        }

        let today = now.date().and_time(self.to_naive_time());
        if today > now {
            today
        } else {
            today + Duration::days(1)
        }
    }
}

impl FromStr for AlarmTime {
    type Err = AlarmTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid_format = || AlarmTimeError::InvalidFormat(trimmed.to_string());

        let (hour_str, minute_str) = trimmed.split_once(':').ok_or_else(invalid_format)?;
        let is_two_digits = |x: &str| x.len() == 2 && x.bytes().all(|b| b.is_ascii_digit());
        if !is_two_digits(hour_str) || !is_two_digits(minute_str) {
            return Err(invalid_format());
        }

        let hour = hour_str.parse::<u32>().map_err(|_| invalid_format())?;
        let minute = minute_str.parse::<u32>().map_err(|_| invalid_format())?;
        Self::new(hour, minute)
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn parses_valid_times() {
        assert_eq!("07:30".parse(), Ok(AlarmTime::new(7, 30).unwrap()));
        assert_eq!("00:00".parse(), Ok(AlarmTime::new(0, 0).unwrap()));
        assert_eq!("23:59".parse(), Ok(AlarmTime::new(23, 59).unwrap()));
        assert_eq!(" 12:05\n".parse(), Ok(AlarmTime::new(12, 5).unwrap()));
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["", "7:30", "0730", "07-30", "07:3", "ab:cd", "12:30:00", "+1:30", "07: 30"] {
            assert_eq!(
                input.parse::<AlarmTime>(),
                Err(AlarmTimeError::InvalidFormat(input.trim().to_string())),
                "{:?}",
                input
            );
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            "24:00".parse::<AlarmTime>(),
            Err(AlarmTimeError::HourOutOfRange(24))
        );
        assert_eq!(
            "12:60".parse::<AlarmTime>(),
            Err(AlarmTimeError::MinuteOutOfRange(60))
        );
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(AlarmTime::new(7, 5).unwrap().to_string(), "07:05");
    }

    #[test]
    fn matches_ignores_seconds() {
        let alarm = AlarmTime::new(6, 45).unwrap();
        assert!(alarm.matches(&at(6, 45, 0).time()));
        assert!(alarm.matches(&at(6, 45, 59).time()));
        assert!(!alarm.matches(&at(6, 44, 59).time()));
        assert!(!alarm.matches(&at(6, 46, 0).time()));
        assert!(!alarm.matches(&at(18, 45, 0).time()));
    }

    #[test]
    fn midnight_and_last_minute_boundaries() {
        let midnight = AlarmTime::new(0, 0).unwrap();
        let last = AlarmTime::new(23, 59).unwrap();
        assert!(midnight.matches(&at(0, 0, 30).time()));
        assert!(!midnight.matches(&at(23, 59, 59).time()));
        assert!(!midnight.matches(&at(0, 1, 0).time()));
        assert!(last.matches(&at(23, 59, 0).time()));
        assert!(!last.matches(&at(0, 0, 0).time()));
    }

    #[test]
    fn next_occurrence_later_today() {
        let alarm = AlarmTime::new(9, 0).unwrap();
        assert_eq!(alarm.next_occurrence(at(8, 30, 15)), at(9, 0, 0));
    }

    #[test]
    fn next_occurrence_already_passed_is_tomorrow() {
        let alarm = AlarmTime::new(9, 0).unwrap();
        let now = at(9, 1, 0);
        assert_eq!(
            alarm.next_occurrence(now),
            at(9, 0, 0) + Duration::days(1)
        );
    }

    #[test]
    fn next_occurrence_within_minute_is_now() {
        let alarm = AlarmTime::new(9, 0).unwrap();
        let now = at(9, 0, 42);
        assert_eq!(alarm.next_occurrence(now), now);
    }
}
