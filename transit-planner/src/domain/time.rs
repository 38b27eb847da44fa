//! Timetable time handling.
//!
//! Schedule feeds give stop times as "HH:MM" or "HH:MM:SS" strings relative to
//! a service date. Trips that run past midnight keep counting hours (25:10 is
//! 01:10 on the following day), so every time is resolved against the service
//! date it belongs to.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::ops::{Add, Sub};

/// Latest hour accepted in a stop time (47:59:59 is the last second of the
/// day after the service date).
const MAX_HOUR: u32 = 47;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A date-aware instant in the timetable.
///
/// Ordering is chronological across dates, so a 23:50 departure sorts before a
/// 00:10 arrival on the next day.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::TransitTime;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let time = TransitTime::parse("14:30", date).unwrap();
/// assert_eq!(time.to_string(), "14:30");
///
/// // Hours past 23 belong to the following day
/// let late = TransitTime::parse("25:10", date).unwrap();
/// assert_eq!(late.date(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
/// assert!(late > time);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitTime(NaiveDateTime);

impl TransitTime {
    /// Create a new time from date and time components.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self(date.and_time(time))
    }

    /// Parse "HH:MM" or "HH:MM:SS" against a service date.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::TransitTime;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    ///
    /// assert!(TransitTime::parse("00:00", date).is_ok());
    /// assert!(TransitTime::parse("08:15:30", date).is_ok());
    /// assert!(TransitTime::parse("47:59", date).is_ok());
    ///
    /// assert!(TransitTime::parse("0815", date).is_err());
    /// assert!(TransitTime::parse("08:1", date).is_err());
    /// assert!(TransitTime::parse("48:00", date).is_err());
    /// ```
    pub fn parse(s: &str, service_date: NaiveDate) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        if bytes.len() != 5 && bytes.len() != 8 {
            return Err(TimeError::new("expected HH:MM or HH:MM:SS format"));
        }
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > MAX_HOUR {
            return Err(TimeError::new("hour must be 0-47"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let second = if bytes.len() == 8 {
            if bytes[5] != b':' {
                return Err(TimeError::new("expected colon at position 5"));
            }
            let second = parse_two_digits(&bytes[6..8])
                .ok_or_else(|| TimeError::new("invalid second digits"))?;
            if second > 59 {
                return Err(TimeError::new("second must be 0-59"));
            }
            second
        } else {
            0
        };

        let date = if hour >= 24 {
            service_date
                .succ_opt()
                .ok_or_else(|| TimeError::new("date overflow"))?
        } else {
            service_date
        };

        let time = NaiveTime::from_hms_opt(hour % 24, minute, second)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self::new(date, time))
    }

    /// Returns the calendar date of this instant.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Returns the time-of-day component.
    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Converts to a NaiveDateTime.
    pub fn to_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Add a duration, returning `None` on overflow.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        self.0.checked_add_signed(duration).map(Self)
    }

    /// Subtract a duration, returning `None` on overflow.
    pub fn checked_sub(&self, duration: Duration) -> Option<Self> {
        self.0.checked_sub_signed(duration).map(Self)
    }

    /// Returns the duration between two times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        self.0.signed_duration_since(other.0)
    }
}

impl Add<Duration> for TransitTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        self.checked_add(rhs).expect("time overflow")
    }
}

impl Sub<Duration> for TransitTime {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        self.checked_sub(rhs).expect("time overflow")
    }
}

impl fmt::Debug for TransitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransitTime({} {})", self.date(), self)
    }
}

impl fmt::Display for TransitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.second() == 0 {
            write!(f, "{:02}:{:02}", self.hour(), self.minute())
        } else {
            write!(
                f,
                "{:02}:{:02}:{:02}",
                self.hour(),
                self.minute(),
                self.second()
            )
        }
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        let d = date(2024, 3, 15);

        let t = TransitTime::parse("00:00", d).unwrap();
        assert_eq!(t.hour(), 0);
        assert_eq!(t.minute(), 0);
        assert_eq!(t.date(), d);

        let t = TransitTime::parse("23:59", d).unwrap();
        assert_eq!(t.hour(), 23);
        assert_eq!(t.minute(), 59);

        let t = TransitTime::parse("08:15:42", d).unwrap();
        assert_eq!(t.second(), 42);
    }

    #[test]
    fn hours_past_midnight_roll_to_next_day() {
        let d = date(2024, 3, 15);

        let t = TransitTime::parse("24:00", d).unwrap();
        assert_eq!(t.date(), date(2024, 3, 16));
        assert_eq!(t.hour(), 0);

        let t = TransitTime::parse("26:45:10", d).unwrap();
        assert_eq!(t.date(), date(2024, 3, 16));
        assert_eq!(t.hour(), 2);
        assert_eq!(t.minute(), 45);
    }

    #[test]
    fn reject_malformed_times() {
        let d = date(2024, 3, 15);

        assert!(TransitTime::parse("", d).is_err());
        assert!(TransitTime::parse("8:15", d).is_err());
        assert!(TransitTime::parse("08-15", d).is_err());
        assert!(TransitTime::parse("08:60", d).is_err());
        assert!(TransitTime::parse("08:15:60", d).is_err());
        assert!(TransitTime::parse("08:15-30", d).is_err());
        assert!(TransitTime::parse("ab:cd", d).is_err());
        assert!(TransitTime::parse("48:00", d).is_err());
    }

    #[test]
    fn error_display() {
        let err = TransitTime::parse("08:60", date(2024, 3, 15)).unwrap_err();
        assert_eq!(err.to_string(), "invalid time: minute must be 0-59");
    }

    #[test]
    fn ordering_crosses_dates() {
        let d = date(2024, 3, 15);
        let late = TransitTime::parse("23:50", d).unwrap();
        let after_midnight = TransitTime::parse("24:10", d).unwrap();

        assert!(late < after_midnight);
        assert_eq!(
            after_midnight.signed_duration_since(late),
            Duration::minutes(20)
        );
    }

    #[test]
    fn arithmetic() {
        let d = date(2024, 3, 15);
        let t = TransitTime::parse("23:30", d).unwrap();

        let later = t + Duration::hours(1);
        assert_eq!(later.to_string(), "00:30");
        assert_eq!(later.date(), date(2024, 3, 16));

        let earlier = t - Duration::minutes(45);
        assert_eq!(earlier.to_string(), "22:45");

        assert_eq!(t.checked_sub(Duration::minutes(5)).unwrap().minute(), 25);
    }

    #[test]
    fn display_and_debug() {
        let d = date(2024, 3, 15);
        let t = TransitTime::parse("09:05", d).unwrap();
        assert_eq!(t.to_string(), "09:05");
        assert_eq!(format!("{t:?}"), "TransitTime(2024-03-15 09:05)");

        let t = TransitTime::parse("09:05:07", d).unwrap();
        assert_eq!(t.to_string(), "09:05:07");
    }
}
