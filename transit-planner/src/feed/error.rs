//! Feed loading errors.

use crate::domain::TimeError;
use crate::timetable::ScheduleError;

/// Errors from reading a schedule feed and building its index.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The feed file couldn't be read
    #[error("failed to read feed: {0}")]
    Io(#[from] std::io::Error),

    /// The feed isn't valid JSON for a feed document
    #[error("failed to parse feed: {0}")]
    Json(#[from] serde_json::Error),

    /// The service date isn't `YYYY-MM-DD`
    #[error("invalid service date: {0}")]
    ServiceDate(String),

    /// A stop time string is malformed
    #[error("trip {trip} stop {position}: {source}")]
    Time {
        trip: String,
        position: usize,
        source: TimeError,
    },

    /// A stop time has neither arrival nor departure
    #[error("trip {trip} stop {position} has no arrival or departure time")]
    MissingTime { trip: String, position: usize },

    /// The converted schedule is malformed
    #[error("malformed schedule: {0}")]
    Schedule(#[from] ScheduleError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FeedError::MissingTime {
            trip: "T1".into(),
            position: 2,
        };
        assert_eq!(
            err.to_string(),
            "trip T1 stop 2 has no arrival or departure time"
        );

        let err = FeedError::ServiceDate("15/03/2024".into());
        assert_eq!(err.to_string(), "invalid service date: 15/03/2024");

        let err = FeedError::from(ScheduleError::DuplicateStop("A".into()));
        assert!(err.to_string().starts_with("malformed schedule: "));
    }
}
