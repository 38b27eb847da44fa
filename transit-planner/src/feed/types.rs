//! Feed document DTOs.
//!
//! Stop times may omit either the arrival or the departure; the missing one
//! is taken to equal the other.

use serde::{Deserialize, Serialize};

/// A whole schedule feed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedDocument {
    /// Service date as `YYYY-MM-DD`; stop times are offsets from its midnight.
    pub service_date: String,

    pub stops: Vec<FeedStop>,

    #[serde(default)]
    pub trips: Vec<FeedTrip>,

    #[serde(default)]
    pub footpaths: Vec<FeedFootpath>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedStop {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedTrip {
    pub id: String,

    /// Mode of transport, e.g. "bus" or "train".
    #[serde(default)]
    pub mode: Option<String>,

    pub stop_times: Vec<FeedStopTime>,
}

/// One call of a trip.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedStopTime {
    pub stop: String,

    /// `HH:MM` or `HH:MM:SS`, hours up to 47.
    #[serde(default)]
    pub arrival: Option<String>,

    #[serde(default)]
    pub departure: Option<String>,
}

/// A walking transfer, one-way unless `symmetric`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedFootpath {
    pub from: String,
    pub to: String,
    pub duration_mins: i64,

    #[serde(default)]
    pub symmetric: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_minimal_document() {
        let json = r#"{"service_date": "2024-03-15", "stops": []}"#;
        let doc: FeedDocument = serde_json::from_str(json).unwrap();

        assert_eq!(doc.service_date, "2024-03-15");
        assert!(doc.trips.is_empty());
        assert!(doc.footpaths.is_empty());
    }

    #[test]
    fn deserialize_stop_time_with_one_side() {
        let json = r#"{"stop": "A", "departure": "08:00"}"#;
        let call: FeedStopTime = serde_json::from_str(json).unwrap();

        assert_eq!(call.stop, "A");
        assert!(call.arrival.is_none());
        assert_eq!(call.departure.as_deref(), Some("08:00"));
    }

    #[test]
    fn trip_mode_is_optional() {
        let json = r#"{"id": "T1", "stop_times": []}"#;
        let trip: FeedTrip = serde_json::from_str(json).unwrap();
        assert!(trip.mode.is_none());

        let json = r#"{"id": "T2", "mode": "ferry", "stop_times": []}"#;
        let trip: FeedTrip = serde_json::from_str(json).unwrap();
        assert_eq!(trip.mode.as_deref(), Some("ferry"));
    }

    #[test]
    fn footpaths_default_to_one_way() {
        let json = r#"{"from": "A", "to": "B", "duration_mins": 4}"#;
        let footpath: FeedFootpath = serde_json::from_str(json).unwrap();

        assert!(!footpath.symmetric);
        assert_eq!(footpath.duration_mins, 4);
    }
}
