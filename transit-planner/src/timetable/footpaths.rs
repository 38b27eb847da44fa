//! Walking transfers between stops.
//!
//! Some stops are close enough to walk between, enabling transfers that no
//! trip provides. Feeds usually list them once per pair; the builder expands
//! symmetric pairs into both directions.

use chrono::Duration;

use super::model::FootpathInput;

/// Builder for the footpath list handed to `TimetableIndex::build`.
///
/// # Examples
///
/// ```
/// use transit_planner::timetable::FootpathsBuilder;
///
/// let footpaths = FootpathsBuilder::new()
///     .add_symmetric("central", "central-east", 5)
///     .add("hill", "harbour", 12)
///     .build();
///
/// assert_eq!(footpaths.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FootpathsBuilder {
    footpaths: Vec<FootpathInput>,
}

impl FootpathsBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directed footpath.
    pub fn add(self, from: &str, to: &str, duration_minutes: i64) -> Self {
        self.add_duration(from, to, Duration::minutes(duration_minutes))
    }

    /// Add a directed footpath with an exact duration.
    pub fn add_duration(mut self, from: &str, to: &str, duration: Duration) -> Self {
        self.footpaths.push(FootpathInput {
            from: from.to_string(),
            to: to.to_string(),
            duration,
        });
        self
    }

    /// Add a footpath walkable in both directions in the same time.
    pub fn add_symmetric(self, a: &str, b: &str, duration_minutes: i64) -> Self {
        self.add(a, b, duration_minutes).add(b, a, duration_minutes)
    }

    /// Returns the number of directed footpaths added so far.
    pub fn len(&self) -> usize {
        self.footpaths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.footpaths.is_empty()
    }

    /// Finish building.
    pub fn build(self) -> Vec<FootpathInput> {
        self.footpaths
    }
}
