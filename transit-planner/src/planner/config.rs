//! Planner configuration.

use chrono::Duration;

/// Configuration parameters for journey queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Minimum time between alighting and any onward ride or walk (minutes).
    /// Not charged when alighting at the destination or staying aboard.
    pub min_change_mins: i64,

    /// Maximum walking time to consider (minutes).
    /// Footpaths longer than this are ignored.
    pub max_walk_mins: i64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(min_change_mins: i64, max_walk_mins: i64) -> Self {
        Self {
            min_change_mins,
            max_walk_mins,
        }
    }

    /// Returns the minimum change time as a Duration.
    pub fn min_change(&self) -> Duration {
        Duration::minutes(self.min_change_mins)
    }

    /// Returns the maximum walk time as a Duration.
    pub fn max_walk(&self) -> Duration {
        Duration::minutes(self.max_walk_mins)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            min_change_mins: 0,
            max_walk_mins: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.min_change_mins, 0);
        assert_eq!(config.max_walk_mins, 60);
    }

    #[test]
    fn duration_methods() {
        let config = PlannerConfig::default();

        assert_eq!(config.min_change(), Duration::zero());
        assert_eq!(config.max_walk(), Duration::minutes(60));
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(3, 10);

        assert_eq!(config.min_change(), Duration::minutes(3));
        assert_eq!(config.max_walk(), Duration::minutes(10));
    }
}
