//! Planner configuration.

/// How "origin before destination" is interpreted on circular routes.
///
/// Source data contains round-trip routes whose stop sequence returns to
/// its start. The policy is explicit configuration so the behavior is a
/// decision, not an accident of iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopPolicy {
    /// The boarding position must strictly precede the alighting position.
    /// Matches the production engine's historical behavior.
    #[default]
    Strict,

    /// On routes whose first and last resolved stops coincide, boarding
    /// after the alighting position is also allowed: the ride continues
    /// through the end of the sequence and wraps to the start.
    Wrap,
}

/// Configuration parameters for itinerary composition.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum last-mile walking distance, in meters. Coordinates farther
    /// than this from every stop resolve to nothing.
    pub max_walk_m: f64,

    /// Maximum number of itineraries to return.
    pub max_results: usize,

    /// Treatment of circular routes.
    pub loop_policy: LoopPolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_walk_m: 1_500.0,
            max_results: 5,
            loop_policy: LoopPolicy::Strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.max_walk_m, 1_500.0);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.loop_policy, LoopPolicy::Strict);
    }
}
