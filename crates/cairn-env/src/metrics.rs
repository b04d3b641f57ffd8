//! Cumulative counters for one environment.
//!
//! [`EnvMetrics`] is updated by `reset()` and `step()` and read through
//! [`BlocksEnv::metrics()`](crate::BlocksEnv::metrics). Counters are
//! never reset for the life of the environment.

/// Counters and the latest engine round-trip time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvMetrics {
    /// Completed `reset()` calls.
    pub episodes: u64,
    /// Completed `step()` calls across all episodes.
    pub steps: u64,
    /// Steps whose action was rejected or could not be applied.
    pub illegal_actions: u64,
    /// Engine queries that failed at runtime.
    pub engine_failures: u64,
    /// Steps that reached the goal.
    pub goals_reached: u64,
    /// Wall-clock time of the last engine exchange in `reset()` or
    /// `step()`, in microseconds.
    pub last_engine_us: u64,
}

impl EnvMetrics {
    /// Fraction of steps that were illegal, or `0.0` before any step.
    pub fn illegal_rate(&self) -> f64 {
        if self.steps == 0 {
            return 0.0;
        }
        self.illegal_actions as f64 / self.steps as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = EnvMetrics::default();
        assert_eq!(m.episodes, 0);
        assert_eq!(m.steps, 0);
        assert_eq!(m.illegal_actions, 0);
        assert_eq!(m.engine_failures, 0);
        assert_eq!(m.goals_reached, 0);
        assert_eq!(m.last_engine_us, 0);
        assert_eq!(m.illegal_rate(), 0.0);
    }

    #[test]
    fn illegal_rate_is_a_fraction_of_steps() {
        let m = EnvMetrics {
            steps: 8,
            illegal_actions: 2,
            ..EnvMetrics::default()
        };
        assert_eq!(m.illegal_rate(), 0.25);
    }
}
