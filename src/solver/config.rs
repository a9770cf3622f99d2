//! Solver configuration.

/// Configuration passed to every [`BinarySolver`](super::BinarySolver).
///
/// # Examples
///
/// ```
/// use u_confsched::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_time_limit_ms(5_000)
///     .with_stop_after_first(true)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum solve time in milliseconds. 0 = no limit.
    pub time_limit_ms: u64,

    /// Stop after finding the first feasible solution.
    pub stop_after_first: bool,

    /// Seed for randomized tie-breaking. `None` keeps the deterministic
    /// model order.
    pub seed: Option<u64>,

    /// Nodes explored between two clock reads.
    pub check_interval: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 60_000,
            stop_after_first: false,
            seed: None,
            check_interval: 256,
        }
    }
}

impl SolverConfig {
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn with_stop_after_first(mut self, stop: bool) -> Self {
        self.stop_after_first = stop;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_check_interval(mut self, nodes: u64) -> Self {
        self.check_interval = nodes;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.check_interval == 0 {
            return Err("check_interval must be positive".into());
        }
        Ok(())
    }
}
