//! Engine configuration.

use crate::solver::SolverConfig;

/// Configuration for the scheduling [`Engine`](super::Engine).
///
/// # Examples
///
/// ```
/// use u_confsched::engine::EngineConfig;
/// use u_confsched::solver::SolverConfig;
///
/// let config = EngineConfig::default()
///     .with_solver(SolverConfig::default().with_time_limit_ms(2_000))
///     .with_presolve(true)
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Settings forwarded to the solver back-end.
    pub solver: SolverConfig,

    /// Run cheap counting checks before invoking the solver.
    ///
    /// Disabling leaves every infeasibility proof to the solver; results
    /// do not change, only which stage reports them. A session with no
    /// candidate placement is then reported as
    /// [`InfeasibilityReason::ProvenBySolver`](crate::error::InfeasibilityReason::ProvenBySolver)
    /// rather than
    /// [`InfeasibilityReason::NoCandidates`](crate::error::InfeasibilityReason::NoCandidates).
    pub presolve: bool,

    /// Whether [`Engine::process_batch`](super::Engine::process_batch)
    /// solves instances in parallel using rayon.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            presolve: true,
            parallel: true,
        }
    }
}

impl EngineConfig {
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_presolve(mut self, presolve: bool) -> Self {
        self.presolve = presolve;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.solver.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.presolve);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_solver_config() {
        let config =
            EngineConfig::default().with_solver(SolverConfig::default().with_check_interval(0));
        assert!(config.validate().is_err());
    }
}
