use santa_core::{GroupSize, ProbabilityMatrix, RngHandle, SantaError, TrialCount};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregate;
use crate::config::EngineConfig;
use crate::enumerate::enumerate;
use crate::monte_carlo::simulate;
use crate::procedure::Procedure;

/// Computation path chosen for a group size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    /// Exact enumeration followed by distribution aggregation.
    Exact,
    /// Monte Carlo simulation followed by count normalisation.
    MonteCarlo,
}

/// How a matrix was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum Method {
    /// Exact enumeration.
    Exact {
        /// Distinct complete assignments.
        assignments: usize,
        /// Mass recorded before normalisation.
        recorded_mass: f64,
        /// Mass lost to dead branches.
        dead_mass: f64,
    },
    /// Monte Carlo estimate.
    MonteCarlo {
        /// Completed draws tallied.
        trials: u64,
        /// Dead draws discarded and redrawn.
        rejected_draws: u64,
    },
}

impl Method {
    /// Route this method corresponds to.
    pub fn route(&self) -> Route {
        match self {
            Method::Exact { .. } => Route::Exact,
            Method::MonteCarlo { .. } => Route::MonteCarlo,
        }
    }
}

/// Matrix together with how it was computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixReport {
    /// Marginal probabilities.
    pub matrix: ProbabilityMatrix,
    /// Path and its statistics.
    pub method: Method,
    /// Draw procedure used.
    pub procedure: Procedure,
}

/// Routes each request to the exact or simulated path by group size.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: EngineConfig,
}

impl Dispatcher {
    /// Builds a dispatcher from a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self, SantaError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Path a group of this size takes.
    pub fn route(&self, group: GroupSize) -> Route {
        if group.get() < self.config.threshold {
            Route::Exact
        } else {
            Route::MonteCarlo
        }
    }

    /// Computes the matrix for `group`, drawing randomness from `rng` only on
    /// the Monte Carlo path.
    pub fn dispatch(
        &self,
        group: GroupSize,
        trials: TrialCount,
        rng: &mut RngHandle,
    ) -> Result<MatrixReport, SantaError> {
        let procedure = self.config.procedure;
        let route = self.route(group);
        debug!(
            n = group.get(),
            threshold = self.config.threshold,
            ?route,
            "dispatching matrix computation"
        );
        match route {
            Route::Exact => {
                let distribution = enumerate(group, procedure)?;
                let matrix = aggregate::from_distribution(&distribution);
                if let Err(err) = matrix.check_row_sums(self.config.drift_tolerance) {
                    warn!(n = group.get(), %err, "exact matrix drifted");
                }
                Ok(MatrixReport {
                    matrix,
                    method: Method::Exact {
                        assignments: distribution.len(),
                        recorded_mass: distribution.total_mass(),
                        dead_mass: distribution.dead_mass(),
                    },
                    procedure,
                })
            }
            Route::MonteCarlo => {
                let table = simulate(group, trials, procedure, rng)?;
                Ok(MatrixReport {
                    matrix: aggregate::from_counts(&table),
                    method: Method::MonteCarlo {
                        trials: table.trials(),
                        rejected_draws: table.rejected_draws(),
                    },
                    procedure,
                })
            }
        }
    }

    /// Validates raw inputs and computes the matrix using the configured seed.
    pub fn compute(&self, n: i64, trials: i64) -> Result<MatrixReport, SantaError> {
        let group = GroupSize::try_from(n)?;
        let trials = TrialCount::try_from(trials)?;
        let mut rng = RngHandle::from_optional_seed(self.config.seed);
        self.dispatch(group, trials, &mut rng)
    }
}

/// Marginal matrix for `n` participants with the default configuration.
///
/// Fails with [`SantaError::InvalidArgument`] when `n < 2` or `trials <= 0`.
/// The Monte Carlo path is seeded from entropy.
pub fn compute_matrix(n: i64, trials: i64) -> Result<ProbabilityMatrix, SantaError> {
    Ok(Dispatcher::default().compute(n, trials)?.matrix)
}

/// Like [`compute_matrix`] but with a fixed Monte Carlo seed.
pub fn compute_matrix_seeded(
    n: i64,
    trials: i64,
    seed: u64,
) -> Result<ProbabilityMatrix, SantaError> {
    let config = EngineConfig {
        seed: Some(seed),
        ..EngineConfig::default()
    };
    Ok(Dispatcher::new(config)?.compute(n, trials)?.matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_splits_routes() {
        let dispatcher = Dispatcher::default();
        assert_eq!(dispatcher.route(GroupSize::new(9).unwrap()), Route::Exact);
        assert_eq!(dispatcher.route(GroupSize::new(10).unwrap()), Route::MonteCarlo);
    }

    #[test]
    fn invalid_inputs_fail_before_computing() {
        for (n, trials) in [(1, 10), (0, 10), (-3, 10), (4, 0), (4, -1)] {
            let err = compute_matrix(n, trials).unwrap_err();
            assert!(err.is_invalid_argument(), "n={n} trials={trials}");
        }
    }

    #[test]
    fn two_people_swap_gifts() {
        let matrix = compute_matrix(2, 1).unwrap();
        assert_eq!(matrix.to_rows(), vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    }
}
