pub mod matrix;
pub mod row;
pub mod sweep;

use std::path::PathBuf;

use clap::Args;
use santa_core::SantaError;
use santa_prob::{EngineConfig, Procedure};

/// Engine settings shared by every subcommand. Flags override the config file.
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// YAML engine configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Monte Carlo trials for large groups.
    #[arg(long)]
    pub trials: Option<u64>,
    /// Seed for reproducible Monte Carlo runs.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Draw procedure: `ordered` or `swap-repair`.
    #[arg(long)]
    pub procedure: Option<Procedure>,
    /// Group size from which Monte Carlo replaces exact enumeration.
    #[arg(long)]
    pub threshold: Option<usize>,
}

impl EngineArgs {
    pub fn resolve(&self) -> Result<EngineConfig, SantaError> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(procedure) = self.procedure {
            config.procedure = procedure;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        config.validate()?;
        Ok(config)
    }
}
