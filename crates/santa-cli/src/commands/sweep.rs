use std::error::Error;
use std::time::Instant;

use clap::Args;
use rand::RngCore;
use santa_core::{derive_substream_seed, GroupSize, RngHandle, TrialCount};
use santa_prob::{Dispatcher, Method};
use tracing::info;

use super::EngineArgs;

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Smallest group size.
    #[arg(long, default_value_t = 2)]
    pub from: usize,
    /// Largest group size (inclusive).
    #[arg(long)]
    pub to: usize,
    #[command(flatten)]
    pub engine: EngineArgs,
}

pub fn run(args: &SweepArgs) -> Result<(), Box<dyn Error>> {
    let config = args.engine.resolve()?;
    let master_seed = match config.seed {
        Some(seed) => seed,
        None => RngHandle::from_entropy().next_u64(),
    };
    let trials = TrialCount::new(config.trials)?;
    let dispatcher = Dispatcher::new(config)?;
    info!(from = args.from, to = args.to, master_seed, "starting sweep");

    println!("{:>4} {:>12} {:>12} {:>10}", "n", "method", "max_col_dev", "ms");
    for n in args.from..=args.to {
        let group = GroupSize::new(n)?;
        let mut rng = RngHandle::from_seed(derive_substream_seed(master_seed, n as u64));
        let started = Instant::now();
        let report = dispatcher.dispatch(group, trials, &mut rng)?;
        let elapsed = started.elapsed().as_millis();
        let deviation = report
            .matrix
            .column_sums()
            .into_iter()
            .map(|sum| (sum - 1.0).abs())
            .fold(0.0, f64::max);
        let method = match report.method {
            Method::Exact { .. } => "exact",
            Method::MonteCarlo { .. } => "monte-carlo",
        };
        println!("{n:>4} {method:>12} {deviation:>12.6} {elapsed:>10}");
    }
    Ok(())
}
