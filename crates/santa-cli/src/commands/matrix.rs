use std::error::Error;

use clap::{Args, ValueEnum};
use santa_core::{GroupSize, RngHandle, TrialCount};
use santa_prob::{Dispatcher, MatrixReport};
use serde::Serialize;

use super::EngineArgs;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub struct MatrixArgs {
    /// Group size.
    #[arg(long, short = 'n', allow_hyphen_values = true)]
    pub n: i64,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
    /// Append a character heatmap (text format only).
    #[arg(long)]
    pub heatmap: bool,
    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Serialize)]
struct LabelledReport<'a> {
    labels: &'a [String],
    #[serde(flatten)]
    report: &'a MatrixReport,
}

pub fn run(args: &MatrixArgs) -> Result<(), Box<dyn Error>> {
    let report = compute(args.n, &args.engine)?;
    let labels = render::labels(report.matrix.size());
    match args.format {
        Format::Text => {
            print!("{}", render::text_matrix(&report.matrix, &labels));
            if args.heatmap {
                println!();
                print!("{}", render::heatmap(&report.matrix, &labels));
            }
        }
        Format::Json => {
            let payload = LabelledReport {
                labels: &labels,
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Format::Csv => print!("{}", render::csv_matrix(&report.matrix, &labels)?),
    }
    Ok(())
}

/// Validates the raw group size and runs the dispatcher.
pub fn compute(n: i64, engine: &EngineArgs) -> Result<MatrixReport, Box<dyn Error>> {
    let group = GroupSize::try_from(n)?;
    let config = engine.resolve()?;
    let trials = TrialCount::new(config.trials)?;
    let mut rng = RngHandle::from_optional_seed(config.seed);
    let dispatcher = Dispatcher::new(config)?;
    Ok(dispatcher.dispatch(group, trials, &mut rng)?)
}
