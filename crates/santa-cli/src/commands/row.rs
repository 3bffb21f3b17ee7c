use std::error::Error;

use clap::Args;

use super::matrix::compute;
use super::EngineArgs;
use crate::render;

#[derive(Args, Debug)]
pub struct RowArgs {
    /// Group size.
    #[arg(long, short = 'n', allow_hyphen_values = true)]
    pub n: i64,
    /// Participant label, e.g. `B`.
    #[arg(long)]
    pub person: String,
    /// Render the isolated row as a heatmap.
    #[arg(long)]
    pub heatmap: bool,
    #[command(flatten)]
    pub engine: EngineArgs,
}

pub fn run(args: &RowArgs) -> Result<(), Box<dyn Error>> {
    let report = compute(args.n, &args.engine)?;
    let labels = render::labels(report.matrix.size());
    let index = render::find_label(&labels, &args.person)?;
    print!("{}", render::row_view(&report.matrix, &labels, index)?);
    if args.heatmap {
        println!();
        let isolated = report.matrix.isolate_row(index)?;
        print!("{}", render::heatmap(&isolated, &labels));
    }
    Ok(())
}
