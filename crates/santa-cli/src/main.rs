use std::error::Error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    matrix::{self, MatrixArgs},
    row::{self, RowArgs},
    sweep::{self, SweepArgs},
};

mod commands;
mod render;

#[derive(Parser, Debug)]
#[command(name = "santa", about = "Gift exchange draw probability explorer")]
struct Cli {
    /// Emit debug logs from the engine.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the full giver/recipient probability matrix.
    Matrix(MatrixArgs),
    /// Print one participant's outgoing probabilities.
    Row(RowArgs),
    /// Compute a range of group sizes and summarise each run.
    Sweep(SweepArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Matrix(args) => matrix::run(&args),
        Command::Row(args) => row::run(&args),
        Command::Sweep(args) => sweep::run(&args),
    }
}
