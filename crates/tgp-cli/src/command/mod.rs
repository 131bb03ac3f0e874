use clap::{Parser, Subcommand};

use self::{classify::ClassifyArg, parity::ParityArg};

mod classify;
mod evolve;
mod parity;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve a real-valued program for multi-class classification
    Classify(#[clap(flatten)] ClassifyArg),
    /// Evolve a boolean program for a parity (or other boolean) target
    Parity(#[clap(flatten)] ParityArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Classify(arg) => classify::run(&arg)?,
        Mode::Parity(arg) => parity::run(&arg)?,
    }
    Ok(())
}
