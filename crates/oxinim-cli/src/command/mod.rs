use std::path::PathBuf;

use clap::{Parser, Subcommand};

use self::{hint::HintArg, play::PlayArg, simulate::SimulateArg};
use crate::logging;

mod hint;
mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Write log output to this file (filter with `RUST_LOG`)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play Nim in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Run computer-vs-computer games and report the results
    Simulate(#[clap(flatten)] SimulateArg),
    /// Show the Nim-sum of a position and the suggested move
    Hint(#[clap(flatten)] HintArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or(Mode::Play(PlayArg::default()));
    logging::init(args.log_file.as_deref(), matches!(mode, Mode::Play(_)))?;

    match mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Hint(arg) => hint::run(&arg)?,
    }
    Ok(())
}
