use std::fmt::Write as _;

use anyhow::Context as _;
use oxinim_ai::{decide_move, is_winning_position};
use oxinim_engine::{GameSeed, Heaps, WinCondition};
use rand::Rng;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HintArg {
    /// Heap sizes, e.g. `3 4 5`
    #[arg(required = true, num_args = 2..)]
    heaps: Vec<u32>,
    /// Evaluate under misère rules: whoever takes the last item loses
    #[arg(long)]
    misere: bool,
    /// Seed (32 hex characters) for the random choices of the strategy
    #[arg(long)]
    seed: Option<GameSeed>,
}

pub(crate) fn run(arg: &HintArg) -> anyhow::Result<()> {
    let heaps = Heaps::new(arg.heaps.iter().copied()).context("Invalid heap sizes")?;
    let win_condition = WinCondition::from_misere_flag(arg.misere);
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    tracing::debug!(%seed, heaps = ?heaps.as_slice(), "computing hint");

    let report = report(&heaps, win_condition, &mut seed.rng())?;
    print!("{report}");
    Ok(())
}

fn report<R>(heaps: &Heaps, win_condition: WinCondition, rng: &mut R) -> anyhow::Result<String>
where
    R: Rng + ?Sized,
{
    let nim_sum = heaps.nim_sum();
    let max = heaps.iter().copied().max().unwrap_or(0).max(nim_sum);
    let bits = usize::try_from(u32::BITS - max.leading_zeros())?.max(1);
    let size_width = max.to_string().len();

    let mut out = String::new();
    writeln!(out, "Rules: {win_condition}")?;
    for (i, size) in heaps.iter().enumerate() {
        writeln!(out, "  #{:<2} {size:>size_width$} = {size:0bits$b}", i + 1)?;
    }
    writeln!(out, "  {}", "-".repeat(6 + size_width + bits))?;
    writeln!(out, "  sum {nim_sum:>size_width$} = {nim_sum:0bits$b}")?;
    writeln!(out)?;

    if heaps.is_cleared() {
        writeln!(out, "The game is over: every heap is empty.")?;
        return Ok(out);
    }

    let winning = is_winning_position(heaps, win_condition)?;
    let verdict = if winning { "winning" } else { "losing" };
    writeln!(out, "Position is {verdict} for the player to move.")?;
    let mv = decide_move(heaps, win_condition, rng)?;
    writeln!(out, "Suggested move: {mv}")?;
    Ok(out)
}
