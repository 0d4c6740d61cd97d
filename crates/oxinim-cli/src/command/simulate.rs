use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use oxinim_ai::{AiType, ComputerPlayer, is_winning_position};
use oxinim_engine::{GameSeed, GameSession, HeapLayout, Side, WinCondition};
use rand::Rng as _;
use serde::Serialize;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[arg(long, default_value_t = 1000)]
    games: usize,
    /// Strategy of the side that moves first
    #[arg(long, default_value_t = AiType::Optimal)]
    first_ai: AiType,
    /// Strategy of the side that moves second
    #[arg(long, default_value_t = AiType::Optimal)]
    second_ai: AiType,
    /// Play misère: whoever takes the last item loses
    #[arg(long)]
    misere: bool,
    /// Initial heap layout: `random` or `staircase`
    #[arg(long, default_value_t = HeapLayout::Random)]
    layout: HeapLayout,
    /// Seed (32 hex characters) for the whole run; random when omitted
    #[arg(long)]
    seed: Option<GameSeed>,
    /// Write a JSON summary to this file instead of printing a table
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
struct SimulationConfig {
    games: usize,
    players: [AiType; 2],
    win_condition: WinCondition,
    layout: HeapLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct SimulationSummary {
    seed: GameSeed,
    games: usize,
    win_condition: WinCondition,
    layout: HeapLayout,
    first_ai: AiType,
    second_ai: AiType,
    first_wins: usize,
    second_wins: usize,
    average_turns: f64,
    /// Present when both sides play optimally
    theory: Option<TheoryCheck>,
}

/// How often the side that should win from the initial position did win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct TheoryCheck {
    first_player_positions: usize,
    agreed: usize,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        games,
        first_ai,
        second_ai,
        misere,
        layout,
        seed,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let config = SimulationConfig {
        games: *games,
        players: [*first_ai, *second_ai],
        win_condition: WinCondition::from_misere_flag(*misere),
        layout: *layout,
    };
    tracing::info!(%seed, games, win_condition = %config.win_condition, "simulation started");
    let summary = simulate(&config, seed)?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &summary)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
            writeln!(writer)
                .and_then(|()| writer.flush())
                .with_context(|| format!("Failed to flush output to {}", path.display()))?;
            eprintln!("Summary written to {}", path.display());
        }
        None => print_summary(&summary),
    }
    Ok(())
}

fn simulate(config: &SimulationConfig, seed: GameSeed) -> anyhow::Result<SimulationSummary> {
    let computers = config
        .players
        .map(|ai_type| ComputerPlayer::new(ai_type, config.win_condition));
    let check_theory = config.players.iter().all(|ai| *ai == AiType::Optimal);

    let mut seeds = seed.rng();
    let mut wins = [0; 2];
    let mut total_turns = 0;
    let mut theory = TheoryCheck {
        first_player_positions: 0,
        agreed: 0,
    };

    for game in 0..config.games {
        let game_seed: GameSeed = seeds.random();
        let mut rng = game_seed.rng();
        let heaps = config.layout.generate(&mut rng);
        let first_should_win = is_winning_position(&heaps, config.win_condition)?;
        let mut session = GameSession::new(heaps, config.win_condition, Side::First);

        while session.state().is_playing() {
            let computer = &computers[session.to_move().index()];
            let mv = computer.select_move(session.heaps(), &mut rng)?;
            session.apply_move(mv)?;
        }
        let winner = session
            .winner()
            .context("finished game without a winner")?;
        tracing::debug!(game, %game_seed, ?winner, turns = session.turn(), "game finished");

        wins[winner.index()] += 1;
        total_turns += session.turn();
        theory.first_player_positions += usize::from(first_should_win);
        let expected = if first_should_win {
            Side::First
        } else {
            Side::Second
        };
        theory.agreed += usize::from(winner == expected);
    }

    #[expect(clippy::cast_precision_loss)]
    let average_turns = if config.games == 0 {
        0.0
    } else {
        total_turns as f64 / config.games as f64
    };
    Ok(SimulationSummary {
        seed,
        games: config.games,
        win_condition: config.win_condition,
        layout: config.layout,
        first_ai: config.players[0],
        second_ai: config.players[1],
        first_wins: wins[0],
        second_wins: wins[1],
        average_turns,
        theory: check_theory.then_some(theory),
    })
}

fn print_summary(summary: &SimulationSummary) {
    #[expect(clippy::cast_precision_loss)]
    let percent = |count: usize| {
        if summary.games == 0 {
            0.0
        } else {
            count as f64 * 100.0 / summary.games as f64
        }
    };

    println!(
        "Simulated {} {} games ({} layout, seed {})",
        summary.games, summary.win_condition, summary.layout, summary.seed
    );
    println!();
    println!("  {:<8} {:<10} {:>8} {:>8}", "Side", "AI", "Wins", "Wins%");
    println!("  {}", "-".repeat(37));
    for (side, ai, wins) in [
        ("first", summary.first_ai, summary.first_wins),
        ("second", summary.second_ai, summary.second_wins),
    ] {
        println!(
            "  {:<8} {:<10} {:>8} {:>7.1}%",
            side,
            ai.to_string(),
            wins,
            percent(wins)
        );
    }
    println!();
    println!("  Average turns per game: {:.1}", summary.average_turns);
    if let Some(theory) = summary.theory {
        println!(
            "  Winning positions for the first side: {}",
            theory.first_player_positions
        );
        println!(
            "  Games won by the theoretical winner: {} / {}",
            theory.agreed, summary.games
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(players: [AiType; 2], win_condition: WinCondition) -> SimulationConfig {
        SimulationConfig {
            games: 200,
            players,
            win_condition,
            layout: HeapLayout::Random,
        }
    }

    #[test]
    fn test_optimal_play_matches_theory() {
        for win_condition in [WinCondition::Normal, WinCondition::Misere] {
            let config = config([AiType::Optimal; 2], win_condition);
            let summary = simulate(&config, GameSeed::from_bytes([1; 16])).unwrap();
            let theory = summary.theory.unwrap();
            assert_eq!(theory.agreed, summary.games, "{win_condition}");
            assert_eq!(summary.first_wins, theory.first_player_positions);
            assert_eq!(summary.first_wins + summary.second_wins, summary.games);
        }
    }

    #[test]
    fn test_optimal_beats_random() {
        let config = config([AiType::Random, AiType::Optimal], WinCondition::Normal);
        let summary = simulate(&config, GameSeed::from_bytes([2; 16])).unwrap();
        assert!(summary.theory.is_none());
        assert!(summary.second_wins > summary.first_wins);
    }

    #[test]
    fn test_same_seed_same_summary() {
        let config = config([AiType::Random; 2], WinCondition::Misere);
        let seed = GameSeed::from_bytes([3; 16]);
        assert_eq!(
            simulate(&config, seed).unwrap(),
            simulate(&config, seed).unwrap()
        );
    }

    #[test]
    fn test_summary_json() {
        let config = SimulationConfig {
            games: 3,
            ..config([AiType::Optimal; 2], WinCondition::Normal)
        };
        let summary = simulate(&config, GameSeed::from_bytes([4; 16])).unwrap();
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["games"], 3);
        assert_eq!(value["first_ai"], "Optimal");
        assert!(value["theory"]["agreed"].is_u64());
    }
}
