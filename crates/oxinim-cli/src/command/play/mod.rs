use std::{path::PathBuf, time::Duration};

use oxinim_ai::AiType;
use oxinim_engine::{GameSeed, HeapLayout, WinCondition};
use rand::Rng as _;

use crate::{
    command::play::app::PlayApp,
    game::{FirstMover, GameConfig, Opponent},
    record,
    tui::Tui,
};

mod app;

const DEFAULT_AI_DELAY_MS: u64 = 1000;
const DEFAULT_RECORD_DIR: &str = "./data/recordings/";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Who plays against you: `computer` or `human` (hot-seat)
    #[clap(long, default_value_t = Opponent::Computer)]
    opponent: Opponent,
    /// Strategy of the computer opponent: `optimal` or `random`
    #[clap(long, default_value_t = AiType::Optimal)]
    ai: AiType,
    /// Play misère: whoever takes the last item loses
    #[clap(long)]
    misere: bool,
    /// Initial heap layout: `random` or `staircase`
    #[clap(long, default_value_t = HeapLayout::Random)]
    layout: HeapLayout,
    /// Seed (32 hex characters) for a reproducible game; random when omitted
    #[clap(long)]
    seed: Option<GameSeed>,
    /// Who moves first: `you`, `opponent` or `random`
    #[clap(long, default_value_t = FirstMover::Random)]
    first: FirstMover,
    /// Milliseconds the computer waits before moving
    #[clap(long, default_value_t = DEFAULT_AI_DELAY_MS)]
    ai_delay_ms: u64,
    /// Save each game recording to a file when the session ends
    #[clap(long)]
    save_recording: bool,
    /// Directory to save recording files
    #[clap(long, default_value = DEFAULT_RECORD_DIR)]
    record_dir: PathBuf,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            opponent: Opponent::Computer,
            ai: AiType::Optimal,
            misere: false,
            layout: HeapLayout::Random,
            seed: None,
            first: FirstMover::Random,
            ai_delay_ms: DEFAULT_AI_DELAY_MS,
            save_recording: false,
            record_dir: PathBuf::from(DEFAULT_RECORD_DIR),
        }
    }
}

impl PlayArg {
    fn config(&self) -> GameConfig {
        GameConfig {
            win_condition: WinCondition::from_misere_flag(self.misere),
            layout: self.layout,
            opponent: self.opponent,
            ai_type: self.ai,
            first: self.first,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut app = PlayApp::new(
        arg.config(),
        seed,
        Duration::from_millis(arg.ai_delay_ms),
    );

    let tui_result = Tui::new().run(&mut app);
    let (recordings, app_result) = app.finish();

    if arg.save_recording {
        for recording in &recordings {
            let path = record::save(recording, &arg.record_dir)?;
            eprintln!("Recording saved to {}", path.display());
        }
    }

    tui_result?;
    app_result
}
