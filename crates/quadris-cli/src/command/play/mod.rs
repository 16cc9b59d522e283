use std::path::PathBuf;

use anyhow::ensure;
use quadris_engine::{DEFAULT_LOOKAHEAD, GameSession, PieceQueue, QueueSeed};

use crate::{highscore::HighScoreTable, tui::Tui};

use self::screen::PlayScreen;

mod screen;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence (32 hex chars); random when omitted
    #[clap(long)]
    seed: Option<QueueSeed>,
    /// Number of upcoming pieces shown in the NEXT panel
    #[clap(long, default_value_t = DEFAULT_LOOKAHEAD)]
    queue_depth: usize,
    /// Path of the high score file
    #[clap(long, default_value = "./high_scores.json")]
    scores_file: PathBuf,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            queue_depth: DEFAULT_LOOKAHEAD,
            scores_file: PathBuf::from("./high_scores.json"),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        queue_depth,
        scores_file,
    } = arg;
    ensure!(*queue_depth >= 1, "queue depth must be at least 1");

    let queue = match seed {
        Some(seed) => PieceQueue::with_seed(*seed, *queue_depth),
        None => PieceQueue::new(*queue_depth),
    };
    let session = GameSession::with_queue(queue);
    let scores = HighScoreTable::load(scores_file)?;

    let mut screen = PlayScreen::new(session, scores, scores_file.clone());
    Tui::new().run(&mut screen)?;
    screen.into_result()
}
