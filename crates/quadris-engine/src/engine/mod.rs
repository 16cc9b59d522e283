//! Game orchestration built on top of the [`core`](crate::core) types:
//!
//! - [`GameSession`] - the spawn/fall/lock/clear state machine
//! - [`GameStats`] - score, level, and line counters
//! - [`PieceQueue`] - the fixed-depth lookahead queue of upcoming shapes
//! - [`QueueSeed`] - seed for deterministic shape draws

pub use self::{game_session::*, game_stats::*, piece_queue::*};

mod game_session;
mod game_stats;
mod piece_queue;
