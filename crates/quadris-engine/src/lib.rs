//! Falling-block simulation engine.
//!
//! This crate owns the rules of the game and nothing else: tetromino
//! geometry, the playing-field grid, the piece lifecycle (spawn, fall,
//! lock, clear), scoring/leveling, and the level-dependent gravity
//! interval. Rendering, input, persistence, and the timer that drives
//! gravity ticks all live in the surrounding application; they interact
//! with the engine only through [`GameSession`]'s commands and its
//! side-effect-free query surface.
//!
//! # Game flow
//!
//! 1. Create a [`GameSession`] and call [`GameSession::start`].
//! 2. A periodic timer calls [`GameSession::tick`], advancing gravity.
//! 3. Input commands (`move_left`, `rotate_right`, `hard_drop`, ...) steer
//!    the falling piece between ticks.
//! 4. When a piece can no longer descend it locks into the board, full
//!    rows are cleared, and the next piece spawns from the lookahead
//!    queue.
//! 5. A spawn collision ends the game; [`GameSession::start`] begins a
//!    fresh one.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
