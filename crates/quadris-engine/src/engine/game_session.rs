use std::time::Duration;

use arrayvec::ArrayVec;

use crate::{
    core::{BOARD_HEIGHT, Board, Piece, ShapeKind},
    engine::{DEFAULT_LOOKAHEAD, GameStats, PieceQueue},
};

/// Lifecycle phase of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionPhase {
    /// Created but never started.
    Idle,
    /// Gravity ticks are advancing the active piece.
    Running,
    /// Ticking is suspended; all state is retained.
    Paused,
    /// One tick of delay after a line clear, with the active piece hidden,
    /// so the renderer gets a frame showing the compacted board before the
    /// next piece appears.
    WaitingAfterLine,
    /// Terminal until [`GameSession::start`] is called again.
    GameOver,
}

/// Result surface reported after each gravity tick.
///
/// The rows cleared by the tick and the terminal phase are separate
/// fields; a game over is signalled by `phase`, never smuggled through
/// the `lines_cleared` count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub phase: SessionPhase,
    /// Rows cleared by this tick (0 if none).
    pub lines_cleared: usize,
    pub score: usize,
    pub level: usize,
    pub total_lines: usize,
}

/// Column where new pieces enter the board.
const SPAWN_COLUMN: i32 = 4;

/// Board row index of the topmost row, as a spawn-math coordinate.
#[expect(clippy::cast_possible_wrap)]
const TOP_ROW: i32 = BOARD_HEIGHT as i32 - 1;

/// Floor for the gravity interval. The level curve underflows toward zero
/// long before its base goes non-positive, so the computed interval is
/// clamped here.
const MIN_GRAVITY_INTERVAL: Duration = Duration::from_millis(10);

/// Seconds-per-row gravity curve `(0.8 - 0.007 * level) ^ level`,
/// converted to whole milliseconds and clamped to
/// [`MIN_GRAVITY_INTERVAL`].
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn gravity_interval_for(level: usize) -> Duration {
    let x = level as f64;
    let base = 0.8 - 0.007 * x;
    if base <= 0.0 {
        return MIN_GRAVITY_INTERVAL;
    }
    Duration::from_millis((base.powf(x) * 1000.0) as u64).max(MIN_GRAVITY_INTERVAL)
}

/// The spawn/fall/lock/clear state machine of one game.
///
/// The session owns the board, the active piece and its position, the
/// lookahead queue, and the scoring counters. All mutation happens through
/// the tick and the input commands, each of which runs to completion —
/// a single tick may cascade through descend, lock, clear, and spawn
/// before returning. The session is single-threaded by design: callers
/// driving it from multiple threads must serialize access behind one lock,
/// since the board and the active piece are not independently partitioned.
///
/// Commands are observably inert outside [`SessionPhase::Running`]
/// (except [`toggle_pause`](Self::toggle_pause) and
/// [`start`](Self::start)); an illegal move or rotation is a normal
/// rejected outcome, not an error.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    queue: PieceQueue,
    active: Piece,
    cur_x: i32,
    cur_y: i32,
    phase: SessionPhase,
    stats: GameStats,
    /// Id of the current active piece; increments on every spawn and
    /// resets with the session, replacing any notion of a global piece
    /// counter on the shape type.
    piece_id: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates an idle session with a randomly seeded queue of the
    /// default lookahead depth. Nothing happens until
    /// [`start`](Self::start).
    #[must_use]
    pub fn new() -> Self {
        Self::with_queue(PieceQueue::new(DEFAULT_LOOKAHEAD))
    }

    /// Like [`Self::new`], but with a caller-built queue (specific seed
    /// or lookahead depth).
    #[must_use]
    pub fn with_queue(queue: PieceQueue) -> Self {
        Self {
            board: Board::new(),
            queue,
            active: Piece::empty(),
            cur_x: 0,
            cur_y: 0,
            phase: SessionPhase::Idle,
            stats: GameStats::new(),
            piece_id: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Id of the currently active piece (0 before the first spawn).
    #[must_use]
    pub fn piece_id(&self) -> u64 {
        self.piece_id
    }

    /// The shape locked at board cell `(x, y)`; `Empty` for unoccupied.
    /// Side-effect-free; the active piece is never visible through this.
    #[must_use]
    pub fn shape_at(&self, x: usize, y: usize) -> ShapeKind {
        self.board.shape_at(x, y)
    }

    /// Kind of the active piece; `Empty` while no piece is falling.
    #[must_use]
    pub fn active_piece_kind(&self) -> ShapeKind {
        self.active.kind()
    }

    /// The 0-4 absolute board cells of the active piece. Empty while no
    /// piece is falling (`Idle`, `WaitingAfterLine`, `GameOver`).
    #[must_use]
    pub fn active_piece_cells(&self) -> ArrayVec<(usize, usize), 4> {
        let mut cells = ArrayVec::new();
        if self.active.kind().is_empty() {
            return cells;
        }
        for (x, y) in self.active.cells_at(self.cur_x, self.cur_y) {
            let x = usize::try_from(x).expect("active piece cell left the board");
            let y = usize::try_from(y).expect("active piece cell left the board");
            cells.push((x, y));
        }
        cells
    }

    /// Upcoming shapes, next to spawn first.
    pub fn preview_pieces(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        self.queue.preview()
    }

    /// The current seconds-per-row gravity interval for this session's
    /// level. The scheduler driving [`tick`](Self::tick) re-arms its timer
    /// from this after every tick.
    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        gravity_interval_for(self.stats.level())
    }

    /// Starts a fresh game. Valid from any phase: clears the board,
    /// resets the counters, and spawns the first piece.
    pub fn start(&mut self) {
        self.board.clear();
        self.stats = GameStats::new();
        self.piece_id = 0;
        self.phase = SessionPhase::Running;
        self.spawn_piece();
    }

    /// Toggles between `Running` and `Paused`. A no-op in every other
    /// phase, including before the first start.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            SessionPhase::Running => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Running,
            other => other,
        };
    }

    /// Advances gravity by one step.
    ///
    /// - `Running`: descend one row, or lock/clear/spawn when descent is
    ///   rejected.
    /// - `WaitingAfterLine`: spawn the next piece.
    /// - `Idle`/`Paused`/`GameOver`: inert.
    pub fn tick(&mut self) -> TickReport {
        let lines_cleared = match self.phase {
            SessionPhase::Running => self.descend_or_lock(),
            SessionPhase::WaitingAfterLine => {
                self.phase = SessionPhase::Running;
                self.spawn_piece();
                0
            }
            SessionPhase::Idle | SessionPhase::Paused | SessionPhase::GameOver => 0,
        };
        TickReport {
            phase: self.phase,
            lines_cleared,
            score: self.stats.score(),
            level: self.stats.level(),
            total_lines: self.stats.total_cleared_lines(),
        }
    }

    pub fn move_left(&mut self) {
        if self.phase.is_running() {
            let _ = self.try_move(self.active, self.cur_x - 1, self.cur_y);
        }
    }

    pub fn move_right(&mut self) {
        if self.phase.is_running() {
            let _ = self.try_move(self.active, self.cur_x + 1, self.cur_y);
        }
    }

    /// Tries the left-rotated piece at the current position. A rejected
    /// rotation leaves the piece unchanged; there is no wall-kick or
    /// offset-retry search.
    pub fn rotate_left(&mut self) {
        if self.phase.is_running() {
            let _ = self.try_move(self.active.rotated_left(), self.cur_x, self.cur_y);
        }
    }

    pub fn rotate_right(&mut self) {
        if self.phase.is_running() {
            let _ = self.try_move(self.active.rotated_right(), self.cur_x, self.cur_y);
        }
    }

    /// Descends one row; a rejected descent locks the piece.
    pub fn soft_drop(&mut self) {
        if self.phase.is_running() {
            let _ = self.descend_or_lock();
        }
    }

    /// Descends until rejection, then runs the lock sequence exactly once.
    pub fn hard_drop(&mut self) {
        if self.phase.is_running() {
            while self.try_move(self.active, self.cur_x, self.cur_y - 1) {}
            let _ = self.lock_active();
        }
    }

    /// One gravity descent; locks on rejection. Returns the rows cleared
    /// by a resulting lock (0 otherwise).
    fn descend_or_lock(&mut self) -> usize {
        if self.try_move(self.active, self.cur_x, self.cur_y - 1) {
            0
        } else {
            self.lock_active()
        }
    }

    /// The single movement primitive: places `candidate` at `(x, y)` if
    /// every cell is inside the board and unoccupied. On success the
    /// active piece and position are replaced atomically; on rejection
    /// nothing changes.
    fn try_move(&mut self, candidate: Piece, x: i32, y: i32) -> bool {
        if !self.board.can_place(&candidate, x, y) {
            return false;
        }
        self.active = candidate;
        self.cur_x = x;
        self.cur_y = y;
        true
    }

    /// Locks the active piece into the board and evaluates full rows.
    /// With clears the session holds one tick in `WaitingAfterLine` and
    /// hides the piece; without clears the next piece spawns immediately.
    fn lock_active(&mut self) -> usize {
        self.board.fill_piece(&self.active, self.cur_x, self.cur_y);
        let cleared = self.board.remove_full_rows();
        self.stats.record_piece_locked(cleared);
        if cleared > 0 {
            self.active = Piece::empty();
            self.phase = SessionPhase::WaitingAfterLine;
        } else {
            self.spawn_piece();
        }
        cleared
    }

    /// Takes the next shape from the queue and places it just above the
    /// visible top: the spawn row compensates for shapes whose lowest cell
    /// sits below their nominal origin. A rejected placement is a spawn
    /// collision and ends the game.
    fn spawn_piece(&mut self) {
        let piece = Piece::new(self.queue.pop_next());
        self.piece_id += 1;
        let spawn_y = TOP_ROW + piece.min_y();
        if !self.try_move(piece, SPAWN_COLUMN, spawn_y) {
            self.active = Piece::empty();
            self.phase = SessionPhase::GameOver;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BOARD_WIDTH;

    fn session() -> GameSession {
        let seed = "0123456789abcdef0123456789abcdef".parse().unwrap();
        let queue = PieceQueue::with_seed(seed, DEFAULT_LOOKAHEAD);
        GameSession::with_queue(queue)
    }

    fn fill_row_except(board: &mut Board, row: usize, gap: std::ops::Range<usize>) {
        for x in 0..BOARD_WIDTH {
            if !gap.contains(&x) {
                board.set_shape_at(x, row, ShapeKind::SShape);
            }
        }
    }

    #[test]
    fn commands_are_inert_before_start() {
        let mut session = session();
        session.move_left();
        session.rotate_right();
        session.hard_drop();
        session.toggle_pause();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.active_piece_cells().is_empty());
        assert_eq!(session.tick().lines_cleared, 0);
    }

    #[test]
    fn start_spawns_first_piece_at_top() {
        let mut session = session();
        session.start();
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.piece_id(), 1);

        let cells = session.active_piece_cells();
        assert_eq!(cells.len(), 4);
        // Every spawn cell is inside the board, at the very top.
        for &(x, y) in &cells {
            assert!(x < BOARD_WIDTH);
            assert!(y >= BOARD_HEIGHT - 2);
        }
    }

    #[test]
    fn tick_descends_one_row() {
        let mut session = session();
        session.start();
        let before = session.active_piece_cells();
        let report = session.tick();
        assert_eq!(report.lines_cleared, 0);
        let after = session.active_piece_cells();
        for (&(bx, by), &(ax, ay)) in before.iter().zip(after.iter()) {
            assert_eq!(ax, bx);
            assert_eq!(ay, by - 1);
        }
    }

    #[test]
    fn move_left_rejected_at_wall() {
        let mut session = session();
        session.start();
        session.active = Piece::new(ShapeKind::Square);
        session.cur_x = 0;
        session.cur_y = 10;

        session.move_left();
        assert_eq!(session.cur_x, 0);
        session.move_right();
        assert_eq!(session.cur_x, 1);
    }

    #[test]
    fn rejected_rotation_leaves_piece_unchanged() {
        let mut session = session();
        session.start();
        // Upright line against the left wall at the floor: rotating would
        // reach x -1.
        session.active = Piece::new(ShapeKind::Line).rotated_right();
        session.cur_x = 0;
        session.cur_y = 2;

        let before = session.active;
        session.rotate_left();
        assert_eq!(session.active, before);
        assert_eq!((session.cur_x, session.cur_y), (0, 2));
    }

    #[test]
    fn pause_suspends_ticks_and_toggles_back() {
        let mut session = session();
        session.start();
        let cells = session.active_piece_cells();

        session.toggle_pause();
        assert_eq!(session.phase(), SessionPhase::Paused);
        let _ = session.tick();
        session.move_left();
        assert_eq!(session.active_piece_cells(), cells);

        // Double toggle with no tick between is equivalent to none.
        session.toggle_pause();
        session.toggle_pause();
        session.toggle_pause();
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.active_piece_cells(), cells);
    }

    #[test]
    fn single_line_clear_scores_forty_at_level_zero() {
        let mut session = session();
        session.start();
        // Row 0 filled except columns 6..=9, where a horizontal line
        // piece will land.
        fill_row_except(&mut session.board, 0, 6..BOARD_WIDTH);
        session.active = Piece::new(ShapeKind::Line);
        session.cur_x = 7;
        session.cur_y = 10;

        session.hard_drop();

        assert_eq!(session.phase(), SessionPhase::WaitingAfterLine);
        assert!(session.active_piece_cells().is_empty());
        assert_eq!(session.stats().total_cleared_lines(), 1);
        assert_eq!(session.stats().score(), 40);
        assert_eq!(session.stats().level(), 0);
        assert!(!session.board.is_row_full(0));

        // The next tick leaves the waiting state and spawns.
        let report = session.tick();
        assert_eq!(report.phase, SessionPhase::Running);
        assert_eq!(report.lines_cleared, 0);
        assert_eq!(session.active_piece_cells().len(), 4);
    }

    #[test]
    fn gravity_tick_reports_lines_cleared_by_lock() {
        let mut session = session();
        session.start();
        fill_row_except(&mut session.board, 0, 4..8);
        session.active = Piece::new(ShapeKind::Line);
        session.cur_x = 5;
        session.cur_y = 0;

        // The piece rests on the floor; the gravity tick locks and clears.
        let report = session.tick();
        assert_eq!(report.lines_cleared, 1);
        assert_eq!(report.phase, SessionPhase::WaitingAfterLine);
        assert_eq!(report.score, 40);
        assert_eq!(report.total_lines, 1);
    }

    #[test]
    fn spawn_collision_ends_the_game() {
        let mut session = session();
        session.start();
        // Occupy the two spawn rows completely.
        for y in [BOARD_HEIGHT - 2, BOARD_HEIGHT - 1] {
            for x in 0..BOARD_WIDTH {
                session.board.set_shape_at(x, y, ShapeKind::ZShape);
            }
        }

        session.spawn_piece();

        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert!(session.active_piece_cells().is_empty());

        // Terminal until an explicit restart; commands and ticks are inert.
        session.hard_drop();
        let report = session.tick();
        assert_eq!(report.phase, SessionPhase::GameOver);
        assert_eq!(report.lines_cleared, 0);
    }

    #[test]
    fn hard_drop_lands_on_floor_and_locks_once() {
        let mut session = session();
        session.start();
        session.active = Piece::new(ShapeKind::TShape);
        session.cur_x = 5;
        session.cur_y = 15;
        let locked_before = session.stats().completed_pieces();

        session.hard_drop();

        // T at origin (5, 0): stem up at (5, 1), flat row at y 0.
        assert_eq!(session.board.shape_at(5, 1), ShapeKind::TShape);
        assert_eq!(session.board.shape_at(4, 0), ShapeKind::TShape);
        assert_eq!(session.board.shape_at(5, 0), ShapeKind::TShape);
        assert_eq!(session.board.shape_at(6, 0), ShapeKind::TShape);
        // Exactly one lock/clear evaluation ran, and the next piece
        // spawned immediately (no rows were cleared).
        assert_eq!(session.stats().completed_pieces(), locked_before + 1);
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.active_piece_cells().len(), 4);
    }

    #[test]
    fn hard_drop_rests_on_occupied_cells() {
        let mut session = session();
        session.start();
        session.board.set_shape_at(5, 3, ShapeKind::Square);
        session.active = Piece::new(ShapeKind::Line);
        session.cur_x = 5;
        session.cur_y = 15;

        session.hard_drop();

        // The highest unoccupied resting row above the obstacle is 4.
        assert_eq!(session.board.shape_at(5, 4), ShapeKind::Line);
        assert_eq!(session.board.shape_at(4, 4), ShapeKind::Line);
    }

    #[test]
    fn piece_ids_increase_per_spawn_and_reset_on_start() {
        let mut session = session();
        session.start();
        assert_eq!(session.piece_id(), 1);
        session.hard_drop();
        assert_eq!(session.piece_id(), 2);

        session.start();
        assert_eq!(session.piece_id(), 1);
    }

    #[test]
    fn start_from_game_over_resets_everything() {
        let mut session = session();
        session.start();
        session.board.set_shape_at(0, 0, ShapeKind::Line);
        session.phase = SessionPhase::GameOver;

        session.start();

        assert_eq!(session.phase(), SessionPhase::Running);
        assert!(session.board.shape_at(0, 0).is_empty());
        assert_eq!(session.stats(), &GameStats::new());
    }

    #[test]
    fn queue_depth_stays_constant_through_play() {
        let mut session = session();
        session.start();
        for _ in 0..10 {
            session.hard_drop();
            assert_eq!(session.preview_pieces().count(), DEFAULT_LOOKAHEAD);
        }
    }

    #[test]
    fn gravity_interval_follows_level_curve() {
        assert_eq!(gravity_interval_for(0), Duration::from_millis(1000));
        assert_eq!(gravity_interval_for(1), Duration::from_millis(793));
        // Faster as levels rise, never below the clamp.
        assert!(gravity_interval_for(5) < gravity_interval_for(1));
        assert!(gravity_interval_for(10) < gravity_interval_for(5));
        assert_eq!(gravity_interval_for(300), MIN_GRAVITY_INTERVAL);
    }
}
