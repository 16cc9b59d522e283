/// Points awarded per simultaneously cleared row count, before the level
/// multiplier:
///
/// - 1 row: 40
/// - 2 rows: 100
/// - 3 rows: 300
/// - 4 rows: 1200
const POINT_TABLE: [usize; 5] = [0, 40, 100, 300, 1200];

/// Score, level, and line counters for one game.
///
/// All counters are monotonically non-decreasing within a game; a new
/// game replaces the whole value.
///
/// # Scoring
///
/// A clear of `n` rows awards `(level + 1) * POINT_TABLE[n]` points, where
/// the level is recomputed from the total lines *after* the cleared rows
/// are added — never before.
///
/// # Example
///
/// ```
/// use quadris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_piece_locked(4);
///
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.level(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Current level: one step per ten cleared lines (integer division).
    #[must_use]
    pub const fn level(&self) -> usize {
        self.total_cleared_lines / 10
    }

    /// Number of pieces locked into the board so far.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Histogram of clears by row count; index 0 counts locks that cleared
    /// nothing.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates the counters after a piece locked, clearing `cleared_rows`
    /// full rows (0-4).
    pub const fn record_piece_locked(&mut self, cleared_rows: usize) {
        debug_assert!(cleared_rows <= 4, "a single lock clears at most 4 rows");
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_rows;
        self.line_cleared_counter[cleared_rows] += 1;
        self.score += (self.level() + 1) * POINT_TABLE[cleared_rows];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_table_at_level_zero() {
        for (rows, points) in [(1, 40), (2, 100), (3, 300), (4, 1200)] {
            let mut stats = GameStats::new();
            stats.record_piece_locked(rows);
            assert_eq!(stats.score(), points, "{rows} rows");
            assert_eq!(stats.level(), 0);
        }
    }

    #[test]
    fn score_scales_with_level() {
        let mut stats = GameStats::new();
        // 30 single clears: level after the 30th is 3.
        for _ in 0..30 {
            stats.record_piece_locked(1);
        }
        assert_eq!(stats.level(), 3);
        assert_eq!(stats.total_cleared_lines(), 30);

        let before = stats.score();
        stats.record_piece_locked(3);
        assert_eq!(stats.score() - before, (3 + 1) * 300);
    }

    #[test]
    fn level_is_recomputed_after_lines_are_added() {
        let mut stats = GameStats::new();
        for _ in 0..9 {
            stats.record_piece_locked(1);
        }
        assert_eq!(stats.level(), 0);

        let before = stats.score();
        // The 10th line crosses the level boundary; the multiplier uses
        // the post-update level 1, not the pre-update level 0.
        stats.record_piece_locked(1);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.score() - before, (1 + 1) * 40);
    }

    #[test]
    fn locks_without_clears_score_nothing() {
        let mut stats = GameStats::new();
        stats.record_piece_locked(0);
        stats.record_piece_locked(0);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.completed_pieces(), 2);
        assert_eq!(stats.line_cleared_counter()[0], 2);
    }

    #[test]
    fn counters_are_monotonic() {
        let mut stats = GameStats::new();
        let mut last = (0, 0, 0);
        for rows in [0, 1, 0, 4, 2, 0, 3, 1] {
            stats.record_piece_locked(rows);
            let now = (stats.score(), stats.level(), stats.total_cleared_lines());
            assert!(now.0 >= last.0 && now.1 >= last.1 && now.2 >= last.2);
            last = now;
        }
    }
}
