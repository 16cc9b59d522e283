use super::{piece::Piece, shape::ShapeKind};

/// Playing-field width in cells.
pub const BOARD_WIDTH: usize = 10;
/// Playing-field height in cells.
pub const BOARD_HEIGHT: usize = 22;

/// The settled playing field: a fixed 10×22 grid of [`ShapeKind`] cells
/// with the origin at the bottom-left.
///
/// The board only knows about locked pieces. The still-falling piece is
/// overlay state owned by the session and never written here until it
/// locks. Mutation is limited to locking a piece's four cells and removing
/// full rows.
///
/// Coordinates passed to the accessors are a caller contract; an
/// out-of-bounds access is an invariant breach and panics rather than
/// being clamped.
#[derive(Debug, Clone)]
pub struct Board {
    cells: [ShapeKind; BOARD_WIDTH * BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [ShapeKind::Empty; BOARD_WIDTH * BOARD_HEIGHT],
        }
    }

    fn index(x: usize, y: usize) -> usize {
        assert!(x < BOARD_WIDTH && y < BOARD_HEIGHT, "cell ({x}, {y}) out of bounds");
        y * BOARD_WIDTH + x
    }

    /// The shape stored at `(x, y)`; `Empty` means unoccupied.
    #[must_use]
    pub fn shape_at(&self, x: usize, y: usize) -> ShapeKind {
        self.cells[Self::index(x, y)]
    }

    pub fn set_shape_at(&mut self, x: usize, y: usize, kind: ShapeKind) {
        self.cells[Self::index(x, y)] = kind;
    }

    /// Resets every cell to `Empty`.
    pub fn clear(&mut self) {
        self.cells.fill(ShapeKind::Empty);
    }

    /// True iff no cell in `row` is `Empty`.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        (0..BOARD_WIDTH).all(|x| !self.shape_at(x, row).is_empty())
    }

    /// Removes `row` by shifting every row above it down by one. The
    /// topmost row becomes `Empty` (rows above the board are conceptually
    /// all-empty).
    pub fn remove_row(&mut self, row: usize) {
        for r in row..BOARD_HEIGHT - 1 {
            for x in 0..BOARD_WIDTH {
                let above = self.shape_at(x, r + 1);
                self.set_shape_at(x, r, above);
            }
        }
        for x in 0..BOARD_WIDTH {
            self.set_shape_at(x, BOARD_HEIGHT - 1, ShapeKind::Empty);
        }
    }

    /// Removes every currently full row and returns how many were removed.
    ///
    /// Full rows are collected against the pre-removal snapshot and then
    /// removed top-down, so a multi-row clear is counted atomically — a
    /// row that becomes full only because the shift moved cells into it is
    /// never double-counted.
    pub fn remove_full_rows(&mut self) -> usize {
        let full_rows: Vec<usize> = (0..BOARD_HEIGHT).filter(|&r| self.is_row_full(r)).collect();
        for &row in full_rows.iter().rev() {
            self.remove_row(row);
        }
        full_rows.len()
    }

    /// True iff every cell of `piece` placed at `(x, y)` lies inside the
    /// board and is unoccupied.
    #[must_use]
    pub fn can_place(&self, piece: &Piece, x: i32, y: i32) -> bool {
        piece
            .cells_at(x, y)
            .into_iter()
            .all(|cell| match in_bounds(cell) {
                Some((cx, cy)) => self.shape_at(cx, cy).is_empty(),
                None => false,
            })
    }

    /// Locks `piece` at `(x, y)`: writes its kind into the four cells.
    ///
    /// The caller must have established legality via
    /// [`can_place`](Self::can_place); a cell outside the board panics.
    pub fn fill_piece(&mut self, piece: &Piece, x: i32, y: i32) {
        for cell in piece.cells_at(x, y) {
            let (cx, cy) = in_bounds(cell).expect("locked piece cell outside the board");
            self.set_shape_at(cx, cy, piece.kind());
        }
    }
}

/// Maps a signed cell coordinate into board indices, or `None` if it lies
/// outside `[0, width) × [0, height)`.
fn in_bounds((x, y): (i32, i32)) -> Option<(usize, usize)> {
    let x = usize::try_from(x).ok()?;
    let y = usize::try_from(y).ok()?;
    (x < BOARD_WIDTH && y < BOARD_HEIGHT).then_some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, row: usize, kind: ShapeKind) {
        for x in 0..BOARD_WIDTH {
            board.set_shape_at(x, row, kind);
        }
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                assert!(board.shape_at(x, y).is_empty());
            }
        }
    }

    #[test]
    fn row_full_detection() {
        let mut board = Board::new();
        assert!(!board.is_row_full(0));

        fill_row(&mut board, 0, ShapeKind::Line);
        assert!(board.is_row_full(0));

        board.set_shape_at(4, 0, ShapeKind::Empty);
        assert!(!board.is_row_full(0));
    }

    #[test]
    fn remove_row_shifts_rows_down_and_clears_top() {
        let mut board = Board::new();
        fill_row(&mut board, 2, ShapeKind::SShape);
        board.set_shape_at(3, 3, ShapeKind::TShape);
        fill_row(&mut board, BOARD_HEIGHT - 1, ShapeKind::ZShape);

        board.remove_row(2);

        // Row 3's lone cell moved into row 2.
        assert_eq!(board.shape_at(3, 2), ShapeKind::TShape);
        assert!(!board.is_row_full(2));
        // The former top row moved down one.
        assert!(board.is_row_full(BOARD_HEIGHT - 2));
        // The top row itself is now empty.
        for x in 0..BOARD_WIDTH {
            assert!(board.shape_at(x, BOARD_HEIGHT - 1).is_empty());
        }
    }

    #[test]
    fn remove_full_rows_clears_two_separated_rows() {
        let mut board = Board::new();
        // Rows 1 and 3 full; marker cells on rows 0, 2, and 4.
        fill_row(&mut board, 1, ShapeKind::Line);
        fill_row(&mut board, 3, ShapeKind::Line);
        board.set_shape_at(0, 0, ShapeKind::SShape);
        board.set_shape_at(1, 2, ShapeKind::TShape);
        board.set_shape_at(2, 4, ShapeKind::ZShape);

        assert_eq!(board.remove_full_rows(), 2);

        // Row 0 untouched; rows above each removed row shifted down.
        assert_eq!(board.shape_at(0, 0), ShapeKind::SShape);
        assert_eq!(board.shape_at(1, 1), ShapeKind::TShape);
        assert_eq!(board.shape_at(2, 2), ShapeKind::ZShape);
        // The two topmost rows are empty after the double shift.
        for x in 0..BOARD_WIDTH {
            assert!(board.shape_at(x, BOARD_HEIGHT - 1).is_empty());
            assert!(board.shape_at(x, BOARD_HEIGHT - 2).is_empty());
        }
    }

    #[test]
    fn remove_full_rows_does_not_double_count_shifted_rows() {
        let mut board = Board::new();
        // Row 0 full except one cell; row 1 full. After removing row 1,
        // nothing new may be counted even though cells shift into row 1.
        for x in 0..BOARD_WIDTH - 1 {
            board.set_shape_at(x, 0, ShapeKind::LShape);
        }
        fill_row(&mut board, 1, ShapeKind::Line);

        assert_eq!(board.remove_full_rows(), 1);
        assert!(!board.is_row_full(0));
    }

    #[test]
    fn can_place_rejects_out_of_bounds() {
        let board = Board::new();
        let line = Piece::new(ShapeKind::Line);

        // Horizontal line spans x-1 ..= x+2.
        assert!(board.can_place(&line, 4, 0));
        assert!(!board.can_place(&line, 0, 0));
        assert!(!board.can_place(&line, BOARD_WIDTH as i32 - 1, 0));
        assert!(!board.can_place(&line, 4, -1));
        assert!(!board.can_place(&line, 4, BOARD_HEIGHT as i32));
    }

    #[test]
    fn can_place_rejects_occupied_cells() {
        let mut board = Board::new();
        let line = Piece::new(ShapeKind::Line);
        board.set_shape_at(5, 0, ShapeKind::Square);

        assert!(!board.can_place(&line, 4, 0));
        assert!(board.can_place(&line, 4, 1));
    }

    #[test]
    fn fill_piece_writes_all_four_cells() {
        let mut board = Board::new();
        let tee = Piece::new(ShapeKind::TShape);
        board.fill_piece(&tee, 5, 10);

        assert_eq!(board.shape_at(5, 11), ShapeKind::TShape);
        assert_eq!(board.shape_at(4, 10), ShapeKind::TShape);
        assert_eq!(board.shape_at(5, 10), ShapeKind::TShape);
        assert_eq!(board.shape_at(6, 10), ShapeKind::TShape);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_access_panics() {
        let board = Board::new();
        let _ = board.shape_at(BOARD_WIDTH, 0);
    }
}
