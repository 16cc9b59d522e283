use super::shape::ShapeKind;

/// A tetromino as a shape kind plus four relative cell offsets.
///
/// A `Piece` is an immutable value: rotation produces a *new* piece with
/// transformed offsets. It carries no board position; the session tracks
/// the origin `(cur_x, cur_y)` separately and combines the two through
/// [`cells_at`](Self::cells_at).
///
/// # Coordinate system
///
/// Offsets live in piece-local space with y growing upward. Board rows are
/// indexed from the bottom, so an absolute cell is
/// `(origin_x + dx, origin_y - dy)` — the vertical flip is applied here
/// and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    coords: [(i32, i32); 4],
}

impl Piece {
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            coords: kind.offsets(),
        }
    }

    /// The hidden piece used while no piece is falling.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(ShapeKind::Empty)
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Rotates 90° counter-clockwise: each offset `(x, y)` becomes
    /// `(y, -x)`. Identity for `Square`, whose 2×2 footprint is unchanged
    /// by rotation, so the transform is skipped entirely.
    #[must_use]
    pub fn rotated_left(&self) -> Self {
        if self.kind == ShapeKind::Square {
            return *self;
        }
        Self {
            kind: self.kind,
            coords: self.coords.map(|(x, y)| (y, -x)),
        }
    }

    /// Rotates 90° clockwise: each offset `(x, y)` becomes `(-y, x)`.
    /// Identity for `Square`.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        if self.kind == ShapeKind::Square {
            return *self;
        }
        Self {
            kind: self.kind,
            coords: self.coords.map(|(x, y)| (-y, x)),
        }
    }

    #[must_use]
    pub fn min_x(&self) -> i32 {
        self.coords.iter().map(|&(x, _)| x).fold(self.coords[0].0, i32::min)
    }

    #[must_use]
    pub fn max_x(&self) -> i32 {
        self.coords.iter().map(|&(x, _)| x).fold(self.coords[0].0, i32::max)
    }

    #[must_use]
    pub fn min_y(&self) -> i32 {
        self.coords.iter().map(|&(_, y)| y).fold(self.coords[0].1, i32::min)
    }

    #[must_use]
    pub fn max_y(&self) -> i32 {
        self.coords.iter().map(|&(_, y)| y).fold(self.coords[0].1, i32::max)
    }

    /// The four absolute board cells of this piece placed at the given
    /// origin: `(origin_x + dx, origin_y - dy)`.
    ///
    /// Results may lie outside the board; legality is the caller's concern
    /// (see [`Board::can_place`](super::Board::can_place)).
    #[must_use]
    pub fn cells_at(&self, origin_x: i32, origin_y: i32) -> [(i32, i32); 4] {
        self.coords.map(|(dx, dy)| (origin_x + dx, origin_y - dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_rotation_is_identity() {
        let square = Piece::new(ShapeKind::Square);
        assert_eq!(square.rotated_left(), square);
        assert_eq!(square.rotated_right(), square);

        let mut piece = square;
        for _ in 0..7 {
            piece = piece.rotated_right();
        }
        assert_eq!(piece, square);
    }

    #[test]
    fn left_then_right_restores_original() {
        for kind in [
            ShapeKind::Line,
            ShapeKind::LShape,
            ShapeKind::MirroredLShape,
            ShapeKind::SShape,
            ShapeKind::TShape,
            ShapeKind::ZShape,
        ] {
            let piece = Piece::new(kind);
            assert_eq!(piece.rotated_left().rotated_right(), piece);
            assert_eq!(piece.rotated_right().rotated_left(), piece);
        }
    }

    #[test]
    fn four_right_rotations_restore_original() {
        let piece = Piece::new(ShapeKind::TShape);
        let rotated = piece
            .rotated_right()
            .rotated_right()
            .rotated_right()
            .rotated_right();
        assert_eq!(rotated, piece);
    }

    #[test]
    fn rotation_is_pure() {
        let piece = Piece::new(ShapeKind::ZShape);
        let before = piece;
        let _ = piece.rotated_left();
        assert_eq!(piece, before);
    }

    #[test]
    fn extents_of_line_piece() {
        let line = Piece::new(ShapeKind::Line);
        assert_eq!(line.min_x(), -1);
        assert_eq!(line.max_x(), 2);
        assert_eq!(line.min_y(), 0);
        assert_eq!(line.max_y(), 0);

        let upright = line.rotated_right();
        assert_eq!(upright.min_x(), 0);
        assert_eq!(upright.max_x(), 0);
        assert_eq!(upright.min_y(), -1);
        assert_eq!(upright.max_y(), 2);
    }

    #[test]
    fn cells_at_applies_vertical_flip() {
        // TShape has one cell at local (0, -1), which must land one row
        // *above* the origin on the bottom-up board.
        let tee = Piece::new(ShapeKind::TShape);
        let cells = tee.cells_at(5, 10);
        assert!(cells.contains(&(5, 11)));
        assert!(cells.contains(&(4, 10)));
        assert!(cells.contains(&(5, 10)));
        assert!(cells.contains(&(6, 10)));
    }
}
