use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// Cell state of the playing field: one of the seven tetromino kinds, or
/// `Empty` for an unoccupied cell.
///
/// The naming follows the classic scheme where `LShape` is the J-tetromino
/// and `MirroredLShape` is the L-tetromino.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[repr(u8)]
pub enum ShapeKind {
    /// No shape; marks an unoccupied cell and the hidden falling piece.
    #[default]
    Empty = 0,
    /// I-tetromino.
    Line = 1,
    /// J-tetromino.
    LShape = 2,
    /// L-tetromino.
    MirroredLShape = 3,
    /// O-tetromino.
    Square = 4,
    /// S-tetromino.
    SShape = 5,
    /// T-tetromino.
    TShape = 6,
    /// Z-tetromino.
    ZShape = 7,
}

/// Draws uniformly from the seven non-empty kinds; `Empty` is never
/// produced by a random draw.
impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        match rng.random_range(1..=7) {
            1 => ShapeKind::Line,
            2 => ShapeKind::LShape,
            3 => ShapeKind::MirroredLShape,
            4 => ShapeKind::Square,
            5 => ShapeKind::SShape,
            6 => ShapeKind::TShape,
            _ => ShapeKind::ZShape,
        }
    }
}

impl ShapeKind {
    /// Number of non-empty shape kinds (7).
    pub const LEN: usize = 7;

    /// The shape's four relative cell offsets.
    ///
    /// Offsets are in piece-local space where y grows *upward*; the flip
    /// to board rows happens in [`Piece::cells_at`](super::Piece::cells_at),
    /// never here. Total for every kind; `Empty` maps to four zero offsets.
    #[must_use]
    pub const fn offsets(self) -> [(i32, i32); 4] {
        OFFSET_TABLE[self as usize]
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == ShapeKind::Empty
    }
}

/// Canonical spawn-orientation offsets, indexed by `ShapeKind as usize`.
const OFFSET_TABLE: [[(i32, i32); 4]; 8] = [
    [(0, 0), (0, 0), (0, 0), (0, 0)],
    [(-1, 0), (0, 0), (1, 0), (2, 0)],   // Line
    [(1, -1), (-1, 0), (0, 0), (1, 0)],  // LShape
    [(-1, -1), (-1, 0), (0, 0), (1, 0)], // MirroredLShape
    [(0, 0), (1, 0), (0, -1), (1, -1)],  // Square
    [(-1, 0), (0, 0), (0, -1), (1, -1)], // SShape
    [(0, -1), (-1, 0), (0, 0), (1, 0)],  // TShape
    [(-1, -1), (0, -1), (0, 0), (1, 0)], // ZShape
];
