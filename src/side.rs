use strum::VariantArray;

/// One of the four edges of a square tile.
///
/// Flow enters and exits tiles through sides; a [`Connection`](crate::Connection)
/// names its entry and exit side, and two adjacent tiles meet along a
/// side/opposite-side pair.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// The side on the far end of a shared tile boundary: `Top`↔`Bottom`, `Left`↔`Right`.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// `(row, col)` delta of the neighboring cell that shares this side.
    pub(crate) fn offset(&self) -> (isize, isize) {
        match self {
            Self::Top => (-1, 0),
            Self::Right => (0, 1),
            Self::Bottom => (1, 0),
            Self::Left => (0, -1),
        }
    }
}
