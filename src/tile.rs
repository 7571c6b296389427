use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use strum::VariantArray;

use crate::side::Side;

/// A single directed path through one tile, from the side flow enters to the side it exits.
///
/// Connections are one-directional even when the pipe artwork looks symmetric.
/// A tile that should carry flow both ways across the same pair of sides lists
/// the reversed pair as a second connection.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Connection {
    /// Side where flow enters the tile.
    pub entry: Side,
    /// Side where flow leaves the tile.
    pub exit: Side,
}

impl Connection {
    /// Construct a connection from `entry` to `exit`.
    pub fn new(entry: Side, exit: Side) -> Self {
        Self { entry, exit }
    }
}

/// One cell of a puzzle grid: an identifier for lookup and debugging, plus the
/// ordered set of direct paths through the cell.
///
/// The connection list is exhaustive; a tile with no connections blocks all flow.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Tile {
    id: String,
    connections: Vec<Connection>,
}

impl Tile {
    /// Construct a tile with the given identifier and connections.
    pub fn new(id: impl Into<String>, connections: Vec<Connection>) -> Self {
        Self { id: id.into(), connections }
    }

    /// A tile with no connections; blocks all flow through its cell.
    pub fn blocked() -> Self {
        Self::new("blk", vec![])
    }

    /// Straight pipe carrying flow left to right.
    pub fn straight_horizontal() -> Self {
        Self::new("s-h", vec![Connection::new(Side::Left, Side::Right)])
    }

    /// Straight pipe carrying flow top to bottom.
    pub fn straight_vertical() -> Self {
        Self::new("s-v", vec![Connection::new(Side::Top, Side::Bottom)])
    }

    /// Curve carrying flow from the top edge out the right edge.
    pub fn curve_top_right() -> Self {
        Self::new("c-tr", vec![Connection::new(Side::Top, Side::Right)])
    }

    /// Curve carrying flow from the right edge out the bottom edge.
    pub fn curve_right_bottom() -> Self {
        Self::new("c-rb", vec![Connection::new(Side::Right, Side::Bottom)])
    }

    /// Curve carrying flow from the bottom edge out the left edge.
    pub fn curve_bottom_left() -> Self {
        Self::new("c-bl", vec![Connection::new(Side::Bottom, Side::Left)])
    }

    /// Curve carrying flow from the left edge out the top edge.
    pub fn curve_left_top() -> Self {
        Self::new("c-lt", vec![Connection::new(Side::Left, Side::Top)])
    }

    /// T-junction: flow entering on the left fans out to both the top and the right.
    pub fn tee() -> Self {
        Self::new("t-j", vec![
            Connection::new(Side::Left, Side::Top),
            Connection::new(Side::Left, Side::Right),
        ])
    }

    /// Splitter: flow entering on the left fans out to both the top and the bottom.
    pub fn split() -> Self {
        Self::new("sp-h", vec![
            Connection::new(Side::Left, Side::Top),
            Connection::new(Side::Left, Side::Bottom),
        ])
    }

    /// Crossover: two independent lanes, left-to-right and top-to-bottom.
    pub fn cross() -> Self {
        Self::new("cr", vec![
            Connection::new(Side::Left, Side::Right),
            Connection::new(Side::Top, Side::Bottom),
        ])
    }

    /// The tile's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All direct paths through this tile.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Whether any connection enters this tile on `side`, i.e. the tile accepts
    /// flow arriving there.
    pub fn has_entry_on(&self, side: Side) -> bool {
        self.connections.iter().any(|conn| conn.entry == side)
    }

    /// Whether any connection exits this tile on `side`, i.e. the tile emits
    /// flow there.
    pub fn has_exit_on(&self, side: Side) -> bool {
        self.connections.iter().any(|conn| conn.exit == side)
    }
}

impl Display for Tile {
    /// One box-drawing character chosen by which sides any connection touches.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut open: HashSet<Side> = HashSet::with_capacity(Side::VARIANTS.len());
        for conn in &self.connections {
            open.insert(conn.entry);
            open.insert(conn.exit);
        }

        let touched = [Side::Top, Side::Right, Side::Bottom, Side::Left].map(|s| open.contains(&s));
        let glyph = match touched {
            // [top, right, bottom, left]
            [false, false, false, false] => '.',
            [false, true, false, true] => '─',
            [true, false, true, false] => '│',
            [true, true, false, false] => '└',
            [false, true, true, false] => '┌',
            [false, false, true, true] => '┐',
            [true, false, false, true] => '┘',
            [true, true, true, false] => '├',
            [true, false, true, true] => '┤',
            [false, true, true, true] => '┬',
            [true, true, false, true] => '┴',
            [true, true, true, true] => '┼',
            // a lone open side, e.g. a cap or malformed tile
            _ => '╴',
        };

        write!(f, "{}", glyph)
    }
}
