use crate::grid::{Endpoint, Grid};
use crate::side::Side;
use crate::tile::Tile;

/// One authored pipe puzzle: a grid layout plus where flow enters and must exit.
///
/// Levels are static data; progression between them is the caller's concern.
#[derive(Clone, Debug)]
pub struct Level {
    /// Stable numeric identifier.
    pub id: u32,
    /// Display name.
    pub name: &'static str,
    /// Where external flow enters the grid.
    pub start: Endpoint,
    /// Where flow must exit for the puzzle to count as solved.
    pub end: Endpoint,
    /// The initial tile layout, before the player rotates anything.
    pub grid: Grid,
}

impl Level {
    /// The shipped puzzles, in play order.
    pub fn builtin() -> Vec<Level> {
        vec![
            Level {
                id: 1,
                name: "System Boot",
                start: Endpoint::new(1, 0, Side::Left),
                end: Endpoint::new(1, 2, Side::Right),
                grid: Grid::from_rows(vec![
                    vec![Tile::straight_horizontal(), Tile::curve_right_bottom(), Tile::straight_horizontal()],
                    vec![Tile::curve_top_right(), Tile::straight_horizontal(), Tile::curve_bottom_left()],
                    vec![Tile::straight_vertical(), Tile::curve_left_top(), Tile::straight_horizontal()],
                ]).expect("authored layout is rectangular"),
            },
            Level {
                id: 2,
                name: "Data Flow",
                start: Endpoint::new(1, 0, Side::Left),
                end: Endpoint::new(2, 3, Side::Right),
                grid: Grid::from_rows(vec![
                    vec![Tile::curve_right_bottom(), Tile::straight_horizontal(), Tile::straight_horizontal(), Tile::curve_bottom_left()],
                    vec![Tile::straight_horizontal(), Tile::curve_top_right(), Tile::tee(), Tile::straight_vertical()],
                    vec![Tile::curve_top_right(), Tile::straight_horizontal(), Tile::straight_horizontal(), Tile::curve_bottom_left()],
                    vec![Tile::straight_vertical(), Tile::curve_left_top(), Tile::straight_horizontal(), Tile::straight_vertical()],
                ]).expect("authored layout is rectangular"),
            },
            Level {
                id: 3,
                name: "Mainframe Link",
                start: Endpoint::new(2, 0, Side::Left),
                end: Endpoint::new(2, 4, Side::Right),
                grid: Grid::from_rows(
                    (0..5).map(|_| (0..5).map(|_| Tile::cross()).collect()).collect()
                ).expect("authored layout is rectangular"),
            },
        ]
    }
}
