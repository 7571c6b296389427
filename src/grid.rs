use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use thiserror::Error;

use crate::side::Side;
use crate::tile::Tile;

/// A tile edge where external flow attaches to the grid, used as the source or
/// sink of a puzzle.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Endpoint {
    /// Row of the cell, 0-indexed from the top.
    pub row: usize,
    /// Column of the cell, 0-indexed from the left.
    pub col: usize,
    /// Which edge of that cell the flow crosses.
    pub side: Side,
}

impl Endpoint {
    /// Construct an endpoint at `(row, col)` on `side`.
    pub fn new(row: usize, col: usize, side: Side) -> Self {
        Self { row, col, side }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {:?})", self.row, self.col, self.side)
    }
}

/// Ways grid construction or endpoint lookup can fail.
#[derive(Error, Copy, Clone, Eq, PartialEq, Debug)]
pub enum GridError {
    /// The grid was built from zero rows or zero columns.
    #[error("grid must have at least one row and one column")]
    Empty,
    /// A row's column count disagrees with the first row's.
    #[error("row {row} has {got} columns, expected {expected}")]
    Ragged {
        /// Offending row index.
        row: usize,
        /// Column count of row 0.
        expected: usize,
        /// Column count actually found.
        got: usize,
    },
    /// A tile write referenced a cell outside the grid.
    #[error("cell ({row}, {col}) lies outside a {rows}x{cols} grid")]
    CellOutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid row count.
        rows: usize,
        /// Grid column count.
        cols: usize,
    },
    /// A source or sink endpoint referenced a cell outside the grid.
    #[error("endpoint {endpoint} lies outside a {rows}x{cols} grid")]
    EndpointOutOfBounds {
        /// The offending endpoint.
        endpoint: Endpoint,
        /// Grid row count.
        rows: usize,
        /// Grid column count.
        cols: usize,
    },
}

/// A rectangular grid of [`Tile`]s, 0-indexed by `(row, col)` from the top-left
/// corner.
///
/// The grid is a plain mutable value: the caller rotates or replaces tiles via
/// [`set_tile`](Self::set_tile) between calls to
/// [`validate`](crate::validate()), which recomputes from scratch every time.
/// Puzzles in the shipped levels are square, but nothing here requires it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Grid {
    tiles: Array2<Tile>,
}

impl Grid {
    /// Build a grid from rows of tiles, top row first.
    ///
    /// Fails with [`GridError::Empty`] if there are no rows or no columns, and
    /// with [`GridError::Ragged`] if any row's length differs from the first's.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, GridError> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        if nrows == 0 || ncols == 0 {
            return Err(GridError::Empty);
        }

        for (row, tiles) in rows.iter().enumerate() {
            if tiles.len() != ncols {
                return Err(GridError::Ragged { row, expected: ncols, got: tiles.len() });
            }
        }

        let flat = rows.into_iter().flatten().collect_vec();
        // shape matches by construction
        let tiles = Array2::from_shape_vec((nrows, ncols), flat)
            .map_err(|_| GridError::Empty)?;

        Ok(Self { tiles })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.tiles.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.tiles.ncols()
    }

    /// The tile at `(row, col)`, or `None` if out of bounds.
    pub fn tile(&self, row: usize, col: usize) -> Option<&Tile> {
        self.tiles.get((row, col))
    }

    /// Replace the tile at `(row, col)`.
    ///
    /// This is the mutation hook for rotation and tile swaps; the next
    /// [`validate`](crate::validate()) call sees the new layout.
    pub fn set_tile(&mut self, row: usize, col: usize, tile: Tile) -> Result<(), GridError> {
        let (rows, cols) = (self.rows(), self.cols());
        match self.tiles.get_mut((row, col)) {
            Some(slot) => {
                *slot = tile;
                Ok(())
            }
            None => Err(GridError::CellOutOfBounds { row, col, rows, cols }),
        }
    }

    /// Iterate over `((row, col), tile)` in row-major order.
    pub(crate) fn indexed_tiles(&self) -> impl Iterator<Item = ((usize, usize), &Tile)> {
        self.tiles.indexed_iter()
    }

    /// Fail fast if `endpoint` references a cell outside this grid.
    pub(crate) fn check_endpoint(&self, endpoint: Endpoint) -> Result<(), GridError> {
        if endpoint.row >= self.rows() || endpoint.col >= self.cols() {
            return Err(GridError::EndpointOutOfBounds {
                endpoint,
                rows: self.rows(),
                cols: self.cols(),
            });
        }

        Ok(())
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.tiles.rows() {
            for tile in row {
                write!(f, "{}", tile)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
