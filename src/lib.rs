#![warn(missing_docs)]

//! # `flowgrid`
//!
//! Core logic for a pair of puzzle mini-games: a pipe-connection puzzle and a
//! balloon-popping arithmetic game. The UI layers live elsewhere; this crate
//! owns everything with rules in it.
//!
//! The interesting part is the pipe puzzle's connectivity check. A puzzle is a
//! rectangular [`Grid`] of [`Tile`]s, each tile holding directed entry→exit
//! [`Connection`]s between its four [`Side`]s, with flow attached to the grid
//! at a source [`Endpoint`] and expected to leave at a sink [`Endpoint`].
//! [`validate()`] answers whether it does, and hands back the set of
//! flow-carrying half-edges so a renderer can light up the active pipes.
//!
//! # Internals
//! Each call to [`validate()`] builds a transient directed graph: one node per
//! (cell, side) pair plus virtual source and sink nodes. Tile connections
//! become edges inside a cell; neighboring cells are linked across their
//! shared boundary when the exit side of one meets an entry side of the other.
//! Reachability from the source is then a plain breadth-first search. The
//! grids are tens of cells, so full recomputation per tile rotation is cheap
//! and nothing is cached between calls.
//!
//! The arithmetic game ([`ArithmeticGame`]) is a small state machine over
//! randomly generated [`Equation`]s: an 80-level run split into phases that
//! change both the operator mix and what a correct click means.

pub use equation::{difficulty_label, generate_equations, Equation, GameMode, Operator, EQUATIONS_PER_LEVEL};
pub use game::{ArithmeticGame, ClickOutcome, GameStatus, ROUND_TIME, TOTAL_LEVELS};
pub use grid::{Endpoint, Grid, GridError};
pub use level::Level;
pub use side::Side;
pub use tile::{Connection, Tile};
pub use validate::{validate, FlowNode, Validation};

pub(crate) mod equation;
pub(crate) mod game;
pub(crate) mod grid;
pub(crate) mod level;
pub(crate) mod side;
mod tests;
pub(crate) mod tile;
pub(crate) mod validate;
