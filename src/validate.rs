use std::collections::HashSet;

use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Bfs;
use strum::VariantArray;

use crate::grid::{Endpoint, Grid, GridError};
use crate::side::Side;

/// A node in the flow graph derived from a [`Grid`].
///
/// The graph is rebuilt on every [`validate`] call and never persisted; node
/// identity is the composite key itself rather than a packed integer, which
/// keeps lookups obvious at the board sizes involved (tens of cells).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum FlowNode {
    /// Virtual origin of all flow, attached outside the grid at the start endpoint.
    Source,
    /// Virtual destination; reaching it means the puzzle is solved.
    Sink,
    /// One half-edge of the grid: a specific side of a specific cell.
    Port {
        /// Cell row.
        row: usize,
        /// Cell column.
        col: usize,
        /// Which edge of the cell.
        side: Side,
    },
}

impl FlowNode {
    fn port(row: usize, col: usize, side: Side) -> Self {
        Self::Port { row, col, side }
    }
}

/// Outcome of a [`validate`] call: solvedness plus the full reachable set, so a
/// renderer can style every pipe segment as flow-active or flow-inactive.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Validation {
    /// Whether the sink is reachable from the source, i.e. the puzzle is solved.
    pub is_valid: bool,
    /// Every node reachable from [`FlowNode::Source`], the source itself included.
    pub reachable: HashSet<FlowNode>,
}

impl Validation {
    /// Whether flow reaches the given side of the given cell.
    ///
    /// A renderer draws an internal connection as active when its entry side
    /// satisfies this.
    pub fn flow_reaches(&self, row: usize, col: usize, side: Side) -> bool {
        self.reachable.contains(&FlowNode::port(row, col, side))
    }
}

/// Check whether flow entering the grid at `start` can leave it at `end`.
///
/// Builds a directed graph over half-edge nodes (one per cell side, plus the
/// virtual [`Source`](FlowNode::Source) and [`Sink`](FlowNode::Sink)):
/// each tile connection becomes an internal edge, and two neighboring cells are
/// linked across their shared boundary whenever the near cell has an exit on it
/// and the far cell has an entry on it. The two directions across one boundary
/// are added independently of each other. A breadth-first search from the
/// source then yields both the verdict and the active-flow set.
///
/// Pure function of its inputs; an unsolved puzzle is a normal
/// `is_valid: false` result, while an out-of-bounds endpoint is a
/// [`GridError::EndpointOutOfBounds`].
pub fn validate(grid: &Grid, start: Endpoint, end: Endpoint) -> Result<Validation, GridError> {
    grid.check_endpoint(start)?;
    grid.check_endpoint(end)?;

    let mut graph: DiGraphMap<FlowNode, ()> = DiGraphMap::with_capacity(
        2 + grid.rows() * grid.cols() * Side::VARIANTS.len(),
        // each cell contributes a small constant number of edges
        grid.rows() * grid.cols() * Side::VARIANTS.len(),
    );

    // the node space exists independently of any edges; a walled-off cell still
    // owns its four ports
    graph.add_node(FlowNode::Source);
    graph.add_node(FlowNode::Sink);
    for ((row, col), _) in grid.indexed_tiles() {
        for side in Side::VARIANTS {
            graph.add_node(FlowNode::port(row, col, *side));
        }
    }

    for ((row, col), tile) in grid.indexed_tiles() {
        // internal edges, one per connection; entry->exit only
        for conn in tile.connections() {
            graph.add_edge(
                FlowNode::port(row, col, conn.entry),
                FlowNode::port(row, col, conn.exit),
                (),
            );
        }

        // boundary edges toward every in-bounds neighbor with a matching entry
        for side in Side::VARIANTS {
            if !tile.has_exit_on(*side) {
                continue;
            }

            let (dr, dc) = side.offset();
            let neighbor = match (row.checked_add_signed(dr), col.checked_add_signed(dc)) {
                (Some(nr), Some(nc)) => grid.tile(nr, nc).map(|t| (nr, nc, t)),
                _ => None,
            };

            if let Some((nr, nc, neighbor_tile)) = neighbor {
                if neighbor_tile.has_entry_on(side.opposite()) {
                    graph.add_edge(
                        FlowNode::port(row, col, *side),
                        FlowNode::port(nr, nc, side.opposite()),
                        (),
                    );
                }
            }
        }
    }

    // endpoint lookups are in bounds per the checks above
    if grid.tile(start.row, start.col).is_some_and(|t| t.has_entry_on(start.side)) {
        graph.add_edge(FlowNode::Source, FlowNode::port(start.row, start.col, start.side), ());
    }
    if grid.tile(end.row, end.col).is_some_and(|t| t.has_exit_on(end.side)) {
        graph.add_edge(FlowNode::port(end.row, end.col, end.side), FlowNode::Sink, ());
    }

    let mut reachable = HashSet::new();
    let mut bfs = Bfs::new(&graph, FlowNode::Source);
    while let Some(node) = bfs.next(&graph) {
        reachable.insert(node);
    }

    Ok(Validation {
        is_valid: reachable.contains(&FlowNode::Sink),
        reachable,
    })
}
