//! Lattice neighbour generation.
//!
//! A vertex `(x, y)` touches four cells:
//!
//! ```text
//!   +-------+-------+
//!   |  NW   |  NE   |
//!   |x-1,y-1| x,y-1 |
//!   +-------N-------+
//!   |  SW   |  SE   |
//!   | x-1,y |  x,y  |
//!   +-------+-------+
//! ```
//!
//! A cardinal move follows a grid line and is allowed when either cell
//! sharing that line is open. A diagonal move crosses one cell, which must be
//! open, and additionally needs one of the two cells beside it open, so a
//! walk never squeezes through a corner whose flanks are both walls.
//!
//! Known quirk: moves are chosen from the four surrounding cells only, with
//! no notion of the incoming direction. At a concave L-shaped corner the
//! open set can therefore differ from what a direction-aware rule would give,
//! and a single open cell walled in on both sides of a vertex can only be
//! walked along its edges, never crossed. This is accepted behaviour.

use crate::grid::{Grid, Node};

/// Neighbours of `node` reachable in one step, in the fixed order
/// N, E, S, W, NW, NE, SE, SW.
pub fn traversable_neighbours(grid: &Grid, node: Node) -> Vec<Node> {
    let mut out = Vec::with_capacity(8);
    collect_traversable_neighbours(grid, node, &mut out);
    out
}

/// Same as [`traversable_neighbours`] but reuses `out`, which is cleared first.
pub fn collect_traversable_neighbours(grid: &Grid, node: Node, out: &mut Vec<Node>) {
    out.clear();
    let Node { x, y } = node;

    let nw = grid.is_open(x - 1, y - 1);
    let ne = grid.is_open(x, y - 1);
    let se = grid.is_open(x, y);
    let sw = grid.is_open(x - 1, y);

    let moves = [
        (nw || ne, 0, -1),
        (ne || se, 1, 0),
        (se || sw, 0, 1),
        (sw || nw, -1, 0),
        (nw && (ne || sw), -1, -1),
        (ne && (nw || se), 1, -1),
        (se && (ne || sw), 1, 1),
        (sw && (nw || se), -1, 1),
    ];
    for (allowed, dx, dy) in moves {
        if allowed {
            out.push(Node::new(x + dx, y + dy));
        }
    }
}
