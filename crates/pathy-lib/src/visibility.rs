//! Line-of-sight test between lattice points.
//!
//! Integer Bresenham-style stepping along the dominant axis, adapted from the
//! Theta* line-of-sight routine of Nash et al. A segment is visible when it
//! crosses the interior of no blocked cell. Grazing a lattice point between
//! two diagonally adjacent blocked cells is allowed; running along a grid line
//! is allowed unless the cells on both sides of it are blocked.

use crate::grid::{Grid, Node};

/// Whether the straight segment from `from` to `to` avoids every blocked cell.
///
/// Symmetric: `has_line_of_sight(g, a, b) == has_line_of_sight(g, b, a)`.
/// Cell reads go through [`Grid::is_blocked`], so anything off the grid is
/// treated as an obstacle.
pub fn has_line_of_sight(grid: &Grid, from: Node, to: Node) -> bool {
    let (mut x, mut y) = (from.x, from.y);
    let mut dx = to.x - from.x;
    let mut dy = to.y - from.y;

    let sx = if dx < 0 {
        dx = -dx;
        -1
    } else {
        1
    };
    let sy = if dy < 0 {
        dy = -dy;
        -1
    } else {
        1
    };

    // Offset from the current vertex to the cell entered when stepping by
    // (sx, sy): 0 going right/down, -1 going left/up.
    let ox = (sx - 1) / 2;
    let oy = (sy - 1) / 2;

    let mut f = 0;
    if dx >= dy {
        while x != to.x {
            f += dy;
            if f >= dx {
                if grid.is_blocked(x + ox, y + oy) {
                    return false;
                }
                y += sy;
                f -= dx;
            }
            if f != 0 && grid.is_blocked(x + ox, y + oy) {
                return false;
            }
            if dy == 0 && grid.is_blocked(x + ox, y) && grid.is_blocked(x + ox, y - 1) {
                return false;
            }
            x += sx;
        }
    } else {
        while y != to.y {
            f += dx;
            if f >= dy {
                if grid.is_blocked(x + ox, y + oy) {
                    return false;
                }
                x += sx;
                f -= dy;
            }
            if f != 0 && grid.is_blocked(x + ox, y + oy) {
                return false;
            }
            if dx == 0 && grid.is_blocked(x, y + oy) && grid.is_blocked(x - 1, y + oy) {
                return false;
            }
            y += sy;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertices(grid: &Grid) -> Vec<Node> {
        let mut out = Vec::new();
        for y in 0..=grid.height() as i32 {
            for x in 0..=grid.width() as i32 {
                out.push(Node::new(x, y));
            }
        }
        out
    }

    #[test]
    fn open_grid_sees_everything() {
        let grid = Grid::new(4, 3);
        let nodes = vertices(&grid);
        for &a in &nodes {
            for &b in &nodes {
                assert!(has_line_of_sight(&grid, a, b), "{a} -> {b}");
            }
        }
    }

    #[test]
    fn node_sees_itself() {
        let grid = Grid::with_blocked(2, 2, [(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert!(has_line_of_sight(&grid, Node::new(1, 1), Node::new(1, 1)));
    }

    #[test]
    fn blocked_cell_interior_hides_segment() {
        let grid = Grid::with_blocked(3, 3, [(1, 1)]);
        assert!(!has_line_of_sight(&grid, Node::new(0, 0), Node::new(3, 3)));
        assert!(!has_line_of_sight(&grid, Node::new(0, 1), Node::new(3, 2)));
        assert!(has_line_of_sight(&grid, Node::new(0, 0), Node::new(3, 0)));
        assert!(has_line_of_sight(&grid, Node::new(0, 0), Node::new(3, 1)));
    }

    #[test]
    fn diagonal_may_graze_between_two_blocked_cells() {
        // Cells (1, 0) and (0, 1) blocked; the segment (0,0)-(2,2) only
        // touches their shared corner.
        let grid = Grid::with_blocked(2, 2, [(1, 0), (0, 1)]);
        assert!(has_line_of_sight(&grid, Node::new(0, 0), Node::new(2, 2)));
        assert!(!has_line_of_sight(&grid, Node::new(2, 0), Node::new(0, 2)));
    }

    #[test]
    fn grid_line_needs_one_open_side() {
        // Row 0 blocked, row 1 open: the shared edge y = 1 stays visible.
        let grid = Grid::with_blocked(3, 2, [(0, 0), (1, 0), (2, 0)]);
        assert!(has_line_of_sight(&grid, Node::new(0, 1), Node::new(3, 1)));
        // Top border runs along blocked cells and the off-grid row.
        assert!(!has_line_of_sight(&grid, Node::new(0, 0), Node::new(3, 0)));

        // Vertical walls on both sides of x = 1.
        let grid = Grid::with_blocked(2, 2, [(0, 0), (1, 0)]);
        assert!(!has_line_of_sight(&grid, Node::new(1, 0), Node::new(1, 1)));
        assert!(has_line_of_sight(&grid, Node::new(1, 1), Node::new(1, 2)));
    }

    #[test]
    fn visibility_is_symmetric_for_every_vertex_pair() {
        let grids = [
            Grid::with_blocked(5, 4, [(1, 1), (2, 1), (3, 3), (0, 3)]),
            Grid::with_blocked(4, 4, [(1, 0), (0, 1), (2, 2), (3, 1)]),
            Grid::with_blocked(6, 3, [(2, 0), (2, 1), (4, 2), (5, 0)]),
        ];
        for grid in &grids {
            let nodes = vertices(grid);
            for &a in &nodes {
                for &b in &nodes {
                    assert_eq!(
                        has_line_of_sight(grid, a, b),
                        has_line_of_sight(grid, b, a),
                        "asymmetric visibility between {a} and {b}"
                    );
                }
            }
        }
    }
}
