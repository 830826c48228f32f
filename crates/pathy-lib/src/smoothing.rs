//! Post-smoothing of grid-constrained paths.

use tracing::trace;

use crate::grid::Grid;
use crate::path::Path;
use crate::visibility::has_line_of_sight;

/// Shortcut `path` greedily: from each anchor, jump to the furthest later
/// node that is still visible before the first occluded one.
///
/// The first and last nodes are kept. Paths with at most two nodes are
/// returned unchanged.
///
/// # Panics
///
/// Panics if the first two nodes are not mutually visible; a lattice walk
/// always sees its own first step, so this means the input is corrupt.
pub fn smooth_path(grid: &Grid, path: &Path) -> Path {
    let nodes = path.nodes();
    if nodes.len() <= 2 {
        return path.clone();
    }
    assert!(
        has_line_of_sight(grid, nodes[0], nodes[1]),
        "no line of sight between the first two path nodes {} and {}",
        nodes[0],
        nodes[1]
    );

    let last = nodes.len() - 1;
    let mut smoothed = vec![nodes[0]];
    let mut anchor = 0;
    while anchor < last {
        let mut furthest = anchor + 1;
        while furthest < last && has_line_of_sight(grid, nodes[anchor], nodes[furthest + 1]) {
            furthest += 1;
        }
        trace!(from = %nodes[anchor], to = %nodes[furthest], skipped = furthest - anchor - 1, "shortcut");
        smoothed.push(nodes[furthest]);
        anchor = furthest;
    }
    Path::new(smoothed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Node;

    fn n(x: i32, y: i32) -> Node {
        Node::new(x, y)
    }

    #[test]
    fn short_paths_pass_through() {
        let grid = Grid::new(3, 3);
        let path = Path::new(vec![n(0, 0), n(1, 0)]);
        assert_eq!(smooth_path(&grid, &path), path);
        let single = Path::new(vec![n(2, 2)]);
        assert_eq!(smooth_path(&grid, &single), single);
    }

    #[test]
    fn open_staircase_collapses_to_one_segment() {
        let grid = Grid::new(4, 4);
        let path = Path::new(vec![n(0, 0), n(1, 0), n(2, 1), n(3, 2), n(3, 3)]);
        assert_eq!(smooth_path(&grid, &path).nodes(), &[n(0, 0), n(3, 3)]);
    }

    #[test]
    fn keeps_corner_around_obstacle() {
        let grid = Grid::from_ascii(
            "
            ...
            .@.
            ...
            ",
        )
        .unwrap();
        let path = Path::new(vec![n(0, 0), n(1, 0), n(2, 0), n(3, 1), n(3, 2), n(3, 3)]);
        let smoothed = smooth_path(&grid, &path);
        assert_eq!(smoothed.nodes(), &[n(0, 0), n(3, 1), n(3, 3)]);
        assert!(smoothed.length() < path.length());
        for (a, b) in smoothed.segments() {
            assert!(has_line_of_sight(&grid, a, b));
        }
    }

    #[test]
    #[should_panic(expected = "first two path nodes")]
    fn occluded_first_step_panics() {
        let grid = Grid::with_blocked(2, 2, [(0, 0), (1, 0), (0, 1), (1, 1)]);
        let path = Path::new(vec![n(0, 0), n(2, 2), n(2, 1)]);
        smooth_path(&grid, &path);
    }
}
