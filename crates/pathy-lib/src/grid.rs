//! Occupancy grid and lattice points.
//!
//! Cells are indexed by their top-left corner. A grid of `width x height`
//! cells therefore has vertices spanning `0..=width` by `0..=height`, and
//! searches move between vertices, never through cell centres.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A lattice point (grid-corner vertex). X grows right, Y grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub x: i32,
    pub y: i32,
}

impl Node {
    /// Create a new lattice point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether `other` differs from `self` along both axes.
    #[inline]
    pub fn is_diagonal_to(self, other: Node) -> bool {
        self.x != other.x && self.y != other.y
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Node {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Immutable boolean occupancy matrix, stored row-major. `true` = blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a fully open grid.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Self {
        let len = width
            .checked_mul(height)
            .unwrap_or_else(|| panic!("grid of {width}x{height} cells overflows usize"));
        Self {
            cells: vec![false; len],
            width,
            height,
        }
    }

    /// Create an open grid with the listed `(x, y)` cells blocked.
    ///
    /// Cells outside the grid are ignored.
    pub fn with_blocked(
        width: usize,
        height: usize,
        blocked: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut grid = Self::new(width, height);
        for (x, y) in blocked {
            if x < width && y < height {
                grid.cells[y * width + x] = true;
            }
        }
        grid
    }

    /// Build a grid from rows of cells. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.iter().map(Vec::len).sum());
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(Error::RaggedGrid {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Build a grid from an ASCII sketch: `@` or `#` is blocked, anything
    /// else is open. Blank lines and surrounding whitespace are ignored.
    pub fn from_ascii(sketch: &str) -> Result<Self> {
        let rows = sketch
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(|c| c == '@' || c == '#').collect::<Vec<_>>())
            .collect();
        Self::from_rows(rows)
    }

    /// Number of cell columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cell rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at `(x, y)` is blocked. Off-grid cells are blocked.
    #[inline]
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(idx) => self.cells[idx],
            None => true,
        }
    }

    /// Whether the cell at `(x, y)` is traversable. Off-grid cells are not.
    #[inline]
    pub fn is_open(&self, x: i32, y: i32) -> bool {
        !self.is_blocked(x, y)
    }

    /// Whether `node` is a valid vertex of this grid.
    #[inline]
    pub fn contains_vertex(&self, node: Node) -> bool {
        node.x >= 0
            && node.y >= 0
            && node.x as usize <= self.width
            && node.y as usize <= self.height
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|&&blocked| blocked).count()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_grid_cells_are_blocked() {
        let grid = Grid::new(2, 2);
        assert!(grid.is_open(0, 0));
        assert!(grid.is_open(1, 1));
        assert!(grid.is_blocked(-1, 0));
        assert!(grid.is_blocked(0, -1));
        assert!(grid.is_blocked(2, 0));
        assert!(grid.is_blocked(0, 2));
    }

    #[test]
    fn vertices_include_far_boundary() {
        let grid = Grid::new(3, 2);
        assert!(grid.contains_vertex(Node::new(0, 0)));
        assert!(grid.contains_vertex(Node::new(3, 2)));
        assert!(!grid.contains_vertex(Node::new(4, 2)));
        assert!(!grid.contains_vertex(Node::new(3, 3)));
        assert!(!grid.contains_vertex(Node::new(-1, 0)));
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn new_rejects_overflowing_dimensions() {
        Grid::new(usize::MAX, 2);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Grid::from_rows(vec![vec![false, false], vec![true]]).unwrap_err();
        assert!(matches!(
            err,
            Error::RaggedGrid {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn ascii_sketch_marks_walls() {
        let grid = Grid::from_ascii(
            "
            ..@
            #..
            ",
        )
        .unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert!(grid.is_blocked(2, 0));
        assert!(grid.is_blocked(0, 1));
        assert_eq!(grid.blocked_count(), 2);
    }

    #[test]
    fn nodes_order_row_major() {
        let mut nodes = vec![Node::new(2, 1), Node::new(0, 1), Node::new(5, 0)];
        nodes.sort();
        assert_eq!(nodes, vec![Node::new(5, 0), Node::new(0, 1), Node::new(2, 1)]);
    }
}
