use std::f64::consts::SQRT_2;

use crate::grid::Node;

/// Euclidean distance between two lattice points.
#[inline]
pub fn straight_line_distance(a: Node, b: Node) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    (dx * dx + dy * dy).sqrt()
}

/// Octile distance: the exact cost of an unobstructed 8-connected walk with
/// unit cardinal and √2 diagonal steps.
#[inline]
pub fn octile_distance(a: Node, b: Node) -> f64 {
    let dx = f64::from((a.x - b.x).abs());
    let dy = f64::from((a.y - b.y).abs());
    dx + dy + (SQRT_2 - 2.0) * dx.min(dy)
}

/// Cost of a single move between adjacent lattice points.
#[inline]
pub fn edge_cost(from: Node, to: Node) -> f64 {
    if from.is_diagonal_to(to) {
        SQRT_2
    } else {
        1.0
    }
}

/// Admissible, consistent estimates of the remaining cost to the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Always zero; turns the search into uniform-cost (Dijkstra) search.
    Zero,
    /// Octile distance, exact on an empty 8-connected lattice.
    Octile,
    /// Euclidean distance, for searches whose edges are straight segments.
    StraightLine,
}

impl Heuristic {
    #[inline]
    pub fn estimate(self, from: Node, to: Node) -> f64 {
        match self {
            Heuristic::Zero => 0.0,
            Heuristic::Octile => octile_distance(from, to),
            Heuristic::StraightLine => straight_line_distance(from, to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn straight_line_is_euclidean() {
        let d = straight_line_distance(Node::new(0, 0), Node::new(3, 4));
        assert!((d - 5.0).abs() < EPS);
    }

    #[test]
    fn octile_mixes_diagonal_and_straight_steps() {
        let d = octile_distance(Node::new(0, 0), Node::new(3, 1));
        assert!((d - (2.0 + SQRT_2)).abs() < EPS);
        let d = octile_distance(Node::new(5, 5), Node::new(2, 2));
        assert!((d - 3.0 * SQRT_2).abs() < EPS);
    }

    #[test]
    fn straight_line_never_exceeds_octile() {
        for x in -4..=4 {
            for y in -4..=4 {
                let a = Node::new(0, 0);
                let b = Node::new(x, y);
                assert!(straight_line_distance(a, b) <= octile_distance(a, b) + EPS);
            }
        }
    }

    #[test]
    fn edge_cost_distinguishes_diagonals() {
        assert_eq!(edge_cost(Node::new(1, 1), Node::new(1, 2)), 1.0);
        assert_eq!(edge_cost(Node::new(1, 1), Node::new(2, 2)), SQRT_2);
    }

    #[test]
    fn zero_heuristic_is_zero() {
        assert_eq!(Heuristic::Zero.estimate(Node::new(0, 0), Node::new(9, 9)), 0.0);
    }
}
