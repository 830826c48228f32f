//! Path quality metrics used by the benchmark harness.

use serde::{Deserialize, Serialize};

use crate::path::Path;

/// Heading changes smaller than this (radians) are not counted as turns.
pub const TURN_THRESHOLD: f64 = 0.001;

/// Length and turning behaviour of a path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PathMetrics {
    /// Sum of Euclidean segment lengths.
    pub length: f64,
    /// Interior nodes where the heading changes by at least [`TURN_THRESHOLD`].
    pub turns: usize,
    /// Mean heading change over the turns, in radians; 0 without turns.
    pub average_turn_angle: f64,
}

impl PathMetrics {
    pub fn measure(path: &Path) -> Self {
        let mut turns = 0;
        let mut total_angle = 0.0;
        for triple in path.nodes().windows(3) {
            let (a, b, c) = (triple[0], triple[1], triple[2]);
            let v1 = (f64::from(b.x - a.x), f64::from(b.y - a.y));
            let v2 = (f64::from(c.x - b.x), f64::from(c.y - b.y));
            let dot = v1.0 * v2.0 + v1.1 * v2.1;
            let norms = v1.0.hypot(v1.1) * v2.0.hypot(v2.1);
            if norms == 0.0 {
                continue;
            }
            let angle = (dot / norms).clamp(-1.0, 1.0).acos();
            if angle >= TURN_THRESHOLD {
                turns += 1;
                total_angle += angle;
            }
        }

        Self {
            length: path.length(),
            turns,
            average_turn_angle: if turns > 0 {
                total_angle / turns as f64
            } else {
                0.0
            },
        }
    }

    /// Average turn angle in degrees.
    pub fn degrees(&self) -> f64 {
        self.average_turn_angle.to_degrees()
    }
}
