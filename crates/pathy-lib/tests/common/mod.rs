//! Common test utilities and fixture helpers.
//!
//! Fixture paths, a seeded grid sampler for property-style tests and
//! temporary file helpers for loader tests.

use std::fs;
use std::path::PathBuf;

use pathy_lib::{Grid, Node};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

/// Path to the fixtures directory shared by library and CLI tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

#[allow(dead_code)]
pub fn arena_map() -> PathBuf {
    fixtures_dir().join("arena.map")
}

#[allow(dead_code)]
pub fn arena_scenarios() -> PathBuf {
    fixtures_dir().join("arena.map.scen")
}

/// Seeded random grids and vertices for property-style tests.
#[allow(dead_code)]
pub struct GridSampler {
    rng: StdRng,
}

#[allow(dead_code)]
impl GridSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn below(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }

    /// A grid with roughly `percent`% of its cells blocked.
    pub fn grid(&mut self, width: usize, height: usize, percent: u32) -> Grid {
        let density = f64::from(percent.min(100)) / 100.0;
        let mut blocked = Vec::new();
        for y in 0..height {
            for x in 0..width {
                if self.rng.random_bool(density) {
                    blocked.push((x, y));
                }
            }
        }
        Grid::with_blocked(width, height, blocked)
    }

    /// A uniformly chosen vertex of `grid`.
    pub fn vertex(&mut self, grid: &Grid) -> Node {
        Node::new(
            self.rng.random_range(0..=grid.width() as i32),
            self.rng.random_range(0..=grid.height() as i32),
        )
    }
}

/// Temporary directory holding ad-hoc map and scenario files.
#[allow(dead_code)]
pub struct TempFixtures {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TempFixtures {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write fixture file");
        path
    }
}
