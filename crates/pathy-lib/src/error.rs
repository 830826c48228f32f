use thiserror::Error;

use crate::grid::Node;

/// Convenient result alias for the pathy library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// An unreachable goal is not an error: searches report it as `Ok(None)`.
/// Broken engine invariants (parent chains, reconstruction endpoints) panic
/// instead of surfacing here.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a start or goal vertex lies outside the grid's vertex range.
    #[error("node {node} is outside the {width}x{height} grid (vertices span 0..={width} x 0..={height})")]
    OutOfBounds { node: Node, width: usize, height: usize },

    /// Raised when building a grid from rows of unequal length.
    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Raised when a MovingAI map file is malformed.
    #[error("invalid map file (line {line}): {message}")]
    MapParse { line: usize, message: String },

    /// Raised when a MovingAI scenario file is malformed.
    #[error("invalid scenario file (line {line}): {message}")]
    ScenarioParse { line: usize, message: String },

    /// Raised when a scenario file contains no scenarios.
    #[error("scenario file contains no scenarios")]
    EmptyScenarioFile,

    /// Raised when a scenario file refers to more than one map.
    #[error("scenario file refers to multiple maps ({first} and {other})")]
    MixedScenarioMaps { first: String, other: String },

    /// Raised when an algorithm name could not be parsed.
    #[error("unknown algorithm \"{name}\"; expected one of: dijkstra, astar, astar-ps, thetastar")]
    UnknownAlgorithm { name: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
