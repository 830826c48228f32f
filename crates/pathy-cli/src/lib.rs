//! Pathy CLI library.
//!
//! Command handlers, report rendering, map images and terminal styling for the `pathy`
//! benchmarking binary.

pub mod commands;
pub mod output;
pub mod render;
pub mod terminal;
