//! Shared grid, graph and caching machinery used by the puzzle days.

pub mod dp_cache;
pub mod grid;
pub mod min_cut;
pub mod parse;
pub mod search;
pub mod tiled;
