//! Advent of Code puzzle solutions with automatic registration
//!
//! [`utils`] holds the reusable pieces: bounded grids and coordinates,
//! constrained shortest-path search, tiled-plane reachability, Stoer–Wagner
//! minimum cut, integer extraction and a DP memo cache.
//!
//! The puzzle days live in `my_solutions`, organised by year. Each one uses
//! the `AutoRegisterSolver` derive macro for automatic plugin registration
//! with the solver framework.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
