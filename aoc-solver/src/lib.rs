//! Advent of Code Solver Library
//!
//! The framework every puzzle day plugs into. A day parses its input once
//! into shared data, then answers each part from that data.
//!
//! - [`AocParser`] turns raw input into `SharedData`
//! - [`PartSolver<N>`] answers part `N` with a typed, `Display`-able answer
//! - [`Solver`] is the uniform part-number entry point (derive it with
//!   `#[derive(AocSolver)]`)
//! - [`SolverRegistry`] maps year/day to parsing factories; solvers join it
//!   through `#[derive(AutoRegisterSolver)]` and [`inventory`]
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! pub struct Sums;
//!
//! impl AocParser for Sums {
//!     type SharedData<'a> = Vec<u64>;
//!
//!     fn parse(input: &str) -> Result<Vec<u64>, ParseError> {
//!         input
//!             .lines()
//!             .map(|line| line.parse().map_err(|_| ParseError::InvalidFormat(line.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Sums {
//!     type Answer = u64;
//!
//!     fn solve(shared: &mut Vec<u64>) -> Result<u64, SolveError> {
//!         Ok(shared.iter().sum())
//!     }
//! }
//!
//! impl PartSolver<2> for Sums {
//!     type Answer = u64;
//!
//!     fn solve(shared: &mut Vec<u64>) -> Result<u64, SolveError> {
//!         Ok(shared.iter().product())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver::<Sums>(2023, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2023, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().value, "6");
//! assert_eq!(solver.solve(2).unwrap().value, "6");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance, Timed, solve_timed};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
