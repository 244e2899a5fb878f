//! Core solver traits

use crate::error::{ParseError, SolveError};
use crate::instance::{SolveResult, Timed};
use std::fmt::Display;

/// Parses puzzle input into the data shared by all parts of a day.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Day1;
///
/// impl AocParser for Day1 {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
///             .collect()
///     }
/// }
/// ```
pub trait AocParser {
    /// Parsed input plus any intermediate results the parts want to share.
    ///
    /// Owned types are the common case; a lifetime is available for
    /// zero-copy views into the input string.
    type SharedData<'a>;

    /// Parse the input string into the shared data structure.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Each part names its own answer type, so days can keep numeric answers
/// numeric until they reach the runner.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct Day1;
///
/// impl AocParser for Day1 {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Day1 {
///     type Answer = u32;
///
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<u32, SolveError> {
///         Ok(shared.iter().sum())
///     }
/// }
///
/// let mut shared = Day1::parse("1\n2\n3").unwrap();
/// assert_eq!(<Day1 as PartSolver<1>>::solve(&mut shared).unwrap(), 6);
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// The answer reported for this part
    type Answer: Display;

    /// Solve this part using (and possibly caching into) the shared data.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<Self::Answer, SolveError>;
}

/// Uniform, part-number based entry point for a day.
///
/// Usually generated by `#[derive(AocSolver)]`, which dispatches part `n`
/// to `PartSolver<n>` and renders the answer with `Display`.
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part and render its answer
    ///
    /// # Returns
    /// * `Ok(String)` - The rendered answer
    /// * `Err(SolveError::PartNotImplemented)` - No solver for this part
    /// * `Err(SolveError::SolveFailed)` - The computation failed
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;

    /// Solve a part and record when it ran.
    ///
    /// The default clocks [`Solver::solve_part`], rendering included. The
    /// derive overrides it to clock only the typed `PartSolver<N>::solve`.
    fn solve_part_timed(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<SolveResult, SolveError> {
        Timed::measure(|| Self::solve_part(shared, part)).transpose()
    }
}

/// Range-checked access to [`Solver::solve_part`] and [`Solver::solve_part_timed`]
pub trait SolverExt: Solver {
    fn check_part(part: u8) -> Result<(), SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Ok(())
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }

    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        Self::check_part(part)?;
        Self::solve_part(shared, part)
    }

    fn solve_part_timed_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<SolveResult, SolveError> {
        Self::check_part(part)?;
        Self::solve_part_timed(shared, part)
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
