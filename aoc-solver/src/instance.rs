//! Timing around parsing and typed part answers

use crate::error::{ParseError, SolveError};
use crate::solver::{PartSolver, Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};

/// A value together with the UTC window it was produced in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timed<T> {
    pub value: T,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl<T> Timed<T> {
    /// Run `f` between two clock reads
    pub fn measure(f: impl FnOnce() -> T) -> Self {
        let start = Utc::now();
        let value = f();
        let end = Utc::now();
        Self { value, start, end }
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Replace the value, keeping the window
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Timed<U> {
        Timed {
            value: f(self.value),
            start: self.start,
            end: self.end,
        }
    }

    /// Split off the value, leaving only the window
    pub fn into_parts(self) -> (T, Timed<()>) {
        let Timed { value, start, end } = self;
        (value, Timed { value: (), start, end })
    }
}

impl<T, E> Timed<Result<T, E>> {
    pub fn transpose(self) -> Result<Timed<T>, E> {
        let Timed { value, start, end } = self;
        value.map(|value| Timed { value, start, end })
    }
}

/// A rendered part answer and when it was computed
pub type SolveResult = Timed<String>;

/// Solve part `N` with the clock stopped before the typed answer is rendered.
///
/// `#[derive(AocSolver)]` routes [`Solver::solve_part_timed`] here, so a
/// slow `Display` impl never shows up in the solve time.
///
/// ```
/// use aoc_solver::{AocParser, ParseError, PartSolver, SolveError, solve_timed};
///
/// struct Double;
///
/// impl AocParser for Double {
///     type SharedData<'a> = u64;
///
///     fn parse(input: &str) -> Result<u64, ParseError> {
///         input.trim().parse().map_err(|_| ParseError::InvalidFormat(input.into()))
///     }
/// }
///
/// impl PartSolver<1> for Double {
///     type Answer = u64;
///
///     fn solve(shared: &mut u64) -> Result<u64, SolveError> {
///         Ok(*shared * 2)
///     }
/// }
///
/// let mut shared = 21;
/// let result = solve_timed::<Double, 1>(&mut shared).unwrap();
/// assert_eq!(result.value, "42");
/// assert!(result.end >= result.start);
/// ```
pub fn solve_timed<S, const N: u8>(
    shared: &mut S::SharedData<'_>,
) -> Result<SolveResult, SolveError>
where
    S: PartSolver<N> + ?Sized,
{
    let answer = Timed::measure(|| S::solve(shared)).transpose()?;
    Ok(answer.map(|answer| answer.to_string()))
}

/// One day's parsed input, ready to have its parts solved.
///
/// Parts run in order against the same shared data, so a later part can
/// reuse whatever an earlier part stored there.
pub struct SolverInstance<'a, S: Solver> {
    shared: S::SharedData<'a>,
    parsed: Timed<()>,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    pub fn new(input: &'a str) -> Result<Self, ParseError> {
        let (shared, parsed) = Timed::measure(|| S::parse(input))
            .transpose()?
            .into_parts();
        Ok(Self { shared, parsed })
    }
}

/// Type-erased interface over any [`SolverInstance`]
///
/// # Example
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn report(mut solver: Box<dyn DynSolver>) -> Result<(), Box<dyn std::error::Error>> {
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("Part {part}: {} (took {})", result.value, result.duration());
///     }
///     println!("Parse took {}", solver.parse_duration());
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve `part`, rejecting part numbers outside `1..=parts()`
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn parts(&self) -> u8;

    /// When parsing ran
    fn parsed(&self) -> &Timed<()>;

    fn parse_duration(&self) -> TimeDelta {
        self.parsed().duration()
    }
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        S::solve_part_timed_checked_range(&mut self.shared, part)
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }

    fn parsed(&self) -> &Timed<()> {
        &self.parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_keeps_window() {
        let timed = Timed::measure(|| "7".parse::<u8>());
        let window = (timed.start, timed.end);

        let ok = timed.transpose().unwrap();
        assert_eq!(ok.value, 7);
        assert_eq!((ok.start, ok.end), window);
        assert!(ok.duration() >= TimeDelta::zero());
    }

    #[test]
    fn test_transpose_err() {
        assert!(Timed::measure(|| "x".parse::<u8>()).transpose().is_err());
    }

    #[test]
    fn test_into_parts() {
        let (value, window) = Timed::measure(|| vec![1, 2]).into_parts();
        assert_eq!(value, vec![1, 2]);
        assert!(window.end >= window.start);
    }
}
