//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid arguments or runtime setup
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

impl From<ExecutorError> for CliError {
    fn from(e: ExecutorError) -> Self {
        CliError::Executor(e.into())
    }
}

/// Errors raised while running solvers.
///
/// Per-part failures travel inside each result; the executor itself only
/// fails when results can no longer be delivered.
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// No input file for this day
    #[error("Missing input for {year}/{day:02} (expected {})", .path.display())]
    MissingInput { year: u16, day: u8, path: PathBuf },

    /// The input file exists but could not be read
    #[error("Input for {year}/{day:02} unreadable: {source}")]
    Input {
        year: u16,
        day: u8,
        #[source]
        source: InputError,
    },

    /// Parsing or solving failed
    #[error("{0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Result receiver hung up
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into a single `Multiple`, flattening either side
    /// that is already a `Multiple` and keeping `first` before `second`.
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let flatten = |e: ArcExecutorError| match e.inner() {
            ExecutorError::Multiple(errors) => errors.clone(),
            _ => vec![e],
        };
        let mut errors = flatten(first);
        errors.extend(flatten(second));
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Reading an input file failed for a reason other than it being absent
#[derive(Error, Debug)]
#[error("{}: {source}", .path.display())]
pub struct InputError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> ArcExecutorError {
        ExecutorError::ChannelSend.into()
    }

    fn pool(msg: &str) -> ArcExecutorError {
        ExecutorError::ThreadPool(msg.to_string()).into()
    }

    fn flattened(e: &ArcExecutorError) -> Vec<String> {
        match e.inner() {
            ExecutorError::Multiple(errors) => errors.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        }
    }

    #[test]
    fn test_combine_two_singles() {
        let combined = ArcExecutorError::combine(pool("a"), channel());
        assert_eq!(
            flattened(&combined),
            vec!["Thread pool creation failed: a", "Channel send error"]
        );
        assert_eq!(combined.to_string(), "Multiple errors occurred (2 total)");
    }

    #[test]
    fn test_combine_flattens_and_keeps_order() {
        let left = ArcExecutorError::combine(pool("a"), pool("b"));
        let right = ArcExecutorError::combine(pool("c"), pool("d"));

        let both = ArcExecutorError::combine(left.clone(), right.clone());
        assert_eq!(flattened(&both).len(), 4);
        assert!(flattened(&both)[0].ends_with('a'));
        assert!(flattened(&both)[3].ends_with('d'));

        let prepended = ArcExecutorError::combine(pool("z"), right);
        assert!(flattened(&prepended)[0].ends_with('z'));
        assert_eq!(flattened(&prepended).len(), 3);

        let appended = ArcExecutorError::combine(left, pool("z"));
        assert!(flattened(&appended)[2].ends_with('z'));
    }

    #[test]
    fn test_combine_opt() {
        let single = ArcExecutorError::combine_opt(None, channel());
        assert!(matches!(single.inner(), ExecutorError::ChannelSend));

        let merged = ArcExecutorError::combine_opt(Some(channel()), channel());
        assert!(matches!(merged.inner(), ExecutorError::Multiple(v) if v.len() == 2));
    }

    #[test]
    fn test_missing_input_message() {
        let e = ExecutorError::MissingInput {
            year: 2023,
            day: 5,
            path: PathBuf::from("inputs/2023/day05.txt"),
        };
        assert_eq!(
            e.to_string(),
            "Missing input for 2023/05 (expected inputs/2023/day05.txt)"
        );
    }
}
