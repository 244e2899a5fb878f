//! Command-line arguments

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// How the executor spreads work over its thread pool
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// Run every solver on the calling thread, in year/day/part order
    Sequential,
    /// One task per year; days and parts within a year run in order
    Year,
    /// One task per year/day; its parts run in order (default)
    #[default]
    Day,
    /// One task per year/day, and the parts of a day run concurrently
    Part,
}

/// Run Advent of Code solutions against puzzle inputs on disk
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run (all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Only run solvers carrying every one of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding `{year}/day{DD}.txt` input files
    #[arg(long, default_value = "~/.config/aoc/inputs")]
    pub input_dir: PathBuf,

    /// Worker threads (defaults to the available parallelism)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Only print answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Log more (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
