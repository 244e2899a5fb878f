//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use log::{debug, trace};
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Outcome of one year/day/part
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    pub solve_duration: TimeDelta,
    /// Set on the first part solved from a freshly parsed input
    pub parse_duration: Option<TimeDelta>,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            solve_duration: TimeDelta::zero(),
            parse_duration: None,
        }
    }
}

/// A registered day and the parts of it selected to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Everything a worker thread needs to run one work item
struct RunContext {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
}

pub struct Executor {
    context: RunContext,
    thread_pool: rayon::ThreadPool,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: RunContext {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
            },
            thread_pool,
            year_filter: config.year_filter,
            day_filter: config.day_filter,
            part_filter: config.part_filter,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.context.inputs
    }

    /// Registered days matching the filters, ordered by year then day
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        self.context
            .registry
            .iter_info()
            .filter(|info| self.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| self.day_filter.is_none_or(|d| info.day == d))
            .filter_map(|info| {
                self.select_parts(info.parts).map(|parts| WorkItem {
                    year: info.year,
                    day: info.day,
                    parts,
                })
            })
            .collect()
    }

    /// Parts to run given the part filter, None if the filter excludes them all
    fn select_parts(&self, max_parts: u8) -> Option<RangeInclusive<u8>> {
        match self.part_filter {
            Some(p) if p <= max_parts => Some(p..=p),
            Some(_) => None,
            None if max_parts > 0 => Some(1..=max_parts),
            None => None,
        }
    }

    /// Run every work item, sending one result per part to `tx`
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let context = &self.context;

        match context.parallelize_by {
            ParallelizeBy::Sequential => work_items
                .iter()
                .map(|work| run_work_item(work, &tx, context))
                .fold(Ok(()), merge_results),
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year
                        .into_par_iter()
                        .map(|items| {
                            items
                                .iter()
                                .map(|work| run_work_item(work, &tx, context))
                                .fold(Ok(()), merge_results)
                        })
                        .reduce(|| Ok(()), merge_results)
                })
            }
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .par_iter()
                    .map(|work| run_work_item(work, &tx, context))
                    .reduce(|| Ok(()), merge_results)
            }),
        }
    }
}

fn merge_results(
    a: Result<(), ArcExecutorError>,
    b: Result<(), ArcExecutorError>,
) -> Result<(), ArcExecutorError> {
    match (a, b) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Err(a), Err(b)) => Err(ArcExecutorError::combine(a, b)),
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Send the same failure for every selected part
fn send_failure(
    work: &WorkItem,
    error: ArcExecutorError,
    tx: &Sender<SolverResult>,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        send(tx, SolverResult::failed(work.year, work.day, part, error.clone()))?;
    }
    Ok(())
}

fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    context: &RunContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match context.inputs.get(year, day) {
        Ok(Some(input)) => input,
        Ok(None) => {
            let path = context.inputs.input_path(year, day);
            debug!("{year}/{day:02}: no input at {}", path.display());
            let error = ExecutorError::MissingInput { year, day, path };
            return send_failure(work, error.into(), tx);
        }
        Err(source) => {
            let error = ExecutorError::Input { year, day, source };
            return send_failure(work, error.into(), tx);
        }
    };

    debug!("{year}/{day:02}: running parts {:?}", work.parts);
    if context.parallelize_by == ParallelizeBy::Part {
        run_parts_parallel(work, &input, tx, &context.registry)
    } else {
        run_parts_in_order(work, &input, tx, &context.registry)
    }
}

/// Parse once and solve the parts in order, so later parts see what earlier
/// ones left in the shared data
fn run_parts_in_order(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let mut solver = match registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => return send_failure(work, ExecutorError::from(e).into(), tx),
    };

    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        let mut result = solve_part(year, day, part, &mut *solver);
        result.parse_duration = parse_duration.take();
        send(tx, result)?;
    }
    Ok(())
}

/// Parse separately for each part and solve the parts concurrently.
/// Results are sent in part order.
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match registry.create_solver(year, day, input) {
            Ok(mut solver) => {
                let mut result = solve_part(year, day, part, &mut *solver);
                result.parse_duration = Some(solver.parse_duration());
                result
            }
            Err(e) => SolverResult::failed(year, day, part, ExecutorError::from(e).into()),
        })
        .collect();

    results.into_iter().try_for_each(|result| send(tx, result))
}

fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    match solver.solve(part) {
        Ok(solved) => {
            trace!("{year}/{day:02} part {part} solved in {}", solved.duration());
            SolverResult {
                year,
                day,
                part,
                solve_duration: solved.duration(),
                answer: Ok(solved.value),
                parse_duration: None,
            }
        }
        Err(e) => {
            let error = ExecutorError::from(aoc_solver::SolverError::from(e));
            SolverResult::failed(year, day, part, error.into())
        }
    }
}
