//! AOC CLI - runs the registered Advent of Code solvers against inputs on disk

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Link the solver plugins
use aoc_solutions as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc_solver::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, WorkItem};
use log::{debug, warn};
use output::OutputFormatter;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();
    debug!("{config:?}");

    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config)?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    if !executor.inputs().root().is_dir() {
        warn!(
            "input directory {} does not exist",
            executor.inputs().root().display()
        );
    }
    report_missing_inputs(&executor, &work_items);

    run_executor(executor, &work_items, config.quiet)
}

/// List days whose input file is absent; their parts still report as errors
fn report_missing_inputs(executor: &Executor, work_items: &[WorkItem]) {
    let missing: Vec<&WorkItem> = work_items
        .iter()
        .filter(|w| !executor.inputs().contains(w.year, w.day))
        .collect();
    if missing.is_empty() {
        return;
    }

    eprintln!("Missing {} input file(s):", missing.len());
    for w in missing {
        eprintln!(
            "  - {}/day{:02} ({})",
            w.year,
            w.day,
            executor.inputs().input_path(w.year, w.day).display()
        );
    }
}

fn run_executor(executor: Executor, work_items: &[WorkItem], quiet: bool) -> Result<(), CliError> {
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys = work_items.iter().flat_map(|w| {
        w.parts.clone().map(move |part| ResultKey {
            year: w.year,
            day: w.day,
            part,
        })
    });

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    for key in aggregator.missing() {
        warn!("no result received for {}/{:02} part {}", key.year, key.day, key.part);
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    formatter.print_summary(&results);

    Ok(())
}

/// Registry of every linked plugin carrying all of `tags`
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
