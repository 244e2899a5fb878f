//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::Instant;

pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{}", answer),
            (Ok(_), false) => println!("{}", format_result(result)),
            (Err(e), true) => eprintln!("Error: {}", e),
            (Err(_), false) => eprintln!("{}", format_result(result)),
        }
    }

    /// Totals over all results, plus wall-clock time and speedup
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let summary = Summary::of(results);
        let elapsed = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!(
            "Solvers: {} solved, {} failed",
            summary.solved, summary.failed
        );
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_duration(TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::MAX))
        );
        if !elapsed.is_zero() {
            let compute = summary.parse_time + summary.solve_time;
            let compute_secs = compute.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            println!("Speedup factor: {:.2}x", compute_secs / elapsed.as_secs_f64());
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Summary {
    solved: usize,
    failed: usize,
    parse_time: TimeDelta,
    solve_time: TimeDelta,
}

impl Summary {
    /// Timings only count successful parts
    fn of(results: &[SolverResult]) -> Self {
        let solved: Vec<&SolverResult> = results.iter().filter(|r| r.answer.is_ok()).collect();
        Self {
            solved: solved.len(),
            failed: results.len() - solved.len(),
            parse_time: solved.iter().filter_map(|r| r.parse_duration).sum(),
            solve_time: solved.iter().map(|r| r.solve_duration).sum(),
        }
    }
}

/// `2023/17 Part 1: 102 (parse: 12µs, solve: 1.20ms)` or
/// `2023/17 Part 1: Error - ...`
fn format_result(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);
    match &result.answer {
        Ok(answer) => {
            let parse_timing = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            format!(
                "{}: {} ({}solve: {})",
                prefix,
                answer,
                parse_timing,
                format_duration(result.solve_duration)
            )
        }
        Err(e) => format!("{}: Error - {}", prefix, e),
    }
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}
