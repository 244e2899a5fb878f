use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::warn;

use crate::utils::min_cut::WeightedGraph;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2023, day = 25, tags = ["2023", "graph"])]
pub struct Solver;

/// Wires to cut, as promised by the puzzle.
const WIRES_TO_CUT: u64 = 3;

impl AocParser for Solver {
    type SharedData<'a> = WeightedGraph<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut wires = Vec::new();
        for (line_idx, line) in input.trim().lines().enumerate() {
            let (component, others) = line.split_once(':').ok_or_else(|| {
                ParseError::InvalidFormat(format!("(line {}) missing ':'", line_idx + 1))
            })?;
            let component = component.trim();
            wires.extend(others.split_whitespace().map(|other| (component, other)));
        }

        if wires.is_empty() {
            return Err(ParseError::MissingData("no wires".into()));
        }
        Ok(WeightedGraph::from_unit_edges(wires))
    }
}

impl PartSolver<1> for Solver {
    type Answer = u64;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<u64, SolveError> {
        let cut = shared
            .minimum_cut(Some(WIRES_TO_CUT))
            .map_err(SolveError::failed)?;
        if cut.weight != WIRES_TO_CUT {
            warn!("minimum cut is {} wires, expected {WIRES_TO_CUT}", cut.weight);
        }
        Ok(cut.partition.0 * cut.partition.1)
    }
}
