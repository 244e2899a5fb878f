use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Coord, Grid};
use crate::utils::tiled::Garden;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 21, tags = ["2023", "grid", "tiled"])]
pub struct Solver;

const TILE_STEPS: u64 = 64;
const PLANE_STEPS: u64 = 26_501_365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plot {
    Garden,
    Rock,
    Start,
}

fn parse_garden(input: &str) -> Result<Garden, ParseError> {
    let plots = Grid::parse(input, |c| match c {
        '.' => Ok(Plot::Garden),
        '#' => Ok(Plot::Rock),
        'S' => Ok(Plot::Start),
        _ => Err(c),
    })
    .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

    let starts: Vec<Coord> = plots
        .iter()
        .filter(|(_, plot)| **plot == Plot::Start)
        .map(|(coord, _)| coord)
        .collect();
    let start = match starts.as_slice() {
        [start] => *start,
        [] => return Err(ParseError::MissingData("no start plot 'S'".into())),
        _ => {
            return Err(ParseError::InvalidFormat(format!(
                "{} start plots, expected one",
                starts.len()
            )));
        }
    };

    Garden::new(plots.map(|plot| *plot != Plot::Rock), start)
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
}

impl AocParser for Solver {
    type SharedData<'a> = Garden;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_garden(input)
    }
}

impl PartSolver<1> for Solver {
    type Answer = u64;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<u64, SolveError> {
        Ok(shared.count_in_tile(TILE_STEPS))
    }
}

impl PartSolver<2> for Solver {
    type Answer = u64;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<u64, SolveError> {
        shared
            .count_reachable(PLANE_STEPS)
            .map_err(SolveError::failed)
    }
}
