use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Coord, Direction, Grid};
use crate::utils::search::{MovePolicy, RunLimits, SearchState, min_path_cost};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 17, tags = ["2023", "grid", "search"])]
pub struct Solver;

const CRUCIBLE: RunLimits = RunLimits::new(0, 3);
const ULTRA_CRUCIBLE: RunLimits = RunLimits::new(4, 10);

/// Least heat lost moving from the top-left to the bottom-right block.
fn least_heat_loss(city: &Grid<u8>, policy: &impl MovePolicy) -> Result<u64, SolveError> {
    let goal = Coord::new(city.rows() as i64 - 1, city.cols() as i64 - 1);
    // No run yet, so either first move counts towards a full straight run.
    let starts = [
        SearchState::start(Coord::ORIGIN, Direction::Right),
        SearchState::start(Coord::ORIGIN, Direction::Down),
    ];

    min_path_cost(city, starts, goal, |&loss| u64::from(loss), policy).map_err(SolveError::failed)
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input, |c| {
            c.to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .ok_or(c)
        })
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    type Answer = u64;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<u64, SolveError> {
        least_heat_loss(shared, &CRUCIBLE)
    }
}

impl PartSolver<2> for Solver {
    type Answer = u64;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<u64, SolveError> {
        least_heat_loss(shared, &ULTRA_CRUCIBLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const CITY: &str = "\
2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533
";

    #[test]
    fn test_parts() {
        let mut city = Solver::parse(CITY).unwrap();
        assert_eq!(Solver::solve_part(&mut city, 1).unwrap(), "102");
        assert_eq!(Solver::solve_part(&mut city, 2).unwrap(), "94");
    }

    #[test]
    fn test_ultra_crucible_long_corridor() {
        let mut city = Solver::parse(
            "111111111111\n999999999991\n999999999991\n999999999991\n999999999991",
        )
        .unwrap();
        assert_eq!(Solver::solve_part(&mut city, 2).unwrap(), "71");
    }

    #[test]
    fn test_no_path_is_an_error() {
        let mut city = Solver::parse("12").unwrap();
        assert!(matches!(
            Solver::solve_part(&mut city, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_non_digit_rejected() {
        assert!(Solver::parse("12\n3a").is_err());
    }
}
