use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::grid::{Coord, Direction, Grid};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 16, tags = ["2023", "grid", "parallel"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    /// `|`
    SplitterVertical,
    /// `-`
    SplitterHorizontal,
    /// `\`
    MirrorBackward,
    /// `/`
    MirrorForward,
}

impl Tile {
    fn from_char(c: char) -> Option<Tile> {
        match c {
            '.' => Some(Tile::Empty),
            '|' => Some(Tile::SplitterVertical),
            '-' => Some(Tile::SplitterHorizontal),
            '\\' => Some(Tile::MirrorBackward),
            '/' => Some(Tile::MirrorForward),
            _ => None,
        }
    }

    /// Headings a beam leaves with after entering this tile heading `heading`.
    fn deflect(self, heading: Direction) -> (Direction, Option<Direction>) {
        use Direction::*;

        match (self, heading) {
            (Tile::SplitterVertical, Left | Right) => (Up, Some(Down)),
            (Tile::SplitterHorizontal, Up | Down) => (Left, Some(Right)),
            (Tile::MirrorBackward, Right) => (Down, None),
            (Tile::MirrorBackward, Down) => (Right, None),
            (Tile::MirrorBackward, Left) => (Up, None),
            (Tile::MirrorBackward, Up) => (Left, None),
            (Tile::MirrorForward, Right) => (Up, None),
            (Tile::MirrorForward, Up) => (Right, None),
            (Tile::MirrorForward, Left) => (Down, None),
            (Tile::MirrorForward, Down) => (Left, None),
            _ => (heading, None),
        }
    }
}

/// Number of tiles a beam entering `start` with `heading` passes through.
fn energized(grid: &Grid<Tile>, start: Coord, heading: Direction) -> usize {
    let mut seen: HashSet<(Coord, Direction)> = HashSet::from([(start, heading)]);
    let mut pending = vec![(start, heading)];

    while let Some((coord, heading)) = pending.pop() {
        let (first, second) = grid[coord].deflect(heading);
        for next_heading in std::iter::once(first).chain(second) {
            let next = coord.step(next_heading);
            if grid.in_bounds(next) && seen.insert((next, next_heading)) {
                pending.push((next, next_heading));
            }
        }
    }

    seen.iter()
        .map(|(coord, _)| *coord)
        .collect::<HashSet<_>>()
        .len()
}

/// Every beam entering from the outside edge, pointing inwards.
fn entry_beams(grid: &Grid<Tile>) -> Vec<(Coord, Direction)> {
    let last_row = grid.rows() as i64 - 1;
    let last_col = grid.cols() as i64 - 1;

    (0..=last_row)
        .flat_map(|row| {
            [
                (Coord::new(row, 0), Direction::Right),
                (Coord::new(row, last_col), Direction::Left),
            ]
        })
        .chain((0..=last_col).flat_map(|col| {
            [
                (Coord::new(0, col), Direction::Down),
                (Coord::new(last_row, col), Direction::Up),
            ]
        }))
        .collect()
}

fn best_entry(grid: &Grid<Tile>, parallel: bool) -> usize {
    let beams = entry_beams(grid);
    let count = |&(start, heading): &(Coord, Direction)| energized(grid, start, heading);
    let best = if parallel {
        beams.par_iter().map(count).max()
    } else {
        beams.iter().map(count).max()
    };
    best.unwrap_or(0)
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<Tile>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input, |c| Tile::from_char(c).ok_or(c))
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    type Answer = usize;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<usize, SolveError> {
        Ok(energized(shared, Coord::ORIGIN, Direction::Right))
    }
}

impl PartSolver<2> for Solver {
    type Answer = usize;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<usize, SolveError> {
        Ok(best_entry(shared, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const CONTRAPTION: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....
";

    #[test]
    fn test_parts() {
        let mut grid = Solver::parse(CONTRAPTION).unwrap();
        assert_eq!(Solver::solve_part(&mut grid, 1).unwrap(), "46");
        assert_eq!(Solver::solve_part(&mut grid, 2).unwrap(), "51");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let grid = Solver::parse(CONTRAPTION).unwrap();
        assert_eq!(best_entry(&grid, true), best_entry(&grid, false));
    }

    #[test]
    fn test_entry_beams_cover_the_edge() {
        let grid = Solver::parse(CONTRAPTION).unwrap();
        let beams = entry_beams(&grid);
        assert_eq!(beams.len(), 2 * (grid.rows() + grid.cols()));
        assert!(beams.contains(&(Coord::new(0, 3), Direction::Down)));
        assert!(beams.contains(&(Coord::new(9, 3), Direction::Up)));
    }

    #[test]
    fn test_first_tile_deflects() {
        // The starting tile itself turns the beam.
        let grid = Solver::parse("\\.\n..").unwrap();
        assert_eq!(energized(&grid, Coord::ORIGIN, Direction::Right), 2);
    }

    #[test]
    fn test_loops_terminate() {
        let grid = Solver::parse("/\\\n\\/").unwrap();
        assert_eq!(energized(&grid, Coord::new(0, 1), Direction::Right), 4);
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        assert!(Solver::parse(".x.").is_err());
    }
}
