use std::collections::{HashSet, VecDeque};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

use crate::utils::grid::{Coord, Direction, Grid, GridError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["2023", "grid", "flood-fill"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipe {
    /// `|`
    Vertical,
    /// `-`
    Horizontal,
    /// `L`
    UpRight,
    /// `J`
    UpLeft,
    /// `7`
    DownLeft,
    /// `F`
    DownRight,
    Ground,
    Start,
}

impl Pipe {
    const CONNECTING: [Pipe; 6] = [
        Pipe::Vertical,
        Pipe::Horizontal,
        Pipe::UpRight,
        Pipe::UpLeft,
        Pipe::DownLeft,
        Pipe::DownRight,
    ];

    fn from_char(c: char) -> Option<Pipe> {
        match c {
            '|' => Some(Pipe::Vertical),
            '-' => Some(Pipe::Horizontal),
            'L' => Some(Pipe::UpRight),
            'J' => Some(Pipe::UpLeft),
            '7' => Some(Pipe::DownLeft),
            'F' => Some(Pipe::DownRight),
            '.' => Some(Pipe::Ground),
            'S' => Some(Pipe::Start),
            _ => None,
        }
    }

    fn openings(self) -> &'static [Direction] {
        use Direction::*;

        match self {
            Pipe::Vertical => &[Up, Down],
            Pipe::Horizontal => &[Left, Right],
            Pipe::UpRight => &[Up, Right],
            Pipe::UpLeft => &[Up, Left],
            Pipe::DownLeft => &[Down, Left],
            Pipe::DownRight => &[Down, Right],
            Pipe::Ground | Pipe::Start => &[],
        }
    }

    fn opens(self, side: Direction) -> bool {
        self.openings().contains(&side)
    }

    /// Heading out of this pipe after entering it moving `heading`.
    fn exit(self, heading: Direction) -> Option<Direction> {
        let entry = heading.opposite();
        if !self.opens(entry) {
            return None;
        }
        self.openings().iter().copied().find(|&side| side != entry)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("pipe loop breaks at {0}")]
    Broken(Coord),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// The pipe field, with the start marker replaced by the pipe under it.
#[derive(Debug, Clone)]
pub struct Maze {
    pipes: Grid<Pipe>,
    start: Coord,
}

impl Maze {
    fn new(mut pipes: Grid<Pipe>) -> Result<Self, ParseError> {
        let starts: Vec<Coord> = pipes
            .iter()
            .filter(|(_, pipe)| **pipe == Pipe::Start)
            .map(|(coord, _)| coord)
            .collect();
        let start = match starts.as_slice() {
            [start] => *start,
            [] => return Err(ParseError::MissingData("no start tile 'S'".into())),
            _ => {
                return Err(ParseError::InvalidFormat(format!(
                    "{} start tiles, expected one",
                    starts.len()
                )));
            }
        };

        let sides: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&side| {
                pipes
                    .get(start.step(side))
                    .is_some_and(|pipe| pipe.opens(side.opposite()))
            })
            .collect();
        let under_start = Pipe::CONNECTING
            .into_iter()
            .find(|pipe| sides.len() == 2 && sides.iter().all(|&side| pipe.opens(side)))
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "start {start} joins {} pipes, expected 2",
                    sides.len()
                ))
            })?;

        pipes[start] = under_start;
        Ok(Self { pipes, start })
    }

    /// Tiles of the loop through the start, in walking order.
    fn main_loop(&self) -> Result<Vec<Coord>, MazeError> {
        let mut heading = self.pipes[self.start]
            .openings()
            .first()
            .copied()
            .ok_or(MazeError::Broken(self.start))?;
        let mut coord = self.start;
        let mut tiles = vec![self.start];

        loop {
            coord = coord.step(heading);
            if coord == self.start {
                return Ok(tiles);
            }
            heading = self
                .pipes
                .get(coord)
                .and_then(|pipe| pipe.exit(heading))
                .ok_or(MazeError::Broken(coord))?;
            tiles.push(coord);
        }
    }

    fn farthest_from_start(&self) -> Result<usize, MazeError> {
        Ok(self.main_loop()?.len() / 2)
    }

    /// Tiles enclosed by the loop.
    ///
    /// Each tile is blown up to a 3×3 block, so the gap between two
    /// neighbouring pipes that do not connect is walkable. Loop pipes only
    /// wall off the centre cross of their block, which leaves the corners
    /// free and the outside reachable from the origin.
    fn enclosed(&self) -> Result<usize, MazeError> {
        let main_loop = self.main_loop()?;
        let block_centre = |tile: Coord| tile * 3 + Coord::new(1, 1);

        let mut walls = Grid::filled(self.pipes.rows() * 3, self.pipes.cols() * 3, false)?;
        for &tile in &main_loop {
            let centre = block_centre(tile);
            walls[centre] = true;
            for &side in self.pipes[tile].openings() {
                walls[centre.step(side)] = true;
            }
        }

        let outside = flood_fill(&walls, Coord::ORIGIN);
        let on_loop: HashSet<Coord> = main_loop.into_iter().collect();
        Ok(self
            .pipes
            .coords()
            .filter(|tile| !on_loop.contains(tile) && !outside[block_centre(*tile)])
            .count())
    }
}

/// Cells reachable from `seed` without crossing a wall. `seed` must be open.
fn flood_fill(walls: &Grid<bool>, seed: Coord) -> Grid<bool> {
    let mut reached = walls.map(|_| false);
    let mut queue = VecDeque::from([seed]);
    reached[seed] = true;

    while let Some(coord) = queue.pop_front() {
        for next in coord.neighbours() {
            if walls.get(next) == Some(&false) && !reached[next] {
                reached[next] = true;
                queue.push_back(next);
            }
        }
    }
    reached
}

impl AocParser for Solver {
    type SharedData<'a> = Maze;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let pipes = Grid::parse(input, |c| Pipe::from_char(c).ok_or(c))
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Maze::new(pipes)
    }
}

impl PartSolver<1> for Solver {
    type Answer = usize;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<usize, SolveError> {
        shared.farthest_from_start().map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    type Answer = usize;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<usize, SolveError> {
        shared.enclosed().map_err(SolveError::failed)
    }
}
