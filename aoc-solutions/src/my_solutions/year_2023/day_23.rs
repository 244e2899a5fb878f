use std::collections::HashMap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::debug;
use thiserror::Error;

use crate::utils::grid::{Coord, Direction, Grid};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 23, tags = ["2023", "grid", "graph"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trail {
    Path,
    Forest,
    /// Can only be left downhill, towards the direction it points.
    Slope(Direction),
}

impl Trail {
    fn from_char(c: char) -> Option<Trail> {
        match c {
            '.' => Some(Trail::Path),
            '#' => Some(Trail::Forest),
            '^' => Some(Trail::Slope(Direction::Up)),
            'v' => Some(Trail::Slope(Direction::Down)),
            '<' => Some(Trail::Slope(Direction::Left)),
            '>' => Some(Trail::Slope(Direction::Right)),
            _ => None,
        }
    }

    fn is_open(self) -> bool {
        self != Trail::Forest
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no hike leads from {start} to {end}")]
pub struct NoHike {
    start: Coord,
    end: Coord,
}

/// Junctions as nodes, corridors between them as weighted edges.
/// Node 0 is the start and node 1 the end.
type Network = Vec<Vec<(usize, u64)>>;

#[derive(Debug, Clone)]
pub struct HikingMap {
    trails: Grid<Trail>,
    start: Coord,
    end: Coord,
}

impl HikingMap {
    fn new(trails: Grid<Trail>) -> Result<Self, ParseError> {
        let opening = |row: usize, edge: &str| {
            trails
                .row(row)
                .iter()
                .position(|t| t.is_open())
                .map(|col| Coord::new(row as i64, col as i64))
                .ok_or_else(|| ParseError::MissingData(format!("no opening in the {edge} row")))
        };
        let start = opening(0, "top")?;
        let end = opening(trails.rows() - 1, "bottom")?;
        Ok(Self { trails, start, end })
    }

    fn open_sides(&self, coord: Coord) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(move |&side| {
            self.trails
                .get(coord.step(side))
                .is_some_and(|t| t.is_open())
        })
    }

    fn is_fork(&self, coord: Coord) -> bool {
        self.trails[coord].is_open() && self.open_sides(coord).count() >= 3
    }

    /// Walk the corridor leaving `from` towards `heading` up to the next junction.
    ///
    /// `None` for dead ends and, when `icy`, for corridors that would climb a slope.
    fn follow(
        &self,
        from: Coord,
        mut heading: Direction,
        junctions: &HashMap<Coord, usize>,
        icy: bool,
    ) -> Option<(usize, u64)> {
        let mut coord = from;
        let mut length = 0;
        loop {
            if icy
                && let Trail::Slope(downhill) = self.trails[coord]
                && downhill != heading
            {
                return None;
            }
            coord = coord.step(heading);
            length += 1;
            if let Some(&node) = junctions.get(&coord) {
                return Some((node, length));
            }
            heading = self
                .open_sides(coord)
                .find(|&side| side != heading.opposite())?;
        }
    }

    fn network(&self, icy: bool) -> Network {
        let mut junctions = vec![self.start, self.end];
        junctions.extend(
            self.trails
                .coords()
                .filter(|&c| c != self.start && c != self.end && self.is_fork(c)),
        );
        let index: HashMap<Coord, usize> = junctions
            .iter()
            .enumerate()
            .map(|(node, &coord)| (coord, node))
            .collect();
        debug!("{} junctions", junctions.len());

        junctions
            .iter()
            .map(|&from| {
                self.open_sides(from)
                    .filter_map(|heading| self.follow(from, heading, &index, icy))
                    .collect()
            })
            .collect()
    }

    /// Length of the longest hike that never visits a tile twice.
    fn longest_hike(&self, icy: bool) -> Result<u64, NoHike> {
        if self.start == self.end {
            return Ok(0);
        }
        let network = self.network(icy);
        let mut visited = vec![false; network.len()];
        let mut longest = None;
        extend_hike(&network, 0, 0, &mut visited, &mut longest);
        longest.ok_or(NoHike {
            start: self.start,
            end: self.end,
        })
    }
}

/// Depth-first over every simple path from `node` to node 1.
fn extend_hike(
    network: &Network,
    node: usize,
    length: u64,
    visited: &mut [bool],
    longest: &mut Option<u64>,
) {
    if node == 1 {
        *longest = (*longest).max(Some(length));
        return;
    }
    visited[node] = true;
    for &(next, corridor) in &network[node] {
        if !visited[next] {
            extend_hike(network, next, length + corridor, visited, longest);
        }
    }
    visited[node] = false;
}

impl AocParser for Solver {
    type SharedData<'a> = HikingMap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let trails = Grid::parse(input, |c| Trail::from_char(c).ok_or(c))
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        HikingMap::new(trails)
    }
}

impl PartSolver<1> for Solver {
    type Answer = u64;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<u64, SolveError> {
        shared.longest_hike(true).map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    type Answer = u64;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<u64, SolveError> {
        shared.longest_hike(false).map_err(SolveError::failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const TRAILS: &str = "\
#.#####################
#.......#########...###
#######.#########.#.###
###.....#.>.>.###.#.###
###v#####.#v#.###.#.###
###.>...#.#.#.....#...#
###v###.#.#.#########.#
###...#.#.#.......#...#
#####.#.#.#######.#.###
#.....#.#.#.......#...#
#.#####.#.#.#########v#
#.#...#...#...###...>.#
#.#.#v#######v###.###v#
#...#.>.#...>.>.#.###.#
#####v#.#.###v#.#.###.#
#.....#...#...#.#.#...#
#.#########.###.#.#.###
#...###...#...#...#.###
###.###.#.###v#####v###
#...#...#.#.>.>.#.>.###
#.###.###.#.###.#.#v###
#.....###...###...#...#
#####################.#
";

    #[test]
    fn test_parts() {
        let mut map = Solver::parse(TRAILS).unwrap();
        assert_eq!(Solver::solve_part(&mut map, 1).unwrap(), "94");
        assert_eq!(Solver::solve_part(&mut map, 2).unwrap(), "154");
    }

    #[test]
    fn test_network_shape() {
        let map = Solver::parse(TRAILS).unwrap();
        assert_eq!(map.start, Coord::new(0, 1));
        assert_eq!(map.end, Coord::new(22, 21));

        let dry = map.network(false);
        assert_eq!(dry.len(), 9);
        // without slopes every corridor runs both ways
        let edges: usize = dry.iter().map(Vec::len).sum();
        assert_eq!(edges % 2, 0);
        assert!(map.network(true).iter().map(Vec::len).sum::<usize>() < edges);
    }

    #[test]
    fn test_uphill_slope_blocks_the_only_route() {
        let mut map = Solver::parse("#.#\n#.#\n#^#\n#.#").unwrap();
        assert!(Solver::solve_part(&mut map, 1).is_err());
        assert_eq!(Solver::solve_part(&mut map, 2).unwrap(), "3");
    }

    #[test]
    fn test_missing_opening() {
        assert!(matches!(
            Solver::parse("###\n#.#"),
            Err(ParseError::MissingData(_))
        ));
        assert!(Solver::parse("#.#\n#x#").is_err());
    }
}
