use std::collections::HashSet;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

use crate::utils::grid::{Coord, Direction, Grid, GridError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 18, tags = ["2023", "grid", "flood-fill"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dig {
    direction: Direction,
    length: i64,
}

/// The dig plan read both ways: as written, and from the colour codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigPlan {
    written: Vec<Dig>,
    decoded: Vec<Dig>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DigError {
    #[error("trench ends at {0} instead of back at the start")]
    NotClosed(Coord),

    #[error("trench leaves the dig site at {0}")]
    OffSite(Coord),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// The dig site with every axis squeezed into bands.
///
/// Cell `(i, j)` stands for rows `rows[i - 1] + 1 ..= rows[i]` and likewise
/// for columns, so each cell is either all trench, all inside or all outside.
struct Site {
    rows: Vec<i64>,
    cols: Vec<i64>,
}

impl Site {
    fn around(corners: &[Coord]) -> Self {
        Self {
            rows: band_edges(corners.iter().map(|c| c.row)),
            cols: band_edges(corners.iter().map(|c| c.col)),
        }
    }

    /// Cell whose band ends exactly at `position`.
    fn cell(&self, position: Coord) -> Option<Coord> {
        let row = self.rows.binary_search(&position.row).ok()?;
        let col = self.cols.binary_search(&position.col).ok()?;
        Some(Coord::new(row as i64, col as i64))
    }

    /// Plane position of an in-bounds cell.
    fn position(&self, cell: Coord) -> Coord {
        Coord::new(self.rows[cell.row as usize], self.cols[cell.col as usize])
    }

    fn area(&self, cell: Coord) -> u64 {
        band_width(&self.rows, cell.row as usize) * band_width(&self.cols, cell.col as usize)
    }
}

/// Every corner value with its two neighbours, sorted and deduplicated, so
/// ground between trench lines and around the lagoon gets its own band.
fn band_edges(values: impl Iterator<Item = i64>) -> Vec<i64> {
    let mut edges: Vec<i64> = values.flat_map(|v| [v - 1, v, v + 1]).collect();
    edges.sort_unstable();
    edges.dedup();
    edges
}

fn band_width(edges: &[i64], index: usize) -> u64 {
    index
        .checked_sub(1)
        .map_or(1, |previous| edges[index].abs_diff(edges[previous]))
}

fn corners(plan: &[Dig]) -> Vec<Coord> {
    let mut corner = Coord::ORIGIN;
    let mut corners = vec![corner];
    for dig in plan {
        corner += dig.direction.delta() * dig.length;
        corners.push(corner);
    }
    corners
}

/// Cubic metres held by the trench and everything it encloses.
fn lagoon_volume(plan: &[Dig]) -> Result<u64, DigError> {
    let corners = corners(plan);
    if let Some(&end) = corners.last()
        && end != Coord::ORIGIN
    {
        return Err(DigError::NotClosed(end));
    }

    let site = Site::around(&corners);
    let mut trench = Grid::filled(site.rows.len(), site.cols.len(), false)?;

    let mut cell = site
        .cell(Coord::ORIGIN)
        .ok_or(DigError::OffSite(Coord::ORIGIN))?;
    let mut position = Coord::ORIGIN;
    for dig in plan {
        let target = position + dig.direction.delta() * dig.length;
        loop {
            let Some(dug) = trench.get_mut(cell) else {
                return Err(DigError::OffSite(target));
            };
            if site.position(cell) == target {
                break;
            }
            *dug = true;
            cell = cell.step(dig.direction);
        }
        position = target;
    }

    let outside = outside_ground(&trench);
    Ok(trench
        .coords()
        .filter(|cell| !outside.contains(cell))
        .map(|cell| site.area(cell))
        .sum())
}

/// Ground cells connected to the edge of the site.
fn outside_ground(trench: &Grid<bool>) -> HashSet<Coord> {
    let last_row = trench.rows() as i64 - 1;
    let last_col = trench.cols() as i64 - 1;
    let mut pending: Vec<Coord> = trench
        .coords()
        .filter(|c| c.row == 0 || c.col == 0 || c.row == last_row || c.col == last_col)
        .collect();
    let mut outside = HashSet::new();

    while let Some(cell) = pending.pop() {
        if trench.get(cell) != Some(&false) || !outside.insert(cell) {
            continue;
        }
        pending.extend(
            cell.neighbours()
                .filter(|n| trench.in_bounds(*n) && !outside.contains(n)),
        );
    }
    outside
}

fn parse_dig(line: &str) -> anyhow::Result<(Dig, Dig)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [direction, length, colour] = fields[..] else {
        return Err(anyhow!("expected `<direction> <length> (#rrggbb)`"));
    };

    let written = Dig {
        direction: match direction {
            "U" => Direction::Up,
            "D" => Direction::Down,
            "L" => Direction::Left,
            "R" => Direction::Right,
            _ => return Err(anyhow!("unknown direction {direction:?}")),
        },
        length: length.parse().context("length")?,
    };

    let hex = colour
        .strip_prefix("(#")
        .and_then(|c| c.strip_suffix(')'))
        .filter(|h| h.len() == 6 && h.is_ascii())
        .ok_or_else(|| anyhow!("malformed colour {colour:?}"))?;
    let (length, direction) = hex.split_at(5);
    let decoded = Dig {
        direction: match direction {
            "0" => Direction::Right,
            "1" => Direction::Down,
            "2" => Direction::Left,
            "3" => Direction::Up,
            _ => return Err(anyhow!("unknown colour direction {direction:?}")),
        },
        length: i64::from_str_radix(length, 16).context("colour length")?,
    };

    if written.length <= 0 || decoded.length <= 0 {
        return Err(anyhow!("dig lengths must be positive"));
    }
    Ok((written, decoded))
}

impl AocParser for Solver {
    type SharedData<'a> = DigPlan;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let digs = input
            .trim()
            .lines()
            .enumerate()
            .map(|(line_idx, line)| {
                parse_dig(line).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        let (written, decoded) = digs.into_iter().unzip();
        Ok(DigPlan { written, decoded })
    }
}

impl PartSolver<1> for Solver {
    type Answer = u64;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<u64, SolveError> {
        lagoon_volume(&shared.written).map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    type Answer = u64;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<u64, SolveError> {
        lagoon_volume(&shared.decoded).map_err(SolveError::failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const PLAN: &str = "\
R 6 (#70c710)
D 5 (#0dc571)
L 2 (#5713f0)
D 2 (#d2c081)
R 2 (#59c680)
D 2 (#411b91)
L 5 (#8ceee2)
U 2 (#caa173)
L 1 (#1b58a2)
U 2 (#caa171)
R 2 (#7807d2)
U 3 (#a77fa3)
L 2 (#015232)
U 2 (#7a21e3)
";

    fn square(side: i64) -> Vec<Dig> {
        [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ]
        .map(|direction| Dig {
            direction,
            length: side,
        })
        .to_vec()
    }

    #[test]
    fn test_parts() {
        let mut plan = Solver::parse(PLAN).unwrap();
        assert_eq!(Solver::solve_part(&mut plan, 1).unwrap(), "62");
        assert_eq!(Solver::solve_part(&mut plan, 2).unwrap(), "952408144115");
    }

    #[test]
    fn test_colour_decoding() {
        let plan = Solver::parse("R 6 (#70c710)").unwrap();
        assert_eq!(
            plan.decoded,
            vec![Dig {
                direction: Direction::Right,
                length: 461_937
            }]
        );
    }

    #[test]
    fn test_squares_include_the_trench() {
        assert_eq!(lagoon_volume(&square(1)), Ok(4));
        assert_eq!(lagoon_volume(&square(2)), Ok(9));
        assert_eq!(lagoon_volume(&square(1_000)), Ok(1_001 * 1_001));
    }

    #[test]
    fn test_open_trench_rejected() {
        let open = &square(2)[..3];
        assert_eq!(
            lagoon_volume(open),
            Err(DigError::NotClosed(Coord::new(2, 0)))
        );
    }

    #[test]
    fn test_bands_cover_the_corners() {
        assert_eq!(band_edges([0, 6].into_iter()), vec![-1, 0, 1, 5, 6, 7]);
        let edges = [-1, 0, 1, 5, 6, 7];
        let widths: Vec<u64> = (0..edges.len()).map(|i| band_width(&edges, i)).collect();
        assert_eq!(widths, vec![1, 1, 1, 4, 1, 1]);
    }

    #[test]
    fn test_bad_lines_rejected() {
        assert!(Solver::parse("X 6 (#70c710)").is_err());
        assert!(Solver::parse("R 6 (#70c71)").is_err());
        assert!(Solver::parse("R 6 (#70c714)").is_err());
        assert!(Solver::parse("R 0 (#70c710)").is_err());
        assert!(Solver::parse("R 6").is_err());
    }
}
