//! Unbounded integer coordinates.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

use super::Direction;

/// A `(row, col)` position on an unbounded integer plane.
///
/// Bounds are a property of whatever [`Grid`](super::Grid) a coordinate is
/// looked up in, never of the coordinate itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub row: i64,
    pub col: i64,
}

impl Coord {
    pub const ORIGIN: Coord = Coord::new(0, 0);

    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// The neighbouring coordinate one step towards `direction`.
    pub fn step(self, direction: Direction) -> Coord {
        self + direction.delta()
    }

    /// Neighbours in [`Direction::ALL`] order.
    pub fn neighbours(self) -> impl Iterator<Item = Coord> {
        Direction::ALL.into_iter().map(move |d| self.step(d))
    }

    pub fn manhattan(self, other: Coord) -> u64 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Position of this coordinate inside a `rows × cols` tile repeated over the plane.
    pub fn wrap(self, rows: usize, cols: usize) -> Coord {
        Coord::new(
            self.row.rem_euclid(rows as i64),
            self.col.rem_euclid(cols as i64),
        )
    }

    /// Which tile copy this coordinate falls in, the origin tile being `(0, 0)`.
    pub fn tile(self, rows: usize, cols: usize) -> Coord {
        Coord::new(
            self.row.div_euclid(rows as i64),
            self.col.div_euclid(cols as i64),
        )
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl AddAssign for Coord {
    fn add_assign(&mut self, rhs: Coord) {
        self.row += rhs.row;
        self.col += rhs.col;
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Mul<i64> for Coord {
    type Output = Coord;

    fn mul(self, rhs: i64) -> Coord {
        Coord::new(self.row * rhs, self.col * rhs)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
