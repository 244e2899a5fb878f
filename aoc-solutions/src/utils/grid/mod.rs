//! Rectangular grids addressed by [`Coord`].
//!
//! A [`Grid`] is a fixed `rows × cols` block stored row-major. It never
//! resizes; out-of-bounds lookups return `None` (or [`GridError::OutOfBounds`]
//! from [`Grid::try_get`]), while `grid[coord]` treats them as a bug and panics.
//!
//! ```
//! use aoc_solutions::utils::grid::{Coord, Direction, Grid};
//!
//! let grid = Grid::parse("12\n34", |c| c.to_digit(10).ok_or(c)).unwrap();
//! let below = Coord::ORIGIN.step(Direction::Down);
//! assert_eq!(grid[below], 3);
//! assert_eq!(grid.get(below.step(Direction::Down)), None);
//! ```

mod coord;
mod direction;

use std::ops::{Index, IndexMut};

use thiserror::Error;

pub use coord::Coord;
pub use direction::Direction;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Coord),

    #[error("unexpected symbol {symbol:?} at row {row}, column {col}")]
    Cell { row: usize, col: usize, symbol: char },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    cells: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Grid<T> {
    /// Build a grid from rows of equal length.
    pub fn new(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let height = rows.len();
        let mut cells = Vec::with_capacity(height * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(GridError::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self {
            cells,
            rows: height,
            cols,
        })
    }

    /// Parse one cell per character, one row per non-empty line.
    pub fn parse<F, E>(input: &str, mut cell: F) -> Result<Self, GridError>
    where
        F: FnMut(char) -> Result<T, E>,
    {
        let rows = input
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, symbol)| {
                        cell(symbol).map_err(|_| GridError::Cell { row, col, symbol })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(rows)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        (0..self.rows as i64).contains(&coord.row) && (0..self.cols as i64).contains(&coord.col)
    }

    fn offset(&self, coord: Coord) -> Option<usize> {
        self.in_bounds(coord)
            .then(|| coord.row as usize * self.cols + coord.col as usize)
    }

    pub fn get(&self, coord: Coord) -> Option<&T> {
        self.offset(coord).map(|i| &self.cells[i])
    }

    pub fn try_get(&self, coord: Coord) -> Result<&T, GridError> {
        self.get(coord).ok_or(GridError::OutOfBounds(coord))
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut T> {
        self.offset(coord).map(|i| &mut self.cells[i])
    }

    /// Row `r` as a slice. Panics when `r >= rows()`.
    pub fn row(&self, r: usize) -> &[T] {
        &self.cells[r * self.cols..(r + 1) * self.cols]
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<T> {
        let (rows, cols) = (self.rows as i64, self.cols as i64);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Coord::new(row, col)))
    }

    /// Cells paired with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> {
        self.coords().zip(self.cells.iter())
    }

    /// Same-shaped grid with every cell mapped through `f`.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.iter().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T: Clone> Grid<T> {
    /// A `rows × cols` grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            cells: vec![value; rows * cols],
            rows,
            cols,
        })
    }
}

impl<T> Index<Coord> for Grid<T> {
    type Output = T;

    fn index(&self, coord: Coord) -> &T {
        match self.get(coord) {
            Some(cell) => cell,
            None => panic!(
                "coordinate {coord} out of bounds for {}x{} grid",
                self.rows, self.cols
            ),
        }
    }
}

impl<T> IndexMut<Coord> for Grid<T> {
    fn index_mut(&mut self, coord: Coord) -> &mut T {
        let (rows, cols) = (self.rows, self.cols);
        match self.get_mut(coord) {
            Some(cell) => cell,
            None => panic!("coordinate {coord} out of bounds for {rows}x{cols} grid"),
        }
    }
}
