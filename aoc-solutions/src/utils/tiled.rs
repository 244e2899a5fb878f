//! Exact-step reachability on a tile repeated infinitely in every direction.
//!
//! A cell counts as reachable in exactly `N` steps when its shortest
//! distance `d` from the start satisfies `d <= N` and `d ≡ N (mod 2)`:
//! any shorter path of the right parity can be padded by stepping back and
//! forth.
//!
//! Two strategies are provided. [`Garden::count_direct`] walks the plane
//! breadth-first and works for any tile. [`Garden::count_closed_form`]
//! only holds for square, odd-sized tiles with the start in the centre and
//! a free centre cross and border; under those conditions the distance to
//! every tile copy is known up front and whole rings of tiles are summed
//! arithmetically.

use std::collections::{HashSet, VecDeque};

use log::debug;
use thiserror::Error;

use super::grid::{Coord, Grid};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReachError {
    #[error("closed form not applicable: {0}")]
    Precondition(String),

    #[error("start {0} is not a free cell of the tile")]
    InvalidStart(Coord),

    #[error("count for {0} steps does not fit in 64 bits")]
    Overflow(u64),
}

/// A single tile of garden plots (`true` = free) and the start cell.
#[derive(Debug, Clone)]
pub struct Garden {
    tile: Grid<bool>,
    start: Coord,
}

impl Garden {
    pub fn new(tile: Grid<bool>, start: Coord) -> Result<Self, ReachError> {
        match tile.get(start) {
            Some(true) => Ok(Self { tile, start }),
            _ => Err(ReachError::InvalidStart(start)),
        }
    }

    pub fn tile(&self) -> &Grid<bool> {
        &self.tile
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    fn is_free_wrapped(&self, coord: Coord) -> bool {
        self.tile[coord.wrap(self.tile.rows(), self.tile.cols())]
    }

    /// Cells reachable in exactly `steps` steps without leaving the tile.
    pub fn count_in_tile(&self, steps: u64) -> u64 {
        TileDistances::from_entry(&self.tile, self.start).reachable(same_parity_i64(steps))
    }

    /// Breadth-first over the tiled plane, one distance layer at a time.
    ///
    /// The plane is bipartite, so a layer's new cells are its neighbours
    /// minus the previous layer; only three layers are ever held.
    pub fn count_direct(&self, steps: u64) -> u64 {
        let mut previous: HashSet<Coord> = HashSet::new();
        let mut current: HashSet<Coord> = HashSet::from([self.start]);
        let mut reachable = 0;

        for distance in 0..=steps {
            if distance % 2 == steps % 2 {
                reachable += current.len() as u64;
            }
            if distance == steps {
                break;
            }

            let next: HashSet<Coord> = current
                .iter()
                .flat_map(|coord| coord.neighbours())
                .filter(|n| !previous.contains(n) && self.is_free_wrapped(*n))
                .collect();
            if next.is_empty() {
                break;
            }
            previous = std::mem::replace(&mut current, next);
        }

        reachable
    }

    /// Closed-form count, or [`ReachError::Precondition`] when the tile
    /// does not have the shape the formula relies on.
    pub fn count_closed_form(&self, steps: u64) -> Result<u64, ReachError> {
        self.check_closed_form()?;

        let overflow = ReachError::Overflow(steps);
        let size = self.tile.rows();
        let last = size as i64 - 1;
        let mid = self.start.row;
        let steps = i64::try_from(steps).map_err(|_| overflow.clone())?;
        let size = size as i64;

        let at = |row: i64, col: i64| TileDistances::from_entry(&self.tile, Coord::new(row, col));

        // Straight out along the centre cross, entering each copy at the
        // middle of the edge facing the start.
        let axis_first = steps - mid - 1;
        let axes = [(mid, 0), (mid, last), (0, mid), (last, mid)]
            .map(|(row, col)| sum_ray(&at(row, col), axis_first, size, Weight::One));

        // Quadrants, entering each copy at the corner nearest the start.
        // The m-th anti-diagonal holds m copies.
        let diagonal_first = steps - size - 1;
        let quadrants = [(0, 0), (0, last), (last, 0), (last, last)]
            .map(|(row, col)| sum_ray(&at(row, col), diagonal_first, size, Weight::Index));

        axes.into_iter()
            .chain(quadrants)
            .try_fold(at(mid, mid).reachable(steps), |total, ray| {
                total.checked_add(ray?)
            })
            .ok_or(overflow)
    }

    /// Closed form when possible, direct walk otherwise.
    ///
    /// Overflow is returned as is; a walk that long would never finish.
    pub fn count_reachable(&self, steps: u64) -> Result<u64, ReachError> {
        match self.count_closed_form(steps) {
            Err(ReachError::Precondition(reason)) => {
                debug!("closed form not applicable ({reason}), falling back to breadth-first walk");
                Ok(self.count_direct(steps))
            }
            other => other,
        }
    }

    fn check_closed_form(&self) -> Result<(), ReachError> {
        let (rows, cols) = (self.tile.rows(), self.tile.cols());
        if rows != cols {
            return Err(ReachError::Precondition(format!(
                "tile is {rows}x{cols}, not square"
            )));
        }
        if rows % 2 == 0 {
            return Err(ReachError::Precondition(format!(
                "tile side {rows} is even"
            )));
        }

        let mid = (rows / 2) as i64;
        if self.start != Coord::new(mid, mid) {
            return Err(ReachError::Precondition(format!(
                "start {} is not the centre",
                self.start
            )));
        }

        let last = rows as i64 - 1;
        let blocked = self
            .tile
            .coords()
            .find(|c| {
                let on_cross = c.row == mid || c.col == mid;
                let on_border = c.row == 0 || c.col == 0 || c.row == last || c.col == last;
                (on_cross || on_border) && !self.tile[*c]
            });
        match blocked {
            Some(c) => Err(ReachError::Precondition(format!(
                "rock at {c} on the centre cross or border"
            ))),
            None => Ok(()),
        }
    }
}

/// `steps` itself when it fits, otherwise the largest `i64` of the same parity.
///
/// Only valid where every count past the tile's largest distance depends on
/// parity alone.
fn same_parity_i64(steps: u64) -> i64 {
    i64::try_from(steps).unwrap_or(i64::MAX - 1 + (steps % 2) as i64)
}

#[derive(Debug, Clone, Copy)]
enum Weight {
    /// Each ring holds a single copy.
    One,
    /// Ring `k` holds `k` copies.
    Index,
}

/// Sum over rings `k >= 1` of `weight(k) * dist.reachable(first - (k - 1) * period)`.
///
/// Rings far enough inside to be saturated alternate between the two
/// parities and are summed in closed form; the rest are summed one by one.
/// `None` on overflow.
fn sum_ray(dist: &TileDistances, first: i64, period: i64, weight: Weight) -> Option<u64> {
    let max = dist.max_distance() as i64;
    let saturated = if first < max {
        0
    } else {
        ((first - max) / period + 1) as u64
    };

    let odd_rings = saturated.div_ceil(2);
    let even_rings = saturated / 2;
    let (odd_weight, even_weight) = match weight {
        Weight::One => (odd_rings, even_rings),
        Weight::Index => (
            odd_rings.checked_mul(odd_rings)?,
            even_rings.checked_mul(even_rings + 1)?,
        ),
    };

    let mut total = odd_weight
        .checked_mul(dist.saturated(first))?
        .checked_add(even_weight.checked_mul(dist.saturated(first - period))?)?;

    let mut ring = saturated + 1;
    loop {
        let remaining = first - (ring as i64 - 1) * period;
        if remaining < 0 {
            break;
        }
        let copies = match weight {
            Weight::One => 1,
            Weight::Index => ring,
        };
        total = total.checked_add(copies * dist.reachable(remaining))?;
        ring += 1;
    }

    Some(total)
}

/// In-tile distance distribution from one entry cell.
#[derive(Debug, Clone)]
struct TileDistances {
    /// `cumulative[d]` = cells at distance `<= d` with the parity of `d`.
    cumulative: Vec<u64>,
}

impl TileDistances {
    fn from_entry(tile: &Grid<bool>, entry: Coord) -> Self {
        let mut distance: Grid<Option<usize>> = tile.map(|_| None);
        let mut per_distance: Vec<u64> = Vec::new();
        let mut queue = VecDeque::from([(entry, 0usize)]);
        distance[entry] = Some(0);

        while let Some((coord, d)) = queue.pop_front() {
            if per_distance.len() <= d {
                per_distance.resize(d + 1, 0);
            }
            per_distance[d] += 1;

            for next in coord.neighbours() {
                if tile.get(next) == Some(&true) && distance[next].is_none() {
                    distance[next] = Some(d + 1);
                    queue.push_back((next, d + 1));
                }
            }
        }

        let mut cumulative = per_distance;
        for d in 2..cumulative.len() {
            cumulative[d] += cumulative[d - 2];
        }
        Self { cumulative }
    }

    fn max_distance(&self) -> usize {
        self.cumulative.len() - 1
    }

    fn reachable(&self, remaining: i64) -> u64 {
        if remaining < 0 {
            return 0;
        }
        let max = self.max_distance();
        let remaining = remaining as usize;
        if remaining <= max {
            self.cumulative[remaining]
        } else if (remaining - max) % 2 == 0 {
            self.cumulative[max]
        } else {
            max.checked_sub(1).map_or(0, |i| self.cumulative[i])
        }
    }

    /// Count once every cell is within reach, for remaining steps of `parity`'s parity.
    fn saturated(&self, parity: i64) -> u64 {
        let max = self.max_distance() as i64;
        let same_parity = (max - parity).rem_euclid(2) == 0;
        self.reachable(if same_parity { max } else { max + 1 })
    }
}
