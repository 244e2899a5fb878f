//! Lowest-cost path search.
//!
//! [`dijkstra`] and [`distances`] work on any hashable, ordered state with a
//! successor function. [`min_path_cost`] layers grid movement rules on top:
//! a [`SearchState`] remembers how many cells it has moved in a straight
//! line, and a [`MovePolicy`] decides when it may go on, turn or stop.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::Hash;

use log::trace;
use thiserror::Error;

use super::grid::{Coord, Direction, Grid};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("frontier exhausted without reaching the goal")]
    NoPathFound,
}

/// Frontier entry ordered so that `BinaryHeap` pops the lowest cost first,
/// then the smallest state.
#[derive(Debug)]
struct Frontier<S> {
    cost: u64,
    state: S,
}

impl<S: Ord> Ord for Frontier<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.state.cmp(&self.state))
    }
}

impl<S: Ord> PartialOrd for Frontier<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Ord> PartialEq for Frontier<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S: Ord> Eq for Frontier<S> {}

/// Cost of the cheapest path from any start to the first goal state popped.
///
/// Edge costs are the second element of each successor pair. Stale frontier
/// duplicates are skipped when popped.
pub fn dijkstra<S, I, F, G>(
    starts: impl IntoIterator<Item = S>,
    mut successors: F,
    mut is_goal: G,
) -> Result<(S, u64), SearchError>
where
    S: Clone + Eq + Hash + Ord,
    F: FnMut(&S) -> I,
    I: IntoIterator<Item = (S, u64)>,
    G: FnMut(&S) -> bool,
{
    let mut frontier: BinaryHeap<Frontier<S>> = starts
        .into_iter()
        .map(|state| Frontier { cost: 0, state })
        .collect();
    let mut settled: HashSet<S> = HashSet::new();
    let mut peak = frontier.len();

    while let Some(Frontier { cost, state }) = frontier.pop() {
        if !settled.insert(state.clone()) {
            continue;
        }
        if is_goal(&state) {
            trace!(
                "goal reached at cost {cost}, {} states settled, frontier peak {peak}",
                settled.len()
            );
            return Ok((state, cost));
        }
        for (next, step_cost) in successors(&state) {
            if !settled.contains(&next) {
                frontier.push(Frontier {
                    cost: cost + step_cost,
                    state: next,
                });
            }
        }
        peak = peak.max(frontier.len());
    }

    trace!("frontier exhausted after {} states", settled.len());
    Err(SearchError::NoPathFound)
}

/// Lowest cost to every state reachable from `starts`.
pub fn distances<S, I, F>(starts: impl IntoIterator<Item = S>, mut successors: F) -> HashMap<S, u64>
where
    S: Clone + Eq + Hash + Ord,
    F: FnMut(&S) -> I,
    I: IntoIterator<Item = (S, u64)>,
{
    let mut frontier: BinaryHeap<Frontier<S>> = starts
        .into_iter()
        .map(|state| Frontier { cost: 0, state })
        .collect();
    let mut settled: HashMap<S, u64> = HashMap::new();

    while let Some(Frontier { cost, state }) = frontier.pop() {
        match settled.entry(state.clone()) {
            Entry::Occupied(_) => continue,
            Entry::Vacant(slot) => {
                slot.insert(cost);
            }
        }
        for (next, step_cost) in successors(&state) {
            if !settled.contains_key(&next) {
                frontier.push(Frontier {
                    cost: cost + step_cost,
                    state: next,
                });
            }
        }
    }

    settled
}

/// Position, heading and the number of cells already moved in that heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchState {
    pub coord: Coord,
    pub direction: Direction,
    pub run: u8,
}

impl SearchState {
    /// A state that has not moved yet.
    pub fn start(coord: Coord, direction: Direction) -> Self {
        Self {
            coord,
            direction,
            run: 0,
        }
    }
}

// Shorter runs first on equal cost.
impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.run
            .cmp(&other.run)
            .then_with(|| self.coord.cmp(&other.coord))
            .then_with(|| self.direction.cmp(&other.direction))
    }
}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Movement constraints applied on top of the current straight run length.
pub trait MovePolicy {
    fn can_continue_straight(&self, run: u8) -> bool;
    fn can_turn(&self, run: u8) -> bool;
    fn can_stop(&self, run: u8) -> bool;
}

/// Move at most `max_run` cells straight, and at least `min_run` before
/// turning or stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    pub min_run: u8,
    pub max_run: u8,
}

impl RunLimits {
    pub const fn new(min_run: u8, max_run: u8) -> Self {
        Self { min_run, max_run }
    }
}

impl MovePolicy for RunLimits {
    fn can_continue_straight(&self, run: u8) -> bool {
        run < self.max_run
    }

    fn can_turn(&self, run: u8) -> bool {
        run >= self.min_run
    }

    fn can_stop(&self, run: u8) -> bool {
        run >= self.min_run
    }
}

/// Cheapest cost of moving from any start state to `goal` under `policy`.
///
/// Entering a cell costs `cost(cell)`; the start cell is free. Moves never
/// leave the grid.
pub fn min_path_cost<T, C, P>(
    grid: &Grid<T>,
    starts: impl IntoIterator<Item = SearchState>,
    goal: Coord,
    cost: C,
    policy: &P,
) -> Result<u64, SearchError>
where
    C: Fn(&T) -> u64,
    P: MovePolicy + ?Sized,
{
    let successors = |state: &SearchState| {
        let mut next = Vec::with_capacity(3);
        let mut push = |direction: Direction, run: u8| {
            let coord = state.coord.step(direction);
            if let Some(cell) = grid.get(coord) {
                next.push((
                    SearchState {
                        coord,
                        direction,
                        run,
                    },
                    cost(cell),
                ));
            }
        };

        if policy.can_continue_straight(state.run) {
            push(state.direction, state.run + 1);
        }
        if policy.can_turn(state.run) {
            for turned in state.direction.perpendicular() {
                push(turned, 1);
            }
        }
        next
    };

    let is_goal = |state: &SearchState| state.coord == goal && policy.can_stop(state.run);

    dijkstra(starts, successors, is_goal).map(|(_, total)| total)
}
