//! Route finding between two cells of a maze.
//!
//! Solvers only read the grid. A result is the list of coordinates from start to finish, both
//! included; an empty list means there is no route, which includes either endpoint being a wall.

use bit_set::BitSet;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::coordinates::Coordinate;
use crate::grid::Grid;
use crate::utils::FnvHashMap;

pub trait Solver {
    /// Both endpoints must lie inside the grid, otherwise this panics.
    fn solve(&mut self, grid: &Grid, start: Coordinate, finish: Coordinate) -> Vec<Coordinate>;
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SolverKind {
    HeuristicSearch,
    RandomBacktrack,
}

impl SolverKind {
    pub fn build(self, rng: XorShiftRng) -> Box<dyn Solver> {
        match self {
            SolverKind::HeuristicSearch => Box::new(HeuristicSearch),
            SolverKind::RandomBacktrack => Box::new(RandomBacktrack::with_rng(rng)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SolverKind::HeuristicSearch => "astar",
            SolverKind::RandomBacktrack => "dfs",
        }
    }
}

/// A* search with the Manhattan distance heuristic. Always finds a shortest route.
#[derive(Debug, Copy, Clone, Default)]
pub struct HeuristicSearch;

impl Solver for HeuristicSearch {
    fn solve(&mut self, grid: &Grid, start: Coordinate, finish: Coordinate) -> Vec<Coordinate> {
        a_star(grid, start, finish)
    }
}

/// Randomised depth first search. Finds a route if there is one, rarely the shortest.
#[derive(Debug, Clone)]
pub struct RandomBacktrack<R = XorShiftRng> {
    rng: R,
}

impl RandomBacktrack<XorShiftRng> {
    pub fn new() -> Self {
        RandomBacktrack::with_rng(XorShiftRng::from_entropy())
    }

    pub fn from_seed(seed: u64) -> Self {
        RandomBacktrack::with_rng(XorShiftRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomBacktrack<R> {
    pub fn with_rng(rng: R) -> Self {
        RandomBacktrack { rng }
    }
}

impl<R: Rng> Solver for RandomBacktrack<R> {
    fn solve(&mut self, grid: &Grid, start: Coordinate, finish: Coordinate) -> Vec<Coordinate> {
        random_backtrack(&mut self.rng, grid, start, finish)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct SearchNode {
    position: Coordinate,
    cost: usize,
    estimate: usize,
    total_cost: usize,
    // insertion order, so equal total costs pop first in first out
    sequence: usize,
}

// BinaryHeap is a max heap: reverse both keys so the cheapest, then oldest, node is on top.
impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.total_cost
             .cmp(&self.total_cost)
             .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* over the 4-connected passable cells with unit step cost.
///
/// The Manhattan distance never overestimates and is consistent on a unit-cost grid, so the
/// first time `finish` is popped from the frontier its route is a shortest one.
pub fn a_star(grid: &Grid, start: Coordinate, finish: Coordinate) -> Vec<Coordinate> {
    if !grid.is_passable(start) || !grid.is_passable(finish) {
        debug!("a_star {} -> {}: endpoint is a wall", start, finish);
        return vec![];
    }

    let mut frontier = BinaryHeap::new();
    let mut closed = BitSet::with_capacity(grid.size());
    let mut best_cost = FnvHashMap::default();
    let mut came_from = FnvHashMap::default();
    let mut sequence = 0;

    let estimate = start.manhattan_distance(finish);
    frontier.push(SearchNode {
        position: start,
        cost: 0,
        estimate,
        total_cost: estimate,
        sequence,
    });
    best_cost.insert(start, 0);

    while let Some(node) = frontier.pop() {
        if !closed.insert(cell_index(grid, node.position)) {
            // stale entry, a cheaper route here was already expanded
            continue;
        }
        trace!("expanding {}: cost {}, estimate {}", node.position, node.cost, node.estimate);

        if node.position == finish {
            let path = reconstruct_path(&came_from, start, finish);
            debug!("a_star {} -> {}: {} steps, {} cells expanded",
                   start, finish, path.len() - 1, closed.len());
            return path;
        }

        for neighbour in grid.passable_neighbours(node.position) {
            if closed.contains(cell_index(grid, neighbour)) {
                continue;
            }

            let cost = node.cost + 1;
            let improves = best_cost.get(&neighbour).map_or(true, |&known| cost < known);
            if improves {
                best_cost.insert(neighbour, cost);
                came_from.insert(neighbour, node.position);
                sequence += 1;
                let estimate = neighbour.manhattan_distance(finish);
                frontier.push(SearchNode {
                    position: neighbour,
                    cost,
                    estimate,
                    total_cost: cost + estimate,
                    sequence,
                });
            }
        }
    }

    debug!("a_star {} -> {}: no path, {} cells expanded", start, finish, closed.len());
    vec![]
}

fn reconstruct_path(came_from: &FnvHashMap<Coordinate, Coordinate>,
                    start: Coordinate,
                    finish: Coordinate)
                    -> Vec<Coordinate> {
    let mut path = vec![finish];
    let mut current = finish;
    while current != start {
        match came_from.get(&current) {
            Some(&previous) => {
                current = previous;
                path.push(current);
            }
            None => unreachable!("{} has no predecessor on the way back to {}", current, start),
        }
    }
    path.reverse();
    path
}

/// Wander from `start`, always stepping to a random unvisited passable neighbour and
/// backtracking along the route taken when stuck, until `finish` is reached.
///
/// The route returned is the backtracking stack at that moment, so it never revisits a cell.
/// If every reachable cell is exhausted without meeting `finish`, the result is empty.
pub fn random_backtrack<R>(rng: &mut R,
                           grid: &Grid,
                           start: Coordinate,
                           finish: Coordinate)
                           -> Vec<Coordinate>
    where R: Rng + ?Sized
{
    if !grid.is_passable(start) || !grid.is_passable(finish) {
        debug!("random_backtrack {} -> {}: endpoint is a wall", start, finish);
        return vec![];
    }

    let mut visited = BitSet::with_capacity(grid.size());
    let mut stack = vec![];
    let mut current = start;
    visited.insert(cell_index(grid, current));

    while current != finish {
        let unvisited = grid.passable_neighbours(current)
            .into_iter()
            .filter(|neighbour| !visited.contains(cell_index(grid, *neighbour)))
            .collect::<SmallVec<[Coordinate; 4]>>();

        if let Some(&next) = unvisited.choose(rng) {
            stack.push(current);
            current = next;
            visited.insert(cell_index(grid, current));
        } else if let Some(previous) = stack.pop() {
            current = previous;
        } else {
            debug!("random_backtrack {} -> {}: no path, {} cells visited",
                   start, finish, visited.len());
            return vec![];
        }
    }

    stack.push(current);
    debug!("random_backtrack {} -> {}: {} steps, {} cells visited",
           start, finish, stack.len() - 1, visited.len());
    stack
}

#[inline]
fn cell_index(grid: &Grid, coord: Coordinate) -> usize {
    match grid.grid_coordinate_to_index(coord) {
        Some(index) => index,
        None => panic!("coordinate {} is outside the {}x{} grid", coord, grid.height().0, grid.width().0),
    }
}
