//! Maze carving.
//!
//! Both generators work on the room lattice: cells at an even row and an even column are rooms,
//! every other cell starts as wall and is only opened to join two neighbouring rooms. Each
//! algorithm opens exactly one wall per room it attaches, so the result is a spanning tree over
//! the rooms: every passage is reachable and there are no loops.

use log::{debug, trace};
use petgraph::unionfind::UnionFind;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::{CellKind, CompassPrimary};
use crate::coordinates::Coordinate;
use crate::grid::Grid;
use crate::random_set::RandomSelectionSet;
use crate::units::{Height, Width};

/// Something that can carve a fully connected maze of a requested size.
pub trait Generator {
    /// Panics if either dimension is zero.
    fn generate(&mut self, height: Height, width: Width) -> Grid;
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GeneratorKind {
    IncrementalCarver,
    SpanningCarver,
}

impl GeneratorKind {
    pub fn build(self, rng: XorShiftRng) -> Box<dyn Generator> {
        match self {
            GeneratorKind::IncrementalCarver => Box::new(IncrementalCarver::with_rng(rng)),
            GeneratorKind::SpanningCarver => Box::new(SpanningCarver::with_rng(rng)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::IncrementalCarver => "prim",
            GeneratorKind::SpanningCarver => "kruskal",
        }
    }
}

/// Randomised Prim's algorithm, see `incremental_carve`.
#[derive(Debug, Clone)]
pub struct IncrementalCarver<R = XorShiftRng> {
    rng: R,
}

impl IncrementalCarver<XorShiftRng> {
    pub fn new() -> Self {
        IncrementalCarver::with_rng(XorShiftRng::from_entropy())
    }

    pub fn from_seed(seed: u64) -> Self {
        IncrementalCarver::with_rng(XorShiftRng::seed_from_u64(seed))
    }
}

impl<R: Rng> IncrementalCarver<R> {
    pub fn with_rng(rng: R) -> Self {
        IncrementalCarver { rng }
    }
}

impl<R: Rng> Generator for IncrementalCarver<R> {
    fn generate(&mut self, height: Height, width: Width) -> Grid {
        incremental_carve(&mut self.rng, height, width)
    }
}

/// Randomised Kruskal's algorithm, see `spanning_carve`.
#[derive(Debug, Clone)]
pub struct SpanningCarver<R = XorShiftRng> {
    rng: R,
}

impl SpanningCarver<XorShiftRng> {
    pub fn new() -> Self {
        SpanningCarver::with_rng(XorShiftRng::from_entropy())
    }

    pub fn from_seed(seed: u64) -> Self {
        SpanningCarver::with_rng(XorShiftRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SpanningCarver<R> {
    pub fn with_rng(rng: R) -> Self {
        SpanningCarver { rng }
    }
}

impl<R: Rng> Generator for SpanningCarver<R> {
    fn generate(&mut self, height: Height, width: Width) -> Grid {
        spanning_carve(&mut self.rng, height, width)
    }
}

/// Grow a maze outwards from one random room.
///
/// The frontier holds the uncarved rooms two steps from some carved room. Each iteration carves
/// a random frontier room and knocks through the wall towards one carved neighbour, trying the
/// directions in random order and stopping at the first hit. Joining through only one wall is
/// what keeps the carved region a tree. The room's uncarved neighbours then join the frontier.
pub fn incremental_carve<R>(rng: &mut R, height: Height, width: Width) -> Grid
    where R: Rng + ?Sized
{
    let mut grid = Grid::new(height, width);
    let (Height(rows), Width(columns)) = (height, width);

    let seed_room = Coordinate::new(2 * rng.gen_range(0..(rows + 1) / 2),
                                    2 * rng.gen_range(0..(columns + 1) / 2));
    grid.set(seed_room, CellKind::Passage);

    let mut frontier = RandomSelectionSet::with_capacity(grid.rooms_count());
    extend_frontier(&grid, seed_room, &mut frontier);

    let mut rooms_carved = 1;
    while let Some(&room) = frontier.get_random(rng) {
        frontier.remove(&room);
        grid.set(room, CellKind::Passage);

        let joined = join_carved_neighbour(&mut grid, room, rng);
        debug_assert!(joined, "frontier room {} has no carved neighbour", room);

        extend_frontier(&grid, room, &mut frontier);
        rooms_carved += 1;
        trace!("carved {}, frontier size {}", room, frontier.len());
    }

    debug!("incremental carve {}x{} from {}: {} rooms carved",
           rows, columns, seed_room, rooms_carved);
    grid
}

fn extend_frontier(grid: &Grid, room: Coordinate, frontier: &mut RandomSelectionSet<Coordinate>) {
    for neighbour in grid.room_neighbours(room) {
        if grid.get(neighbour) == CellKind::Wall {
            frontier.add(neighbour);
        }
    }
}

fn join_carved_neighbour<R>(grid: &mut Grid, room: Coordinate, rng: &mut R) -> bool
    where R: Rng + ?Sized
{
    for dir in CompassPrimary::shuffled(rng).iter() {
        if let Some(neighbour) = grid.neighbour_at_direction(room, *dir, 2) {
            if grid.get(neighbour) == CellKind::Passage {
                grid.set(room.midpoint(neighbour), CellKind::Passage);
                return true;
            }
        }
    }
    false
}

/// A candidate wall between two rooms exactly 2 apart.
///
/// Unordered: `Edge::new(a, b) == Edge::new(b, a)`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Edge {
    low: Coordinate,
    high: Coordinate,
}

impl Edge {
    pub fn new(a: Coordinate, b: Coordinate) -> Edge {
        if a <= b {
            Edge { low: a, high: b }
        } else {
            Edge { low: b, high: a }
        }
    }

    pub fn rooms(self) -> (Coordinate, Coordinate) {
        (self.low, self.high)
    }

    /// The wall cell separating the two rooms.
    pub fn wall(self) -> Coordinate {
        self.low.midpoint(self.high)
    }
}

/// Open every room, then join rooms by walls drawn in random order.
///
/// Every room starts as its own component. An edge whose rooms are already in the same
/// component is dropped, otherwise its wall is opened and the components merged. Once the edge
/// set is exhausted all rooms share one component.
pub fn spanning_carve<R>(rng: &mut R, height: Height, width: Width) -> Grid
    where R: Rng + ?Sized
{
    let mut grid = Grid::new(height, width);
    let (Height(rows), Width(columns)) = (height, width);

    let room_columns = (columns + 1) / 2;
    let room_index = |room: Coordinate| (room.row / 2) * room_columns + room.col / 2;
    let mut components = UnionFind::<usize>::new(grid.rooms_count());

    let mut edges = RandomSelectionSet::with_capacity(2 * grid.rooms_count());
    for room in grid.rooms() {
        grid.set(room, CellKind::Passage);
        for dir in &[CompassPrimary::South, CompassPrimary::East] {
            if let Some(neighbour) = grid.neighbour_at_direction(room, *dir, 2) {
                edges.add(Edge::new(room, neighbour));
            }
        }
    }

    let edges_count = edges.len();
    let mut walls_opened = 0;
    while let Some(&edge) = edges.get_random(rng) {
        let (a, b) = edge.rooms();
        if components.union(room_index(a), room_index(b)) {
            grid.set(edge.wall(), CellKind::Passage);
            walls_opened += 1;
            trace!("opened {} joining {} and {}", edge.wall(), a, b);
        }
        edges.remove(&edge);
    }

    debug!("spanning carve {}x{}: {} of {} candidate walls opened",
           rows, columns, walls_opened, edges_count);
    grid
}
