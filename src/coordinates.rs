use std::convert::From;
use std::fmt;

use crate::cells::CompassPrimary;

/// A (row, column) position. Rows grow southwards, columns grow eastwards.
///
/// A coordinate carries no bounds of its own; whether it addresses a cell is a question for
/// a specific `Grid`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Coordinate {
        Coordinate { row, col }
    }

    /// Sum of the absolute row and column differences: the number of 4-connected steps
    /// between two cells on an open grid.
    #[inline]
    pub fn manhattan_distance(self, other: Coordinate) -> usize {
        abs_diff(self.row, other.row) + abs_diff(self.col, other.col)
    }

    /// Rooms sit on even rows and even columns. Everything else is a wall between rooms.
    #[inline]
    pub fn is_room(self) -> bool {
        self.row % 2 == 0 && self.col % 2 == 0
    }

    /// True iff the two coordinates differ by one unit along exactly one axis.
    #[inline]
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Step `steps` cells in `direction`.
    /// Returns None if that would take a row or column below zero.
    pub fn offset(self, direction: CompassPrimary, steps: usize) -> Option<Coordinate> {
        let Coordinate { row, col } = self;
        match direction {
            CompassPrimary::North => row.checked_sub(steps).map(|r| Coordinate::new(r, col)),
            CompassPrimary::South => row.checked_add(steps).map(|r| Coordinate::new(r, col)),
            CompassPrimary::East => col.checked_add(steps).map(|c| Coordinate::new(row, c)),
            CompassPrimary::West => col.checked_sub(steps).map(|c| Coordinate::new(row, c)),
        }
    }

    /// The cell halfway between two coordinates, rounding towards the origin.
    /// For two rooms 2 apart this is the wall cell separating them.
    #[inline]
    pub fn midpoint(self, other: Coordinate) -> Coordinate {
        Coordinate::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }
}

#[inline]
fn abs_diff(a: usize, b: usize) -> usize {
    if a > b { a - b } else { b - a }
}

impl From<(usize, usize)> for Coordinate {
    fn from(row_col_pair: (usize, usize)) -> Coordinate {
        Coordinate::new(row_col_pair.0, row_col_pair.1)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
