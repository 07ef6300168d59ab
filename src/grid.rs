use itertools::iproduct;
use smallvec::SmallVec;
use std::fmt;

use crate::cells::{CellKind, CompassPrimary};
use crate::coordinates::Coordinate;
use crate::units::{Height, Width};

pub type CoordinateSmallVec = SmallVec<[Coordinate; 4]>;

/// Dense rectangular storage of `CellKind`s, addressed by `Coordinate`.
///
/// Height and width are fixed at construction. Reading or writing a coordinate outside the
/// grid is a programming error and panics; use `is_valid_coordinate` to check user supplied
/// positions first.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellKind>,
    height: usize,
    width: usize,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, passable: {:?}",
               self.height, self.width, self.passable_count())
    }
}

impl Grid {
    /// A grid of the given size with every cell a `Wall`.
    ///
    /// Panics if either dimension is zero.
    pub fn new(height: Height, width: Width) -> Grid {
        let (Height(h), Width(w)) = (height, width);
        assert!(h >= 1 && w >= 1, "grid dimensions must be at least 1x1, got {}x{}", h, w);

        Grid {
            cells: vec![CellKind::Wall; h * w],
            height: h,
            width: w,
        }
    }

    #[inline]
    pub fn height(&self) -> Height {
        Height(self.height)
    }

    #[inline]
    pub fn width(&self) -> Width {
        Width(self.width)
    }

    /// Total number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Number of even-row, even-column cells.
    #[inline]
    pub fn rooms_count(&self) -> usize {
        ((self.height + 1) / 2) * ((self.width + 1) / 2)
    }

    #[inline]
    pub fn get(&self, coord: Coordinate) -> CellKind {
        self.cells[self.index_or_panic(coord)]
    }

    #[inline]
    pub fn set(&mut self, coord: Coordinate, kind: CellKind) {
        let index = self.index_or_panic(coord);
        self.cells[index] = kind;
    }

    /// An independent deep copy with the same dimensions and contents.
    pub fn copy(&self) -> Grid {
        self.clone()
    }

    #[inline]
    pub fn is_passable(&self, coord: Coordinate) -> bool {
        self.get(coord).is_passable()
    }

    /// Is the coordinate within the grid's dimensions?
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    /// Row-major index of a coordinate in the range 0..grid.size().
    /// Returns None if the coordinate is outside the grid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Coordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row * self.width + coord.col)
        } else {
            None
        }
    }

    /// Inverse of `grid_coordinate_to_index`. The index is not checked.
    #[inline]
    pub fn index_to_grid_coordinate(&self, index: usize) -> Coordinate {
        Coordinate::new(index / self.width, index % self.width)
    }

    /// The cell `steps` away in `direction`, if it lies inside the grid.
    pub fn neighbour_at_direction(&self,
                                  coord: Coordinate,
                                  direction: CompassPrimary,
                                  steps: usize)
                                  -> Option<Coordinate> {
        coord.offset(direction, steps)
             .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Cells to the North, South, East or West, whatever their kind.
    pub fn neighbours(&self, coord: Coordinate) -> CoordinateSmallVec {
        self.neighbours_at_distance(coord, 1)
    }

    /// Rooms two cells away in each compass direction, whatever their kind.
    pub fn room_neighbours(&self, coord: Coordinate) -> CoordinateSmallVec {
        self.neighbours_at_distance(coord, 2)
    }

    /// Passable cells to the North, South, East or West.
    pub fn passable_neighbours(&self, coord: Coordinate) -> CoordinateSmallVec {
        self.neighbours(coord)
            .into_iter()
            .filter(|neighbour_coord| self.is_passable(*neighbour_coord))
            .collect()
    }

    pub fn count_kind(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    pub fn passable_count(&self) -> usize {
        self.cells.iter().filter(|k| k.is_passable()).count()
    }

    /// Every coordinate in row-major order.
    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            width: self.width,
            current_cell_number: 0,
            cells_count: self.size(),
        }
    }

    /// Every room coordinate in row-major order.
    pub fn rooms(&self) -> impl Iterator<Item = Coordinate> {
        iproduct!((0..self.height).step_by(2), (0..self.width).step_by(2)).map(Coordinate::from)
    }

    fn neighbours_at_distance(&self, coord: Coordinate, steps: usize) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir, steps))
            .collect()
    }

    fn index_or_panic(&self, coord: Coordinate) -> usize {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => index,
            None => panic!("coordinate {} is outside the {}x{} grid", coord, self.height, self.width),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CellIter {
    width: usize,
    current_cell_number: usize,
    cells_count: usize,
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Coordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Coordinate::new(self.current_cell_number / self.width,
                                        self.current_cell_number % self.width);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = Coordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;

    use super::*;

    fn grid(h: usize, w: usize) -> Grid {
        Grid::new(Height(h), Width(w))
    }

    fn gc(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn new_grid_is_all_walls() {
        let g = grid(3, 5);
        assert_eq!(g.height(), Height(3));
        assert_eq!(g.width(), Width(5));
        assert_eq!(g.size(), 15);
        assert_eq!(g.count_kind(CellKind::Wall), 15);
        assert_eq!(g.passable_count(), 0);
    }

    #[test]
    fn single_cell_grid_is_legal() {
        let g = grid(1, 1);
        assert_eq!(g.size(), 1);
        assert_eq!(g.rooms_count(), 1);
        assert_eq!(g.get(gc(0, 0)), CellKind::Wall);
    }

    #[test]
    #[should_panic]
    fn zero_height_grid_panics() {
        let _ = grid(0, 4);
    }

    #[test]
    #[should_panic]
    fn zero_width_grid_panics() {
        let _ = grid(4, 0);
    }

    #[test]
    fn set_then_get() {
        let mut g = grid(4, 4);
        g.set(gc(1, 2), CellKind::Passage);
        g.set(gc(3, 3), CellKind::Finish);
        assert_eq!(g.get(gc(1, 2)), CellKind::Passage);
        assert_eq!(g.get(gc(3, 3)), CellKind::Finish);
        assert_eq!(g.get(gc(2, 1)), CellKind::Wall);
        assert!(g.is_passable(gc(3, 3)));
        assert!(!g.is_passable(gc(0, 0)));
    }

    #[test]
    #[should_panic(expected = "outside the 4x4 grid")]
    fn get_out_of_bounds_row_panics() {
        let g = grid(4, 4);
        let _ = g.get(gc(4, 0));
    }

    #[test]
    #[should_panic(expected = "outside the 4x3 grid")]
    fn set_out_of_bounds_column_panics() {
        let mut g = grid(4, 3);
        g.set(gc(0, 3), CellKind::Passage);
    }

    #[test]
    fn copy_is_independent() {
        let mut original = grid(3, 3);
        original.set(gc(0, 0), CellKind::Passage);

        let mut copied = original.copy();
        assert_eq!(copied, original);

        copied.set(gc(1, 1), CellKind::Path);
        assert_eq!(original.get(gc(1, 1)), CellKind::Wall);
        assert_eq!(copied.get(gc(0, 0)), CellKind::Passage);
        assert_ne!(copied, original);
    }

    #[test]
    fn neighbour_cells() {
        let g = grid(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[Coordinate]| {
            let neighbours: Vec<Coordinate> = g.neighbours(coord).iter().cloned().sorted().collect();
            let expected: Vec<Coordinate> = expected_neighbours.iter().cloned().sorted().collect();
            assert_eq!(neighbours, expected);
        };

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(0, 1), gc(1, 0)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // sides
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(1, 1), gc(0, 2)]);
        check_expected_neighbours(gc(8, 9), &[gc(7, 9), gc(9, 9), gc(8, 8)]);

        // inside
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);
    }

    #[test]
    fn room_neighbour_cells() {
        let g = grid(5, 6);
        let rooms = |coord| -> Vec<Coordinate> { g.room_neighbours(coord).iter().cloned().sorted().collect() };

        assert_eq!(rooms(gc(0, 0)), vec![gc(0, 2), gc(2, 0)]);
        assert_eq!(rooms(gc(2, 2)), vec![gc(0, 2), gc(2, 0), gc(2, 4), gc(4, 2)]);
        // the last column of an even width grid is never a room, so (4, 4) has no eastern room
        assert_eq!(rooms(gc(4, 4)), vec![gc(2, 4), gc(4, 2)]);
    }

    #[test]
    fn passable_neighbours_skip_walls() {
        let mut g = grid(3, 3);
        g.set(gc(0, 1), CellKind::Passage);
        g.set(gc(1, 0), CellKind::Path);
        let passable: Vec<Coordinate> = g.passable_neighbours(gc(1, 1)).iter().cloned().sorted().collect();
        assert_eq!(passable, vec![gc(0, 1), gc(1, 0)]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = grid(2, 2);
        assert_eq!(g.neighbour_at_direction(gc(0, 0), CompassPrimary::North, 1), None);
        assert_eq!(g.neighbour_at_direction(gc(0, 0), CompassPrimary::South, 1), Some(gc(1, 0)));
        assert_eq!(g.neighbour_at_direction(gc(0, 0), CompassPrimary::East, 1), Some(gc(0, 1)));
        assert_eq!(g.neighbour_at_direction(gc(0, 0), CompassPrimary::East, 2), None);
        assert_eq!(g.neighbour_at_direction(gc(1, 1), CompassPrimary::West, 1), Some(gc(1, 0)));
        assert_eq!(g.neighbour_at_direction(gc(1, 1), CompassPrimary::South, 1), None);
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = grid(3, 3);
        let indices: Vec<Option<usize>> = g.iter().map(|c| g.grid_coordinate_to_index(c)).collect();
        let expected: Vec<Option<usize>> = (0..9).map(Some).collect();
        assert_eq!(indices, expected);

        assert_eq!(g.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(usize::MAX, usize::MAX)), None);

        for index in 0..g.size() {
            let coord = g.index_to_grid_coordinate(index);
            assert_eq!(g.grid_coordinate_to_index(coord), Some(index));
        }
    }

    #[test]
    fn cell_iter_is_row_major() {
        let g = grid(2, 3);
        let cells = g.iter();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells.collect::<Vec<Coordinate>>(),
                   &[gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 0), gc(1, 1), gc(1, 2)]);
        assert_eq!((&g).into_iter().count(), 6);
    }

    #[test]
    fn rooms_iter() {
        let g = grid(5, 4);
        let rooms = g.rooms().collect::<Vec<_>>();
        assert_eq!(rooms, &[gc(0, 0), gc(0, 2), gc(2, 0), gc(2, 2), gc(4, 0), gc(4, 2)]);
        assert_eq!(rooms.len(), g.rooms_count());
        assert!(rooms.iter().all(|r| r.is_room()));
    }
}
