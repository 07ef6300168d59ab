use smallvec::SmallVec;

use crate::coordinates::Coordinate;
use crate::grid::Grid;

/// Breadth first flood fill: the number of 4-connected steps from a start cell to every
/// passable cell reachable from it.
///
/// Every step costs one, so the first time a cell is reached is along a shortest route and its
/// distance never needs revising. The table doubles as the visited set.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Coordinate,
    distances: Vec<Option<u32>>,
    width: usize,
    max_distance: u32,
    reachable: usize,
}

impl Distances {
    /// None if the start is outside the grid or is a wall.
    pub fn new(grid: &Grid, start_coordinate: Coordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) || !grid.is_passable(start_coordinate) {
            return None;
        }

        let mut distances = vec![None; grid.size()];
        let mut max = 0;
        let mut reachable = 1;
        distances[grid.grid_coordinate_to_index(start_coordinate)?] = Some(0);

        let mut frontier = vec![start_coordinate];
        let mut distance_to_frontier = 0;
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                for neighbour in grid.passable_neighbours(*cell_coord) {
                    let slot = &mut distances[grid.grid_coordinate_to_index(neighbour)?];
                    if slot.is_none() {
                        *slot = Some(distance_to_frontier + 1);
                        reachable += 1;
                        new_frontier.push(neighbour);
                    }
                }
            }
            if !new_frontier.is_empty() {
                distance_to_frontier += 1;
                max = distance_to_frontier;
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            width: grid.width().0,
            max_distance: max,
            reachable,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Coordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// Number of cells reachable from the start, the start included.
    #[inline(always)]
    pub fn reachable_count(&self) -> usize {
        self.reachable
    }

    /// None if the coordinate is unreachable or not on the grid the table was built from.
    pub fn distance_from_start_to(&self, coord: Coordinate) -> Option<u32> {
        if coord.col >= self.width {
            return None;
        }
        let index = coord.row.checked_mul(self.width)?.checked_add(coord.col)?;
        self.distances.get(index).and_then(|d| *d)
    }

    /// Reachable cells at the maximum distance from the start, in row-major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Coordinate; 8]> {
        let furthest_distance = Some(self.max());
        self.distances
            .iter()
            .enumerate()
            .filter(|&(_, d)| *d == furthest_distance)
            .map(|(index, _)| Coordinate::new(index / self.width, index % self.width))
            .collect()
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to a
/// neighbour one closer. None if `end_point` is unreachable.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: Coordinate)
                     -> Option<Vec<Coordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_distance > 0 {
        let closer = grid.passable_neighbours(current_coord)
            .into_iter()
            .find(|neighbour| {
                distances_from_start.distance_from_start_to(*neighbour) == Some(current_distance - 1)
            });

        match closer {
            Some(closer_coord) => {
                current_coord = closer_coord;
                current_distance -= 1;
                path.push(current_coord);
            }
            // The distances were built from a different grid.
            None => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The longest shortest path from the first passable cell's component.
///
/// Exact only on perfect mazes (a tree of passages): the cell furthest from an arbitrary point
/// is one end of the longest path, and the cell furthest from that is the other.
/// None if the grid has no passable cell.
pub fn dijkstra_longest_path(grid: &Grid) -> Option<Vec<Coordinate>> {
    let arbitrary_start_point = grid.iter().find(|c| grid.is_passable(*c))?;

    let first_distances = Distances::new(grid, arbitrary_start_point)?;
    let long_path_start_coordinate = first_distances.furthest_points_on_grid()[0];

    let distances_from_start = Distances::new(grid, long_path_start_coordinate)?;
    let end_point = distances_from_start.furthest_points_on_grid()[0];

    shortest_path(grid, &distances_from_start, end_point)
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::CellKind;
    use crate::test_utils::grid_from_rows;
    use crate::units::{Height, Width};

    fn gc(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    fn open_grid(h: usize, w: usize) -> Grid {
        let mut g = Grid::new(Height(h), Width(w));
        for c in g.iter() {
            g.set(c, CellKind::Passage);
        }
        g
    }

    #[test]
    fn distances_construction_requires_valid_passable_start() {
        let g = open_grid(3, 3);
        assert!(Distances::new(&g, gc(3, 0)).is_none());
        assert!(Distances::new(&g, gc(usize::MAX, usize::MAX)).is_none());

        let walls = Grid::new(Height(3), Width(3));
        assert!(Distances::new(&walls, gc(0, 0)).is_none());
    }

    #[test]
    fn start() {
        let g = open_grid(3, 3);
        let distances = Distances::new(&g, gc(1, 1)).unwrap();
        assert_eq!(distances.start(), gc(1, 1));
        assert_eq!(distances.distance_from_start_to(gc(1, 1)), Some(0));
    }

    #[test]
    fn distances_on_open_grid() {
        let g = open_grid(2, 2);
        let distances = Distances::new(&g, gc(0, 0)).unwrap();

        assert_eq!(distances.distance_from_start_to(gc(0, 0)), Some(0));
        assert_eq!(distances.distance_from_start_to(gc(0, 1)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(1, 0)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(1, 1)), Some(2));
        assert_eq!(distances.max(), 2);
        assert_eq!(distances.reachable_count(), 4);
    }

    #[test]
    fn walls_are_unreachable() {
        let g = grid_from_rows(&["..#",
                                 "#.#",
                                 "#.."]);
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.distance_from_start_to(gc(0, 2)), None);
        assert_eq!(distances.distance_from_start_to(gc(2, 2)), Some(4));
        assert_eq!(distances.reachable_count(), 5);
    }

    #[test]
    fn distance_to_invalid_coordinate_is_none() {
        let g = open_grid(3, 3);
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.distance_from_start_to(gc(0, 3)), None);
        assert_eq!(distances.distance_from_start_to(gc(3, 0)), None);
        assert_eq!(distances.distance_from_start_to(gc(usize::MAX, 0)), None);
    }

    #[test]
    fn furthest_points() {
        let g = open_grid(3, 3);
        let distances = Distances::new(&g, gc(1, 1)).unwrap();
        assert_eq!(&*distances.furthest_points_on_grid(),
                   &[gc(0, 0), gc(0, 2), gc(2, 0), gc(2, 2)]);
    }

    #[test]
    fn shortest_path_follows_the_corridor() {
        let g = grid_from_rows(&["...",
                                 "##.",
                                 "...",
                                 ".##",
                                 "..."]);
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        let path = shortest_path(&g, &distances, gc(4, 2)).unwrap();
        assert_eq!(path,
                   vec![gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 2), gc(2, 2), gc(2, 1), gc(2, 0),
                        gc(3, 0), gc(4, 0), gc(4, 1), gc(4, 2)]);
    }

    #[test]
    fn shortest_path_to_unreachable_is_none() {
        let g = grid_from_rows(&[".#."]);
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(shortest_path(&g, &distances, gc(0, 2)), None);
    }

    #[test]
    fn longest_path_in_a_corridor() {
        let g = grid_from_rows(&["#####",
                                 "#...#",
                                 "###.#"]);
        let path = dijkstra_longest_path(&g).unwrap();
        assert_eq!(path.len(), 4);
        let ends = [path[0], path[3]];
        assert!(ends.contains(&gc(1, 1)));
        assert!(ends.contains(&gc(2, 3)));
    }

    #[test]
    fn longest_path_needs_a_passage() {
        let g = Grid::new(Height(4), Width(4));
        assert_eq!(dijkstra_longest_path(&g), None);
    }
}
