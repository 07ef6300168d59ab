use crate::cells::CellKind;
use crate::coordinates::Coordinate;
use crate::grid::Grid;
use crate::units::{Height, Width};

/// Build a grid from text rows: `#` is a wall, anything else a passage.
pub fn grid_from_rows(rows: &[&str]) -> Grid {
    let width = rows.first().map_or(0, |row| row.chars().count());
    let mut grid = Grid::new(Height(rows.len()), Width(width));
    for (row_index, row) in rows.iter().enumerate() {
        assert_eq!(row.chars().count(), width, "ragged row {}", row_index);
        for (col_index, ch) in row.chars().enumerate() {
            if ch != '#' {
                grid.set(Coordinate::new(row_index, col_index), CellKind::Passage);
            }
        }
    }
    grid
}

/// Each step of the path moves exactly one cell along one axis onto a passable cell.
pub fn is_contiguous_walk(grid: &Grid, path: &[Coordinate]) -> bool {
    path.iter().all(|c| grid.is_passable(*c)) &&
    path.windows(2).all(|pair| pair[0].is_adjacent(pair[1]))
}
