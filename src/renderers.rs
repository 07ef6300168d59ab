//! Plain text pictures of a grid.
//!
//! Glyphs are owned here rather than by `CellKind`. Each cell is drawn two characters wide so a
//! maze keeps roughly square proportions in a terminal.

use crate::cells::CellKind;
use crate::coordinates::Coordinate;
use crate::grid::Grid;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Glyphs {
    pub wall: &'static str,
    pub passage: &'static str,
    pub start: &'static str,
    pub finish: &'static str,
    pub path: &'static str,
}

pub const BLOCK_GLYPHS: Glyphs = Glyphs {
    wall: "██",
    passage: "  ",
    start: "S ",
    finish: "F ",
    path: "··",
};

pub const ASCII_GLYPHS: Glyphs = Glyphs {
    wall: "##",
    passage: "  ",
    start: "S ",
    finish: "F ",
    path: "..",
};

impl Glyphs {
    #[inline]
    pub fn glyph(&self, kind: CellKind) -> &'static str {
        match kind {
            CellKind::Wall => self.wall,
            CellKind::Passage => self.passage,
            CellKind::Start => self.start,
            CellKind::Finish => self.finish,
            CellKind::Path => self.path,
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        BLOCK_GLYPHS
    }
}

/// One line per grid row, each line terminated by a newline.
pub fn render_text(grid: &Grid, glyphs: &Glyphs) -> String {
    let width = grid.width().0;
    let mut text = String::with_capacity(grid.size() * 2 * glyphs.wall.len() + grid.height().0);

    for coord in grid.iter() {
        text.push_str(glyphs.glyph(grid.get(coord)));
        if coord.col + 1 == width {
            text.push('\n');
        }
    }
    text
}

/// A copy of `maze` with `path` drawn over it: its cells become `Path`, the first `Start` and
/// the last `Finish`. The maze itself is left alone. An empty path gives an unchanged copy.
pub fn overlay_path(maze: &Grid, path: &[Coordinate]) -> Grid {
    let mut with_path = maze.copy();
    for coord in path {
        with_path.set(*coord, CellKind::Path);
    }
    if let (Some(first), Some(last)) = (path.first(), path.last()) {
        with_path.set(*first, CellKind::Start);
        with_path.set(*last, CellKind::Finish);
    }
    with_path
}
