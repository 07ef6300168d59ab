//! **mazes** generates rectangular grid mazes and finds routes through them.
//!
//! A maze is a `grid::Grid` of `cells::CellKind`s. Rooms sit on even rows and columns and the
//! cells between them are walls until a generator opens them. Two generators (`generators`)
//! and two solvers (`solvers`) share that model; `pathing` holds breadth first distance tables
//! and `renderers` turns a grid into text.

pub mod cells;
pub mod coordinates;
pub mod generators;
pub mod grid;
pub mod pathing;
pub mod random_set;
pub mod renderers;
pub mod solvers;
pub mod units;
mod utils;
#[cfg(test)]
mod test_utils;
