use docopt::Docopt;
use error_chain::bail;
use log::{info, warn};
use mazes::{
    coordinates::Coordinate,
    generators::GeneratorKind,
    grid::Grid,
    pathing,
    renderers::{self, Glyphs},
    solvers::SolverKind,
    units::{Height, Width},
};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver generate (prim|kruskal) [options]
    mazes_driver solve (prim|kruskal) (astar|dfs) [options]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-height=<h>      The grid height (rows) in an h*w grid [default: 21].
    --grid-width=<w>       The grid width (columns) in an h*w grid [default: 41].
    --seed=<s>             Seed the random source, for a repeatable maze and route.
    --start-row=<r>        Row of the route start. With --start-col; otherwise one end of the longest route.
    --start-col=<c>        Column of the route start.
    --finish-row=<r>       Row of the route finish. With --finish-col; otherwise the other end of the longest route.
    --finish-col=<c>       Column of the route finish.
    --ascii                Draw walls with '#' rather than block characters.
    --text-out=<path>      Write the drawing to a file instead of standard output.
";

/// Largest height or width accepted on the command line.
const MAX_SIDE_LENGTH: usize = 1000;

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_generate: bool,
    cmd_solve: bool,
    cmd_prim: bool,
    cmd_kruskal: bool,
    cmd_astar: bool,
    cmd_dfs: bool,
    flag_grid_size: Option<usize>,
    flag_grid_height: usize,
    flag_grid_width: usize,
    flag_seed: Option<u64>,
    flag_start_row: Option<usize>,
    flag_start_col: Option<usize>,
    flag_finish_row: Option<usize>,
    flag_finish_col: Option<usize>,
    flag_ascii: bool,
    flag_text_out: String,
}

mod errors {
    use error_chain::*;
    use mazes::coordinates::Coordinate;

    error_chain! {

        foreign_links {
            Io(::std::io::Error);
        }

        errors {
            InvalidDimensions(height: usize, width: usize) {
                description("invalid maze dimensions")
                display("a {}x{} maze is not possible, each side must be between 1 and {}",
                        height, width, super::MAX_SIDE_LENGTH)
            }
            OutsideGrid(endpoint: &'static str, coord: Coordinate, height: usize, width: usize) {
                description("route endpoint outside the maze")
                display("the {} {} is outside the {}x{} maze", endpoint, coord, height, width)
            }
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let (height, width) = maze_dimensions(&args)?;

    let mut rng = match args.flag_seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_entropy(),
    };

    let generator_kind = if args.cmd_kruskal {
        GeneratorKind::SpanningCarver
    } else {
        GeneratorKind::IncrementalCarver
    };
    info!("generating a {}x{} maze with {}", height.0, width.0, generator_kind.name());
    let mut generator = generator_kind.build(XorShiftRng::seed_from_u64(rng.gen()));
    let maze = generator.generate(height, width);

    let glyphs = if args.flag_ascii { renderers::ASCII_GLYPHS } else { Glyphs::default() };

    let drawing = if args.cmd_solve {
        solve_and_draw(&args, &maze, &glyphs, &mut rng)?
    } else {
        renderers::render_text(&maze, &glyphs)
    };

    if args.flag_text_out.is_empty() {
        print!("{}", drawing);
    } else {
        write_text_to_file(&drawing, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn maze_dimensions(maze_args: &MazeArgs) -> Result<(Height, Width)> {
    let (height, width) = if let Some(square_grid_size) = maze_args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (maze_args.flag_grid_height, maze_args.flag_grid_width)
    };

    let side_ok = |side: usize| side >= 1 && side <= MAX_SIDE_LENGTH;
    if !side_ok(height) || !side_ok(width) {
        bail!(ErrorKind::InvalidDimensions(height, width));
    }
    Ok((Height(height), Width(width)))
}

/// Solve the maze between the requested (or default) endpoints and draw the route over a copy
/// of it. If there is no route the bare maze is drawn.
fn solve_and_draw(maze_args: &MazeArgs,
                  maze: &Grid,
                  glyphs: &Glyphs,
                  rng: &mut XorShiftRng)
                  -> Result<String> {

    let (start, finish) = route_endpoints(maze_args, maze)?;

    let solver_kind = if maze_args.cmd_dfs {
        SolverKind::RandomBacktrack
    } else {
        SolverKind::HeuristicSearch
    };
    let mut solver = solver_kind.build(XorShiftRng::seed_from_u64(rng.gen()));
    let path = solver.solve(maze, start, finish);

    if path.is_empty() {
        warn!("{} found no route from {} to {}", solver_kind.name(), start, finish);
        eprintln!("No route from {} to {}: an endpoint is a wall or the two are not connected.",
                  start, finish);
        Ok(renderers::render_text(maze, glyphs))
    } else {
        info!("{} route from {} to {}: {} cells", solver_kind.name(), start, finish, path.len());
        let with_path = renderers::overlay_path(maze, &path);
        Ok(renderers::render_text(&with_path, glyphs))
    }
}

/// Explicit endpoints where both halves of a coordinate were given, otherwise the matching end
/// of the maze's longest route.
fn route_endpoints(maze_args: &MazeArgs, maze: &Grid) -> Result<(Coordinate, Coordinate)> {

    let requested_start = match (maze_args.flag_start_row, maze_args.flag_start_col) {
        (Some(row), Some(col)) => Some(Coordinate::new(row, col)),
        _ => None,
    };
    let requested_finish = match (maze_args.flag_finish_row, maze_args.flag_finish_col) {
        (Some(row), Some(col)) => Some(Coordinate::new(row, col)),
        _ => None,
    };

    let (start, finish) = match (requested_start, requested_finish) {
        (Some(start), Some(finish)) => (start, finish),
        (start_opt, finish_opt) => {
            let longest = pathing::dijkstra_longest_path(maze)
                .ok_or("The maze has no passages to route between.")?;
            let first = longest[0];
            let last = longest[longest.len() - 1];
            (start_opt.unwrap_or(first), finish_opt.unwrap_or(last))
        }
    };

    for &(name, coord) in &[("start", start), ("finish", finish)] {
        if !maze.is_valid_coordinate(coord) {
            bail!(ErrorKind::OutsideGrid(name, coord, maze.height().0, maze.width().0));
        }
    }
    Ok((start, finish))
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
