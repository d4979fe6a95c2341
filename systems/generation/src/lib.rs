#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic maze carving for Maze Quest.
//!
//! [`generate`] produces a perfect maze with a randomized depth-first
//! backtracker: carve nodes sit on a sparse grid at stride two, every carved
//! passage joins exactly one unvisited node to the tree, and the chronological
//! [`Maze::carve_order`] records each opened position so adapters can replay
//! the carving as a reveal animation. Randomness is injected by the caller,
//! which keeps generation reproducible under a seeded generator.

use maze_quest_core::{GridCoord, GridSize};
use rand::Rng;
use thiserror::Error;

/// Smallest width or height that leaves an interior for carving.
pub const MIN_DIMENSION: u32 = 3;

/// Entrance cell shared by every generated maze.
pub const ENTRANCE: GridCoord = GridCoord::new(1, 1);

/// Failures that can refuse a generation request before any carving happens.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// The requested dimensions leave no interior for the carver to work in.
    #[error("maze dimensions {width}x{height} fall below the {min}x{min} minimum", min = MIN_DIMENSION)]
    InvalidDimensions {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
}

/// State of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    wall: bool,
    exit: bool,
}

impl Cell {
    const fn wall() -> Self {
        Self {
            wall: true,
            exit: false,
        }
    }

    /// Reports whether the cell blocks movement.
    #[must_use]
    pub const fn is_wall(&self) -> bool {
        self.wall
    }

    /// Reports whether the cell is the maze exit.
    #[must_use]
    pub const fn is_exit(&self) -> bool {
        self.exit
    }
}

/// Fully carved maze, immutable once generation completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    size: GridSize,
    cells: Vec<Cell>,
    exit: GridCoord,
    carve_order: Vec<GridCoord>,
}

impl Maze {
    /// Dimensions of the maze grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Entrance cell where the player starts.
    #[must_use]
    pub const fn entrance(&self) -> GridCoord {
        ENTRANCE
    }

    /// Exit cell on the outer ring of the grid.
    #[must_use]
    pub const fn exit(&self) -> GridCoord {
        self.exit
    }

    /// Retrieves the cell at the provided coordinate, if inside the grid.
    #[must_use]
    pub fn cell(&self, coord: GridCoord) -> Option<&Cell> {
        grid_index(self.size, coord).and_then(|index| self.cells.get(index))
    }

    /// Reports whether the coordinate blocks movement. Coordinates outside
    /// the grid count as walls.
    #[must_use]
    pub fn is_wall(&self, coord: GridCoord) -> bool {
        self.cell(coord).map_or(true, Cell::is_wall)
    }

    /// Chronological sequence of positions opened by the carver, starting
    /// with the entrance seed. Boundary clearing and the forced entrance and
    /// exit openings are not part of the sequence.
    #[must_use]
    pub fn carve_order(&self) -> &[GridCoord] {
        &self.carve_order
    }

    /// Iterates over every open (non-wall) cell coordinate.
    pub fn open_cells(&self) -> impl Iterator<Item = GridCoord> + '_ {
        let width = self.size.width();
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            if cell.is_wall() {
                None
            } else {
                let index = index as u32;
                Some(GridCoord::new(index % width, index / width))
            }
        })
    }
}

/// Carves a fresh maze with the provided dimensions.
///
/// The exit is positioned before carving begins: one of the four outer edges
/// is drawn uniformly, then a coordinate along that edge. Carving runs a
/// depth-first backtracker over the interior, after which the entrance and
/// exit are forced open and the outermost right column and bottom row are
/// cleared wholesale, matching the reference behavior.
pub fn generate<R: Rng + ?Sized>(size: GridSize, rng: &mut R) -> Result<Maze, GenerationError> {
    if size.width() < MIN_DIMENSION || size.height() < MIN_DIMENSION {
        return Err(GenerationError::InvalidDimensions {
            width: size.width(),
            height: size.height(),
        });
    }

    let exit = choose_exit(size, rng);
    let capacity = usize::try_from(size.cell_count()).unwrap_or(0);
    let mut cells = vec![Cell::wall(); capacity];
    let mut carve_order = Vec::new();

    carve(size, &mut cells, &mut carve_order, rng);

    open_cell(size, &mut cells, ENTRANCE);
    open_cell(size, &mut cells, exit);
    if let Some(index) = grid_index(size, exit) {
        cells[index].exit = true;
    }

    clear_boundary(size, &mut cells);

    Ok(Maze {
        size,
        cells,
        exit,
        carve_order,
    })
}

/// Depth-first backtracker over carve nodes spaced two cells apart.
///
/// Each iteration inspects the node on top of the stack. When an unvisited
/// neighbor at distance two exists, the wall midpoint opens first and the
/// neighbor second, both appended to the carve order in that sequence; the
/// neighbor then becomes the new top. A node with no remaining neighbors is
/// popped, walking the path back toward the entrance seed.
fn carve<R: Rng + ?Sized>(
    size: GridSize,
    cells: &mut [Cell],
    carve_order: &mut Vec<GridCoord>,
    rng: &mut R,
) {
    let mut visited = vec![false; cells.len()];
    let mut stack = vec![ENTRANCE];

    mark_visited(size, &mut visited, ENTRANCE);
    open_cell(size, cells, ENTRANCE);
    carve_order.push(ENTRANCE);

    while let Some(&current) = stack.last() {
        let neighbors = unvisited_neighbors(size, &visited, current);
        if neighbors.is_empty() {
            let _ = stack.pop();
            continue;
        }

        let next = neighbors[rng.gen_range(0..neighbors.len())];
        let wall = midpoint(current, next);

        open_cell(size, cells, wall);
        carve_order.push(wall);
        open_cell(size, cells, next);
        carve_order.push(next);

        mark_visited(size, &mut visited, next);
        stack.push(next);
    }
}

/// Carve-node neighbors at distance two that are interior and unvisited.
fn unvisited_neighbors(size: GridSize, visited: &[bool], cell: GridCoord) -> Vec<GridCoord> {
    let x = i64::from(cell.x());
    let y = i64::from(cell.y());
    let candidates = [(x - 2, y), (x + 2, y), (x, y - 2), (x, y + 2)];

    candidates
        .iter()
        .filter_map(|&(nx, ny)| {
            if !is_interior(size, nx, ny) {
                return None;
            }
            let neighbor = GridCoord::new(nx as u32, ny as u32);
            let index = grid_index(size, neighbor)?;
            if visited[index] {
                None
            } else {
                Some(neighbor)
            }
        })
        .collect()
}

/// Interior positions keep one cell of wall toward every grid edge.
fn is_interior(size: GridSize, x: i64, y: i64) -> bool {
    x >= 1 && y >= 1 && x <= i64::from(size.width()) - 2 && y <= i64::from(size.height()) - 2
}

fn midpoint(a: GridCoord, b: GridCoord) -> GridCoord {
    GridCoord::new((a.x() + b.x()) / 2, (a.y() + b.y()) / 2)
}

/// Positions the exit on one of the four outer edges before carving begins.
fn choose_exit<R: Rng + ?Sized>(size: GridSize, rng: &mut R) -> GridCoord {
    match rng.gen_range(0..4u32) {
        0 => GridCoord::new(0, edge_coord(size.height(), rng)),
        1 => GridCoord::new(size.width() - 2, edge_coord(size.height(), rng)),
        2 => GridCoord::new(edge_coord(size.width(), rng), 0),
        _ => GridCoord::new(edge_coord(size.width(), rng), size.height() - 2),
    }
}

/// Uniform coordinate along an edge, excluding the corner-adjacent ends.
///
/// A dimension of three leaves a single interior index, so the draw
/// collapses to it instead of sampling an empty range.
fn edge_coord<R: Rng + ?Sized>(dimension: u32, rng: &mut R) -> u32 {
    if dimension > MIN_DIMENSION {
        rng.gen_range(1..dimension - 2)
    } else {
        1
    }
}

/// Forces the rightmost column and bottom row open, independent of carving.
///
/// Preserved reference behavior: the cleared strip can reconnect cells
/// outside the spanning tree produced by the carver.
fn clear_boundary(size: GridSize, cells: &mut [Cell]) {
    for y in 0..size.height() {
        open_cell(size, cells, GridCoord::new(size.width() - 1, y));
    }
    for x in 0..size.width() {
        open_cell(size, cells, GridCoord::new(x, size.height() - 1));
    }
}

fn open_cell(size: GridSize, cells: &mut [Cell], coord: GridCoord) {
    if let Some(index) = grid_index(size, coord) {
        cells[index].wall = false;
    }
}

fn mark_visited(size: GridSize, visited: &mut [bool], coord: GridCoord) {
    if let Some(index) = grid_index(size, coord) {
        visited[index] = true;
    }
}

fn grid_index(size: GridSize, cell: GridCoord) -> Option<usize> {
    if size.contains(cell) {
        let row = usize::try_from(cell.y()).ok()?;
        let column = usize::try_from(cell.x()).ok()?;
        let width = usize::try_from(size.width()).ok()?;
        Some(row * width + column)
    } else {
        None
    }
}
