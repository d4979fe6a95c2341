#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game-state management for Maze Quest.
//!
//! The [`World`] owns exactly one [`Maze`] at a time together with the player
//! position, the session phase, and the reveal cursor. All mutations flow
//! through [`apply`], which executes a single [`Command`] to completion and
//! broadcasts the resulting [`Event`] values; read access goes through the
//! [`query`] module. A maze is always published whole: generation either
//! completes and replaces the previous maze atomically or leaves the world
//! untouched.

use maze_quest_core::{
    Command, Direction, Event, GridCoord, GridSize, MazeGeneration, MoveResult, SessionPhase,
    DEFAULT_GRID_SIZE,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use maze_quest_generation::{Cell, Maze};

/// Represents the authoritative Maze Quest game state.
#[derive(Debug)]
pub struct World {
    maze: Maze,
    player: GridCoord,
    phase: SessionPhase,
    generation: MazeGeneration,
    revealed: usize,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a new world carrying a default-sized maze and an
    /// entropy-seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    /// Creates a new world whose maze sequence is fully determined by the
    /// provided seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: ChaCha8Rng) -> Self {
        let maze = maze_quest_generation::generate(DEFAULT_GRID_SIZE, &mut rng)
            .expect("default grid dimensions are valid");
        Self {
            player: maze.entrance(),
            maze,
            phase: SessionPhase::Playing,
            generation: MazeGeneration::default(),
            revealed: 0,
            rng,
        }
    }

    fn regenerate(&mut self, size: GridSize, out_events: &mut Vec<Event>) {
        match maze_quest_generation::generate(size, &mut self.rng) {
            Ok(maze) => {
                self.generation = self.generation.next();
                self.player = maze.entrance();
                self.maze = maze;
                self.phase = SessionPhase::Playing;
                self.revealed = 0;
                out_events.push(Event::MazeGenerated {
                    generation: self.generation,
                    size,
                });
            }
            Err(error) => out_events.push(Event::MazeRejected {
                size,
                reason: error.to_string(),
            }),
        }
    }

    fn step_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let from = self.player;
        let candidate = from
            .offset(direction)
            .filter(|cell| self.maze.size().contains(*cell));

        let Some(to) = candidate else {
            out_events.push(Event::MoveBlocked { direction });
            return;
        };
        if self.maze.is_wall(to) {
            out_events.push(Event::MoveBlocked { direction });
            return;
        }

        self.player = to;
        let result = if to == self.maze.exit() {
            self.phase = SessionPhase::AtExit;
            MoveResult::ReachedExit
        } else {
            MoveResult::Moved
        };
        out_events.push(Event::PlayerMoved { from, to, result });
        if result == MoveResult::ReachedExit {
            out_events.push(Event::ExitReached { cell: to });
        }
    }

    fn advance_reveal(
        &mut self,
        generation: MazeGeneration,
        steps: u32,
        out_events: &mut Vec<Event>,
    ) {
        // Reveal commands scheduled for a discarded maze stop here.
        if generation != self.generation || steps == 0 {
            return;
        }

        let order = self.maze.carve_order();
        let end = order.len().min(self.revealed.saturating_add(steps as usize));
        if end <= self.revealed {
            return;
        }

        let cells = order[self.revealed..end].to_vec();
        self.revealed = end;
        out_events.push(Event::CellsRevealed { generation, cells });
        if self.revealed == order.len() {
            out_events.push(Event::RevealCompleted { generation });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::NewMaze { size } => world.regenerate(size, out_events),
        Command::Move { direction } => world.step_player(direction, out_events),
        Command::Tick { dt } => out_events.push(Event::TimeAdvanced { dt }),
        Command::AdvanceReveal { generation, steps } => {
            world.advance_reveal(generation, steps, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::collections::HashSet;

    use super::{Maze, World};
    use maze_quest_core::{GridCoord, GridSize, MazeGeneration, SessionPhase};

    /// Provides read-only access to the current maze.
    #[must_use]
    pub fn maze(world: &World) -> &Maze {
        &world.maze
    }

    /// Dimensions of the current maze.
    #[must_use]
    pub fn grid_size(world: &World) -> GridSize {
        world.maze.size()
    }

    /// Current player coordinate.
    #[must_use]
    pub fn player(world: &World) -> GridCoord {
        world.player
    }

    /// Entrance cell of the current maze.
    #[must_use]
    pub fn entrance(world: &World) -> GridCoord {
        world.maze.entrance()
    }

    /// Exit cell of the current maze.
    #[must_use]
    pub fn exit(world: &World) -> GridCoord {
        world.maze.exit()
    }

    /// Progress of the session relative to the exit.
    #[must_use]
    pub fn session_phase(world: &World) -> SessionPhase {
        world.phase
    }

    /// Stamp identifying the current maze.
    #[must_use]
    pub fn generation(world: &World) -> MazeGeneration {
        world.generation
    }

    /// Chronological carve order of the current maze.
    #[must_use]
    pub fn carve_order(world: &World) -> &[GridCoord] {
        world.maze.carve_order()
    }

    /// Prefix of the carve order that has been revealed so far.
    #[must_use]
    pub fn revealed_cells(world: &World) -> &[GridCoord] {
        &world.maze.carve_order()[..world.revealed]
    }

    /// Reports whether the entire carve order is visible.
    #[must_use]
    pub fn reveal_complete(world: &World) -> bool {
        world.revealed == world.maze.carve_order().len()
    }

    /// Captures a renderer-facing snapshot of the current maze and player.
    #[must_use]
    pub fn maze_view(world: &World) -> MazeView<'_> {
        let hidden = world.maze.carve_order()[world.revealed..]
            .iter()
            .copied()
            .collect();
        MazeView { world, hidden }
    }

    /// Read-only snapshot consumed by presentation layers.
    ///
    /// Carved cells stay hidden until the reveal cursor passes them; cells
    /// opened outside the carve order (boundary clearing, forced entrance
    /// and exit) are visible from the start.
    #[derive(Clone, Debug)]
    pub struct MazeView<'a> {
        world: &'a World,
        hidden: HashSet<GridCoord>,
    }

    impl MazeView<'_> {
        /// Dimensions of the maze grid.
        #[must_use]
        pub fn size(&self) -> GridSize {
            self.world.maze.size()
        }

        /// Current player coordinate.
        #[must_use]
        pub fn player(&self) -> GridCoord {
            self.world.player
        }

        /// Entrance cell of the maze.
        #[must_use]
        pub fn entrance(&self) -> GridCoord {
            self.world.maze.entrance()
        }

        /// Exit cell of the maze.
        #[must_use]
        pub fn exit(&self) -> GridCoord {
            self.world.maze.exit()
        }

        /// Reports whether the cell blocks movement.
        #[must_use]
        pub fn is_wall(&self, cell: GridCoord) -> bool {
            self.world.maze.is_wall(cell)
        }

        /// Reports whether the cell carries the exit flag.
        #[must_use]
        pub fn is_exit(&self, cell: GridCoord) -> bool {
            self.world
                .maze
                .cell(cell)
                .is_some_and(super::Cell::is_exit)
        }

        /// Reports whether an open cell is currently visible.
        #[must_use]
        pub fn is_revealed(&self, cell: GridCoord) -> bool {
            !self.hidden.contains(&cell)
        }
    }
}
