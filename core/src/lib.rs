#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Quest engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Grid dimensions used when no explicit size is configured.
pub const DEFAULT_GRID_SIZE: GridSize = GridSize::new(20, 20);

/// Delay between consecutive reveal-animation steps in the reference setup.
pub const DEFAULT_REVEAL_STEP: Duration = Duration::from_millis(50);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the world carve a fresh maze with the provided size.
    NewMaze {
        /// Dimensions of the maze to generate.
        size: GridSize,
    },
    /// Requests that the player advance one cell in the given direction.
    Move {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the next carve-order entries become visible.
    AdvanceReveal {
        /// Maze the reveal steps were scheduled for. The world discards the
        /// command when the stamp no longer matches the current maze, so
        /// replays scheduled for a discarded maze never touch its successor.
        generation: MazeGeneration,
        /// Number of carve-order entries to reveal.
        steps: u32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a fresh maze replaced the previous one.
    MazeGenerated {
        /// Stamp identifying the newly generated maze.
        generation: MazeGeneration,
        /// Dimensions of the generated maze.
        size: GridSize,
    },
    /// Reports that a maze request was refused and the world left untouched.
    MazeRejected {
        /// Dimensions that were requested.
        size: GridSize,
        /// Human-readable description of the refusal.
        reason: String,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: GridCoord,
        /// Cell the player occupies after the move.
        to: GridCoord,
        /// Outcome of the committed step.
        result: MoveResult,
    },
    /// Reports that an attempted step was refused.
    MoveBlocked {
        /// Direction of the refused step.
        direction: Direction,
    },
    /// Announces that the player stepped onto the exit cell.
    ExitReached {
        /// Coordinate of the exit cell.
        cell: GridCoord,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that carve-order entries became visible.
    CellsRevealed {
        /// Maze the revealed cells belong to.
        generation: MazeGeneration,
        /// Coordinates that became visible, in carve order.
        cells: Vec<GridCoord>,
    },
    /// Announces that the entire carve order of a maze is visible.
    RevealCompleted {
        /// Maze whose reveal replay finished.
        generation: MazeGeneration,
    },
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

/// Outcome of a single attempted player step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveResult {
    /// The step would leave the grid or enter a wall; nothing changed.
    Blocked,
    /// The step committed onto an open cell.
    Moved,
    /// The step committed onto the exit cell.
    ReachedExit,
}

/// Progress of a game session relative to the exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// The player has not reached the exit of the current maze.
    Playing,
    /// The player reached the exit. Movement remains enabled so the player
    /// may keep wandering; only a fresh maze returns the session to
    /// [`SessionPhase::Playing`].
    AtExit,
}

/// Monotonically increasing stamp identifying one generated maze.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct MazeGeneration(u64);

impl MazeGeneration {
    /// Creates a generation stamp with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the stamp.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the stamp that follows this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    x: u32,
    y: u32,
}

impl GridCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Returns the cell one step away in the provided direction, or `None`
    /// when the step would leave the coordinate space on the low side. Upper
    /// bounds are grid-specific and checked by the maze itself.
    #[must_use]
    pub fn offset(&self, direction: Direction) -> Option<GridCoord> {
        match direction {
            Direction::Up => self.y.checked_sub(1).map(|y| Self::new(self.x, y)),
            Direction::Down => Some(Self::new(self.x, self.y + 1)),
            Direction::Left => self.x.checked_sub(1).map(|x| Self::new(x, self.y)),
            Direction::Right => Some(Self::new(self.x + 1, self.y)),
        }
    }
}

/// Dimensions of a maze grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells contained in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: GridCoord) -> bool {
        cell.x() < self.width && cell.y() < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, GridCoord, GridSize, MazeGeneration, MoveResult, SessionPhase};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn offset_steps_one_cell_in_each_direction() {
        let origin = GridCoord::new(3, 3);
        assert_eq!(origin.offset(Direction::Up), Some(GridCoord::new(3, 2)));
        assert_eq!(origin.offset(Direction::Down), Some(GridCoord::new(3, 4)));
        assert_eq!(origin.offset(Direction::Left), Some(GridCoord::new(2, 3)));
        assert_eq!(origin.offset(Direction::Right), Some(GridCoord::new(4, 3)));
    }

    #[test]
    fn offset_refuses_to_leave_the_low_edges() {
        let corner = GridCoord::new(0, 0);
        assert_eq!(corner.offset(Direction::Up), None);
        assert_eq!(corner.offset(Direction::Left), None);
        assert_eq!(corner.offset(Direction::Down), Some(GridCoord::new(0, 1)));
        assert_eq!(corner.offset(Direction::Right), Some(GridCoord::new(1, 0)));
    }

    #[test]
    fn grid_size_contains_matches_bounds() {
        let size = GridSize::new(5, 4);
        assert!(size.contains(GridCoord::new(0, 0)));
        assert!(size.contains(GridCoord::new(4, 3)));
        assert!(!size.contains(GridCoord::new(5, 0)));
        assert!(!size.contains(GridCoord::new(0, 4)));
    }

    #[test]
    fn generation_stamps_advance_monotonically() {
        let first = MazeGeneration::default();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.get(), first.get() + 1);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn grid_coord_round_trips_through_bincode() {
        assert_round_trip(&GridCoord::new(7, 11));
    }

    #[test]
    fn grid_size_round_trips_through_bincode() {
        assert_round_trip(&GridSize::new(20, 20));
    }

    #[test]
    fn move_result_round_trips_through_bincode() {
        assert_round_trip(&MoveResult::ReachedExit);
    }

    #[test]
    fn session_phase_round_trips_through_bincode() {
        assert_round_trip(&SessionPhase::AtExit);
    }
}
