#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic reveal-animation scheduler for Maze Quest.
//!
//! The system replays a maze's carve order as a timed animation: it consumes
//! [`Event::TimeAdvanced`] ticks, accumulates simulated time, and emits one
//! [`Command::AdvanceReveal`] batch per call carrying however many whole step
//! delays elapsed. Every batch is stamped with the maze generation it was
//! scheduled for; a fresh [`Event::MazeGenerated`] drops the accumulator and
//! adopts the new stamp, so a replay in flight for a discarded maze is
//! cancelled here and additionally fenced by the world.

use std::time::Duration;

use maze_quest_core::{Command, Event, MazeGeneration, DEFAULT_REVEAL_STEP};

/// Configuration parameters required to construct the reveal system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    step_delay: Duration,
}

impl Config {
    /// Creates a new configuration using the provided step cadence.
    #[must_use]
    pub const fn new(step_delay: Duration) -> Self {
        Self { step_delay }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_STEP)
    }
}

/// Pure system that paces the carve-order replay of the current maze.
#[derive(Debug)]
pub struct Reveal {
    step_delay: Duration,
    accumulator: Duration,
    generation: Option<MazeGeneration>,
    complete: bool,
}

impl Reveal {
    /// Creates a new reveal system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            step_delay: config.step_delay,
            accumulator: Duration::ZERO,
            generation: None,
            complete: false,
        }
    }

    /// Consumes world events and emits reveal commands for the current maze.
    ///
    /// Events are processed in order, so time that elapsed before a
    /// `MazeGenerated` announcement never counts toward the replay of the
    /// maze that follows it.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::MazeGenerated { generation, .. } => {
                    self.generation = Some(*generation);
                    self.accumulator = Duration::ZERO;
                    self.complete = false;
                }
                Event::TimeAdvanced { dt } => {
                    self.accumulator = self.accumulator.saturating_add(*dt);
                }
                Event::RevealCompleted { generation } => {
                    if self.generation == Some(*generation) {
                        self.complete = true;
                    }
                }
                _ => {}
            }
        }

        let Some(generation) = self.generation else {
            return;
        };
        if self.complete {
            self.accumulator = Duration::ZERO;
            return;
        }

        let steps = self.resolve_steps();
        if steps > 0 {
            out.push(Command::AdvanceReveal { generation, steps });
        }
    }

    fn resolve_steps(&mut self) -> u32 {
        // A zero delay empties the whole carve order on the first tick.
        if self.step_delay.is_zero() {
            if self.accumulator.is_zero() {
                return 0;
            }
            self.accumulator = Duration::ZERO;
            return u32::MAX;
        }

        let mut steps = 0;
        while self.accumulator >= self.step_delay {
            self.accumulator -= self.step_delay;
            steps += 1;
        }
        steps
    }
}

impl Default for Reveal {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Config, Reveal};
    use maze_quest_core::{Command, Event, GridSize, MazeGeneration};

    fn generated(generation: MazeGeneration) -> Event {
        Event::MazeGenerated {
            generation,
            size: GridSize::new(9, 9),
        }
    }

    fn ticked(millis: u64) -> Event {
        Event::TimeAdvanced {
            dt: Duration::from_millis(millis),
        }
    }

    #[test]
    fn emits_nothing_before_a_maze_is_announced() {
        let mut reveal = Reveal::default();
        let mut commands = Vec::new();
        reveal.handle(&[ticked(500)], &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn emits_one_step_per_whole_delay() {
        let generation = MazeGeneration::new(1);
        let mut reveal = Reveal::new(Config::new(Duration::from_millis(50)));
        let mut commands = Vec::new();

        reveal.handle(&[generated(generation), ticked(125)], &mut commands);

        assert_eq!(
            commands,
            vec![Command::AdvanceReveal {
                generation,
                steps: 2
            }]
        );

        // The 25ms remainder carries over into the next tick.
        commands.clear();
        reveal.handle(&[ticked(25)], &mut commands);
        assert_eq!(
            commands,
            vec![Command::AdvanceReveal {
                generation,
                steps: 1
            }]
        );
    }

    #[test]
    fn a_new_maze_discards_accumulated_time() {
        let first = MazeGeneration::new(1);
        let second = MazeGeneration::new(2);
        let mut reveal = Reveal::new(Config::new(Duration::from_millis(50)));
        let mut commands = Vec::new();

        // Time elapsed before the announcement must not pay for steps of the
        // maze that follows it.
        reveal.handle(
            &[generated(first), ticked(500), generated(second)],
            &mut commands,
        );
        assert!(commands.is_empty());

        reveal.handle(&[ticked(50)], &mut commands);
        assert_eq!(
            commands,
            vec![Command::AdvanceReveal {
                generation: second,
                steps: 1
            }]
        );
    }

    #[test]
    fn completion_silences_the_replay_until_the_next_maze() {
        let generation = MazeGeneration::new(3);
        let mut reveal = Reveal::new(Config::new(Duration::from_millis(50)));
        let mut commands = Vec::new();

        reveal.handle(
            &[
                generated(generation),
                Event::RevealCompleted { generation },
                ticked(500),
            ],
            &mut commands,
        );
        assert!(commands.is_empty());

        let next = MazeGeneration::new(4);
        reveal.handle(&[generated(next), ticked(50)], &mut commands);
        assert_eq!(
            commands,
            vec![Command::AdvanceReveal {
                generation: next,
                steps: 1
            }]
        );
    }

    #[test]
    fn completion_of_a_stale_maze_is_ignored() {
        let stale = MazeGeneration::new(1);
        let current = MazeGeneration::new(2);
        let mut reveal = Reveal::new(Config::new(Duration::from_millis(50)));
        let mut commands = Vec::new();

        reveal.handle(
            &[
                generated(current),
                Event::RevealCompleted { generation: stale },
                ticked(100),
            ],
            &mut commands,
        );
        assert_eq!(
            commands,
            vec![Command::AdvanceReveal {
                generation: current,
                steps: 2
            }]
        );
    }

    #[test]
    fn zero_delay_reveals_everything_on_the_first_tick() {
        let generation = MazeGeneration::new(5);
        let mut reveal = Reveal::new(Config::new(Duration::ZERO));
        let mut commands = Vec::new();

        reveal.handle(&[generated(generation)], &mut commands);
        assert!(commands.is_empty());

        reveal.handle(&[ticked(1)], &mut commands);
        assert_eq!(
            commands,
            vec![Command::AdvanceReveal {
                generation,
                steps: u32::MAX
            }]
        );
    }
}
