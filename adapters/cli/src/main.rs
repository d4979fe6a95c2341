#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Maze Quest in the terminal.
//!
//! The adapter owns no game rules: it submits commands to the world, pumps
//! the reveal system against the produced events, and renders the read-only
//! maze view between frames.

use std::{
    io::{self, BufRead, Write},
    thread,
    time::Duration,
};

use anyhow::bail;
use clap::Parser;
use maze_quest_core::{Command, Direction, Event, GridCoord, GridSize, MoveResult};
use maze_quest_system_reveal::{Config, Reveal};
use maze_quest_world::{self as world, query, World};

#[derive(Debug, Parser)]
#[command(name = "maze-quest", about = "Generate and walk a perfect maze in the terminal")]
struct Args {
    /// Number of maze columns.
    #[arg(long, default_value_t = 20)]
    width: u32,

    /// Number of maze rows.
    #[arg(long, default_value_t = 20)]
    height: u32,

    /// Seed for a deterministic maze sequence; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between reveal-animation steps.
    #[arg(long, default_value_t = 50)]
    step_ms: u64,

    /// Skip the reveal animation and show the maze immediately.
    #[arg(long)]
    no_animate: bool,
}

impl Args {
    fn animation(&self) -> Option<Duration> {
        if self.no_animate || self.step_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.step_ms))
        }
    }
}

/// Entry point for the Maze Quest command-line interface.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut world = match args.seed {
        Some(seed) => World::with_seed(seed),
        None => World::new(),
    };

    let size = GridSize::new(args.width, args.height);
    let announcement = start_maze(&mut world, size)?;
    present_maze(&mut world, announcement, args.animation());

    interactive_loop(&mut world, size, args.animation())
}

/// Requests a fresh maze, failing when the dimensions are rejected.
fn start_maze(world: &mut World, size: GridSize) -> anyhow::Result<Vec<Event>> {
    let mut events = Vec::new();
    world::apply(world, Command::NewMaze { size }, &mut events);
    for event in &events {
        if let Event::MazeRejected { reason, .. } = event {
            bail!("cannot generate maze: {reason}");
        }
    }
    Ok(events)
}

/// Reveals the freshly generated maze, animated or all at once.
fn present_maze(world: &mut World, announcement: Vec<Event>, animation: Option<Duration>) {
    match animation {
        Some(step) => play_reveal_animation(world, announcement, step),
        None => reveal_everything(world),
    }
    render(world);
}

/// Replays the carve order as a timed animation, one frame per step delay.
fn play_reveal_animation(world: &mut World, announcement: Vec<Event>, step: Duration) {
    let mut reveal = Reveal::new(Config::new(step));
    let mut pending = announcement;

    loop {
        thread::sleep(step);
        world::apply(world, Command::Tick { dt: step }, &mut pending);

        let mut commands = Vec::new();
        reveal.handle(&pending, &mut commands);
        pending = Vec::new();

        let mut produced = Vec::new();
        for command in commands {
            world::apply(world, command, &mut produced);
        }
        if produced
            .iter()
            .any(|event| matches!(event, Event::CellsRevealed { .. }))
        {
            render(world);
        }
        if produced
            .iter()
            .any(|event| matches!(event, Event::RevealCompleted { .. }))
        {
            break;
        }
    }
}

/// Marks the entire carve order of the current maze as visible.
fn reveal_everything(world: &mut World) {
    let mut events = Vec::new();
    let generation = query::generation(world);
    world::apply(
        world,
        Command::AdvanceReveal {
            generation,
            steps: u32::MAX,
        },
        &mut events,
    );
}

/// Reads move and regenerate commands from stdin until quit or end of input.
fn interactive_loop(
    world: &mut World,
    size: GridSize,
    animation: Option<Duration>,
) -> anyhow::Result<()> {
    println!("commands: w/a/s/d (or up/left/down/right) to move, n for a new maze, q to quit");
    print_position(world);

    for line in io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim().to_ascii_lowercase();
        let direction = match input.as_str() {
            "" => continue,
            "q" | "quit" => return Ok(()),
            "n" | "new" => {
                let announcement = start_maze(world, size)?;
                present_maze(world, announcement, animation);
                println!("maze regenerated");
                print_position(world);
                continue;
            }
            "w" | "up" => Direction::Up,
            "s" | "down" => Direction::Down,
            "a" | "left" => Direction::Left,
            "d" | "right" => Direction::Right,
            other => {
                println!("unrecognized command: {other}");
                continue;
            }
        };

        let mut events = Vec::new();
        world::apply(world, Command::Move { direction }, &mut events);
        render(world);
        report_move(&events);
        print_position(world);
    }

    Ok(())
}

fn report_move(events: &[Event]) {
    for event in events {
        match event {
            Event::MoveBlocked { .. } => println!("blocked by a wall"),
            Event::ExitReached { .. } => println!("you found the exit!"),
            Event::PlayerMoved {
                result: MoveResult::Moved,
                ..
            } => println!("moved"),
            _ => {}
        }
    }
}

fn print_position(world: &World) {
    let player = query::player(world);
    println!("player position: ({}, {})", player.x(), player.y());
}

/// Draws the maze view: `#` wall or still-hidden cell, `·` open, `@`
/// entrance, `E` exit, `P` player.
fn render(world: &World) {
    let view = query::maze_view(world);
    let size = view.size();
    let mut frame = String::with_capacity((size.width() as usize + 1) * size.height() as usize);

    for y in 0..size.height() {
        for x in 0..size.width() {
            let cell = GridCoord::new(x, y);
            let glyph = if cell == view.player() {
                'P'
            } else if view.is_wall(cell) || !view.is_revealed(cell) {
                '#'
            } else if view.is_exit(cell) {
                'E'
            } else if cell == view.entrance() {
                '@'
            } else {
                '·'
            };
            frame.push(glyph);
        }
        frame.push('\n');
    }

    // Repaint in place so the reveal animation reads as one moving picture.
    print!("\x1b[2J\x1b[H{frame}");
    let _ = io::stdout().flush();
}
