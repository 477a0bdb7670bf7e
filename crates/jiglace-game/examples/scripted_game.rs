//! Scripted solve of a scrambled puzzle.
//!
//! Creates a seeded game, drives the drag API with synthetic pointer input
//! until every tile is home, and prints the events the UI would react to.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example scripted_game
//! ```
//!
//! Pick the board size and scramble seed:
//!
//! ```sh
//! cargo run --example scripted_game -- --grid 5 --seed 7
//! ```

use clap::Parser;
use jiglace_core::GridSize;
use jiglace_game::{Game, ImageInfo, Puzzle, PuzzleId, Viewport, testing};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board side length (2-8).
    #[arg(long, value_name = "N", default_value_t = 4)]
    grid: u8,

    /// Scramble seed.
    #[arg(long, value_name = "SEED", default_value_t = 42)]
    seed: u64,

    /// Viewport width in pixels.
    #[arg(long, value_name = "PX", default_value_t = 430.0)]
    width: f32,

    /// Viewport height in pixels.
    #[arg(long, value_name = "PX", default_value_t = 800.0)]
    height: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let grid = GridSize::new(args.grid)?;
    let puzzle = Puzzle {
        id: PuzzleId::new(1),
        image: ImageInfo {
            width: 1024,
            height: 1024,
        },
    };
    let viewport = Viewport {
        width: args.width,
        height: args.height,
    };
    let mut game = Game::new(puzzle, grid, viewport, args.seed);

    println!("Board:");
    println!(
        "  {grid} at {}x{}px per cell",
        game.layout().cell_width(),
        game.layout().cell_height()
    );
    println!();

    let drops = testing::send_board_tiles_home(&mut game)?;

    println!("Events:");
    for event in game.take_events() {
        println!("  {event:?}");
    }
    println!();
    println!("Solved in {drops} drops.");
    Ok(())
}
