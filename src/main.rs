//! CLI for animated maze carving

use std::io::{self, BufWriter, Write};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use maze_carver::coords::Coor;
use maze_carver::{
    Color, Config, MazeGenerator, Renderer, Scheduler, SleepTimer, Surface, TerminalCanvas,
    TickOutcome,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{info, Level};

/// Watch a perfect maze being carved by a recursive backtracker
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Cells per side
    #[arg(short, long, default_value_t = Config::DEFAULT_GRID_SIZE)]
    grid: usize,

    /// Canvas width in pixels (terminal columns)
    #[arg(long, default_value_t = 150)]
    width: usize,

    /// Canvas height in pixels (two per terminal line)
    #[arg(long, default_value_t = 150)]
    height: usize,

    /// Tick length in milliseconds
    #[arg(short, long, default_value_t = Config::DEFAULT_TICK.as_millis() as u64)]
    tick_ms: u64,

    /// Color of unvisited cells, `#rrggbb`, `#rgb` or a color name
    #[arg(long, default_value = "green")]
    cell_color: Color,

    /// Color of walls
    #[arg(long, default_value = "pink")]
    wall_color: Color,

    /// Color of visited cells
    #[arg(long, default_value = "red")]
    visited_color: Color,

    /// Canvas background color
    #[arg(long, default_value = "#000")]
    background: Color,

    /// Column of the starting cell
    #[arg(long, default_value_t = 0, conflicts_with = "random_start")]
    start_x: usize,

    /// Row of the starting cell
    #[arg(long, default_value_t = 0, conflicts_with = "random_start")]
    start_y: usize,

    /// Start from a random cell
    #[arg(long)]
    random_start: bool,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Carve the whole maze at once and print only the final frame
    #[arg(long)]
    no_animation: bool,

    /// Log verbosity, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Validate settings, then carve the maze onto the terminal
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let mut random = match args.seed {
        Some(state) => StdRng::seed_from_u64(state),
        None => StdRng::from_entropy(),
    };

    // An empty grid is left for the config to reject
    let start = if args.random_start && args.grid > 0 {
        Coor::new(random.gen_range(0..args.grid), random.gen_range(0..args.grid))
    } else {
        Coor::new(args.start_x, args.start_y)
    };

    let config = Config::builder()
        .canvas_size(args.width, args.height)
        .background(args.background)
        .grid_size(args.grid)
        .tick(Duration::from_millis(args.tick_ms))
        .cell_color(args.cell_color)
        .wall_color(args.wall_color)
        .visited_color(args.visited_color)
        .start(start)
        .build()
        .context("Invalid configuration")?;

    let mut generator = MazeGenerator::from_config(&config, random)?;
    let renderer = Renderer::new(&config);
    let canvas = config.canvas();
    let mut surface = TerminalCanvas::new(
        canvas.width,
        canvas.height,
        BufWriter::new(io::stdout().lock()),
    );

    if args.no_animation {
        let steps = generator.run_to_completion();
        info!(steps, "Maze carved");
        renderer.paint_background(&mut surface);
        renderer.paint_all(&mut surface, generator.grid());
        surface.present()?;
        println!("completed");
        return Ok(());
    }

    let mut completed = false;
    let mut scheduler = Scheduler::new(config.tick(), |ok| completed = ok);

    let token = scheduler.cancel_token();
    ctrlc::set_handler(move || token.cancel()).context("Could not set Ctrl-C handler")?;

    let outcome = scheduler.run(&mut generator, &renderer, &mut surface, &mut SleepTimer)?;
    drop(scheduler);

    match outcome {
        TickOutcome::Cancelled => {
            // Leave the terminal with default colors
            print!("\x1B[0m");
            io::stdout().flush()?;
            eprintln!("Cancelled after {} cells.", generator.pushes());
        }
        _ if completed => println!("completed"),
        _ => (),
    }
    Ok(())
}
