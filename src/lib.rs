//! Carve a perfect maze with a randomized depth-first search, one frame at a time
//!
//! The generator keeps its own backtracking stack, so the carving can be
//! suspended after every step and drawn in between.
//!
//! # Examples
//! ## Carve synchronously
//! ```
//! use maze_carver::{Grid, MazeGenerator};
//! use maze_carver::coords::Coor;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let grid = Grid::new(5).unwrap();
//! let mut generator =
//!     MazeGenerator::new(grid, Coor::new(0, 0), StdRng::seed_from_u64(13)).unwrap();
//! generator.run_to_completion();
//!
//! // Every cell is reachable and there are no loops
//! assert_eq!(generator.merges(), 5 * 5 - 1);
//! assert!(generator.grid().cells().iter().all(|cell| cell.visited));
//! ```
//!
//! ## Animate on a surface
//! ```
//! use std::time::Duration;
//! use maze_carver::{Config, MazeGenerator, Renderer, Scheduler, TerminalCanvas};
//! use maze_carver::scheduler::Timer;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! struct NoWait;
//! impl Timer for NoWait {
//!     fn wait(&mut self, _: Duration) {}
//! }
//!
//! let config = Config::builder().grid_size(4).canvas_size(9, 9).build().unwrap();
//! let mut generator = MazeGenerator::from_config(&config, StdRng::seed_from_u64(2)).unwrap();
//! let renderer = Renderer::new(&config);
//! let mut canvas = TerminalCanvas::new(9, 9, std::io::sink());
//!
//! let mut done = false;
//! let mut scheduler = Scheduler::new(config.tick(), |ok| done = ok);
//! scheduler.run(&mut generator, &renderer, &mut canvas, &mut NoWait).unwrap();
//! drop(scheduler);
//! assert!(done);
//! ```

pub mod canvas;
pub mod config;
pub mod coords;
pub mod generator;
pub mod grid;
pub mod render;
pub mod scheduler;

pub use canvas::TerminalCanvas;
pub use config::{Color, Config, ConfigError};
pub use generator::{GeneratorState, MazeGenerator, StepOutcome};
pub use grid::{Grid, GridError};
pub use render::{Renderer, Surface};
pub use scheduler::{CancelToken, Scheduler, SleepTimer, TickOutcome};
