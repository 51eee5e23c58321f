//! Validated configuration for a maze session

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::coords::Coor;
use crate::grid::GridError;

/// Configuration errors, raised before any step is taken
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size must be at least 1, got {0}")]
    InvalidGridSize(usize),
    #[error("start point ({x}, {y}) is outside the {size}x{size} grid")]
    StartOutOfRange { x: usize, y: usize, size: usize },
    #[error("tick interval must be positive")]
    ZeroTickInterval,
    #[error("canvas must have positive dimensions, got {width}x{height}")]
    EmptyCanvas { width: usize, height: usize },
    #[error("unrecognized color `{0}`")]
    InvalidColor(String),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb` or a basic CSS color name
    ///
    /// # Examples
    /// ```
    /// use maze_carver::config::Color;
    /// assert_eq!(Color::parse("#fffb2b").unwrap(), Color::rgb(0xff, 0xfb, 0x2b));
    /// assert_eq!(Color::parse("#000").unwrap(), Color::BLACK);
    /// assert_eq!(Color::parse("Pink").unwrap(), Color::rgb(255, 192, 203));
    /// ```
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(text.to_string());
        let text = text.trim();

        if let Some(hex) = text.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
            return match hex.len() {
                3 => {
                    // #abc is shorthand for #aabbcc
                    let [r, g, b] = [0, 1, 2].map(|i| hex[i..i + 1].repeat(2));
                    Ok(Color::rgb(channel(&r)?, channel(&g)?, channel(&b)?))
                }
                6 => Ok(Color::rgb(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                )),
                _ => Err(invalid()),
            };
        }

        let color = match text.to_ascii_lowercase().as_str() {
            "black" => Color::BLACK,
            "white" => Color::rgb(255, 255, 255),
            "red" => Color::rgb(255, 0, 0),
            "green" => Color::rgb(0, 128, 0),
            "blue" => Color::rgb(0, 0, 255),
            "yellow" => Color::rgb(255, 255, 0),
            "pink" => Color::rgb(255, 192, 203),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "orange" => Color::rgb(255, 165, 0),
            "purple" => Color::rgb(128, 0, 128),
            _ => return Err(invalid()),
        };
        Ok(color)
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Raster surface dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    pub background: Color,
}

/// Complete, validated settings for one maze session
///
/// Only obtainable through [ConfigBuilder::build], so every `Config` in
/// circulation has a non-empty grid and an in-range start point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    canvas: Canvas,
    grid_size: usize,
    tick: Duration,
    cell_color: Color,
    wall_color: Color,
    visited_color: Color,
    start: Coor,
}

impl Config {
    pub const DEFAULT_CANVAS: Canvas = Canvas {
        width: 500,
        height: 500,
        background: Color::BLACK,
    };
    pub const DEFAULT_GRID_SIZE: usize = 50;
    pub const DEFAULT_TICK: Duration = Duration::from_millis(50);
    pub const DEFAULT_CELL_COLOR: Color = Color::rgb(0, 128, 0);
    pub const DEFAULT_WALL_COLOR: Color = Color::rgb(255, 192, 203);
    pub const DEFAULT_VISITED_COLOR: Color = Color::rgb(255, 0, 0);

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Cells per side
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    pub fn cell_color(&self) -> Color {
        self.cell_color
    }

    pub fn wall_color(&self) -> Color {
        self.wall_color
    }

    pub fn visited_color(&self) -> Color {
        self.visited_color
    }

    pub fn start(&self) -> Coor {
        self.start
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            canvas: Self::DEFAULT_CANVAS,
            grid_size: Self::DEFAULT_GRID_SIZE,
            tick: Self::DEFAULT_TICK,
            cell_color: Self::DEFAULT_CELL_COLOR,
            wall_color: Self::DEFAULT_WALL_COLOR,
            visited_color: Self::DEFAULT_VISITED_COLOR,
            start: Coor::new(0, 0),
        }
    }
}

/// Collects optional settings; unset fields take the `Config::DEFAULT_*`
/// values.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    canvas_size: Option<(usize, usize)>,
    background: Option<Color>,
    grid_size: Option<usize>,
    tick: Option<Duration>,
    cell_color: Option<Color>,
    wall_color: Option<Color>,
    visited_color: Option<Color>,
    start: Option<Coor>,
}

impl ConfigBuilder {
    pub fn canvas_size(mut self, width: usize, height: usize) -> Self {
        self.canvas_size = Some((width, height));
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn grid_size(mut self, size: usize) -> Self {
        self.grid_size = Some(size);
        self
    }

    pub fn tick(mut self, tick: Duration) -> Self {
        self.tick = Some(tick);
        self
    }

    pub fn cell_color(mut self, color: Color) -> Self {
        self.cell_color = Some(color);
        self
    }

    pub fn wall_color(mut self, color: Color) -> Self {
        self.wall_color = Some(color);
        self
    }

    pub fn visited_color(mut self, color: Color) -> Self {
        self.visited_color = Some(color);
        self
    }

    pub fn start(mut self, start: Coor) -> Self {
        self.start = Some(start);
        self
    }

    /// Apply defaults and validate
    ///
    /// Invalid values are reported, never clamped.
    ///
    /// # Examples
    /// ```
    /// use maze_carver::config::{Config, ConfigError};
    /// use maze_carver::coords::Coor;
    ///
    /// let config = Config::builder().grid_size(10).build().unwrap();
    /// assert_eq!(config.grid_size(), 10);
    ///
    /// let err = Config::builder().grid_size(10).start(Coor::new(10, 0)).build();
    /// assert!(matches!(err, Err(ConfigError::StartOutOfRange { .. })));
    /// ```
    pub fn build(self) -> Result<Config, ConfigError> {
        let defaults = Config::default();

        let grid_size = self.grid_size.unwrap_or(defaults.grid_size);
        if grid_size == 0 {
            return Err(ConfigError::InvalidGridSize(grid_size));
        }

        let start = self.start.unwrap_or(defaults.start);
        if start.x >= grid_size || start.y >= grid_size {
            return Err(ConfigError::StartOutOfRange {
                x: start.x,
                y: start.y,
                size: grid_size,
            });
        }

        let tick = self.tick.unwrap_or(defaults.tick);
        if tick.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }

        let (width, height) = self
            .canvas_size
            .unwrap_or((defaults.canvas.width, defaults.canvas.height));
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyCanvas { width, height });
        }

        Ok(Config {
            canvas: Canvas {
                width,
                height,
                background: self.background.unwrap_or(defaults.canvas.background),
            },
            grid_size,
            tick,
            cell_color: self.cell_color.unwrap_or(defaults.cell_color),
            wall_color: self.wall_color.unwrap_or(defaults.wall_color),
            visited_color: self.visited_color.unwrap_or(defaults.visited_color),
            start,
        })
    }
}
