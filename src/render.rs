//! Painting the grid onto a raster surface

use crate::config::{Color, Config};
use crate::coords::Coor;
use crate::grid::Grid;

/// Raster sink that the renderer draws on
///
/// Coordinates are in pixels, with the origin at the top left.
pub trait Surface {
    fn set_fill_color(&mut self, color: Color);

    fn set_stroke_color(&mut self, color: Color);

    /// Fill rectangle with the current fill color
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Stroke a line segment with the current stroke color
    fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64);

    /// Make everything drawn so far visible
    fn present(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Paints cells and walls; holds no maze state of its own
#[derive(Debug, Clone)]
pub struct Renderer {
    canvas_width: f64,
    canvas_height: f64,
    /// Cell width in pixels
    cell_w: f64,
    /// Cell height in pixels
    cell_h: f64,
    background: Color,
    cell_color: Color,
    wall_color: Color,
    visited_color: Color,
}

impl Renderer {
    pub fn new(config: &Config) -> Self {
        let canvas = config.canvas();
        let grid = config.grid_size() as f64;
        Self {
            canvas_width: canvas.width as f64,
            canvas_height: canvas.height as f64,
            cell_w: canvas.width as f64 / grid,
            cell_h: canvas.height as f64 / grid,
            background: canvas.background,
            cell_color: config.cell_color(),
            wall_color: config.wall_color(),
            visited_color: config.visited_color(),
        }
    }

    pub fn paint_background<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_fill_color(self.background);
        surface.fill_rect(0.0, 0.0, self.canvas_width, self.canvas_height);
    }

    /// Fill the cell, then stroke each wall that still stands
    pub fn paint_cell<S: Surface + ?Sized>(&self, surface: &mut S, grid: &Grid, coor: Coor) {
        let (w, h) = (self.cell_w, self.cell_h);
        let left = coor.x as f64 * w;
        let top = coor.y as f64 * h;
        let (right, bottom) = (left + w, top + h);

        let fill = if grid.is_visited(coor) {
            self.visited_color
        } else {
            self.cell_color
        };
        surface.set_fill_color(fill);
        surface.fill_rect(left, top, w, h);

        let walls = grid.walls(coor);
        surface.set_stroke_color(self.wall_color);
        if walls.left {
            surface.stroke_line(left, top, left, bottom);
        }
        if walls.right {
            surface.stroke_line(right, top, right, bottom);
        }
        if walls.up {
            surface.stroke_line(left, top, right, top);
        }
        if walls.down {
            surface.stroke_line(left, bottom, right, bottom);
        }
    }

    pub fn paint_all<S: Surface + ?Sized>(&self, surface: &mut S, grid: &Grid) {
        for cell in grid.cells() {
            self.paint_cell(surface, grid, cell.coor);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Drawing command captured by [Recorder]
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Op {
        Fill(Color, [f64; 4]),
        Line(Color, [f64; 4]),
        Present,
    }

    /// Surface that records every call
    #[derive(Default)]
    pub(crate) struct Recorder {
        fill: Option<Color>,
        stroke: Option<Color>,
        pub(crate) ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn set_fill_color(&mut self, color: Color) {
            self.fill = Some(color);
        }

        fn set_stroke_color(&mut self, color: Color) {
            self.stroke = Some(color);
        }

        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
            let color = self.fill.expect("fill color set before fill");
            self.ops.push(Op::Fill(color, [x, y, w, h]));
        }

        fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
            let color = self.stroke.expect("stroke color set before stroke");
            self.ops.push(Op::Line(color, [x0, y0, x1, y1]));
        }

        fn present(&mut self) -> anyhow::Result<()> {
            self.ops.push(Op::Present);
            Ok(())
        }
    }

    fn config(size: usize) -> Config {
        Config::builder()
            .grid_size(size)
            .canvas_size(100, 50)
            .build()
            .unwrap()
    }

    #[test]
    fn background_covers_canvas() {
        let renderer = Renderer::new(&config(2));
        let mut surface = Recorder::default();
        renderer.paint_background(&mut surface);
        assert_eq!(
            surface.ops,
            vec![Op::Fill(Color::BLACK, [0.0, 0.0, 100.0, 50.0])]
        );
    }

    #[test]
    fn closed_cell_has_four_walls() {
        let config = config(2);
        let renderer = Renderer::new(&config);
        let grid = Grid::new(2).unwrap();
        let mut surface = Recorder::default();

        renderer.paint_cell(&mut surface, &grid, Coor::new(1, 0));

        let wall = config.wall_color();
        assert_eq!(
            surface.ops,
            vec![
                Op::Fill(config.cell_color(), [50.0, 0.0, 50.0, 25.0]),
                Op::Line(wall, [50.0, 0.0, 50.0, 25.0]),
                Op::Line(wall, [100.0, 0.0, 100.0, 25.0]),
                Op::Line(wall, [50.0, 0.0, 100.0, 0.0]),
                Op::Line(wall, [50.0, 25.0, 100.0, 25.0]),
            ]
        );
    }

    #[test]
    fn visited_cell_with_opened_walls() {
        let config = config(2);
        let renderer = Renderer::new(&config);
        let mut grid = Grid::new(2).unwrap();
        let c = Coor::new(0, 0);
        grid.mark_visited(c);
        grid.merge_cell(c, Coor::new(1, 0));
        grid.merge_cell(c, Coor::new(0, 1));
        let mut surface = Recorder::default();

        renderer.paint_cell(&mut surface, &grid, c);

        let wall = config.wall_color();
        assert_eq!(
            surface.ops,
            vec![
                Op::Fill(config.visited_color(), [0.0, 0.0, 50.0, 25.0]),
                Op::Line(wall, [0.0, 0.0, 0.0, 25.0]),
                Op::Line(wall, [0.0, 0.0, 50.0, 0.0]),
            ]
        );
    }

    #[test]
    fn paint_all_fills_every_cell() {
        let config = config(3);
        let renderer = Renderer::new(&config);
        let grid = Grid::new(3).unwrap();
        let mut surface = Recorder::default();
        renderer.paint_all(&mut surface, &grid);

        let fills = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Fill(..)))
            .count();
        let lines = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Line(..)))
            .count();
        assert_eq!(fills, 9);
        assert_eq!(lines, 9 * 4);
    }
}
