//! Cells of the maze and the passages between them

use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};
use thiserror::Error;

use crate::coords::{coor_to_index, index_to_coor, Coor};

/// Errors from grid construction
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must have at least one cell per side")]
    Empty,
}

/// Single square of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub coor: Coor,
    /// Whether the generator has entered this cell
    pub visited: bool,
}

/// Wall state of one cell, `true` where the wall still stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Walls {
    pub const CLOSED: Walls = Walls {
        up: true,
        down: true,
        left: true,
        right: true,
    };
}

/// Square grid of cells
///
/// Walls are not stored per cell. Opened walls are edges of an undirected
/// graph over the cells, so the wall between two neighbours is the same
/// value seen from either side.
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    /// Passages between cells; node index equals linear cell index
    passages: Graph<Coor, (), Undirected>,
}

impl Grid {
    /// Allocate `size * size` unvisited, fully walled cells
    ///
    /// # Examples
    /// ```
    /// use maze_carver::grid::{Grid, Walls};
    /// use maze_carver::coords::Coor;
    ///
    /// let grid = Grid::new(3).unwrap();
    /// assert_eq!(grid.cells().len(), 9);
    /// assert_eq!(grid.walls(Coor::new(1, 1)), Walls::CLOSED);
    /// ```
    pub fn new(size: usize) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::Empty);
        }
        let count = size * size;
        let mut passages = Graph::with_capacity(count, count - 1);
        let cells = (0..count)
            .map(|index| {
                let coor = index_to_coor(index, size);
                passages.add_node(coor);
                Cell {
                    coor,
                    visited: false,
                }
            })
            .collect();

        Ok(Grid {
            size,
            cells,
            passages,
        })
    }

    /// Cells per side
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, coor: Coor) -> &Cell {
        &self.cells[self.index(coor)]
    }

    pub fn is_visited(&self, coor: Coor) -> bool {
        self.cell(coor).visited
    }

    /// Set the visited flag; marking twice has no further effect
    pub fn mark_visited(&mut self, coor: Coor) {
        let index = self.index(coor);
        self.cells[index].visited = true;
    }

    /// Open the wall between two adjacent cells
    ///
    /// Returns `false` and changes nothing if the cells are not neighbours
    /// on a single axis. Merging an already open pair keeps one passage.
    pub fn merge_cell(&mut self, a: Coor, b: Coor) -> bool {
        if !a.is_adjacent(&b) {
            return false;
        }
        let (na, nb) = (self.node(a), self.node(b));
        self.passages.update_edge(na, nb, ());
        true
    }

    /// Whether a passage joins `a` and `b`
    pub fn is_open(&self, a: Coor, b: Coor) -> bool {
        self.passages.find_edge(self.node(a), self.node(b)).is_some()
    }

    /// Walls of the cell at `coor`; grid borders are always walled
    pub fn walls(&self, coor: Coor) -> Walls {
        let Coor { x, y } = coor;
        let closed = |dx: isize, dy: isize| {
            match (x.checked_add_signed(dx), y.checked_add_signed(dy)) {
                (Some(nx), Some(ny)) if nx < self.size && ny < self.size => {
                    !self.is_open(coor, Coor::new(nx, ny))
                }
                _ => true,
            }
        };
        Walls {
            up: closed(0, -1),
            down: closed(0, 1),
            left: closed(-1, 0),
            right: closed(1, 0),
        }
    }

    /// Number of opened walls
    pub fn passage_count(&self) -> usize {
        self.passages.edge_count()
    }

    /// Undirected passage graph, node weights are cell coordinates
    pub fn passages(&self) -> &Graph<Coor, (), Undirected> {
        &self.passages
    }

    fn index(&self, coor: Coor) -> usize {
        coor_to_index(coor, self.size)
    }

    fn node(&self, coor: Coor) -> NodeIndex {
        NodeIndex::new(self.index(coor))
    }
}
