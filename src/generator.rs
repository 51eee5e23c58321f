//! Randomized depth-first maze carving, one step at a time

use rand::{seq::SliceRandom, Rng};
use tracing::trace;

use crate::config::{Config, ConfigError};
use crate::coords::{neighbors_of, Coor};
use crate::grid::Grid;

/// Lifecycle of a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    /// No step taken yet
    Idle,
    /// Stack is non-empty, carving in progress
    Running,
    /// Stack emptied; terminal
    Complete,
}

/// What a single [MazeGenerator::step] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Wall between `from` and `to` was opened and the position moved to `to`
    Carved { from: Coor, to: Coor },
    /// Dead end; position moved back to `to`, the new top of the stack
    Backtracked { to: Coor },
    /// Every cell has been visited
    Complete,
}

/// Recursive backtracker that can be suspended between steps
///
/// The recursion is replaced by an explicit stack so that the carving can
/// be driven one step per animation frame.
pub struct MazeGenerator<R> {
    grid: Grid,
    stack: Vec<Coor>,
    position: Coor,
    state: GeneratorState,
    pushes: usize,
    random: R,
}

impl<R: Rng> MazeGenerator<R> {
    /// Create generator that starts carving from `start`
    ///
    /// Returns error if `start` lies outside the grid.
    pub fn new(grid: Grid, start: Coor, random: R) -> Result<Self, ConfigError> {
        let size = grid.size();
        if start.x >= size || start.y >= size {
            return Err(ConfigError::StartOutOfRange {
                x: start.x,
                y: start.y,
                size,
            });
        }
        Ok(Self {
            grid,
            stack: Vec::with_capacity(16),
            position: start,
            state: GeneratorState::Idle,
            pushes: 0,
            random,
        })
    }

    /// Create a fresh grid sized and started as configured
    ///
    /// # Examples
    /// ```
    /// use maze_carver::config::Config;
    /// use maze_carver::generator::MazeGenerator;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let config = Config::builder().grid_size(8).build().unwrap();
    /// let mut generator = MazeGenerator::from_config(&config, StdRng::seed_from_u64(1)).unwrap();
    /// generator.run_to_completion();
    /// assert_eq!(generator.merges(), 8 * 8 - 1);
    /// ```
    pub fn from_config(config: &Config, random: R) -> Result<Self, ConfigError> {
        let grid = Grid::new(config.grid_size())?;
        Self::new(grid, config.start(), random)
    }

    /// Advance the carving by one step
    ///
    /// A cell is pushed and marked visited when the position first enters
    /// it, not when it is discovered as a neighbour. Once complete, further
    /// calls change nothing and keep returning [StepOutcome::Complete].
    pub fn step(&mut self) -> StepOutcome {
        if self.state == GeneratorState::Complete {
            return StepOutcome::Complete;
        }
        self.state = GeneratorState::Running;

        let current = self.position;
        let size = self.grid.size();

        if !self.grid.is_visited(current) {
            self.stack.push(current);
            self.pushes += 1;
            self.grid.mark_visited(current);
        }

        let mut neighbors = neighbors_of(size, size, current);
        neighbors.shuffle(&mut self.random);
        let next = neighbors.into_iter().find(|n| !self.grid.is_visited(*n));

        let outcome = match next {
            None => {
                self.stack.pop();
                match self.stack.last() {
                    None => {
                        self.state = GeneratorState::Complete;
                        StepOutcome::Complete
                    }
                    Some(&top) => {
                        self.position = top;
                        StepOutcome::Backtracked { to: top }
                    }
                }
            }
            Some(neighbor) => {
                self.grid.merge_cell(current, neighbor);
                self.position = neighbor;
                StepOutcome::Carved {
                    from: current,
                    to: neighbor,
                }
            }
        };
        trace!(?outcome, depth = self.stack.len(), "step");
        outcome
    }

    /// Step until complete, returning the number of steps taken
    pub fn run_to_completion(&mut self) -> usize {
        let mut steps = 0;
        while self.state != GeneratorState::Complete {
            self.step();
            steps += 1;
        }
        steps
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Current position of the carving head
    pub fn position(&self) -> Coor {
        self.position
    }

    /// Path from the start cell to the most recently entered cell
    pub fn stack(&self) -> &[Coor] {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Total number of stack pushes so far
    pub fn pushes(&self) -> usize {
        self.pushes
    }

    /// Number of walls opened so far
    pub fn merges(&self) -> usize {
        self.grid.passage_count()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use itertools::Itertools;
    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn seeded(size: usize, start: Coor, seed: u64) -> MazeGenerator<StdRng> {
        MazeGenerator::new(Grid::new(size).unwrap(), start, StdRng::seed_from_u64(seed)).unwrap()
    }

    /// Open passages between neighbouring cells, for comparing whole mazes
    fn passages(generator: &MazeGenerator<StdRng>) -> Vec<(Coor, Coor)> {
        let grid = generator.grid();
        grid.cells()
            .iter()
            .map(|c| c.coor)
            .tuple_combinations()
            .filter(|(a, b)| a.is_adjacent(b) && grid.is_open(*a, *b))
            .collect()
    }

    #[test]
    fn single_cell_completes_on_first_step() {
        let mut generator = seeded(1, Coor::new(0, 0), 0);
        assert_eq!(generator.state(), GeneratorState::Idle);
        assert_eq!(generator.depth(), 0);

        assert_eq!(generator.step(), StepOutcome::Complete);
        assert_eq!(generator.state(), GeneratorState::Complete);
        assert_eq!(generator.pushes(), 1);
        assert_eq!(generator.depth(), 0);
        assert_eq!(generator.merges(), 0);
    }

    #[test]
    fn start_outside_grid_is_rejected() {
        for start in [Coor::new(3, 0), Coor::new(0, 3), Coor::new(7, 7)] {
            let result =
                MazeGenerator::new(Grid::new(3).unwrap(), start, StdRng::seed_from_u64(0));
            assert_eq!(
                result.err(),
                Some(ConfigError::StartOutOfRange {
                    x: start.x,
                    y: start.y,
                    size: 3
                })
            );
        }
        let corner =
            MazeGenerator::new(Grid::new(3).unwrap(), Coor::new(2, 2), StdRng::seed_from_u64(0));
        assert!(corner.is_ok());
    }

    #[test]
    fn two_by_two_grid() {
        let mut generator = seeded(2, Coor::new(0, 0), 3);
        let mut max_depth = 0;
        while generator.step() != StepOutcome::Complete {
            max_depth = max_depth.max(generator.depth());
        }
        assert_eq!(generator.merges(), 3);
        assert!(max_depth <= 4);
        assert_eq!(generator.pushes(), 4);
    }

    #[test]
    fn every_cell_pushed_exactly_once() {
        for size in 1..10 {
            for seed in 0..5 {
                let start = Coor::new(seed as usize % size, size / 2);
                let mut generator = seeded(size, start, seed);
                let mut pushed = HashSet::new();
                loop {
                    let current = generator.position();
                    let pushes = generator.pushes();
                    let outcome = generator.step();
                    if generator.pushes() > pushes {
                        assert!(pushed.insert(current), "{current:?} pushed twice");
                    }
                    if outcome == StepOutcome::Complete {
                        break;
                    }
                }
                assert_eq!(generator.pushes(), size * size);
                assert!(generator.grid().cells().iter().all(|c| c.visited));
            }
        }
    }

    #[test]
    fn result_is_spanning_tree() {
        for size in 1..12 {
            let mut generator = seeded(size, Coor::new(0, 0), size as u64);
            generator.run_to_completion();

            let graph = generator.grid().passages();
            assert_eq!(generator.merges(), size * size - 1);
            assert_eq!(connected_components(graph), 1);
            assert!(!is_cyclic_undirected(graph));
        }
    }

    #[test]
    fn stack_top_follows_position() {
        let mut generator = seeded(6, Coor::new(2, 3), 11);
        loop {
            match generator.step() {
                StepOutcome::Backtracked { to } => {
                    assert_eq!(generator.stack().last(), Some(&to));
                    assert_eq!(generator.position(), to);
                }
                StepOutcome::Carved { from, to } => {
                    assert_eq!(generator.stack().last(), Some(&from));
                    assert_eq!(generator.position(), to);
                    assert!(!generator.grid().is_visited(to));
                }
                StepOutcome::Complete => break,
            }
            assert!(generator
                .stack()
                .iter()
                .all(|c| generator.grid().is_visited(*c)));
        }
    }

    #[test]
    fn complete_is_terminal() {
        let mut generator = seeded(4, Coor::new(0, 0), 5);
        generator.run_to_completion();
        let before = passages(&generator);
        let pushes = generator.pushes();

        for _ in 0..10 {
            assert_eq!(generator.step(), StepOutcome::Complete);
        }
        assert_eq!(passages(&generator), before);
        assert_eq!(generator.pushes(), pushes);
        assert_eq!(generator.depth(), 0);
        assert_eq!(generator.state(), GeneratorState::Complete);
    }

    #[test]
    fn same_seed_same_maze() {
        let mut a = seeded(10, Coor::new(3, 3), 42);
        let mut b = seeded(10, Coor::new(3, 3), 42);
        a.run_to_completion();
        b.run_to_completion();
        assert_eq!(passages(&a), passages(&b));
    }

    #[test]
    fn unseeded_mazes_differ() {
        let carve = || {
            let mut g = MazeGenerator::new(
                Grid::new(10).unwrap(),
                Coor::new(0, 0),
                StdRng::from_entropy(),
            )
            .unwrap();
            g.run_to_completion();
            passages(&g)
        };
        assert_ne!(carve(), carve());
    }

    #[test]
    fn first_move_is_uniform_among_unvisited_neighbours() {
        // From the centre of a 3x3 grid all four neighbours are open
        let mut counts = [0usize; 4];
        let centre = Coor::new(1, 1);
        let options = neighbors_of(3, 3, centre);
        for seed in 0..4000 {
            let mut generator = seeded(3, centre, seed);
            let StepOutcome::Carved { to, .. } = generator.step() else {
                panic!("first step from centre must carve");
            };
            let slot = options.iter().position(|c| *c == to).unwrap();
            counts[slot] += 1;
        }
        for count in counts {
            assert!((850..1150).contains(&count), "{counts:?}");
        }
    }
}
