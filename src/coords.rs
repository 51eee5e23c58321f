//! Mapping between linear cell indices and grid coordinates

/// Location of a cell in the grid
///
/// `x` is the column and `y` is the row.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Coor {
    pub x: usize,
    pub y: usize,
}

impl Coor {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Whether `other` is exactly one step away along a single axis
    pub fn is_adjacent(&self, other: &Coor) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

impl From<(usize, usize)> for Coor {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Convert linear index into coordinates.
///
/// # Examples
/// ```
/// use maze_carver::coords::{index_to_coor, Coor};
/// assert_eq!(index_to_coor(7, 5), Coor::new(1, 2));
/// ```
pub fn index_to_coor(index: usize, width: usize) -> Coor {
    Coor {
        x: index / width,
        y: index % width,
    }
}

/// Convert coordinates into linear index, `x * width + y`.
///
/// # Panics
/// If `coor.y >= width`. The row component must stay inside the grid, so
/// this can only happen through a bug in the caller.
pub fn coor_to_index(coor: Coor, width: usize) -> usize {
    assert!(
        coor.y < width,
        "value of y cannot be greater than array's width ({} >= {})",
        coor.y,
        width
    );
    coor.x * width + coor.y
}

/// Axis neighbours of `coor` that are inside `[0, width) x [0, height)`.
///
/// Order is always left, up, right, down; out of bounds neighbours are
/// omitted.
pub fn neighbors_of(width: usize, height: usize, coor: Coor) -> Vec<Coor> {
    let Coor { x, y } = coor;
    let left = (x > 0).then(|| Coor::new(x - 1, y));
    let up = (y > 0).then(|| Coor::new(x, y - 1));
    let right = (x + 1 < width).then(|| Coor::new(x + 1, y));
    let down = (y + 1 < height).then(|| Coor::new(x, y + 1));

    [left, up, right, down].into_iter().flatten().collect()
}
