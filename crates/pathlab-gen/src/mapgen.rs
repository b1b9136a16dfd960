//! Map generation for search test grids.
//!
//! Provides two generators:
//! - **Maze**: randomized recursive backtracking on the odd-coordinate
//!   lattice, producing a perfect maze (the open cells form a spanning tree).
//! - **Sprinkle**: independent random walls on empty cells, with no
//!   connectivity guarantee.

use pathlab_core::{ConfigError, Dims, Grid, Pos, Role};
use rand::{Rng, RngExt};

use crate::error::MazeError;

/// Wall probability used by the browser visualizer's "random walls" button.
pub const DEFAULT_DENSITY: f64 = 0.3;

const MAZE_STEPS: [(i32, i32); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

/// First and last cells of the odd-coordinate lattice of `dims`, in
/// row-major order. `None` if the lattice has fewer than two cells.
///
/// These are always carved by a maze, which makes them natural start and
/// end positions.
pub fn lattice_corners(dims: Dims) -> Option<(Pos, Pos)> {
    if (dims.rows / 2) * (dims.cols / 2) < 2 {
        return None;
    }
    let last = |n: i32| (n / 2) * 2 - 1;
    Some((Pos::new(1, 1), Pos::new(last(dims.rows), last(dims.cols))))
}

/// Map generator operating on a [`Grid`].
pub struct MapGen<R: Rng> {
    pub rng: R,
    pub grid: Grid,
}

impl<R: Rng> MapGen<R> {
    /// Create a new MapGen with the given grid.
    pub fn with_grid(grid: Grid, rng: R) -> Self {
        Self { rng, grid }
    }

    /// Consume the generator and return its grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Carve a perfect maze from a random odd-coordinate cell.
    ///
    /// See [`maze_from`](Self::maze_from).
    pub fn maze(&mut self) -> Result<usize, MazeError> {
        let dims = self.grid.dims();
        if dims.rows < 2 || dims.cols < 2 {
            return Err(MazeError::TooSmall {
                rows: dims.rows,
                cols: dims.cols,
            });
        }
        let row = 2 * self.rng.random_range(0..dims.rows / 2) + 1;
        let col = 2 * self.rng.random_range(0..dims.cols / 2) + 1;
        self.maze_from(Pos::new(row, col))
    }

    /// Carve a perfect maze by recursive backtracking from `origin`.
    ///
    /// The whole grid is first reset to walls (any Start/End roles are
    /// lost). From the cell on top of a stack, a random unvisited lattice
    /// cell two steps away is chosen, and both it and the cell in between
    /// are carved before it is pushed. A cell with no unvisited lattice
    /// neighbour is popped. Every lattice cell ends up carved and the open
    /// cells form a tree.
    ///
    /// Returns the number of carved cells.
    pub fn maze_from(&mut self, origin: Pos) -> Result<usize, MazeError> {
        let dims = self.grid.dims();
        if dims.rows < 2 || dims.cols < 2 {
            return Err(MazeError::TooSmall {
                rows: dims.rows,
                cols: dims.cols,
            });
        }
        let Some(oi) = dims.idx(origin) else {
            return Err(MazeError::OffLattice(origin));
        };
        if origin.row % 2 != 1 || origin.col % 2 != 1 {
            return Err(MazeError::OffLattice(origin));
        }

        self.grid.fill(Role::Wall);
        let mut visited = vec![false; dims.len()];
        visited[oi] = true;
        self.grid.set_role(origin, Role::Empty);
        let mut carved = 1;

        let mut stack = vec![origin];
        let mut options = [Pos::ZERO; 4];
        while let Some(&cur) = stack.last() {
            let mut n = 0;
            for (dr, dc) in MAZE_STEPS {
                let next = cur.shift(dr, dc);
                if dims.idx(next).is_some_and(|i| !visited[i]) {
                    options[n] = next;
                    n += 1;
                }
            }
            if n == 0 {
                stack.pop();
                continue;
            }

            let next = options[self.rng.random_range(0..n)];
            let between = Pos::new((cur.row + next.row) / 2, (cur.col + next.col) / 2);
            self.grid.set_role(between, Role::Empty);
            self.grid.set_role(next, Role::Empty);
            if let Some(i) = dims.idx(next) {
                visited[i] = true;
            }
            carved += 2;
            stack.push(next);
        }

        log::debug!("maze: carved {carved} cells from {origin} on {dims}");
        Ok(carved)
    }

    /// Turn each `Empty` cell into a wall with probability `density`.
    ///
    /// Start and End cells are never touched. A density of 0 or below places
    /// nothing, 1 or above walls every empty cell. The result may leave the
    /// end unreachable.
    ///
    /// Returns the number of walls placed.
    pub fn sprinkle(&mut self, density: f64) -> usize {
        let mut placed = 0;
        for p in self.grid.dims() {
            if self.grid.role(p) != Some(Role::Empty) {
                continue;
            }
            let r: f64 = self.rng.random();
            if r < density {
                self.grid.set_role(p, Role::Wall);
                placed += 1;
            }
        }
        log::debug!("sprinkle: placed {placed} walls at density {density}");
        placed
    }

    /// Assign the Start and End roles, overwriting whatever was there.
    ///
    /// Any previous Start/End cells become empty.
    pub fn place_endpoints(&mut self, start: Pos, end: Pos) -> Result<(), ConfigError> {
        for p in [start, end] {
            if !self.grid.contains(p) {
                return Err(ConfigError::OutOfBounds(p));
            }
        }
        if start == end {
            return Err(ConfigError::SameStartEnd(start));
        }
        for p in [self.grid.start(), self.grid.end()].into_iter().flatten() {
            self.grid.set_role(p, Role::Empty);
        }
        self.grid.set_role(start, Role::Start);
        self.grid.set_role(end, Role::End);
        Ok(())
    }
}
