//! Read-only views of a grid during a search run.

use std::fmt;

use crate::cell::{Cell, Tag};
use crate::geom::Pos;
use crate::grid::Grid;

/// Status of a search run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Running,
    Found,
    Exhausted,
}

impl Status {
    /// `Found` and `Exhausted` are absorbing.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Status::Running)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Running => "running",
            Status::Found => "found",
            Status::Exhausted => "exhausted",
        })
    }
}

/// A single cell that differs between two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellChange {
    pub pos: Pos,
    pub cell: Cell,
}

/// A tagged copy of the grid paired with the run status at that moment.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    grid: Grid,
    status: Status,
}

impl Snapshot {
    pub fn new(grid: Grid, status: Status) -> Self {
        Self { grid, status }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Cells the run has touched: `Visited` plus `Frontier`.
    pub fn explored(&self) -> usize {
        self.grid.count_tag(Tag::Visited) + self.grid.count_tag(Tag::Frontier)
    }

    /// Number of `Path`-tagged cells. Start and end carry no tag, so a
    /// reconstructed path of `n` cells shows up here as `n - 2`.
    pub fn path_len(&self) -> usize {
        self.grid.count_tag(Tag::Path)
    }

    /// Cells that differ from `prev`.
    ///
    /// If the two snapshots have different dimensions every cell is
    /// reported.
    pub fn changes_since(&self, prev: &Snapshot) -> Vec<CellChange> {
        if prev.grid.dims() != self.grid.dims() {
            return self
                .grid
                .iter()
                .map(|(pos, cell)| CellChange { pos, cell })
                .collect();
        }
        self.grid
            .iter()
            .zip(prev.grid.cells())
            .filter(|((_, cur), old)| cur != *old)
            .map(|((pos, cell), _)| CellChange { pos, cell })
            .collect()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.grid.fmt(f)
    }
}
