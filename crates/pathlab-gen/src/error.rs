use std::fmt;

use pathlab_core::Pos;

/// Errors from maze generation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MazeError {
    /// The grid has no odd-coordinate cell to carve from.
    TooSmall { rows: i32, cols: i32 },
    /// The requested origin is outside the grid or not on the odd lattice.
    OffLattice(Pos),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { rows, cols } => {
                write!(f, "maze: a {rows}x{cols} grid is too small, need at least 2x2")
            }
            Self::OffLattice(p) => write!(f, "maze: origin {p} is not an odd-coordinate cell"),
        }
    }
}

impl std::error::Error for MazeError {}
