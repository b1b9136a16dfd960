//! Configuration errors.

use std::fmt;

use crate::geom::Pos;

/// A grid or run configuration that cannot be searched.
///
/// Returned before any run state exists, so a failed setup never leaves a
/// half-initialised run behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Rows or columns are not positive.
    InvalidDimensions { rows: i32, cols: i32 },
    /// A position lies outside the grid.
    OutOfBounds(Pos),
    /// The start or end position is a wall.
    OnWall(Pos),
    /// Start and end are the same cell.
    SameStartEnd(Pos),
    /// No cell has the `Start` role.
    MissingStart,
    /// No cell has the `End` role.
    MissingEnd,
    /// More than one cell has the `Start` role.
    MultipleStarts,
    /// More than one cell has the `End` role.
    MultipleEnds,
    /// A text layout line differs in width from the first line.
    InconsistentWidth { line: usize },
    /// A text layout contains a character outside `.#SE`.
    InvalidChar { ch: char, pos: Pos },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "invalid grid dimensions {rows}x{cols}")
            }
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the grid"),
            Self::OnWall(p) => write!(f, "position {p} is a wall"),
            Self::SameStartEnd(p) => write!(f, "start and end are both {p}"),
            Self::MissingStart => f.write_str("grid has no start cell"),
            Self::MissingEnd => f.write_str("grid has no end cell"),
            Self::MultipleStarts => f.write_str("grid has more than one start cell"),
            Self::MultipleEnds => f.write_str("grid has more than one end cell"),
            Self::InconsistentWidth { line } => {
                write!(f, "layout line {line} has a different width")
            }
            Self::InvalidChar { ch, pos } => {
                write!(f, "layout contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
