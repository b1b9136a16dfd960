//! The [`Grid`] type: a fixed-size matrix of [`Cell`]s.
//!
//! A `Grid` owns its cells outright. Snapshots are plain clones with
//! exploration tags applied, so a renderer holding one can never observe a
//! later edit.

use std::fmt;

use crate::cell::{Cell, Role, Tag};
use crate::error::ConfigError;
use crate::geom::{Dims, Pos};

/// Default grid height used by the browser visualizer.
pub const DEFAULT_ROWS: i32 = 25;
/// Default grid width used by the browser visualizer.
pub const DEFAULT_COLS: i32 = 40;

/// A `rows x cols` matrix of cells stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct Grid {
    dims: Dims,
    cells: Vec<Cell>,
}

/// Unchecked wire form of a [`Grid`], validated on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    dims: Dims,
    cells: Vec<Cell>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for Grid {
    type Error = ConfigError;

    fn try_from(raw: RawGrid) -> Result<Self, ConfigError> {
        let Dims { rows, cols } = raw.dims;
        if raw.dims.is_empty() || raw.cells.len() != raw.dims.len() {
            return Err(ConfigError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            dims: raw.dims,
            cells: raw.cells,
        })
    }
}

impl Grid {
    /// Create an all-empty grid.
    pub fn new(rows: i32, cols: i32) -> Result<Self, ConfigError> {
        let dims = Dims::new(rows, cols);
        if dims.is_empty() {
            return Err(ConfigError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            dims,
            cells: vec![Cell::EMPTY; dims.len()],
        })
    }

    /// Parse a text layout.
    ///
    /// One line per row: `.` empty, `#` wall, `S` start, `E` end. Every
    /// line must have the same width. Leading and trailing whitespace of
    /// the whole string is trimmed, as is surrounding whitespace on each
    /// line, so layouts can be indented inside raw string literals.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let lines: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let rows = lines.len() as i32;
        let cols = lines.first().map_or(0, |l| l.chars().count()) as i32;
        let mut grid = Self::new(rows, cols)?;

        for (r, line) in lines.iter().enumerate() {
            if line.chars().count() as i32 != cols {
                return Err(ConfigError::InconsistentWidth { line: r });
            }
            for (c, ch) in line.chars().enumerate() {
                let pos = Pos::new(r as i32, c as i32);
                let role = match ch {
                    '.' => Role::Empty,
                    '#' => Role::Wall,
                    'S' => Role::Start,
                    'E' => Role::End,
                    _ => return Err(ConfigError::InvalidChar { ch, pos }),
                };
                grid.set_role(pos, role);
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.dims.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.dims.cols
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed grid; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.dims.contains(p)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Pos) -> Option<Cell> {
        self.dims.idx(p).and_then(|i| self.cells.get(i).copied())
    }

    /// The role at `p`, or `None` if out of bounds.
    #[inline]
    pub fn role(&self, p: Pos) -> Option<Role> {
        self.at(p).map(Cell::role)
    }

    /// Whether `p` is in bounds and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Pos) -> bool {
        self.role(p).is_some_and(Role::is_passable)
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Overwrite the role at `p`, clearing its tag. Returns `false` if `p`
    /// is out of bounds.
    ///
    /// This is the raw editing primitive: it does not keep Start/End unique.
    /// Use [`move_start`](Self::move_start) and [`move_end`](Self::move_end)
    /// for that.
    pub fn set_role(&mut self, p: Pos, role: Role) -> bool {
        match self.dims.idx(p) {
            Some(i) => {
                self.cells[i] = Cell::new(role);
                true
            }
            None => false,
        }
    }

    /// Make `p` the only `Start` cell. The previous start becomes `Empty`.
    ///
    /// Refuses to overwrite a wall or the end cell.
    pub fn move_start(&mut self, p: Pos) -> Result<(), ConfigError> {
        self.move_unique(p, Role::Start, Role::End)
    }

    /// Make `p` the only `End` cell. The previous end becomes `Empty`.
    ///
    /// Refuses to overwrite a wall or the start cell.
    pub fn move_end(&mut self, p: Pos) -> Result<(), ConfigError> {
        self.move_unique(p, Role::End, Role::Start)
    }

    fn move_unique(&mut self, p: Pos, role: Role, other: Role) -> Result<(), ConfigError> {
        match self.role(p) {
            None => return Err(ConfigError::OutOfBounds(p)),
            Some(Role::Wall) => return Err(ConfigError::OnWall(p)),
            Some(r) if r == other => return Err(ConfigError::SameStartEnd(p)),
            Some(_) => {}
        }
        for c in self.cells.iter_mut() {
            if c.role() == role {
                *c = Cell::EMPTY;
            }
        }
        self.set_role(p, role);
        Ok(())
    }

    /// First `Start` cell in row-major order.
    pub fn start(&self) -> Option<Pos> {
        self.find(Role::Start)
    }

    /// First `End` cell in row-major order.
    pub fn end(&self) -> Option<Pos> {
        self.find(Role::End)
    }

    fn find(&self, role: Role) -> Option<Pos> {
        self.cells
            .iter()
            .position(|c| c.role() == role)
            .map(|i| self.dims.pos(i))
    }

    /// The unique start and end positions.
    pub fn endpoints(&self) -> Result<(Pos, Pos), ConfigError> {
        let start = match self.count_role(Role::Start) {
            0 => return Err(ConfigError::MissingStart),
            1 => self.start(),
            _ => return Err(ConfigError::MultipleStarts),
        };
        let end = match self.count_role(Role::End) {
            0 => return Err(ConfigError::MissingEnd),
            1 => self.end(),
            _ => return Err(ConfigError::MultipleEnds),
        };
        match (start, end) {
            (Some(s), Some(e)) => Ok((s, e)),
            (None, _) => Err(ConfigError::MissingStart),
            (_, None) => Err(ConfigError::MissingEnd),
        }
    }

    /// Set every cell to `role`.
    pub fn fill(&mut self, role: Role) {
        self.cells.fill(Cell::new(role));
    }

    /// Turn every wall into an empty cell, leaving Start/End in place.
    pub fn clear_walls(&mut self) {
        for c in self.cells.iter_mut() {
            if c.role() == Role::Wall {
                *c = Cell::EMPTY;
            }
        }
    }

    /// Count cells with the given role.
    pub fn count_role(&self, role: Role) -> usize {
        self.cells.iter().filter(|c| c.role() == role).count()
    }

    /// Count cells with the given tag.
    pub fn count_tag(&self, tag: Tag) -> usize {
        self.cells.iter().filter(|c| c.tag() == tag).count()
    }

    /// Copy of this grid with `tags[i]` applied to cell `i`.
    ///
    /// Tags on non-empty cells are dropped by [`Cell::with_tag`]. Missing
    /// entries (when `tags` is shorter than the grid) leave cells untagged.
    pub fn with_tags(&self, tags: &[Tag]) -> Grid {
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let tag = tags.get(i).copied().unwrap_or_default();
                Cell::new(c.role()).with_tag(tag)
            })
            .collect();
        Grid {
            dims: self.dims,
            cells,
        }
    }

    /// Reset every exploration tag to `Unvisited`.
    pub fn reset_tags(&mut self) {
        for c in self.cells.iter_mut() {
            *c = Cell::new(c.role());
        }
    }

    /// Row-major iterator over `(Pos, Cell)` pairs.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Pos, Cell)> + '_ {
        let dims = self.dims;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (dims.pos(i), *c))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.dims.cols.max(1) as usize).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for c in row {
                write!(f, "{}", c.glyph())?;
            }
        }
        Ok(())
    }
}
