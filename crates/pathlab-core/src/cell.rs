//! The [`Cell`] type: a structural [`Role`] plus a transient exploration [`Tag`].

/// Structural role of a cell, set by whoever edits the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Empty,
    Wall,
    Start,
    End,
}

impl Role {
    /// Whether a search may step onto a cell with this role.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Role::Wall)
    }
}

/// Exploration state written by a search run. Only meaningful while a run
/// is active and only ever visible on [`Role::Empty`] cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tag {
    #[default]
    Unvisited,
    Frontier,
    Visited,
    Path,
}

/// A grid cell.
///
/// The tag can only be set through [`with_tag`](Cell::with_tag), which
/// leaves non-empty cells untouched, so walls and the start/end markers
/// always read back as `Tag::Unvisited`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    role: Role,
    tag: Tag,
}

impl Cell {
    pub const EMPTY: Self = Self::new(Role::Empty);
    pub const WALL: Self = Self::new(Role::Wall);

    /// An untagged cell with the given role.
    #[inline]
    pub const fn new(role: Role) -> Self {
        Self {
            role,
            tag: Tag::Unvisited,
        }
    }

    #[inline]
    pub const fn role(self) -> Role {
        self.role
    }

    #[inline]
    pub const fn tag(self) -> Tag {
        self.tag
    }

    /// Apply an exploration tag (builder). No-op unless the role is `Empty`.
    #[inline]
    pub const fn with_tag(mut self, tag: Tag) -> Self {
        if matches!(self.role, Role::Empty) {
            self.tag = tag;
        }
        self
    }

    /// Glyph used by the text layout format and `Display` impls.
    pub const fn glyph(self) -> char {
        match self.role {
            Role::Wall => '#',
            Role::Start => 'S',
            Role::End => 'E',
            Role::Empty => match self.tag {
                Tag::Unvisited => '.',
                Tag::Frontier => '+',
                Tag::Visited => 'o',
                Tag::Path => '*',
            },
        }
    }
}

impl From<Role> for Cell {
    #[inline]
    fn from(role: Role) -> Self {
        Self::new(role)
    }
}
