use pathlab_core::{Grid, Pos};

use crate::neighbors::Neighbors;

/// Neighbour enumeration for search.
pub trait Pather {
    /// Passable, in-bounds orthogonal neighbours of `p`.
    fn neighbors(&self, p: Pos) -> Neighbors;
}

impl Pather for Grid {
    #[inline]
    fn neighbors(&self, p: Pos) -> Neighbors {
        Neighbors::cardinal(p, |n| self.is_passable(n))
    }
}
