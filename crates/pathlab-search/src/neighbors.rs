use std::ops::Deref;

use pathlab_core::Pos;

/// Up to four orthogonal neighbours of a cell, held inline.
///
/// Derefs to `[Pos]`, so it can be iterated and indexed like a slice
/// without touching the heap.
#[derive(Clone, Copy, Debug)]
pub struct Neighbors {
    buf: [Pos; 4],
    len: usize,
}

impl Neighbors {
    /// Neighbours of `p` in up, down, left, right order, keeping only those
    /// for which `keep` returns `true`.
    pub fn cardinal(p: Pos, keep: impl Fn(Pos) -> bool) -> Self {
        let mut out = Self {
            buf: [Pos::ZERO; 4],
            len: 0,
        };
        for n in p.neighbors_4() {
            if keep(n) {
                out.buf[out.len] = n;
                out.len += 1;
            }
        }
        out
    }

    #[inline]
    pub fn as_slice(&self) -> &[Pos] {
        &self.buf[..self.len]
    }
}

impl Deref for Neighbors {
    type Target = [Pos];

    #[inline]
    fn deref(&self) -> &[Pos] {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a Neighbors {
    type Item = &'a Pos;
    type IntoIter = std::slice::Iter<'a, Pos>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
