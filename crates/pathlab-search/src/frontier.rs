//! Frontier ordering policies.
//!
//! Cells are identified by their flat grid index. Every policy allows the
//! same index to be pushed more than once; callers skip entries for cells
//! that were already closed when they pop them.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// The pending-expansion collection of a search run.
pub trait Frontier {
    /// Add `idx` with ordering key `key`. Policies that do not order by key
    /// ignore it.
    fn push(&mut self, idx: usize, key: u32);

    /// Remove and return the next index, or `None` if empty.
    fn pop(&mut self) -> Option<usize>;

    /// Number of pending entries, duplicates included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether at least one entry for `idx` is pending.
    fn contains(&self, idx: usize) -> bool;
}

/// Per-index count of pending entries, backing [`Frontier::contains`].
#[derive(Clone, Debug)]
struct Pending(Vec<u32>);

impl Pending {
    fn new(len: usize) -> Self {
        Self(vec![0; len])
    }

    #[inline]
    fn add(&mut self, idx: usize) {
        self.0[idx] += 1;
    }

    #[inline]
    fn remove(&mut self, idx: usize) {
        self.0[idx] = self.0[idx].saturating_sub(1);
    }

    #[inline]
    fn contains(&self, idx: usize) -> bool {
        self.0.get(idx).is_some_and(|&n| n > 0)
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    key: u32,
    seq: u64,
    idx: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest key first, and among
        // equal keys the smallest sequence number.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

const NO_SEQ: u64 = u64::MAX;

/// Min-key frontier for A* and Dijkstra.
///
/// Pops the entry with the globally smallest key. Equal keys pop in the
/// order their cells were first pushed: a cell re-pushed with an improved
/// key keeps its original sequence number, so it ranks among its equals as
/// if it had been updated in place.
#[derive(Clone, Debug)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Entry>,
    first_seq: Vec<u64>,
    next_seq: u64,
    pending: Pending,
}

impl PriorityFrontier {
    /// A frontier for a grid of `len` cells.
    pub fn new(len: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            first_seq: vec![NO_SEQ; len],
            next_seq: 0,
            pending: Pending::new(len),
        }
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, idx: usize, key: u32) {
        let seq = match self.first_seq[idx] {
            NO_SEQ => {
                let s = self.next_seq;
                self.next_seq += 1;
                self.first_seq[idx] = s;
                s
            }
            s => s,
        };
        self.pending.add(idx);
        self.heap.push(Entry { key, seq, idx });
    }

    fn pop(&mut self) -> Option<usize> {
        let e = self.heap.pop()?;
        self.pending.remove(e.idx);
        Some(e.idx)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn contains(&self, idx: usize) -> bool {
        self.pending.contains(idx)
    }
}

// ---------------------------------------------------------------------------
// FIFO / LIFO
// ---------------------------------------------------------------------------

/// First-in first-out frontier for breadth-first search.
#[derive(Clone, Debug)]
pub struct FifoFrontier {
    queue: VecDeque<usize>,
    pending: Pending,
}

impl FifoFrontier {
    pub fn new(len: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            pending: Pending::new(len),
        }
    }
}

impl Frontier for FifoFrontier {
    fn push(&mut self, idx: usize, _key: u32) {
        self.pending.add(idx);
        self.queue.push_back(idx);
    }

    fn pop(&mut self) -> Option<usize> {
        let idx = self.queue.pop_front()?;
        self.pending.remove(idx);
        Some(idx)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn contains(&self, idx: usize) -> bool {
        self.pending.contains(idx)
    }
}

/// Last-in first-out frontier for depth-first search.
#[derive(Clone, Debug)]
pub struct LifoFrontier {
    stack: Vec<usize>,
    pending: Pending,
}

impl LifoFrontier {
    pub fn new(len: usize) -> Self {
        Self {
            stack: Vec::new(),
            pending: Pending::new(len),
        }
    }
}

impl Frontier for LifoFrontier {
    fn push(&mut self, idx: usize, _key: u32) {
        self.pending.add(idx);
        self.stack.push(idx);
    }

    fn pop(&mut self) -> Option<usize> {
        let idx = self.stack.pop()?;
        self.pending.remove(idx);
        Some(idx)
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn contains(&self, idx: usize) -> bool {
        self.pending.contains(idx)
    }
}
