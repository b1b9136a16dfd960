//! The step-driven search state machine.

use std::fmt;

use pathlab_core::{ConfigError, Grid, Pos, Snapshot, Status, Tag};

use crate::distance::manhattan;
use crate::frontier::{FifoFrontier, Frontier, LifoFrontier, PriorityFrontier};
use crate::traits::Pather;

/// Sentinel cost for cells no run has reached.
pub const UNREACHABLE: u32 = u32::MAX;

pub(crate) const NO_PARENT: usize = usize::MAX;

/// Search strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    AStar,
    Dijkstra,
    Bfs,
    Dfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::AStar,
        Algorithm::Dijkstra,
        Algorithm::Bfs,
        Algorithm::Dfs,
    ];

    /// Whether the strategy relaxes costs (A*, Dijkstra) rather than
    /// keeping the first discovery.
    #[inline]
    pub const fn is_weighted(self) -> bool {
        matches!(self, Algorithm::AStar | Algorithm::Dijkstra)
    }

    /// Remaining-cost estimate from `p` to `goal`. Zero for all but A*.
    #[inline]
    pub fn heuristic(self, p: Pos, goal: Pos) -> u32 {
        match self {
            Algorithm::AStar => manhattan(p, goal),
            _ => 0,
        }
    }

    fn frontier(self, len: usize) -> Box<dyn Frontier> {
        match self {
            Algorithm::AStar | Algorithm::Dijkstra => Box::new(PriorityFrontier::new(len)),
            Algorithm::Bfs => Box::new(FifoFrontier::new(len)),
            Algorithm::Dfs => Box::new(LifoFrontier::new(len)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::AStar => "A*",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
        })
    }
}

/// Counters describing how much work a run has done.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    /// Cells popped and expanded (closed).
    pub expanded: usize,
    /// Frontier pushes, the start cell included.
    pub pushed: usize,
    /// Popped entries discarded because their cell was already closed.
    pub skipped: usize,
}

/// One search run over a borrowed grid.
///
/// Construction is the `Idle -> Running` transition; every [`step`] pops
/// and expands exactly one cell until the run is `Found` or `Exhausted`,
/// after which further steps change nothing. The grid stays borrowed for
/// the whole run, so it cannot be edited underneath the run's bookkeeping.
/// Dropping the stepper (or calling [`cancel`]) discards the run.
///
/// [`step`]: Stepper::step
/// [`cancel`]: Stepper::cancel
pub struct Stepper<'g> {
    grid: &'g Grid,
    algorithm: Algorithm,
    pub(crate) start: usize,
    pub(crate) end: usize,
    goal: Pos,
    pub(crate) status: Status,
    cost: Vec<u32>,
    priority: Vec<u32>,
    pub(crate) parent: Vec<usize>,
    closed: Vec<bool>,
    pub(crate) tags: Vec<Tag>,
    frontier: Box<dyn Frontier>,
    stats: RunStats,
}

impl<'g> Stepper<'g> {
    /// Begin a run from `start` to `end`.
    ///
    /// Fails if either position is outside the grid or a wall, or if they
    /// coincide.
    pub fn start(
        grid: &'g Grid,
        start: Pos,
        end: Pos,
        algorithm: Algorithm,
    ) -> Result<Self, ConfigError> {
        let dims = grid.dims();
        if dims.is_empty() || grid.len() != dims.len() {
            return Err(ConfigError::InvalidDimensions {
                rows: dims.rows,
                cols: dims.cols,
            });
        }
        let start_idx = dims.idx(start).ok_or(ConfigError::OutOfBounds(start))?;
        let end_idx = dims.idx(end).ok_or(ConfigError::OutOfBounds(end))?;
        if start == end {
            return Err(ConfigError::SameStartEnd(start));
        }
        for p in [start, end] {
            if !grid.is_passable(p) {
                return Err(ConfigError::OnWall(p));
            }
        }

        let len = dims.len();
        let mut run = Self {
            grid,
            algorithm,
            start: start_idx,
            end: end_idx,
            goal: end,
            status: Status::Running,
            cost: vec![UNREACHABLE; len],
            priority: vec![UNREACHABLE; len],
            parent: vec![NO_PARENT; len],
            closed: vec![false; len],
            tags: vec![Tag::Unvisited; len],
            frontier: algorithm.frontier(len),
            stats: RunStats::default(),
        };
        run.cost[start_idx] = 0;
        run.priority[start_idx] = algorithm.heuristic(start, end);
        run.frontier.push(start_idx, run.priority[start_idx]);
        run.tags[start_idx] = Tag::Frontier;
        run.stats.pushed = 1;

        log::debug!("{algorithm} started: {start} -> {end} on {dims}");
        Ok(run)
    }

    /// Begin a run between the grid's unique `Start` and `End` cells.
    pub fn from_roles(grid: &'g Grid, algorithm: Algorithm) -> Result<Self, ConfigError> {
        let (start, end) = grid.endpoints()?;
        Self::start(grid, start, end, algorithm)
    }

    /// Perform one pop-and-expand cycle and return the resulting status.
    ///
    /// This is [`step`](Self::step) without building a snapshot.
    pub fn advance(&mut self) -> Status {
        if self.status.is_terminal() {
            return self.status;
        }

        let current = loop {
            match self.frontier.pop() {
                None => {
                    self.finish(Status::Exhausted);
                    return self.status;
                }
                Some(i) if self.closed[i] => self.stats.skipped += 1,
                Some(i) => break i,
            }
        };

        if current == self.end {
            self.finish(Status::Found);
            return self.status;
        }

        self.closed[current] = true;
        self.tags[current] = Tag::Visited;
        self.stats.expanded += 1;

        let dims = self.grid.dims();
        let cp = dims.pos(current);
        let next_cost = self.cost[current] + 1;
        log::trace!("{} expands {cp} at cost {}", self.algorithm, self.cost[current]);

        for &np in self.grid.neighbors(cp).iter() {
            let Some(ni) = dims.idx(np) else {
                continue;
            };
            if self.closed[ni] {
                continue;
            }
            let push = match self.algorithm {
                Algorithm::AStar | Algorithm::Dijkstra => next_cost < self.cost[ni],
                Algorithm::Bfs => self.cost[ni] == UNREACHABLE,
                // Pushed again even if already on the stack; the latest
                // discoverer becomes the parent.
                Algorithm::Dfs => true,
            };
            if !push {
                continue;
            }
            self.cost[ni] = next_cost;
            self.parent[ni] = current;
            self.priority[ni] = next_cost + self.algorithm.heuristic(np, self.goal);
            self.frontier.push(ni, self.priority[ni]);
            self.tags[ni] = Tag::Frontier;
            self.stats.pushed += 1;
        }

        self.status
    }

    /// Perform one pop-and-expand cycle and return a snapshot of the result.
    ///
    /// On a finished run this re-emits the terminal snapshot.
    pub fn step(&mut self) -> Snapshot {
        self.advance();
        self.snapshot()
    }

    /// Step until the run is `Found` or `Exhausted`.
    pub fn run_to_end(&mut self) -> Status {
        while !self.advance().is_terminal() {}
        self.status
    }

    /// Discard the run, releasing the grid.
    pub fn cancel(self) {
        log::debug!(
            "{} cancelled after {} expansions",
            self.algorithm,
            self.stats.expanded
        );
    }

    /// A tagged copy of the grid reflecting the current run state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.grid.with_tags(&self.tags), self.status)
    }

    /// Consume the run, yielding one snapshot per step up to and including
    /// the terminal one.
    pub fn into_snapshots(self) -> Snapshots<'g> {
        Snapshots {
            run: self,
            done: false,
        }
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn start_pos(&self) -> Pos {
        self.grid.dims().pos(self.start)
    }

    pub fn end_pos(&self) -> Pos {
        self.goal
    }

    /// Best known cost from the start to `p`, if reached.
    pub fn cost_at(&self, p: Pos) -> Option<u32> {
        let i = self.grid.dims().idx(p)?;
        match self.cost[i] {
            UNREACHABLE => None,
            c => Some(c),
        }
    }

    /// Whether `p` has been expanded.
    pub fn is_closed(&self, p: Pos) -> bool {
        self.grid.dims().idx(p).is_some_and(|i| self.closed[i])
    }

    /// Whether `p` has a pending frontier entry.
    pub fn in_frontier(&self, p: Pos) -> bool {
        self.grid
            .dims()
            .idx(p)
            .is_some_and(|i| self.frontier.contains(i))
    }

    /// Current predecessor of `p`.
    pub fn parent_of(&self, p: Pos) -> Option<Pos> {
        let i = self.grid.dims().idx(p)?;
        match self.parent[i] {
            NO_PARENT => None,
            pi => Some(self.grid.dims().pos(pi)),
        }
    }

    fn finish(&mut self, status: Status) {
        self.status = status;
        log::debug!(
            "{} {status}: expanded {}, pushed {}, skipped {}",
            self.algorithm,
            self.stats.expanded,
            self.stats.pushed,
            self.stats.skipped
        );
    }
}

/// Iterator returned by [`Stepper::into_snapshots`].
pub struct Snapshots<'g> {
    run: Stepper<'g>,
    done: bool,
}

impl<'g> Snapshots<'g> {
    /// The underlying run, e.g. to reconstruct the path once iteration ends.
    pub fn into_inner(self) -> Stepper<'g> {
        self.run
    }
}

impl Iterator for Snapshots<'_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        if self.done {
            return None;
        }
        let snap = self.run.step();
        self.done = snap.status().is_terminal();
        Some(snap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathlab_core::Role;
    use std::collections::VecDeque;

    /// Brute-force BFS distance used as ground truth.
    fn oracle(grid: &Grid, from: Pos, to: Pos) -> Option<u32> {
        let dims = grid.dims();
        let mut dist = vec![UNREACHABLE; dims.len()];
        let mut queue = VecDeque::new();
        dist[dims.idx(from)?] = 0;
        queue.push_back(from);
        while let Some(p) = queue.pop_front() {
            let d = dist[dims.idx(p)?];
            if p == to {
                return Some(d);
            }
            for &n in grid.neighbors(p).iter() {
                let ni = dims.idx(n)?;
                if dist[ni] == UNREACHABLE {
                    dist[ni] = d + 1;
                    queue.push_back(n);
                }
            }
        }
        None
    }

    fn assert_valid_path(grid: &Grid, path: &[Pos], from: Pos, to: Pos) {
        assert_eq!(path.first(), Some(&from));
        assert_eq!(path.last(), Some(&to));
        for w in path.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1, "{} -> {} is not a move", w[0], w[1]);
        }
        for p in path {
            assert!(grid.is_passable(*p), "{p} is a wall");
        }
    }

    const LAYOUTS: [&str; 4] = [
        "
        S....
        .###.
        .#...
        .#.#.
        ...#E
        ",
        "
        S#......
        .#.####.
        .#.#..#.
        ...#.##.
        ####....
        E.......
        ",
        "
        ..........
        .########.
        .#......#.
        .#.####.#.
        .#.#E.#.#.
        .#.#..#.#.
        .#.##.#.#.
        .#....#...
        .######.#.
        S.......#.
        ",
        "
        S..#...
        .#.#.#.
        .#...#E
        ",
    ];

    #[test]
    fn open_grid_scenario() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.move_start(Pos::new(0, 0)).unwrap();
        grid.move_end(Pos::new(4, 4)).unwrap();
        for algo in [Algorithm::AStar, Algorithm::Dijkstra, Algorithm::Bfs] {
            let mut run = Stepper::from_roles(&grid, algo).unwrap();
            assert_eq!(run.run_to_end(), Status::Found, "{algo}");
            let path = run.reconstruct_path().unwrap();
            assert_eq!(path.len(), 9, "{algo}");
            assert_valid_path(&grid, &path, Pos::new(0, 0), Pos::new(4, 4));

            let snap = run.snapshot();
            assert_eq!(snap.status(), Status::Found);
            assert_eq!(snap.path_len(), 7);
            assert!(snap.explored() <= 25);
        }
    }

    #[test]
    fn weighted_and_bfs_paths_are_shortest() {
        for layout in LAYOUTS {
            let grid = Grid::parse(layout).unwrap();
            let (s, e) = grid.endpoints().unwrap();
            let want = oracle(&grid, s, e).unwrap() as usize + 1;
            for algo in [Algorithm::AStar, Algorithm::Dijkstra, Algorithm::Bfs] {
                let mut run = Stepper::start(&grid, s, e, algo).unwrap();
                assert_eq!(run.run_to_end(), Status::Found);
                let path = run.reconstruct_path().unwrap();
                assert_eq!(path.len(), want, "{algo} on\n{grid}");
                assert_valid_path(&grid, &path, s, e);
                assert_eq!(run.cost_at(e), Some(want as u32 - 1));
            }
        }
    }

    #[test]
    fn dfs_finds_a_path_but_not_necessarily_shortest() {
        for layout in LAYOUTS {
            let grid = Grid::parse(layout).unwrap();
            let (s, e) = grid.endpoints().unwrap();
            let shortest = oracle(&grid, s, e).unwrap() as usize + 1;
            let mut run = Stepper::start(&grid, s, e, Algorithm::Dfs).unwrap();
            assert_eq!(run.run_to_end(), Status::Found);
            let path = run.reconstruct_path().unwrap();
            assert!(path.len() >= shortest);
            assert_valid_path(&grid, &path, s, e);
        }
    }

    #[test]
    fn dfs_repushes_cells_already_on_the_stack() {
        let grid = Grid::parse(
            "
            S..
            ...
            ..E
            ",
        )
        .unwrap();
        let mut run = Stepper::from_roles(&grid, Algorithm::Dfs).unwrap();
        assert_eq!(run.run_to_end(), Status::Found);
        let path = run.reconstruct_path().unwrap();
        // (1,1), (1,0), (2,1) and (2,2) are each pushed twice; the later
        // push wins, which snakes the path through every cell.
        let want: Vec<Pos> = [(0, 0), (0, 1), (0, 2), (1, 2), (1, 1), (1, 0), (2, 0), (2, 1), (2, 2)]
            .into_iter()
            .map(|(r, c)| Pos::new(r, c))
            .collect();
        assert_eq!(path, want);
        assert_eq!(
            run.stats(),
            RunStats {
                expanded: 8,
                pushed: 13,
                skipped: 0
            }
        );
    }

    #[test]
    fn astar_closes_cells_at_their_true_distance() {
        for layout in LAYOUTS {
            let grid = Grid::parse(layout).unwrap();
            let (s, e) = grid.endpoints().unwrap();
            let mut run = Stepper::start(&grid, s, e, Algorithm::AStar).unwrap();
            let mut closed_at: Vec<Option<u32>> = vec![None; grid.len()];
            while !run.advance().is_terminal() {
                for p in grid.dims() {
                    let i = grid.dims().idx(p).unwrap();
                    if !run.is_closed(p) {
                        continue;
                    }
                    let c = run.cost_at(p);
                    match closed_at[i] {
                        None => closed_at[i] = c,
                        // A closed cell never gets a different cost.
                        Some(prev) => assert_eq!(Some(prev), c),
                    }
                }
            }
            for (i, c) in closed_at.iter().enumerate() {
                if let Some(c) = c {
                    let p = grid.dims().pos(i);
                    assert_eq!(Some(*c), oracle(&grid, s, p), "{p}");
                }
            }
        }
    }

    #[test]
    fn astar_expands_less_than_dijkstra_on_open_corridor() {
        let grid = Grid::parse(
            "
            .........
            .........
            S.......E
            .........
            .........
            ",
        )
        .unwrap();
        let mut a = Stepper::from_roles(&grid, Algorithm::AStar).unwrap();
        let mut d = Stepper::from_roles(&grid, Algorithm::Dijkstra).unwrap();
        assert_eq!(a.run_to_end(), Status::Found);
        assert_eq!(d.run_to_end(), Status::Found);
        assert_eq!(a.stats().expanded, 8);
        assert!(a.stats().expanded < d.stats().expanded);
    }

    #[test]
    fn unreachable_end_exhausts() {
        let grid = Grid::parse(
            "
            S..#.
            ...#.
            ####E
            ",
        )
        .unwrap();
        for algo in Algorithm::ALL {
            let mut run = Stepper::from_roles(&grid, algo).unwrap();
            assert_eq!(run.run_to_end(), Status::Exhausted, "{algo}");
            assert_eq!(run.stats().expanded, 6);
            assert!(run.reconstruct_path().is_none());
            let snap = run.snapshot();
            assert_eq!(snap.path_len(), 0);
            assert_eq!(snap.grid().count_tag(Tag::Visited), 5);
        }
    }

    #[test]
    fn terminal_state_is_absorbing() {
        let grid = Grid::parse("S.E").unwrap();
        let mut run = Stepper::from_roles(&grid, Algorithm::Bfs).unwrap();
        let first = run.step();
        assert_eq!(first.status(), Status::Running);
        assert_eq!(first.to_string(), "S+E");
        let mut last = run.step();
        while !last.status().is_terminal() {
            last = run.step();
        }
        assert_eq!(last.status(), Status::Found);
        let stats = run.stats();
        assert_eq!(run.step(), last);
        assert_eq!(run.advance(), Status::Found);
        assert_eq!(run.stats(), stats);
    }

    #[test]
    fn frontier_and_visited_tags() {
        let grid = Grid::parse(
            "
            ...
            .S.
            ..E
            ",
        )
        .unwrap();
        let mut run = Stepper::from_roles(&grid, Algorithm::Bfs).unwrap();
        let snap = run.step();
        // Start keeps its marker; its four neighbours are on the frontier.
        assert_eq!(snap.to_string(), ".+.\n+S+\n.+E");
        assert!(run.in_frontier(Pos::new(0, 1)));
        assert!(run.is_closed(Pos::new(1, 1)));
        assert_eq!(run.parent_of(Pos::new(1, 0)), Some(Pos::new(1, 1)));
        assert_eq!(run.parent_of(Pos::new(1, 1)), None);

        let snap = run.step();
        assert_eq!(snap.to_string(), "+o+\n+S+\n.+E");
        assert_eq!(snap.explored(), 6);
    }

    #[test]
    fn identical_runs_emit_identical_snapshots() {
        let grid = Grid::parse(LAYOUTS[2]).unwrap();
        for algo in Algorithm::ALL {
            let a: Vec<Snapshot> = Stepper::from_roles(&grid, algo)
                .unwrap()
                .into_snapshots()
                .collect();
            let b: Vec<Snapshot> = Stepper::from_roles(&grid, algo)
                .unwrap()
                .into_snapshots()
                .collect();
            assert!(!a.is_empty());
            assert_eq!(a, b, "{algo}");
            assert_eq!(a.last().map(Snapshot::status), Some(Status::Found));
        }
    }

    #[test]
    fn snapshot_sequence_is_bounded_by_reachable_cells() {
        let grid = Grid::parse(LAYOUTS[1]).unwrap();
        let passable = grid.len() - grid.count_role(Role::Wall);
        for algo in Algorithm::ALL {
            let n = Stepper::from_roles(&grid, algo)
                .unwrap()
                .into_snapshots()
                .count();
            assert!(n <= passable + 1, "{algo}: {n} steps");
        }
    }

    #[test]
    fn rejects_invalid_configuration() {
        let grid = Grid::parse(
            "
            S.#
            ..E
            ",
        )
        .unwrap();
        let s = Pos::new(0, 0);
        assert_eq!(
            Stepper::start(&grid, s, s, Algorithm::Bfs).err(),
            Some(ConfigError::SameStartEnd(s))
        );
        assert_eq!(
            Stepper::start(&grid, s, Pos::new(0, 2), Algorithm::AStar).err(),
            Some(ConfigError::OnWall(Pos::new(0, 2)))
        );
        assert_eq!(
            Stepper::start(&grid, Pos::new(-1, 0), s, Algorithm::Dfs).err(),
            Some(ConfigError::OutOfBounds(Pos::new(-1, 0)))
        );
        let no_end = Grid::parse("S..").unwrap();
        assert_eq!(
            Stepper::from_roles(&no_end, Algorithm::Dijkstra).err(),
            Some(ConfigError::MissingEnd)
        );
    }

    #[test]
    fn endpoints_need_not_carry_roles() {
        let grid = Grid::new(1, 4).unwrap();
        let mut run =
            Stepper::start(&grid, Pos::new(0, 0), Pos::new(0, 3), Algorithm::AStar).unwrap();
        assert_eq!(run.run_to_end(), Status::Found);
        assert_eq!(run.reconstruct_path().map(|p| p.len()), Some(4));
        // Without Start/End roles the endpoints are tagged like any other
        // chain cell.
        assert_eq!(run.snapshot().to_string(), "****");
        assert_eq!(run.snapshot().path_len(), 4);
    }

    #[test]
    fn cancel_releases_the_grid() {
        let mut grid = Grid::parse("S...E").unwrap();
        let mut run = Stepper::from_roles(&grid, Algorithm::Dfs).unwrap();
        run.step();
        run.cancel();
        // The grid can be edited again once the run is gone.
        grid.set_role(Pos::new(0, 2), Role::Wall);
        let mut run = Stepper::from_roles(&grid, Algorithm::Dfs).unwrap();
        assert_eq!(run.run_to_end(), Status::Exhausted);
    }
}
