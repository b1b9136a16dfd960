use pathlab_core::{Pos, Status, Tag};

use crate::stepper::{NO_PARENT, Stepper};

impl Stepper<'_> {
    /// Walk parent links back from the end cell and return the full path,
    /// start and end included.
    ///
    /// Returns `None` unless the run is `Found`. Every cell on the path is
    /// tagged `Path` in later snapshots, replacing its `Visited` or
    /// `Frontier` tag; cells with the Start/End role keep their marker.
    pub fn reconstruct_path(&mut self) -> Option<Vec<Pos>> {
        if self.status != Status::Found {
            return None;
        }
        let dims = self.grid().dims();
        let mut path = Vec::new();
        let mut ci = self.end;
        while ci != NO_PARENT {
            self.tags[ci] = Tag::Path;
            path.push(dims.pos(ci));
            ci = self.parent[ci];
        }
        debug_assert_eq!(path.last().copied(), Some(dims.pos(self.start)));
        path.reverse();
        log::debug!("{} path: {} cells", self.algorithm(), path.len());
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Algorithm, Stepper};
    use pathlab_core::{Grid, Pos, Status, Tag};

    #[test]
    fn path_overrides_visited_tags() {
        let grid = Grid::parse(
            "
            S...
            .##.
            ...E
            ",
        )
        .unwrap();
        let mut run = Stepper::from_roles(&grid, Algorithm::Bfs).unwrap();
        assert!(run.reconstruct_path().is_none());
        assert_eq!(run.run_to_end(), Status::Found);

        let before = run.snapshot();
        let path = run.reconstruct_path().unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path[0], Pos::new(0, 0));
        assert_eq!(path[5], Pos::new(2, 3));

        let after = run.snapshot();
        assert_eq!(after.path_len(), 4);
        for p in &path[1..5] {
            assert_eq!(after.grid().at(*p).map(|c| c.tag()), Some(Tag::Path));
        }
        // Only path cells changed.
        let changes = after.changes_since(&before);
        assert!(changes.len() <= 4);
        assert!(changes.iter().all(|c| c.cell.tag() == Tag::Path));
    }

    #[test]
    fn reconstruct_is_repeatable() {
        let grid = Grid::parse("S.\n.E").unwrap();
        let mut run = Stepper::from_roles(&grid, Algorithm::AStar).unwrap();
        run.run_to_end();
        let a = run.reconstruct_path();
        let b = run.reconstruct_path();
        assert!(a.is_some());
        assert_eq!(a, b);
    }
}
