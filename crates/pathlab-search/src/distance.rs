use pathlab_core::Pos;

/// Manhattan (L1) distance between two positions.
///
/// Admissible and consistent on a 4-connected grid with unit step cost.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}
