//! Step-driven grid search.
//!
//! A [`Stepper`] runs one of four strategies over a borrowed
//! [`Grid`](pathlab_core::Grid), one pop-and-expand cycle per
//! [`step`](Stepper::step):
//!
//! | [`Algorithm`] | Frontier | Shortest path |
//! |---|---|---|
//! | `AStar` | [`PriorityFrontier`] keyed by cost + Manhattan distance | yes |
//! | `Dijkstra` | [`PriorityFrontier`] keyed by cost | yes |
//! | `Bfs` | [`FifoFrontier`] | yes |
//! | `Dfs` | [`LifoFrontier`] | no |
//!
//! Moves are 4-directional with unit cost. Nothing here is random: the same
//! grid, endpoints and algorithm always produce the same snapshot sequence.

mod distance;
mod frontier;
mod neighbors;
mod path;
mod stepper;
mod traits;

pub use distance::manhattan;
pub use frontier::{FifoFrontier, Frontier, LifoFrontier, PriorityFrontier};
pub use neighbors::Neighbors;
pub use stepper::{Algorithm, RunStats, Snapshots, Stepper, UNREACHABLE};
pub use traits::Pather;
