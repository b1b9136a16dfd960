//! **pathlab-core** — grid model for step-driven pathfinding.
//!
//! This crate provides the types every other pathlab crate shares: geometry
//! ([`Pos`], [`Dims`]), cells that keep their structural [`Role`] apart from
//! the transient exploration [`Tag`] a search writes, the fixed-size
//! [`Grid`], and the read-only [`Snapshot`] a search emits after each step.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod snapshot;

pub use cell::{Cell, Role, Tag};
pub use error::ConfigError;
pub use geom::{Dims, Pos};
pub use grid::{DEFAULT_COLS, DEFAULT_ROWS, Grid};
pub use snapshot::{CellChange, Snapshot, Status};
