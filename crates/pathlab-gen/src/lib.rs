//! Grid generators for pathlab: perfect mazes and random obstacles.
//!
//! Randomness lives here and nowhere else in pathlab. Pass a seeded RNG to
//! [`MapGen`] to get reproducible grids.

pub mod error;
pub mod mapgen;

pub use error::MazeError;
pub use mapgen::{DEFAULT_DENSITY, MapGen, lattice_corners};
