//! Terminal demo: solve a random maze and a sprinkled grid with every
//! algorithm and print the final snapshots.
//!
//! Run: cargo run --bin pathlab-demo -- [seed]

use pathlab_core::{DEFAULT_COLS, DEFAULT_ROWS, Grid, Pos, Role, Status};
use pathlab_gen::{DEFAULT_DENSITY, MapGen, lattice_corners};
use pathlab_search::{Algorithm, Stepper};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn solve_all(title: &str, grid: &Grid) -> Result<(), Box<dyn std::error::Error>> {
    println!("== {title}");
    for algo in Algorithm::ALL {
        let mut snapshots = Stepper::from_roles(grid, algo)?.into_snapshots();
        let steps = snapshots.by_ref().count();
        let mut run = snapshots.into_inner();
        let path = run.reconstruct_path();
        let last = run.snapshot();

        let kind = if algo.is_weighted() { "weighted" } else { "unweighted" };
        println!(
            "-- {algo} ({kind}): {} after {steps} steps, explored {}, path {}",
            last.status(),
            last.explored(),
            path.map_or_else(|| "-".to_string(), |p| p.len().to_string()),
        );
        if last.status() == Status::Found {
            println!("{last}");
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed = match std::env::args().nth(1) {
        Some(s) => s.parse::<u64>()?,
        None => 42,
    };
    let rng = StdRng::seed_from_u64(seed);

    let mut mg = MapGen::with_grid(Grid::new(DEFAULT_ROWS, DEFAULT_COLS)?, rng);
    mg.maze()?;
    if let Some((start, end)) = lattice_corners(mg.grid.dims()) {
        mg.place_endpoints(start, end)?;
    }
    solve_all("maze", &mg.grid)?;

    mg.grid.fill(Role::Empty);
    mg.place_endpoints(Pos::new(0, 0), Pos::new(DEFAULT_ROWS - 1, DEFAULT_COLS - 1))?;
    mg.sprinkle(DEFAULT_DENSITY);
    let grid = mg.into_grid();
    solve_all("random walls", &grid)?;
    Ok(())
}
