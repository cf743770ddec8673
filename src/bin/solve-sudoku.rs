use std::env;
use std::fs;
use std::io::Read;

use color_eyre::eyre::{bail, Result};
use log::{debug, info};
use sudoku_backtrack::model::{SolveResponse, StepKind};
use sudoku_backtrack::sudoku::{solve, verify_solution, Grid};

// Solves a standard 9x9 Sudoku given in the dotted grid format: 9 lines of
// 9 characters, '.' or '0' for an empty cell. The puzzle is read from a file
// argument, or from stdin when no path is given. With --json, emits the
// boundary response (solution + full step trace) instead of the plain grid.

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

pub fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let mut json = false;
    let mut path = None;
    for arg in env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else if path.is_none() {
            path = Some(arg);
        } else {
            bail!("Usage: solve-sudoku [--json] [puzzle-file]");
        }
    }

    let input = read_input(path.as_deref())?;
    let grid = Grid::parse(&input)?;
    let mut steps = Vec::new();
    let solution = solve(&grid, Some(&mut steps))?;

    let places = steps.iter().filter(|s| s.kind == StepKind::Place).count();
    info!(
        "search trace: {} steps ({} placements, {} backtracks)",
        steps.len(),
        places,
        steps.len() - places
    );
    for step in &steps {
        debug!("{} ({}, {}) = {}", step.kind, step.row, step.col, step.value);
    }

    if json {
        let response = SolveResponse {
            solved: solution.is_some(),
            solution: solution.map(|g| g.to_rows()),
            steps,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    match solution {
        Some(solved) => {
            debug_assert!(verify_solution(&solved));
            print!("{}", solved);
        }
        None => println!("No solution found."),
    }
    Ok(())
}
