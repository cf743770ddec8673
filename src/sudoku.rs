use std::fmt::Display;
use std::ops::RangeInclusive;

use bit_set::BitSet;

use crate::engine::{self, Problem};
use crate::model::{Error, SolveRequest, SolveResponse, Step};

pub const SIZE: usize = 9;
pub const EMPTY: u8 = 0;
const BOX_SIZE: usize = 3;

/// A cell position as [row, col], each in 0..9.
pub type Cell = [usize; 2];

/// A 9x9 grid of cells in 0..=9, where 0 marks an empty cell. This is both
/// the search state and the value exchanged at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub cells: [[u8; SIZE]; SIZE],
}

const WRONG_ROW_COUNT_ERROR: Error = Error::new_const("Grid must have exactly 9 rows");
const WRONG_COL_COUNT_ERROR: Error = Error::new_const("Grid must have exactly 9 columns");

impl Grid {
    pub fn new() -> Self {
        Self { cells: [[EMPTY; SIZE]; SIZE] }
    }

    /// Parse a grid from 9 lines of 9 characters, where '.' or '0' marks an
    /// empty cell and '1'-'9' a placed digit.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let mut cells = [[EMPTY; SIZE]; SIZE];
        let lines: Vec<&str> = s.lines().collect();
        if lines.len() != SIZE {
            return Err(WRONG_ROW_COUNT_ERROR);
        }
        for (r, line) in lines.iter().enumerate() {
            let line = line.trim();
            if line.chars().count() != SIZE {
                return Err(WRONG_COL_COUNT_ERROR);
            }
            for (c, ch) in line.chars().enumerate() {
                if ch == '.' || ch == '0' {
                    cells[r][c] = EMPTY;
                } else if let Some(d) = ch.to_digit(10) {
                    cells[r][c] = d as u8;
                } else {
                    return Err(Error::new(format!("Invalid character {:?} in input", ch)));
                }
            }
        }
        Ok(Self { cells })
    }

    /// Convert from the wire shape, rejecting wrong dimensions and cells
    /// outside 0..=9.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, Error> {
        if rows.len() != SIZE {
            return Err(WRONG_ROW_COUNT_ERROR);
        }
        let mut cells = [[EMPTY; SIZE]; SIZE];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != SIZE {
                return Err(WRONG_COL_COUNT_ERROR);
            }
            for (c, &v) in row.iter().enumerate() {
                if v > 9 {
                    return Err(Error::new(format!("Cell ({}, {}) out of range: {}", r, c, v)));
                }
                cells[r][c] = v;
            }
        }
        Ok(Self { cells })
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        for row in &self.cells {
            for &cell in row {
                if cell == EMPTY {
                    write!(f, ".")?;
                } else {
                    write!(f, "{}", cell)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn used_in_row(grid: &Grid, row: usize, value: u8) -> bool {
    grid.cells[row].contains(&value)
}

fn used_in_col(grid: &Grid, col: usize, value: u8) -> bool {
    (0..SIZE).any(|r| grid.cells[r][col] == value)
}

fn used_in_box(grid: &Grid, box_row: usize, box_col: usize, value: u8) -> bool {
    (0..BOX_SIZE).any(|r| {
        (0..BOX_SIZE).any(|c| grid.cells[box_row + r][box_col + c] == value)
    })
}

/// The Sudoku instantiation of the backtracking contract. Positions are
/// chosen row-major (first empty cell), candidates are always the full 1..=9
/// ascending, and validity is row/column/box absence. When a step sink is
/// attached, every placement and every undo is appended in chronological
/// order, giving a complete replayable trace of the search path.
pub struct SudokuProblem<'a> {
    steps: Option<&'a mut Vec<Step>>,
}

impl<'a> SudokuProblem<'a> {
    pub fn new() -> Self {
        Self { steps: None }
    }

    pub fn recording(steps: &'a mut Vec<Step>) -> Self {
        Self { steps: Some(steps) }
    }
}

impl<'a> Default for SudokuProblem<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl Problem for SudokuProblem<'_> {
    type State = Grid;
    type Position = Cell;
    type Value = u8;
    type Candidates = RangeInclusive<u8>;

    fn is_complete(&self, state: &Grid) -> bool {
        self.next_position(state).is_none()
    }

    fn next_position(&self, state: &Grid) -> Option<Cell> {
        for r in 0..SIZE {
            for c in 0..SIZE {
                if state.cells[r][c] == EMPTY {
                    return Some([r, c]);
                }
            }
        }
        None
    }

    fn candidates(&self, _state: &Grid, _pos: Cell) -> RangeInclusive<u8> {
        // Always the full domain; filtering happens in is_valid. Pruning here
        // would change the step trace.
        1..=SIZE as u8
    }

    fn is_valid(&self, state: &Grid, pos: Cell, value: u8) -> bool {
        let [row, col] = pos;
        !used_in_row(state, row, value)
            && !used_in_col(state, col, value)
            && !used_in_box(state, row - row % BOX_SIZE, col - col % BOX_SIZE, value)
    }

    fn place(&mut self, state: &mut Grid, pos: Cell, value: u8) {
        state.cells[pos[0]][pos[1]] = value;
    }

    fn unplace(&mut self, state: &mut Grid, pos: Cell) {
        state.cells[pos[0]][pos[1]] = EMPTY;
    }

    fn record_place(&mut self, pos: Cell, value: u8) {
        if let Some(steps) = self.steps.as_mut() {
            steps.push(Step::place(pos[0], pos[1], value));
        }
    }

    fn record_backtrack(&mut self, pos: Cell) {
        if let Some(steps) = self.steps.as_mut() {
            steps.push(Step::backtrack(pos[0], pos[1]));
        }
    }
}

fn validate(grid: &Grid) -> Result<(), Error> {
    for r in 0..SIZE {
        for c in 0..SIZE {
            let v = grid.cells[r][c];
            if v > 9 {
                return Err(Error::new(format!("Cell ({}, {}) out of range: {}", r, c, v)));
            }
        }
    }
    Ok(())
}

/// Solve a Sudoku. The caller's grid is never mutated: a copy is made before
/// the search begins and the copy is the value returned. `Ok(Some(_))` holds
/// the first solution under ascending-digit, row-major exploration;
/// `Ok(None)` means no valid completion exists. Malformed input (a cell
/// outside 0..=9) is an error, distinct from unsolvable.
///
/// When `steps` is supplied, the full search trace is appended to it, even
/// for unsolvable puzzles.
pub fn solve(original: &Grid, steps: Option<&mut Vec<Step>>) -> Result<Option<Grid>, Error> {
    validate(original)?;
    let mut grid = original.clone();
    let solved = match steps {
        Some(sink) => engine::search(&mut grid, &mut SudokuProblem::recording(sink)),
        None => engine::search(&mut grid, &mut SudokuProblem::new()),
    };
    Ok(if solved { Some(grid) } else { None })
}

/// Handle a wire-shaped request end to end: validate shape and range, solve
/// with step recording, and package the outcome. Unsolvable is a normal
/// response (`solved: false`), not an error.
pub fn respond(request: &SolveRequest) -> Result<SolveResponse, Error> {
    let grid = Grid::from_rows(&request.grid)?;
    let mut steps = Vec::new();
    let solution = solve(&grid, Some(&mut steps))?;
    Ok(SolveResponse {
        solved: solution.is_some(),
        solution: solution.map(|g| g.to_rows()),
        steps,
    })
}

/// Full constraint verification of a completed grid: every row, column, and
/// 3x3 box contains each digit 1-9 exactly once. Not part of the solve path;
/// used to check solutions independently of the search that produced them.
pub fn verify_solution(grid: &Grid) -> bool {
    fn all_digits<I: Iterator<Item = u8>>(unit: I) -> bool {
        let mut seen = BitSet::with_capacity(SIZE + 1);
        let mut count = 0;
        for v in unit {
            if !(1..=9).contains(&v) || !seen.insert(v as usize) {
                return false;
            }
            count += 1;
        }
        count == SIZE
    }
    for r in 0..SIZE {
        if !all_digits(grid.cells[r].iter().copied()) {
            return false;
        }
    }
    for c in 0..SIZE {
        if !all_digits((0..SIZE).map(|r| grid.cells[r][c])) {
            return false;
        }
    }
    for box_row in 0..BOX_SIZE {
        for box_col in 0..BOX_SIZE {
            let unit = (0..BOX_SIZE).flat_map(|r| {
                (0..BOX_SIZE).map(move |c| {
                    grid.cells[box_row * BOX_SIZE + r][box_col * BOX_SIZE + c]
                })
            });
            if !all_digits(unit) {
                return false;
            }
        }
    }
    true
}
