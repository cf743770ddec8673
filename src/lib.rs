pub mod engine;
pub mod model;
pub mod queens;
pub mod sudoku;
