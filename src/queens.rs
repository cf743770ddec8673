use crate::engine::Problem;

/// One queen per row, tracked as the column it occupies (None while the row
/// is still open). Since every row holds exactly one queen in any solution,
/// the position type is just the row index and the value type the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueensBoard<const N: usize> {
    pub queens: [Option<usize>; N],
}

impl<const N: usize> QueensBoard<N> {
    pub fn new() -> Self {
        Self { queens: [None; N] }
    }
}

impl<const N: usize> Default for QueensBoard<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// N-Queens as a backtracking problem: a second instantiation of the same
/// contract the Sudoku adapter implements, with nothing shared beyond the
/// engine. Uses the default no-op record hooks.
pub struct Queens<const N: usize>;

impl<const N: usize> Problem for Queens<N> {
    type State = QueensBoard<N>;
    type Position = usize;
    type Value = usize;
    type Candidates = std::ops::Range<usize>;

    fn is_complete(&self, state: &QueensBoard<N>) -> bool {
        state.queens.iter().all(Option::is_some)
    }

    fn next_position(&self, state: &QueensBoard<N>) -> Option<usize> {
        state.queens.iter().position(Option::is_none)
    }

    fn candidates(&self, _state: &QueensBoard<N>, _row: usize) -> std::ops::Range<usize> {
        0..N
    }

    fn is_valid(&self, state: &QueensBoard<N>, row: usize, col: usize) -> bool {
        for (r, queen) in state.queens.iter().enumerate() {
            if let Some(c) = queen {
                if *c == col || r.abs_diff(row) == c.abs_diff(col) {
                    return false;
                }
            }
        }
        true
    }

    fn place(&mut self, state: &mut QueensBoard<N>, row: usize, col: usize) {
        state.queens[row] = Some(col);
    }

    fn unplace(&mut self, state: &mut QueensBoard<N>, row: usize) {
        state.queens[row] = None;
    }
}
