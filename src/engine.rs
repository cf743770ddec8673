/// Contract for a finite-domain constraint-satisfaction problem that can be
/// solved by depth-first backtracking. The engine knows nothing about grids,
/// rows, or digits; everything problem-specific lives behind this trait.
///
/// Determinism matters: `next_position` must return the same position for the
/// same state, and `candidates` must enumerate values in a stable, documented
/// order, because together they fix the exploration order, which solution is
/// found first, and the exact step trace.
pub trait Problem {
    type State;
    type Position: Copy;
    type Value: Copy;
    type Candidates: Iterator<Item = Self::Value>;

    /// True when no positions remain to fill.
    fn is_complete(&self, state: &Self::State) -> bool;

    /// The next position to fill, or None if the state is already complete.
    /// Selection policy is entirely owned by the problem.
    fn next_position(&self, state: &Self::State) -> Option<Self::Position>;

    /// A finite, restartable sequence of values to attempt at `pos`, in a
    /// deterministic order. Candidates need not be pre-filtered; invalid ones
    /// are skipped via `is_valid`.
    fn candidates(&self, state: &Self::State, pos: Self::Position) -> Self::Candidates;

    /// Pure predicate; must not mutate state.
    fn is_valid(&self, state: &Self::State, pos: Self::Position, value: Self::Value) -> bool;

    fn place(&mut self, state: &mut Self::State, pos: Self::Position, value: Self::Value);

    /// Must be the exact inverse of the most recent `place` at `pos`; the
    /// engine's undo discipline depends on it.
    fn unplace(&mut self, state: &mut Self::State, pos: Self::Position);

    /// Optional hook, called after every successful placement. Has no
    /// influence on the search outcome.
    fn record_place(&mut self, pos: Self::Position, value: Self::Value) {
        let _ = pos;
        let _ = value;
    }

    /// Optional hook, called after every undone placement.
    fn record_backtrack(&mut self, pos: Self::Position) {
        let _ = pos;
    }
}

/// Depth-first backtracking search. Returns true iff a complete assignment
/// satisfying `is_valid` at every step exists; on true, `state` holds the
/// first such assignment under the candidate ordering. On false, `state` is
/// left in an unspecified intermediate configuration and must not be
/// interpreted as a solution.
///
/// The engine raises no errors of its own. Recursion depth is bounded by the
/// number of open positions.
pub fn search<P: Problem>(state: &mut P::State, problem: &mut P) -> bool {
    if problem.is_complete(state) {
        return true;
    }
    let pos = match problem.next_position(state) {
        Some(pos) => pos,
        // Should coincide with is_complete for a correct problem impl.
        None => return true,
    };
    for candidate in problem.candidates(state, pos) {
        if !problem.is_valid(state, pos, candidate) {
            continue;
        }
        problem.place(state, pos, candidate);
        problem.record_place(pos, candidate);
        if search(state, problem) {
            // The state now holds the solution; don't undo.
            return true;
        }
        problem.unplace(state, pos);
        problem.record_backtrack(pos);
    }
    false
}

#[cfg(test)]
mod test {
    use super::*;

    // Fill a line of `len` digits drawn from 1..=max such that all digits are
    // distinct and adjacent digits differ by at least 5 (a "german whispers"
    // line). Small enough to trace by hand, forces real backtracking.
    struct WhisperLine {
        len: usize,
        max: u8,
        places: usize,
        backtracks: usize,
    }

    impl WhisperLine {
        fn new(len: usize, max: u8) -> Self {
            WhisperLine { len, max, places: 0, backtracks: 0 }
        }
    }

    impl Problem for WhisperLine {
        type State = Vec<u8>;
        type Position = usize;
        type Value = u8;
        type Candidates = std::ops::RangeInclusive<u8>;

        fn is_complete(&self, state: &Vec<u8>) -> bool {
            state.len() == self.len
        }

        fn next_position(&self, state: &Vec<u8>) -> Option<usize> {
            if state.len() < self.len {
                Some(state.len())
            } else {
                None
            }
        }

        fn candidates(&self, _state: &Vec<u8>, _pos: usize) -> Self::Candidates {
            1..=self.max
        }

        fn is_valid(&self, state: &Vec<u8>, pos: usize, value: u8) -> bool {
            if state.contains(&value) {
                return false;
            }
            if pos > 0 && state[pos - 1].abs_diff(value) < 5 {
                return false;
            }
            true
        }

        fn place(&mut self, state: &mut Vec<u8>, _pos: usize, value: u8) {
            state.push(value);
        }

        fn unplace(&mut self, state: &mut Vec<u8>, _pos: usize) {
            state.pop();
        }

        fn record_place(&mut self, _pos: usize, _value: u8) {
            self.places += 1;
        }

        fn record_backtrack(&mut self, _pos: usize) {
            self.backtracks += 1;
        }
    }

    #[test]
    fn test_whisper_line_solves() {
        let mut state = Vec::new();
        let mut problem = WhisperLine::new(8, 9);
        assert!(search(&mut state, &mut problem));
        assert_eq!(state.len(), 8);
        for i in 0..8 {
            for j in i + 1..8 {
                assert_ne!(state[i], state[j]);
            }
            if i > 0 {
                assert!(state[i - 1].abs_diff(state[i]) >= 5);
            }
        }
    }

    #[test]
    fn test_whisper_line_exhausts() {
        // Only two distinct digits available for a three-cell line.
        let mut state = Vec::new();
        let mut problem = WhisperLine::new(3, 2);
        assert!(!search(&mut state, &mut problem));
        // Every placement during the failed exploration was undone.
        assert_eq!(problem.places, problem.backtracks);
    }

    #[test]
    fn test_place_backtrack_accounting() {
        let mut state = Vec::new();
        let mut problem = WhisperLine::new(8, 9);
        assert!(search(&mut state, &mut problem));
        // Placements that survived are exactly the filled positions.
        assert_eq!(problem.places - problem.backtracks, 8);
    }

    #[test]
    fn test_complete_state_succeeds_immediately() {
        let mut state = vec![1, 6, 2, 7, 3, 8];
        let mut problem = WhisperLine::new(6, 9);
        assert!(search(&mut state, &mut problem));
        assert_eq!(state, vec![1, 6, 2, 7, 3, 8]);
        assert_eq!(problem.places, 0);
        assert_eq!(problem.backtracks, 0);
    }

    #[test]
    fn test_search_is_deterministic() {
        let mut first = Vec::new();
        assert!(search(&mut first, &mut WhisperLine::new(8, 9)));
        let mut second = Vec::new();
        assert!(search(&mut second, &mut WhisperLine::new(8, 9)));
        assert_eq!(first, second);
    }
}
