use std::borrow::Cow;
use std::fmt::Display;
use serde_derive::{Deserialize, Serialize};

/// Error type for malformed input (wrong grid shape, out-of-range cells).
/// "Unsolvable" is a normal query outcome, not an error, and never shows up
/// here.
#[derive(Debug, Clone, PartialEq)]
pub struct Error(Cow<'static, str>);

impl Error {
    pub const fn new_const(s: &'static str) -> Self {
        Error(Cow::Borrowed(s))
    }

    pub fn new<S: Into<String>>(s: S) -> Self {
        Error(Cow::Owned(s.into()))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for Error {}

/// What a single step in the search trace did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    Place,
    Backtrack,
}

/// One entry in the chronological search trace. For `Place`, `value` is the
/// digit placed (1-9); for `Backtrack`, `value` is always 0 (the cell being
/// cleared).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub row: usize,
    pub col: usize,
    pub value: u8,
    pub kind: StepKind,
}

impl Step {
    pub fn place(row: usize, col: usize, value: u8) -> Self {
        Step { row, col, value, kind: StepKind::Place }
    }

    pub fn backtrack(row: usize, col: usize) -> Self {
        Step { row, col, value: 0, kind: StepKind::Backtrack }
    }
}

/// Wire-facing request: a 9x9 grid of cells in 0..=9, 0 = empty. Shape and
/// range are validated when the grid is converted, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub grid: Vec<Vec<u8>>,
}

/// Wire-facing response. `solution` is None when the puzzle has no valid
/// completion; `steps` is present either way, so an unsolved puzzle still
/// shows the explored-and-abandoned paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub solution: Option<Vec<Vec<u8>>>,
    pub solved: bool,
    pub steps: Vec<Step>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_step_kind_wire_names() {
        assert_eq!(serde_json::to_string(&StepKind::Place).unwrap(), "\"PLACE\"");
        assert_eq!(serde_json::to_string(&StepKind::Backtrack).unwrap(), "\"BACKTRACK\"");
        assert_eq!(StepKind::Place.to_string(), "PLACE");
        assert_eq!(StepKind::Backtrack.to_string(), "BACKTRACK");
    }

    #[test]
    fn test_step_json_shape() {
        let step = Step::place(2, 7, 5);
        let json = serde_json::to_string(&step).unwrap();
        assert_eq!(json, "{\"row\":2,\"col\":7,\"value\":5,\"kind\":\"PLACE\"}");
        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn test_backtrack_value_is_zero() {
        let step = Step::backtrack(4, 4);
        assert_eq!(step.value, 0);
        assert_eq!(step.kind, StepKind::Backtrack);
    }

    #[test]
    fn test_unsolved_response_round_trip() {
        let response = SolveResponse {
            solution: None,
            solved: false,
            steps: vec![Step::place(0, 0, 1), Step::backtrack(0, 0)],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"solution\":null"));
        assert!(json.contains("\"solved\":false"));
        let back: SolveResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
    }

    #[test]
    fn test_request_parses_from_json() {
        let json = "{\"grid\":[[5,3,0],[6,0,0]]}";
        let request: SolveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.grid[0][0], 5);
        assert_eq!(request.grid[1][2], 0);
    }
}
