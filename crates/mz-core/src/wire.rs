//! JSON request and response shapes for a client-facing layer

use serde::{Deserialize, Serialize};

use crate::error::MazeError;
use crate::position::Position;
use crate::session::GameSession;
use crate::vision::Reveal;

/// Body of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub position: Position,
}

/// Newly revealed cells as parallel arrays, plus where the player stands.
///
/// Positions are sorted so equal reveals serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeResponse {
    pub positions: Vec<Position>,
    pub values: Vec<u8>,
    pub player: Position,
}

impl DescribeResponse {
    pub fn new(reveal: &Reveal, player: Position) -> Self {
        let mut cells: Vec<_> = reveal.iter().map(|(&p, &c)| (p, c.value())).collect();
        cells.sort_unstable_by_key(|&(p, _)| p);
        let (positions, values) = cells.into_iter().unzip();
        Self {
            positions,
            values,
            player,
        }
    }
}

/// Reply to starting a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartResponse {
    pub cols: usize,
    pub rows: usize,
    pub player: Position,
}

impl From<&GameSession> for StartResponse {
    fn from(session: &GameSession) -> Self {
        Self {
            cols: session.grid().width(),
            rows: session.grid().height(),
            player: session.player(),
        }
    }
}

/// A rejected request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// `"<message>: <cause>"`
    pub fn new(message: &str, cause: &MazeError) -> Self {
        Self {
            error: format!("{message}: {cause}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    #[test]
    fn test_describe_response_is_sorted_and_parallel() {
        let mut reveal = Reveal::new();
        reveal.insert(Position::new(2, 0), Cell::Door);
        reveal.insert(Position::new(0, 1), Cell::Floor);
        reveal.insert(Position::new(0, 0), Cell::Wall);

        let response = DescribeResponse::new(&reveal, Position::new(0, 0));
        assert_eq!(
            response.positions,
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(2, 0)]
        );
        assert_eq!(response.values, vec![1, 0, 2]);
    }

    #[test]
    fn test_describe_response_json() {
        let mut reveal = Reveal::new();
        reveal.insert(Position::new(1, 2), Cell::Floor);
        let json = serde_json::to_string(&DescribeResponse::new(&reveal, Position::new(1, 2))).unwrap();
        assert_eq!(
            json,
            r#"{"positions":[{"x":1,"y":2}],"values":[0],"player":{"x":1,"y":2}}"#
        );
    }

    #[test]
    fn test_move_request_json() {
        let request: MoveRequest = serde_json::from_str(r#"{"position": {"x": 3, "y": 7}}"#).unwrap();
        assert_eq!(request.position, Position::new(3, 7));
    }

    #[test]
    fn test_error_response_message() {
        let response = ErrorResponse::new(
            "Move failed",
            &MazeError::InvalidMove {
                position: Position::new(-1, 4),
            },
        );
        assert_eq!(response.error, "Move failed: (-1, 4) is not on the map");
    }
}
