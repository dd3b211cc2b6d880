//! Text notation for boards and move sequences.
//!
//! A board is written as three rows of digits separated by `/`, row-major,
//! with `0` for the blank: the solved board is `012/345/678`. A move
//! sequence is a string of single-letter directions such as `"ULDR"`.
//! Parsing validates eagerly and rejects malformed input with a typed
//! error; encoding is a pure function of the grid.

use crate::board::{Board, BoardError, Direction, CELL_COUNT, SIDE};

/// Errors that can occur while parsing board or move notation.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("expected 3 rows separated by '/', got {0}")]
    WrongRowCount(usize),

    #[error("expected 3 digits per row, got '{0}'")]
    WrongRowLength(String),

    #[error("invalid tile character: '{0}'")]
    InvalidTile(char),

    #[error("invalid move letter: '{0}'")]
    InvalidMove(char),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Parses a board from its digit notation, e.g. `"724/506/831"`.
pub fn parse_board(s: &str) -> Result<Board, ParseError> {
    let rows: Vec<&str> = s.split('/').collect();
    if rows.len() != SIDE {
        return Err(ParseError::WrongRowCount(rows.len()));
    }

    let mut cells = [0u8; CELL_COUNT];
    let mut i = 0;
    for row in rows {
        if row.chars().count() != SIDE {
            return Err(ParseError::WrongRowLength(row.to_string()));
        }
        for c in row.chars() {
            let digit = c.to_digit(10).ok_or(ParseError::InvalidTile(c))?;
            cells[i] = digit as u8;
            i += 1;
        }
    }

    Ok(Board::from_cells(cells)?)
}

/// Encodes a board into its digit notation.
pub fn encode_board(board: &Board) -> String {
    let mut out = String::with_capacity(CELL_COUNT + SIDE - 1);
    for row in 0..SIDE {
        if row > 0 {
            out.push('/');
        }
        for col in 0..SIDE {
            out.push(char::from(b'0' + board.tile(row, col)));
        }
    }
    out
}

/// Formats a move sequence as a compact letter string, e.g. `"ULDR"`.
pub fn format_moves(moves: &[Direction]) -> String {
    moves.iter().map(|d| d.letter()).collect()
}

/// Parses a compact letter string back into a move sequence.
pub fn parse_moves(s: &str) -> Result<Vec<Direction>, ParseError> {
    s.chars()
        .map(|c| Direction::from_letter(c).ok_or(ParseError::InvalidMove(c)))
        .collect()
}
