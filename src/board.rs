//! Board codec: translation between the wire board and an in-memory grid.
//!
//! The server sends a board as eight strings of eight characters, one
//! character per cell. [`decode`] turns that into a [`Board`]; [`encode`] is
//! its inverse and exists so tests, demos, and fuzzers can build wire rows
//! from a grid. The client never sends a board back to the server; moves
//! travel as row/column coordinates.
//!
//! Decoding is strict: a row of the wrong length or a character outside the
//! three recognized symbols is a [`BoardError`], never a guess at a side.

use std::fmt;

use thiserror::Error;

use crate::protocol::{EMPTY_MARKER, HUMAN_MARKER, OPPONENT_MARKER};

/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 8;

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// No piece.
    #[default]
    Empty,
    /// A piece owned by the human (`'X'` on the wire).
    Human,
    /// A piece owned by the server-side opponent (`'O'` on the wire).
    Opponent,
}

impl Cell {
    /// Map a wire character to a cell, or `None` if the character is not one
    /// of the recognized symbols.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            EMPTY_MARKER => Some(Self::Empty),
            HUMAN_MARKER => Some(Self::Human),
            OPPONENT_MARKER => Some(Self::Opponent),
            _ => None,
        }
    }

    /// The wire character for this cell.
    pub fn marker(self) -> char {
        match self {
            Self::Empty => EMPTY_MARKER,
            Self::Human => HUMAN_MARKER,
            Self::Opponent => OPPONENT_MARKER,
        }
    }
}

/// Reasons a wire board cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The board did not have exactly [`BOARD_SIZE`] rows.
    #[error("expected {BOARD_SIZE} rows, found {found}")]
    RowCount { found: usize },

    /// A row did not have exactly [`BOARD_SIZE`] characters.
    #[error("row {row}: expected {BOARD_SIZE} cells, found {found}")]
    RowLength { row: usize, found: usize },

    /// A cell used a character outside the recognized symbols.
    #[error("row {row}, column {column}: unrecognized cell symbol {symbol:?}")]
    UnknownSymbol {
        row: usize,
        column: usize,
        symbol: char,
    },
}

/// An 8×8 grid of cells, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// An empty board.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard opening position: four pieces in the centre.
    pub fn opening() -> Self {
        let mut board = Self::empty();
        let mid = BOARD_SIZE / 2;
        board.set(mid - 1, mid - 1, Cell::Human);
        board.set(mid, mid, Cell::Human);
        board.set(mid - 1, mid, Cell::Opponent);
        board.set(mid, mid - 1, Cell::Opponent);
        board
    }

    /// Cell at `(row, column)`, or `None` when out of range.
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Overwrite the cell at `(row, column)`. Returns `false` when out of range.
    pub fn set(&mut self, row: usize, column: usize, cell: Cell) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(column)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_SIZE]> {
        self.cells.iter()
    }

    /// Number of cells holding `cell`.
    pub fn count(&self, cell: Cell) -> u32 {
        let total = self.cells.iter().flatten().filter(|c| **c == cell).count();
        // At most 64 cells, always fits.
        u32::try_from(total).unwrap_or(u32::MAX)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => '.',
                    other => other.marker(),
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Decode eight wire rows into a [`Board`].
///
/// # Errors
///
/// Returns a [`BoardError`] if the row count or a row length is wrong, or if
/// any character is not one of `' '`, `'X'`, `'O'`.
pub fn decode<S: AsRef<str>>(rows: &[S]) -> Result<Board, BoardError> {
    if rows.len() != BOARD_SIZE {
        return Err(BoardError::RowCount { found: rows.len() });
    }

    let mut board = Board::empty();
    for (row, text) in rows.iter().enumerate() {
        let text = text.as_ref();
        let found = text.chars().count();
        if found != BOARD_SIZE {
            return Err(BoardError::RowLength { row, found });
        }
        for (column, symbol) in text.chars().enumerate() {
            let cell = Cell::from_marker(symbol).ok_or(BoardError::UnknownSymbol {
                row,
                column,
                symbol,
            })?;
            board.set(row, column, cell);
        }
    }
    Ok(board)
}

/// Encode a [`Board`] as eight wire rows.
pub fn encode(board: &Board) -> Vec<String> {
    board
        .rows()
        .map(|row| row.iter().map(|cell| cell.marker()).collect())
        .collect()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;

    fn opening_rows() -> Vec<String> {
        vec![
            "        ".into(),
            "        ".into(),
            "        ".into(),
            "   XO   ".into(),
            "   OX   ".into(),
            "        ".into(),
            "        ".into(),
            "        ".into(),
        ]
    }

    #[test]
    fn decode_opening_position() {
        let board = decode(&opening_rows()).unwrap();
        assert_eq!(board, Board::opening());
        assert_eq!(board.get(3, 3), Some(Cell::Human));
        assert_eq!(board.get(3, 4), Some(Cell::Opponent));
        assert_eq!(board.get(0, 0), Some(Cell::Empty));
        assert_eq!(board.count(Cell::Human), 2);
        assert_eq!(board.count(Cell::Opponent), 2);
        assert_eq!(board.count(Cell::Empty), 60);
    }

    #[test]
    fn encode_reverses_decode() {
        let rows = vec![
            "XXXXXXXX".to_string(),
            "OOOOOOOO".to_string(),
            "X O X O ".to_string(),
            " O X O X".to_string(),
            "        ".to_string(),
            "XO      ".to_string(),
            "      OX".to_string(),
            "OXOXOXOX".to_string(),
        ];
        let board = decode(&rows).unwrap();
        assert_eq!(encode(&board), rows);
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let mut rows = opening_rows();
        rows[5] = "  B     ".into();
        let err = decode(&rows).unwrap_err();
        assert_eq!(
            err,
            BoardError::UnknownSymbol {
                row: 5,
                column: 2,
                symbol: 'B'
            }
        );
    }

    #[test]
    fn lowercase_marker_is_not_a_side() {
        let mut rows = opening_rows();
        rows[0] = "x       ".into();
        assert!(matches!(
            decode(&rows),
            Err(BoardError::UnknownSymbol { symbol: 'x', .. })
        ));
    }

    #[test]
    fn wrong_row_count_is_rejected() {
        let rows = &opening_rows()[..7];
        assert_eq!(decode(rows).unwrap_err(), BoardError::RowCount { found: 7 });
    }

    #[test]
    fn wrong_row_length_is_rejected() {
        let mut rows = opening_rows();
        rows[2] = "       ".into();
        assert_eq!(
            decode(&rows).unwrap_err(),
            BoardError::RowLength { row: 2, found: 7 }
        );
    }

    #[test]
    fn row_length_counts_characters_not_bytes() {
        let mut rows = opening_rows();
        // Seven cells plus one multi-byte character: still eight characters.
        rows[1] = "       é".into();
        assert!(matches!(
            decode(&rows),
            Err(BoardError::UnknownSymbol {
                row: 1,
                column: 7,
                ..
            })
        ));
    }

    #[test]
    fn out_of_range_access() {
        let mut board = Board::empty();
        assert_eq!(board.get(8, 0), None);
        assert!(!board.set(0, 8, Cell::Human));
    }

    #[test]
    fn display_uses_dots_for_empty_cells() {
        let text = Board::opening().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), BOARD_SIZE);
        assert_eq!(lines[3], "...XO...");
    }
}
