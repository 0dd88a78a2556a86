//! Dense 8x8 board representation.
//!
//! Squares are stored row-major in a flat array so the evaluation hot path
//! walks contiguous memory. Neighbour lookups go through `get_signed`, which
//! returns `None` off the board instead of panicking.

use std::fmt;

use crate::errors::AgentError;
use crate::game_state::checkers_types::{Cell, Color, Square, BOARD_SIZE, LAST_INDEX};

pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; SQUARE_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; SQUARE_COUNT],
        }
    }

    /// Standard opening layout: red on rows 0-2, black on rows 5-7, dark
    /// squares only.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for offset in 0..SQUARE_COUNT {
            let square = Square::from_offset(offset);
            if !square.is_playable() {
                continue;
            }
            if square.row <= 2 {
                board.set(square, Cell::RED_PAWN);
            } else if square.row >= 5 {
                board.set(square, Cell::BLACK_PAWN);
            }
        }
        board
    }

    /// Parses an 8-line diagram, row 0 first. Whitespace inside a line is
    /// ignored so rows may be written spaced out.
    pub fn from_diagram(diagram: &str) -> Result<Self, AgentError> {
        let rows: Vec<&str> = diagram
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(AgentError::InvalidDiagram(format!(
                "expected {BOARD_SIZE} rows, found {}",
                rows.len()
            )));
        }

        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE {
                return Err(AgentError::InvalidDiagram(format!(
                    "row {row} has {} squares",
                    symbols.len()
                )));
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                let cell = Cell::from_symbol(symbol).ok_or_else(|| {
                    AgentError::InvalidDiagram(format!("unknown symbol '{symbol}' at ({row},{col})"))
                })?;
                board.set(Square::new(row as u8, col as u8), cell);
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn get(&self, square: Square) -> Cell {
        self.cells[square.offset()]
    }

    #[inline]
    pub fn at(&self, row: u8, col: u8) -> Cell {
        self.get(Square::new(row, col))
    }

    /// Bounds-checked lookup for neighbour probing.
    #[inline]
    pub fn get_signed(&self, row: i8, col: i8) -> Option<Cell> {
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(self.cells[row as usize * BOARD_SIZE + col as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, square: Square, cell: Cell) {
        self.cells[square.offset()] = cell;
    }

    /// Iterates occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Color, Cell)> + '_ {
        self.cells.iter().enumerate().filter_map(|(offset, cell)| {
            cell.color()
                .map(|color| (Square::from_offset(offset), color, *cell))
        })
    }

    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|cell| cell.is_color(color)).count()
    }

    /// Rows flipped top-to-bottom and every piece handed to the other side.
    ///
    /// The evaluation is antisymmetric under this transform for a fixed
    /// observer.
    pub fn mirrored_swapped(&self) -> Self {
        let mut out = Self::empty();
        for (offset, cell) in self.cells.iter().enumerate() {
            let square = Square::from_offset(offset);
            let mirrored = Square::new(LAST_INDEX - square.row, square.col);
            out.set(mirrored, cell.swapped());
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            let line: String = self.cells[row * BOARD_SIZE..(row + 1) * BOARD_SIZE]
                .iter()
                .map(|cell| cell.symbol())
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_board_has_twelve_pieces_per_side() {
        let board = Board::initial();
        assert_eq!(board.count(Color::Red), 12);
        assert_eq!(board.count(Color::Black), 12);
        assert_eq!(board.at(0, 1), Cell::RED_PAWN);
        assert_eq!(board.at(7, 0), Cell::BLACK_PAWN);
        assert_eq!(board.at(3, 2), Cell::Empty);
    }

    #[test]
    fn diagram_parses_and_displays_back() {
        let text = "\
            .r.r.r.r\n\
            r.r.r.r.\n\
            .r.r.r.r\n\
            ........\n\
            ........\n\
            b.b.b.b.\n\
            .b.b.b.b\n\
            b.b.b.b.\n";
        let board = Board::from_diagram(text).expect("diagram should parse");
        assert_eq!(board, Board::initial());
        assert_eq!(board.to_string(), text);
    }

    #[test]
    fn diagram_rejects_bad_input() {
        assert!(matches!(
            Board::from_diagram("........"),
            Err(AgentError::InvalidDiagram(_))
        ));
        let bad_symbol = "x.......\n".repeat(8);
        assert!(matches!(
            Board::from_diagram(&bad_symbol),
            Err(AgentError::InvalidDiagram(_))
        ));
    }

    #[test]
    fn signed_lookup_guards_edges() {
        let board = Board::initial();
        assert_eq!(board.get_signed(-1, 0), None);
        assert_eq!(board.get_signed(0, 8), None);
        assert_eq!(board.get_signed(0, 1), Some(Cell::RED_PAWN));
    }

    #[test]
    fn mirror_swap_of_initial_board_is_identity_up_to_columns() {
        let board = Board::initial();
        let mirrored = board.mirrored_swapped();
        assert_eq!(mirrored.count(Color::Red), 12);
        assert_eq!(mirrored.at(7, 1), Cell::BLACK_PAWN);
        assert_eq!(mirrored.mirrored_swapped(), board);
    }
}
