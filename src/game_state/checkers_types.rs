//! Primitive checkers types shared by every subsystem.
//!
//! Colours, piece kinds and the per-square `Cell` value live here so the board,
//! the feature extractor and the search agree on one encoding.

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: usize = 8;

/// Highest valid row/column index.
pub const LAST_INDEX: u8 = (BOARD_SIZE as u8) - 1;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Row delta of a pawn step for this colour.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Red => 1,
            Color::Black => -1,
        }
    }

    /// The row this colour starts from and defends against promotion.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::Red => 0,
            Color::Black => LAST_INDEX,
        }
    }

    /// The row where this colour's pawns are crowned.
    #[inline]
    pub const fn crowning_row(self) -> u8 {
        match self {
            Color::Red => LAST_INDEX,
            Color::Black => 0,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    King,
}

/// Content of a single board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Color, PieceKind),
}

impl Cell {
    pub const RED_PAWN: Cell = Cell::Occupied(Color::Red, PieceKind::Pawn);
    pub const RED_KING: Cell = Cell::Occupied(Color::Red, PieceKind::King);
    pub const BLACK_PAWN: Cell = Cell::Occupied(Color::Black, PieceKind::Pawn);
    pub const BLACK_KING: Cell = Cell::Occupied(Color::Black, PieceKind::King);

    #[inline]
    pub const fn pawn(color: Color) -> Cell {
        Cell::Occupied(color, PieceKind::Pawn)
    }

    #[inline]
    pub const fn king(color: Color) -> Cell {
        Cell::Occupied(color, PieceKind::King)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(color, _) => Some(color),
        }
    }

    #[inline]
    pub fn is_color(self, color: Color) -> bool {
        self.color() == Some(color)
    }

    #[inline]
    pub fn is_king_of(self, color: Color) -> bool {
        self == Cell::king(color)
    }

    /// Same piece with its owner swapped.
    #[inline]
    pub fn swapped(self) -> Cell {
        match self {
            Cell::Empty => Cell::Empty,
            Cell::Occupied(color, kind) => Cell::Occupied(color.opposite(), kind),
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(Color::Red, PieceKind::Pawn) => 'r',
            Cell::Occupied(Color::Red, PieceKind::King) => 'R',
            Cell::Occupied(Color::Black, PieceKind::Pawn) => 'b',
            Cell::Occupied(Color::Black, PieceKind::King) => 'B',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            '.' | '-' | '_' => Some(Cell::Empty),
            'r' => Some(Cell::RED_PAWN),
            'R' => Some(Cell::RED_KING),
            'b' => Some(Cell::BLACK_PAWN),
            'B' => Some(Cell::BLACK_KING),
            _ => None,
        }
    }
}

/// Board coordinate as `(row, col)`, both in `0..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major offset into a dense board array.
    #[inline]
    pub const fn offset(self) -> usize {
        (self.row as usize) * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub const fn from_offset(offset: usize) -> Self {
        Self {
            row: (offset / BOARD_SIZE) as u8,
            col: (offset % BOARD_SIZE) as u8,
        }
    }

    /// Neighbour at the given delta, if it stays on the board.
    #[inline]
    pub fn offset_by(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip_through_cells() {
        for symbol in ['.', 'r', 'R', 'b', 'B'] {
            let cell = Cell::from_symbol(symbol).expect("known symbol");
            assert_eq!(cell.symbol(), symbol);
        }
        assert_eq!(Cell::from_symbol('x'), None);
    }

    #[test]
    fn square_neighbours_are_guarded() {
        let corner = Square::new(0, 0);
        assert_eq!(corner.offset_by(-1, 1), None);
        assert_eq!(corner.offset_by(1, 1), Some(Square::new(1, 1)));
        assert_eq!(Square::new(7, 7).offset_by(1, -1), None);
        assert_eq!(Square::from_offset(Square::new(5, 2).offset()), Square::new(5, 2));
    }

    #[test]
    fn colours_mirror_each_other() {
        assert_eq!(Color::Red.opposite(), Color::Black);
        assert_eq!(Color::Red.forward(), -Color::Black.forward());
        assert_eq!(Color::Red.home_row(), Color::Black.crowning_row());
        assert_eq!(Cell::RED_KING.swapped(), Cell::BLACK_KING);
    }
}
