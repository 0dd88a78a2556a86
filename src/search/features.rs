//! Positional feature extraction.
//!
//! One pass over the board produces a `FeatureVector` per colour. The
//! neighbour predicates (`protection_count`, `vulnerable_threats`,
//! `rescuable_threats`) are public so the time allocator can reuse them.
//!
//! Geometry conventions: red advances toward row 7, black toward row 0. A
//! piece's "backward" neighbours are one row toward its own home row.

use crate::game_state::board::Board;
use crate::game_state::checkers_types::{Cell, Color, PieceKind, Square, LAST_INDEX};

pub const CENTER_ROWS: [u8; 2] = [3, 4];
pub const CENTER_COLS: std::ops::RangeInclusive<u8> = 2..=5;

/// Per-colour counts of the seven evaluation features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureVector {
    pub pawns: u32,
    pub kings: u32,
    pub back_row: u32,
    pub center: u32,
    pub flank_middle: u32,
    pub protected: u32,
    pub vulnerable: u32,
}

impl FeatureVector {
    #[inline]
    pub fn pieces(&self) -> u32 {
        self.pawns + self.kings
    }
}

#[inline]
pub fn in_center(square: Square) -> bool {
    CENTER_ROWS.contains(&square.row) && CENTER_COLS.contains(&square.col)
}

#[inline]
pub fn in_flank_middle(square: Square) -> bool {
    CENTER_ROWS.contains(&square.row) && !CENTER_COLS.contains(&square.col)
}

#[inline]
fn is_interior(square: Square) -> bool {
    (1..LAST_INDEX).contains(&square.row) && (1..LAST_INDEX).contains(&square.col)
}

#[inline]
fn probe(board: &Board, square: Square, d_row: i8, d_col: i8) -> Option<Cell> {
    board.get_signed(square.row as i8 + d_row, square.col as i8 + d_col)
}

/// Protection credits (0..=2) for the piece of `color` on `square`.
///
/// Protection is tallied in one pass per colour, each pass skipping the row
/// that colour starts on. Pieces on columns 0 and 7 cannot be flanked and are
/// credited in every pass that reaches their row, whoever owns them: once on
/// rows 0 and 7, twice elsewhere. Any other piece is credited only in its own
/// colour's pass, and only when both backward diagonal neighbours are
/// occupied by anything other than an opponent king.
pub fn protection_count(board: &Board, square: Square, color: Color) -> u32 {
    if square.col == 0 || square.col == LAST_INDEX {
        return [Color::Red, Color::Black]
            .into_iter()
            .filter(|pass| square.row != pass.home_row())
            .count() as u32;
    }
    if square.row == color.home_row() {
        return 0;
    }
    let back = -color.forward();
    let opponent = color.opposite();
    let backed = [-1i8, 1].iter().all(|&d_col| {
        matches!(probe(board, square, back, d_col), Some(cell) if !cell.is_empty() && !cell.is_king_of(opponent))
    });
    u32::from(backed)
}

/// Attack geometry counted separately by the threat predicates.
#[derive(Debug, Clone, Copy)]
struct Threats {
    pawn_left: bool,
    pawn_right: bool,
    king_left: bool,
    king_right: bool,
}

/// Diagonal attacks on an interior piece of `color`.
///
/// Pawn geometry: an opponent piece (pawn or king) in front of the target
/// with the backward landing square free. King geometry: an opponent king
/// behind the target with the forward landing square free. Only the king
/// symbol is accepted in the second geometry.
fn threats(board: &Board, square: Square, color: Color) -> Threats {
    let fwd = color.forward();
    let opponent = color.opposite();

    let empty = |d_row: i8, d_col: i8| matches!(probe(board, square, d_row, d_col), Some(Cell::Empty));
    let enemy = |d_row: i8, d_col: i8| {
        matches!(probe(board, square, d_row, d_col), Some(cell) if cell.is_color(opponent))
    };
    let king = |d_row: i8, d_col: i8| {
        matches!(probe(board, square, d_row, d_col), Some(cell) if cell.is_king_of(opponent))
    };

    Threats {
        pawn_left: empty(-fwd, -1) && enemy(fwd, 1),
        pawn_right: empty(-fwd, 1) && enemy(fwd, -1),
        king_left: empty(fwd, 1) && king(-fwd, -1),
        king_right: empty(fwd, -1) && king(-fwd, 1),
    }
}

/// Number of attack geometries (0..=2) in which the piece is attacked along
/// both diagonals, leaving it no escape.
pub fn vulnerable_threats(board: &Board, square: Square, color: Color) -> u32 {
    if !is_interior(square) {
        return 0;
    }
    let t = threats(board, square, color);
    u32::from(t.pawn_left && t.pawn_right) + u32::from(t.king_left && t.king_right)
}

/// Number of attack geometries (0..=2) in which the piece is attacked along
/// exactly one diagonal and can still step away.
pub fn rescuable_threats(board: &Board, square: Square, color: Color) -> u32 {
    if !is_interior(square) {
        return 0;
    }
    let t = threats(board, square, color);
    u32::from(t.pawn_left ^ t.pawn_right) + u32::from(t.king_left ^ t.king_right)
}

/// Counts every feature for both colours, indexed by `Color::index`.
pub fn extract_features(board: &Board) -> [FeatureVector; 2] {
    let mut out = [FeatureVector::default(); 2];
    for (square, color, cell) in board.pieces() {
        let v = &mut out[color.index()];
        match cell {
            Cell::Occupied(_, PieceKind::Pawn) => v.pawns += 1,
            Cell::Occupied(_, PieceKind::King) => v.kings += 1,
            Cell::Empty => continue,
        }
        if square.row == color.home_row() {
            v.back_row += 1;
        }
        if in_center(square) {
            v.center += 1;
        } else if in_flank_middle(square) {
            v.flank_middle += 1;
        }
        v.protected += protection_count(board, square, color);
        v.vulnerable += vulnerable_threats(board, square, color);
    }
    out
}

/// `(mine, opponent's)` feature vectors from `side`'s point of view.
#[inline]
pub fn side_features(board: &Board, side: Color) -> (FeatureVector, FeatureVector) {
    let all = extract_features(board);
    (all[side.index()], all[side.opposite().index()])
}

/// Own pieces of `side` standing in the center zone.
pub fn center_count(board: &Board, side: Color) -> u32 {
    board
        .pieces()
        .filter(|(square, color, _)| *color == side && in_center(*square))
        .count() as u32
}

/// Sum of `predicate` over the pieces of `side`.
pub fn count_for_side(
    board: &Board,
    side: Color,
    predicate: impl Fn(&Board, Square, Color) -> u32,
) -> u32 {
    board
        .pieces()
        .filter(|(_, color, _)| *color == side)
        .map(|(square, color, _)| predicate(board, square, color))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(diagram: &str) -> Board {
        Board::from_diagram(diagram).expect("diagram should parse")
    }

    #[test]
    fn empty_board_has_no_features() {
        let features = extract_features(&Board::empty());
        assert_eq!(features, [FeatureVector::default(); 2]);
    }

    #[test]
    fn edge_column_piece_is_protected_without_neighbours() {
        let b = board(
            "........
             ........
             ........
             r.......
             ........
             ........
             ........
             ........",
        );
        let (red, black) = side_features(&b, Color::Red);
        assert_eq!(red.protected, 2);
        assert_eq!(red.flank_middle, 1);
        assert_eq!(black, FeatureVector::default());
    }

    #[test]
    fn edge_column_pieces_on_end_rows_are_credited_once() {
        let b = board(
            ".......r
             ........
             ........
             ........
             ........
             ........
             ........
             b.......",
        );
        assert_eq!(protection_count(&b, Square::new(0, 7), Color::Red), 1);
        assert_eq!(protection_count(&b, Square::new(7, 0), Color::Black), 1);
        let (red, black) = side_features(&b, Color::Red);
        assert_eq!(red.protected, 1);
        assert_eq!(black.protected, 1);
        assert_eq!(red.back_row, 1);
        assert_eq!(black.back_row, 1);
    }

    #[test]
    fn interior_pieces_on_their_home_row_are_never_protected() {
        let b = board(
            ".r.r....
             r.r.....
             ........
             ........
             ........
             ........
             .....b.b
             ....b.b.",
        );
        assert_eq!(protection_count(&b, Square::new(0, 1), Color::Red), 0);
        assert_eq!(protection_count(&b, Square::new(7, 6), Color::Black), 0);
        // Row-1 red pawn backed by both home-row pawns.
        assert_eq!(protection_count(&b, Square::new(1, 2), Color::Red), 1);
        assert_eq!(protection_count(&b, Square::new(6, 5), Color::Black), 1);
    }

    #[test]
    fn backed_piece_is_protected_unless_an_enemy_king_sits_behind() {
        let backed = board(
            "........
             ........
             .r.r....
             ..r.....
             ........
             ........
             ........
             ........",
        );
        assert_eq!(protection_count(&backed, Square::new(3, 2), Color::Red), 1);

        let flanked = board(
            "........
             ........
             .r.B....
             ..r.....
             ........
             ........
             ........
             ........",
        );
        assert_eq!(protection_count(&flanked, Square::new(3, 2), Color::Red), 0);

        let own_pawn_ok = board(
            "........
             ........
             .r.b....
             ..r.....
             ........
             ........
             ........
             ........",
        );
        assert_eq!(protection_count(&own_pawn_ok, Square::new(3, 2), Color::Red), 1);
    }

    #[test]
    fn pinned_piece_is_vulnerable_once() {
        // Black target on (3,3), red attackers in front of it on both
        // diagonals, both landing squares free.
        let b = board(
            "........
             ........
             ..r.r...
             ...b....
             ........
             ........
             ........
             ........",
        );
        let target = Square::new(3, 3);
        assert_eq!(vulnerable_threats(&b, target, Color::Black), 1);
        assert_eq!(rescuable_threats(&b, target, Color::Black), 0);
        let (black, red) = side_features(&b, Color::Black);
        assert_eq!(black.vulnerable, 1);
        assert_eq!(red.vulnerable, 0);
    }

    #[test]
    fn single_attacker_makes_piece_rescuable_not_vulnerable() {
        let b = board(
            "........
             ........
             ..r.....
             ...b....
             ........
             ........
             ........
             ........",
        );
        let target = Square::new(3, 3);
        assert_eq!(vulnerable_threats(&b, target, Color::Black), 0);
        assert_eq!(rescuable_threats(&b, target, Color::Black), 1);
    }

    #[test]
    fn king_geometry_only_counts_enemy_kings() {
        // Red target on (3,3); black pieces behind it (row 2) can only jump
        // forward over it if they are kings.
        let pawns = board(
            "........
             ........
             ..b.b...
             ...r....
             ........
             ........
             ........
             ........",
        );
        assert_eq!(vulnerable_threats(&pawns, Square::new(3, 3), Color::Red), 0);

        let kings = board(
            "........
             ........
             ..B.B...
             ...r....
             ........
             ........
             ........
             ........",
        );
        assert_eq!(vulnerable_threats(&kings, Square::new(3, 3), Color::Red), 1);
    }

    #[test]
    fn lone_king_behind_makes_piece_rescuable() {
        // Black king on (2,2) can jump red (3,3) into (4,4); the pawn on
        // (2,4) cannot move backward, so only one diagonal is attacked.
        let b = board(
            "........
             ........
             ..B.b...
             ...r....
             ........
             ........
             ........
             ........",
        );
        let target = Square::new(3, 3);
        assert_eq!(rescuable_threats(&b, target, Color::Red), 1);
        assert_eq!(vulnerable_threats(&b, target, Color::Red), 0);
    }

    #[test]
    fn blocked_landing_square_removes_threat() {
        let b = board(
            "........
             ........
             ..r.r...
             ...b....
             ..b.....
             ........
             ........
             ........",
        );
        assert_eq!(vulnerable_threats(&b, Square::new(3, 3), Color::Black), 0);
        assert_eq!(rescuable_threats(&b, Square::new(3, 3), Color::Black), 1);
    }

    #[test]
    fn center_and_flank_zones_partition_middle_rows() {
        let b = board(
            "........
             ........
             ........
             r.r.b..b
             .b.r.r..
             ........
             ........
             ........",
        );
        let (red, black) = side_features(&b, Color::Red);
        assert_eq!(red.center, 3);
        assert_eq!(red.flank_middle, 1);
        assert_eq!(black.center, 1);
        assert_eq!(black.flank_middle, 2);
        assert_eq!(center_count(&b, Color::Red), 3);
    }
}
