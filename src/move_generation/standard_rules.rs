//! Reference English-draughts rules.
//!
//! The agent treats move generation as a host capability; this implementation
//! is what the crate's own tests and benches plug in. Captures are mandatory,
//! multi-jumps continue with the same piece, and crowning ends the move.

use crate::game_state::board::Board;
use crate::game_state::checkers_move::CheckersMove;
use crate::game_state::checkers_types::{Cell, Color, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError, MoveGenerator};

const RED_PAWN_DIRECTIONS: [(i8, i8); 2] = [(1, -1), (1, 1)];
const BLACK_PAWN_DIRECTIONS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];
const KING_DIRECTIONS: [(i8, i8); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

#[inline]
fn directions(cell: Cell) -> &'static [(i8, i8)] {
    match cell {
        Cell::Empty => &[],
        Cell::Occupied(_, PieceKind::King) => &KING_DIRECTIONS,
        Cell::Occupied(Color::Red, PieceKind::Pawn) => &RED_PAWN_DIRECTIONS,
        Cell::Occupied(Color::Black, PieceKind::Pawn) => &BLACK_PAWN_DIRECTIONS,
    }
}

#[inline]
fn crowns(cell: Cell, color: Color, square: Square) -> bool {
    matches!(cell, Cell::Occupied(_, PieceKind::Pawn)) && square.row == color.crowning_row()
}

impl StandardRules {
    /// Depth-first expansion of every maximal jump chain from `from`.
    ///
    /// `board` must already have the moving piece lifted off its origin.
    fn collect_jumps(
        board: &Board,
        from: Square,
        piece: Cell,
        color: Color,
        path: &mut Vec<Square>,
        jumped: &mut Vec<Square>,
        out: &mut Vec<CheckersMove>,
    ) {
        let mut extended = false;
        for &(d_row, d_col) in directions(piece) {
            let (Some(over), Some(land)) = (
                from.offset_by(d_row, d_col),
                from.offset_by(2 * d_row, 2 * d_col),
            ) else {
                continue;
            };
            if !board.get(over).is_color(color.opposite())
                || jumped.contains(&over)
                || !board.get(land).is_empty()
            {
                continue;
            }

            extended = true;
            path.push(land);
            jumped.push(over);
            if crowns(piece, color, land) {
                out.push(CheckersMove::jump(path.clone(), jumped.clone()));
            } else {
                Self::collect_jumps(board, land, piece, color, path, jumped, out);
            }
            path.pop();
            jumped.pop();
        }

        if !extended && !jumped.is_empty() {
            out.push(CheckersMove::jump(path.clone(), jumped.clone()));
        }
    }

    pub fn jump_moves(board: &Board, color: Color) -> Vec<CheckersMove> {
        let mut out = Vec::new();
        for (square, owner, cell) in board.pieces() {
            if owner != color {
                continue;
            }
            let mut lifted = board.clone();
            lifted.set(square, Cell::Empty);
            let mut path = vec![square];
            let mut jumped = Vec::new();
            Self::collect_jumps(&lifted, square, cell, color, &mut path, &mut jumped, &mut out);
        }
        out
    }

    pub fn step_moves(board: &Board, color: Color) -> Vec<CheckersMove> {
        let mut out = Vec::new();
        for (square, owner, cell) in board.pieces() {
            if owner != color {
                continue;
            }
            for &(d_row, d_col) in directions(cell) {
                if let Some(to) = square.offset_by(d_row, d_col) {
                    if board.get(to).is_empty() {
                        out.push(CheckersMove::step(square, to));
                    }
                }
            }
        }
        out
    }
}

impl MoveGenerator for StandardRules {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<CheckersMove>> {
        let jumps = Self::jump_moves(&game_state.board, game_state.side_to_move);
        if !jumps.is_empty() {
            return Ok(jumps);
        }
        Ok(Self::step_moves(&game_state.board, game_state.side_to_move))
    }

    fn apply_move(&self, game_state: &GameState, mv: &CheckersMove) -> MoveGenResult<GameState> {
        let (Some(origin), Some(destination)) = (mv.origin(), mv.destination()) else {
            return Err(MoveGenerationError::IllegalMove("empty move path".to_owned()));
        };
        let color = game_state.side_to_move;
        let piece = game_state.board.get(origin);
        if !piece.is_color(color) {
            return Err(MoveGenerationError::IllegalMove(format!(
                "no {color} piece on {origin}"
            )));
        }
        if origin != destination && !game_state.board.get(destination).is_empty() {
            return Err(MoveGenerationError::IllegalMove(format!(
                "destination {destination} is occupied"
            )));
        }

        let mut board = game_state.board.clone();
        board.set(origin, Cell::Empty);
        for &square in &mv.jumped {
            if !board.get(square).is_color(color.opposite()) {
                return Err(MoveGenerationError::IllegalMove(format!(
                    "no opponent piece to capture on {square}"
                )));
            }
            board.set(square, Cell::Empty);
        }
        let landed = if crowns(piece, color, destination) {
            Cell::king(color)
        } else {
            piece
        };
        board.set(destination, landed);

        Ok(GameState {
            board,
            side_to_move: color.opposite(),
            turns_since_last_jump: if mv.is_jump() {
                0
            } else {
                game_state.turns_since_last_jump + 1
            },
        })
    }
}
