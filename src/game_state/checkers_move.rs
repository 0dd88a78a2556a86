//! Move record produced by the host move generator.

use std::fmt;

use crate::game_state::checkers_types::Square;

/// A (possibly multi-jump) move: the squares the piece visits, starting with
/// its origin, plus every opponent square jumped along the way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CheckersMove {
    pub path: Vec<Square>,
    pub jumped: Vec<Square>,
}

impl CheckersMove {
    pub fn step(from: Square, to: Square) -> Self {
        Self {
            path: vec![from, to],
            jumped: Vec::new(),
        }
    }

    pub fn jump(path: Vec<Square>, jumped: Vec<Square>) -> Self {
        Self { path, jumped }
    }

    #[inline]
    pub fn origin(&self) -> Option<Square> {
        self.path.first().copied()
    }

    #[inline]
    pub fn destination(&self) -> Option<Square> {
        self.path.last().copied()
    }

    #[inline]
    pub fn is_jump(&self) -> bool {
        !self.jumped.is_empty()
    }

    #[inline]
    pub fn capture_count(&self) -> usize {
        self.jumped.len()
    }
}

impl fmt::Display for CheckersMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_jump() { "x" } else { "-" };
        for (i, square) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(sep)?;
            }
            write!(f, "{square}")?;
        }
        Ok(())
    }
}
