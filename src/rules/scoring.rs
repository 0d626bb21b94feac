//! Territory counting and final scores.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Board, Game, Piece, Position};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Piece),
    /// Equal scores.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, piece: Piece) -> bool {
        matches!(self, GameResult::Winner(p) if *p == piece)
    }

    /// The winning color, `None` on a draw.
    #[must_use]
    pub fn winner(&self) -> Option<Piece> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// Empty intersections credited to each side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Territory {
    pub black: u32,
    pub white: u32,
    /// Empty points bordering both colors or no stones at all.
    pub neutral: u32,
}

/// Final score: captures plus territory, komi taken from black.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub white: u32,
    pub black: f64,
}

impl Score {
    /// Compare the two sides. Exactly equal scores are a draw.
    #[must_use]
    pub fn result(&self) -> GameResult {
        let white = f64::from(self.white);
        if white > self.black {
            GameResult::Winner(Piece::White)
        } else if self.black > white {
            GameResult::Winner(Piece::Black)
        } else {
            GameResult::Draw
        }
    }
}

/// Credit every empty region to the single color that encloses it.
///
/// Regions touching both colors, or touching no stone at all, count for
/// nobody.
#[must_use]
pub fn territory(board: &Board) -> Territory {
    let size = board.size();
    let mut seen: FxHashSet<Position> = FxHashSet::default();
    let mut result = Territory::default();

    for start in Position::all(size) {
        if board.get(start).is_some() || !seen.insert(start) {
            continue;
        }

        let mut region = 0u32;
        let mut touches_black = false;
        let mut touches_white = false;
        let mut frontier = vec![start];

        while let Some(current) = frontier.pop() {
            region += 1;
            for adjacent in current.neighbors(size) {
                match board.get(adjacent) {
                    Some(Piece::Black) => touches_black = true,
                    Some(Piece::White) => touches_white = true,
                    None => {
                        if seen.insert(adjacent) {
                            frontier.push(adjacent);
                        }
                    }
                }
            }
        }

        match (touches_black, touches_white) {
            (true, false) => result.black += region,
            (false, true) => result.white += region,
            _ => result.neutral += region,
        }
    }

    result
}

/// Final score of a game with the given komi.
#[must_use]
pub fn score(game: &Game, komi: f64) -> Score {
    let area = territory(game.board());
    Score {
        white: game.white_score() + area.white,
        black: f64::from(game.black_score() + area.black) - komi,
    }
}
