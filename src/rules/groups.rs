//! Connected groups, liberties, and the capture sweep.
//!
//! All searches are iterative flood fills over orthogonal adjacency with an
//! explicit visited set, so large groups cannot overflow the stack.

use rustc_hash::FxHashSet;

use crate::core::{Board, Piece, Position};

/// A maximal set of same-colored, orthogonally connected stones.
#[derive(Clone, Debug)]
pub struct Group {
    /// Color of every stone in the group.
    pub color: Piece,
    /// Stones in the group.
    pub stones: FxHashSet<Position>,
    /// Distinct empty intersections adjacent to the group.
    pub liberties: FxHashSet<Position>,
}

impl Group {
    /// Number of stones in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    /// A group always has at least one stone.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// Check whether the group has no liberties left.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.liberties.is_empty()
    }

    /// Check whether a position is one of the group's stones.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.stones.contains(&pos)
    }
}

/// The group containing the stone at `pos`, or `None` if the cell is empty.
#[must_use]
pub fn group_at(board: &Board, pos: Position) -> Option<Group> {
    let color = board.get(pos)?;
    let size = board.size();

    let mut stones = FxHashSet::default();
    let mut liberties = FxHashSet::default();
    let mut frontier = vec![pos];
    stones.insert(pos);

    while let Some(current) = frontier.pop() {
        for adjacent in current.neighbors(size) {
            match board.get(adjacent) {
                None => {
                    liberties.insert(adjacent);
                }
                Some(c) if c == color => {
                    if stones.insert(adjacent) {
                        frontier.push(adjacent);
                    }
                }
                Some(_) => {}
            }
        }
    }

    Some(Group {
        color,
        stones,
        liberties,
    })
}

/// Liberties of the group containing `pos`; 0 for an empty cell.
#[must_use]
pub fn count_liberties(board: &Board, pos: Position) -> usize {
    group_at(board, pos).map_or(0, |g| g.liberties.len())
}

/// Result of a capture sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct Sweep {
    /// Board with dead groups removed.
    pub board: Board,
    /// Black stones removed (credited to white).
    pub black_removed: u32,
    /// White stones removed (credited to black).
    pub white_removed: u32,
}

impl Sweep {
    /// Stones of `piece` removed by the sweep.
    #[must_use]
    pub fn removed(&self, piece: Piece) -> u32 {
        match piece {
            Piece::Black => self.black_removed,
            Piece::White => self.white_removed,
        }
    }
}

/// Remove every group with zero liberties.
///
/// Liberties are evaluated against `board` as given, not progressively, so
/// removal order does not matter. The group containing `except` (the stone
/// just played) is never removed.
#[must_use]
pub fn clean(board: &Board, except: Option<Position>) -> Sweep {
    let mut next = board.clone();
    let mut seen: FxHashSet<Position> = FxHashSet::default();
    let mut black_removed = 0;
    let mut white_removed = 0;

    for (pos, _) in board.stones() {
        if seen.contains(&pos) {
            continue;
        }
        let Some(group) = group_at(board, pos) else {
            continue;
        };
        seen.extend(group.stones.iter().copied());

        let protected = except.is_some_and(|e| group.contains(e));
        if !group.is_dead() || protected {
            continue;
        }

        for stone in &group.stones {
            next = next.without(*stone);
        }
        let removed = group.len() as u32;
        match group.color {
            Piece::Black => black_removed += removed,
            Piece::White => white_removed += removed,
        }
    }

    Sweep {
        board: next,
        black_removed,
        white_removed,
    }
}
