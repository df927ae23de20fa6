//! Terminal-state detection
//!
//! Queried after every successful match: an empty board is a win, a
//! non-empty board with no connectable same-kind pair is a stalemate.

use tile_link_types::RoundResult;

use crate::board::{Board, Tile};
use crate::path::{Path, PathFinder};

/// A same-kind pair that can currently be connected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connectable {
    pub first: Tile,
    pub second: Tile,
    pub path: Path,
}

/// True iff every cell is empty
pub fn is_won(board: &Board) -> bool {
    board.is_cleared()
}

/// First connectable same-kind pair in row-major scan order
///
/// Pairs are visited as `(i, j)` with `i < j` over the row-major tile list,
/// so the result is deterministic for a given board.
pub fn first_connectable(board: &Board) -> Option<Connectable> {
    let tiles: Vec<Tile> = board.tiles().collect();
    let finder = PathFinder::new(board);
    for (i, first) in tiles.iter().enumerate() {
        for second in &tiles[i + 1..] {
            if first.kind != second.kind {
                continue;
            }
            if let Some(path) = finder.find_path(first.point, second.point) {
                return Some(Connectable {
                    first: *first,
                    second: *second,
                    path,
                });
            }
        }
    }
    None
}

/// True if at least one same-kind pair has a legal path
pub fn has_possible_moves(board: &Board) -> bool {
    first_connectable(board).is_some()
}

/// Terminal result after a successful match, if the round is over
pub fn check(board: &Board) -> Option<RoundResult> {
    if is_won(board) {
        Some(RoundResult::Won)
    } else if !has_possible_moves(board) {
        Some(RoundResult::Stalemate)
    } else {
        None
    }
}
