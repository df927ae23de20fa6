//! Selection/match controller
//!
//! Turns discrete "cell picked" events into match attempts. The selection
//! holds at most two distinct picks:
//!
//! - picking an empty cell is ignored
//! - picking a selected cell deselects it
//! - the second distinct pick moves the machine to `Resolving`; picks are
//!   dropped until the selection is cleared
//!
//! A pair that failed to match stays selected (and locked) after evaluation
//! so it can be shown as feedback; [`Selection::hold`] marks it evaluated and
//! [`Selection::clear`] releases it.
//!
//! Match evaluation itself ([`evaluate`]) is a pure function of the board and
//! the two picks; the caller applies the board mutation it describes.

use arrayvec::ArrayVec;
use tile_link_types::{Kind, Point, SelectionState, EMPTY};

use crate::board::Board;
use crate::path::{Path, PathFinder};

/// A selected cell: coordinate plus the kind it held when picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pick {
    pub point: Point,
    pub kind: Kind,
}

/// Why a pick left the selection unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// The cell holds no tile
    EmptyCell,
    /// The coordinate is off the board
    OutOfBounds,
    /// A pair is being resolved
    Resolving,
    /// The round is not accepting input
    NotPlaying,
}

impl IgnoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IgnoreReason::EmptyCell => "emptyCell",
            IgnoreReason::OutOfBounds => "outOfBounds",
            IgnoreReason::Resolving => "resolving",
            IgnoreReason::NotPlaying => "notPlaying",
        }
    }
}

/// What a pick did to the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    Ignored(IgnoreReason),
    /// The pick was added; one tile is now selected
    Selected(Pick),
    /// An already-selected tile was picked again and removed
    Deselected(Pick),
    /// The pick completed a pair; the selection is now `Resolving`
    PairReady { first: Pick, second: Pick },
}

impl SelectionEvent {
    /// True if the event leaves a pair waiting for [`evaluate`]
    pub fn is_pair_ready(&self) -> bool {
        matches!(self, SelectionEvent::PairReady { .. })
    }
}

/// Why two picks did not match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchFailure {
    /// The tiles are of different kinds
    KindMismatch,
    /// Same kind, but no path with at most two turns joins them
    NoPath,
}

impl MatchFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchFailure::KindMismatch => "kindMismatch",
            MatchFailure::NoPath => "noPath",
        }
    }
}

/// Result of evaluating a selected pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub first: Pick,
    pub second: Pick,
    pub result: Result<Path, MatchFailure>,
}

impl MatchOutcome {
    pub fn matched(&self) -> bool {
        self.result.is_ok()
    }

    pub fn path(&self) -> Option<&Path> {
        self.result.as_ref().ok()
    }

    pub fn failure(&self) -> Option<MatchFailure> {
        self.result.as_ref().err().copied()
    }
}

/// Decide whether two picks form a legal match on `board`
///
/// Does not mutate the board; on success the caller empties both cells.
pub fn evaluate(board: &Board, first: Pick, second: Pick) -> MatchOutcome {
    let result = if first.kind != second.kind {
        Err(MatchFailure::KindMismatch)
    } else {
        PathFinder::new(board)
            .find_path(first.point, second.point)
            .ok_or(MatchFailure::NoPath)
    };
    MatchOutcome {
        first,
        second,
        result,
    }
}

/// The current selection and its processing lock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    picks: ArrayVec<Pick, 2>,
    resolving: bool,
    /// Set once the pair has been evaluated and is only held for display
    held: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        if self.resolving {
            SelectionState::Resolving
        } else if self.picks.is_empty() {
            SelectionState::Idle
        } else {
            SelectionState::OneSelected
        }
    }

    pub fn picks(&self) -> &[Pick] {
        &self.picks
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn is_resolving(&self) -> bool {
        self.resolving
    }

    /// True while an evaluated, unmatched pair is kept on display
    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn contains(&self, point: Point) -> bool {
        self.picks.iter().any(|p| p.point == point)
    }

    /// Apply a pick at `point` against the current board
    pub fn pick(&mut self, board: &Board, point: Point) -> SelectionEvent {
        if self.resolving {
            return SelectionEvent::Ignored(IgnoreReason::Resolving);
        }
        let kind = match board.get_at(point) {
            None => return SelectionEvent::Ignored(IgnoreReason::OutOfBounds),
            Some(EMPTY) => return SelectionEvent::Ignored(IgnoreReason::EmptyCell),
            Some(kind) => kind,
        };

        if let Some(idx) = self.picks.iter().position(|p| p.point == point) {
            let removed = self.picks.remove(idx);
            return SelectionEvent::Deselected(removed);
        }

        let pick = Pick { point, kind };
        self.picks.push(pick);
        match self.picks.as_slice() {
            [first, second] => {
                self.resolving = true;
                SelectionEvent::PairReady {
                    first: *first,
                    second: *second,
                }
            }
            _ => SelectionEvent::Selected(pick),
        }
    }

    /// The pair awaiting evaluation, if any
    pub fn pending_pair(&self) -> Option<(Pick, Pick)> {
        match (self.resolving && !self.held, self.picks.as_slice()) {
            (true, [first, second]) => Some((*first, *second)),
            _ => None,
        }
    }

    /// Keep the evaluated pair selected and locked until [`Selection::clear`]
    pub fn hold(&mut self) {
        if self.resolving {
            self.held = true;
        }
    }

    /// Drop every pick and release the processing lock
    pub fn clear(&mut self) {
        self.picks.clear();
        self.resolving = false;
        self.held = false;
    }
}
