//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, hint search, session protocol).
//!
//! # Board Geometry
//!
//! The playfield is a square grid of side `N`:
//!
//! - **Default side**: 8 cells (indexed 0-7 on both axes)
//! - **Coordinates**: `(x, y)` with `x` the column (left to right) and `y` the row (top to bottom)
//! - **Off-board ring**: `-1` and `N` on either axis name the cell one step outside the grid.
//!   Resolved paths may bend through this ring; it is always clear.
//!
//! # Round Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_SIZE` | 8 | Side of the square grid |
//! | `DEFAULT_KIND_COUNT` | 8 | Number of distinct tile faces |
//! | `DEFAULT_RESERVED_CELLS` | 4 | Cells left empty at round start |
//! | `ROUND_SECONDS` | 300 | Countdown length of a round |
//! | `MATCH_REWARD` | 10 | Score added per removed pair |
//! | `TIME_BONUS_PER_SECOND` | 1 | Bonus per remaining second on a win |
//!
//! # Session Timing
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 1000 | Countdown tick interval |
//! | `RESOLVE_DELAY_MS` | 100 | Delay between the second pick and match evaluation |
//! | `FEEDBACK_PAUSE_MS` | 500 | Input lock held after a failed match |
//!
//! # Examples
//!
//! ```
//! use tile_link_types::{Edge, Point, DEFAULT_BOARD_SIZE};
//!
//! let p = Point::new(3, 0);
//! assert_eq!(p.step_outside(Edge::Top, DEFAULT_BOARD_SIZE), Point::new(3, -1));
//! assert_eq!(p.step_outside(Edge::Right, DEFAULT_BOARD_SIZE), Point::new(8, 0));
//!
//! assert_eq!(Edge::from_str("bottom"), Some(Edge::Bottom));
//! ```

/// Default side of the square board (8x8)
pub const DEFAULT_BOARD_SIZE: u8 = 8;

/// Largest supported board side.
///
/// Keeps every coordinate, including the off-board ring at `N`, inside `i8`.
pub const MAX_BOARD_SIZE: u8 = 32;

/// Default number of distinct tile kinds
pub const DEFAULT_KIND_COUNT: u8 = 8;

/// Default number of cells left empty when a board is generated
pub const DEFAULT_RESERVED_CELLS: u16 = 4;

/// Countdown length of a round in seconds (5 minutes)
pub const ROUND_SECONDS: u32 = 300;

/// Score awarded for every removed pair
pub const MATCH_REWARD: u32 = 10;

/// Score awarded per remaining second when the board is cleared
pub const TIME_BONUS_PER_SECOND: u32 = 1;

/// Countdown tick interval in milliseconds
pub const TICK_MS: u64 = 1000;

/// Delay between the second pick and match evaluation
pub const RESOLVE_DELAY_MS: u64 = 100;

/// Input lock held after a failed match before the selection is released
pub const FEEDBACK_PAUSE_MS: u64 = 500;


/// A tile kind (face) stored in a board cell
///
/// - `0` ([`EMPTY`]): no tile
/// - `1..=K`: a tile of that kind
pub type Kind = u8;

/// The empty cell value
pub const EMPTY: Kind = 0;

/// A grid coordinate
///
/// Components are signed so that resolved paths can name the off-board ring
/// (`-1` or `N`) next to each edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i8,
    pub y: i8,
}

impl Point {
    /// Create a point from column and row
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// True if both points share a row or a column
    pub fn is_collinear(&self, other: Point) -> bool {
        self.x == other.x || self.y == other.y
    }

    /// The point one step beyond the board on `edge`, keeping the other coordinate
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_link_types::{Edge, Point};
    ///
    /// assert_eq!(Point::new(5, 5).step_outside(Edge::Left, 8), Point::new(-1, 5));
    /// ```
    pub fn step_outside(&self, edge: Edge, size: u8) -> Point {
        let far = size as i8;
        match edge {
            Edge::Top => Point::new(self.x, -1),
            Edge::Bottom => Point::new(self.x, far),
            Edge::Left => Point::new(-1, self.y),
            Edge::Right => Point::new(far, self.y),
        }
    }
}

impl From<(i8, i8)> for Point {
    fn from((x, y): (i8, i8)) -> Self {
        Self::new(x, y)
    }
}

/// The four board edges, in the order two-turn paths try them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Edges in resolution priority order
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Unit step from a cell toward this edge
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Edge::Top => (0, -1),
            Edge::Bottom => (0, 1),
            Edge::Left => (-1, 0),
            Edge::Right => (1, 0),
        }
    }

    /// Parse edge from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "top" => Some(Edge::Top),
            "bottom" => Some(Edge::Bottom),
            "left" => Some(Edge::Left),
            "right" => Some(Edge::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
            Edge::Right => "right",
        }
    }
}

/// Coarse lifecycle phase of a round
///
/// - **Idle**: no board dealt yet
/// - **Playing**: picks, resolves and ticks are accepted
/// - **Ended**: the round finished; see [`RoundResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Playing,
    Ended,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Playing => "playing",
            Phase::Ended => "ended",
        }
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundResult {
    /// Every tile was removed
    Won,
    /// Tiles remain but no same-kind pair can be connected
    Stalemate,
    /// The countdown reached zero
    TimeUp,
}

impl RoundResult {
    pub fn is_win(&self) -> bool {
        matches!(self, RoundResult::Won)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundResult::Won => "won",
            RoundResult::Stalemate => "stalemate",
            RoundResult::TimeUp => "timeUp",
        }
    }
}

/// State of the selection machine
///
/// - **Idle**: nothing selected
/// - **OneSelected**: one tile highlighted, waiting for its partner
/// - **Resolving**: two tiles selected, match evaluation pending; picks are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    OneSelected,
    Resolving,
}

impl SelectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionState::Idle => "idle",
            SelectionState::OneSelected => "oneSelected",
            SelectionState::Resolving => "resolving",
        }
    }
}
