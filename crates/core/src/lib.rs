//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of a tile-link round. It has no dependencies on
//! rendering, terminals, networking, or clocks, which makes it:
//!
//! - **Deterministic**: the same seed deals the same board
//! - **Testable**: time is advanced by calling [`Round::tick`], not by sleeping
//! - **Portable**: any front end drives it through plain method calls
//!
//! # Module Structure
//!
//! - [`board`]: N x N grid of tile kinds in flat storage
//! - [`generator`]: deals boards where every tile has exactly one partner
//! - [`path`]: finds a connecting path with at most two turns
//! - [`selection`]: pick state machine with a processing lock, plus match evaluation
//! - [`terminal`]: win and stalemate detection
//! - [`timer`]: externally driven countdown
//! - [`scoring`]: match reward and time bonus
//! - [`round`]: the owned per-round context tying it all together
//! - [`config`]: round parameters and validation
//! - [`rng`]: seedable randomness with unbiased shuffles
//!
//! # Game Rules
//!
//! - Two tiles of the same kind match when a path of straight segments with
//!   at most two turns joins them, crossing only empty cells. Paths may leave
//!   the board by one cell on any side.
//! - Each match scores a fixed reward (10 by default).
//! - Clearing the board wins; the seconds left are added as a bonus.
//! - A round also ends when no pair can be connected (stalemate) or when the
//!   countdown reaches zero.
//!
//! # Example
//!
//! ```
//! use tile_link_core::{Round, RoundConfig, SimpleRng};
//! use tile_link_types::Phase;
//!
//! let mut round = Round::new(RoundConfig::default());
//! round.start(&mut SimpleRng::new(12345));
//! assert_eq!(round.phase(), Phase::Playing);
//! assert_eq!(round.board().occupied_count(), 60);
//!
//! let update = round.tick();
//! assert_eq!(update.remaining_secs, 299);
//! ```

pub mod board;
pub mod config;
pub mod generator;
pub mod path;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod selection;
pub mod snapshot;
pub mod terminal;
pub mod timer;

pub use tile_link_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Tile};
pub use config::{ConfigError, RoundConfig};
pub use generator::generate;
pub use path::{find_path, Path, PathFinder, PathShape};
pub use rng::{RandomSource, SimpleRng};
pub use round::{Resolution, Round, RoundEnd};
pub use selection::{
    evaluate, IgnoreReason, MatchFailure, MatchOutcome, Pick, Selection, SelectionEvent,
};
pub use snapshot::RoundSnapshot;
pub use terminal::{first_connectable, has_possible_moves, is_won, Connectable};
pub use timer::{Countdown, TickSink, TimeUpdate};
