//! Engine helpers built on the core rules
//!
//! - [`hint`]: the next legal pair for a board
//! - [`autoplay`]: headless play through hints, used by the `autoplay`
//!   command and by benchmarks

pub mod autoplay;
pub mod hint;

pub use autoplay::{AutoplayReport, Autoplayer};
pub use hint::{find_hint, Hint};
