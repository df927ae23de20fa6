//! Headless autoplay
//!
//! Plays a round by repeatedly taking the first hint. Greedy play can paint
//! itself into a stalemate, which is reported like any other ending.

use tile_link_core::Round;
use tile_link_types::RoundResult;
use tracing::debug;

use crate::hint::find_hint;

/// Summary of an autoplayed round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayReport {
    pub round_id: u32,
    pub matches: u32,
    pub score: u32,
    /// `None` if the player stopped before the round ended
    pub result: Option<RoundResult>,
    pub remaining_secs: u32,
}

impl AutoplayReport {
    pub fn won(&self) -> bool {
        matches!(self.result, Some(RoundResult::Won))
    }
}

/// Drives a [`Round`] through hint pairs
#[derive(Debug, Clone, Copy, Default)]
pub struct Autoplayer {
    /// Countdown ticks spent per match
    ticks_per_match: u32,
}

impl Autoplayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spend `ticks` seconds of the countdown on every match
    pub fn with_ticks_per_match(mut self, ticks: u32) -> Self {
        self.ticks_per_match = ticks;
        self
    }

    /// Play until the round ends or no hint is left
    pub fn play(&self, round: &mut Round) -> AutoplayReport {
        let mut matches = 0u32;

        while round.is_playing() {
            for _ in 0..self.ticks_per_match {
                round.tick();
            }
            if !round.is_playing() {
                break;
            }
            let Some(hint) = find_hint(round.board()) else {
                break;
            };
            round.pick(hint.first);
            round.pick(hint.second);
            match round.resolve() {
                Some(res) if res.outcome.matched() => {
                    matches += 1;
                    debug!(matches, path = %hint.path, "autoplay match");
                }
                // A hint is always a legal match; anything else means the
                // round did not accept the picks.
                _ => break,
            }
        }

        AutoplayReport {
            round_id: round.round_id(),
            matches,
            score: round.score(),
            result: round.end().map(|e| e.result),
            remaining_secs: round.remaining_secs(),
        }
    }
}
