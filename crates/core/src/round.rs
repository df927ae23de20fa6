//! Round module - the owned per-round context
//!
//! A [`Round`] ties together the board, selection, score, countdown and
//! phase. All transitions are plain method calls returning what happened;
//! scheduling (the one-second tick, the delay before a pair is resolved)
//! belongs to whoever drives the round.
//!
//! Lifecycle:
//!
//! ```text
//! Idle --start/restart--> Playing --(won | stalemate | time up)--> Ended
//!                            ^                                       |
//!                            +----------------restart---------------+
//! ```

use tile_link_types::{Phase, Point, RoundResult};
use tracing::{debug, info};

use crate::board::Board;
use crate::config::RoundConfig;
use crate::generator::generate;
use crate::rng::RandomSource;
use crate::scoring::end_bonus;
use crate::selection::{evaluate, IgnoreReason, MatchOutcome, Selection, SelectionEvent};
use crate::snapshot::RoundSnapshot;
use crate::terminal;
use crate::timer::{Countdown, TickSink, TimeUpdate};

/// How and when a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundEnd {
    pub result: RoundResult,
    pub time_bonus: u32,
    pub final_score: u32,
}

/// Result of resolving a selected pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: MatchOutcome,
    /// Score after the match (before any end-of-round bonus)
    pub score: u32,
    /// Set when this match ended the round
    pub ended: Option<RoundEnd>,
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct Round {
    config: RoundConfig,
    board: Board,
    selection: Selection,
    score: u32,
    phase: Phase,
    countdown: Countdown,
    /// Monotonic round id (increments on every deal).
    round_id: u32,
    end: Option<RoundEnd>,
}

impl Round {
    /// An idle round with an empty board
    pub fn new(config: RoundConfig) -> Self {
        Self {
            board: Board::new(config.board_size),
            selection: Selection::new(),
            score: 0,
            phase: Phase::Idle,
            countdown: Countdown::new(config.round_secs),
            round_id: 0,
            end: None,
            config,
        }
    }

    /// Deal the first board and start playing
    ///
    /// Returns false if the round has already been started.
    pub fn start<R: RandomSource>(&mut self, rng: &mut R) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.deal(rng);
        true
    }

    /// Throw away the current state and deal a fresh round
    pub fn restart<R: RandomSource>(&mut self, rng: &mut R) {
        if self.phase == Phase::Playing {
            debug!(round_id = self.round_id, score = self.score, "abandoning round");
        }
        self.deal(rng);
    }

    fn deal<R: RandomSource>(&mut self, rng: &mut R) {
        let c = self.config;
        self.board = generate(c.board_size, c.kinds, c.reserve, rng);
        self.selection.clear();
        self.score = 0;
        self.end = None;
        self.countdown = Countdown::new(c.round_secs);
        self.countdown.reset();
        self.round_id = self.round_id.wrapping_add(1);
        self.phase = Phase::Playing;
        info!(
            round_id = self.round_id,
            size = c.board_size,
            tiles = self.board.occupied_count(),
            "round started"
        );
    }

    /// Feed a cell pick into the selection
    pub fn pick(&mut self, point: Point) -> SelectionEvent {
        if self.phase != Phase::Playing {
            return SelectionEvent::Ignored(IgnoreReason::NotPlaying);
        }
        let event = self.selection.pick(&self.board, point);
        debug!(x = point.x, y = point.y, event = ?event, "pick");
        event
    }

    /// Evaluate the pending pair
    ///
    /// Returns `None` unless the round is playing and an unevaluated pair is
    /// selected. On a match the board and score are already updated and the
    /// selection is empty when this returns. A failed pair stays selected and
    /// locked until [`Round::release_selection`].
    pub fn resolve(&mut self) -> Option<Resolution> {
        if self.phase != Phase::Playing {
            return None;
        }
        let (first, second) = self.selection.pending_pair()?;
        let outcome = evaluate(&self.board, first, second);

        let mut ended = None;
        if outcome.matched() {
            self.selection.clear();
            self.board.clear_at(first.point);
            self.board.clear_at(second.point);
            self.score = self.score.saturating_add(self.config.match_reward);
            if let Some(result) = terminal::check(&self.board) {
                ended = Some(self.finish(result));
            }
        } else {
            self.selection.hold();
        }
        debug!(
            matched = outcome.matched(),
            failure = outcome.failure().map(|f| f.as_str()),
            score = self.score,
            "resolved pair"
        );

        Some(Resolution {
            outcome,
            score: self.score,
            ended,
        })
    }

    /// Release a failed pair held after [`Round::resolve`]
    ///
    /// Returns false if no evaluated pair was held.
    pub fn release_selection(&mut self) -> bool {
        if !self.selection.is_held() {
            return false;
        }
        self.selection.clear();
        debug!(round_id = self.round_id, "selection released");
        true
    }

    /// Advance the countdown by one second
    ///
    /// The tick that reaches zero ends the round with [`RoundResult::TimeUp`].
    pub fn tick(&mut self) -> TimeUpdate {
        if self.phase != Phase::Playing {
            return self.countdown.update();
        }
        let update = self.countdown.tick();
        if update.expired {
            self.finish(RoundResult::TimeUp);
        }
        update
    }

    fn finish(&mut self, result: RoundResult) -> RoundEnd {
        let time_bonus = end_bonus(
            result,
            self.countdown.remaining(),
            self.config.time_bonus_per_sec,
        );
        self.score = self.score.saturating_add(time_bonus);
        self.countdown.stop();
        self.selection.clear();
        self.phase = Phase::Ended;

        let end = RoundEnd {
            result,
            time_bonus,
            final_score: self.score,
        };
        self.end = Some(end);
        info!(
            round_id = self.round_id,
            result = result.as_str(),
            score = self.score,
            bonus = time_bonus,
            "round ended"
        );
        end
    }

    pub fn is_won(&self) -> bool {
        terminal::is_won(&self.board)
    }

    pub fn has_possible_moves(&self) -> bool {
        terminal::has_possible_moves(&self.board)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// How the round finished, once it has
    pub fn end(&self) -> Option<RoundEnd> {
        self.end
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            rows: self.board.to_rows(),
            selection: self.selection.picks().iter().map(|p| p.point).collect(),
            selection_state: self.selection.state(),
            score: self.score,
            phase: self.phase,
            remaining_secs: self.countdown.remaining(),
            round_id: self.round_id,
            result: self.end.map(|e| e.result),
        }
    }

    /// Replace the board of a playing round (fixtures and replays)
    pub fn load_board(&mut self, board: Board) {
        self.board = board;
        self.selection.clear();
    }
}

impl TickSink for Round {
    fn on_tick(&mut self) -> TimeUpdate {
        self.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use tile_link_types::SelectionState;

    fn small_config() -> RoundConfig {
        RoundConfig {
            board_size: 4,
            kinds: 2,
            reserve: 0,
            round_secs: 5,
            ..RoundConfig::default()
        }
    }

    fn playing(rows: &[[u8; 4]]) -> Round {
        let mut round = Round::new(small_config());
        round.start(&mut SimpleRng::new(1));
        round.load_board(Board::from_rows(rows).unwrap());
        round
    }

    #[test]
    fn test_new_round_is_idle() {
        let mut round = Round::new(RoundConfig::default());
        assert_eq!(round.phase(), Phase::Idle);
        assert_eq!(round.round_id(), 0);
        assert_eq!(
            round.pick(Point::new(0, 0)),
            SelectionEvent::Ignored(IgnoreReason::NotPlaying)
        );
        assert_eq!(round.tick().remaining_secs, 300);
        assert!(round.resolve().is_none());
    }

    #[test]
    fn test_start_deals_and_runs() {
        let mut round = Round::new(RoundConfig::default());
        assert!(round.start(&mut SimpleRng::new(9)));
        assert_eq!(round.phase(), Phase::Playing);
        assert_eq!(round.board().occupied_count(), 60);
        assert_eq!(round.round_id(), 1);
        assert!(!round.start(&mut SimpleRng::new(9)));

        round.restart(&mut SimpleRng::new(10));
        assert_eq!(round.round_id(), 2);
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn test_match_clears_cells_and_scores() {
        let mut round = playing(&[[1, 0, 0, 1], [2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        round.pick(Point::new(0, 0));
        round.pick(Point::new(3, 0));
        assert_eq!(round.selection().state(), SelectionState::Resolving);

        let res = round.resolve().unwrap();
        assert!(res.outcome.matched());
        assert_eq!(res.score, 10);
        assert!(res.ended.is_none());
        assert_eq!(round.board().get(0, 0), Some(0));
        assert_eq!(round.board().get(3, 0), Some(0));
        assert!(round.selection().is_empty());
    }

    #[test]
    fn test_mismatch_keeps_board() {
        let mut round = playing(&[[1, 2, 0, 0], [2, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        round.pick(Point::new(0, 0));
        round.pick(Point::new(1, 0));
        let res = round.resolve().unwrap();
        assert!(!res.outcome.matched());
        assert_eq!(round.score(), 0);
        assert_eq!(round.board().occupied_count(), 4);

        // The failed pair is held for feedback until released.
        assert_eq!(round.selection().state(), SelectionState::Resolving);
        assert_eq!(round.snapshot().selection, vec![Point::new(0, 0), Point::new(1, 0)]);
        assert!(round.resolve().is_none());
        assert_eq!(
            round.pick(Point::new(0, 1)),
            SelectionEvent::Ignored(IgnoreReason::Resolving)
        );

        assert!(round.release_selection());
        assert!(!round.release_selection());
        assert_eq!(round.selection().state(), SelectionState::Idle);
    }

    #[test]
    fn test_last_match_wins_with_bonus() {
        let mut round = playing(&[[1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        round.tick();
        round.pick(Point::new(0, 0));
        round.pick(Point::new(1, 0));
        let res = round.resolve().unwrap();
        let end = res.ended.unwrap();
        assert_eq!(end.result, RoundResult::Won);
        assert_eq!(end.time_bonus, 4);
        assert_eq!(end.final_score, 14);
        assert_eq!(round.phase(), Phase::Ended);
        assert!(round.is_won());

        // Countdown is frozen once the round is over.
        assert_eq!(round.tick().remaining_secs, 4);
    }

    #[test]
    fn test_match_leaving_stuck_pair_is_stalemate() {
        // After the 1s go, the two 2s are separated by a wall of unique kinds.
        let mut round = playing(&[[1, 1, 3, 4], [5, 2, 6, 7], [8, 9, 10, 11], [12, 13, 2, 14]]);
        round.pick(Point::new(0, 0));
        round.pick(Point::new(1, 0));
        let end = round.resolve().unwrap().ended.unwrap();
        assert_eq!(end.result, RoundResult::Stalemate);
        assert_eq!(end.time_bonus, 0);
        assert_eq!(round.snapshot().result, Some(RoundResult::Stalemate));
    }

    #[test]
    fn test_time_up() {
        let mut round = playing(&[[1, 0, 0, 1], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        round.pick(Point::new(0, 0));
        for _ in 0..4 {
            assert!(!round.tick().expired);
        }
        let last = round.tick();
        assert!(last.expired);
        assert_eq!(round.phase(), Phase::Ended);
        assert_eq!(round.end().unwrap().result, RoundResult::TimeUp);
        assert!(round.selection().is_empty());
        assert_eq!(
            round.pick(Point::new(3, 0)),
            SelectionEvent::Ignored(IgnoreReason::NotPlaying)
        );
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut round = playing(&[[1, 0, 0, 1], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 2]]);
        round.pick(Point::new(3, 3));
        let snap = round.snapshot();
        assert_eq!(snap.tiles_left(), 3);
        assert_eq!(snap.selection, vec![Point::new(3, 3)]);
        assert_eq!(snap.selection_state, SelectionState::OneSelected);
        assert_eq!(snap.remaining_secs, 5);
        assert!(snap.playable());
    }
}
