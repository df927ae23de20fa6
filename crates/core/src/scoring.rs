//! Scoring rules
//!
//! - every successful match adds `RoundConfig::match_reward`
//! - clearing the board adds a bonus proportional to the seconds left
//!
//! Stalemate and time-up award nothing extra.

use tile_link_types::RoundResult;

/// Bonus awarded when a round ends with `result`
pub fn end_bonus(result: RoundResult, remaining_secs: u32, per_sec: u32) -> u32 {
    match result {
        RoundResult::Won => remaining_secs.saturating_mul(per_sec),
        RoundResult::Stalemate | RoundResult::TimeUp => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_bonus_uses_time_left() {
        assert_eq!(end_bonus(RoundResult::Won, 123, 1), 123);
        assert_eq!(end_bonus(RoundResult::Won, 40, 3), 120);
        assert_eq!(end_bonus(RoundResult::Won, 0, 1), 0);
    }

    #[test]
    fn test_losses_get_no_bonus() {
        assert_eq!(end_bonus(RoundResult::Stalemate, 200, 1), 0);
        assert_eq!(end_bonus(RoundResult::TimeUp, 0, 1), 0);
    }

    #[test]
    fn test_bonus_saturates() {
        assert_eq!(end_bonus(RoundResult::Won, u32::MAX, 2), u32::MAX);
    }
}
