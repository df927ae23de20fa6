//! Pairing generator - deals a fresh board
//!
//! Every dealt tile has exactly one partner of the same kind:
//!
//! 1. `pairs = floor((N*N - reserve) / 2)` kind pairs are built by cycling
//!    kinds `1..=K` round-robin, so kind counts differ by at most one pair.
//! 2. The kind list is shuffled (Fisher-Yates).
//! 3. All `N*N` positions are shuffled independently.
//! 4. Kinds are written to the first `len(kinds)` shuffled positions; the
//!    rest stay empty.

use tile_link_types::{Kind, Point};
use tracing::debug;

use crate::board::Board;
use crate::rng::RandomSource;

/// Number of pairs dealt on a board of side `size` with `reserve` cells held back
pub fn pair_count(size: u8, reserve: u16) -> usize {
    let cells = size as usize * size as usize;
    cells.saturating_sub(reserve as usize) / 2
}

/// Deal a board of side `size` using `kinds` distinct kinds
///
/// `kinds == 0` yields an empty board; a `reserve` larger than the grid
/// leaves every cell empty.
pub fn generate<R: RandomSource>(size: u8, kinds: u8, reserve: u16, rng: &mut R) -> Board {
    let mut board = Board::new(size);
    if kinds == 0 {
        return board;
    }
    let size = board.size();

    let pairs = pair_count(size, reserve);
    let mut deck: Vec<Kind> = Vec::with_capacity(pairs * 2);
    for i in 0..pairs {
        let kind = (i % kinds as usize) as Kind + 1;
        deck.push(kind);
        deck.push(kind);
    }
    rng.shuffle(&mut deck);

    let mut positions: Vec<Point> = (0..size as i8)
        .flat_map(|y| (0..size as i8).map(move |x| Point::new(x, y)))
        .collect();
    rng.shuffle(&mut positions);

    for (kind, p) in deck.iter().zip(positions.iter()) {
        board.set(p.x, p.y, *kind);
    }

    debug!(size, kinds, reserve, tiles = deck.len(), "dealt board");
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(8, 4), 30);
        assert_eq!(pair_count(8, 5), 29);
        assert_eq!(pair_count(3, 0), 4);
        assert_eq!(pair_count(2, 10), 0);
    }

    #[test]
    fn test_generate_default_board() {
        let mut rng = SimpleRng::new(1);
        let board = generate(8, 8, 4, &mut rng);
        assert_eq!(board.size(), 8);
        assert_eq!(board.occupied_count(), 60);
        for kind in 1..=8u8 {
            assert_eq!(board.count_kind(kind) % 2, 0, "kind {} is unpaired", kind);
        }
    }

    #[test]
    fn test_kind_counts_are_balanced() {
        // 30 pairs over 8 kinds: kinds 1..=6 get 4 pairs, kinds 7..=8 get 3.
        let mut rng = SimpleRng::new(3);
        let board = generate(8, 8, 4, &mut rng);
        for kind in 1..=6u8 {
            assert_eq!(board.count_kind(kind), 8);
        }
        for kind in 7..=8u8 {
            assert_eq!(board.count_kind(kind), 6);
        }
    }

    #[test]
    fn test_odd_cell_count_leaves_extra_gap() {
        let mut rng = SimpleRng::new(5);
        let board = generate(5, 3, 0, &mut rng);
        assert_eq!(board.occupied_count(), 24);
    }

    #[test]
    fn test_zero_kinds_is_empty() {
        let mut rng = SimpleRng::new(5);
        assert!(generate(8, 0, 4, &mut rng).is_cleared());
    }

    #[test]
    fn test_oversized_reserve_is_empty() {
        let mut rng = SimpleRng::new(5);
        assert!(generate(4, 4, 100, &mut rng).is_cleared());
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = generate(8, 8, 4, &mut SimpleRng::new(77));
        let b = generate(8, 8, 4, &mut SimpleRng::new(77));
        let c = generate(8, 8, 4, &mut SimpleRng::new(78));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_placement_covers_every_cell() {
        // With one reserved cell on a 2x2 board, the gap should land on each
        // of the four positions roughly a quarter of the time.
        let mut rng = SimpleRng::new(11);
        let mut gaps = [0u32; 4];
        for _ in 0..8000 {
            let board = generate(2, 1, 2, &mut rng);
            assert_eq!(board.occupied_count(), 2);
            for (idx, &k) in board.cells().iter().enumerate() {
                if k == 0 {
                    gaps[idx] += 1;
                }
            }
        }
        // Two empty cells per board: 16000 gaps over 4 cells.
        for g in gaps {
            assert!((3600..4400).contains(&g), "gap distribution skewed: {:?}", gaps);
        }
    }
}
