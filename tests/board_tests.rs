//! Board and pairing generator tests

use tile_link::core::generator::{generate, pair_count};
use tile_link::core::{Board, SimpleRng};
use tile_link::types::{Point, DEFAULT_BOARD_SIZE, EMPTY};

#[test]
fn test_board_new_empty() {
    let board = Board::new(DEFAULT_BOARD_SIZE);
    assert_eq!(board.size(), 8);
    assert_eq!(board.cell_count(), 64);

    // All cells should be empty
    for y in 0..8i8 {
        for x in 0..8i8 {
            assert!(board.is_empty(x, y), "Cell ({}, {}) should be empty", x, y);
            assert_eq!(board.get(x, y), Some(EMPTY));
        }
    }
    assert!(board.is_cleared());
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(8);

    // Negative coordinates
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);

    // Beyond bounds
    assert_eq!(board.get(8, 0), None);
    assert_eq!(board.get(0, 8), None);

    // Off-board cells are neither empty nor occupied
    assert!(!board.is_empty(-1, 3));
    assert!(!board.is_occupied(-1, 3));
}

#[test]
fn test_board_set_and_clear() {
    let mut board = Board::new(8);

    assert!(board.set(5, 2, 4));
    assert_eq!(board.get_at(Point::new(5, 2)), Some(4));
    assert!(board.is_occupied(5, 2));

    assert!(board.clear_at(Point::new(5, 2)));
    assert!(board.is_empty(5, 2));

    assert!(!board.set(8, 8, 1));
    assert!(!board.clear_at(Point::new(-1, 0)));
}

#[test]
fn test_every_generated_kind_is_even() {
    for seed in 0..50u64 {
        let mut rng = SimpleRng::new(seed);
        let board = generate(8, 8, 4, &mut rng);
        for kind in 1..=8u8 {
            assert_eq!(
                board.count_kind(kind) % 2,
                0,
                "seed {} left kind {} unpaired",
                seed,
                kind
            );
        }
        assert_eq!(board.occupied_count(), 2 * pair_count(8, 4));
    }
}

#[test]
fn test_generated_occupancy_for_other_sizes() {
    let mut rng = SimpleRng::new(8);
    for (size, kinds, reserve) in [(4u8, 3u8, 0u16), (5, 4, 3), (6, 12, 6), (10, 8, 4)] {
        let board = generate(size, kinds, reserve, &mut rng);
        let cells = size as usize * size as usize;
        assert_eq!(board.size(), size);
        assert_eq!(board.occupied_count(), 2 * ((cells - reserve as usize) / 2));
        for kind in 1..=kinds {
            assert_eq!(board.count_kind(kind) % 2, 0);
        }
    }
}

#[test]
fn test_more_kinds_than_pairs_uses_the_first_kinds() {
    let mut rng = SimpleRng::new(2);
    // 2x2 board holds two pairs.
    let board = generate(2, 8, 0, &mut rng);
    assert_eq!(board.count_kind(1), 2);
    assert_eq!(board.count_kind(2), 2);
    for kind in 3..=8u8 {
        assert_eq!(board.count_kind(kind), 0);
    }
}
