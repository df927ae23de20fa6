use tile_link_core::{first_connectable, Board, Path};
use tile_link_types::Point;

/// A pair the player could match right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub first: Point,
    pub second: Point,
    pub path: Path,
}

/// First connectable same-kind pair in row-major scan order
///
/// Uses the same visiting order as stalemate detection, so a board has a
/// hint exactly when it has a possible move.
pub fn find_hint(board: &Board) -> Option<Hint> {
    first_connectable(board).map(|c| Hint {
        first: c.first.point,
        second: c.second.point,
        path: c.path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_link_core::has_possible_moves;

    #[test]
    fn test_hint_on_empty_board() {
        assert!(find_hint(&Board::new(4)).is_none());
    }

    #[test]
    fn test_hint_picks_first_pair() {
        let board = Board::from_rows(&[[0u8, 3, 0], [1, 0, 3], [0, 0, 1]]).unwrap();
        let hint = find_hint(&board).unwrap();
        assert_eq!(hint.first, Point::new(1, 0));
        assert_eq!(hint.second, Point::new(2, 1));
        assert_eq!(hint.path.start(), hint.first);
        assert_eq!(hint.path.end(), hint.second);
    }

    #[test]
    fn test_hint_agrees_with_move_detection() {
        let stuck = Board::from_rows(&[[1u8, 2], [3, 4]]).unwrap();
        assert_eq!(find_hint(&stuck).is_some(), has_possible_moves(&stuck));
        let open = Board::from_rows(&[[1u8, 1], [0, 0]]).unwrap();
        assert_eq!(find_hint(&open).is_some(), has_possible_moves(&open));
    }
}
