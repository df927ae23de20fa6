use tile_link_types::{Kind, Phase, Point, RoundResult, SelectionState, EMPTY};

/// Everything a presentation layer needs to draw one frame of a round
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoundSnapshot {
    /// Board rows, `rows[y][x]`
    pub rows: Vec<Vec<Kind>>,
    pub selection: Vec<Point>,
    pub selection_state: SelectionState,
    pub score: u32,
    pub phase: Phase,
    pub remaining_secs: u32,
    pub round_id: u32,
    pub result: Option<RoundResult>,
}

impl RoundSnapshot {
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn tiles_left(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&k| k != EMPTY)
            .count()
    }

    pub fn is_selected(&self, p: Point) -> bool {
        self.selection.contains(&p)
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }
}
