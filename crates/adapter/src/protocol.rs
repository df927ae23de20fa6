//! Protocol module - JSON message types for the session adapter
//!
//! Line-delimited JSON. Every message is an object with a `type` field.
//! Outbound messages also carry `seq`, a per-session counter starting at 1.

use serde::{Deserialize, Serialize};

use tile_link_core::{MatchOutcome, Path, RoundEnd, RoundSnapshot, SelectionEvent, TimeUpdate};
use tile_link_engine::Hint;
use tile_link_types::{Kind, Point};

// ============== Client -> Session Messages ==============

/// A command read from the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Deal a fresh round; a seed makes the deal reproducible
    NewRound {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
    Pick { x: i8, y: i8 },
    Hint,
    Snapshot,
    Quit,
}

/// Parse one inbound line
pub fn parse_command(json: &str) -> Result<Command, serde_json::Error> {
    serde_json::from_str(json)
}

// ============== Session -> Client Messages ==============

/// Grid coordinate on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl From<Point> for Coord {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Coord> for Point {
    fn from(c: Coord) -> Self {
        Point::new(c.x, c.y)
    }
}

fn waypoints(path: &Path) -> Vec<Coord> {
    path.waypoints().iter().copied().map(Coord::from).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_command")]
    InvalidCommand,
    #[serde(rename = "not_playing")]
    NotPlaying,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidCommand => "invalid_command",
            ErrorCode::NotPlaying => "not_playing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundStartedEvent {
    pub round_id: u32,
    pub size: u8,
    pub remaining_secs: u32,
    pub board: Vec<Vec<Kind>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionChange {
    Selected,
    Deselected,
    PairReady,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionChangedEvent {
    pub round_id: u32,
    pub change: SelectionChange,
    pub point: Coord,
    /// Cells selected after the change
    pub selected: Vec<Coord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub round_id: u32,
    pub matched: bool,
    pub first: Coord,
    pub second: Coord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Coord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEvent {
    pub round_id: u32,
    pub remaining_secs: u32,
    pub expired: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundEndedEvent {
    pub round_id: u32,
    pub result: String,
    pub time_bonus: u32,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintEvent {
    pub round_id: u32,
    /// `None` when no pair can be connected
    #[serde(default)]
    pub pair: Option<[Coord; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Coord>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEvent {
    pub round_id: u32,
    pub phase: String,
    pub board: Vec<Vec<Kind>>,
    pub selection: Vec<Coord>,
    pub score: u32,
    pub remaining_secs: u32,
    pub tiles_left: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionClearedEvent {
    pub round_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub code: ErrorCode,
    pub message: String,
}

/// Everything the session reports to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    RoundStarted(RoundStartedEvent),
    Selection(SelectionChangedEvent),
    Match(MatchEvent),
    Time(TimeEvent),
    RoundEnded(RoundEndedEvent),
    Hint(HintEvent),
    Snapshot(SnapshotEvent),
    SelectionCleared(SelectionClearedEvent),
    Error(ErrorEvent),
}

impl Event {
    pub fn type_name(&self) -> &'static str {
        match self {
            Event::RoundStarted(_) => "roundStarted",
            Event::Selection(_) => "selection",
            Event::Match(_) => "match",
            Event::Time(_) => "time",
            Event::RoundEnded(_) => "roundEnded",
            Event::Hint(_) => "hint",
            Event::Snapshot(_) => "snapshot",
            Event::SelectionCleared(_) => "selectionCleared",
            Event::Error(_) => "error",
        }
    }
}

/// One outbound line: an event stamped with its sequence number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMessage {
    pub seq: u64,
    #[serde(flatten)]
    pub event: Event,
}

// ============== Utility Functions ==============

/// Create a roundStarted event from a fresh snapshot
pub fn create_round_started(snap: &RoundSnapshot) -> Event {
    Event::RoundStarted(RoundStartedEvent {
        round_id: snap.round_id,
        size: snap.size() as u8,
        remaining_secs: snap.remaining_secs,
        board: snap.rows.clone(),
    })
}

/// Create a selection event for a pick at `point`
pub fn create_selection(
    round_id: u32,
    point: Point,
    event: &SelectionEvent,
    selected: &[Point],
) -> Event {
    let (change, reason) = match event {
        SelectionEvent::Ignored(reason) => (SelectionChange::Ignored, Some(*reason)),
        SelectionEvent::Selected(_) => (SelectionChange::Selected, None),
        SelectionEvent::Deselected(_) => (SelectionChange::Deselected, None),
        SelectionEvent::PairReady { .. } => (SelectionChange::PairReady, None),
    };
    Event::Selection(SelectionChangedEvent {
        round_id,
        change,
        point: point.into(),
        selected: selected.iter().copied().map(Coord::from).collect(),
        reason: reason.map(|r| r.as_str().to_string()),
    })
}

/// Create a match event from a resolved pair
pub fn create_match(round_id: u32, outcome: &MatchOutcome, score: u32) -> Event {
    Event::Match(MatchEvent {
        round_id,
        matched: outcome.matched(),
        first: outcome.first.point.into(),
        second: outcome.second.point.into(),
        path: outcome.path().map(waypoints),
        reason: outcome.failure().map(|f| f.as_str().to_string()),
        score,
    })
}

pub fn create_time(round_id: u32, update: TimeUpdate) -> Event {
    Event::Time(TimeEvent {
        round_id,
        remaining_secs: update.remaining_secs,
        expired: update.expired,
    })
}

pub fn create_round_ended(round_id: u32, end: RoundEnd) -> Event {
    Event::RoundEnded(RoundEndedEvent {
        round_id,
        result: end.result.as_str().to_string(),
        time_bonus: end.time_bonus,
        score: end.final_score,
    })
}

pub fn create_hint(round_id: u32, hint: Option<&Hint>) -> Event {
    Event::Hint(HintEvent {
        round_id,
        pair: hint.map(|h| [h.first.into(), h.second.into()]),
        path: hint.map(|h| waypoints(&h.path)),
    })
}

pub fn create_snapshot(snap: &RoundSnapshot) -> Event {
    Event::Snapshot(SnapshotEvent {
        round_id: snap.round_id,
        phase: snap.phase.as_str().to_string(),
        board: snap.rows.clone(),
        selection: snap.selection.iter().copied().map(Coord::from).collect(),
        score: snap.score,
        remaining_secs: snap.remaining_secs,
        tiles_left: snap.tiles_left(),
        result: snap.result.map(|r| r.as_str().to_string()),
    })
}

pub fn create_selection_cleared(round_id: u32) -> Event {
    Event::SelectionCleared(SelectionClearedEvent { round_id })
}

/// Create an error event
pub fn create_error(code: ErrorCode, message: &str) -> Event {
    Event::Error(ErrorEvent {
        code,
        message: message.to_string(),
    })
}
