//! Path resolver - finds a connecting line with at most two turns
//!
//! Two tiles connect if a line made of at most three straight legs joins them
//! without crossing another tile. Shapes are tried in a fixed order and the
//! first success is reported, so the returned waypoints are deterministic:
//!
//! 1. **Straight**: same row or column, every cell strictly between is empty.
//! 2. **One turn**: corner `(b.x, a.y)`, then corner `(a.x, b.y)`. The corner
//!    must be empty and both legs straight-clear.
//! 3. **Two turns via an edge**: edges in order top, bottom, left, right. Both
//!    tiles must see the edge along their column/row. The path steps one cell
//!    outside the board, runs along the edge and comes back in. The leg
//!    outside the board is never checked; it is always clear.
//!
//! Endpoints are never required to be empty: they hold the tiles being joined.

use std::fmt;

use arrayvec::ArrayVec;
use tile_link_types::{Edge, Point};

use crate::board::Board;

/// Which rule produced a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathShape {
    Straight,
    OneTurn,
    ViaEdge(Edge),
}

/// Ordered waypoints of a resolved connection (2 to 4 points)
///
/// Consecutive waypoints share a row or column. Waypoints may lie on the
/// off-board ring (`-1` or `N`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    waypoints: ArrayVec<Point, 4>,
    shape: PathShape,
}

impl Path {
    fn straight(a: Point, b: Point) -> Self {
        Self::from_points(&[a, b], PathShape::Straight)
    }

    fn one_turn(a: Point, corner: Point, b: Point) -> Self {
        Self::from_points(&[a, corner, b], PathShape::OneTurn)
    }

    fn via_edge(a: Point, a_out: Point, b_out: Point, b: Point, edge: Edge) -> Self {
        Self::from_points(&[a, a_out, b_out, b], PathShape::ViaEdge(edge))
    }

    fn from_points(points: &[Point], shape: PathShape) -> Self {
        let mut waypoints = ArrayVec::new();
        waypoints.extend(points.iter().copied());
        Self { waypoints, shape }
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    pub fn shape(&self) -> PathShape {
        self.shape
    }

    /// Number of bends (waypoints minus two)
    pub fn turns(&self) -> usize {
        self.waypoints.len().saturating_sub(2)
    }

    pub fn start(&self) -> Point {
        self.waypoints[0]
    }

    pub fn end(&self) -> Point {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// The path walked from the other end
    pub fn reversed(&self) -> Path {
        let mut waypoints = self.waypoints.clone();
        waypoints.reverse();
        Self {
            waypoints,
            shape: self.shape,
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.waypoints.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "({}, {})", p.x, p.y)?;
        }
        Ok(())
    }
}

/// Read-only path queries over a board snapshot
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'a> {
    board: &'a Board,
}

impl<'a> PathFinder<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// Find the connecting path from `a` to `b`, if any
    ///
    /// Returns `None` when `a == b`.
    pub fn find_path(&self, a: Point, b: Point) -> Option<Path> {
        if a == b {
            return None;
        }
        self.find_straight(a, b)
            .or_else(|| self.find_one_turn(a, b))
            .or_else(|| self.find_via_edge(a, b))
    }

    /// True if `a` and `b` can be connected
    pub fn can_connect(&self, a: Point, b: Point) -> bool {
        self.find_path(a, b).is_some()
    }

    fn find_straight(&self, a: Point, b: Point) -> Option<Path> {
        if a.is_collinear(b) && self.is_segment_clear(a, b) {
            return Some(Path::straight(a, b));
        }
        None
    }

    fn find_one_turn(&self, a: Point, b: Point) -> Option<Path> {
        [Point::new(b.x, a.y), Point::new(a.x, b.y)]
            .into_iter()
            .find(|&corner| {
                self.board.is_empty(corner.x, corner.y)
                    && self.is_segment_clear(a, corner)
                    && self.is_segment_clear(corner, b)
            })
            .map(|corner| Path::one_turn(a, corner, b))
    }

    fn find_via_edge(&self, a: Point, b: Point) -> Option<Path> {
        let size = self.board.size();
        Edge::ALL
            .into_iter()
            .find(|&edge| self.can_reach_edge(a, edge) && self.can_reach_edge(b, edge))
            .map(|edge| {
                Path::via_edge(
                    a,
                    a.step_outside(edge, size),
                    b.step_outside(edge, size),
                    b,
                    edge,
                )
            })
    }

    /// True if every cell from `p` (exclusive) to the board edge is empty
    pub fn can_reach_edge(&self, p: Point, edge: Edge) -> bool {
        let (dx, dy) = edge.delta();
        let (mut x, mut y) = (p.x + dx, p.y + dy);
        while self.board.in_bounds(x, y) {
            if !self.board.is_empty(x, y) {
                return false;
            }
            x += dx;
            y += dy;
        }
        true
    }

    /// True if every cell strictly between two collinear points is empty
    ///
    /// Non-collinear points are never clear, and off-board cells are never
    /// empty.
    pub fn is_segment_clear(&self, a: Point, b: Point) -> bool {
        if a.x == b.x {
            let (lo, hi) = (a.y.min(b.y), a.y.max(b.y));
            ((lo + 1)..hi).all(|y| self.board.is_empty(a.x, y))
        } else if a.y == b.y {
            let (lo, hi) = (a.x.min(b.x), a.x.max(b.x));
            ((lo + 1)..hi).all(|x| self.board.is_empty(x, a.y))
        } else {
            false
        }
    }
}

/// Convenience wrapper for [`PathFinder::find_path`]
pub fn find_path(board: &Board, a: Point, b: Point) -> Option<Path> {
    PathFinder::new(board).find_path(a, b)
}
