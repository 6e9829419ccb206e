//! Collision detection between the actor and the obstacle field
//!
//! Pixel masks are a rendering concern; the simulation tests axis-aligned
//! boxes. Segments move several pixels per tick, so a piece is tested with the
//! box it swept over the tick rather than only its end position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::segment::{Piece, Segment};

/// Axis-aligned box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap; boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Box covered by a piece while its segment moved from `prev_x` to `x`
pub fn swept_piece_box(segment: &Segment, piece: &Piece, width: f32, height: f32) -> Aabb {
    let left = segment.x.min(segment.prev_x);
    let right = segment.x.max(segment.prev_x) + width;
    Aabb {
        min: Vec2::new(left, piece.lane_y),
        max: Vec2::new(right, piece.lane_y + height),
    }
}

/// Whether the actor touches any piece of the segment during this tick
pub fn actor_hits_segment(actor: &Actor, segment: &Segment, width: f32, height: f32) -> bool {
    let actor_box = actor.bounds();
    segment
        .pieces
        .iter()
        .any(|piece| swept_piece_box(segment, piece, width, height).overlaps(&actor_box))
}

/// Index of the piece credited for a hit: nearest by vertical distance to the
/// actor's y, ties resolved to the lowest lane index
pub fn nearest_piece(pieces: &[Piece], actor_y: f32) -> Option<usize> {
    pieces
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let da = (actor_y - a.lane_y).abs();
            let db = (actor_y - b.lane_y).abs();
            da.partial_cmp(&db)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.lane.cmp(&b.lane))
        })
        .map(|(i, _)| i)
}
