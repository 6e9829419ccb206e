//! Lane geometry
//!
//! Lanes are indexed bottom-up: lane 0 is the lowest row on screen and the
//! highest index is the top row. Screen y grows downward, so offsets shrink
//! as the index grows.

use serde::{Deserialize, Serialize};

/// Fixed set of lanes and their vertical pixel offsets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneGeometry {
    count: usize,
    /// y of the lowest piece row that still fits the playfield
    floor: f32,
    base: f32,
    spacing: f32,
}

impl LaneGeometry {
    pub fn new(count: usize, field_height: f32, piece_height: f32, base: f32, spacing: f32) -> Self {
        Self {
            count,
            floor: field_height - piece_height,
            base,
            spacing,
        }
    }

    /// Number of lanes
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Index of the topmost lane
    #[inline]
    pub fn top(&self) -> usize {
        self.count.saturating_sub(1)
    }

    /// Vertical pixel offset (top edge) of a piece placed on lane `index`
    #[inline]
    pub fn offset(&self, index: usize) -> f32 {
        self.floor - (self.base + index as f32 * self.spacing)
    }

    /// All lane indices, bottom first
    pub fn lanes(&self) -> std::ops::Range<usize> {
        0..self.count
    }
}
