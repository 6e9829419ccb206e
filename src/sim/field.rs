//! The live obstacle field
//!
//! Segments are kept oldest-first. New segments enter at the back, and since
//! every segment scrolls at the same speed the front one is always the first to
//! leave the screen.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::collision::{actor_hits_segment, nearest_piece};
use super::segment::{Segment, SegmentGenerator};
use crate::tuning::SimulationConfig;

/// A collision credited to one piece of one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Position of the segment in the field (0 = oldest)
    pub segment: usize,
    /// Index of the credited piece within the segment
    pub piece: usize,
}

/// FIFO of live segments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    segments: VecDeque<Segment>,
    generator: SegmentGenerator,
    spawn_interval_ticks: u64,
    segment_width: f32,
    piece_height: f32,
}

impl Field {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            segments: VecDeque::new(),
            generator: SegmentGenerator::new(config),
            spawn_interval_ticks: config.spawn_interval_ticks().max(1),
            segment_width: config.segment_width,
            piece_height: config.piece_height,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn segments_mut(&mut self) -> impl Iterator<Item = &mut Segment> {
        self.segments.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Segment> {
        self.segments.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn segment_width(&self) -> f32 {
        self.segment_width
    }

    /// Append a segment behind the newest one
    pub fn push(&mut self, segment: Segment) {
        self.segments.push_back(segment);
    }

    /// Spawn one segment if `tick_count` lands on the cadence. Returns whether
    /// a segment was added.
    pub fn maybe_spawn<R: Rng + ?Sized>(&mut self, tick_count: u64, rng: &mut R) -> bool {
        if tick_count % self.spawn_interval_ticks != 0 {
            return false;
        }
        let segment = self.generator.generate(rng);
        log::debug!(
            "Tick {}: spawned segment with {} piece(s)",
            tick_count,
            segment.pieces.len()
        );
        self.segments.push_back(segment);
        true
    }

    /// Scroll every segment by `speed * elapsed_ms`
    pub fn advance(&mut self, elapsed_ms: f32, speed: f32) {
        let distance = speed * elapsed_ms;
        for segment in &mut self.segments {
            segment.advance(distance);
        }
    }

    /// Drop segments that have fully left the screen, counting the span each
    /// one swept on the latest advance. Returns how many went.
    pub fn evict_offscreen(&mut self) -> usize {
        let mut evicted = 0;
        while self
            .segments
            .front()
            .is_some_and(|s| s.is_offscreen(self.segment_width))
        {
            self.segments.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// At most one hit per segment, oldest segment first
    pub fn query_collisions(&self, actor: &Actor) -> Vec<Hit> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, segment)| {
                actor_hits_segment(actor, segment, self.segment_width, self.piece_height)
            })
            .filter_map(|(index, segment)| {
                nearest_piece(&segment.pieces, actor.y).map(|piece| Hit {
                    segment: index,
                    piece,
                })
            })
            .collect()
    }
}
