//! The player-controlled actor
//!
//! The actor never moves horizontally. A lane change starts a timed vertical
//! move; the lane index is bookkept at request time, the pixels follow over
//! the next ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::lane::LaneGeometry;
use crate::tuning::{OverlapPolicy, SimulationConfig};

/// Edge-triggered lane change command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneCommand {
    Ascend,
    Descend,
}

/// Vertical motion phase, derived from the two move timers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VerticalState {
    Idle,
    Ascending(f32),
    Descending(f32),
    /// Both timers running; their motion adds up
    Crossing { ascend_ms: f32, descend_ms: f32 },
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    lane: usize,
    top_lane: usize,
    ascend_ms: f32,
    descend_ms: f32,
    move_speed: f32,
    move_duration_ms: f32,
    policy: OverlapPolicy,
}

impl Actor {
    /// Place a fresh actor on the configured start lane
    pub fn new(config: &SimulationConfig, lanes: &LaneGeometry) -> Self {
        let lane = config.actor_start_lane;
        Self {
            x: config.actor_x,
            y: lanes.offset(lane) + config.actor_lane_inset,
            size: config.actor_size,
            lane,
            top_lane: lanes.top(),
            ascend_ms: 0.0,
            descend_ms: 0.0,
            move_speed: config.actor_move_speed,
            move_duration_ms: config.actor_move_duration_ms,
            policy: config.overlap_policy,
        }
    }

    /// Current lane index
    #[inline]
    pub fn lane(&self) -> usize {
        self.lane
    }

    pub fn vertical_state(&self) -> VerticalState {
        match (self.ascend_ms > 0.0, self.descend_ms > 0.0) {
            (false, false) => VerticalState::Idle,
            (true, false) => VerticalState::Ascending(self.ascend_ms),
            (false, true) => VerticalState::Descending(self.descend_ms),
            (true, true) => VerticalState::Crossing {
                ascend_ms: self.ascend_ms,
                descend_ms: self.descend_ms,
            },
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.vertical_state(), VerticalState::Idle)
    }

    /// Move one lane up. Returns false (and does nothing) at the top lane.
    pub fn request_ascend(&mut self) -> bool {
        if self.lane >= self.top_lane {
            return false;
        }
        if self.policy == OverlapPolicy::CancelOpposite {
            self.descend_ms = 0.0;
        }
        self.ascend_ms = self.move_duration_ms;
        self.lane += 1;
        true
    }

    /// Move one lane down. Returns false (and does nothing) at lane 0.
    pub fn request_descend(&mut self) -> bool {
        if self.lane == 0 {
            return false;
        }
        if self.policy == OverlapPolicy::CancelOpposite {
            self.ascend_ms = 0.0;
        }
        self.descend_ms = self.move_duration_ms;
        self.lane -= 1;
        true
    }

    pub fn apply(&mut self, command: LaneCommand) -> bool {
        match command {
            LaneCommand::Ascend => self.request_ascend(),
            LaneCommand::Descend => self.request_descend(),
        }
    }

    /// Run the move timers for `elapsed_ms`. Each timer contributes motion only
    /// for the time it still had left, so a full move covers exactly
    /// `move_speed * move_duration_ms` pixels.
    pub fn advance(&mut self, elapsed_ms: f32) {
        if self.ascend_ms > 0.0 {
            let step = elapsed_ms.min(self.ascend_ms);
            self.y -= self.move_speed * step;
            self.ascend_ms = (self.ascend_ms - step).max(0.0);
        }
        if self.descend_ms > 0.0 {
            let step = elapsed_ms.min(self.descend_ms);
            self.y += self.move_speed * step;
            self.descend_ms = (self.descend_ms - step).max(0.0);
        }
    }

    /// Collision box
    pub fn bounds(&self) -> Aabb {
        Aabb::new(Vec2::new(self.x, self.y), Vec2::splat(self.size))
    }
}
