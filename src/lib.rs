//! Lane Dash - a lane-switching side-scroller
//!
//! Core modules:
//! - `sim`: Deterministic simulation (obstacle field, collisions, scoring)
//! - `tuning`: Data-driven game balance and the variant presets
//! - `highscores`: Last/best score book and leaderboard

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::{ScoreBook, ScoreBookError};
pub use tuning::{ConfigError, OverlapPolicy, Preset, SimulationConfig};

/// Game configuration constants
pub mod consts {
    /// Base simulation frame rate
    pub const FPS: u32 = 60;

    /// Playfield dimensions (background is 284x512, tiled twice)
    pub const WIN_WIDTH: f32 = 568.0;
    pub const WIN_HEIGHT: f32 = 512.0;

    /// Lane layout: piece rows sit at WIN_HEIGHT - PIECE_HEIGHT - (LANE_BASE + i * LANE_SPACING)
    pub const LANE_COUNT: usize = 3;
    pub const LANE_BASE: f32 = 40.0;
    pub const LANE_SPACING: f32 = 87.0;

    /// Segment defaults
    pub const SEGMENT_WIDTH: f32 = 100.0;
    pub const PIECE_HEIGHT: f32 = 32.0;
    /// Interval between new segments (ms)
    pub const SPAWN_INTERVAL_MS: f32 = 500.0;

    /// Actor defaults - x never changes
    pub const ACTOR_X: f32 = 30.0;
    pub const ACTOR_SIZE: f32 = 32.0;
    /// Vertical speed during a lane change (px/ms)
    pub const ACTOR_MOVE_SPEED: f32 = 0.8;
    /// Duration of one lane change (ms)
    pub const ACTOR_MOVE_DURATION_MS: f32 = 100.0;
    pub const ACTOR_START_LANE: usize = 1;
    /// Actor sits this far below its lane's piece row
    pub const ACTOR_LANE_INSET: f32 = 1.0;

    /// Scroll speed of the obstacle field (px/ms)
    pub const SCROLL_SPEED: f32 = 0.8;
    /// Background scroll (px/tick)
    pub const BACKDROP_SPEED: f32 = 3.0;

    /// Difficulty ramp
    pub const RAMP_INTERVAL: u64 = 10;
    pub const RAMP_SCROLL_STEP: f32 = 0.001;
    pub const RAMP_BACKDROP_STEP: f32 = 0.05;
}

/// Convert frames to milliseconds at the given frame rate
#[inline]
pub fn frames_to_msec(frames: f32, fps: u32) -> f32 {
    1000.0 * frames / fps as f32
}

/// Convert milliseconds to frames at the given frame rate
#[inline]
pub fn msec_to_frames(milliseconds: f32, fps: u32) -> f32 {
    fps as f32 * milliseconds / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_conversions() {
        assert!((frames_to_msec(60.0, 60) - 1000.0).abs() < 1e-3);
        assert!((msec_to_frames(500.0, 60) - 30.0).abs() < 1e-3);
    }
}
