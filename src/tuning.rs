//! Data-driven game balance
//!
//! Every tunable the simulation reads lives in [`SimulationConfig`]. The two
//! shipped game variants are expressed as [`Preset`]s rather than separate code paths.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::{frames_to_msec, msec_to_frames};
use crate::sim::LaneGeometry;

/// Invalid construction parameters. Raised once, before a run starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("lane count {lanes} cannot hold segments of up to {pieces} pieces")]
    TooManyPieces { pieces: usize, lanes: usize },
    #[error("lane spacing {spacing} is smaller than piece height {piece_height}")]
    OverlappingLanes { spacing: f32, piece_height: f32 },
    #[error("lane {lane} lies outside the playfield (offset {offset})")]
    LaneOutOfBounds { lane: usize, offset: f32 },
    #[error("start lane {lane} out of range for {lanes} lanes")]
    StartLaneOutOfRange { lane: usize, lanes: usize },
    #[error("bonus probability {0} is not within [0, 1]")]
    BonusProbability(f64),
    #[error("`{0}` must be positive")]
    NonPositive(&'static str),
    #[error("unknown preset `{0}` (expected classic or campus)")]
    UnknownPreset(String),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a lane-change request does to a timer still running in the opposite direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OverlapPolicy {
    /// Both timers keep running and their motion adds up
    #[default]
    Stack,
    /// The opposite timer is cleared before the new one starts
    CancelOpposite,
}

/// Named variants of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Pipes and pass-through scoring at 0.8 px/ms
    #[default]
    Classic,
    /// Slower scroll, 3-point bonuses and a frame-rate bump on every ramp
    Campus,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Campus => "campus",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(Preset::Classic),
            "campus" | "ntu" => Ok(Preset::Campus),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

/// All simulation tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Lanes ===
    pub lane_count: usize,
    /// Distance of lane 0's row above the bottom piece row
    pub lane_base: f32,
    pub lane_spacing: f32,
    pub piece_height: f32,

    // === Segments ===
    pub segment_width: f32,
    /// Upper bound on pieces per segment (lower bound is always 1)
    pub max_pieces: usize,
    pub bonus_probability: f64,
    /// Points per collected bonus
    pub bonus_value: u64,
    pub spawn_interval_ms: f32,
    /// Spawn segments on the cadence (disable for scripted fields)
    pub auto_spawn: bool,

    // === Actor ===
    pub actor_x: f32,
    pub actor_size: f32,
    /// px/ms while a lane change is running
    pub actor_move_speed: f32,
    pub actor_move_duration_ms: f32,
    pub actor_start_lane: usize,
    pub actor_lane_inset: f32,
    pub overlap_policy: OverlapPolicy,

    // === Pace ===
    /// Frame rate the spawn cadence is measured against
    pub frame_rate: u32,
    /// Initial field scroll speed (px/ms)
    pub scroll_speed: f32,
    pub backdrop_width: f32,
    /// Initial background scroll (px/tick)
    pub backdrop_speed: f32,

    // === Difficulty ramp ===
    pub ramp_interval: u64,
    pub ramp_scroll_step: f32,
    pub ramp_backdrop_step: f32,
    pub ramp_frame_rate_step: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            screen_width: WIN_WIDTH,
            screen_height: WIN_HEIGHT,

            lane_count: LANE_COUNT,
            lane_base: LANE_BASE,
            lane_spacing: LANE_SPACING,
            piece_height: PIECE_HEIGHT,

            segment_width: SEGMENT_WIDTH,
            max_pieces: 2,
            // randrange(2) % 3 == 0 only holds for a draw of 0
            bonus_probability: 0.5,
            bonus_value: 1,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            auto_spawn: true,

            actor_x: ACTOR_X,
            actor_size: ACTOR_SIZE,
            actor_move_speed: ACTOR_MOVE_SPEED,
            actor_move_duration_ms: ACTOR_MOVE_DURATION_MS,
            actor_start_lane: ACTOR_START_LANE,
            actor_lane_inset: ACTOR_LANE_INSET,
            overlap_policy: OverlapPolicy::Stack,

            frame_rate: FPS,
            scroll_speed: SCROLL_SPEED,
            backdrop_width: WIN_WIDTH,
            backdrop_speed: BACKDROP_SPEED,

            ramp_interval: RAMP_INTERVAL,
            ramp_scroll_step: RAMP_SCROLL_STEP,
            ramp_backdrop_step: RAMP_BACKDROP_STEP,
            ramp_frame_rate_step: 0,
        }
    }
}

impl SimulationConfig {
    /// Create a config from a preset (applies preset defaults)
    pub fn from_preset(preset: Preset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a preset on top of the current values
    pub fn apply_preset(&mut self, preset: Preset) {
        match preset {
            Preset::Classic => {
                self.scroll_speed = SCROLL_SPEED;
                self.bonus_value = 1;
                self.ramp_frame_rate_step = 0;
            }
            Preset::Campus => {
                self.scroll_speed = 0.6;
                self.bonus_value = 3;
                self.ramp_frame_rate_step = 10;
            }
        }
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Lane layout described by this config
    pub fn lane_geometry(&self) -> LaneGeometry {
        LaneGeometry::new(
            self.lane_count,
            self.screen_height,
            self.piece_height,
            self.lane_base,
            self.lane_spacing,
        )
    }

    /// Spawn cadence in ticks at the base frame rate
    pub fn spawn_interval_ticks(&self) -> u64 {
        msec_to_frames(self.spawn_interval_ms, self.frame_rate).round() as u64
    }

    /// Fixed tick length the headless driver uses (ms)
    pub fn frame_ms(&self) -> f32 {
        frames_to_msec(1.0, self.frame_rate)
    }

    /// Reject layouts and rates the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pieces == 0 || self.max_pieces > self.lane_count {
            return Err(ConfigError::TooManyPieces {
                pieces: self.max_pieces,
                lanes: self.lane_count,
            });
        }
        if self.lane_spacing < self.piece_height {
            return Err(ConfigError::OverlappingLanes {
                spacing: self.lane_spacing,
                piece_height: self.piece_height,
            });
        }
        let geometry = self.lane_geometry();
        let top = self.lane_count - 1;
        let top_offset = geometry.offset(top);
        if top_offset < 0.0 {
            return Err(ConfigError::LaneOutOfBounds {
                lane: top,
                offset: top_offset,
            });
        }
        if self.actor_start_lane >= self.lane_count {
            return Err(ConfigError::StartLaneOutOfRange {
                lane: self.actor_start_lane,
                lanes: self.lane_count,
            });
        }
        if !(0.0..=1.0).contains(&self.bonus_probability) {
            return Err(ConfigError::BonusProbability(self.bonus_probability));
        }

        let positive = [
            ("screen_width", self.screen_width > 0.0),
            ("segment_width", self.segment_width > 0.0),
            ("piece_height", self.piece_height > 0.0),
            ("actor_size", self.actor_size > 0.0),
            ("actor_move_speed", self.actor_move_speed > 0.0),
            ("actor_move_duration_ms", self.actor_move_duration_ms > 0.0),
            ("scroll_speed", self.scroll_speed > 0.0),
            ("backdrop_width", self.backdrop_width > 0.0),
            ("frame_rate", self.frame_rate > 0),
            ("ramp_interval", self.ramp_interval > 0),
        ];
        if let Some(&(name, _)) = positive.iter().find(|(_, ok)| !ok) {
            return Err(ConfigError::NonPositive(name));
        }
        if self.spawn_interval_ticks() == 0 {
            return Err(ConfigError::NonPositive("spawn_interval_ms"));
        }
        Ok(())
    }
}
