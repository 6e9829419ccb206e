//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]: tunables that change during
//! the run, the seeded RNG, the actor and the field. Two states never share
//! anything, so parallel simulations cannot interfere.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::field::Field;
use super::segment::Segment;
use crate::tuning::{ConfigError, SimulationConfig};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// Input is serviced, the simulation is frozen
    Paused,
    /// The actor hit an obstacle. Terminal.
    Ended,
}

/// Something that happened during a tick (for renderers, audio and tests)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SegmentSpawned,
    BonusCollected { points: u64 },
    SegmentPassed,
    SpeedRamp { scroll_speed: f32 },
    Crashed { lane: usize },
    Paused,
    Resumed,
}

/// Two background tiles scrolling side by side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backdrop {
    pub offsets: [f32; 2],
    pub width: f32,
    /// px per tick
    pub speed: f32,
}

impl Backdrop {
    pub fn new(width: f32, speed: f32) -> Self {
        Self {
            offsets: [0.0, width],
            width,
            speed,
        }
    }

    /// Scroll one tick; a tile that leaves on the left re-enters behind the other
    pub fn scroll(&mut self) {
        for offset in &mut self.offsets {
            *offset -= self.speed;
            if *offset < -self.width {
                *offset += 2.0 * self.width;
            }
        }
    }
}

/// Complete run state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub config: SimulationConfig,
    pub phase: GamePhase,
    pub score: u64,
    /// Field scroll speed (px/ms); only the difficulty ramp raises it
    pub scroll_speed: f32,
    /// Pacing hint for the driver; raised by the ramp in some presets
    pub frame_rate: u32,
    /// Simulation tick counter, frozen while paused
    pub tick_count: u64,
    /// Last score milestone the difficulty ramp fired for
    pub ramp_milestone: u64,
    pub backdrop: Backdrop,
    pub actor: Actor,
    pub field: Field,
}

impl GameState {
    /// Start a fresh run. Fails on a config the simulation cannot run with.
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let lanes = config.lane_geometry();
        log::info!(
            "New run: seed={}, lanes={}, scroll={} px/ms",
            seed,
            lanes.count(),
            config.scroll_speed
        );

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            scroll_speed: config.scroll_speed,
            frame_rate: config.frame_rate,
            tick_count: 0,
            ramp_milestone: 0,
            backdrop: Backdrop::new(config.backdrop_width, config.backdrop_speed),
            actor: Actor::new(&config, &lanes),
            field: Field::new(&config),
            config,
        })
    }

    /// A new run with the same config
    pub fn restart(&self, seed: u64) -> Result<Self, ConfigError> {
        Self::new(self.config.clone(), seed)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.phase != GamePhase::Ended
    }

    #[inline]
    pub fn current_score(&self) -> u64 {
        self.score
    }

    /// Renderable view of the current state
    pub fn snapshot(&self, events: Vec<GameEvent>) -> Snapshot {
        Snapshot {
            score: self.score,
            alive: self.is_alive(),
            phase: self.phase,
            scroll_speed: self.scroll_speed,
            frame_rate: self.frame_rate,
            tick_count: self.tick_count,
            actor: ActorView {
                x: self.actor.x,
                y: self.actor.y,
                size: self.actor.size,
                lane: self.actor.lane(),
            },
            segments: self.field.segments().cloned().collect(),
            backdrop: self.backdrop.offsets,
            events,
        }
    }
}

/// Actor position for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub lane: usize,
}

/// What a tick hands back to the outer layers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u64,
    pub alive: bool,
    pub phase: GamePhase,
    pub scroll_speed: f32,
    pub frame_rate: u32,
    pub tick_count: u64,
    pub actor: ActorView,
    pub segments: Vec<Segment>,
    pub backdrop: [f32; 2],
    pub events: Vec<GameEvent>,
}
