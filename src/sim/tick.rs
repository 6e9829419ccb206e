//! Simulation tick
//!
//! One call advances the whole run by one discrete step:
//! input → spawn → scroll → evict → collisions → scoring → actor motion.

use super::actor::LaneCommand;
use super::autopilot;
use super::scoring::{apply_difficulty_ramp, award_pass_through, resolve_hits};
use super::state::{GameEvent, GamePhase, GameState, Snapshot};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Edge-triggered lane changes, applied in order
    pub commands: Vec<LaneCommand>,
    /// Pause toggle
    pub pause: bool,
    /// Let the built-in pilot steer
    pub autopilot: bool,
}

impl TickInput {
    pub fn command(command: LaneCommand) -> Self {
        Self {
            commands: vec![command],
            ..Default::default()
        }
    }
}

/// Advance the run by `elapsed_ms` of simulated time
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f32) -> Snapshot {
    let mut events = Vec::new();

    if state.phase == GamePhase::Ended {
        return state.snapshot(events);
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused at tick {}", state.tick_count);
                events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                log::debug!("Resumed at tick {}", state.tick_count);
                events.push(GameEvent::Resumed);
            }
            GamePhase::Ended => {}
        }
    }

    // Lane changes are serviced even while paused
    for &command in &input.commands {
        state.actor.apply(command);
    }
    if input.autopilot && state.phase == GamePhase::Running {
        if let Some(command) = autopilot::steer(state) {
            state.actor.apply(command);
        }
    }

    if state.phase == GamePhase::Paused {
        return state.snapshot(events);
    }

    let elapsed_ms = elapsed_ms.max(0.0);

    if state.config.auto_spawn && state.field.maybe_spawn(state.tick_count, &mut state.rng) {
        events.push(GameEvent::SegmentSpawned);
    }
    state.field.advance(elapsed_ms, state.scroll_speed);
    state.field.evict_offscreen();

    let hits = state.field.query_collisions(&state.actor);
    resolve_hits(state, &hits, &mut events);
    award_pass_through(state, &mut events);
    apply_difficulty_ramp(state, &mut events);

    if state.phase == GamePhase::Running {
        state.actor.advance(elapsed_ms);
        state.backdrop.scroll();
    }
    state.tick_count += 1;

    state.snapshot(events)
}
