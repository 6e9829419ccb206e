//! Built-in pilot for demo and headless runs
//!
//! Looks only at the nearest segment that has not yet cleared the actor and
//! steers one lane at a time toward a lane without an obstacle, preferring one
//! with an uncollected bonus.

use super::actor::LaneCommand;
use super::state::GameState;

/// Pick the lane command for this tick, if any
pub fn steer(state: &GameState) -> Option<LaneCommand> {
    let actor = &state.actor;
    if !actor.is_idle() {
        return None;
    }

    let width = state.field.segment_width();
    let upcoming = state
        .field
        .segments()
        .find(|s| s.trailing_edge(width) >= actor.x)?;

    let current = actor.lane();
    let target = state
        .config
        .lane_geometry()
        .lanes()
        .filter(|&lane| !upcoming.has_obstacle_on(lane))
        .min_by_key(|&lane| (!upcoming.has_bonus_on(lane), lane.abs_diff(current), lane))?;

    match target.cmp(&current) {
        std::cmp::Ordering::Greater => Some(LaneCommand::Ascend),
        std::cmp::Ordering::Less => Some(LaneCommand::Descend),
        std::cmp::Ordering::Equal => None,
    }
}
