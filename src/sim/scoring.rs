//! Scoring and difficulty
//!
//! Hits are resolved in field order. A bonus pays out once and turns into
//! `Consumed`; an obstacle ends the run and stops evaluation. Independently,
//! every segment pays one pass-through point once its trailing edge clears the
//! actor.

use super::field::Hit;
use super::segment::PieceKind;
use super::state::{GameEvent, GamePhase, GameState};

/// Number of ramp milestones a score has reached. Milestones sit on scores
/// `≡ 1 (mod interval)`: 1, 11, 21, ... for an interval of 10.
#[inline]
pub fn milestone(score: u64, interval: u64) -> u64 {
    if score == 0 { 0 } else { (score - 1) / interval + 1 }
}

/// Apply this tick's collisions
pub fn resolve_hits(state: &mut GameState, hits: &[Hit], events: &mut Vec<GameEvent>) {
    let bonus_value = state.config.bonus_value;

    for hit in hits {
        if state.phase != GamePhase::Running {
            break;
        }
        let Some(piece) = state
            .field
            .get_mut(hit.segment)
            .and_then(|segment| segment.pieces.get_mut(hit.piece))
        else {
            continue;
        };

        match piece.kind {
            PieceKind::Bonus => {
                piece.kind = PieceKind::Consumed;
                state.score += bonus_value;
                log::trace!("Bonus on lane {} (+{})", piece.lane, bonus_value);
                events.push(GameEvent::BonusCollected {
                    points: bonus_value,
                });
            }
            PieceKind::Consumed => {}
            PieceKind::Obstacle => {
                state.phase = GamePhase::Ended;
                log::info!(
                    "Crashed on lane {} at tick {} with score {}",
                    piece.lane,
                    state.tick_count,
                    state.score
                );
                events.push(GameEvent::Crashed { lane: piece.lane });
            }
        }
    }
}

/// Award the pass-through point for every segment that has fully cleared the actor
pub fn award_pass_through(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Running {
        return;
    }
    let actor_x = state.actor.x;
    let width = state.field.segment_width();

    for segment in state.field.segments_mut() {
        if !segment.score_counted && segment.trailing_edge(width) < actor_x {
            segment.score_counted = true;
            state.score += 1;
            events.push(GameEvent::SegmentPassed);
        }
    }
}

/// Raise the pace once per newly reached milestone, at most one step per tick
pub fn apply_difficulty_ramp(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Running {
        return;
    }
    let reached = milestone(state.score, state.config.ramp_interval);
    if state.ramp_milestone >= reached {
        return;
    }

    state.ramp_milestone += 1;
    state.scroll_speed += state.config.ramp_scroll_step;
    state.backdrop.speed += state.config.ramp_backdrop_step;
    state.frame_rate += state.config.ramp_frame_rate_step;
    log::info!(
        "Speed ramp #{} at score {}: scroll={:.4} px/ms, backdrop={:.2}, fps={}",
        state.ramp_milestone,
        state.score,
        state.scroll_speed,
        state.backdrop.speed,
        state.frame_rate
    );
    events.push(GameEvent::SpeedRamp {
        scroll_speed: state.scroll_speed,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::segment::{Piece, Segment};
    use crate::tuning::{Preset, SimulationConfig};

    fn state_with(config: SimulationConfig) -> GameState {
        GameState::new(config, 1).unwrap()
    }

    fn push_segment(state: &mut GameState, x: f32, pieces: &[(usize, PieceKind)]) {
        let lanes = state.config.lane_geometry();
        state.field.push(Segment::new(
            x,
            pieces
                .iter()
                .map(|&(lane, kind)| Piece {
                    kind,
                    lane,
                    lane_y: lanes.offset(lane),
                })
                .collect(),
        ));
    }

    #[test]
    fn test_milestones() {
        assert_eq!(milestone(0, 10), 0);
        assert_eq!(milestone(1, 10), 1);
        assert_eq!(milestone(10, 10), 1);
        assert_eq!(milestone(11, 10), 2);
        assert_eq!(milestone(30, 10), 3);
    }

    #[test]
    fn test_bonus_is_idempotent() {
        let mut state = state_with(SimulationConfig::default());
        push_segment(&mut state, 0.0, &[(1, PieceKind::Bonus)]);
        let hits = [Hit { segment: 0, piece: 0 }];
        let mut events = Vec::new();

        resolve_hits(&mut state, &hits, &mut events);
        assert_eq!(state.score, 1);
        assert_eq!(
            state.field.get(0).map(|s| s.pieces[0].kind),
            Some(PieceKind::Consumed)
        );
        assert!(!state.field.get(0).is_some_and(|s| s.score_counted));

        // Same contact on the next tick
        resolve_hits(&mut state, &hits, &mut events);
        assert_eq!(state.score, 1);
        assert_eq!(events, vec![GameEvent::BonusCollected { points: 1 }]);
        assert!(state.is_alive());
    }

    #[test]
    fn test_campus_bonus_value() {
        let mut state = state_with(SimulationConfig::from_preset(Preset::Campus));
        push_segment(&mut state, 0.0, &[(1, PieceKind::Bonus)]);
        let mut events = Vec::new();
        resolve_hits(&mut state, &[Hit { segment: 0, piece: 0 }], &mut events);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_obstacle_ends_and_stops_evaluation() {
        let mut state = state_with(SimulationConfig::default());
        push_segment(&mut state, 0.0, &[(1, PieceKind::Obstacle)]);
        push_segment(&mut state, 0.0, &[(1, PieceKind::Bonus)]);
        let hits = [Hit { segment: 0, piece: 0 }, Hit { segment: 1, piece: 0 }];
        let mut events = Vec::new();

        resolve_hits(&mut state, &hits, &mut events);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.score, 0);
        assert_eq!(events, vec![GameEvent::Crashed { lane: 1 }]);
    }

    #[test]
    fn test_pass_through_awarded_once() {
        let mut state = state_with(SimulationConfig::default());
        push_segment(&mut state, 200.0, &[(0, PieceKind::Obstacle), (2, PieceKind::Bonus)]);
        let mut events = Vec::new();

        for _ in 0..100 {
            state.field.advance(1000.0 / 60.0, state.scroll_speed);
            award_pass_through(&mut state, &mut events);
        }
        assert_eq!(state.score, 1);
        assert_eq!(events, vec![GameEvent::SegmentPassed]);
    }

    #[test]
    fn test_no_pass_through_after_crash() {
        let mut state = state_with(SimulationConfig::default());
        push_segment(&mut state, -90.0, &[(0, PieceKind::Obstacle)]);
        state.phase = GamePhase::Ended;
        let mut events = Vec::new();
        award_pass_through(&mut state, &mut events);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_ramp_fires_once_per_ten_points() {
        let mut state = state_with(SimulationConfig::default());
        let base = state.scroll_speed;
        let mut events = Vec::new();

        for _ in 0..30 {
            state.score += 1;
            // Several ticks at the same score must not re-fire
            for _ in 0..5 {
                apply_difficulty_ramp(&mut state, &mut events);
            }
        }

        let ramps = events
            .iter()
            .filter(|e| matches!(e, GameEvent::SpeedRamp { .. }))
            .count();
        assert_eq!(ramps, 3);
        assert!((state.scroll_speed - (base + 0.003)).abs() < 1e-5);
        assert!((state.backdrop.speed - 3.15).abs() < 1e-4);
        assert_eq!(state.frame_rate, 60);
    }

    #[test]
    fn test_ramp_catches_up_on_skipped_milestone() {
        let mut state = state_with(SimulationConfig::from_preset(Preset::Campus));
        let mut events = Vec::new();
        // 9 -> 12 jumps over 11
        state.score = 9;
        apply_difficulty_ramp(&mut state, &mut events);
        state.score = 12;
        apply_difficulty_ramp(&mut state, &mut events);
        apply_difficulty_ramp(&mut state, &mut events);
        assert_eq!(state.ramp_milestone, 2);
        assert_eq!(events.len(), 2);
        assert_eq!(state.frame_rate, 80);
    }
}
