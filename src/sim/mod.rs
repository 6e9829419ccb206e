//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes from the caller only
//! - Seeded RNG only
//! - Stable iteration order (field order, oldest segment first)
//! - No rendering or platform dependencies

pub mod actor;
pub mod autopilot;
pub mod collision;
pub mod field;
pub mod lane;
pub mod scoring;
pub mod segment;
pub mod state;
pub mod tick;

pub use actor::{Actor, LaneCommand, VerticalState};
pub use collision::{Aabb, actor_hits_segment, nearest_piece, swept_piece_box};
pub use field::{Field, Hit};
pub use lane::LaneGeometry;
pub use scoring::{apply_difficulty_ramp, award_pass_through, milestone, resolve_hits};
pub use segment::{Piece, PieceKind, Segment, SegmentGenerator};
pub use state::{ActorView, Backdrop, GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{TickInput, tick};
