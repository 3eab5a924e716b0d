//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or file I/O; side effects go out as `GameEvent`s

pub mod autopilot;
pub mod boss;
pub mod collision;
pub mod entities;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{Aabb, resolve_collisions};
pub use entities::{Boss, BossPhase, Bullet, Enemy, EnemyKind, Explosion, FrameAnimator, HealthPowerUp};
pub use state::{
    CameraShake, Cooldown, GameEvent, GameMode, GameState, OneShotFlags, Outcome, Player,
    SessionSummary,
};
pub use tick::{TickInput, enter_outcome, reset_session, tick};
