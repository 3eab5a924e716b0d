//! Space Siege - a three-level arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawners, boss, collisions, state machine)
//! - `session`: Glue between the simulation, audio and the persisted score log
//! - `renderer`: Render contract and HUD view model
//! - `platform`: Keyboard and clock seams
//! - `audio`: Sound cues and music control
//! - `highscores`: Append-only score log

pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::PersistenceError;
pub use highscores::{MemoryScores, ScoreLog, ScoreStore};
pub use session::{FrameOutcome, Session};
pub use settings::Settings;

/// Game configuration constants
///
/// Speeds are in pixels per second, intervals in seconds.
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_START_Y: f32 = 500.0;
    pub const PLAYER_SPEED: f32 = 120.0;
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    /// Minimum time between shots while fire is held
    pub const FIRE_COOLDOWN: f32 = 0.2;

    /// Player bullets
    pub const BULLET_SPEED: f32 = -240.0;
    pub const BULLET_WIDTH: f32 = 8.0;
    pub const BULLET_HEIGHT: f32 = 16.0;
    pub const BULLET_FRAMES: usize = 5;
    pub const BULLET_FRAME_INTERVAL: f32 = 0.04;
    pub const BULLET_OFFSCREEN_Y: f32 = 0.0;

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 48.0;
    pub const ENEMY_HEIGHT: f32 = 48.0;
    pub const ENEMY_SPAWN_Y: f32 = -50.0;
    /// Spawn x is drawn from [0, ENEMY_SPAWN_X_RANGE)
    pub const ENEMY_SPAWN_X_RANGE: f32 = 750.0;
    pub const ENEMY_SPEED_LEVEL1: f32 = 60.0;
    pub const ENEMY_SPEED_LEVEL2: f32 = 79.2;
    pub const ENEMY_SPAWN_RATE_LEVEL1: f32 = 1.5;
    pub const ENEMY_SPAWN_RATE_LEVEL2: f32 = 1.1;
    pub const ENEMY_SPAWN_RATE_DEFAULT: f32 = 1000.0;
    pub const ENEMY_DAMAGE_LEVEL1: i32 = 10;
    pub const ENEMY_DAMAGE_LEVEL2: i32 = 20;
    pub const ENEMY_DAMAGE_DEFAULT: i32 = 20;
    pub const ENEMY_KILL_SCORE: u32 = 10;
    pub const ANIMATED_ENEMY_FRAMES: usize = 5;
    pub const ANIMATED_ENEMY_FRAME_INTERVAL: f32 = 0.1;

    /// Level progression
    pub const LEVEL2_SCORE_THRESHOLD: u32 = 80;
    pub const LEVEL3_SCORE_THRESHOLD: u32 = 140;
    pub const LEVEL2_MAX_ENEMIES: usize = 4;
    pub const LEVEL2_DOUBLE_SPAWN_FREQ: u32 = 5;
    pub const LEVEL2_DOUBLE_SPAWN_SPEED_BONUS: f32 = 7.2;
    pub const FINAL_LEVEL: u8 = 3;
    pub const LEVEL_TRANSITION_DWELL: f32 = 1.0;

    /// Boss
    pub const BOSS_MAX_HEALTH: i32 = 120;
    pub const BOSS_WIDTH: f32 = 120.0;
    pub const BOSS_HEIGHT: f32 = 100.0;
    pub const BOSS_SPAWN_X: f32 = 300.0;
    pub const BOSS_SPAWN_Y: f32 = -100.0;
    pub const BOSS_FRAMES: usize = 6;
    pub const BOSS_FRAME_INTERVAL: f32 = 0.1;
    pub const BOSS_MOVE_SPEED: f32 = 120.0;
    pub const BOSS_DESCEND_Y: f32 = 100.0;
    pub const BOSS_DESCEND_SPEED: f32 = 48.0;
    pub const BOSS_BULLET_SPEED: f32 = 120.0;
    pub const BOSS_BULLET_SPEED_PHASE2: f32 = 240.0;
    pub const BOSS_BULLET_SPEED_PHASE3: f32 = 288.0;
    pub const BOSS_ATTACK_INTERVAL: f32 = 1.0;
    pub const BOSS_ATTACK_INTERVAL_PHASE2: f32 = 0.7;
    pub const BOSS_ATTACK_INTERVAL_PHASE3: f32 = 0.5;
    /// Muzzle offset from the boss's top-left corner
    pub const BOSS_MUZZLE_X: f32 = 40.0;
    pub const BOSS_MUZZLE_Y: f32 = 60.0;
    pub const BOSS_BULLET_DAMAGE: i32 = 30;
    pub const BOSS_HIT_DAMAGE: i32 = 10;
    pub const BOSS_PHASE2_HP: i32 = 80;
    pub const BOSS_PHASE3_HP: i32 = 50;
    pub const BOSS_SPREAD_BULLET_INTERVAL: f32 = 3.0;
    pub const BOSS_SPREAD_BULLET_COUNT: usize = 4;
    /// Total fan arc in degrees
    pub const BOSS_SPREAD_BULLET_ANGLE: f32 = 40.0;
    pub const BOSS_MINION_SPAWN_INTERVAL: f32 = 3.0;
    pub const BOSS_MINION_SPEED_BONUS: f32 = 24.0;
    pub const BOSS_MINION_MAX_X: f32 = WINDOW_WIDTH - 40.0;

    /// Explosions (cosmetic)
    pub const EXPLOSION_FRAMES: usize = 8;
    pub const EXPLOSION_FRAME_INTERVAL: f32 = 0.08;

    /// Camera shake
    pub const SHAKE_INTENSITY: f32 = 10.0;
    pub const SHAKE_DURATION: f32 = 0.3;

    /// Health power-ups
    pub const HEALTH_POWERUP_SPEED: f32 = 60.0;
    pub const HEALTH_POWERUP_SPAWN_MIN: f32 = 8.0;
    pub const HEALTH_POWERUP_SPAWN_MAX: f32 = 15.0;
    pub const HEALTH_POWERUP_AMOUNT: i32 = 50;
    /// Power-ups only spawn (and are only drawn) below this health
    pub const HEALTH_POWERUP_THRESHOLD: i32 = 50;
    pub const HEALTH_POWERUP_SIZE: f32 = 32.0;
    pub const HEALTH_POWERUP_SPAWN_Y: f32 = -40.0;
    pub const HEALTH_POWERUP_MARGIN: f32 = 20.0;

    /// HUD
    pub const HEALTH_BAR_WIDTH: f32 = 200.0;
    pub const HEALTH_BAR_HEIGHT: f32 = 20.0;
}
