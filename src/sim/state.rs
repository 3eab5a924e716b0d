//! Game state and core simulation types
//!
//! Everything a session owns lives in `GameState`. Side effects the
//! simulation cannot perform itself (sound, persistence) are queued as
//! `GameEvent`s for the caller to drain after each tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::entities::{Boss, Bullet, Enemy, Explosion, HealthPowerUp};
use crate::consts::*;

/// Top-level mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for the start key
    Start,
    /// Active gameplay
    Playing,
    /// Level banner dwell between levels
    LevelTransition,
    /// Boss defeated
    Won,
    /// Player health ran out
    Lost,
}

impl GameMode {
    pub fn is_over(self) -> bool {
        matches!(self, GameMode::Won | GameMode::Lost)
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

impl From<Outcome> for GameMode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => GameMode::Won,
            Outcome::Lost => GameMode::Lost,
        }
    }
}

/// Snapshot taken once when a session ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub outcome: Outcome,
    pub score: i64,
    pub level: u8,
    pub kills: u32,
    /// Seconds from game start to the end of the session
    pub time_survived: f32,
}

/// Side effects requested by the simulation
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GameStarted,
    ShotFired,
    EnemyDestroyed { pos: Vec2 },
    /// Enemy slipped past the bottom edge
    EnemyBreached { pos: Vec2, damage: i32 },
    PlayerHit { damage: i32 },
    PowerUpCollected { health: i32 },
    /// A level transition began (fired once per level)
    LevelStarted { level: u8 },
    BossSpawned,
    BossHit { health: i32 },
    BossDefeated,
    SessionOver(SessionSummary),
    Restarted,
    QuitRequested,
}

/// Elapsed-time accumulator standing in for a restartable clock
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldown {
    elapsed: f32,
}

impl Cooldown {
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    /// True (and restarted) once more than `interval` has elapsed
    pub fn fire(&mut self, interval: f32) -> bool {
        if self.elapsed > interval {
            self.restart();
            true
        } else {
            false
        }
    }
}

/// Bounded-duration camera jitter
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraShake {
    remaining: f32,
    /// View offset for the current frame
    pub offset: Vec2,
}

impl CameraShake {
    pub fn trigger(&mut self) {
        self.remaining = SHAKE_DURATION;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn update(&mut self, dt: f32, rng: &mut Pcg32) {
        if self.remaining > 0.0 {
            // Integer steps in [-5, 5] scaled by intensity
            let step_x = rng.random_range(-5i32..=5) as f32;
            let step_y = rng.random_range(-5i32..=5) as f32;
            self.offset = Vec2::new(step_x, step_y) * SHAKE_INTENSITY * 0.1;
            self.remaining = (self.remaining - dt).max(0.0);
        } else {
            self.offset = Vec2::ZERO;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    health: i32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            health: PLAYER_MAX_HEALTH,
        }
    }
}

impl Player {
    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, PLAYER_MAX_HEALTH);
    }

    pub fn damage(&mut self, amount: i32) {
        self.set_health(self.health - amount);
    }

    pub fn heal(&mut self, amount: i32) {
        self.set_health(self.health + amount);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Move horizontally, staying inside the playfield
    pub fn steer(&mut self, direction: f32, dt: f32) {
        let x = self.pos.x + direction * PLAYER_SPEED * dt;
        self.pos.x = x.clamp(0.0, WINDOW_WIDTH - PLAYER_WIDTH);
    }

    /// Spawn point for a bullet: centered on the ship's top edge
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + PLAYER_WIDTH / 2.0 - BULLET_WIDTH / 2.0,
            self.pos.y,
        )
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }
}

/// Effects that must fire at most once until the next reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneShotFlags {
    pub level1_complete_sound_played: bool,
    pub level2_complete_sound_played: bool,
    pub boss_music_started: bool,
    /// Won/Lost entry effects already ran
    pub outcome_recorded: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub mode: GameMode,
    /// 1..=3, only ever increases within a session
    pub level: u8,
    pub score: i64,
    pub high_score: i64,
    pub player: Player,
    pub fire_cooldown: Cooldown,

    /// Player bullets (spawn order)
    pub bullets: Vec<Bullet>,
    /// Boss bullets (spawn order)
    pub boss_bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,
    pub powerups: Vec<HealthPowerUp>,

    /// Present only on level 3
    pub boss: Option<Boss>,
    pub boss_spawned: bool,
    pub boss_defeated: bool,

    pub enemy_spawn_timer: Cooldown,
    /// Level-2 spawns so far, drives the bonus double spawn
    pub level2_spawn_count: u32,
    pub powerup_timer: Cooldown,
    /// Seconds until the next power-up may spawn
    pub next_powerup_in: f32,

    pub transition_timer: Cooldown,
    pub in_level_transition: bool,
    pub flags: OneShotFlags,
    pub shake: CameraShake,

    /// Seconds since the current game started
    pub time_survived: f32,
    pub kills: u32,
    pub time_ticks: u64,

    /// Pending side effects, drained by the caller
    pub events: Vec<GameEvent>,
    pub quit_requested: bool,
}

impl GameState {
    /// Create a new game state on the start screen
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode: GameMode::Start,
            level: 1,
            score: 0,
            high_score: 0,
            player: Player::default(),
            fire_cooldown: Cooldown::default(),
            bullets: Vec::new(),
            boss_bullets: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            powerups: Vec::new(),
            boss: None,
            boss_spawned: false,
            boss_defeated: false,
            enemy_spawn_timer: Cooldown::default(),
            level2_spawn_count: 0,
            powerup_timer: Cooldown::default(),
            next_powerup_in: HEALTH_POWERUP_SPAWN_MIN,
            transition_timer: Cooldown::default(),
            in_level_transition: false,
            flags: OneShotFlags::default(),
            shake: CameraShake::default(),
            time_survived: 0.0,
            kills: 0,
            time_ticks: 0,
            events: Vec::new(),
            quit_requested: false,
        };
        state.schedule_next_powerup();
        state
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Roll a fresh power-up interval and restart its timer
    pub fn schedule_next_powerup(&mut self) {
        self.next_powerup_in = self
            .rng
            .random_range(HEALTH_POWERUP_SPAWN_MIN..HEALTH_POWERUP_SPAWN_MAX);
        self.powerup_timer.restart();
    }

    pub fn add_score(&mut self, points: i64) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    /// Enemy count used for the level-2 population cap
    pub fn animated_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_animated()).count()
    }

    pub fn is_boss_alive(&self) -> bool {
        self.boss_spawned && !self.boss_defeated
    }

    pub fn summary(&self, outcome: Outcome) -> SessionSummary {
        SessionSummary {
            outcome,
            score: self.score,
            level: self.level,
            kills: self.kills,
            time_survived: self.time_survived,
        }
    }
}
