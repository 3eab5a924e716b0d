//! Fixed timestep simulation tick
//!
//! Top-level state machine. Each tick dispatches to exactly one mode handler;
//! gameplay runs its phases in a fixed order.

use super::boss::update_boss;
use super::collision::resolve_collisions;
use super::entities::Bullet;
use super::progression::{update_progression, update_transition};
use super::spawn::{spawn_boss_if_due, update_enemy_spawner, update_powerup_spawner, update_powerups};
use super::state::{CameraShake, Cooldown, GameEvent, GameMode, GameState, OneShotFlags, Outcome};
use crate::consts::*;

/// Input commands for a single tick (held-key state)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Held; rate limited by the fire cooldown
    pub fire: bool,
    /// Start screen only
    pub start: bool,
    /// Won/Lost screens only
    pub restart: bool,
    /// Won/Lost screens only
    pub quit: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;
    state.shake.update(dt, &mut state.rng);

    match state.mode {
        GameMode::Start => handle_start(state, input),
        GameMode::LevelTransition => {
            state.time_survived += dt;
            update_transition(state, dt);
        }
        GameMode::Won | GameMode::Lost => handle_game_over(state, input),
        GameMode::Playing => handle_gameplay(state, input, dt),
    }
}

fn handle_start(state: &mut GameState, input: &TickInput) {
    state.time_survived = 0.0;
    state.kills = 0;
    if input.start {
        state.mode = GameMode::Playing;
        state.emit(GameEvent::GameStarted);
        log::info!("Game started (seed {})", state.seed);
    }
}

fn handle_game_over(state: &mut GameState, input: &TickInput) {
    if input.restart {
        reset_session(state);
    }
    if input.quit && !state.quit_requested {
        state.quit_requested = true;
        state.emit(GameEvent::QuitRequested);
    }
}

fn handle_gameplay(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_survived += dt;

    // Movement
    let direction = match (input.move_left, input.move_right) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    };
    if direction != 0.0 {
        state.player.steer(direction, dt);
    }

    // Shooting
    state.fire_cooldown.advance(dt);
    if input.fire && state.fire_cooldown.fire(FIRE_COOLDOWN) {
        let muzzle = state.player.muzzle();
        state.bullets.push(Bullet::player(muzzle));
        state.emit(GameEvent::ShotFired);
    }

    update_enemy_spawner(state, dt);
    update_progression(state);
    spawn_boss_if_due(state);
    update_entities(state, dt);
    update_boss(state, dt);
    resolve_collisions(state);
    update_powerup_spawner(state, dt);
    update_powerups(state, dt);
}

fn update_entities(state: &mut GameState, dt: f32) {
    for bullet in &mut state.bullets {
        bullet.update(dt);
    }
    for enemy in &mut state.enemies {
        enemy.update(dt);
    }
    for explosion in &mut state.explosions {
        explosion.update(dt);
    }
    for bullet in &mut state.boss_bullets {
        bullet.update(dt);
    }
}

/// Enter Won or Lost; entry effects run once per session
pub fn enter_outcome(state: &mut GameState, outcome: Outcome) {
    if state.flags.outcome_recorded {
        return;
    }
    state.flags.outcome_recorded = true;
    state.flags.boss_music_started = false;
    state.mode = outcome.into();

    let summary = state.summary(outcome);
    log::info!(
        "Session over: {:?}, score {}, {} kills, {:.1}s",
        outcome,
        summary.score,
        summary.kills,
        summary.time_survived
    );
    state.emit(GameEvent::SessionOver(summary));
}

/// Restart from Won/Lost straight into play
///
/// The caller reloads the high score from the score log when it sees
/// `GameEvent::Restarted`.
pub fn reset_session(state: &mut GameState) {
    state.player.set_health(PLAYER_MAX_HEALTH);
    state.score = 0;
    state.level = 1;

    state.bullets.clear();
    state.boss_bullets.clear();
    state.enemies.clear();
    state.explosions.clear();
    state.powerups.clear();

    state.boss = None;
    state.boss_spawned = false;
    state.boss_defeated = false;

    state.in_level_transition = false;
    state.transition_timer = Cooldown::default();
    state.enemy_spawn_timer = Cooldown::default();
    state.level2_spawn_count = 0;
    state.flags = OneShotFlags::default();
    state.shake = CameraShake::default();

    state.time_survived = 0.0;
    state.kills = 0;
    state.quit_requested = false;

    state.schedule_next_powerup();
    state.mode = GameMode::Playing;
    state.emit(GameEvent::Restarted);
    log::info!("Session restarted");
}
