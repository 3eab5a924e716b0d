//! Timer-gated spawners for enemies, the boss and health power-ups

use glam::Vec2;
use rand::Rng;

use super::entities::{Boss, Enemy, HealthPowerUp};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Seconds between regular enemy spawns on a level
pub fn spawn_rate(level: u8) -> f32 {
    match level {
        1 => ENEMY_SPAWN_RATE_LEVEL1,
        2 => ENEMY_SPAWN_RATE_LEVEL2,
        _ => ENEMY_SPAWN_RATE_DEFAULT,
    }
}

/// Regular enemy spawner (levels 1 and 2)
pub fn update_enemy_spawner(state: &mut GameState, dt: f32) {
    state.enemy_spawn_timer.advance(dt);
    if state.level >= FINAL_LEVEL || !state.enemy_spawn_timer.fire(spawn_rate(state.level)) {
        return;
    }

    let x = state.rng.random_range(0.0..ENEMY_SPAWN_X_RANGE);
    if state.level == 1 {
        state.enemies.push(Enemy::basic(Vec2::new(x, ENEMY_SPAWN_Y)));
        log::debug!("Spawned basic enemy at x={x:.0}");
        return;
    }

    let alive = state.animated_enemy_count();
    if alive >= LEVEL2_MAX_ENEMIES {
        return;
    }
    state
        .enemies
        .push(Enemy::animated(Vec2::new(x, ENEMY_SPAWN_Y), ENEMY_SPEED_LEVEL2));
    state.level2_spawn_count += 1;
    log::debug!("Spawned animated enemy at x={x:.0} ({} alive)", alive + 1);

    // Every Nth spawn brings a slightly faster partner, cap permitting
    if state.level2_spawn_count % LEVEL2_DOUBLE_SPAWN_FREQ == 0 && alive + 1 < LEVEL2_MAX_ENEMIES {
        let x2 = state.rng.random_range(0.0..ENEMY_SPAWN_X_RANGE);
        state.enemies.push(Enemy::animated(
            Vec2::new(x2, ENEMY_SPAWN_Y),
            ENEMY_SPEED_LEVEL2 + LEVEL2_DOUBLE_SPAWN_SPEED_BONUS,
        ));
        log::debug!("Bonus enemy at x={x2:.0}");
    }
}

/// Bring in the boss the first time the final level is reached
pub fn spawn_boss_if_due(state: &mut GameState) {
    if state.level != FINAL_LEVEL || state.boss_spawned {
        return;
    }
    state.boss = Some(Boss::new());
    state.boss_spawned = true;
    state.flags.boss_music_started = true;
    state.emit(GameEvent::BossSpawned);
    log::info!("Boss spawned");
}

/// Health power-up spawner, active only while the player is hurt
pub fn update_powerup_spawner(state: &mut GameState, dt: f32) {
    state.powerup_timer.advance(dt);
    if state.player.health() >= HEALTH_POWERUP_THRESHOLD {
        return;
    }
    if state.powerup_timer.elapsed() > state.next_powerup_in {
        let x = state
            .rng
            .random_range(HEALTH_POWERUP_MARGIN..WINDOW_WIDTH - HEALTH_POWERUP_MARGIN);
        state
            .powerups
            .push(HealthPowerUp::new(Vec2::new(x, HEALTH_POWERUP_SPAWN_Y)));
        state.schedule_next_powerup();
        log::debug!(
            "Health power-up at x={x:.0}, next in {:.1}s",
            state.next_powerup_in
        );
    }
}

/// Power-ups keep falling even while hidden at high health
pub fn update_powerups(state: &mut GameState, dt: f32) {
    for powerup in state.powerups.iter_mut().filter(|p| p.active) {
        powerup.update(dt);
    }
}
