//! Boss behavior controller
//!
//! Movement and three independent attack cadences, all scaled by the phase
//! the boss's health puts it in.

use glam::Vec2;
use rand::Rng;

use super::entities::{Boss, BossPhase, Bullet, Enemy, Explosion};
use super::state::{GameEvent, GameState, Outcome};
use super::tick::enter_outcome;
use crate::consts::*;

/// Velocities for the phase-2+ fan, spread evenly around straight down
pub fn spread_velocities(speed: f32) -> Vec<Vec2> {
    let n = BOSS_SPREAD_BULLET_COUNT;
    let start = 90.0 - BOSS_SPREAD_BULLET_ANGLE / 2.0;
    let step = BOSS_SPREAD_BULLET_ANGLE / (n - 1) as f32;
    (0..n)
        .map(|i| {
            let rad = (start + i as f32 * step).to_radians();
            Vec2::new(rad.cos(), rad.sin()) * speed
        })
        .collect()
}

/// Advance the boss one tick: move, attack, take hits, maybe die
pub fn update_boss(state: &mut GameState, dt: f32) {
    if !state.is_boss_alive() {
        return;
    }
    let Some(mut boss) = state.boss.take() else {
        return;
    };

    boss.patrol(dt);
    boss.descend(dt);
    boss.update_phase();
    attack(state, &mut boss, dt);
    take_player_fire(state, &mut boss);

    let defeated = boss.is_defeated();
    let pos = boss.pos;
    state.boss = Some(boss);

    if defeated {
        if pos.y > WINDOW_HEIGHT {
            state.explosions.push(Explosion::new(pos));
        }
        state.boss_defeated = true;
        state.emit(GameEvent::BossDefeated);
        log::info!("Boss defeated");
        enter_outcome(state, Outcome::Won);
    }
}

fn attack(state: &mut GameState, boss: &mut Boss, dt: f32) {
    let phase = boss.phase();
    let speed = phase.bullet_speed();

    boss.attack_timer.advance(dt);
    boss.spread_timer.advance(dt);
    boss.minion_timer.advance(dt);

    if boss.attack_timer.fire(phase.attack_interval()) {
        state
            .boss_bullets
            .push(Bullet::with_velocity(boss.muzzle(), Vec2::new(0.0, speed)));
    }

    if phase >= BossPhase::Phase2 && boss.spread_timer.fire(BOSS_SPREAD_BULLET_INTERVAL) {
        let muzzle = boss.muzzle();
        state.boss_bullets.extend(
            spread_velocities(speed)
                .into_iter()
                .map(|vel| Bullet::with_velocity(muzzle, vel)),
        );
    }

    if phase == BossPhase::Phase3 && boss.minion_timer.fire(BOSS_MINION_SPAWN_INTERVAL) {
        let count = state.rng.random_range(1..=2);
        for _ in 0..count {
            let jitter = state.rng.random_range(0..60) as f32 - 30.0;
            let x = (boss.pos.x + 20.0 + jitter).clamp(0.0, BOSS_MINION_MAX_X);
            state.enemies.push(Enemy::animated(
                Vec2::new(x, boss.pos.y + 80.0),
                ENEMY_SPEED_LEVEL2 + BOSS_MINION_SPEED_BONUS,
            ));
        }
        log::debug!("Boss dropped {count} minion(s)");
    }
}

/// The first player bullet touching the boss this tick lands
fn take_player_fire(state: &mut GameState, boss: &mut Boss) {
    let bounds = boss.bounds();
    if let Some(i) = state
        .bullets
        .iter()
        .position(|b| b.bounds().intersects(&bounds))
    {
        state.bullets.remove(i);
        boss.take_hit(BOSS_HIT_DAMAGE);
        state.shake.trigger();
        state.emit(GameEvent::BossHit {
            health: boss.health(),
        });
    }
}
