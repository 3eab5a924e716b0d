//! Collision detection and the per-tick cleanup pass
//!
//! Phases run in a fixed order, each on the entity sets left by the previous
//! one. Iteration is in spawn order and a bullet resolves at most one hit.

use glam::Vec2;

use super::entities::Explosion;
use super::state::{GameEvent, GameState, Outcome};
use super::tick::enter_outcome;
use crate::consts::*;

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; touching edges do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// Damage dealt when an enemy slips past the bottom edge
pub fn breach_damage(level: u8) -> i32 {
    match level {
        1 => ENEMY_DAMAGE_LEVEL1,
        2 => ENEMY_DAMAGE_LEVEL2,
        _ => ENEMY_DAMAGE_DEFAULT,
    }
}

/// Run the full collision & cleanup pass
pub fn resolve_collisions(state: &mut GameState) {
    drop_expired(state);
    resolve_player_bullets(state);
    resolve_boss_bullets(state);
    resolve_breaches(state);
    state.powerups.retain(|p| p.active);
}

/// Phase 1: off-screen bullets and finished explosions
fn drop_expired(state: &mut GameState) {
    state.bullets.retain(|b| b.pos.y >= BULLET_OFFSCREEN_Y);
    state.boss_bullets.retain(|b| !b.is_off_screen());
    state.explosions.retain(|e| !e.finished);
}

/// Phase 2: player bullets against power-ups first, then enemies
fn resolve_player_bullets(state: &mut GameState) {
    let mut i = 0;
    while i < state.bullets.len() {
        let bullet = state.bullets[i].bounds();

        if let Some(p) = state
            .powerups
            .iter()
            .position(|p| p.active && p.bounds().intersects(&bullet))
        {
            state.powerups[p].active = false;
            state.bullets.remove(i);
            state.player.heal(HEALTH_POWERUP_AMOUNT);
            let health = state.player.health();
            state.emit(GameEvent::PowerUpCollected { health });
            continue;
        }

        if let Some(e) = state
            .enemies
            .iter()
            .position(|e| e.bounds().intersects(&bullet))
        {
            let enemy = state.enemies.remove(e);
            state.bullets.remove(i);
            state.explosions.push(Explosion::new(enemy.pos));
            state.shake.trigger();
            state.add_score(ENEMY_KILL_SCORE as i64);
            state.kills += 1;
            state.emit(GameEvent::EnemyDestroyed { pos: enemy.pos });
            continue;
        }

        i += 1;
    }
}

/// Phase 3: boss bullets against the player
fn resolve_boss_bullets(state: &mut GameState) {
    let player = state.player.bounds();
    let before = state.boss_bullets.len();
    state.boss_bullets.retain(|b| !b.bounds().intersects(&player));
    let hits = before - state.boss_bullets.len();

    for _ in 0..hits {
        state.player.damage(BOSS_BULLET_DAMAGE);
        state.emit(GameEvent::PlayerHit {
            damage: BOSS_BULLET_DAMAGE,
        });
        if state.player.is_dead() {
            enter_outcome(state, Outcome::Lost);
        }
    }
}

/// Phase 4: enemies that passed the bottom edge hurt the player
fn resolve_breaches(state: &mut GameState) {
    let damage = breach_damage(state.level);
    let (breached, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut state.enemies)
        .into_iter()
        .partition(|e| e.has_breached());
    state.enemies = remaining;

    for enemy in breached {
        state.explosions.push(Explosion::new(enemy.pos));
        state.shake.trigger();
        state.player.damage(damage);
        state.emit(GameEvent::EnemyBreached {
            pos: enemy.pos,
            damage,
        });
        if state.player.is_dead() {
            enter_outcome(state, Outcome::Lost);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Bullet, Enemy, HealthPowerUp};
    use crate::sim::state::GameMode;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42);
        state.mode = GameMode::Playing;
        state
    }

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        assert!(a.intersects(&Aabb::new(Vec2::splat(5.0), Vec2::splat(10.0))));
        assert!(!a.intersects(&Aabb::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0))));
        assert!(!a.intersects(&Aabb::new(Vec2::new(0.0, 20.0), Vec2::splat(10.0))));
    }

    #[test]
    fn test_offscreen_bullets_dropped() {
        let mut state = playing_state();
        state.bullets.push(Bullet::player(Vec2::new(100.0, -1.0)));
        state.bullets.push(Bullet::player(Vec2::new(100.0, 200.0)));
        state
            .boss_bullets
            .push(Bullet::with_velocity(Vec2::new(-2.0, 300.0), Vec2::ZERO));
        state
            .boss_bullets
            .push(Bullet::with_velocity(Vec2::new(300.0, 601.0), Vec2::ZERO));
        resolve_collisions(&mut state);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.boss_bullets.is_empty());
    }

    #[test]
    fn test_bullet_kills_enemy_and_scores() {
        let mut state = playing_state();
        state.enemies.push(Enemy::basic(Vec2::new(100.0, 100.0)));
        state.bullets.push(Bullet::player(Vec2::new(110.0, 110.0)));
        resolve_collisions(&mut state);

        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.kills, 1);
        assert_eq!(state.explosions.len(), 1);
        assert!(state.shake.is_active());
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
        );
    }

    #[test]
    fn test_powerup_takes_precedence_over_enemy() {
        let mut state = playing_state();
        state.player.set_health(30);
        state.enemies.push(Enemy::basic(Vec2::new(100.0, 100.0)));
        state.powerups.push(HealthPowerUp::new(Vec2::new(100.0, 100.0)));
        state.bullets.push(Bullet::player(Vec2::new(110.0, 110.0)));
        resolve_collisions(&mut state);

        assert_eq!(state.player.health(), 80);
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.bullets.is_empty());
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_one_hit_per_bullet() {
        let mut state = playing_state();
        state.enemies.push(Enemy::basic(Vec2::new(100.0, 100.0)));
        state.enemies.push(Enemy::basic(Vec2::new(105.0, 105.0)));
        state.bullets.push(Bullet::player(Vec2::new(110.0, 110.0)));
        resolve_collisions(&mut state);

        assert_eq!(state.enemies.len(), 1);
        // First spawned enemy is the one consumed
        assert_eq!(state.enemies[0].pos, Vec2::new(105.0, 105.0));
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_boss_bullet_damages_player() {
        let mut state = playing_state();
        let pos = state.player.pos + Vec2::splat(4.0);
        state.boss_bullets.push(Bullet::with_velocity(pos, Vec2::ZERO));
        resolve_collisions(&mut state);

        assert!(state.boss_bullets.is_empty());
        assert_eq!(state.player.health(), PLAYER_MAX_HEALTH - BOSS_BULLET_DAMAGE);
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_lethal_boss_bullet_loses_once() {
        let mut state = playing_state();
        state.player.set_health(50);
        let pos = state.player.pos + Vec2::splat(4.0);
        for _ in 0..3 {
            state.boss_bullets.push(Bullet::with_velocity(pos, Vec2::ZERO));
        }
        resolve_collisions(&mut state);

        assert_eq!(state.mode, GameMode::Lost);
        assert_eq!(state.player.health(), 0);
        assert!(state.boss_bullets.is_empty());
        let overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::SessionOver(_)))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_breach_damage_by_level() {
        assert_eq!(breach_damage(1), 10);
        assert_eq!(breach_damage(2), 20);
        assert_eq!(breach_damage(3), 20);

        let mut state = playing_state();
        state.level = 2;
        state.enemies.push(Enemy::basic(Vec2::new(50.0, WINDOW_HEIGHT + 1.0)));
        state.enemies.push(Enemy::basic(Vec2::new(50.0, 300.0)));
        resolve_collisions(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.player.health(), 80);
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_lethal_breach_loses_once() {
        let mut state = playing_state();
        state.player.set_health(10);
        for x in [10.0, 100.0, 200.0] {
            state.enemies.push(Enemy::basic(Vec2::new(x, WINDOW_HEIGHT + 5.0)));
        }
        resolve_collisions(&mut state);

        assert_eq!(state.mode, GameMode::Lost);
        assert_eq!(state.player.health(), 0);
        let overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::SessionOver(_)))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_inactive_powerups_removed() {
        let mut state = playing_state();
        let mut gone = HealthPowerUp::new(Vec2::new(10.0, 10.0));
        gone.active = false;
        state.powerups.push(gone);
        state.powerups.push(HealthPowerUp::new(Vec2::new(300.0, 10.0)));
        resolve_collisions(&mut state);
        assert_eq!(state.powerups.len(), 1);
    }
}
