//! Entity types advanced once per tick
//!
//! Entities are plain values owned by `GameState` collections. Removal is a
//! `retain`/`remove` on the owning `Vec`, so there is no manual cleanup path.

use glam::Vec2;

use super::collision::Aabb;
use super::state::Cooldown;
use crate::consts::*;

/// Looping sprite-frame cycler driven by elapsed time
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnimator {
    pub frame: usize,
    frame_count: usize,
    interval: f32,
    elapsed: f32,
}

impl FrameAnimator {
    pub fn new(frame_count: usize, interval: f32) -> Self {
        Self {
            frame: 0,
            frame_count: frame_count.max(1),
            interval,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt`, returns true when the frame changed
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed > self.interval {
            self.frame = (self.frame + 1) % self.frame_count;
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}

/// A projectile fired by the player or the boss
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub anim: FrameAnimator,
}

impl Bullet {
    /// Player bullet travelling straight up
    pub fn player(pos: Vec2) -> Self {
        Self::with_velocity(pos, Vec2::new(0.0, BULLET_SPEED))
    }

    pub fn with_velocity(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            anim: FrameAnimator::new(BULLET_FRAMES, BULLET_FRAME_INTERVAL),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.anim.advance(dt);
        self.pos += self.vel * dt;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }

    /// Off any edge of the playfield (used for boss bullets)
    pub fn is_off_screen(&self) -> bool {
        self.pos.y > WINDOW_HEIGHT || self.pos.x < 0.0 || self.pos.x > WINDOW_WIDTH
    }
}

/// Enemy variants
#[derive(Debug, Clone, PartialEq)]
pub enum EnemyKind {
    /// Single static sprite (level 1)
    Basic,
    /// Frame-cycling sprite (level 2 and boss minions)
    Animated { anim: FrameAnimator },
}

/// A descending enemy ship
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    /// Downward speed in px/s
    pub speed: f32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn basic(pos: Vec2) -> Self {
        Self {
            pos,
            speed: ENEMY_SPEED_LEVEL1,
            kind: EnemyKind::Basic,
        }
    }

    pub fn animated(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            speed,
            kind: EnemyKind::Animated {
                anim: FrameAnimator::new(ANIMATED_ENEMY_FRAMES, ANIMATED_ENEMY_FRAME_INTERVAL),
            },
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self.kind, EnemyKind::Animated { .. })
    }

    /// Current sprite frame (always 0 for basic enemies)
    pub fn frame(&self) -> usize {
        match &self.kind {
            EnemyKind::Basic => 0,
            EnemyKind::Animated { anim } => anim.frame,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if let EnemyKind::Animated { anim } = &mut self.kind {
            anim.advance(dt);
        }
        self.pos.y += self.speed * dt;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT))
    }

    /// Has passed the bottom of the playfield
    pub fn has_breached(&self) -> bool {
        self.pos.y > WINDOW_HEIGHT
    }
}

/// One-shot explosion animation (cosmetic, never collides)
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub pos: Vec2,
    pub frame: usize,
    elapsed: f32,
    pub finished: bool,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            frame: 0,
            elapsed: 0.0,
            finished: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.finished {
            return;
        }
        self.elapsed += dt;
        if self.elapsed > EXPLOSION_FRAME_INTERVAL {
            if self.frame + 1 < EXPLOSION_FRAMES {
                self.frame += 1;
                self.elapsed = 0.0;
            } else {
                self.finished = true;
            }
        }
    }
}

/// Boss difficulty tier, derived from remaining health
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BossPhase {
    Phase1,
    Phase2,
    Phase3,
}

impl BossPhase {
    pub fn from_health(health: i32) -> Self {
        if health <= BOSS_PHASE3_HP {
            BossPhase::Phase3
        } else if health <= BOSS_PHASE2_HP {
            BossPhase::Phase2
        } else {
            BossPhase::Phase1
        }
    }

    pub fn bullet_speed(self) -> f32 {
        match self {
            BossPhase::Phase1 => BOSS_BULLET_SPEED,
            BossPhase::Phase2 => BOSS_BULLET_SPEED_PHASE2,
            BossPhase::Phase3 => BOSS_BULLET_SPEED_PHASE3,
        }
    }

    pub fn attack_interval(self) -> f32 {
        match self {
            BossPhase::Phase1 => BOSS_ATTACK_INTERVAL,
            BossPhase::Phase2 => BOSS_ATTACK_INTERVAL_PHASE2,
            BossPhase::Phase3 => BOSS_ATTACK_INTERVAL_PHASE3,
        }
    }
}

/// The level-3 boss
#[derive(Debug, Clone, PartialEq)]
pub struct Boss {
    pub pos: Vec2,
    health: i32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    pub anim: FrameAnimator,
    phase: BossPhase,
    /// Single aimed shot
    pub attack_timer: Cooldown,
    /// Fan of bullets (Phase2+)
    pub spread_timer: Cooldown,
    /// Minion drop (Phase3)
    pub minion_timer: Cooldown,
}

impl Default for Boss {
    fn default() -> Self {
        Self::new()
    }
}

impl Boss {
    /// Fresh boss above the playfield at full health with all timers reset
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(BOSS_SPAWN_X, BOSS_SPAWN_Y),
            health: BOSS_MAX_HEALTH,
            direction: 1.0,
            anim: FrameAnimator::new(BOSS_FRAMES, BOSS_FRAME_INTERVAL),
            phase: BossPhase::Phase1,
            attack_timer: Cooldown::default(),
            spread_timer: Cooldown::default(),
            minion_timer: Cooldown::default(),
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Apply damage, clamping at zero; phase follows health
    pub fn take_hit(&mut self, damage: i32) {
        self.set_health(self.health - damage);
    }

    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, BOSS_MAX_HEALTH);
        self.update_phase();
    }

    pub fn update_phase(&mut self) {
        self.phase = BossPhase::from_health(self.health);
    }

    /// Animate and patrol horizontally, bouncing off the playfield edges
    pub fn patrol(&mut self, dt: f32) {
        self.anim.advance(dt);
        self.pos.x += BOSS_MOVE_SPEED * self.direction * dt;
        if self.pos.x <= 0.0 {
            self.pos.x = 0.0;
            self.direction = 1.0;
        } else if self.pos.x + BOSS_WIDTH >= WINDOW_WIDTH {
            self.pos.x = WINDOW_WIDTH - BOSS_WIDTH;
            self.direction = -1.0;
        }
    }

    /// Sink toward the hold line, then stay there
    pub fn descend(&mut self, dt: f32) {
        if self.pos.y < BOSS_DESCEND_Y {
            self.pos.y = (self.pos.y + BOSS_DESCEND_SPEED * dt).min(BOSS_DESCEND_Y);
        }
    }

    pub fn muzzle(&self) -> Vec2 {
        self.pos + Vec2::new(BOSS_MUZZLE_X, BOSS_MUZZLE_Y)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(BOSS_WIDTH, BOSS_HEIGHT))
    }
}

/// Falling health pickup, consumed by shooting it
#[derive(Debug, Clone, PartialEq)]
pub struct HealthPowerUp {
    pub pos: Vec2,
    pub speed: f32,
    /// Cleared when consumed or off-screen; removed by the cleanup pass
    pub active: bool,
}

impl HealthPowerUp {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            speed: HEALTH_POWERUP_SPEED,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
        if self.pos.y > WINDOW_HEIGHT {
            self.active = false;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(HEALTH_POWERUP_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_frame_animator_wraps() {
        let mut anim = FrameAnimator::new(3, 0.1);
        for _ in 0..3 {
            anim.advance(0.11);
        }
        assert_eq!(anim.frame, 0);
        assert!(!anim.advance(0.05));
    }

    #[test]
    fn test_explosion_finishes_after_all_frames() {
        let mut explosion = Explosion::new(Vec2::ZERO);
        let mut steps = 0;
        while !explosion.finished {
            explosion.update(0.09);
            steps += 1;
            assert!(steps < 100);
        }
        assert_eq!(steps, EXPLOSION_FRAMES);
        assert_eq!(explosion.frame, EXPLOSION_FRAMES - 1);
    }

    #[test]
    fn test_enemy_variants() {
        let basic = Enemy::basic(Vec2::ZERO);
        let animated = Enemy::animated(Vec2::ZERO, ENEMY_SPEED_LEVEL2);
        assert!(!basic.is_animated());
        assert!(animated.is_animated());

        let mut e = Enemy::basic(Vec2::new(10.0, 590.0));
        e.update(1.0);
        assert!(e.has_breached());
    }

    #[test]
    fn test_boss_phase_thresholds() {
        assert_eq!(BossPhase::from_health(120), BossPhase::Phase1);
        assert_eq!(BossPhase::from_health(81), BossPhase::Phase1);
        assert_eq!(BossPhase::from_health(80), BossPhase::Phase2);
        assert_eq!(BossPhase::from_health(51), BossPhase::Phase2);
        assert_eq!(BossPhase::from_health(50), BossPhase::Phase3);
        assert_eq!(BossPhase::from_health(0), BossPhase::Phase3);
    }

    #[test]
    fn test_boss_phase_flips_exactly_at_80() {
        let mut boss = Boss::new();
        boss.set_health(90);
        assert_eq!(boss.phase(), BossPhase::Phase1);
        boss.take_hit(BOSS_HIT_DAMAGE);
        assert_eq!(boss.health(), 80);
        assert_eq!(boss.phase(), BossPhase::Phase2);
    }

    #[test]
    fn test_boss_patrol_reverses_at_edges() {
        let mut boss = Boss::new();
        boss.pos.x = WINDOW_WIDTH - BOSS_WIDTH - 0.5;
        boss.patrol(SIM_DT);
        assert_eq!(boss.direction, -1.0);
        boss.pos.x = 0.5;
        boss.patrol(SIM_DT);
        assert_eq!(boss.direction, 1.0);
    }

    #[test]
    fn test_boss_descends_then_holds() {
        let mut boss = Boss::new();
        for _ in 0..2000 {
            boss.descend(SIM_DT);
        }
        assert_eq!(boss.pos.y, BOSS_DESCEND_Y);
    }

    #[test]
    fn test_powerup_deactivates_off_screen() {
        let mut p = HealthPowerUp::new(Vec2::new(100.0, WINDOW_HEIGHT - 1.0));
        p.update(0.5);
        assert!(!p.active);
    }

    proptest! {
        #[test]
        fn prop_boss_health_clamped_and_phase_pure(hits in proptest::collection::vec(-50i32..200, 0..40)) {
            let mut boss = Boss::new();
            for damage in hits {
                boss.take_hit(damage);
                prop_assert!((0..=BOSS_MAX_HEALTH).contains(&boss.health()));
                prop_assert_eq!(boss.phase(), BossPhase::from_health(boss.health()));
            }
        }
    }
}
