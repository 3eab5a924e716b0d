//! Demo/headless AI that plays the game
//!
//! Produces the same `TickInput` a keyboard would, so the simulation can't
//! tell the difference.

use super::state::{GameMode, GameState};
use super::tick::TickInput;
use crate::consts::*;

/// Horizontal slack before the ship bothers moving
const AIM_DEADZONE: f32 = 6.0;

/// Decide this tick's input from the current state
pub fn autopilot_input(state: &GameState) -> TickInput {
    match state.mode {
        GameMode::Start => TickInput {
            start: true,
            ..Default::default()
        },
        GameMode::Playing => steer_and_fire(state),
        GameMode::LevelTransition | GameMode::Won | GameMode::Lost => TickInput::default(),
    }
}

fn steer_and_fire(state: &GameState) -> TickInput {
    let ship_center = state.player.pos.x + PLAYER_WIDTH / 2.0;

    // Hurt and a pickup is on screen: go shoot the pickup
    let pickup = if state.player.health() < HEALTH_POWERUP_THRESHOLD {
        state
            .powerups
            .iter()
            .filter(|p| p.active && p.pos.y > 0.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|p| p.pos.x + HEALTH_POWERUP_SIZE / 2.0)
    } else {
        None
    };

    // Otherwise the lowest enemy (closest to breaching), then the boss
    let target_x = pickup
        .or_else(|| {
            state
                .enemies
                .iter()
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|e| e.pos.x + ENEMY_WIDTH / 2.0)
        })
        .or_else(|| {
            state
                .boss
                .as_ref()
                .filter(|_| state.is_boss_alive())
                .map(|b| b.pos.x + BOSS_WIDTH / 2.0)
        });

    let Some(target_x) = target_x else {
        return TickInput::default();
    };

    let delta = target_x - ship_center;
    TickInput {
        move_left: delta < -AIM_DEADZONE,
        move_right: delta > AIM_DEADZONE,
        fire: delta.abs() < ENEMY_WIDTH,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::Enemy;
    use glam::Vec2;

    #[test]
    fn test_autopilot_starts_game() {
        let state = GameState::new(1);
        assert!(autopilot_input(&state).start);
    }

    #[test]
    fn test_autopilot_tracks_lowest_enemy() {
        let mut state = GameState::new(1);
        state.mode = GameMode::Playing;
        state.enemies.push(Enemy::basic(Vec2::new(700.0, 10.0)));
        state.enemies.push(Enemy::basic(Vec2::new(50.0, 300.0)));
        let input = autopilot_input(&state);
        assert!(input.move_left);
        assert!(!input.move_right);
    }

    #[test]
    fn test_autopilot_fires_when_lined_up() {
        let mut state = GameState::new(1);
        state.mode = GameMode::Playing;
        let x = state.player.pos.x;
        state.enemies.push(Enemy::basic(Vec2::new(x, 100.0)));
        let input = autopilot_input(&state);
        assert!(input.fire);
        assert!(!input.move_left && !input.move_right);
    }
}
