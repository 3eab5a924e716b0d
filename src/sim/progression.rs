//! Score-driven level progression

use super::state::{GameEvent, GameMode, GameState};
use crate::consts::*;

/// Start a level transition once the score crosses the next threshold
pub fn update_progression(state: &mut GameState) {
    if state.in_level_transition {
        return;
    }
    match state.level {
        1 if state.score >= LEVEL2_SCORE_THRESHOLD as i64 => {
            begin_transition(state, 2);
            if !state.flags.level1_complete_sound_played {
                state.flags.level1_complete_sound_played = true;
                state.emit(GameEvent::LevelStarted { level: 2 });
            }
        }
        2 if state.score >= LEVEL3_SCORE_THRESHOLD as i64 => {
            begin_transition(state, FINAL_LEVEL);
            if !state.flags.level2_complete_sound_played {
                state.flags.level2_complete_sound_played = true;
                state.emit(GameEvent::LevelStarted { level: FINAL_LEVEL });
            }
            // The boss fight starts on an empty field
            state.enemies.clear();
        }
        _ => {}
    }
}

fn begin_transition(state: &mut GameState, level: u8) {
    log::info!("Level {} -> {}", state.level, level);
    state.level = level;
    state.mode = GameMode::LevelTransition;
    state.transition_timer.restart();
    state.in_level_transition = true;
}

/// Hold the banner for the dwell time, then resume play
pub fn update_transition(state: &mut GameState, dt: f32) {
    state.transition_timer.advance(dt);
    if state.transition_timer.elapsed() > LEVEL_TRANSITION_DWELL {
        state.mode = GameMode::Playing;
        state.in_level_transition = false;
    }
}
