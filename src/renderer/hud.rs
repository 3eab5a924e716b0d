//! HUD view model: bar widths, labels and banners derived from state

use crate::consts::*;
use crate::sim::GameState;

/// Width of a health bar, with the value clamped into `[0, max]`
pub fn bar_width(value: i32, max: i32) -> f32 {
    if max <= 0 {
        return 0.0;
    }
    HEALTH_BAR_WIDTH * value.clamp(0, max) as f32 / max as f32
}

/// Persistent level label in the corner
pub fn level_label(level: u8) -> &'static str {
    match level {
        1 => "Level 1",
        2 => "Level 2",
        _ => "Final Boss!",
    }
}

/// Banner shown during the level transition dwell
pub fn transition_banner(level: u8) -> &'static str {
    if level >= FINAL_LEVEL {
        "Final Level"
    } else {
        "Level 2"
    }
}

/// "Time Survived: MM:SS"
pub fn format_survival_time(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("Time Survived: {:02}:{:02}", total / 60, total % 60)
}

/// A labelled bar
#[derive(Debug, Clone, PartialEq)]
pub struct BarModel {
    /// Clamped value shown as text
    pub value: i32,
    pub width: f32,
}

impl BarModel {
    fn new(value: i32, max: i32) -> Self {
        Self {
            value: value.clamp(0, max),
            width: bar_width(value, max),
        }
    }
}

/// Everything the gameplay HUD displays
#[derive(Debug, Clone, PartialEq)]
pub struct HudModel {
    pub score_text: String,
    pub level_text: &'static str,
    pub high_score_text: String,
    pub health: BarModel,
    /// Present while the boss is alive
    pub boss: Option<BarModel>,
}

impl HudModel {
    pub fn from_state(state: &GameState) -> Self {
        let boss = state
            .boss
            .as_ref()
            .filter(|_| state.is_boss_alive())
            .map(|b| BarModel::new(b.health(), BOSS_MAX_HEALTH));
        Self {
            score_text: format!("Score: {}", state.score),
            level_text: level_label(state.level),
            high_score_text: format!("High Score: {}", state.high_score),
            health: BarModel::new(state.player.health(), PLAYER_MAX_HEALTH),
            boss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::spawn_boss_if_due;
    use proptest::prelude::*;

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(100, 100), 200.0);
        assert_eq!(bar_width(50, 100), 100.0);
        assert_eq!(bar_width(-30, 100), 0.0);
        assert_eq!(bar_width(60, 120), 100.0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(level_label(1), "Level 1");
        assert_eq!(level_label(3), "Final Boss!");
        assert_eq!(transition_banner(2), "Level 2");
        assert_eq!(transition_banner(3), "Final Level");
    }

    #[test]
    fn test_format_survival_time() {
        assert_eq!(format_survival_time(0.0), "Time Survived: 00:00");
        assert_eq!(format_survival_time(125.7), "Time Survived: 02:05");
    }

    #[test]
    fn test_hud_boss_bar_only_while_alive() {
        let mut state = GameState::new(1);
        assert!(HudModel::from_state(&state).boss.is_none());

        state.level = FINAL_LEVEL;
        spawn_boss_if_due(&mut state);
        let hud = HudModel::from_state(&state);
        assert_eq!(hud.boss.unwrap().width, HEALTH_BAR_WIDTH);

        state.boss_defeated = true;
        assert!(HudModel::from_state(&state).boss.is_none());
    }

    proptest! {
        #[test]
        fn prop_bar_width_in_range(value in -1000i32..1000) {
            let w = bar_width(value, PLAYER_MAX_HEALTH);
            prop_assert!((0.0..=HEALTH_BAR_WIDTH).contains(&w));
        }
    }
}
