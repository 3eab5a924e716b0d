//! Rendering contract
//!
//! The window/graphics collaborator implements `Canvas`; `render_frame`
//! decides what gets drawn for each mode and in which order.

pub mod assets;
pub mod hud;

pub use assets::{AssetManifest, SpriteSheet, TextureLoader};
pub use hud::{HudModel, bar_width, format_survival_time, level_label, transition_banner};

use glam::Vec2;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameMode, GameState};

/// Sprite (and animation frame) to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Background,
    Player,
    Enemy,
    AnimatedEnemy(usize),
    Bullet(usize),
    Explosion(usize),
    Boss(usize),
    HealthPowerUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const GREY: Color = Color::rgb(200, 200, 200);
    pub const BAR_BACK: Color = Color::rgb(50, 50, 50);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Title,
    Main,
    Small,
}

/// Frame-level drawing surface
pub trait Canvas {
    fn clear(&mut self);
    /// Translate the camera (used by screen shake)
    fn set_view_offset(&mut self, offset: Vec2);
    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2);
    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn draw_text(&mut self, text: &str, pos: Vec2, size: TextSize, color: Color);
    fn present(&mut self);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ViewOffset(Vec2),
    Sprite(SpriteId, Vec2),
    Rect(Vec2, Vec2, Color),
    Text(String, Vec2),
}

/// Canvas that records the last frame's draw calls
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    pub frames_presented: u64,
}

impl DrawList {
    pub fn sprites(&self) -> impl Iterator<Item = SpriteId> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite(id, _) => Some(*id),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Text(t, _) if t.contains(needle)))
    }
}

impl Canvas for DrawList {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn set_view_offset(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::ViewOffset(offset));
    }

    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2) {
        self.commands.push(DrawCommand::Sprite(sprite, pos));
    }

    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect(pos, size, color));
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, _size: TextSize, _color: Color) {
        self.commands.push(DrawCommand::Text(text.to_string(), pos));
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}

const HEALTH_BAR_POS: Vec2 = Vec2::new(580.0, 10.0);
const BOSS_BAR_POS: Vec2 = Vec2::new(580.0, 40.0);
const MESSAGE_POS: Vec2 = Vec2::new(220.0, 250.0);

/// Draw one frame of the current state
pub fn render_frame(state: &GameState, settings: &Settings, canvas: &mut impl Canvas) {
    canvas.clear();
    let offset = if settings.effective_screen_shake() {
        state.shake.offset
    } else {
        Vec2::ZERO
    };
    canvas.set_view_offset(offset);
    canvas.draw_sprite(SpriteId::Background, Vec2::ZERO);

    let high_score = format!("High Score: {}", state.high_score);
    match state.mode {
        GameMode::Start => {
            canvas.draw_text(
                "Press SPACE to Start",
                Vec2::new(220.0, 300.0),
                TextSize::Title,
                Color::WHITE,
            );
            canvas.draw_text(&high_score, Vec2::new(10.0, 60.0), TextSize::Main, Color::YELLOW);
        }
        GameMode::LevelTransition => {
            canvas.draw_text(
                transition_banner(state.level),
                Vec2::new(300.0, 250.0),
                TextSize::Title,
                Color::YELLOW,
            );
            canvas.draw_text(&high_score, Vec2::new(10.0, 60.0), TextSize::Main, Color::YELLOW);
        }
        GameMode::Won | GameMode::Lost => draw_game_over(state, canvas),
        GameMode::Playing => draw_gameplay(state, canvas),
    }
    canvas.present();
}

fn draw_bar(canvas: &mut impl Canvas, label: &str, pos: Vec2, bar: &hud::BarModel, color: Color) {
    let size = Vec2::new(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT);
    canvas.draw_rect(pos, size, Color::BAR_BACK);
    canvas.draw_rect(pos, Vec2::new(bar.width, HEALTH_BAR_HEIGHT), color);
    canvas.draw_text(label, pos - Vec2::new(70.0, 0.0), TextSize::Main, Color::WHITE);
    canvas.draw_text(
        &bar.value.to_string(),
        pos + Vec2::new(HEALTH_BAR_WIDTH / 2.0 - 10.0, 5.0),
        TextSize::Small,
        Color::BLACK,
    );
}

fn draw_gameplay(state: &GameState, canvas: &mut impl Canvas) {
    let hud = HudModel::from_state(state);

    canvas.draw_sprite(SpriteId::Player, state.player.pos);
    draw_bar(canvas, "Health:", HEALTH_BAR_POS, &hud.health, Color::RED);
    if let Some(boss_bar) = &hud.boss {
        draw_bar(canvas, "Boss:", BOSS_BAR_POS, boss_bar, Color::BLUE);
    }

    for bullet in &state.bullets {
        canvas.draw_sprite(SpriteId::Bullet(bullet.anim.frame), bullet.pos);
    }
    for enemy in &state.enemies {
        let sprite = if enemy.is_animated() {
            SpriteId::AnimatedEnemy(enemy.frame())
        } else {
            SpriteId::Enemy
        };
        canvas.draw_sprite(sprite, enemy.pos);
    }
    for explosion in &state.explosions {
        canvas.draw_sprite(SpriteId::Explosion(explosion.frame), explosion.pos);
    }
    // Power-ups are only visible while the player is hurt
    if state.player.health() < HEALTH_POWERUP_THRESHOLD {
        for powerup in state.powerups.iter().filter(|p| p.active) {
            canvas.draw_sprite(SpriteId::HealthPowerUp, powerup.pos);
        }
    }
    if let Some(boss) = state.boss.as_ref().filter(|_| state.is_boss_alive()) {
        canvas.draw_sprite(SpriteId::Boss(boss.anim.frame), boss.pos);
    }
    for bullet in &state.boss_bullets {
        canvas.draw_sprite(SpriteId::Bullet(bullet.anim.frame), bullet.pos);
    }

    canvas.draw_text(&hud.score_text, Vec2::new(10.0, 10.0), TextSize::Main, Color::WHITE);
    canvas.draw_text(hud.level_text, Vec2::new(10.0, 35.0), TextSize::Main, Color::WHITE);
    canvas.draw_text(&hud.high_score_text, Vec2::new(10.0, 60.0), TextSize::Main, Color::YELLOW);
}

fn draw_game_over(state: &GameState, canvas: &mut impl Canvas) {
    let (message, color) = match state.mode {
        GameMode::Won => ("YOU WON!\nPress R to Restart", Color::GREEN),
        _ => ("YOU LOSE!\nPress R to Retry", Color::RED),
    };
    canvas.draw_text(message, MESSAGE_POS, TextSize::Title, color);
    canvas.draw_text(
        &format!("Score: {}", state.score),
        Vec2::new(10.0, 10.0),
        TextSize::Main,
        Color::WHITE,
    );
    canvas.draw_text(
        &format!("High Score: {}", state.high_score),
        Vec2::new(10.0, 60.0),
        TextSize::Main,
        Color::YELLOW,
    );
    canvas.draw_text(
        &format_survival_time(state.time_survived),
        Vec2::new(220.0, 320.0),
        TextSize::Main,
        Color::CYAN,
    );
    canvas.draw_text(
        &format!("Total Kills: {}", state.kills),
        Vec2::new(220.0, 350.0),
        TextSize::Main,
        Color::MAGENTA,
    );
    canvas.draw_text("Press Q to Quit", Vec2::new(220.0, 380.0), TextSize::Main, Color::GREY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{HealthPowerUp, Outcome, enter_outcome};

    fn playing() -> GameState {
        let mut state = GameState::new(11);
        state.mode = GameMode::Playing;
        state
    }

    #[test]
    fn test_start_screen() {
        let state = GameState::new(1);
        let mut canvas = DrawList::default();
        render_frame(&state, &Settings::default(), &mut canvas);
        assert!(canvas.has_text("Press SPACE to Start"));
        assert!(canvas.has_text("High Score: 0"));
        assert_eq!(canvas.frames_presented, 1);
    }

    #[test]
    fn test_powerups_hidden_while_healthy() {
        let mut state = playing();
        state.powerups.push(HealthPowerUp::new(Vec2::new(100.0, 100.0)));
        let mut canvas = DrawList::default();

        render_frame(&state, &Settings::default(), &mut canvas);
        assert!(!canvas.sprites().any(|s| s == SpriteId::HealthPowerUp));

        state.player.set_health(40);
        render_frame(&state, &Settings::default(), &mut canvas);
        assert!(canvas.sprites().any(|s| s == SpriteId::HealthPowerUp));
    }

    #[test]
    fn test_shake_respects_settings() {
        let mut state = playing();
        state.shake.offset = Vec2::new(3.0, -2.0);
        let mut canvas = DrawList::default();

        render_frame(&state, &Settings::default(), &mut canvas);
        assert_eq!(canvas.commands[0], DrawCommand::ViewOffset(Vec2::new(3.0, -2.0)));

        let calm = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        render_frame(&state, &calm, &mut canvas);
        assert_eq!(canvas.commands[0], DrawCommand::ViewOffset(Vec2::ZERO));
    }

    #[test]
    fn test_game_over_screen() {
        let mut state = playing();
        state.kills = 7;
        state.time_survived = 61.0;
        enter_outcome(&mut state, Outcome::Lost);
        let mut canvas = DrawList::default();
        render_frame(&state, &Settings::default(), &mut canvas);
        assert!(canvas.has_text("YOU LOSE!"));
        assert!(canvas.has_text("Time Survived: 01:01"));
        assert!(canvas.has_text("Total Kills: 7"));
        assert!(canvas.has_text("Press Q to Quit"));
    }

    #[test]
    fn test_health_text_clamped() {
        let mut state = playing();
        state.player.damage(500);
        let mut canvas = DrawList::default();
        render_frame(&state, &Settings::default(), &mut canvas);
        assert!(canvas.commands.contains(&DrawCommand::Rect(
            HEALTH_BAR_POS,
            Vec2::new(0.0, HEALTH_BAR_HEIGHT),
            Color::RED
        )));
    }
}
