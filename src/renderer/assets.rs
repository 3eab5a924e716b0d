//! Asset manifest and tolerant texture loading
//!
//! A missing texture is logged and skipped; the sprite then draws with
//! whatever the backend falls back to.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::SpriteId;
use crate::consts::*;

/// Loads image files into backend texture handles
pub trait TextureLoader {
    type Handle;

    fn load(&mut self, path: &Path) -> Option<Self::Handle>;
}

/// Where every sprite lives on disk
#[derive(Debug, Clone)]
pub struct AssetManifest {
    root: PathBuf,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self::new("assets")
    }
}

impl AssetManifest {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn sprite_path(&self, sprite: SpriteId) -> PathBuf {
        let rel = match sprite {
            SpriteId::Background => "background.png".to_string(),
            SpriteId::Player => "sprite_ship_3.png".to_string(),
            SpriteId::Enemy => "big_boss1.png".to_string(),
            SpriteId::HealthPowerUp => "health.png".to_string(),
            SpriteId::AnimatedEnemy(i) => format!("invader_animation_2/sprite_{i}.png"),
            SpriteId::Bullet(i) => format!("blaster_player/sprite_{i}.png"),
            SpriteId::Explosion(i) => format!("explotion/sprite_{i}.png"),
            SpriteId::Boss(i) => format!("final_boss_animation/sprite_{i}.png"),
        };
        self.root.join(rel)
    }

    pub fn sound_path(&self, cue: crate::audio::SoundCue) -> PathBuf {
        self.root.join(cue.file_name())
    }

    /// Every sprite frame the game draws
    pub fn all_sprites() -> Vec<SpriteId> {
        let mut sprites = vec![
            SpriteId::Background,
            SpriteId::Player,
            SpriteId::Enemy,
            SpriteId::HealthPowerUp,
        ];
        sprites.extend((0..ANIMATED_ENEMY_FRAMES).map(SpriteId::AnimatedEnemy));
        sprites.extend((0..BULLET_FRAMES).map(SpriteId::Bullet));
        sprites.extend((0..EXPLOSION_FRAMES).map(SpriteId::Explosion));
        sprites.extend((0..BOSS_FRAMES).map(SpriteId::Boss));
        sprites
    }
}

/// Loaded textures keyed by sprite
#[derive(Debug)]
pub struct SpriteSheet<H> {
    textures: HashMap<SpriteId, H>,
    missing: Vec<SpriteId>,
}

impl<H> SpriteSheet<H> {
    /// Load everything in the manifest, tolerating failures
    pub fn load_all<L>(manifest: &AssetManifest, loader: &mut L) -> Self
    where
        L: TextureLoader<Handle = H>,
    {
        let mut textures = HashMap::new();
        let mut missing = Vec::new();
        for sprite in AssetManifest::all_sprites() {
            let path = manifest.sprite_path(sprite);
            match loader.load(&path) {
                Some(handle) => {
                    textures.insert(sprite, handle);
                }
                None => {
                    log::warn!("Failed to load texture {}", path.display());
                    missing.push(sprite);
                }
            }
        }
        log::info!(
            "Loaded {} textures ({} missing)",
            textures.len(),
            missing.len()
        );
        Self { textures, missing }
    }

    pub fn get(&self, sprite: SpriteId) -> Option<&H> {
        self.textures.get(&sprite)
    }

    pub fn missing(&self) -> &[SpriteId] {
        &self.missing
    }
}
