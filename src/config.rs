//! Tunable game parameters. Every section has defaults, so a TOML file only
//! needs the keys it wants to change.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::EffectKind;
use crate::error::GameError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: PlayfieldConfig,
    pub player: PlayerConfig,
    pub obstacles: ObstacleConfig,
    pub projectiles: ProjectileConfig,
    pub power_ups: PowerUpConfig,
    pub effects: EffectConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
    /// Target ticks per second.
    pub fps: u32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 600.0,
            fps: 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    /// Horizontal units per tick while a direction key is held.
    pub speed: f32,
    /// Gap between the ship's bottom edge and the playfield's bottom edge.
    pub bottom_margin: f32,
    pub max_health: i32,
    pub lives: u32,
    pub shield_heal: i32,
    pub hide_ms: u64,
    pub weapon_decay_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 38.0,
            radius: 20.0,
            speed: 8.0,
            bottom_margin: 10.0,
            max_health: 100,
            lives: 3,
            shield_heal: 20,
            hide_ms: 1000,
            weapon_decay_ms: 5000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub count: usize,
    /// Unrotated `[width, height]` of each rock sprite; one is picked per spawn.
    pub sprite_sizes: Vec<[f32; 2]>,
    /// Collision radius as a fraction of the sprite's half-width.
    pub radius_factor: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            count: 8,
            sprite_sizes: vec![
                [101.0, 84.0],
                [120.0, 98.0],
                [43.0, 44.0],
                [28.0, 28.0],
                [45.0, 40.0],
                [90.0, 83.0],
                [98.0, 96.0],
            ],
            radius_factor: 0.85,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub width: f32,
    pub height: f32,
    /// Upward speed in units per tick.
    pub speed: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 54.0,
            speed: 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    pub drop_chance: f64,
    pub width: f32,
    pub height: f32,
    /// Downward speed in units per tick.
    pub speed: f32,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            drop_chance: 0.1,
            width: 30.0,
            height: 30.0,
            speed: 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub frame_ms: u64,
    pub large_size: f32,
    pub large_frames: usize,
    pub small_size: f32,
    pub small_frames: usize,
    pub player_size: f32,
    pub player_frames: usize,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            frame_ms: 50,
            large_size: 75.0,
            large_frames: 9,
            small_size: 30.0,
            small_frames: 9,
            player_size: 100.0,
            player_frames: 9,
        }
    }
}

impl EffectConfig {
    pub fn frames(&self, kind: EffectKind) -> usize {
        match kind {
            EffectKind::Large => self.large_frames,
            EffectKind::Small => self.small_frames,
            EffectKind::PlayerDeath => self.player_frames,
        }
    }

    /// Edge length of the square the effect is drawn in.
    pub fn size(&self, kind: EffectKind) -> f32 {
        match kind {
            EffectKind::Large => self.large_size,
            EffectKind::Small => self.small_size,
            EffectKind::PlayerDeath => self.player_size,
        }
    }
}

impl GameConfig {
    /// Read a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, GameError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make spawning or timing meaningless.
    pub fn validate(&self) -> Result<(), GameError> {
        let PlayfieldConfig { width, height, fps } = self.playfield;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(GameError::InvalidPlayfield { width, height });
        }
        if fps == 0 {
            return Err(GameError::InvalidFrameRate);
        }

        check_sprite("player", self.player.width, self.player.height)?;
        check_sprite("projectile", self.projectiles.width, self.projectiles.height)?;
        check_sprite("power-up", self.power_ups.width, self.power_ups.height)?;
        if self.player.width > width {
            return Err(GameError::InvalidSprite {
                what: "player",
                w: self.player.width,
                h: self.player.height,
            });
        }

        let player = &self.player;
        if player.max_health <= 0 {
            return Err(GameError::InvalidHealth(player.max_health));
        }
        if player.shield_heal < 0 {
            return Err(GameError::NegativeShieldHeal(player.shield_heal));
        }
        if player.lives == 0 {
            return Err(GameError::NoLives);
        }
        check_speed("player", player.speed)?;
        check_speed("projectile", self.projectiles.speed)?;
        check_speed("power-up", self.power_ups.speed)?;

        let factor = self.obstacles.radius_factor;
        if !(factor.is_finite() && factor > 0.0) {
            return Err(GameError::InvalidRadiusFactor(factor));
        }
        if self.obstacles.sprite_sizes.is_empty() {
            return Err(GameError::NoObstacleSprites);
        }
        for &[w, h] in &self.obstacles.sprite_sizes {
            check_sprite("obstacle", w, h)?;
            // A recycled rock keeps its rotated box, whose width can reach the diagonal.
            if w.hypot(h) >= width {
                return Err(GameError::ObstacleTooWide { w, h, width });
            }
        }

        let chance = self.power_ups.drop_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(GameError::InvalidDropChance(chance));
        }

        let effects = &self.effects;
        for (name, frames) in [
            ("large", effects.large_frames),
            ("small", effects.small_frames),
            ("player", effects.player_frames),
        ] {
            if frames == 0 {
                return Err(GameError::EmptyEffect(name));
            }
        }
        Ok(())
    }
}

fn check_sprite(what: &'static str, w: f32, h: f32) -> Result<(), GameError> {
    if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidSprite { what, w, h })
    }
}

fn check_speed(what: &'static str, speed: f32) -> Result<(), GameError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidSpeed { what, speed })
    }
}
