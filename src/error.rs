use std::path::PathBuf;

use thiserror::Error;

/// Construction-time failures. A running round never produces one of these.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("playfield must be positive and finite, got {width}x{height}")]
    InvalidPlayfield { width: f32, height: f32 },

    #[error("frame rate must be at least 1")]
    InvalidFrameRate,

    #[error("at least one obstacle sprite size is required")]
    NoObstacleSprites,

    #[error("{what} size {w}x{h} must be positive")]
    InvalidSprite { what: &'static str, w: f32, h: f32 },

    #[error("obstacle sprite {w}x{h} does not fit inside a playfield {width} wide when rotated")]
    ObstacleTooWide { w: f32, h: f32, width: f32 },

    #[error("power-up drop chance {0} is outside [0, 1]")]
    InvalidDropChance(f64),

    #[error("max health must be positive, got {0}")]
    InvalidHealth(i32),

    #[error("shield heal must not be negative, got {0}")]
    NegativeShieldHeal(i32),

    #[error("player needs at least one life")]
    NoLives,

    #[error("obstacle radius factor must be positive and finite, got {0}")]
    InvalidRadiusFactor(f32),

    #[error("{what} speed must be positive and finite, got {speed}")]
    InvalidSpeed { what: &'static str, speed: f32 },

    #[error("{0} effect needs at least one frame")]
    EmptyEffect(&'static str),

    #[error("failed to read config {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    ConfigParse(#[from] toml::de::Error),
}
