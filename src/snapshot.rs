//! Read-only view of a game state for whatever draws it.

use crate::entities::{EffectKind, EntireGameStateInfo, GameStatus, PowerUpKind, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Obstacle,
    Projectile,
    PowerUp(PowerUpKind),
    Effect { kind: EffectKind, frame: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub width: f32,
    pub height: f32,
    /// Back to front: rocks, power-ups, projectiles, ship, effects.
    pub sprites: Vec<Sprite>,
    pub score: u32,
    pub health: i32,
    pub max_health: i32,
    pub lives: u32,
    pub weapon: u32,
    pub status: GameStatus,
}

pub fn snapshot(state: &EntireGameStateInfo) -> Snapshot {
    let effects = &state.config.effects;
    let mut sprites = Vec::with_capacity(
        state.obstacles.len()
            + state.power_ups.len()
            + state.projectiles.len()
            + state.effects.len()
            + 1,
    );

    sprites.extend(state.obstacles.iter().map(|o| Sprite {
        kind: SpriteKind::Obstacle,
        rect: o.rect,
    }));
    sprites.extend(state.power_ups.iter().map(|p| Sprite {
        kind: SpriteKind::PowerUp(p.kind),
        rect: p.rect,
    }));
    sprites.extend(state.projectiles.iter().map(|p| Sprite {
        kind: SpriteKind::Projectile,
        rect: p.rect,
    }));
    if !state.player.is_hidden() {
        sprites.push(Sprite {
            kind: SpriteKind::Player,
            rect: state.player.rect,
        });
    }
    sprites.extend(state.effects.iter().map(|e| {
        let size = effects.size(e.kind);
        Sprite {
            kind: SpriteKind::Effect {
                kind: e.kind,
                frame: e.frame,
            },
            rect: Rect::from_center(e.center, size, size),
        }
    }));

    Snapshot {
        width: state.width(),
        height: state.height(),
        sprites,
        score: state.score,
        health: state.player.health,
        max_health: state.config.player.max_health,
        lives: state.player.lives,
        weapon: state.player.weapon,
        status: state.status,
    }
}
