//! All game entity types: pure data plus a few geometry helpers.

use glam::Vec2;

use crate::config::GameConfig;

pub type EntityId = u32;

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned box in playfield units; `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: center.x - w / 2.0,
            y: center.y - h / 2.0,
            w,
            h,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn translate(&mut self, by: Vec2) {
        self.x += by.x;
        self.y += by.y;
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

// ── Kinds & status ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Restores some health.
    Shield,
    /// Raises the weapon level by one.
    Gun,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    /// Rock shot down.
    Large,
    /// Rock rammed the ship.
    Small,
    /// Ship lost a life.
    PlayerDeath,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Active,
    /// Post-death window; the ship is parked off the playfield and cannot shoot.
    Hidden { since: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Out of lives and the death explosion has finished.
    RoundOver,
}

// ── Falling & flying things ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub id: EntityId,
    /// Current bounding box, which grows and shrinks as the rock spins.
    pub rect: Rect,
    /// Unrotated sprite size.
    pub sprite_size: Vec2,
    pub velocity: Vec2,
    /// Degrees in `[0, 360)`.
    pub angle: f32,
    /// Degrees added to `angle` every tick.
    pub spin: f32,
    /// Collision radius, also the score for shooting it and half the damage it deals.
    pub radius: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    pub rect: Rect,
    pub velocity: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub id: EntityId,
    pub rect: Rect,
    pub velocity: Vec2,
    pub kind: PowerUpKind,
}

/// A purely visual explosion. Never collides.
#[derive(Clone, Debug, PartialEq)]
pub struct Effect {
    pub id: EntityId,
    pub kind: EffectKind,
    pub center: Vec2,
    pub frame: usize,
    pub last_frame_at: u64,
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub radius: f32,
    pub health: i32,
    pub lives: u32,
    pub weapon: u32,
    /// When the weapon level last went up or down.
    pub weapon_changed_at: u64,
    pub state: PlayerState,
}

impl Player {
    pub fn is_hidden(&self) -> bool {
        matches!(self.state, PlayerState::Hidden { .. })
    }
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire game state. Cloneable so the tick can build the next state
/// without touching the previous one.
#[derive(Clone, Debug)]
pub struct EntireGameStateInfo {
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    pub effects: Vec<Effect>,
    pub score: u32,
    pub status: GameStatus,
    /// Player-death explosions still animating; the round cannot end while non-zero.
    pub death_effects_playing: u32,
    pub next_id: EntityId,
    pub config: GameConfig,
}

impl EntireGameStateInfo {
    pub fn width(&self) -> f32 {
        self.config.playfield.width
    }

    pub fn height(&self) -> f32 {
        self.config.playfield.height
    }
}
