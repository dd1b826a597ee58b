#![allow(dead_code)]

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_survival::compute::init_state;
use space_survival::config::GameConfig;
use space_survival::entities::{EntireGameStateInfo, Obstacle, PowerUp, PowerUpKind, Projectile, Rect};

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A default game at t=0 with every rock removed, so tests can place their own.
pub fn quiet_state() -> EntireGameStateInfo {
    quiet_state_with(GameConfig::default())
}

pub fn quiet_state_with(config: GameConfig) -> EntireGameStateInfo {
    let mut s = init_state(config, 0, &mut seeded_rng()).expect("valid config");
    s.obstacles.clear();
    s
}

/// A non-moving, non-spinning 40x40 rock.
pub fn parked_rock(id: u32, center: Vec2, radius: u32) -> Obstacle {
    Obstacle {
        id,
        rect: Rect::from_center(center, 40.0, 40.0),
        sprite_size: Vec2::new(40.0, 40.0),
        velocity: Vec2::ZERO,
        angle: 0.0,
        spin: 0.0,
        radius,
    }
}

/// A bullet that will be centred on `center` after its next move.
pub fn bullet_about_to_reach(id: u32, center: Vec2) -> Projectile {
    Projectile {
        id,
        rect: Rect::from_center(center + Vec2::new(0.0, 10.0), 10.0, 54.0),
        velocity: Vec2::new(0.0, -10.0),
    }
}

pub fn power_up_at(id: u32, center: Vec2, kind: PowerUpKind) -> PowerUp {
    PowerUp {
        id,
        rect: Rect::from_center(center, 30.0, 30.0),
        velocity: Vec2::new(0.0, 3.0),
        kind,
    }
}
