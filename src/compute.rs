//! Pure game-logic functions.
//!
//! `tick` and `player_shoot` take an immutable reference to the current
//! `EntireGameStateInfo` and return a brand-new one. Side effects are limited
//! to the injected RNG and notification sink.

use std::ops::Range;

use glam::Vec2;
use log::{debug, info, trace};
use rand::Rng;

use crate::config::{GameConfig, PlayfieldConfig};
use crate::entities::{
    Effect, EffectKind, EntireGameStateInfo, EntityId, GameStatus, Obstacle, Player, PlayerState,
    PowerUp, PowerUpKind, Projectile, Rect,
};
use crate::error::GameError;
use crate::events::{Notification, NotificationSink};
use crate::input::{InputProvider, Key};

// ── Spawn tables ─────────────────────────────────────────────────────────────

const SPAWN_Y: Range<i32> = -180..-100;
const SPAWN_SPEED_Y: Range<i32> = 2..5;
const RECYCLE_Y: Range<i32> = -100..-40;
const RECYCLE_SPEED_Y: Range<i32> = 2..10;
const DRIFT_X: Range<i32> = -3..3;
const SPIN: Range<i32> = -3..3;

/// How far below the playfield a hidden ship is parked.
const HIDDEN_OFFSET: f32 = 500.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Validate `config` and build the first round.
pub fn init_state(
    config: GameConfig,
    now: u64,
    rng: &mut impl Rng,
) -> Result<EntireGameStateInfo, GameError> {
    config.validate()?;
    Ok(fresh_state(config, now, rng))
}

/// Throw the old round away and start over with the same settings.
pub fn new_game(state: &EntireGameStateInfo, now: u64, rng: &mut impl Rng) -> EntireGameStateInfo {
    fresh_state(state.config.clone(), now, rng)
}

fn fresh_state(config: GameConfig, now: u64, rng: &mut impl Rng) -> EntireGameStateInfo {
    let mut state = EntireGameStateInfo {
        player: new_player(&config, now),
        obstacles: Vec::with_capacity(config.obstacles.count),
        projectiles: Vec::new(),
        power_ups: Vec::new(),
        effects: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        death_effects_playing: 0,
        next_id: 0,
        config,
    };
    for _ in 0..state.config.obstacles.count {
        let id = alloc_id(&mut state);
        let obstacle = spawn_obstacle(id, &state.config, rng);
        state.obstacles.push(obstacle);
    }
    info!(
        "new game: {} obstacles on a {}x{} playfield",
        state.obstacles.len(),
        state.width(),
        state.height()
    );
    state
}

pub fn new_player(config: &GameConfig, now: u64) -> Player {
    Player {
        rect: start_rect(config),
        radius: config.player.radius,
        health: config.player.max_health,
        lives: config.player.lives,
        weapon: 1,
        weapon_changed_at: now,
        state: PlayerState::Active,
    }
}

/// Horizontally centred, a fixed margin above the bottom edge.
fn start_rect(config: &GameConfig) -> Rect {
    let p = &config.player;
    Rect::new(
        (config.playfield.width - p.width) / 2.0,
        config.playfield.height - p.bottom_margin - p.height,
        p.width,
        p.height,
    )
}

/// A fresh rock somewhere above the visible top edge.
pub fn spawn_obstacle(id: EntityId, config: &GameConfig, rng: &mut impl Rng) -> Obstacle {
    let sizes = &config.obstacles.sprite_sizes;
    let [w, h] = sizes[rng.gen_range(0..sizes.len())];
    Obstacle {
        id,
        rect: Rect::new(
            rng.gen_range(0..horizontal_span(config.playfield.width, w)) as f32,
            rng.gen_range(SPAWN_Y) as f32,
            w,
            h,
        ),
        sprite_size: Vec2::new(w, h),
        velocity: Vec2::new(
            rng.gen_range(DRIFT_X) as f32,
            rng.gen_range(SPAWN_SPEED_Y) as f32,
        ),
        angle: 0.0,
        spin: rng.gen_range(SPIN) as f32,
        radius: (w * config.obstacles.radius_factor / 2.0) as u32,
    }
}

/// Put an off-screen rock back above the top edge with new motion.
/// Identity, size and radius are kept.
pub fn recycle_obstacle(obstacle: &mut Obstacle, width: f32, rng: &mut impl Rng) {
    obstacle.rect.x = rng.gen_range(0..horizontal_span(width, obstacle.rect.w)) as f32;
    obstacle.rect.y = rng.gen_range(RECYCLE_Y) as f32;
    obstacle.velocity = Vec2::new(
        rng.gen_range(DRIFT_X) as f32,
        rng.gen_range(RECYCLE_SPEED_Y) as f32,
    );
    trace!("obstacle {} recycled", obstacle.id);
}

/// Exclusive upper bound for a left edge that keeps `w` inside `width`.
fn horizontal_span(width: f32, w: f32) -> i32 {
    ((width - w) as i32).max(1)
}

fn spawn_projectile(id: EntityId, center_x: f32, bottom: f32, config: &GameConfig) -> Projectile {
    let c = &config.projectiles;
    Projectile {
        id,
        rect: Rect::new(center_x - c.width / 2.0, bottom - c.height, c.width, c.height),
        velocity: Vec2::new(0.0, -c.speed),
    }
}

fn spawn_power_up(id: EntityId, center: Vec2, config: &GameConfig, rng: &mut impl Rng) -> PowerUp {
    let c = &config.power_ups;
    PowerUp {
        id,
        rect: Rect::from_center(center, c.width, c.height),
        velocity: Vec2::new(0.0, c.speed),
        kind: if rng.gen_bool(0.5) {
            PowerUpKind::Shield
        } else {
            PowerUpKind::Gun
        },
    }
}

fn alloc_id(state: &mut EntireGameStateInfo) -> EntityId {
    let id = state.next_id;
    state.next_id = state.next_id.wrapping_add(1);
    id
}

// ── Deferred spawns & removals ───────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
enum Spawn {
    Obstacle,
    PowerUp(Vec2),
    Effect(EffectKind, Vec2),
}

/// Everything a collision pass wants changed. Applied only after the pass
/// has finished reading the collections.
#[derive(Debug, Default)]
struct Intents {
    dead_obstacles: Vec<EntityId>,
    dead_projectiles: Vec<EntityId>,
    dead_power_ups: Vec<EntityId>,
    spawns: Vec<Spawn>,
}

fn apply(state: &mut EntireGameStateInfo, intents: Intents, now: u64, rng: &mut impl Rng) {
    state
        .obstacles
        .retain(|o| !intents.dead_obstacles.contains(&o.id));
    state
        .projectiles
        .retain(|p| !intents.dead_projectiles.contains(&p.id));
    state
        .power_ups
        .retain(|p| !intents.dead_power_ups.contains(&p.id));

    for spawn in intents.spawns {
        let id = alloc_id(state);
        match spawn {
            Spawn::Obstacle => {
                let obstacle = spawn_obstacle(id, &state.config, rng);
                state.obstacles.push(obstacle);
            }
            Spawn::PowerUp(center) => {
                let power_up = spawn_power_up(id, center, &state.config, rng);
                state.power_ups.push(power_up);
            }
            Spawn::Effect(kind, center) => {
                if kind == EffectKind::PlayerDeath {
                    state.death_effects_playing += 1;
                }
                state.effects.push(Effect {
                    id,
                    kind,
                    center,
                    frame: 0,
                    last_frame_at: now,
                });
            }
        }
    }
}

// ── Player actions ───────────────────────────────────────────────────────────

/// Fire according to the current weapon level. Does nothing while hidden.
pub fn player_shoot(
    state: &EntireGameStateInfo,
    sink: &mut impl NotificationSink,
) -> EntireGameStateInfo {
    let mut next = state.clone();
    fire(&mut next, sink);
    next
}

fn fire(state: &mut EntireGameStateInfo, sink: &mut impl NotificationSink) {
    let player = &state.player;
    if player.is_hidden() {
        return;
    }
    let ship = player.rect;
    let muzzles = if player.weapon <= 1 {
        vec![(ship.center().x, ship.top())]
    } else {
        vec![(ship.left(), ship.center().y), (ship.right(), ship.center().y)]
    };
    for (x, bottom) in muzzles {
        let id = alloc_id(state);
        let projectile = spawn_projectile(id, x, bottom, &state.config);
        state.projectiles.push(projectile);
    }
    sink.notify(Notification::Shoot);
}

/// Raise the weapon level and restart its decay timer.
pub fn gun_up(player: &mut Player, now: u64) {
    player.weapon += 1;
    player.weapon_changed_at = now;
    debug!("weapon up to level {}", player.weapon);
}

fn hide_player(player: &mut Player, now: u64, playfield: &PlayfieldConfig) {
    player.state = PlayerState::Hidden { since: now };
    player.rect.set_center(Vec2::new(
        playfield.width / 2.0,
        playfield.height + HIDDEN_OFFSET,
    ));
}

// ── Per-entity advance ───────────────────────────────────────────────────────

fn advance_player(player: &mut Player, input: &impl InputProvider, now: u64, config: &GameConfig) {
    let c = &config.player;
    if player.weapon > 1 && now.saturating_sub(player.weapon_changed_at) > c.weapon_decay_ms {
        player.weapon -= 1;
        player.weapon_changed_at = now;
        debug!("weapon decayed to level {}", player.weapon);
    }

    if let PlayerState::Hidden { since } = player.state {
        if now.saturating_sub(since) > c.hide_ms {
            player.state = PlayerState::Active;
            player.rect = start_rect(config);
            debug!("player back in play, {} lives left", player.lives);
        }
    }

    if input.is_key_held(Key::Right) {
        player.rect.x += c.speed;
    }
    if input.is_key_held(Key::Left) {
        player.rect.x -= c.speed;
    }
    let width = config.playfield.width;
    if player.rect.right() > width {
        player.rect.x = width - player.rect.w;
    }
    if player.rect.left() < 0.0 {
        player.rect.x = 0.0;
    }
}

/// Bounding box of a `size` sprite rotated by `degrees`.
fn rotated_box(size: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}

fn advance_obstacle(obstacle: &mut Obstacle, playfield: &PlayfieldConfig, rng: &mut impl Rng) {
    obstacle.angle = (obstacle.angle + obstacle.spin).rem_euclid(360.0);
    let size = rotated_box(obstacle.sprite_size, obstacle.angle);
    obstacle.rect = Rect::from_center(obstacle.rect.center(), size.x, size.y);
    obstacle.rect.translate(obstacle.velocity);

    let r = obstacle.rect;
    if r.top() > playfield.height || r.left() > playfield.width || r.right() < 0.0 {
        recycle_obstacle(obstacle, playfield.width, rng);
    }
}

fn advance_effects(state: &mut EntireGameStateInfo, now: u64) {
    let config = &state.config.effects;
    let mut finished_deaths = 0;
    state.effects.retain_mut(|effect| {
        if now.saturating_sub(effect.last_frame_at) <= config.frame_ms {
            return true;
        }
        effect.last_frame_at = now;
        effect.frame += 1;
        if effect.frame < config.frames(effect.kind) {
            return true;
        }
        if effect.kind == EffectKind::PlayerDeath {
            finished_deaths += 1;
        }
        false
    });
    state.death_effects_playing = state.death_effects_playing.saturating_sub(finished_deaths);
}

// ── Collision passes ─────────────────────────────────────────────────────────

fn circles_touch(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance_squared(b) <= (ra + rb) * (ra + rb)
}

/// Every rock overlapping any projectile is destroyed, and so is every
/// projectile overlapping any rock.
fn resolve_projectile_hits(
    state: &mut EntireGameStateInfo,
    now: u64,
    rng: &mut impl Rng,
    sink: &mut impl NotificationSink,
) {
    let mut intents = Intents::default();
    let mut score_gain = 0;
    let drop_chance = state.config.power_ups.drop_chance;

    for obstacle in &state.obstacles {
        let mut hit = false;
        for projectile in &state.projectiles {
            if projectile.rect.overlaps(&obstacle.rect) {
                hit = true;
                if !intents.dead_projectiles.contains(&projectile.id) {
                    intents.dead_projectiles.push(projectile.id);
                }
            }
        }
        if !hit {
            continue;
        }

        sink.notify(Notification::ObstacleDestroyed);
        score_gain += obstacle.radius;
        let center = obstacle.rect.center();
        intents.dead_obstacles.push(obstacle.id);
        intents.spawns.push(Spawn::Effect(EffectKind::Large, center));
        if rng.gen_bool(drop_chance) {
            intents.spawns.push(Spawn::PowerUp(center));
        }
        intents.spawns.push(Spawn::Obstacle);
    }

    state.score += score_gain;
    apply(state, intents, now, rng);
}

/// Rocks whose circle touches the ship's circle hit it.
fn resolve_player_rammed(
    state: &mut EntireGameStateInfo,
    now: u64,
    rng: &mut impl Rng,
    sink: &mut impl NotificationSink,
) {
    let ship = state.player.rect.center();
    let ship_radius = state.player.radius;
    let hits: Vec<(EntityId, u32, Vec2)> = state
        .obstacles
        .iter()
        .filter(|o| circles_touch(ship, ship_radius, o.rect.center(), o.radius as f32))
        .map(|o| (o.id, o.radius, o.rect.center()))
        .collect();

    let mut intents = Intents::default();
    for (id, radius, center) in hits {
        intents.dead_obstacles.push(id);
        intents.spawns.push(Spawn::Obstacle);
        intents.spawns.push(Spawn::Effect(EffectKind::Small, center));

        let player = &mut state.player;
        // Already lost a life this pass; the rest of the pile-up is free.
        if player.is_hidden() {
            continue;
        }
        player.health = (player.health - 2 * radius as i32).max(0);
        if player.health > 0 {
            continue;
        }

        intents
            .spawns
            .push(Spawn::Effect(EffectKind::PlayerDeath, player.rect.center()));
        sink.notify(Notification::PlayerDeath);
        player.lives = player.lives.saturating_sub(1);
        player.health = state.config.player.max_health;
        hide_player(player, now, &state.config.playfield);
        debug!("player destroyed, {} lives left", player.lives);
    }
    apply(state, intents, now, rng);
}

fn resolve_pickups(
    state: &mut EntireGameStateInfo,
    now: u64,
    rng: &mut impl Rng,
    sink: &mut impl NotificationSink,
) {
    let mut intents = Intents::default();
    let ship = state.player.rect;
    let max_health = state.config.player.max_health;
    let heal = state.config.player.shield_heal;

    for power_up in state.power_ups.iter().filter(|p| p.rect.overlaps(&ship)) {
        intents.dead_power_ups.push(power_up.id);
        match power_up.kind {
            PowerUpKind::Shield => {
                state.player.health = (state.player.health + heal).min(max_health);
                sink.notify(Notification::ShieldPickup);
                debug!("shield picked up, health {}", state.player.health);
            }
            PowerUpKind::Gun => {
                gun_up(&mut state.player, now);
                sink.notify(Notification::WeaponPickup);
            }
        }
    }
    apply(state, intents, now, rng);
}

// ── Per-tick update ──────────────────────────────────────────────────────────

/// Advance the simulation by one tick at time `now` (milliseconds).
///
/// Order: fire on the shoot edge, advance every entity, then resolve
/// projectile/rock, ship/rock and ship/power-up collisions, and finally check
/// whether the round is over. Once over, the state no longer changes.
pub fn tick(
    state: &EntireGameStateInfo,
    input: &impl InputProvider,
    now: u64,
    rng: &mut impl Rng,
    sink: &mut impl NotificationSink,
) -> EntireGameStateInfo {
    if state.status == GameStatus::RoundOver {
        return state.clone();
    }
    let mut next = state.clone();

    // ── 0. Fire ──────────────────────────────────────────────────────────────
    if input.shoot_pressed() {
        fire(&mut next, sink);
    }

    // ── 1. Advance ───────────────────────────────────────────────────────────
    advance_player(&mut next.player, input, now, &next.config);
    for obstacle in &mut next.obstacles {
        advance_obstacle(obstacle, &next.config.playfield, rng);
    }
    for projectile in &mut next.projectiles {
        projectile.rect.translate(projectile.velocity);
    }
    next.projectiles.retain(|p| p.rect.bottom() >= 0.0);
    let height = next.height();
    for power_up in &mut next.power_ups {
        power_up.rect.translate(power_up.velocity);
    }
    next.power_ups.retain(|p| p.rect.top() <= height);
    advance_effects(&mut next, now);

    // ── 2-4. Collisions ──────────────────────────────────────────────────────
    resolve_projectile_hits(&mut next, now, rng, sink);
    resolve_player_rammed(&mut next, now, rng, sink);
    resolve_pickups(&mut next, now, rng, sink);

    // ── 5. Round over? ───────────────────────────────────────────────────────
    if next.player.lives == 0 && next.death_effects_playing == 0 {
        next.status = GameStatus::RoundOver;
        info!("round over, final score {}", next.score);
    }
    next
}
