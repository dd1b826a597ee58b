//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable snapshot of the
//! game. No game logic is performed; this module only translates playfield
//! units into terminal cells and cells into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_survival::entities::{EffectKind, PowerUpKind, Rect};
use space_survival::snapshot::{Snapshot, Sprite, SpriteKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Green;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_WEAPON: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_ROCK: Color = Color::DarkYellow;
const C_BULLET: Color = Color::Cyan;
const C_SHIELD: Color = Color::Green;
const C_GUN: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

const HEALTH_BAR_CELLS: usize = 10;
const SPARKS: [char; 5] = ['·', '*', '✶', '✹', '✸'];

// ── Playfield → terminal mapping ──────────────────────────────────────────────

/// The box inside the border, and how many cells one playfield unit covers.
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

/// Inclusive cell bounds of a sprite, relative to the viewport.
struct Cells {
    c0: u16,
    r0: u16,
    c1: u16,
    r1: u16,
}

impl Viewport {
    fn new(term_w: u16, term_h: u16, snap: &Snapshot) -> Self {
        // row 0 HUD, row 1 top border, last-but-one bottom border, last row hint
        let cols = term_w.saturating_sub(2).max(1);
        let rows = term_h.saturating_sub(4).max(1);
        Self {
            left: 1,
            top: 2,
            cols,
            rows,
            sx: cols as f32 / snap.width,
            sy: rows as f32 / snap.height,
        }
    }

    fn cells(&self, rect: &Rect) -> Option<Cells> {
        let c0 = (rect.left() * self.sx).floor();
        let c1 = ((rect.right() * self.sx).ceil() - 1.0).max(c0);
        let r0 = (rect.top() * self.sy).floor();
        let r1 = ((rect.bottom() * self.sy).ceil() - 1.0).max(r0);
        let (max_c, max_r) = ((self.cols - 1) as f32, (self.rows - 1) as f32);
        if c1 < 0.0 || r1 < 0.0 || c0 > max_c || r0 > max_r {
            return None;
        }
        Some(Cells {
            c0: c0.max(0.0) as u16,
            r0: r0.max(0.0) as u16,
            c1: c1.min(max_c) as u16,
            r1: r1.min(max_r) as u16,
        })
    }

    fn put<W: Write>(&self, out: &mut W, col: u16, row: u16, glyph: char) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(self.left + col, self.top + row))?;
        out.queue(Print(glyph))?;
        Ok(())
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, snap: &Snapshot) -> std::io::Result<()> {
    let (term_w, term_h) = terminal::size()?;
    let view = Viewport::new(term_w, term_h, snap);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, term_w, term_h)?;
    draw_hud(out, snap, term_w)?;

    for sprite in &snap.sprites {
        draw_sprite(out, &view, sprite)?;
    }

    draw_controls_hint(out, term_h)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term_h.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// The "press any key" gate, with the last round's score when there was one.
pub fn render_title<W: Write>(out: &mut W, last_score: Option<u32>) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let last = last_score.map(|s| format!("Last score: {}", s));
    let mut lines: Vec<(&str, Color, u16)> = vec![
        ("Space Survival!", Color::Cyan, height / 4),
        ("← → to move, SPACE to shoot", Color::White, height / 2),
        ("Press any key to start", Color::Yellow, height * 3 / 4),
        ("Q / Esc : Quit", C_HINT, height * 3 / 4 + 1),
    ];
    if let Some(last) = last.as_deref() {
        lines.push((last, C_HUD_SCORE, height / 4 + 2));
    }

    for (msg, color, row) in lines {
        let col = (width / 2).saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(msg))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot, width: u16) -> std::io::Result<()> {
    // Health on the left
    let max = snap.max_health.max(1) as usize;
    let filled = (snap.health.max(0) as usize * HEALTH_BAR_CELLS / max).min(HEALTH_BAR_CELLS);
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(HEALTH_BAR_CELLS - filled)
    )))?;

    // Score in the centre
    let score = snap.score.to_string();
    out.queue(cursor::MoveTo(
        (width / 2).saturating_sub(score.len() as u16 / 2),
        0,
    ))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score))?;

    // Weapon and lives on the right
    let weapon = format!("Gun {} ", snap.weapon);
    let lives = "▲".repeat(snap.lives as usize);
    let used = (weapon.chars().count() + lives.chars().count()) as u16;
    out.queue(cursor::MoveTo(width.saturating_sub(used + 1), 0))?;
    out.queue(style::SetForegroundColor(C_HUD_WEAPON))?;
    out.queue(Print(&weapon))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(out: &mut W, view: &Viewport, sprite: &Sprite) -> std::io::Result<()> {
    let Some(cells) = view.cells(&sprite.rect) else {
        return Ok(());
    };
    match sprite.kind {
        SpriteKind::Obstacle => fill(out, view, &cells, C_ROCK, '▒'),
        SpriteKind::Projectile => {
            let col = cells.c0 + (cells.c1 - cells.c0) / 2;
            out.queue(style::SetForegroundColor(C_BULLET))?;
            for row in cells.r0..=cells.r1 {
                view.put(out, col, row, '║')?;
            }
            Ok(())
        }
        SpriteKind::PowerUp(PowerUpKind::Shield) => fill(out, view, &cells, C_SHIELD, '◆'),
        SpriteKind::PowerUp(PowerUpKind::Gun) => fill(out, view, &cells, C_GUN, '★'),
        SpriteKind::Player => draw_player(out, view, &cells),
        SpriteKind::Effect { kind, frame } => draw_effect(out, view, &cells, kind, frame),
    }
}

fn fill<W: Write>(
    out: &mut W,
    view: &Viewport,
    cells: &Cells,
    color: Color,
    glyph: char,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    for row in cells.r0..=cells.r1 {
        for col in cells.c0..=cells.c1 {
            view.put(out, col, row, glyph)?;
        }
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, view: &Viewport, cells: &Cells) -> std::io::Result<()> {
    //   ▲      ← top row (tip)
    //  /|\     ← every row below (wings + fuselage)
    let mid = cells.c0 + (cells.c1 - cells.c0) / 2;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    view.put(out, mid, cells.r0, '▲')?;
    for row in (cells.r0 + 1)..=cells.r1 {
        for col in cells.c0..=cells.c1 {
            let glyph = match col.cmp(&mid) {
                std::cmp::Ordering::Less => '/',
                std::cmp::Ordering::Equal => '|',
                std::cmp::Ordering::Greater => '\\',
            };
            view.put(out, col, row, glyph)?;
        }
    }
    Ok(())
}

fn draw_effect<W: Write>(
    out: &mut W,
    view: &Viewport,
    cells: &Cells,
    kind: EffectKind,
    frame: usize,
) -> std::io::Result<()> {
    let color = match kind {
        EffectKind::Large => Color::Red,
        EffectKind::Small => Color::Yellow,
        EffectKind::PlayerDeath => Color::Magenta,
    };
    let glyph = SPARKS[frame % SPARKS.len()];
    out.queue(style::SetForegroundColor(color))?;
    for row in cells.r0..=cells.r1 {
        for col in cells.c0..=cells.c1 {
            // sparse sparkle that shifts every frame
            if (col as usize + row as usize + frame) % 3 == 0 {
                view.put(out, col, row, glyph)?;
            }
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}
