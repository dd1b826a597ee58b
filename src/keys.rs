use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEventKind};

use crate::input::{InputProvider, Key};

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms at
/// 60 FPS) is always refreshed before expiry.
pub const HOLD_WINDOW: u64 = 8;

/// A Space `Press` this soon after the previous Space event is taken as
/// auto-repeat rather than a new tap. Two frames (≈33 ms at 60 FPS) sits under
/// the usual 25-30 Hz repeat interval, so on terminals without release events
/// taps closer together than that merge into one shot.
pub const SHOT_REPEAT_WINDOW: u64 = 2;

const SHOOT: KeyCode = KeyCode::Char(' ');

/// Per-frame key state built from the terminal's event stream.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`). Keys expire after `HOLD_WINDOW` frames of silence.
#[derive(Debug, Default)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    shoot: bool,
}

impl KeyTracker {
    /// Start a new frame; the shoot edge only lasts one frame.
    pub fn next_frame(&mut self) {
        self.frame += 1;
        self.shoot = false;
    }

    pub fn record(&mut self, code: KeyCode, kind: KeyEventKind) {
        match kind {
            KeyEventKind::Press => {
                if code == SHOOT && !self.seen_within(code, SHOT_REPEAT_WINDOW) {
                    self.shoot = true;
                }
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.seen_within(code, HOLD_WINDOW)
    }

    fn seen_within(&self, code: KeyCode, frames: u64) -> bool {
        self.key_frame
            .get(&code)
            .map(|&last| self.frame.saturating_sub(last) <= frames)
            .unwrap_or(false)
    }
}

impl InputProvider for KeyTracker {
    fn is_key_held(&self, key: Key) -> bool {
        let codes: [KeyCode; 3] = match key {
            Key::Left => [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            Key::Right => [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
        };
        codes.into_iter().any(|code| self.is_held(code))
    }

    fn shoot_pressed(&self) -> bool {
        self.shoot
    }
}
